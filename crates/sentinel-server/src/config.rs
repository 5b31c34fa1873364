//! Server configuration

use sentinel_sdk::{AnalysisContext, AuthConfig, ClassifierKind, ConsoleConfig, FeedConfig, LlmConfig};
use serde::Deserialize;
use std::path::Path;

/// Environment variables consulted when no API key is configured
pub const API_KEY_FALLBACK_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host
    pub host: String,

    /// Server port (HTTP)
    pub port: u16,

    /// Log level for the sentinel crates, overridden by RUST_LOG
    pub log_level: String,

    pub log_format: LogFormat,

    /// Scoring engine: llm or rules
    pub classifier: ClassifierKind,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Demo account and session storage
    pub auth: AuthConfig,

    /// Live feed; disabled unless an interval is set
    pub feed: FeedConfig,

    /// Card holder profile used in analysis prompts
    pub context: AnalysisContext,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            classifier: ClassifierKind::default(),
            llm: LlmConfig::default(),
            auth: AuthConfig::default(),
            feed: FeedConfig::default(),
            context: AnalysisContext::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config/server.*`, `.env` and `SENTINEL_*` variables
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();

        let config_result = config::Config::builder()
            .add_source(config::File::with_name("config/server").required(false))
            .add_source(environment())
            .build();

        let config: Self = match config_result {
            Ok(cfg) => cfg
                .try_deserialize()
                .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))?,
            Err(e) => {
                tracing::info!("No usable config source ({}), using default configuration", e);
                Self::default()
            }
        };

        Ok(config.with_api_key_fallback(|name| std::env::var(name).ok()))
    }

    /// Load configuration from a specific file, without environment overrides
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize config: {}", e))
    }

    /// Fill a missing API key from the first fallback variable `lookup` knows
    pub fn with_api_key_fallback(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let configured = self
            .llm
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !configured {
            self.llm.api_key = API_KEY_FALLBACK_VARS
                .iter()
                .find_map(|name| lookup(name).filter(|key| !key.trim().is_empty()));
        }
        self
    }

    /// Console settings carried by this configuration
    pub fn console_config(&self) -> ConsoleConfig {
        ConsoleConfig {
            classifier: self.classifier,
            llm: self.llm.clone(),
            auth: self.auth.clone(),
            feed: self.feed.clone(),
            context: self.context.clone(),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("SENTINEL")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
