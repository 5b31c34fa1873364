//! Configuration types for the Console

use crate::error::{Result, SdkError};
use sentinel_runtime::session::DEFAULT_LOGIN_DELAY;
use sentinel_runtime::{AnalysisContext, Credentials};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Reply the mock provider gives when none is configured
pub const DEFAULT_MOCK_REPLY: &str = r#"{"riskScore": 12, "riskLevel": "Low", "isFraud": false, "anomalies": [], "modelConfidence": 0.9, "explanation": "Consistent with the card holder's usual spending.", "recommendedAction": "ALLOW"}"#;

/// Main console configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Which engine scores transactions
    pub classifier: ClassifierKind,

    /// LLM configuration, used by the `llm` classifier
    pub llm: LlmConfig,

    /// Demo account and session storage
    pub auth: AuthConfig,

    /// Periodic transaction generation
    pub feed: FeedConfig,

    /// Card holder profile the analysis is framed against
    pub context: AnalysisContext,
}

impl ConsoleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_llm(mut self, llm: LlmConfig) -> Self {
        self.llm = llm;
        self
    }

    pub fn with_classifier(mut self, classifier: ClassifierKind) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_feed_interval(mut self, interval: Duration) -> Self {
        self.feed.interval_ms = Some(interval.as_millis() as u64);
        self
    }

    /// Reject settings the console cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.classifier == ClassifierKind::Llm && self.llm.model.trim().is_empty() {
            return Err(SdkError::Config("llm.model must not be empty".to_string()));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(SdkError::Config(format!(
                "llm.temperature must be between 0 and 2, got {}",
                self.llm.temperature
            )));
        }
        if self.llm.timeout_secs == Some(0) {
            return Err(SdkError::Config("llm.timeout_secs must be positive".to_string()));
        }
        if self.feed.interval_ms == Some(0) {
            return Err(SdkError::Config("feed.interval_ms must be positive".to_string()));
        }
        if self.auth.email.trim().is_empty() {
            return Err(SdkError::Config("auth.email must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Scoring engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierKind {
    #[default]
    Llm,
    Rules,
}

/// LLM configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,

    /// API key; without one every Gemini call fails and takes the fallback
    pub api_key: Option<String>,

    pub model: String,

    /// Override the Gemini endpoint root
    pub base_url: Option<String>,

    pub temperature: f32,

    /// Give up on an analysis after this many seconds
    pub timeout_secs: Option<u64>,

    /// Body returned by the mock provider
    pub mock_response: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProviderKind::Gemini,
            api_key: None,
            model: sentinel_runtime::classifier::DEFAULT_MODEL.to_string(),
            base_url: None,
            temperature: sentinel_runtime::classifier::DEFAULT_TEMPERATURE,
            timeout_secs: None,
            mock_response: None,
        }
    }
}

impl LlmConfig {
    pub fn mock() -> Self {
        Self {
            provider: LlmProviderKind::Mock,
            ..Self::default()
        }
    }

    pub fn gemini(api_key: impl Into<String>) -> Self {
        Self {
            provider: LlmProviderKind::Gemini,
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// LLM provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    Gemini,
    Mock,
}

/// Demo account and where the signed-in user is kept
///
/// The account fields sit directly on this section so that the `config`
/// crate can coerce scalar values (a numeric password, say) into strings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,

    pub login_delay_ms: u64,

    /// Directory for file-backed sessions; in memory when unset
    pub storage_dir: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::from_credentials(Credentials::default())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("email", &self.email)
            .field("password", &"***")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("login_delay_ms", &self.login_delay_ms)
            .field("storage_dir", &self.storage_dir)
            .finish()
    }
}

impl AuthConfig {
    pub fn from_credentials(credentials: Credentials) -> Self {
        Self {
            email: credentials.email,
            password: credentials.password,
            name: credentials.name,
            role: credentials.role,
            login_delay_ms: DEFAULT_LOGIN_DELAY.as_millis() as u64,
            storage_dir: None,
        }
    }

    /// The account the session checks logins against
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

/// Live feed settings; disabled unless an interval is set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub interval_ms: Option<u64>,
}

impl FeedConfig {
    pub fn interval(&self) -> Option<Duration> {
        self.interval_ms.map(Duration::from_millis)
    }
}
