//! Builder pattern for Console

use crate::config::{ClassifierKind, ConsoleConfig, LlmConfig, LlmProviderKind, DEFAULT_MOCK_REPLY};
use crate::console::Console;
use crate::error::Result;
use sentinel_llm::{GeminiProvider, LLMClient, MockProvider};
use sentinel_runtime::generator::GeneratorTemplates;
use sentinel_runtime::{
    AnalysisDispatcher, Classifier, FileSessionStorage, LlmClassifier, MemorySessionStorage,
    RuleBasedClassifier, RuleCatalog, Session, SessionStorage, TransactionGenerator,
    TransactionStore,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Builder for Console
///
/// # Example
///
/// ```rust,ignore
/// use sentinel_sdk::{ConsoleBuilder, LlmConfig};
///
/// // Gemini-backed analysis
/// let console = ConsoleBuilder::new()
///     .with_llm(LlmConfig::gemini(api_key))
///     .build()?;
///
/// // Local rule engine, new transaction every 3 seconds
/// let console = ConsoleBuilder::new()
///     .with_classifier(Arc::new(my_classifier))
///     .with_feed_interval(Duration::from_secs(3))
///     .build()?;
/// ```
pub struct ConsoleBuilder {
    config: ConsoleConfig,
    classifier: Option<Arc<dyn Classifier>>,
    llm_client: Option<Arc<dyn LLMClient>>,
    session_storage: Option<Arc<dyn SessionStorage>>,
    catalog: Option<Arc<RuleCatalog>>,
    templates: Option<GeneratorTemplates>,
}

impl ConsoleBuilder {
    pub fn new() -> Self {
        Self::from_config(ConsoleConfig::default())
    }

    pub fn from_config(config: ConsoleConfig) -> Self {
        Self {
            config,
            classifier: None,
            llm_client: None,
            session_storage: None,
            catalog: None,
            templates: None,
        }
    }

    pub fn with_llm(mut self, llm: LlmConfig) -> Self {
        self.config.llm = llm;
        self
    }

    /// Score with the local rule engine instead of the LLM
    pub fn use_rule_engine(mut self) -> Self {
        self.config.classifier = ClassifierKind::Rules;
        self
    }

    /// Use this classifier regardless of the configured kind
    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Use this client for the LLM classifier instead of building one from config
    pub fn with_llm_client(mut self, client: Arc<dyn LLMClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    pub fn with_session_storage(mut self, storage: Arc<dyn SessionStorage>) -> Self {
        self.session_storage = Some(storage);
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<RuleCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_templates(mut self, templates: GeneratorTemplates) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn with_login_delay(mut self, delay: std::time::Duration) -> Self {
        self.config.auth.login_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn with_feed_interval(mut self, interval: std::time::Duration) -> Self {
        self.config = self.config.with_feed_interval(interval);
        self
    }

    /// Wire everything together. Nothing runs until [`Console::start`].
    pub fn build(self) -> Result<Console> {
        self.config.validate()?;

        let store = Arc::new(TransactionStore::new());
        let catalog = self.catalog.unwrap_or_default();
        let generator = Arc::new(match self.templates {
            Some(templates) => TransactionGenerator::with_templates(templates)?,
            None => TransactionGenerator::new(),
        });

        let classifier: Arc<dyn Classifier> = match self.classifier {
            Some(classifier) => classifier,
            None => match self.config.classifier {
                ClassifierKind::Rules => Arc::new(
                    RuleBasedClassifier::new(catalog.clone())
                        .with_context(self.config.context.clone())
                        .with_history(store.clone()),
                ),
                ClassifierKind::Llm => {
                    let client = match self.llm_client {
                        Some(client) => client,
                        None => llm_client_from(&self.config.llm),
                    };
                    Arc::new(
                        LlmClassifier::new(client)
                            .with_model(self.config.llm.model.clone())
                            .with_temperature(self.config.llm.temperature)
                            .with_context(self.config.context.clone()),
                    )
                }
            },
        };

        let mut dispatcher = AnalysisDispatcher::new(store.clone(), classifier);
        if let Some(timeout) = self.config.llm.timeout() {
            dispatcher = dispatcher.with_timeout(timeout);
        }

        let storage: Arc<dyn SessionStorage> = match (self.session_storage, &self.config.auth.storage_dir) {
            (Some(storage), _) => storage,
            (None, Some(dir)) => Arc::new(FileSessionStorage::new(dir.clone())),
            (None, None) => Arc::new(MemorySessionStorage::new()),
        };
        let session = Arc::new(
            Session::new(storage, self.config.auth.credentials())
                .with_login_delay(self.config.auth.login_delay()),
        );

        info!(
            classifier = dispatcher.classifier_name(),
            feed_interval_ms = ?self.config.feed.interval_ms,
            "Console built"
        );

        Ok(Console::new(
            self.config,
            store,
            session,
            catalog,
            generator,
            dispatcher,
        ))
    }
}

impl Default for ConsoleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn llm_client_from(config: &LlmConfig) -> Arc<dyn LLMClient> {
    match config.provider {
        LlmProviderKind::Mock => Arc::new(MockProvider::with_response(
            config
                .mock_response
                .clone()
                .unwrap_or_else(|| DEFAULT_MOCK_REPLY.to_string()),
        )),
        LlmProviderKind::Gemini => {
            let api_key = config.api_key.clone().unwrap_or_default();
            if api_key.is_empty() {
                warn!("No Gemini API key configured; every analysis will use the fallback result");
            }
            let provider = GeminiProvider::new(api_key);
            match &config.base_url {
                Some(url) => Arc::new(provider.with_base_url(url.clone())),
                None => Arc::new(provider),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;
    use std::time::Duration;

    #[test]
    fn test_builder_options() {
        let builder = ConsoleBuilder::new()
            .with_llm(LlmConfig::mock())
            .use_rule_engine()
            .with_login_delay(Duration::from_millis(10))
            .with_feed_interval(Duration::from_secs(2));

        assert_eq!(builder.config.classifier, ClassifierKind::Rules);
        assert_eq!(builder.config.llm.provider, LlmProviderKind::Mock);
        assert_eq!(builder.config.auth.login_delay_ms, 10);
        assert_eq!(builder.config.feed.interval_ms, Some(2000));
    }

    #[tokio::test]
    async fn test_build_rejects_invalid_config() {
        let mut config = ConsoleConfig::default();
        config.llm.temperature = -1.0;
        assert!(matches!(
            ConsoleBuilder::from_config(config).build(),
            Err(SdkError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_build_rejects_reversed_amount_range() {
        let templates = GeneratorTemplates {
            risky_amount: (5000.0, 800.0),
            ..GeneratorTemplates::default()
        };
        assert!(matches!(
            ConsoleBuilder::new().use_rule_engine().with_templates(templates).build(),
            Err(SdkError::Runtime(_))
        ));
    }

    #[tokio::test]
    async fn test_build_picks_classifier() {
        let console = ConsoleBuilder::new().use_rule_engine().build().unwrap();
        assert_eq!(console.classifier_name(), "rules");

        let console = ConsoleBuilder::new().with_llm(LlmConfig::mock()).build().unwrap();
        assert_eq!(console.classifier_name(), "llm");
    }
}
