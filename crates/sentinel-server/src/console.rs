//! Console initialization
//!
//! Converts the server configuration into a running [`Console`].

use crate::config::ServerConfig;
use anyhow::Result;
use sentinel_sdk::{ClassifierKind, Console, ConsoleBuilder, LlmProviderKind};
use tracing::{info, warn};

/// Build and start the console described by `config`
pub async fn init_console(config: &ServerConfig) -> Result<Console> {
    let console_config = config.console_config();

    match (console_config.classifier, console_config.llm.provider) {
        (ClassifierKind::Rules, _) => info!("Scoring with the local rule engine"),
        (ClassifierKind::Llm, LlmProviderKind::Mock) => warn!("Using the mock LLM provider"),
        (ClassifierKind::Llm, LlmProviderKind::Gemini) => {
            info!(model = %console_config.llm.model, "Scoring with Gemini")
        }
    }
    if let Some(dir) = &console_config.auth.storage_dir {
        info!(dir = %dir.display(), "Persisting sessions to disk");
    }

    let console = ConsoleBuilder::from_config(console_config).build()?;
    console.start().await?;

    Ok(console)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_sdk::SdkError;

    #[tokio::test]
    async fn test_init_console_starts_once() {
        let mut config = ServerConfig::default();
        config.classifier = ClassifierKind::Rules;

        let console = init_console(&config).await.unwrap();
        assert_eq!(console.classifier_name(), "rules");
        assert!(matches!(console.start().await, Err(SdkError::AlreadyStarted)));
    }

    #[tokio::test]
    async fn test_init_console_rejects_invalid_config() {
        let mut config = ServerConfig::default();
        config.llm.temperature = 9.0;
        assert!(init_console(&config).await.is_err());
    }
}
