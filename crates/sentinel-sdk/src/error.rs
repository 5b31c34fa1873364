//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Runtime error
    #[error("Runtime error: {0}")]
    Runtime(#[from] sentinel_runtime::RuntimeError),

    /// Background analysis task panicked or was cancelled
    #[error("Task error: {0}")]
    Task(String),

    /// Live feed already running
    #[error("Console already started")]
    AlreadyStarted,
}

impl From<tokio::task::JoinError> for SdkError {
    fn from(e: tokio::task::JoinError) -> Self {
        SdkError::Task(e.to_string())
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_runtime::RuntimeError;

    #[test]
    fn test_config_error() {
        let error = SdkError::Config("temperature must be between 0 and 2".to_string());
        assert!(error.to_string().starts_with("Configuration error"));
        assert!(error.to_string().contains("temperature"));
    }

    #[test]
    fn test_runtime_error_conversion() {
        let error: SdkError = RuntimeError::NotFound("transaction tx_1".to_string()).into();
        assert!(matches!(error, SdkError::Runtime(RuntimeError::NotFound(_))));
        assert_eq!(error.to_string(), "Runtime error: Not found: transaction tx_1");
    }

    #[test]
    fn test_already_started() {
        assert_eq!(SdkError::AlreadyStarted.to_string(), "Console already started");
    }
}
