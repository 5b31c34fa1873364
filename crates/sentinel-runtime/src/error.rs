//! Runtime error types

use sentinel_core::CoreError;
use sentinel_llm::LLMError;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Status machine or analysis validation error
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Classifier could not reach or understand the LLM
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    /// No transaction (or rule) with this identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Session storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
