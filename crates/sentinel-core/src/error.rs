//! Core error types

use crate::transaction::TransactionStatus;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A status change that would move a transaction backwards or skip a stage
    #[error("Invalid status transition for {id}: {from} -> {to}")]
    InvalidTransition {
        id: String,
        from: TransactionStatus,
        to: TransactionStatus,
    },

    /// Analysis payload outside of its documented bounds
    #[error("Invalid analysis result: {0}")]
    InvalidAnalysis(String),

    /// Unparseable enum label
    #[error("Unknown {kind}: {value}")]
    UnknownLabel { kind: &'static str, value: String },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
