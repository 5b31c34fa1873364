//! Sentinel Core - Core types and definitions for the Sentinel fraud console
//!
//! This crate provides the fundamental types used across the Sentinel workspace:
//! - Transaction records and their status machine
//! - Analysis results returned by classifiers
//! - The session user record
//! - Rules and models catalog entries
//! - Error types

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod transaction;
pub mod user;

// Re-export commonly used types
pub use analysis::{AnalysisResult, RecommendedAction};
pub use catalog::{DetectionRule, ModelDescriptor, ModelStatus, RuleCategory};
pub use error::{CoreError, Result};
pub use transaction::{RiskLevel, Transaction, TransactionStatus, TransactionType};
pub use user::User;
