//! Sentinel Console SDK
//!
//! High-level API for running the fraud console: build a [`Console`], start it,
//! feed it transactions and read back the dashboard, audit and rules views.

pub mod builder;
pub mod config;
pub mod console;
pub mod error;

// Re-export main types
pub use builder::ConsoleBuilder;
pub use config::{AuthConfig, ClassifierKind, ConsoleConfig, FeedConfig, LlmConfig, LlmProviderKind};
pub use console::Console;
pub use error::{Result, SdkError};

// Re-export commonly used types from dependencies
pub use sentinel_core::{
    AnalysisResult, DetectionRule, ModelDescriptor, RecommendedAction, RiskLevel, Transaction,
    TransactionStatus, TransactionType, User,
};
pub use sentinel_runtime::{
    AnalysisContext, AuditFilter, AuditStats, Classifier, Credentials, DashboardSummary,
    ManualTransaction, RiskBand, RiskBandCounts, RuleCatalog, Session, SessionStorage, StatusFilter,
};
