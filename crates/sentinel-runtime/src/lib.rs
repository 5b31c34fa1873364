//! Sentinel Runtime
//!
//! Everything between a synthetic transaction and its final status:
//! - [`generator`]: random and operator-entered transactions
//! - [`store`]: the newest-first in-memory transaction list
//! - [`classifier`]: the `classify(transaction) -> AnalysisResult` seam (LLM or rules)
//! - [`dispatcher`]: pending -> analyzing -> terminal, with the fixed fallback on failure
//! - [`session`]: the single demo account and pluggable session storage
//! - [`audit`], [`catalog`], [`feed`]: audit filtering, rules/models, periodic generation

pub mod audit;
pub mod catalog;
pub mod classifier;
pub mod dispatcher;
pub mod error;
pub mod feed;
pub mod generator;
pub mod prompt;
pub mod session;
pub mod store;

pub use audit::{AuditFilter, AuditStats, DashboardSummary, RiskBand, RiskBandCounts, StatusFilter};
pub use catalog::RuleCatalog;
pub use classifier::{Classifier, LlmClassifier, RuleBasedClassifier};
pub use dispatcher::AnalysisDispatcher;
pub use error::{Result, RuntimeError};
pub use feed::{FeedHandle, LiveFeed};
pub use generator::{ManualTransaction, TransactionGenerator};
pub use prompt::AnalysisContext;
pub use session::{
    Credentials, FileSessionStorage, MemorySessionStorage, Session, SessionStorage,
};
pub use store::TransactionStore;
