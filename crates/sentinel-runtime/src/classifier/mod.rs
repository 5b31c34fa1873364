//! Classification seam
//!
//! The dispatcher only knows [`Classifier`]. The LLM-backed implementation is the
//! default; the rule-based one runs the enabled catalog rules locally.

pub mod llm;
pub mod rules;

pub use llm::{LlmClassifier, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use rules::RuleBasedClassifier;

use crate::error::Result;
use async_trait::async_trait;
use sentinel_core::{AnalysisResult, Transaction};

/// Produces one analysis result per transaction
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify a transaction. Errors are turned into the fallback result by the caller.
    async fn classify(&self, transaction: &Transaction) -> Result<AnalysisResult>;

    /// Get the name of this classifier
    fn name(&self) -> &str;
}
