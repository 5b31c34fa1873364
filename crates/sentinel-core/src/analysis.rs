//! Analysis results produced by classifiers

use crate::error::{CoreError, Result};
use crate::transaction::TransactionStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk level reported by the fallback result
pub const FALLBACK_RISK_LEVEL: &str = "Unknown";

/// Single anomaly reported by the fallback result
pub const FALLBACK_ANOMALY: &str = "analysis error";

/// Explanation reported by the fallback result
pub const FALLBACK_EXPLANATION: &str =
    "Unable to reach the AI engine. Transaction marked for manual review.";

/// Action recommended by a classifier
///
/// Serialized as `ALLOW`, `REVIEW` or `BLOCK`. Parsing is case-insensitive and any
/// other label is kept verbatim as `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecommendedAction {
    Allow,
    Review,
    Block,
    Unrecognized(String),
}

impl RecommendedAction {
    /// Terminal status a transaction settles on for this action.
    ///
    /// `Block` blocks, `Review` flags, everything else clears.
    pub fn resulting_status(&self) -> TransactionStatus {
        match self {
            RecommendedAction::Block => TransactionStatus::Blocked,
            RecommendedAction::Review => TransactionStatus::Flagged,
            RecommendedAction::Allow | RecommendedAction::Unrecognized(_) => {
                TransactionStatus::Cleared
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecommendedAction::Allow => "ALLOW",
            RecommendedAction::Review => "REVIEW",
            RecommendedAction::Block => "BLOCK",
            RecommendedAction::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for RecommendedAction {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "ALLOW" => RecommendedAction::Allow,
            "REVIEW" => RecommendedAction::Review,
            "BLOCK" => RecommendedAction::Block,
            _ => RecommendedAction::Unrecognized(s),
        }
    }
}

impl From<&str> for RecommendedAction {
    fn from(s: &str) -> Self {
        RecommendedAction::from(s.to_string())
    }
}

impl From<RecommendedAction> for String {
    fn from(action: RecommendedAction) -> Self {
        match action {
            RecommendedAction::Unrecognized(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// 0 to 100, where 100 is certain fraud
    pub risk_score: f64,

    /// Categorical level as returned by the classifier
    pub risk_level: String,

    pub is_fraud: bool,

    pub anomalies: Vec<String>,

    /// 0.0 to 1.0
    #[serde(default)]
    pub model_confidence: f64,

    pub explanation: String,

    pub recommended_action: RecommendedAction,
}

impl AnalysisResult {
    /// Fixed result substituted whenever classification fails
    pub fn fallback() -> Self {
        Self {
            risk_score: 0.0,
            risk_level: FALLBACK_RISK_LEVEL.to_string(),
            is_fraud: false,
            anomalies: vec![FALLBACK_ANOMALY.to_string()],
            model_confidence: 0.0,
            explanation: FALLBACK_EXPLANATION.to_string(),
            recommended_action: RecommendedAction::Review,
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }

    /// Check numeric fields against their documented ranges
    pub fn validate(&self) -> Result<()> {
        if !self.risk_score.is_finite() || !(0.0..=100.0).contains(&self.risk_score) {
            return Err(CoreError::InvalidAnalysis(format!(
                "riskScore {} outside 0-100",
                self.risk_score
            )));
        }
        if !self.model_confidence.is_finite() || !(0.0..=1.0).contains(&self.model_confidence) {
            return Err(CoreError::InvalidAnalysis(format!(
                "modelConfidence {} outside 0-1",
                self.model_confidence
            )));
        }
        Ok(())
    }
}
