//! Transaction records and the status machine they move through

use crate::analysis::{AnalysisResult, RecommendedAction};
use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment channel of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Online,
    Pos,
    Atm,
    Transfer,
}

impl TransactionType {
    /// All channels, in display order
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Online,
        TransactionType::Pos,
        TransactionType::Atm,
        TransactionType::Transfer,
    ];

    /// Human readable label used in prompts and listings
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Online => "Online",
            TransactionType::Pos => "Point of Sale Terminal",
            TransactionType::Atm => "ATM Withdrawal",
            TransactionType::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status of a transaction
///
/// Transactions move `Pending -> Analyzing -> {Cleared, Flagged, Blocked}` and never
/// revisit an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Analyzing,
    Cleared,
    Flagged,
    Blocked,
}

impl TransactionStatus {
    /// Whether this status ends the lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TransactionStatus::Cleared | TransactionStatus::Flagged | TransactionStatus::Blocked
        )
    }

    /// Check whether `next` is the one legal step after `self`
    pub fn can_transition_to(&self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (TransactionStatus::Pending, TransactionStatus::Analyzing)
                | (
                    TransactionStatus::Analyzing,
                    TransactionStatus::Cleared
                        | TransactionStatus::Flagged
                        | TransactionStatus::Blocked
                )
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Analyzing => "analyzing",
            TransactionStatus::Cleared => "cleared",
            TransactionStatus::Flagged => "flagged",
            TransactionStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "analyzing" => Ok(TransactionStatus::Analyzing),
            "cleared" => Ok(TransactionStatus::Cleared),
            "flagged" => Ok(TransactionStatus::Flagged),
            "blocked" => Ok(TransactionStatus::Blocked),
            _ => Err(CoreError::UnknownLabel {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// Categorical risk level attached after analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    /// Level reported when the classifier could not produce a usable answer
    Unknown,
}

impl RiskLevel {
    /// Map a free-form label returned by a classifier onto a level.
    ///
    /// English and French labels are accepted, case-insensitively. Anything else
    /// is `Unknown`.
    pub fn from_label(label: &str) -> RiskLevel {
        match label.trim().to_lowercase().as_str() {
            "low" | "faible" => RiskLevel::Low,
            "medium" | "moyen" => RiskLevel::Medium,
            "high" | "élevé" | "eleve" => RiskLevel::High,
            "critical" | "critique" => RiskLevel::Critical,
            _ => RiskLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
            RiskLevel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulated payment event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub amount: f64,
    pub currency: String,
    pub merchant: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub card_holder: String,
    pub is_simulated: bool,
    pub status: TransactionStatus,

    // Analysis results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomalies: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_action: Option<RecommendedAction>,
}

impl Transaction {
    /// Create a pending EUR transaction stamped with the current time
    pub fn pending(
        id: impl Into<String>,
        amount: f64,
        merchant: impl Into<String>,
        location: impl Into<String>,
        kind: TransactionType,
        card_holder: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            timestamp: Utc::now(),
            amount,
            currency: "EUR".to_string(),
            merchant: merchant.into(),
            location: location.into(),
            kind,
            card_holder: card_holder.into(),
            is_simulated: false,
            status: TransactionStatus::Pending,
            risk_score: None,
            risk_level: None,
            anomalies: None,
            explanation: None,
            recommended_action: None,
        }
    }

    /// Set the currency
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Mark the transaction as injected by an operator
    pub fn simulated(mut self, simulated: bool) -> Self {
        self.is_simulated = simulated;
        self
    }

    /// Move to `next`, rejecting anything but the single forward step
    pub fn transition(&mut self, next: TransactionStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Merge an analysis result and settle on the terminal status it implies.
    ///
    /// Only valid while the transaction is `Analyzing`.
    pub fn apply_analysis(&mut self, result: &AnalysisResult) -> Result<TransactionStatus> {
        let next = result.recommended_action.resulting_status();
        self.transition(next)?;

        self.risk_score = Some(result.risk_score);
        self.risk_level = Some(RiskLevel::from_label(&result.risk_level));
        self.anomalies = Some(result.anomalies.clone());
        self.explanation = Some(result.explanation.clone());
        self.recommended_action = Some(result.recommended_action.clone());

        Ok(next)
    }

    pub fn is_analyzed(&self) -> bool {
        self.status.is_terminal()
    }
}
