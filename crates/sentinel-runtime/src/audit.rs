//! Audit filtering and dashboard figures

use sentinel_core::{CoreError, Transaction, TransactionStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Score above which a transaction counts as suspicious on the dashboard
pub const SUSPICIOUS_SCORE: f64 = 80.0;

/// Status part of an audit query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TransactionStatus),
}

impl StatusFilter {
    pub fn matches(&self, status: TransactionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

/// Free-text search plus status filter over the audit history
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl AuditFilter {
    pub fn new(search: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }

    /// Search hits merchant or id, ignoring case
    pub fn matches(&self, tx: &Transaction) -> bool {
        let needle = self.search.trim().to_lowercase();
        let hit = needle.is_empty()
            || tx.merchant.to_lowercase().contains(&needle)
            || tx.id.to_lowercase().contains(&needle);
        hit && self.status.matches(tx.status)
    }

    /// Keep matching transactions in their original order
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect()
    }
}

/// Per-status counts shown above the audit table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditStats {
    pub total: usize,
    pub cleared: usize,
    pub flagged: usize,
    pub blocked: usize,
}

impl AuditStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let count = |status| transactions.iter().filter(|t| t.status == status).count();
        Self {
            total: transactions.len(),
            cleared: count(TransactionStatus::Cleared),
            flagged: count(TransactionStatus::Flagged),
            blocked: count(TransactionStatus::Blocked),
        }
    }
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_volume: f64,
    pub transaction_count: usize,
    pub suspicious_count: usize,
    /// Percentage of suspicious transactions, 0 for an empty store
    pub estimated_fraud_rate: f64,
    pub pending: usize,
    pub analyzing: usize,
    /// Scored transactions per colour band
    pub risk_bands: RiskBandCounts,
}

impl DashboardSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let suspicious_count = transactions
            .iter()
            .filter(|t| t.risk_score.is_some_and(|s| s > SUSPICIOUS_SCORE))
            .count();
        let estimated_fraud_rate = if transactions.is_empty() {
            0.0
        } else {
            suspicious_count as f64 / transactions.len() as f64 * 100.0
        };

        Self {
            total_volume: transactions.iter().map(|t| t.amount).sum(),
            transaction_count: transactions.len(),
            suspicious_count,
            estimated_fraud_rate,
            pending: transactions
                .iter()
                .filter(|t| t.status == TransactionStatus::Pending)
                .count(),
            analyzing: transactions
                .iter()
                .filter(|t| t.status == TransactionStatus::Analyzing)
                .count(),
            risk_bands: RiskBandCounts::from_transactions(transactions),
        }
    }
}

/// Colour band for a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            RiskBand::High
        } else if score > 40.0 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }
}

/// Score distribution for the risk chart; unscored transactions are left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiskBandCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl RiskBandCounts {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions
            .iter()
            .filter_map(|t| t.risk_score)
            .fold(Self::default(), |mut counts, score| {
                match RiskBand::from_score(score) {
                    RiskBand::Low => counts.low += 1,
                    RiskBand::Medium => counts.medium += 1,
                    RiskBand::High => counts.high += 1,
                }
                counts
            })
    }
}
