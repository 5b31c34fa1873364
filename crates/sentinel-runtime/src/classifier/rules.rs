//! Rule-based classifier over the enabled catalog rules

use super::Classifier;
use crate::catalog::RuleCatalog;
use crate::error::Result;
use crate::prompt::AnalysisContext;
use crate::store::TransactionStore;
use async_trait::async_trait;
use chrono::Duration;
use sentinel_core::{
    AnalysisResult, DetectionRule, RecommendedAction, RiskLevel, RuleCategory, Transaction,
    TransactionType,
};
use std::sync::Arc;

const AMOUNT_WEIGHT: f64 = 45.0;
const LOCATION_WEIGHT: f64 = 40.0;
const VELOCITY_WEIGHT: f64 = 25.0;
const BEHAVIOR_WEIGHT: f64 = 20.0;

/// Window the velocity rule counts transactions in
const VELOCITY_WINDOW_MINUTES: i64 = 10;

/// Local substitute for the LLM call
///
/// Scores are additive per fired rule and capped at 100:
/// - amount: amount above the rule threshold
/// - location: location outside the home city
/// - velocity: more than `threshold` transactions for the same card holder in 10 minutes
///   (needs a store)
/// - behavior: ATM or transfer exceeding the usual ceiling by more than `threshold` percent
pub struct RuleBasedClassifier {
    catalog: Arc<RuleCatalog>,
    context: AnalysisContext,
    history: Option<Arc<TransactionStore>>,
}

impl RuleBasedClassifier {
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self {
            catalog,
            context: AnalysisContext::default(),
            history: None,
        }
    }

    pub fn with_context(mut self, context: AnalysisContext) -> Self {
        self.context = context;
        self
    }

    /// Give the velocity rule access to recent transactions
    pub fn with_history(mut self, store: Arc<TransactionStore>) -> Self {
        self.history = Some(store);
        self
    }

    async fn fires(&self, rule: &DetectionRule, tx: &Transaction) -> Option<(&'static str, f64)> {
        match rule.category {
            RuleCategory::Amount => {
                (tx.amount > rule.threshold).then_some(("Amount Outlier", AMOUNT_WEIGHT))
            }
            RuleCategory::Location => (!self.context.is_home_location(&tx.location))
                .then_some(("Location Mismatch", LOCATION_WEIGHT)),
            RuleCategory::Velocity => {
                let store = self.history.as_ref()?;
                let since = tx.timestamp - Duration::minutes(VELOCITY_WINDOW_MINUTES);
                let recent = store
                    .list()
                    .await
                    .iter()
                    .filter(|t| t.card_holder == tx.card_holder)
                    .filter(|t| t.timestamp >= since && t.timestamp <= tx.timestamp)
                    .count();
                (recent as f64 > rule.threshold).then_some(("High Velocity", VELOCITY_WEIGHT))
            }
            RuleCategory::Behavior => {
                let ceiling = self.context.average_amount_max * (1.0 + rule.threshold / 100.0);
                let unusual_channel = matches!(tx.kind, TransactionType::Atm | TransactionType::Transfer);
                (unusual_channel && tx.amount > ceiling)
                    .then_some(("Unusual Channel", BEHAVIOR_WEIGHT))
            }
        }
    }
}

/// Level for a 0-100 score
pub fn level_for(score: f64) -> RiskLevel {
    if score >= 80.0 {
        RiskLevel::Critical
    } else if score >= 60.0 {
        RiskLevel::High
    } else if score >= 30.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Action for a 0-100 score
pub fn action_for(score: f64) -> RecommendedAction {
    if score >= 80.0 {
        RecommendedAction::Block
    } else if score >= 40.0 {
        RecommendedAction::Review
    } else {
        RecommendedAction::Allow
    }
}

#[async_trait]
impl Classifier for RuleBasedClassifier {
    async fn classify(&self, transaction: &Transaction) -> Result<AnalysisResult> {
        let rules = self.catalog.enabled_rules().await;

        let mut score = 0.0;
        let mut anomalies = Vec::new();
        let mut fired = Vec::new();
        for rule in &rules {
            if let Some((anomaly, weight)) = self.fires(rule, transaction).await {
                score += weight;
                anomalies.push(anomaly.to_string());
                fired.push(rule.name.clone());
            }
        }
        let score: f64 = score.min(100.0);

        let explanation = if fired.is_empty() {
            format!("No enabled rule matched ({} evaluated).", rules.len())
        } else {
            format!("Rules triggered: {}.", fired.join(", "))
        };

        Ok(AnalysisResult {
            risk_score: score,
            risk_level: level_for(score).to_string(),
            is_fraud: score >= 80.0,
            anomalies,
            model_confidence: (0.5 + 0.1 * fired.len() as f64).min(0.95),
            explanation,
            recommended_action: action_for(score),
        })
    }

    fn name(&self) -> &str {
        "rules"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: f64, location: &str, kind: TransactionType) -> Transaction {
        Transaction::pending("tx_r", amount, "Fnac", location, kind, "Jean Dupont")
    }

    #[tokio::test]
    async fn test_ordinary_spend_is_allowed() {
        let classifier = RuleBasedClassifier::new(Arc::new(RuleCatalog::default()));
        let result = classifier
            .classify(&tx(45.0, "Paris, FR", TransactionType::Pos))
            .await
            .unwrap();

        assert_eq!(result.risk_score, 0.0);
        assert_eq!(result.recommended_action, RecommendedAction::Allow);
        assert!(result.anomalies.is_empty());
        assert!(result.validate().is_ok());
    }

    #[tokio::test]
    async fn test_amount_rule_alone_needs_review() {
        let classifier = RuleBasedClassifier::new(Arc::new(RuleCatalog::default()));
        let result = classifier
            .classify(&tx(1500.0, "Lagos, NG", TransactionType::Online))
            .await
            .unwrap();

        // Location rule is disabled by default
        assert_eq!(result.risk_score, 45.0);
        assert_eq!(result.anomalies, vec!["Amount Outlier".to_string()]);
        assert_eq!(result.recommended_action, RecommendedAction::Review);
        assert_eq!(result.risk_level, "Medium");
    }

    #[tokio::test]
    async fn test_enabled_location_rule_blocks() {
        let catalog = Arc::new(RuleCatalog::default());
        catalog.toggle_rule("r3").await.unwrap();
        let classifier = RuleBasedClassifier::new(catalog);

        let result = classifier
            .classify(&tx(1500.0, "Lagos, NG", TransactionType::Online))
            .await
            .unwrap();

        assert_eq!(result.risk_score, 85.0);
        assert!(result.is_fraud);
        assert_eq!(result.recommended_action, RecommendedAction::Block);
        assert_eq!(result.risk_level, "Critical");
    }

    #[tokio::test]
    async fn test_behavior_rule_on_atm() {
        let classifier = RuleBasedClassifier::new(Arc::new(RuleCatalog::default()));
        let result = classifier
            .classify(&tx(290.0, "Paris, FR", TransactionType::Atm))
            .await
            .unwrap();

        // 290 > 150 * 1.8, under the 300 amount threshold
        assert_eq!(result.anomalies, vec!["Unusual Channel".to_string()]);
        assert_eq!(result.recommended_action, RecommendedAction::Allow);
    }

    #[tokio::test]
    async fn test_velocity_rule_uses_history() {
        let store = Arc::new(TransactionStore::new());
        for i in 0..6 {
            store
                .insert(Transaction::pending(
                    format!("tx_{}", i),
                    12.0,
                    "Uber",
                    "Paris, FR",
                    TransactionType::Online,
                    "Jean Dupont",
                ))
                .await
                .unwrap();
        }
        let classifier =
            RuleBasedClassifier::new(Arc::new(RuleCatalog::default())).with_history(store);

        let result = classifier
            .classify(&tx(20.0, "Paris, FR", TransactionType::Online))
            .await
            .unwrap();

        assert!(result.anomalies.contains(&"High Velocity".to_string()));
        assert_eq!(result.risk_score, 25.0);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(level_for(10.0), RiskLevel::Low);
        assert_eq!(level_for(30.0), RiskLevel::Medium);
        assert_eq!(level_for(65.0), RiskLevel::High);
        assert_eq!(level_for(100.0), RiskLevel::Critical);
        assert_eq!(action_for(39.0), RecommendedAction::Allow);
        assert_eq!(action_for(40.0), RecommendedAction::Review);
        assert_eq!(action_for(80.0), RecommendedAction::Block);
    }
}
