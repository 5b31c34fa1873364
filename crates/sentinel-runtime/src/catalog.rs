//! Detection rules and model catalog

use crate::error::{Result, RuntimeError};
use chrono::NaiveDate;
use sentinel_core::{DetectionRule, ModelDescriptor, ModelStatus, RuleCategory};
use tokio::sync::RwLock;
use tracing::info;

/// Rules (toggleable) and models (display only) shown on the rules page
pub struct RuleCatalog {
    rules: RwLock<Vec<DetectionRule>>,
    models: Vec<ModelDescriptor>,
}

impl RuleCatalog {
    pub fn new(rules: Vec<DetectionRule>, models: Vec<ModelDescriptor>) -> Self {
        Self {
            rules: RwLock::new(rules),
            models,
        }
    }

    pub async fn rules(&self) -> Vec<DetectionRule> {
        self.rules.read().await.clone()
    }

    pub async fn enabled_rules(&self) -> Vec<DetectionRule> {
        self.rules
            .read()
            .await
            .iter()
            .filter(|r| r.enabled)
            .cloned()
            .collect()
    }

    pub async fn rule(&self, id: &str) -> Option<DetectionRule> {
        self.rules.read().await.iter().find(|r| r.id == id).cloned()
    }

    pub fn models(&self) -> &[ModelDescriptor] {
        &self.models
    }

    /// Flip a rule on or off and return its new state
    pub async fn toggle_rule(&self, id: &str) -> Result<DetectionRule> {
        let mut rules = self.rules.write().await;
        let rule = rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RuntimeError::NotFound(format!("rule {}", id)))?;

        rule.enabled = !rule.enabled;
        info!(rule = %rule.id, enabled = rule.enabled, "Detection rule toggled");
        Ok(rule.clone())
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::new(default_rules(), default_models())
    }
}

/// Rules the console starts with
pub fn default_rules() -> Vec<DetectionRule> {
    vec![
        DetectionRule::new(
            "r1",
            "Unusual Amount",
            "Flags transactions whose amount exceeds 3x the average",
            RuleCategory::Amount,
            300.0,
        ),
        DetectionRule::new(
            "r2",
            "High Velocity",
            "More than 5 transactions in under 10 minutes",
            RuleCategory::Velocity,
            5.0,
        ),
        DetectionRule::new(
            "r3",
            "Suspicious Location",
            "Transaction from outside the card holder's usual area",
            RuleCategory::Location,
            0.0,
        )
        .disabled(),
        DetectionRule::new(
            "r4",
            "Behavior Change",
            "Significant deviation from the user profile",
            RuleCategory::Behavior,
            80.0,
        ),
    ]
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// Models listed on the rules page; labels only, nothing is trained
pub fn default_models() -> Vec<ModelDescriptor> {
    let model = |id: &str, name: &str, kind: &str, accuracy: f64, trained, status| {
        ModelDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            accuracy,
            last_trained: trained,
            status,
        }
    };

    vec![
        model("m1", "Isolation Forest", "Anomaly detection", 94.2, date(2026, 1, 1), ModelStatus::Active),
        model("m2", "XGBoost Classifier", "Supervised classification", 96.8, date(2026, 1, 3), ModelStatus::Active),
        model("m3", "LSTM Neural Network", "Sequence analysis", 91.5, date(2025, 12, 28), ModelStatus::Training),
        model("m4", "Gemini AI", "Generative AI", 98.1, date(2026, 1, 6), ModelStatus::Active),
    ]
}
