//! Detection rules and model descriptors shown on the rules page

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What a detection rule looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleCategory {
    Velocity,
    Amount,
    Location,
    Behavior,
}

/// A toggleable detection rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRule {
    pub id: String,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    /// Meaning depends on the category; 0 means "no threshold"
    pub threshold: f64,
    pub category: RuleCategory,
}

impl DetectionRule {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: RuleCategory,
        threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            enabled: true,
            threshold,
            category,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn has_threshold(&self) -> bool {
        self.threshold > 0.0
    }
}

/// Deployment status of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelStatus {
    Active,
    Training,
    Inactive,
}

/// Display metadata for a detection model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Percentage, 0 to 100
    pub accuracy: f64,
    pub last_trained: NaiveDate,
    pub status: ModelStatus,
}
