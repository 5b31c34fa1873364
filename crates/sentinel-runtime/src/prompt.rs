//! Prompt and response schema for LLM transaction analysis

use sentinel_core::Transaction;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Fixed cardholder history the analysis is framed against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisContext {
    /// Where the card holder usually spends, e.g. "Paris, France"
    pub home_city: String,
    /// Usual transaction size, lower bound
    pub average_amount_min: f64,
    /// Usual transaction size, upper bound
    pub average_amount_max: f64,
    pub currency: String,
    pub last_known_location: String,
    pub hours_since_last_seen: u32,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self {
            home_city: "Paris, France".to_string(),
            average_amount_min: 50.0,
            average_amount_max: 150.0,
            currency: "EUR".to_string(),
            last_known_location: "Paris".to_string(),
            hours_since_last_seen: 2,
        }
    }
}

impl AnalysisContext {
    /// City part of `home_city` ("Paris" for "Paris, France")
    pub fn home_token(&self) -> &str {
        self.home_city
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or(&self.home_city)
    }

    /// Whether a free-form location looks like the home city
    pub fn is_home_location(&self, location: &str) -> bool {
        let token = self.home_token().to_lowercase();
        !token.is_empty() && location.to_lowercase().contains(&token)
    }
}

/// Build the analysis prompt for one transaction
pub fn build_prompt(tx: &Transaction, ctx: &AnalysisContext) -> String {
    format!(
        r#"You are SentinelAI, an advanced banking fraud detection system.
Your task is to analyze the following transaction metadata and detect potential fraud.

Simulate the logic of the following algorithms:
1. Isolation Forest (for outlier detection in amount and location).
2. XGBoost (for pattern recognition based on historical fraud data).
3. Velocity Rules (impossible travel, high frequency).

Transaction Details:
- ID: {id}
- Amount: {amount:.2} {currency}
- Merchant: {merchant}
- Type: {kind}
- Location: {location}
- Time: {time}
- Card Holder: {holder}

Context for Analysis (Simulated History):
- The card holder usually spends in {home}.
- Average transaction size is around {min:.0}-{max:.0} {ctx_currency}.
- Last known location was {last}, {hours} hours ago.

Analyze strictly. If the location is far from {home_token} within {hours} hours, flag it. If the amount is significantly higher than average, flag it."#,
        id = tx.id,
        amount = tx.amount,
        currency = tx.currency,
        merchant = tx.merchant,
        kind = tx.kind.label(),
        location = tx.location,
        time = tx.timestamp.to_rfc3339(),
        holder = tx.card_holder,
        home = ctx.home_city,
        min = ctx.average_amount_min,
        max = ctx.average_amount_max,
        ctx_currency = ctx.currency,
        last = ctx.last_known_location,
        hours = ctx.hours_since_last_seen,
        home_token = ctx.home_token(),
    )
}

/// Structured output contract, in Gemini schema notation
pub fn analysis_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "riskScore": {
                "type": "NUMBER",
                "description": "A score from 0 to 100 indicating the probability of fraud. 100 is certain fraud."
            },
            "riskLevel": {
                "type": "STRING",
                "description": "Categorical risk level: Low, Medium, High, Critical."
            },
            "isFraud": {
                "type": "BOOLEAN",
                "description": "Binary classification based on the score."
            },
            "anomalies": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of specific anomalies detected (e.g., 'Location Mismatch', 'Amount Outlier')."
            },
            "modelConfidence": {
                "type": "NUMBER",
                "description": "Confidence of the AI model in its prediction (0.0 to 1.0)."
            },
            "explanation": {
                "type": "STRING",
                "description": "A concise technical explanation of why this transaction was flagged or cleared, referencing simulated logic like Isolation Forest or Velocity Checks."
            },
            "recommendedAction": {
                "type": "STRING",
                "description": "Action to take: ALLOW, REVIEW, or BLOCK."
            }
        },
        "required": ["riskScore", "riskLevel", "isFraud", "anomalies", "explanation", "recommendedAction"]
    })
}
