//! Synthetic transaction generation
//!
//! Produces pending transactions from fixed templates. When not forced safe, 30% of
//! transactions draw their amount and location from a wider, riskier range.

use crate::error::{Result, RuntimeError};
use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use sentinel_core::{Transaction, TransactionType};
use serde::Deserialize;

/// Probability of an anomalous draw when the caller does not force a safe transaction
pub const RISKY_PROBABILITY: f64 = 0.3;

/// Merchant used when an operator leaves the field empty
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// Location used when an operator leaves the field empty
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Value pools the generator draws from
#[derive(Debug, Clone)]
pub struct GeneratorTemplates {
    pub merchants: Vec<String>,
    pub card_holders: Vec<String>,
    pub normal_locations: Vec<String>,
    pub risky_locations: Vec<String>,
    /// Inclusive amount range for ordinary spend
    pub normal_amount: (f64, f64),
    /// Inclusive amount range for anomalous spend
    pub risky_amount: (f64, f64),
    pub currency: String,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for GeneratorTemplates {
    fn default() -> Self {
        Self {
            merchants: strings(&[
                "Amazon",
                "Apple Store",
                "Carrefour",
                "Uber",
                "Air France",
                "Fnac",
                "SNCF",
                "Monoprix",
            ]),
            card_holders: strings(&["Jean Dupont", "Marie Laurent", "Luc Martin"]),
            normal_locations: strings(&[
                "Paris, FR",
                "Lyon, FR",
                "Boulogne-Billancourt, FR",
                "Versailles, FR",
                "Saint-Denis, FR",
            ]),
            risky_locations: strings(&[
                "Lagos, NG",
                "Moscow, RU",
                "São Paulo, BR",
                "Bangkok, TH",
                "New York, US",
            ]),
            normal_amount: (10.0, 150.0),
            risky_amount: (800.0, 5000.0),
            currency: "EUR".to_string(),
        }
    }
}

impl GeneratorTemplates {
    /// Amount ranges must be finite, non-negative and ordered low to high
    pub fn validate(&self) -> Result<()> {
        for (name, (low, high)) in [
            ("normal_amount", self.normal_amount),
            ("risky_amount", self.risky_amount),
        ] {
            if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
                return Err(RuntimeError::InvalidInput(format!(
                    "{} must be an ordered range of non-negative amounts, got {}..={}",
                    name, low, high
                )));
            }
        }
        Ok(())
    }
}

/// Operator-entered transaction, as submitted from the dashboard form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualTransaction {
    pub amount: f64,
    #[serde(default)]
    pub merchant: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionType>,
    #[serde(default)]
    pub card_holder: Option<String>,
}

impl ManualTransaction {
    pub fn new(amount: f64, merchant: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            amount,
            merchant: merchant.into(),
            location: location.into(),
            kind: None,
            card_holder: None,
        }
    }
}

/// Synthetic transaction generator
#[derive(Debug, Clone, Default)]
pub struct TransactionGenerator {
    templates: GeneratorTemplates,
}

impl TransactionGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(templates: GeneratorTemplates) -> Result<Self> {
        templates.validate()?;
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &GeneratorTemplates {
        &self.templates
    }

    /// Generate a pending transaction using thread-local randomness
    pub fn generate(&self, safe: bool) -> Transaction {
        self.generate_with(&mut rand::thread_rng(), safe)
    }

    /// Generate a pending transaction from the given random source
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, safe: bool) -> Transaction {
        let t = &self.templates;
        let risky = !safe && rng.gen_bool(RISKY_PROBABILITY);

        let (range, locations) = if risky {
            (t.risky_amount, &t.risky_locations)
        } else {
            (t.normal_amount, &t.normal_locations)
        };

        let amount = round_cents(rng.gen_range(range.0..=range.1));
        let location = pick(rng, locations, UNKNOWN_LOCATION);
        let merchant = pick(rng, &t.merchants, UNKNOWN_MERCHANT);
        let card_holder = pick(rng, &t.card_holders, "");
        let kind = *TransactionType::ALL
            .choose(rng)
            .unwrap_or(&TransactionType::Online);

        Transaction::pending(
            new_transaction_id(rng),
            amount,
            merchant,
            location,
            kind,
            card_holder,
        )
        .with_currency(t.currency.clone())
    }

    /// Build a pending transaction from operator input.
    ///
    /// Blank merchant and location fields fall back to their "Unknown" literals.
    pub fn manual(&self, input: ManualTransaction) -> Result<Transaction> {
        if !input.amount.is_finite() || input.amount < 0.0 {
            return Err(RuntimeError::InvalidInput(format!(
                "amount must be a non-negative number, got {}",
                input.amount
            )));
        }

        let merchant = non_blank(input.merchant, UNKNOWN_MERCHANT);
        let location = non_blank(input.location, UNKNOWN_LOCATION);
        let card_holder = input
            .card_holder
            .filter(|name| !name.trim().is_empty())
            .or_else(|| self.templates.card_holders.first().cloned())
            .unwrap_or_default();

        Ok(Transaction::pending(
            new_transaction_id(&mut rand::thread_rng()),
            input.amount,
            merchant,
            location,
            input.kind.unwrap_or(TransactionType::Online),
            card_holder,
        )
        .with_currency(self.templates.currency.clone())
        .simulated(true))
    }
}

/// Transaction identifier
/// Format: tx_YYYYMMDDHHmmss_xxxxxx
/// Example: tx_20260117143052_a3f2e1
pub fn new_transaction_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let now = Utc::now();
    let suffix: u32 = rng.gen_range(0..0xFFFFFF);
    format!("tx_{}_{:06x}", now.format("%Y%m%d%H%M%S"), suffix)
}

fn pick<R: Rng + ?Sized>(rng: &mut R, values: &[String], default: &str) -> String {
    values
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn non_blank(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
