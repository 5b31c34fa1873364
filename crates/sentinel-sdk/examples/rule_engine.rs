//! Rule engine demo
//!
//! Scores a handful of manual transactions with the local rule engine, then
//! enables the location rule and scores them again.
//!
//! ```text
//! cargo run -p sentinel-sdk --example rule_engine
//! ```

use sentinel_sdk::{Console, ConsoleBuilder, ManualTransaction, TransactionType};

fn samples() -> Vec<ManualTransaction> {
    let mut atm = ManualTransaction::new(420.0, "BNP Paribas", "Paris, FR");
    atm.kind = Some(TransactionType::Atm);

    vec![
        ManualTransaction::new(38.5, "Boulangerie Paul", "Paris, FR"),
        ManualTransaction::new(1850.0, "Apple Store", "Lagos, NG"),
        ManualTransaction::new(95.0, "Zara", "Moscow, RU"),
        atm,
    ]
}

async fn score_all(console: &Console) -> anyhow::Result<()> {
    for input in samples() {
        let (tx, result) = console.submit_and_wait(input).await?;
        println!(
            "{:<18} {:>8.2}  {:<12} score {:>3}  {:<8} {}",
            tx.merchant,
            tx.amount,
            tx.location,
            result.risk_score,
            tx.status,
            result.anomalies.join(", ")
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let console = ConsoleBuilder::new().use_rule_engine().build()?;

    println!("Enabled rules:");
    for rule in console.catalog().enabled_rules().await {
        println!("  {} ({:?}, threshold {})", rule.name, rule.category, rule.threshold);
    }
    println!();
    score_all(&console).await?;

    let rule = console.catalog().toggle_rule("r3").await?;
    println!();
    println!("{} enabled: {}", rule.name, rule.enabled);
    println!();
    score_all(&console).await?;

    let stats = console.stats().await;
    println!();
    println!(
        "total {}  cleared {}  flagged {}  blocked {}",
        stats.total, stats.cleared, stats.flagged, stats.blocked
    );

    Ok(())
}
