//! Live feed demo
//!
//! Runs the console against the mock LLM provider, lets the feed generate a
//! few transactions and prints the dashboard figures.
//!
//! ```text
//! cargo run -p sentinel-sdk --example live_feed
//! ```

use sentinel_sdk::{ConsoleBuilder, LlmConfig};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sentinel_sdk=info,sentinel_runtime=info")),
        )
        .init();

    let console = ConsoleBuilder::new()
        .with_llm(LlmConfig::mock())
        .with_login_delay(Duration::from_millis(100))
        .with_feed_interval(Duration::from_millis(500))
        .build()?;

    console.start().await?;
    if !console.session().login("demo@sentinelai.com", "demo123").await? {
        anyhow::bail!("demo login rejected");
    }

    tokio::time::sleep(Duration::from_secs(3)).await;
    console.shutdown().await;

    // Let in-flight analyses settle
    tokio::time::sleep(Duration::from_millis(200)).await;

    for tx in console.transactions().await {
        println!(
            "{}  {:>9.2} {}  {:<20} {:<28} {}",
            tx.id,
            tx.amount,
            tx.currency,
            tx.merchant,
            tx.location,
            tx.status
        );
    }

    let summary = console.summary().await;
    println!();
    println!("Transactions:     {}", summary.transaction_count);
    println!("Total volume:     {:.2} EUR", summary.total_volume);
    println!("Suspicious (>80): {}", summary.suspicious_count);
    println!("Fraud rate:       {:.1}%", summary.estimated_fraud_rate);

    Ok(())
}
