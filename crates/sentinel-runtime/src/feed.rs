//! Periodic transaction feed
//!
//! Stands in for a live card network: every tick one transaction is generated,
//! stored and sent for analysis.

use crate::dispatcher::AnalysisDispatcher;
use crate::generator::TransactionGenerator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

pub struct LiveFeed {
    generator: Arc<TransactionGenerator>,
    dispatcher: AnalysisDispatcher,
    period: Duration,
}

impl LiveFeed {
    pub fn new(
        generator: Arc<TransactionGenerator>,
        dispatcher: AnalysisDispatcher,
        period: Duration,
    ) -> Self {
        Self {
            generator,
            dispatcher,
            period,
        }
    }

    /// Start the feed on its own task. The first transaction arrives one period in.
    pub fn start(self) -> FeedHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval fires immediately; skip that tick
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => self.emit().await,
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("Live feed stopped");
        });

        info!(period_ms = period.as_millis() as u64, "Live feed started");
        FeedHandle {
            stop: stop_tx,
            task,
        }
    }

    async fn emit(&self) {
        let transaction = self.generator.generate(false);
        let id = transaction.id.clone();
        if let Err(e) = self.dispatcher.submit(transaction).await {
            warn!(id = %id, error = %e, "Live feed could not submit transaction");
        }
    }
}

/// Control over a running feed
pub struct FeedHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl FeedHandle {
    /// Stop after the current tick and wait for the task to end.
    ///
    /// Analyses already dispatched keep running.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(e) = self.task.await {
            if !e.is_cancelled() {
                warn!(error = %e, "Live feed task failed");
            }
        }
    }

    /// Cancel the feed task without waiting
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RuleCatalog;
    use crate::classifier::RuleBasedClassifier;
    use crate::store::TransactionStore;

    fn feed(store: Arc<TransactionStore>) -> LiveFeed {
        let classifier = Arc::new(RuleBasedClassifier::new(Arc::new(RuleCatalog::default())));
        let dispatcher = AnalysisDispatcher::new(store, classifier);
        LiveFeed::new(
            Arc::new(TransactionGenerator::new()),
            dispatcher,
            Duration::from_secs(3),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_emits_per_tick() {
        let store = Arc::new(TransactionStore::new());
        let handle = feed(store.clone()).start();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(store.is_empty().await);

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert_eq!(store.len().await, 3);

        handle.stop().await;
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort() {
        let store = Arc::new(TransactionStore::new());
        let handle = feed(store.clone()).start();

        handle.abort();
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(handle.is_finished());
        assert!(store.is_empty().await);
    }
}
