//! Console facade
//!
//! Owns the store, session, catalog and dispatcher for one running console and
//! exposes the operations the dashboard, audit and rules views need.

use crate::config::ConsoleConfig;
use crate::error::{Result, SdkError};
use sentinel_core::{AnalysisResult, Transaction};
use sentinel_runtime::{
    AnalysisDispatcher, AuditFilter, AuditStats, DashboardSummary, FeedHandle, LiveFeed,
    ManualTransaction, RuleCatalog, Session, TransactionGenerator, TransactionStore,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::info;

/// A running fraud console
pub struct Console {
    config: ConsoleConfig,
    store: Arc<TransactionStore>,
    session: Arc<Session>,
    catalog: Arc<RuleCatalog>,
    generator: Arc<TransactionGenerator>,
    dispatcher: AnalysisDispatcher,
    lifecycle: Mutex<Lifecycle>,
}

#[derive(Default)]
struct Lifecycle {
    started: bool,
    feed: Option<FeedHandle>,
}

impl Console {
    pub(crate) fn new(
        config: ConsoleConfig,
        store: Arc<TransactionStore>,
        session: Arc<Session>,
        catalog: Arc<RuleCatalog>,
        generator: Arc<TransactionGenerator>,
        dispatcher: AnalysisDispatcher,
    ) -> Self {
        Self {
            config,
            store,
            session,
            catalog,
            generator,
            dispatcher,
            lifecycle: Mutex::new(Lifecycle::default()),
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn store(&self) -> &Arc<TransactionStore> {
        &self.store
    }

    pub fn catalog(&self) -> &Arc<RuleCatalog> {
        &self.catalog
    }

    pub fn classifier_name(&self) -> &str {
        self.dispatcher.classifier_name()
    }

    /// Restore the persisted session and start the live feed if one is configured
    pub async fn start(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.started {
            return Err(SdkError::AlreadyStarted);
        }

        if let Some(user) = self.session.restore().await? {
            info!(email = %user.email, "Resuming previous session");
        }

        if let Some(period) = self.config.feed.interval() {
            let live = LiveFeed::new(self.generator.clone(), self.dispatcher.clone(), period);
            lifecycle.feed = Some(live.start());
        }
        lifecycle.started = true;

        info!("Console started");
        Ok(())
    }

    /// Stop the live feed. In-flight analyses are left to finish and the console
    /// can be started again.
    pub async fn shutdown(&self) {
        let mut lifecycle = self.lifecycle.lock().await;
        if let Some(handle) = lifecycle.feed.take() {
            handle.stop().await;
        }
        lifecycle.started = false;
        info!("Console shut down");
    }

    /// Generate a transaction and send it for analysis in the background.
    ///
    /// Returns the transaction as stored, still pending.
    pub async fn generate_and_dispatch(&self, safe: bool) -> Result<Transaction> {
        let (transaction, _) = self.enqueue(self.generator.generate(safe)).await?;
        Ok(transaction)
    }

    /// Store an operator-entered transaction and send it for analysis in the background
    pub async fn submit(&self, input: ManualTransaction) -> Result<Transaction> {
        let (transaction, _) = self.enqueue(self.generator.manual(input)?).await?;
        Ok(transaction)
    }

    /// Like [`submit`](Self::submit), but wait for the analysis and return the final record
    pub async fn submit_and_wait(&self, input: ManualTransaction) -> Result<(Transaction, AnalysisResult)> {
        let (pending, handle) = self.enqueue(self.generator.manual(input)?).await?;
        let result = handle.await??;
        let transaction = self.transaction(&pending.id).await.unwrap_or(pending);
        Ok((transaction, result))
    }

    pub async fn transaction(&self, id: &str) -> Option<Transaction> {
        self.store.get(id).await
    }

    /// All transactions, newest first
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.store.list().await
    }

    pub async fn audit(&self, filter: &AuditFilter) -> Vec<Transaction> {
        filter.apply(&self.store.list().await)
    }

    pub async fn stats(&self) -> AuditStats {
        AuditStats::from_transactions(&self.store.list().await)
    }

    pub async fn summary(&self) -> DashboardSummary {
        DashboardSummary::from_transactions(&self.store.list().await)
    }

    async fn enqueue(
        &self,
        transaction: Transaction,
    ) -> Result<(Transaction, JoinHandle<sentinel_runtime::Result<AnalysisResult>>)> {
        let pending = transaction.clone();
        let handle = self.dispatcher.submit(transaction).await?;
        Ok((pending, handle))
    }
}
