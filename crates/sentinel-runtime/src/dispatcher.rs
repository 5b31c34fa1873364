//! Analysis dispatcher
//!
//! Drives one transaction from pending to a terminal status:
//! 1. mark it analyzing in the store
//! 2. classify it (one external call for the LLM classifier)
//! 3. merge the result, settling on blocked / flagged / cleared
//!
//! Any classification failure is replaced by [`AnalysisResult::fallback`], so a
//! dispatched transaction never stays in analyzing.

use crate::classifier::Classifier;
use crate::error::{Result, RuntimeError};
use crate::store::TransactionStore;
use sentinel_core::{AnalysisResult, Transaction};
use sentinel_llm::LLMError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Sends transactions to a classifier and merges the outcome into the store
#[derive(Clone)]
pub struct AnalysisDispatcher {
    store: Arc<TransactionStore>,
    classifier: Arc<dyn Classifier>,
    timeout: Option<Duration>,
}

impl AnalysisDispatcher {
    pub fn new(store: Arc<TransactionStore>, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            store,
            classifier,
            timeout: None,
        }
    }

    /// Give up on a classification after `timeout` and use the fallback
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn store(&self) -> &Arc<TransactionStore> {
        &self.store
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Analyze a pending transaction and return the merged result.
    ///
    /// Fails only when the id is unknown or the transaction is not pending.
    pub async fn dispatch(&self, id: &str) -> Result<AnalysisResult> {
        let transaction = self.store.mark_analyzing(id).await?;

        let result = match self.classify(&transaction).await {
            Ok(result) => result,
            Err(e) => {
                warn!(
                    id = %id,
                    classifier = self.classifier.name(),
                    error = %e,
                    "Analysis failed, using fallback result"
                );
                AnalysisResult::fallback()
            }
        };

        let updated = self.store.apply_analysis(id, &result).await?;
        info!(
            id = %id,
            status = %updated.status,
            risk_score = result.risk_score,
            action = %result.recommended_action,
            "Transaction analyzed"
        );

        Ok(result)
    }

    /// Insert a pending transaction and dispatch it in the background
    pub async fn submit(&self, transaction: Transaction) -> Result<JoinHandle<Result<AnalysisResult>>> {
        let id = transaction.id.clone();
        self.store.insert(transaction).await?;
        Ok(self.spawn(id))
    }

    /// Run [`dispatch`](Self::dispatch) on its own task
    pub fn spawn(&self, id: String) -> JoinHandle<Result<AnalysisResult>> {
        let dispatcher = self.clone();
        tokio::spawn(async move { dispatcher.dispatch(&id).await })
    }

    async fn classify(&self, transaction: &Transaction) -> Result<AnalysisResult> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.classifier.classify(transaction))
                .await
                .map_err(|_| RuntimeError::Llm(LLMError::Timeout(limit.as_millis() as u64)))?,
            None => self.classifier.classify(transaction).await,
        }
    }
}
