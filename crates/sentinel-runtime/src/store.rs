//! In-memory transaction store
//!
//! A single list ordered newest first. Updates are keyed by transaction id and
//! applied to a copy that replaces the stored record only when the whole update
//! succeeds.

use crate::error::{Result, RuntimeError};
use sentinel_core::{AnalysisResult, Transaction, TransactionStatus};
use tokio::sync::RwLock;
use tracing::debug;

/// Newest-first transaction list shared by the dispatcher and the views
pub struct TransactionStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self {
            transactions: RwLock::new(Vec::new()),
        }
    }

    /// Prepend a transaction
    pub async fn insert(&self, transaction: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;

        if transactions.iter().any(|t| t.id == transaction.id) {
            return Err(RuntimeError::InvalidInput(format!(
                "duplicate transaction id {}",
                transaction.id
            )));
        }

        debug!(id = %transaction.id, amount = transaction.amount, "Inserting transaction");
        transactions.insert(0, transaction);
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Option<Transaction> {
        self.transactions
            .read()
            .await
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    /// Snapshot of every transaction, newest first
    pub async fn list(&self) -> Vec<Transaction> {
        self.transactions.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }

    /// Apply `f` to the transaction with this id, keeping its position.
    ///
    /// The stored record is replaced only if `f` succeeds; returns the updated copy.
    pub async fn update<F, T>(&self, id: &str, f: F) -> Result<(T, Transaction)>
    where
        F: FnOnce(&mut Transaction) -> sentinel_core::Result<T>,
    {
        let mut transactions = self.transactions.write().await;
        let slot = transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| RuntimeError::NotFound(format!("transaction {}", id)))?;

        let mut updated = slot.clone();
        let out = f(&mut updated)?;
        *slot = updated.clone();

        Ok((out, updated))
    }

    /// Move a pending transaction to analyzing
    pub async fn mark_analyzing(&self, id: &str) -> Result<Transaction> {
        let (_, tx) = self
            .update(id, |tx| tx.transition(TransactionStatus::Analyzing))
            .await?;
        Ok(tx)
    }

    /// Merge an analysis result into an analyzing transaction
    pub async fn apply_analysis(&self, id: &str, result: &AnalysisResult) -> Result<Transaction> {
        let (status, tx) = self.update(id, |tx| tx.apply_analysis(result)).await?;
        debug!(id = %id, status = %status, "Analysis merged");
        Ok(tx)
    }
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::{RecommendedAction, TransactionType};

    fn tx(id: &str) -> Transaction {
        Transaction::pending(id, 20.0, "Uber", "Paris, FR", TransactionType::Online, "Jean Dupont")
    }

    #[tokio::test]
    async fn test_insert_prepends() {
        let store = TransactionStore::new();
        store.insert(tx("a")).await.unwrap();
        store.insert(tx("b")).await.unwrap();
        store.insert(tx("c")).await.unwrap();

        let ids: Vec<String> = store.list().await.into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = TransactionStore::new();
        store.insert(tx("a")).await.unwrap();
        assert!(matches!(
            store.insert(tx("a")).await,
            Err(RuntimeError::InvalidInput(_))
        ));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_preserves_order() {
        let store = TransactionStore::new();
        for id in ["a", "b", "c"] {
            store.insert(tx(id)).await.unwrap();
        }

        store.mark_analyzing("b").await.unwrap();

        let list = store.list().await;
        let ids: Vec<&str> = list.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(list[1].status, TransactionStatus::Analyzing);
        assert_eq!(list[0].status, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_record_untouched() {
        let store = TransactionStore::new();
        store.insert(tx("a")).await.unwrap();

        // Not analyzing yet, so the merge is rejected
        let err = store
            .apply_analysis("a", &AnalysisResult::fallback())
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Core(_)));

        let stored = store.get("a").await.unwrap();
        assert_eq!(stored.status, TransactionStatus::Pending);
        assert!(stored.risk_score.is_none());
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let store = TransactionStore::new();
        assert!(store.get("missing").await.is_none());
        assert!(matches!(
            store.mark_analyzing("missing").await,
            Err(RuntimeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_apply_analysis_sets_terminal_status() {
        let store = TransactionStore::new();
        store.insert(tx("a")).await.unwrap();
        store.mark_analyzing("a").await.unwrap();

        let mut result = AnalysisResult::fallback();
        result.recommended_action = RecommendedAction::Block;
        let updated = store.apply_analysis("a", &result).await.unwrap();

        assert_eq!(updated.status, TransactionStatus::Blocked);
        assert_eq!(store.get("a").await.unwrap(), updated);
    }
}
