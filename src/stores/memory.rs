use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{PaymentFailure, SubscriptionRecord, TransactionRecord, TransactionStatus};
use crate::stores::SubscriptionStore;

/// HashMap-backed store, used by the service tests where exercising the
/// real idempotency flow matters more than the SQL.
#[derive(Default)]
pub struct InMemorySubscriptionStore {
    inner: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    transactions: HashMap<String, TransactionRecord>,
    subscriptions: HashMap<Uuid, SubscriptionRecord>,
    failures: Vec<PaymentFailure>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn payment_failures(&self) -> Vec<PaymentFailure> {
        self.inner.read().await.failures.clone()
    }

    pub async fn subscription_count(&self) -> usize {
        self.inner.read().await.subscriptions.len()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn insert_transaction(&self, record: &TransactionRecord) -> AppResult<()> {
        let mut state = self.inner.write().await;
        state
            .transactions
            .entry(record.transaction_id.clone())
            .or_insert_with(|| record.clone());
        Ok(())
    }

    async fn find_transaction(
        &self,
        transaction_id: &str,
    ) -> AppResult<Option<TransactionRecord>> {
        let state = self.inner.read().await;
        Ok(state.transactions.get(transaction_id).cloned())
    }

    async fn update_transaction_status(
        &self,
        transaction_id: &str,
        status: TransactionStatus,
        gateway_status: &str,
    ) -> AppResult<()> {
        let mut state = self.inner.write().await;
        if let Some(record) = state.transactions.get_mut(transaction_id) {
            record.status = status;
            record.gateway_status = Some(gateway_status.to_string());
            record.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn find_subscription(&self, user_id: Uuid) -> AppResult<Option<SubscriptionRecord>> {
        let state = self.inner.read().await;
        Ok(state.subscriptions.get(&user_id).cloned())
    }

    async fn upsert_subscription(&self, record: &SubscriptionRecord) -> AppResult<()> {
        let mut state = self.inner.write().await;
        state.subscriptions.insert(record.user_id, record.clone());
        Ok(())
    }

    async fn record_payment_failure(
        &self,
        user_id: Uuid,
        transaction_id: &str,
        reason: &str,
    ) -> AppResult<()> {
        let mut state = self.inner.write().await;
        state.failures.push(PaymentFailure {
            user_id,
            transaction_id: transaction_id.to_string(),
            reason: reason.to_string(),
            created_at: Utc::now(),
        });
        Ok(())
    }
}
