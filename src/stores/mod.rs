pub mod memory;
pub mod postgres;

pub use memory::InMemorySubscriptionStore;
pub use postgres::PgSubscriptionStore;

use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{SubscriptionRecord, TransactionRecord, TransactionStatus};

/// Single source of truth for transactions and per-user subscription state.
/// Transactions are inserted pending by the initiator and transitioned only
/// by the webhook receiver; subscription rows are written only for verified
/// accepted transactions.
#[automock]
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn insert_transaction(&self, record: &TransactionRecord) -> AppResult<()>;

    async fn find_transaction(
        &self,
        transaction_id: &str,
    ) -> AppResult<Option<TransactionRecord>>;

    async fn update_transaction_status(
        &self,
        transaction_id: &str,
        status: TransactionStatus,
        gateway_status: &str,
    ) -> AppResult<()>;

    async fn find_subscription(&self, user_id: Uuid) -> AppResult<Option<SubscriptionRecord>>;

    /// Insert-or-replace keyed by user id. The payload is deterministic per
    /// transaction id, so last-write-wins is safe for duplicate deliveries.
    async fn upsert_subscription(&self, record: &SubscriptionRecord) -> AppResult<()>;

    async fn record_payment_failure(
        &self,
        user_id: Uuid,
        transaction_id: &str,
        reason: &str,
    ) -> AppResult<()>;
}
