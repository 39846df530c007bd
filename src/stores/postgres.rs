use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{SubscriptionRecord, TransactionRecord, TransactionStatus};
use crate::stores::SubscriptionStore;

#[derive(Clone)]
pub struct PgSubscriptionStore {
    pool: PgPool,
}

impl PgSubscriptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    async fn insert_transaction(&self, record: &TransactionRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                transaction_id, user_id, plan, amount, currency,
                status, gateway_status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (transaction_id) DO NOTHING
            "#,
        )
        .bind(&record.transaction_id)
        .bind(record.user_id)
        .bind(record.plan)
        .bind(record.amount)
        .bind(&record.currency)
        .bind(record.status)
        .bind(&record.gateway_status)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_transaction(
        &self,
        transaction_id: &str,
    ) -> AppResult<Option<TransactionRecord>> {
        let record = sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT
                transaction_id, user_id, plan, amount, currency,
                status, gateway_status, created_at, updated_at
            FROM transactions
            WHERE transaction_id = $1
            "#,
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn update_transaction_status(
        &self,
        transaction_id: &str,
        status: TransactionStatus,
        gateway_status: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE transactions
            SET status = $1, gateway_status = $2, updated_at = NOW()
            WHERE transaction_id = $3
            "#,
        )
        .bind(status)
        .bind(gateway_status)
        .bind(transaction_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_subscription(&self, user_id: Uuid) -> AppResult<Option<SubscriptionRecord>> {
        let record = sqlx::query_as::<_, SubscriptionRecord>(
            r#"
            SELECT
                user_id, plan, status, period_start, period_end,
                last_transaction_id, last_payment_amount, last_payment_at
            FROM subscriptions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn upsert_subscription(&self, record: &SubscriptionRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                user_id, plan, status, period_start, period_end,
                last_transaction_id, last_payment_amount, last_payment_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                plan = EXCLUDED.plan,
                status = EXCLUDED.status,
                period_start = EXCLUDED.period_start,
                period_end = EXCLUDED.period_end,
                last_transaction_id = EXCLUDED.last_transaction_id,
                last_payment_amount = EXCLUDED.last_payment_amount,
                last_payment_at = EXCLUDED.last_payment_at
            "#,
        )
        .bind(record.user_id)
        .bind(record.plan)
        .bind(record.status)
        .bind(record.period_start)
        .bind(record.period_end)
        .bind(&record.last_transaction_id)
        .bind(record.last_payment_amount)
        .bind(record.last_payment_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_payment_failure(
        &self,
        user_id: Uuid,
        transaction_id: &str,
        reason: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payment_failures (user_id, transaction_id, reason)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(transaction_id)
        .bind(reason)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
