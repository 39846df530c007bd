use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{SubscriptionDetails, SubscriptionStatus, SubscriptionStatusResponse};
use crate::stores::SubscriptionStore;

#[derive(Clone)]
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    /// Entitlement read. Expiry is computed here at read time: a row whose
    /// period has lapsed is reported as expired but never rewritten, so the
    /// webhook receiver stays the only writer.
    pub async fn get_status(&self, user_id: Uuid) -> AppResult<SubscriptionStatusResponse> {
        let record = self.store.find_subscription(user_id).await?;
        let now = Utc::now();

        let Some(record) = record else {
            return Ok(SubscriptionStatusResponse {
                user_id,
                entitled: false,
                subscription: None,
            });
        };

        let entitled = record.is_entitled_at(now);
        let status = if record.status == SubscriptionStatus::Active && record.period_end <= now {
            SubscriptionStatus::Expired
        } else {
            record.status
        };

        Ok(SubscriptionStatusResponse {
            user_id,
            entitled,
            subscription: Some(SubscriptionDetails {
                plan: record.plan,
                status,
                period_start: record.period_start,
                period_end: record.period_end,
                last_payment_amount: record.last_payment_amount,
                last_payment_at: record.last_payment_at,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Plan, SubscriptionRecord};
    use crate::stores::MockSubscriptionStore;
    use chrono::Duration;

    fn record(user_id: Uuid, period_end_offset_days: i64) -> SubscriptionRecord {
        let now = Utc::now();
        SubscriptionRecord {
            user_id,
            plan: Plan::Monthly,
            status: SubscriptionStatus::Active,
            period_start: now - Duration::days(30) + Duration::days(period_end_offset_days),
            period_end: now + Duration::days(period_end_offset_days),
            last_transaction_id: "SUB-MONTHLY-1722470400000-9f3c2a1b".to_string(),
            last_payment_amount: 2_000,
            last_payment_at: now,
        }
    }

    #[tokio::test]
    async fn test_no_record_means_not_entitled() {
        let mut store = MockSubscriptionStore::new();
        store
            .expect_find_subscription()
            .times(1)
            .returning(|_| Ok(None));

        let service = SubscriptionService::new(Arc::new(store));
        let response = service.get_status(Uuid::new_v4()).await.unwrap();
        assert!(!response.entitled);
        assert!(response.subscription.is_none());
    }

    #[tokio::test]
    async fn test_active_with_future_period_end_is_entitled() {
        let user_id = Uuid::new_v4();
        let mut store = MockSubscriptionStore::new();
        store
            .expect_find_subscription()
            .times(1)
            .returning(move |id| Ok(Some(record(id, 10))));

        let service = SubscriptionService::new(Arc::new(store));
        let response = service.get_status(user_id).await.unwrap();
        assert!(response.entitled);
        let details = response.subscription.unwrap();
        assert_eq!(details.status, SubscriptionStatus::Active);
    }

    #[tokio::test]
    async fn test_lapsed_period_reads_expired_without_rewrite() {
        let user_id = Uuid::new_v4();
        let mut store = MockSubscriptionStore::new();
        store
            .expect_find_subscription()
            .times(1)
            .returning(move |id| Ok(Some(record(id, -1))));
        // Lazy expiry: the read path must never write.
        store.expect_upsert_subscription().never();

        let service = SubscriptionService::new(Arc::new(store));
        let response = service.get_status(user_id).await.unwrap();
        assert!(!response.entitled);
        let details = response.subscription.unwrap();
        assert_eq!(details.status, SubscriptionStatus::Expired);
    }
}
