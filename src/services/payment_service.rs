use chrono::Utc;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::{CreatePaymentRequest, PaymentGateway};
use crate::models::{
    InitiateSubscriptionRequest, InitiateSubscriptionResponse, PLAN_CURRENCY, TransactionRecord,
    TransactionStatus,
};
use crate::stores::SubscriptionStore;
use crate::utils::generate_transaction_id;

#[derive(Clone)]
pub struct PaymentService {
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn SubscriptionStore>,
}

impl PaymentService {
    pub fn new(gateway: Arc<dyn PaymentGateway>, store: Arc<dyn SubscriptionStore>) -> Self {
        Self { gateway, store }
    }

    /// Turns a subscription purchase request into a hosted payment session.
    /// All validation happens before any side effect; the pending
    /// transaction is recorded before the gateway call so the asynchronous
    /// callback can never reference an id the store has not seen.
    pub async fn initiate_subscription(
        &self,
        request: InitiateSubscriptionRequest,
    ) -> AppResult<InitiateSubscriptionResponse> {
        request.customer.validate()?;

        let plan = request.plan;
        let amount = plan.amount_xof();
        // Gateway constraint on amounts.
        if amount <= 0 || amount % 5 != 0 {
            return Err(AppError::ValidationError(format!(
                "Amount {amount} must be a positive multiple of 5"
            )));
        }

        let now = Utc::now();
        let transaction_id = generate_transaction_id(plan, &request.user_id, now);
        let metadata = serde_json::json!({
            "plan": plan,
            "duration_days": plan.duration_days(),
            "user_id": request.user_id,
        })
        .to_string();

        let record = TransactionRecord {
            transaction_id: transaction_id.clone(),
            user_id: request.user_id,
            plan,
            amount,
            currency: PLAN_CURRENCY.to_string(),
            status: TransactionStatus::Pending,
            gateway_status: None,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_transaction(&record).await?;

        let session = self
            .gateway
            .create_payment(&CreatePaymentRequest {
                transaction_id: transaction_id.clone(),
                amount,
                currency: PLAN_CURRENCY.to_string(),
                description: plan.description(),
                metadata,
                customer: request.customer,
            })
            .await?;

        log::info!(
            "Created payment session for user {} ({} plan), transaction {}",
            request.user_id,
            plan,
            transaction_id
        );

        Ok(InitiateSubscriptionResponse {
            transaction_id,
            payment_url: session.payment_url,
            amount,
            currency: PLAN_CURRENCY.to_string(),
            plan,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{MockPaymentGateway, PaymentSession};
    use crate::models::{CustomerDetails, Plan};
    use crate::stores::MockSubscriptionStore;
    use crate::utils::parse_transaction_id;
    use uuid::Uuid;

    fn valid_customer() -> CustomerDetails {
        CustomerDetails {
            name: "Awa".to_string(),
            surname: "Kone".to_string(),
            email: "awa.kone@example.com".to_string(),
            phone_number: "+2250700000000".to_string(),
            address: "Rue des Jardins".to_string(),
            city: "Abidjan".to_string(),
            country: "CI".to_string(),
            state: "Lagunes".to_string(),
            zip_code: "00225".to_string(),
        }
    }

    #[tokio::test]
    async fn test_initiation_encodes_transaction_id_and_plan_amount() {
        let mut gateway = MockPaymentGateway::new();
        gateway
            .expect_create_payment()
            .times(1)
            .returning(|request| {
                assert_eq!(request.currency, "XOF");
                Ok(PaymentSession {
                    payment_url: "https://checkout.example/session".to_string(),
                    payment_token: None,
                })
            });

        let mut store = MockSubscriptionStore::new();
        store
            .expect_insert_transaction()
            .times(1)
            .returning(|record| {
                assert_eq!(record.status, TransactionStatus::Pending);
                Ok(())
            });

        let service = PaymentService::new(Arc::new(gateway), Arc::new(store));
        let user_id = Uuid::new_v4();
        let response = service
            .initiate_subscription(InitiateSubscriptionRequest {
                user_id,
                plan: Plan::Monthly,
                customer: valid_customer(),
            })
            .await
            .expect("initiation should succeed");

        assert_eq!(response.amount, 2_000);
        assert_eq!(response.amount % 5, 0);
        assert_eq!(response.payment_url, "https://checkout.example/session");

        let parsed = parse_transaction_id(&response.transaction_id)
            .expect("transaction id must match the encoding");
        assert_eq!(parsed.plan, Plan::Monthly);
        assert_eq!(parsed.user_fragment, user_id.simple().to_string()[..8]);
    }

    #[tokio::test]
    async fn test_missing_customer_field_fails_before_any_gateway_call() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_payment().never();

        let mut store = MockSubscriptionStore::new();
        store.expect_insert_transaction().never();

        let service = PaymentService::new(Arc::new(gateway), Arc::new(store));
        let mut customer = valid_customer();
        customer.email = String::new();

        let result = service
            .initiate_subscription(InitiateSubscriptionRequest {
                user_id: Uuid::new_v4(),
                plan: Plan::Annual,
                customer,
            })
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_gateway_rejection_propagates() {
        let mut gateway = MockPaymentGateway::new();
        gateway.expect_create_payment().times(1).returning(|_| {
            Err(AppError::GatewayError {
                code: "608".to_string(),
                message: "MINIMUM_REQUIRED_FIELDS".to_string(),
            })
        });

        let mut store = MockSubscriptionStore::new();
        store
            .expect_insert_transaction()
            .times(1)
            .returning(|_| Ok(()));

        let service = PaymentService::new(Arc::new(gateway), Arc::new(store));
        let result = service
            .initiate_subscription(InitiateSubscriptionRequest {
                user_id: Uuid::new_v4(),
                plan: Plan::Semiannual,
                customer: valid_customer(),
            })
            .await;

        assert!(matches!(result, Err(AppError::GatewayError { .. })));
    }
}
