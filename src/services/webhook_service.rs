use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::external::{GatewayStatus, PaymentGateway};
use crate::models::{
    PaymentNotification, SubscriptionRecord, SubscriptionStatus, TransactionStatus, WebhookOutcome,
};
use crate::stores::SubscriptionStore;
use crate::utils::parse_transaction_id;

#[derive(Clone)]
pub struct WebhookService {
    site_id: String,
    gateway: Arc<dyn PaymentGateway>,
    store: Arc<dyn SubscriptionStore>,
}

impl WebhookService {
    pub fn new(
        site_id: String,
        gateway: Arc<dyn PaymentGateway>,
        store: Arc<dyn SubscriptionStore>,
    ) -> Self {
        Self {
            site_id,
            gateway,
            store,
        }
    }

    /// Processes one gateway notification. Safe to invoke any number of
    /// times for the same transaction id: once a transaction is terminal,
    /// replays acknowledge without writing, so a replayed accepted
    /// notification cannot extend the subscription period.
    pub async fn process_notification(
        &self,
        notification: &PaymentNotification,
    ) -> AppResult<WebhookOutcome> {
        // Structural validation first: local checks only, no store or
        // network access.
        let site_id = notification.cpm_site_id.as_deref().unwrap_or_default();
        if site_id != self.site_id {
            return Err(AppError::ValidationError(
                "cpm_site_id does not match this site".to_string(),
            ));
        }

        let transaction_id = notification
            .cpm_trans_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::ValidationError("cpm_trans_id is required".to_string()))?;

        parse_transaction_id(transaction_id).ok_or_else(|| {
            AppError::ValidationError(format!(
                "cpm_trans_id {transaction_id} does not match the expected encoding"
            ))
        })?;

        let transaction = self
            .store
            .find_transaction(transaction_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("unknown transaction {transaction_id}")))?;

        // Authoritative re-verification. The claimed cpm_trans_status /
        // cpm_result can be replayed or forged; only the gateway's check
        // endpoint decides.
        let verification = self.gateway.check_transaction(transaction_id).await?;

        match verification.status {
            GatewayStatus::Accepted => {
                if transaction.status.is_terminal() {
                    log::info!(
                        "Transaction {transaction_id} already processed, acknowledging replay"
                    );
                    return Ok(WebhookOutcome::AlreadyProcessed);
                }

                let now = Utc::now();
                let record = SubscriptionRecord {
                    user_id: transaction.user_id,
                    plan: transaction.plan,
                    status: SubscriptionStatus::Active,
                    period_start: now,
                    period_end: now + Duration::days(transaction.plan.duration_days()),
                    last_transaction_id: transaction.transaction_id.clone(),
                    last_payment_amount: verification.amount.unwrap_or(transaction.amount),
                    last_payment_at: now,
                };
                // Subscription first: if marking the transaction fails the
                // delivery is retried and converges, whereas a terminal
                // transaction without its subscription row would be lost.
                self.store.upsert_subscription(&record).await?;
                self.store
                    .update_transaction_status(
                        transaction_id,
                        TransactionStatus::Accepted,
                        &verification.raw_status,
                    )
                    .await?;

                log::info!(
                    "Activated {} subscription for user {} until {}",
                    transaction.plan,
                    transaction.user_id,
                    record.period_end
                );
                Ok(WebhookOutcome::SubscriptionActivated)
            }
            GatewayStatus::Refused => {
                if transaction.status.is_terminal() {
                    log::info!(
                        "Transaction {transaction_id} already processed, acknowledging replay"
                    );
                    return Ok(WebhookOutcome::AlreadyProcessed);
                }

                let reason = notification
                    .cpm_error_message
                    .clone()
                    .filter(|msg| !msg.is_empty())
                    .unwrap_or_else(|| verification.raw_status.clone());

                self.store
                    .update_transaction_status(
                        transaction_id,
                        TransactionStatus::Refused,
                        &verification.raw_status,
                    )
                    .await?;
                self.store
                    .record_payment_failure(transaction.user_id, transaction_id, &reason)
                    .await?;

                log::warn!(
                    "Payment refused for user {}, transaction {transaction_id}: {reason}",
                    transaction.user_id
                );
                Ok(WebhookOutcome::PaymentRefused)
            }
            GatewayStatus::Pending => {
                // Not a final status: acknowledge without touching state so
                // a later redelivery can resolve the transaction.
                log::info!(
                    "Transaction {transaction_id} still pending at the gateway ({})",
                    verification.raw_status
                );
                Ok(WebhookOutcome::StillPending)
            }
        }
    }
}
