use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::CustomerDetails;

/// Outbound payment-creation request, assembled by the initiator. Notify and
/// return URLs, credentials and channels are supplied by the gateway client
/// from its own configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    pub transaction_id: String,
    pub amount: i64,
    pub currency: String,
    pub description: String,
    /// Opaque metadata echoed back with the asynchronous callback.
    pub metadata: String,
    pub customer: CustomerDetails,
}

/// Hosted payment session handed back by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSession {
    pub payment_url: String,
    pub payment_token: Option<String>,
}

/// Authoritative status as reported by the gateway's server-to-server check
/// endpoint. Anything that is neither accepted nor refused is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStatus {
    Accepted,
    Refused,
    Pending,
}

#[derive(Debug, Clone)]
pub struct TransactionVerification {
    pub status: GatewayStatus,
    /// Raw status string, kept for the transaction record.
    pub raw_status: String,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub payment_method: Option<String>,
    pub payment_date: Option<String>,
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Requests a hosted payment URL for a prepared transaction.
    async fn create_payment(&self, request: &CreatePaymentRequest) -> AppResult<PaymentSession>;

    /// Server-to-server status query. The webhook body's claimed status is
    /// never trusted; this call is the only source of truth.
    async fn check_transaction(&self, transaction_id: &str) -> AppResult<TransactionVerification>;
}
