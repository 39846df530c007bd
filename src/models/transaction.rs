use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::Plan;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "transaction_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Accepted,
    Refused,
}

impl TransactionStatus {
    /// A transaction is terminal once its status has left pending; terminal
    /// transactions are never mutated again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Accepted => write!(f, "accepted"),
            TransactionStatus::Refused => write!(f, "refused"),
        }
    }
}

/// One payment attempt. Created pending by the initiator, transitioned by
/// the webhook receiver only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub user_id: Uuid,
    pub plan: Plan,
    pub amount: i64,
    pub currency: String,
    pub status: TransactionStatus,
    /// Raw status string last reported by the gateway's check endpoint.
    pub gateway_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Observability record written when the gateway confirms a refusal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PaymentFailure {
    pub user_id: Uuid,
    pub transaction_id: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
