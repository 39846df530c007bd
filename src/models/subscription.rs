use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{CustomerDetails, Plan};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "subscription_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Expired,
    Cancelled,
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionStatus::Active => write!(f, "active"),
            SubscriptionStatus::Inactive => write!(f, "inactive"),
            SubscriptionStatus::Expired => write!(f, "expired"),
            SubscriptionStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Per-user subscription state. One row per user, written only as the side
/// effect of a verified accepted transaction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SubscriptionRecord {
    pub user_id: Uuid,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub last_transaction_id: String,
    pub last_payment_amount: i64,
    pub last_payment_at: DateTime<Utc>,
}

impl SubscriptionRecord {
    /// Entitlement is computed at read time; an active row whose period has
    /// lapsed no longer entitles.
    pub fn is_entitled_at(&self, now: DateTime<Utc>) -> bool {
        self.status == SubscriptionStatus::Active && self.period_end > now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InitiateSubscriptionRequest {
    pub user_id: Uuid,
    pub plan: Plan,
    pub customer: CustomerDetails,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct InitiateSubscriptionResponse {
    pub transaction_id: String,
    pub payment_url: String,
    pub amount: i64,
    pub currency: String,
    pub plan: Plan,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionDetails {
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub last_payment_amount: i64,
    pub last_payment_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionStatusResponse {
    pub user_id: Uuid,
    pub entitled: bool,
    pub subscription: Option<SubscriptionDetails>,
}
