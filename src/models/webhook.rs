use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Asynchronous payment notification posted by the gateway, form-encoded.
/// Fields are kept optional so the receiver can reject malformed deliveries
/// in a single validation pass instead of at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PaymentNotification {
    #[serde(default)]
    pub cpm_site_id: Option<String>,
    #[serde(default)]
    pub cpm_trans_id: Option<String>,
    #[serde(default)]
    pub cpm_trans_status: Option<String>,
    #[serde(default)]
    pub cpm_amount: Option<String>,
    #[serde(default)]
    pub cpm_currency: Option<String>,
    #[serde(default)]
    pub cpm_result: Option<String>,
    #[serde(default)]
    pub cpm_error_message: Option<String>,
    /// Opaque metadata string echoed back from payment creation.
    #[serde(default)]
    pub cpm_custom: Option<String>,
}

/// What the receiver did with a notification. The gateway only needs the
/// acknowledgement; the outcome is logged and returned for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WebhookOutcome {
    SubscriptionActivated,
    AlreadyProcessed,
    PaymentRefused,
    StillPending,
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookOutcome::SubscriptionActivated => "subscription_activated",
            WebhookOutcome::AlreadyProcessed => "already_processed",
            WebhookOutcome::PaymentRefused => "payment_refused",
            WebhookOutcome::StillPending => "still_pending",
        }
    }
}
