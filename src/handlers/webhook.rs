use actix_web::{HttpResponse, ResponseError, Result, web};
use log::info;
use serde_json::json;

use crate::models::PaymentNotification;
use crate::services::WebhookService;

/// CinetPay payment notification endpoint.
///
/// 200 acknowledges the delivery whatever the payment outcome was. Any
/// error status tells the gateway to redeliver: a verification or store
/// failure must never be acknowledged silently.
#[utoipa::path(
    post,
    path = "/webhook/cinetpay",
    tag = "webhook",
    responses(
        (status = 200, description = "Notification processed"),
        (status = 400, description = "Malformed notification, will not resolve on retry"),
        (status = 404, description = "Unknown transaction id"),
        (status = 502, description = "Verification failed, expect redelivery"),
        (status = 500, description = "State store failure, expect redelivery")
    )
)]
pub async fn cinetpay_webhook(
    webhook_service: web::Data<WebhookService>,
    notification: web::Form<PaymentNotification>,
) -> Result<HttpResponse> {
    let notification = notification.into_inner();
    info!(
        "Received payment notification for transaction {:?}",
        notification.cpm_trans_id
    );

    match webhook_service.process_notification(&notification).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(json!({
            "received": true,
            "outcome": outcome.as_str()
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn webhook_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/webhook").route("/cinetpay", web::post().to(cinetpay_webhook)));
}
