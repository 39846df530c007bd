use actix_web::web;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::subscription::initiate_subscription,
        handlers::subscription::get_subscription_status,
        handlers::webhook::cinetpay_webhook,
    ),
    components(
        schemas(
            Plan,
            CustomerDetails,
            InitiateSubscriptionRequest,
            InitiateSubscriptionResponse,
            SubscriptionStatus,
            SubscriptionRecord,
            SubscriptionDetails,
            SubscriptionStatusResponse,
            TransactionStatus,
            TransactionRecord,
            PaymentFailure,
            PaymentNotification,
            WebhookOutcome,
            ApiError,
        )
    ),
    tags(
        (name = "subscription", description = "Subscription purchase and entitlement API"),
        (name = "webhook", description = "Payment gateway notification endpoint"),
    ),
    info(
        title = "Afrikipresse Subscription API",
        version = "1.0.0",
        description = "Subscription payment lifecycle: initiation, webhook reconciliation, entitlement"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
