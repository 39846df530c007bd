use actix_web::{HttpResponse, ResponseError, Result, web};
use uuid::Uuid;

use crate::models::*;
use crate::services::{PaymentService, SubscriptionService};

#[utoipa::path(
    post,
    path = "/subscriptions/initiate",
    tag = "subscription",
    request_body = InitiateSubscriptionRequest,
    responses(
        (status = 200, description = "Hosted payment session created", body = InitiateSubscriptionResponse),
        (status = 400, description = "Invalid plan or customer data"),
        (status = 502, description = "Payment gateway rejected or unreachable")
    )
)]
pub async fn initiate_subscription(
    payment_service: web::Data<PaymentService>,
    request: web::Json<InitiateSubscriptionRequest>,
) -> Result<HttpResponse> {
    match payment_service
        .initiate_subscription(request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/subscriptions/{user_id}",
    tag = "subscription",
    params(
        ("user_id" = Uuid, Path, description = "Subscriber user id")
    ),
    responses(
        (status = 200, description = "Current entitlement, expiry computed at read time", body = SubscriptionStatusResponse)
    )
)]
pub async fn get_subscription_status(
    subscription_service: web::Data<SubscriptionService>,
    user_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    match subscription_service.get_status(user_id.into_inner()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn subscription_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/subscriptions")
            .route("/initiate", web::post().to(initiate_subscription))
            .route("/{user_id}", web::get().to(get_subscription_status)),
    );
}
