use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::CinetPayConfig;
use crate::error::{AppError, AppResult};
use crate::external::gateway::{
    CreatePaymentRequest, GatewayStatus, PaymentGateway, PaymentSession, TransactionVerification,
};

/// Envelope every gateway endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct GatewayEnvelope<T> {
    pub code: String,
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct CheckData {
    pub status: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub payment_method: Option<String>,
    pub payment_date: Option<String>,
}

/// Gateway response code for a successfully created payment session.
const PAYMENT_CREATED_CODE: &str = "201";
/// Gateway response code for a successful status check.
const CHECK_SUCCESS_CODE: &str = "00";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct CinetPayClient {
    client: Client,
    config: CinetPayConfig,
}

impl CinetPayClient {
    pub fn new(config: CinetPayConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn ensure_credentials(&self) -> AppResult<()> {
        if self.config.apikey.trim().is_empty() || self.config.site_id.trim().is_empty() {
            return Err(AppError::ConfigError(
                "CinetPay apikey/site_id are not configured".to_string(),
            ));
        }
        Ok(())
    }
}

fn map_status(raw: &str) -> GatewayStatus {
    match raw {
        "ACCEPTED" => GatewayStatus::Accepted,
        "REFUSED" => GatewayStatus::Refused,
        _ => GatewayStatus::Pending,
    }
}

#[async_trait]
impl PaymentGateway for CinetPayClient {
    async fn create_payment(&self, request: &CreatePaymentRequest) -> AppResult<PaymentSession> {
        self.ensure_credentials()?;

        let url = format!("{}/v2/payment", self.config.base_url);
        let body = serde_json::json!({
            "apikey": self.config.apikey,
            "site_id": self.config.site_id,
            "transaction_id": request.transaction_id,
            "amount": request.amount,
            "currency": request.currency,
            "description": request.description,
            "notify_url": self.config.notify_url,
            "return_url": self.config.return_url,
            "channels": self.config.channels,
            "metadata": request.metadata,
            "customer_name": request.customer.name,
            "customer_surname": request.customer.surname,
            "customer_email": request.customer.email,
            "customer_phone_number": request.customer.phone_number,
            "customer_address": request.customer.address,
            "customer_city": request.customer.city,
            "customer_country": request.customer.country,
            "customer_state": request.customer.state,
            "customer_zip_code": request.customer.zip_code,
        });

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::GatewayError {
                code: status.as_str().to_string(),
                message: error_text,
            });
        }

        let result: GatewayEnvelope<PaymentSession> = response.json().await?;

        if result.code != PAYMENT_CREATED_CODE {
            return Err(AppError::GatewayError {
                code: result.code,
                message: result.message,
            });
        }

        result.data.ok_or_else(|| AppError::GatewayError {
            code: PAYMENT_CREATED_CODE.to_string(),
            message: "payment created but no session data returned".to_string(),
        })
    }

    async fn check_transaction(&self, transaction_id: &str) -> AppResult<TransactionVerification> {
        self.ensure_credentials()?;

        let url = format!("{}/v2/payment/check", self.config.base_url);
        let body = serde_json::json!({
            "apikey": self.config.apikey,
            "site_id": self.config.site_id,
            "transaction_id": transaction_id,
        });

        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::GatewayError {
                code: status.as_str().to_string(),
                message: error_text,
            });
        }

        let result: GatewayEnvelope<CheckData> = response.json().await?;

        if result.code != CHECK_SUCCESS_CODE {
            return Err(AppError::GatewayError {
                code: result.code,
                message: result.message,
            });
        }

        let data = result.data.ok_or_else(|| {
            AppError::NotVerifiable(format!(
                "check returned no data for transaction {transaction_id}"
            ))
        })?;

        let raw_status = data.status.unwrap_or_else(|| "UNKNOWN".to_string());

        Ok(TransactionVerification {
            status: map_status(&raw_status),
            raw_status,
            amount: data.amount,
            currency: data.currency,
            payment_method: data.payment_method,
            payment_date: data.payment_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_status() {
        assert_eq!(map_status("ACCEPTED"), GatewayStatus::Accepted);
        assert_eq!(map_status("REFUSED"), GatewayStatus::Refused);
        assert_eq!(map_status("WAITING_FOR_CUSTOMER"), GatewayStatus::Pending);
        assert_eq!(map_status("UNKNOWN"), GatewayStatus::Pending);
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let client = CinetPayClient::new(CinetPayConfig {
            apikey: String::new(),
            site_id: String::new(),
            base_url: "https://api-checkout.cinetpay.com".to_string(),
            notify_url: String::new(),
            return_url: String::new(),
            channels: "ALL".to_string(),
        });
        assert!(matches!(
            client.ensure_credentials(),
            Err(AppError::ConfigError(_))
        ));
    }
}
