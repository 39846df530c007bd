use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Customer contact and address block the gateway requires for card
/// payments. Every field is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerDetails {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    /// ISO 3166-1 alpha-2, e.g. "CI".
    pub country: String,
    pub state: String,
    pub zip_code: String,
}

impl CustomerDetails {
    pub fn validate(&self) -> AppResult<()> {
        let required = [
            ("name", &self.name),
            ("surname", &self.surname),
            ("email", &self.email),
            ("phone_number", &self.phone_number),
            ("address", &self.address),
            ("city", &self.city),
            ("country", &self.country),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::ValidationError(format!(
                    "Customer field '{field}' is required"
                )));
            }
        }

        let email_regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
        if !email_regex.is_match(&self.email) {
            return Err(AppError::ValidationError(
                "Customer email is not a valid address".to_string(),
            ));
        }

        if self.country.len() != 2 {
            return Err(AppError::ValidationError(
                "Customer country must be a 2-letter code".to_string(),
            ));
        }

        Ok(())
    }
}
