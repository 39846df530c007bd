pub mod payment_service;
pub mod subscription_service;
pub mod webhook_service;

pub use payment_service::*;
pub use subscription_service::*;
pub use webhook_service::*;
