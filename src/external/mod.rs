pub mod cinetpay;
pub mod gateway;

pub use cinetpay::*;
pub use gateway::*;
