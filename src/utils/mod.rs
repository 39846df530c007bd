pub mod transaction_id;

pub use transaction_id::{
    TRANSACTION_ID_PREFIX, ParsedTransactionId, generate_transaction_id, parse_transaction_id,
};
