use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::Plan;

/// Fixed first segment of every subscription transaction id.
pub const TRANSACTION_ID_PREFIX: &str = "SUB";

/// Builds `SUB-<PLAN>-<unix_millis>-<uuid8>`, e.g.
/// `SUB-MONTHLY-1722470400000-9f3c2a1b`.
///
/// The encoding is load-bearing: the gateway's asynchronous callback carries
/// only this id, so it must be enough to recognize our own transactions and
/// recover the plan without trusting the callback body.
pub fn generate_transaction_id(plan: Plan, user_id: &Uuid, at: DateTime<Utc>) -> String {
    let user_hex = user_id.simple().to_string();
    format!(
        "{TRANSACTION_ID_PREFIX}-{}-{}-{}",
        plan.code(),
        at.timestamp_millis(),
        &user_hex[..8]
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTransactionId {
    pub plan: Plan,
    pub timestamp_millis: i64,
    pub user_fragment: String,
}

/// Parses a transaction id back into its segments. Returns `None` for
/// anything this service could not have issued: wrong prefix, unknown plan
/// code, non-numeric timestamp, or a malformed user fragment.
pub fn parse_transaction_id(id: &str) -> Option<ParsedTransactionId> {
    let segments: Vec<&str> = id.split('-').collect();
    if segments.len() != 4 {
        return None;
    }
    if segments[0] != TRANSACTION_ID_PREFIX {
        return None;
    }
    let plan = Plan::from_code(segments[1])?;
    let timestamp_millis = segments[2].parse::<i64>().ok()?;
    let fragment = segments[3];
    if fragment.len() != 8 || !fragment.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(ParsedTransactionId {
        plan,
        timestamp_millis,
        user_fragment: fragment.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_matches_expected_shape() {
        let user_id = Uuid::parse_str("9f3c2a1b-0000-4000-8000-000000000000").unwrap();
        let at = DateTime::<Utc>::from_timestamp_millis(1_722_470_400_000).unwrap();
        let id = generate_transaction_id(Plan::Monthly, &user_id, at);
        assert_eq!(id, "SUB-MONTHLY-1722470400000-9f3c2a1b");
    }

    #[test]
    fn test_parse_round_trip() {
        let user_id = Uuid::new_v4();
        let at = Utc::now();
        for plan in [Plan::Monthly, Plan::Semiannual, Plan::Annual] {
            let id = generate_transaction_id(plan, &user_id, at);
            let parsed = parse_transaction_id(&id).expect("generated id must parse");
            assert_eq!(parsed.plan, plan);
            assert_eq!(parsed.timestamp_millis, at.timestamp_millis());
            assert_eq!(parsed.user_fragment, user_id.simple().to_string()[..8]);
        }
    }

    #[test]
    fn test_parse_rejects_foreign_ids() {
        assert!(parse_transaction_id("").is_none());
        assert!(parse_transaction_id("SUB-MONTHLY-123").is_none());
        assert!(parse_transaction_id("PAY-MONTHLY-1722470400000-9f3c2a1b").is_none());
        assert!(parse_transaction_id("SUB-WEEKLY-1722470400000-9f3c2a1b").is_none());
        assert!(parse_transaction_id("SUB-MONTHLY-notamillis-9f3c2a1b").is_none());
        assert!(parse_transaction_id("SUB-MONTHLY-1722470400000-xyz").is_none());
        assert!(parse_transaction_id("SUB-MONTHLY-1722470400000-9f3c2a1b-extra").is_none());
    }
}
