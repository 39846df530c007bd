use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Currency every plan is billed in. CinetPay prices for this site are
/// quoted in West African CFA francs.
pub const PLAN_CURRENCY: &str = "XOF";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "plan_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    Monthly,
    Semiannual,
    Annual,
}

impl Plan {
    /// Fixed price in XOF. The gateway only accepts amounts that are
    /// positive multiples of 5.
    pub fn amount_xof(&self) -> i64 {
        match self {
            Plan::Monthly => 2_000,
            Plan::Semiannual => 7_000,
            Plan::Annual => 13_000,
        }
    }

    pub fn duration_days(&self) -> i64 {
        match self {
            Plan::Monthly => 30,
            Plan::Semiannual => 180,
            Plan::Annual => 365,
        }
    }

    /// Uppercase code embedded in transaction ids.
    pub fn code(&self) -> &'static str {
        match self {
            Plan::Monthly => "MONTHLY",
            Plan::Semiannual => "SEMIANNUAL",
            Plan::Annual => "ANNUAL",
        }
    }

    pub fn from_code(code: &str) -> Option<Plan> {
        match code {
            "MONTHLY" => Some(Plan::Monthly),
            "SEMIANNUAL" => Some(Plan::Semiannual),
            "ANNUAL" => Some(Plan::Annual),
            _ => None,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Plan::Monthly => "Abonnement mensuel Afrikipresse".to_string(),
            Plan::Semiannual => "Abonnement semestriel Afrikipresse".to_string(),
            Plan::Annual => "Abonnement annuel Afrikipresse".to_string(),
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Plan::Monthly => write!(f, "monthly"),
            Plan::Semiannual => write!(f, "semiannual"),
            Plan::Annual => write!(f, "annual"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_prices_are_multiples_of_five() {
        for plan in [Plan::Monthly, Plan::Semiannual, Plan::Annual] {
            assert!(plan.amount_xof() > 0);
            assert_eq!(plan.amount_xof() % 5, 0);
        }
    }

    #[test]
    fn test_plan_code_round_trip() {
        for plan in [Plan::Monthly, Plan::Semiannual, Plan::Annual] {
            assert_eq!(Plan::from_code(plan.code()), Some(plan));
        }
        assert_eq!(Plan::from_code("WEEKLY"), None);
        assert_eq!(Plan::from_code("monthly"), None);
    }

    #[test]
    fn test_plan_durations() {
        assert_eq!(Plan::Monthly.duration_days(), 30);
        assert_eq!(Plan::Semiannual.duration_days(), 180);
        assert_eq!(Plan::Annual.duration_days(), 365);
    }
}
