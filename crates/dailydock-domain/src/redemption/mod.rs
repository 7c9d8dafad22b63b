use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::DomainError;

/// Reward tier that points can be exchanged for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionPlan {
    Plan100,
    Plan200,
    Plan500,
}

impl RedemptionPlan {
    pub const ALL: [RedemptionPlan; 3] = [
        RedemptionPlan::Plan100,
        RedemptionPlan::Plan200,
        RedemptionPlan::Plan500,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RedemptionPlan::Plan100 => "plan100",
            RedemptionPlan::Plan200 => "plan200",
            RedemptionPlan::Plan500 => "plan500",
        }
    }

    /// Points required to redeem this plan
    pub fn threshold(&self) -> i64 {
        match self {
            RedemptionPlan::Plan100 => 100,
            RedemptionPlan::Plan200 => 200,
            RedemptionPlan::Plan500 => 500,
        }
    }

    pub fn largest() -> Self {
        Self::ALL
            .into_iter()
            .max_by_key(|plan| plan.threshold())
            .unwrap_or(RedemptionPlan::Plan500)
    }
}

impl Default for RedemptionPlan {
    fn default() -> Self {
        Self::largest()
    }
}

impl FromStr for RedemptionPlan {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "plan100" => Ok(RedemptionPlan::Plan100),
            "plan200" => Ok(RedemptionPlan::Plan200),
            "plan500" => Ok(RedemptionPlan::Plan500),
            other => Err(DomainError::InvalidInput(format!(
                "Unknown redemption plan: {other}"
            ))),
        }
    }
}

impl fmt::Display for RedemptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of the exchange step for one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redemption {
    /// Threshold not met; `shortfall` points still missing
    NotAttempted { shortfall: i64 },
    Succeeded { plan: RedemptionPlan },
    /// Exchange was attempted and rejected; full server or transport reason
    Failed { reason: String },
    /// Workflow never reached the exchange step
    NotProcessed,
}

impl Redemption {
    /// Decide whether to redeem, given the balance observed after check-in.
    /// Returns `None` when an exchange must be attempted.
    pub fn evaluate(points_after: i64, plan: RedemptionPlan) -> Option<Redemption> {
        if points_after >= plan.threshold() {
            None
        } else {
            Some(Redemption::NotAttempted {
                shortfall: plan.threshold().saturating_sub(points_after),
            })
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, Redemption::Succeeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_thresholds() {
        assert_eq!(RedemptionPlan::Plan100.threshold(), 100);
        assert_eq!(RedemptionPlan::Plan200.threshold(), 200);
        assert_eq!(RedemptionPlan::Plan500.threshold(), 500);
    }

    #[test]
    fn test_default_plan_is_largest() {
        assert_eq!(RedemptionPlan::default(), RedemptionPlan::Plan500);
    }

    #[test]
    fn test_plan_from_str() {
        assert_eq!(
            "plan200".parse::<RedemptionPlan>().unwrap(),
            RedemptionPlan::Plan200
        );
        assert_eq!(
            " plan100 ".parse::<RedemptionPlan>().unwrap(),
            RedemptionPlan::Plan100
        );
        assert!("plan42".parse::<RedemptionPlan>().is_err());
    }

    #[test]
    fn test_evaluate_below_threshold_reports_shortfall() {
        assert_eq!(
            Redemption::evaluate(15, RedemptionPlan::Plan100),
            Some(Redemption::NotAttempted { shortfall: 85 })
        );
    }

    #[test]
    fn test_evaluate_at_threshold_attempts() {
        assert_eq!(Redemption::evaluate(500, RedemptionPlan::Plan500), None);
        assert_eq!(Redemption::evaluate(501, RedemptionPlan::Plan500), None);
    }

    #[test]
    fn test_evaluate_extreme_balance_saturates() {
        assert_eq!(
            Redemption::evaluate(i64::MIN, RedemptionPlan::Plan100),
            Some(Redemption::NotAttempted {
                shortfall: i64::MAX
            })
        );
        assert_eq!(Redemption::evaluate(i64::MAX, RedemptionPlan::Plan100), None);
    }

    #[test]
    fn test_shortfall_is_positive_whenever_not_attempted() {
        for plan in RedemptionPlan::ALL {
            for points in 0..=plan.threshold() + 5 {
                match Redemption::evaluate(points, plan) {
                    Some(Redemption::NotAttempted { shortfall }) => {
                        assert!(shortfall > 0);
                        assert_eq!(shortfall, plan.threshold() - points);
                    }
                    None => assert!(points >= plan.threshold()),
                    Some(other) => panic!("unexpected decision {:?}", other),
                }
            }
        }
    }
}
