use crate::redemption::Redemption;

/// Classified result of the daily check-in call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinOutcome {
    /// Points are credited once the post check-in balance is known
    Success { points_gained: i64 },
    AlreadyCheckedIn,
    Repeated,
    /// Well-formed response matching no rule; raw message kept in full
    Unrecognized(String),
    /// Service answered with a non-2xx status
    RequestFailed,
    /// The call raised (retries exhausted, undecodable body) or the
    /// account could not be processed at all
    Errored(String),
}

/// Bucket used by the summary counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeCategory {
    Success,
    Repeat,
    Fail,
}

impl CheckinOutcome {
    pub fn category(&self) -> OutcomeCategory {
        match self {
            CheckinOutcome::Success { .. } => OutcomeCategory::Success,
            CheckinOutcome::Repeated | CheckinOutcome::AlreadyCheckedIn => OutcomeCategory::Repeat,
            CheckinOutcome::Unrecognized(_)
            | CheckinOutcome::RequestFailed
            | CheckinOutcome::Errored(_) => OutcomeCategory::Fail,
        }
    }

    /// Attach the observed point delta to a successful check-in
    pub fn credit(self, gained: i64) -> Self {
        match self {
            CheckinOutcome::Success { .. } => CheckinOutcome::Success {
                points_gained: gained,
            },
            other => other,
        }
    }
}

/// Everything observed for one account during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountResult {
    /// 1-based position in the credential list
    pub index: usize,
    pub checkin: CheckinOutcome,
    pub points_before: i64,
    pub points_after: i64,
    /// Balance re-queried after a successful redemption, display only
    pub final_balance: Option<i64>,
    /// `None` when the status endpoint could not be read
    pub remaining_days: Option<i64>,
    pub redemption: Redemption,
}

impl AccountResult {
    /// Synthetic result for an account whose workflow failed outright
    pub fn failed(index: usize, error: impl Into<String>) -> Self {
        Self {
            index,
            checkin: CheckinOutcome::Errored(error.into()),
            points_before: 0,
            points_after: 0,
            final_balance: None,
            remaining_days: None,
            redemption: Redemption::NotProcessed,
        }
    }

    /// Point delta across the check-in; not clamped
    pub fn gained(&self) -> i64 {
        self.points_after.saturating_sub(self.points_before)
    }

    pub fn category(&self) -> OutcomeCategory {
        self.checkin.category()
    }

    pub fn is_processed(&self) -> bool {
        self.redemption != Redemption::NotProcessed
    }

    /// Human-readable check-in status, detail kept in full
    pub fn status_label(&self) -> String {
        match &self.checkin {
            CheckinOutcome::Success { points_gained } if *points_gained > 0 => {
                format!("success +{}", points_gained)
            }
            CheckinOutcome::Success { .. } => "success".to_string(),
            CheckinOutcome::Repeated => "repeat check-in".to_string(),
            CheckinOutcome::AlreadyCheckedIn => "already checked in".to_string(),
            CheckinOutcome::Unrecognized(message) => format!("unexpected: {}", message),
            CheckinOutcome::RequestFailed => "request failed".to_string(),
            CheckinOutcome::Errored(error) => format!("error: {}", error),
        }
    }
}
