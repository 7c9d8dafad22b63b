use crate::check_in::{AccountResult, OutcomeCategory};

/// Per-run summary: results in input order plus derived counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    results: Vec<AccountResult>,
    success_count: usize,
    repeat_count: usize,
    fail_count: usize,
    total_points_gained: i64,
}

impl AggregateReport {
    pub fn from_results(results: Vec<AccountResult>) -> Self {
        let success_count = results
            .iter()
            .filter(|r| r.category() == OutcomeCategory::Success)
            .count();
        let repeat_count = results
            .iter()
            .filter(|r| r.category() == OutcomeCategory::Repeat)
            .count();
        let fail_count = results.len() - success_count - repeat_count;

        // Negative deltas stay on the row but never reduce the total
        let total_points_gained = results
            .iter()
            .map(|r| r.gained().max(0))
            .fold(0i64, i64::saturating_add);

        Self {
            results,
            success_count,
            repeat_count,
            fail_count,
            total_points_gained,
        }
    }

    pub fn results(&self) -> &[AccountResult] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn repeat_count(&self) -> usize {
        self.repeat_count
    }

    pub fn fail_count(&self) -> usize {
        self.fail_count
    }

    pub fn total_points_gained(&self) -> i64 {
        self.total_points_gained
    }
}
