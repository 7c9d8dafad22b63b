//! Check-in response classification.
//!
//! The service's message vocabulary is not contractual, so the matching
//! literals live in one ordered table. Rules are evaluated top to bottom and
//! the first match wins; a response matching nothing is `Unrecognized`.

use super::gateway::CheckinResponse;
use super::value_objects::CheckinOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    MessageContains(&'static str),
    CodeEquals(i64),
}

impl Matcher {
    fn matches(&self, response: &CheckinResponse) -> bool {
        match self {
            Matcher::MessageContains(fragment) => response.message.contains(fragment),
            Matcher::CodeEquals(code) => response.code == Some(*code),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    Success,
    Repeated,
    AlreadyCheckedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationRule {
    pub matcher: Matcher,
    pub outcome: RuleOutcome,
}

const fn rule(matcher: Matcher, outcome: RuleOutcome) -> ClassificationRule {
    ClassificationRule { matcher, outcome }
}

pub const CHECKIN_RULES: &[ClassificationRule] = &[
    rule(Matcher::MessageContains("Checkin! Got"), RuleOutcome::Success),
    rule(Matcher::CodeEquals(0), RuleOutcome::Success),
    rule(Matcher::MessageContains("Repeats"), RuleOutcome::Repeated),
    rule(
        Matcher::MessageContains("Please Try Tomorrow"),
        RuleOutcome::AlreadyCheckedIn,
    ),
];

/// Classify with the built-in rule table
pub fn classify(response: &CheckinResponse) -> CheckinOutcome {
    classify_with(CHECKIN_RULES, response)
}

pub fn classify_with(rules: &[ClassificationRule], response: &CheckinResponse) -> CheckinOutcome {
    rules
        .iter()
        .find(|rule| rule.matcher.matches(response))
        .map(|rule| match rule.outcome {
            RuleOutcome::Success => CheckinOutcome::Success { points_gained: 0 },
            RuleOutcome::Repeated => CheckinOutcome::Repeated,
            RuleOutcome::AlreadyCheckedIn => CheckinOutcome::AlreadyCheckedIn,
        })
        .unwrap_or_else(|| CheckinOutcome::Unrecognized(response.message.clone()))
}
