use chrono::{DateTime, FixedOffset};

use dailydock_domain::check_in::{AccountResult, CheckinOutcome};
use dailydock_domain::notification::NotificationMessage;
use dailydock_domain::redemption::Redemption;
use dailydock_domain::report::AggregateReport;

const TABLE_WIDTH: usize = 80;

// Column widths
const COL_INDEX: usize = 5;
const COL_STATUS: usize = 15;
const COL_DELTA: usize = 12;
const COL_DAYS: usize = 10;
const COL_REDEMPTION: usize = 20;

// Display limits, in characters
const TABLE_STATUS_CHARS: usize = 12;
const TABLE_REDEMPTION_CHARS: usize = 18;
const UNRECOGNIZED_DETAIL_CHARS: usize = 30;
const ERROR_DETAIL_CHARS: usize = 20;
const FAILED_REASON_CHARS: usize = 30;

/// Fixed-width run summary for the job log
pub fn render_table(report: &AggregateReport) -> String {
    let banner = "=".repeat(TABLE_WIDTH);
    let separator = "-".repeat(TABLE_WIDTH);

    let mut lines = vec![
        String::new(),
        banner.clone(),
        "📊 GLaDOS check-in summary".to_string(),
        banner.clone(),
        row("Acct", "Status", "Points", "Days", "Redemption"),
        separator.clone(),
    ];

    for result in report.results() {
        lines.push(row(
            &result.index.to_string(),
            &truncate(&status_text(result), TABLE_STATUS_CHARS),
            &delta_cell(result),
            &days_cell(result),
            &truncate(&redemption_text(result), TABLE_REDEMPTION_CHARS),
        ));
    }

    lines.push(separator);
    lines.push(format!(
        "Stats: ✅ success {} | 🔁 repeat {} | ❌ failed {} | total points gained: {}",
        report.success_count(),
        report.repeat_count(),
        report.fail_count(),
        report.total_points_gained()
    ));
    lines.push(banner);

    lines.join("\n")
}

/// Push notification: count title, one block per account, timestamp last
pub fn render_notification(
    report: &AggregateReport,
    now: DateTime<FixedOffset>,
) -> NotificationMessage {
    let title = format!(
        "GLaDOS check-in | ✅{} 🔁{} ❌{}",
        report.success_count(),
        report.repeat_count(),
        report.fail_count()
    );

    let mut blocks: Vec<String> = report.results().iter().map(account_block).collect();
    blocks.push(format!(
        "⏰ Beijing time: {}",
        now.format("%Y-%m-%d %H:%M:%S")
    ));

    NotificationMessage::new(title, blocks.join("\n\n"))
}

fn account_block(result: &AccountResult) -> String {
    let delta = if result.gained() > 0 {
        format!("+{}", result.gained())
    } else {
        "+0".to_string()
    };

    format!(
        "[Account {}] {} {}\n💰 Balance: {} ({})\n📅 Remaining: {}\n🔄 Redemption: {}",
        result.index,
        status_icon(&result.checkin),
        status_text(result),
        balance_text(result),
        delta,
        remaining_text(result),
        redemption_text(result)
    )
}

fn status_icon(outcome: &CheckinOutcome) -> &'static str {
    match outcome {
        CheckinOutcome::Success { .. } => "✅",
        CheckinOutcome::Repeated | CheckinOutcome::AlreadyCheckedIn => "🔁",
        CheckinOutcome::RequestFailed => "❌",
        CheckinOutcome::Unrecognized(_) | CheckinOutcome::Errored(_) => "⚠️",
    }
}

/// Status label with free-form details shortened for display
fn status_text(result: &AccountResult) -> String {
    match &result.checkin {
        CheckinOutcome::Unrecognized(message) => {
            format!("unexpected: {}", truncate(message, UNRECOGNIZED_DETAIL_CHARS))
        }
        CheckinOutcome::Errored(error) => {
            format!("error: {}", truncate(error, ERROR_DETAIL_CHARS))
        }
        _ => result.status_label(),
    }
}

fn redemption_text(result: &AccountResult) -> String {
    match &result.redemption {
        Redemption::NotAttempted { shortfall } => {
            format!("⏳ insufficient, need {} more", shortfall)
        }
        Redemption::Succeeded { plan } => format!("✅ redeemed {}", plan),
        Redemption::Failed { reason } => {
            format!("❌ failed: {}", truncate(reason, FAILED_REASON_CHARS))
        }
        Redemption::NotProcessed => "not processed".to_string(),
    }
}

fn balance_text(result: &AccountResult) -> String {
    if !result.is_processed() {
        return "unknown".to_string();
    }

    match (&result.redemption, result.final_balance) {
        (Redemption::Succeeded { plan }, Some(balance)) => {
            format!("{} points (redeemed {})", balance, plan.threshold())
        }
        _ => format!("{} points", result.points_after),
    }
}

fn remaining_text(result: &AccountResult) -> String {
    match result.remaining_days {
        Some(days) => format!("{} days", days),
        None if result.is_processed() => "unavailable".to_string(),
        None => "unknown".to_string(),
    }
}

fn delta_cell(result: &AccountResult) -> String {
    if !result.is_processed() {
        return "-".to_string();
    }
    match result.gained() {
        gained if gained > 0 => format!("+{}", gained),
        gained => gained.to_string(),
    }
}

fn days_cell(result: &AccountResult) -> String {
    match result.remaining_days {
        Some(days) => days.to_string(),
        None if result.is_processed() => "n/a".to_string(),
        None => "-".to_string(),
    }
}

fn row(index: &str, status: &str, delta: &str, days: &str, redemption: &str) -> String {
    format!(
        "{:<i$} {:<s$} {:<d$} {:<y$} {:<r$}",
        index,
        status,
        delta,
        days,
        redemption,
        i = COL_INDEX,
        s = COL_STATUS,
        d = COL_DELTA,
        y = COL_DAYS,
        r = COL_REDEMPTION,
    )
    .trim_end()
    .to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
