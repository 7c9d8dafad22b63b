use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use dailydock_domain::check_in::{classify, AccountResult, CheckinGateway, CheckinOutcome};
use dailydock_domain::redemption::{Redemption, RedemptionPlan};
use dailydock_domain::reporting::{GroupGuard, RunReporter};
use dailydock_domain::Credential;

/// Runs the five-step daily sequence for one account.
///
/// Every step degrades on failure instead of aborting, so `run` always
/// produces a result:
/// 1. initial points (failure ⇒ 0)
/// 2. check-in, classified by the rule table
/// 3. remaining days (failure ⇒ unknown)
/// 4. final points (failure ⇒ initial points), credited to a success
/// 5. redemption when the balance reaches the plan threshold
pub struct AccountWorkflow {
    gateway: Arc<dyn CheckinGateway>,
    reporter: Arc<dyn RunReporter>,
    plan: RedemptionPlan,
}

impl AccountWorkflow {
    pub fn new(
        gateway: Arc<dyn CheckinGateway>,
        reporter: Arc<dyn RunReporter>,
        plan: RedemptionPlan,
    ) -> Self {
        Self {
            gateway,
            reporter,
            plan,
        }
    }

    #[instrument(skip(self, credential), fields(account = index, credential = %credential))]
    pub async fn run(&self, index: usize, credential: &Credential) -> AccountResult {
        let _group = GroupGuard::open(self.reporter.as_ref(), &format!("👤 Account {}", index));

        info!(step = 1, "📊 Step 1/5: querying current points...");
        let points_before = self.query_points(credential).await.unwrap_or(0);
        info!(step = 1, "   ├─ Current points: {}", points_before);

        info!(step = 2, "📝 Step 2/5: checking in...");
        let checkin = self.check_in(credential).await;

        info!(step = 3, "📅 Step 3/5: querying remaining days...");
        let remaining_days = self.query_remaining_days(credential).await;

        info!(step = 4, "💰 Step 4/5: refreshing points...");
        let points_after = self
            .query_points(credential)
            .await
            .unwrap_or(points_before);
        let gained = points_after.saturating_sub(points_before);
        if gained > 0 {
            info!(
                step = 4,
                "   ├─ Points: {} → {} (+{})", points_before, points_after, gained
            );
        } else {
            info!(step = 4, "   ├─ Points unchanged: {}", points_after);
        }
        let checkin = checkin.credit(gained);

        info!(step = 5, "🔄 Step 5/5: checking redemption threshold...");
        let redemption = self.redeem(credential, points_after).await;

        let final_balance = if redemption.is_succeeded() {
            let balance = self.query_points(credential).await;
            if let Some(balance) = balance {
                info!("   └─ Balance after redemption: {} points", balance);
            }
            balance
        } else {
            None
        };

        let result = AccountResult {
            index,
            checkin,
            points_before,
            points_after,
            final_balance,
            remaining_days,
            redemption,
        };

        info!("📈 Account result:");
        info!("   Status: {}", result.status_label());
        info!("   Points: {} ({:+})", result.points_after, result.gained());
        info!(
            "   Days: {}",
            result
                .remaining_days
                .map_or_else(|| "unavailable".to_string(), |d| d.to_string())
        );
        info!("   Redemption: {:?}", result.redemption);

        result
    }

    /// `None` when the balance could not be read
    async fn query_points(&self, credential: &Credential) -> Option<i64> {
        match self.gateway.fetch_points(credential).await {
            Ok(Some(points)) => Some(points),
            Ok(None) => {
                warn!("   ├─ ⚠️ Points request failed");
                None
            }
            Err(e) => {
                error!("   ├─ ❌ Failed to query points: {}", e);
                None
            }
        }
    }

    async fn check_in(&self, credential: &Credential) -> CheckinOutcome {
        let response = match self.gateway.check_in(credential).await {
            Ok(Some(response)) => response,
            Ok(None) => {
                error!(step = 2, "   ├─ ❌ Check-in request failed");
                return CheckinOutcome::RequestFailed;
            }
            Err(e) => {
                error!(step = 2, "   ├─ ❌ Check-in error: {}", e);
                return CheckinOutcome::Errored(e.to_string());
            }
        };

        self.reporter.debug(&format!(
            "Check-in response: code={:?} message={}",
            response.code, response.message
        ));
        let outcome = classify(&response);
        match &outcome {
            CheckinOutcome::Success { .. } => info!(step = 2, "   ├─ ✅ Checked in"),
            CheckinOutcome::Repeated => info!(step = 2, "   ├─ 🔁 Repeat check-in"),
            CheckinOutcome::AlreadyCheckedIn => info!(step = 2, "   ├─ 🔁 Already checked in today"),
            CheckinOutcome::Unrecognized(message) => self
                .reporter
                .warning(&format!("Unexpected check-in message: {}", message)),
            CheckinOutcome::RequestFailed | CheckinOutcome::Errored(_) => {}
        }
        outcome
    }

    async fn query_remaining_days(&self, credential: &Credential) -> Option<i64> {
        match self.gateway.fetch_remaining_days(credential).await {
            Ok(Some(days)) => {
                info!(step = 3, "   ├─ Remaining days: {}", days);
                Some(days)
            }
            Ok(None) => {
                warn!(step = 3, "   ├─ ⚠️ Could not read remaining days");
                None
            }
            Err(e) => {
                error!(step = 3, "   ├─ ❌ Remaining days error: {}", e);
                None
            }
        }
    }

    async fn redeem(&self, credential: &Credential, points_after: i64) -> Redemption {
        if let Some(skipped) = Redemption::evaluate(points_after, self.plan) {
            if let Redemption::NotAttempted { shortfall } = &skipped {
                info!(step = 5, "   └─ ⏳ Not enough points, {} more needed", shortfall);
            }
            return skipped;
        }

        info!(
            step = 5,
            "   ├─ Redeeming {} ({} points)...",
            self.plan,
            self.plan.threshold()
        );

        let response = self.gateway.exchange(credential, self.plan).await;
        if let Ok(Some(response)) = &response {
            self.reporter.debug(&format!(
                "Exchange response: code={:?} message={:?}",
                response.code, response.message
            ));
        }

        match response {
            Ok(Some(response)) if response.is_ok() => {
                info!(step = 5, "   └─ ✅ Redeemed {}", self.plan);
                Redemption::Succeeded { plan: self.plan }
            }
            Ok(Some(response)) => {
                let reason = response
                    .message
                    .unwrap_or_else(|| "unknown error".to_string());
                self.reporter
                    .warning(&format!("Redemption failed: {}", reason));
                Redemption::Failed { reason }
            }
            Ok(None) => {
                error!(step = 5, "   └─ ❌ Redemption request failed");
                Redemption::Failed {
                    reason: "request failed".to_string(),
                }
            }
            Err(e) => {
                error!(step = 5, "   └─ ❌ Redemption error: {}", e);
                Redemption::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
