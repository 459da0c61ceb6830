use std::sync::Arc;

use crate::domain::ledger::UsageRecord;
use crate::domain::plan::Plan;
use crate::error::AppResult;
use crate::infrastructure::repositories::LedgerRepository;

/// Why a generation request was denied
#[derive(Debug, Clone, PartialEq)]
pub enum DenyReason {
    Blocked,
    QuotaExceeded { used: i64, limit: i64 },
}

/// Outcome of the entitlement check
#[derive(Debug, Clone, PartialEq)]
pub enum EntitlementDecision {
    Allowed,
    Denied(DenyReason),
}

/// Ledger operations plus the entitlement check.
///
/// Block-state machine: an active user becomes blocked either by crossing
/// the plan quota (automatic, in `evaluate_and_maybe_block`) or by an admin
/// action. Only an explicit unblock returns them to active; replenished
/// quota alone never clears the flag.
pub struct LedgerService {
    repo: Arc<dyn LedgerRepository>,
}

impl LedgerService {
    pub fn new(repo: Arc<dyn LedgerRepository>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, user_id: &str) -> AppResult<Option<UsageRecord>> {
        self.repo.get(user_id).await
    }

    pub async fn ensure(
        &self,
        user_id: &str,
        email: &str,
        display_name: &str,
    ) -> AppResult<UsageRecord> {
        self.repo.ensure(user_id, email, display_name).await
    }

    pub async fn record_usage(
        &self,
        user_id: &str,
        tokens: i64,
        cost: f64,
    ) -> AppResult<UsageRecord> {
        let record = self.repo.record_usage(user_id, tokens, cost).await?;
        tracing::info!(
            user_id = %user_id,
            tokens,
            cost,
            total_tokens = record.total_tokens_used,
            "Token usage recorded"
        );
        Ok(record)
    }

    pub async fn reset_usage(&self, user_id: &str) -> AppResult<()> {
        self.repo.reset_usage(user_id).await?;
        tracing::info!(user_id = %user_id, "Usage counters reset");
        Ok(())
    }

    pub async fn set_plan(&self, user_id: &str, plan: Plan) -> AppResult<()> {
        self.repo.set_plan(user_id, plan).await?;
        tracing::info!(user_id = %user_id, plan = %plan, "Plan updated");
        Ok(())
    }

    pub async fn set_blocked(&self, user_id: &str, blocked: bool) -> AppResult<()> {
        self.repo.set_blocked(user_id, blocked).await?;
        tracing::info!(user_id = %user_id, blocked, "Block state updated");
        Ok(())
    }

    pub async fn all(&self) -> AppResult<Vec<UsageRecord>> {
        self.repo.all().await
    }

    /// Decide whether a new generation is permitted.
    ///
    /// Not a pure query: crossing the plan quota flips `is_blocked` on the
    /// record before denying, so the account stays suspended until an admin
    /// intervenes. Re-evaluating a blocked or over-quota user denies again
    /// without further state changes.
    pub async fn evaluate_and_maybe_block(&self, user_id: &str) -> AppResult<EntitlementDecision> {
        let record = match self.repo.get(user_id).await? {
            Some(record) => record,
            None => self.repo.ensure(user_id, "", "").await?,
        };

        if record.is_blocked {
            return Ok(EntitlementDecision::Denied(DenyReason::Blocked));
        }

        let limit = record.plan.token_limit();
        if record.total_tokens_used >= limit {
            self.repo.set_blocked(user_id, true).await?;
            tracing::warn!(
                user_id = %user_id,
                used = record.total_tokens_used,
                limit,
                plan = %record.plan,
                "Token limit reached, user auto-blocked"
            );
            return Ok(EntitlementDecision::Denied(DenyReason::QuotaExceeded {
                used: record.total_tokens_used,
                limit,
            }));
        }

        Ok(EntitlementDecision::Allowed)
    }
}
