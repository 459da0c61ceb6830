use async_trait::async_trait;

use crate::domain::ledger::UsageRecord;
use crate::domain::plan::Plan;
use crate::error::AppResult;

/// Storage for per-user usage ledger records.
/// Abstracts the backing store (in-memory map, Postgres).
///
/// Implementations must make concurrent mutations on the same user safe:
/// two overlapping `record_usage` calls may never lose an update. Every
/// mutating operation auto-creates a missing record instead of erroring,
/// so no method fails for an unknown user id.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Read a record without side effects; `None` if the user was never seen
    async fn get(&self, user_id: &str) -> AppResult<Option<UsageRecord>>;

    /// Create the record if absent; idempotent. Refreshes email and
    /// display name on existing records.
    async fn ensure(&self, user_id: &str, email: &str, display_name: &str)
        -> AppResult<UsageRecord>;

    /// Charge one successful generation: bumps lifetime and daily counters,
    /// rolling the daily counters over first if the stored reset date is
    /// not today (UTC). Returns the updated record.
    async fn record_usage(&self, user_id: &str, tokens: i64, cost: f64) -> AppResult<UsageRecord>;

    /// Zero all counters and stamp a new reset date; plan and block state
    /// are untouched
    async fn reset_usage(&self, user_id: &str) -> AppResult<()>;

    /// Overwrite the plan. Does not reset counters; callers compose with
    /// `reset_usage` explicitly when the new tier should start clean.
    async fn set_plan(&self, user_id: &str, plan: Plan) -> AppResult<()>;

    /// Overwrite the block flag
    async fn set_blocked(&self, user_id: &str, blocked: bool) -> AppResult<()>;

    /// All records ordered by `last_used` descending
    async fn all(&self) -> AppResult<Vec<UsageRecord>>;
}
