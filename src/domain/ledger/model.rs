use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::plan::Plan;

/// Per-user usage ledger record.
///
/// Created lazily on first generation or first admin lookup, never deleted.
/// The lifetime counters only move forward; the daily counters roll over
/// when the UTC calendar day of `last_reset_date` changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub plan: Plan,
    pub total_tokens_used: i64,
    pub total_impressions: i64,
    pub tokens_today: i64,
    pub impressions_today: i64,
    pub total_cost: f64,
    pub is_blocked: bool,
    pub last_used: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_reset_date: DateTime<Utc>,
}

impl UsageRecord {
    /// Fresh record with zero counters on the free plan
    pub fn new(user_id: &str, email: &str, display_name: &str) -> Self {
        let now = Utc::now();
        Self {
            user_id: user_id.to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
            plan: Plan::Free,
            total_tokens_used: 0,
            total_impressions: 0,
            tokens_today: 0,
            impressions_today: 0,
            total_cost: 0.0,
            is_blocked: false,
            last_used: now,
            created_at: now,
            last_reset_date: now,
        }
    }

    /// Zero the daily counters if the stored reset date is not today (UTC)
    pub fn roll_over_daily(&mut self, now: DateTime<Utc>) {
        if self.last_reset_date.date_naive() != now.date_naive() {
            self.tokens_today = 0;
            self.impressions_today = 0;
            self.last_reset_date = now;
        }
    }

    /// Apply one successful generation to the counters
    pub fn apply_usage(&mut self, tokens: i64, cost: f64, now: DateTime<Utc>) {
        self.roll_over_daily(now);
        self.total_tokens_used += tokens;
        self.total_impressions += 1;
        self.tokens_today += tokens;
        self.impressions_today += 1;
        self.total_cost += cost;
        self.last_used = now;
    }

    /// Zero all four counters and stamp a new reset date.
    /// Leaves `plan` and `is_blocked` untouched.
    pub fn reset_counters(&mut self, now: DateTime<Utc>) {
        self.total_tokens_used = 0;
        self.total_impressions = 0;
        self.tokens_today = 0;
        self.impressions_today = 0;
        self.total_cost = 0.0;
        self.last_reset_date = now;
    }
}
