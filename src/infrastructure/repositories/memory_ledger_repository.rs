use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::ledger_repository::LedgerRepository;
use crate::domain::ledger::UsageRecord;
use crate::domain::plan::Plan;
use crate::error::AppResult;

/// In-memory ledger backend. State is lost on restart.
///
/// All mutations go through the write lock, so concurrent updates for the
/// same user are serialized and counter increments cannot be lost.
#[derive(Default)]
pub struct MemoryLedgerRepository {
    records: RwLock<HashMap<String, UsageRecord>>,
}

impl MemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the demo accounts used by the staging environment
    pub async fn seed_demo_users(&self) {
        let mut records = self.records.write().await;
        if !records.is_empty() {
            tracing::debug!("Demo data already present, skipping seed");
            return;
        }

        for (user_id, email, plan, tokens, blocked) in [
            ("demo-user", "demo@example.com", Plan::Free, 0, false),
            ("user-2", "user-2@example.com", Plan::Basic, 85_000, false),
            ("user-3", "user-3@example.com", Plan::Pro, 310_000, true),
            ("user-4", "user-4@example.com", Plan::RadPlus, 750_000, false),
        ] {
            let mut record = UsageRecord::new(user_id, email, "Demo User");
            record.plan = plan;
            record.total_tokens_used = tokens;
            record.is_blocked = blocked;
            records.insert(user_id.to_string(), record);
        }

        tracing::info!(seeded = records.len(), "Demo ledger data seeded");
    }
}

#[async_trait]
impl LedgerRepository for MemoryLedgerRepository {
    async fn get(&self, user_id: &str) -> AppResult<Option<UsageRecord>> {
        let records = self.records.read().await;
        Ok(records.get(user_id).cloned())
    }

    async fn ensure(
        &self,
        user_id: &str,
        email: &str,
        display_name: &str,
    ) -> AppResult<UsageRecord> {
        let mut records = self.records.write().await;
        let record = records
            .entry(user_id.to_string())
            .or_insert_with(|| UsageRecord::new(user_id, email, display_name));
        if !email.is_empty() {
            record.email = email.to_string();
        }
        if !display_name.is_empty() {
            record.display_name = display_name.to_string();
        }
        Ok(record.clone())
    }

    async fn record_usage(&self, user_id: &str, tokens: i64, cost: f64) -> AppResult<UsageRecord> {
        let mut records = self.records.write().await;
        let record = records
            .entry(user_id.to_string())
            .or_insert_with(|| UsageRecord::new(user_id, "", ""));
        record.apply_usage(tokens, cost, Utc::now());
        Ok(record.clone())
    }

    async fn reset_usage(&self, user_id: &str) -> AppResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .entry(user_id.to_string())
            .or_insert_with(|| UsageRecord::new(user_id, "", ""));
        record.reset_counters(Utc::now());
        Ok(())
    }

    async fn set_plan(&self, user_id: &str, plan: Plan) -> AppResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .entry(user_id.to_string())
            .or_insert_with(|| UsageRecord::new(user_id, "", ""));
        record.plan = plan;
        Ok(())
    }

    async fn set_blocked(&self, user_id: &str, blocked: bool) -> AppResult<()> {
        let mut records = self.records.write().await;
        let record = records
            .entry(user_id.to_string())
            .or_insert_with(|| UsageRecord::new(user_id, "", ""));
        record.is_blocked = blocked;
        Ok(())
    }

    async fn all(&self) -> AppResult<Vec<UsageRecord>> {
        let records = self.records.read().await;
        let mut all: Vec<UsageRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        Ok(all)
    }
}
