use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;

use super::ledger_repository::LedgerRepository;
use crate::domain::ledger::UsageRecord;
use crate::domain::plan::Plan;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;

/// Durable ledger backend on Postgres.
///
/// Counter increments and the daily rollover happen inside a single upsert
/// statement, so concurrent requests for the same user cannot lose updates.
pub struct PostgresLedgerRepository {
    pool: Arc<DbPool>,
}

/// Row mirror of `usage_ledger`; `plan` stays a string here so unknown
/// values stored by older builds decode to the free plan instead of failing
#[derive(Debug, FromRow)]
struct LedgerRow {
    user_id: String,
    email: String,
    display_name: String,
    plan: String,
    total_tokens_used: i64,
    total_impressions: i64,
    tokens_today: i64,
    impressions_today: i64,
    total_cost: f64,
    is_blocked: bool,
    last_used: DateTime<Utc>,
    created_at: DateTime<Utc>,
    last_reset_date: DateTime<Utc>,
}

impl From<LedgerRow> for UsageRecord {
    fn from(row: LedgerRow) -> Self {
        UsageRecord {
            user_id: row.user_id,
            email: row.email,
            display_name: row.display_name,
            plan: Plan::parse_or_free(&row.plan),
            total_tokens_used: row.total_tokens_used,
            total_impressions: row.total_impressions,
            tokens_today: row.tokens_today,
            impressions_today: row.impressions_today,
            total_cost: row.total_cost,
            is_blocked: row.is_blocked,
            last_used: row.last_used,
            created_at: row.created_at,
            last_reset_date: row.last_reset_date,
        }
    }
}

const ALL_COLUMNS: &str = "user_id, email, display_name, plan, total_tokens_used, \
     total_impressions, tokens_today, impressions_today, total_cost, is_blocked, \
     last_used, created_at, last_reset_date";

impl PostgresLedgerRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for PostgresLedgerRepository {
    async fn get(&self, user_id: &str) -> AppResult<Option<UsageRecord>> {
        let row = sqlx::query_as::<_, LedgerRow>(&format!(
            "SELECT {ALL_COLUMNS} FROM usage_ledger WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UsageRecord::from))
    }

    async fn ensure(
        &self,
        user_id: &str,
        email: &str,
        display_name: &str,
    ) -> AppResult<UsageRecord> {
        let row = sqlx::query_as::<_, LedgerRow>(&format!(
            r#"
            INSERT INTO usage_ledger ({ALL_COLUMNS})
            VALUES ($1, $2, $3, 'free', 0, 0, 0, 0, 0, false, now(), now(), now())
            ON CONFLICT (user_id) DO UPDATE SET
                email = CASE WHEN $2 <> '' THEN $2 ELSE usage_ledger.email END,
                display_name = CASE WHEN $3 <> '' THEN $3 ELSE usage_ledger.display_name END
            RETURNING {ALL_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(email)
        .bind(display_name)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn record_usage(&self, user_id: &str, tokens: i64, cost: f64) -> AppResult<UsageRecord> {
        let row = sqlx::query_as::<_, LedgerRow>(&format!(
            r#"
            INSERT INTO usage_ledger ({ALL_COLUMNS})
            VALUES ($1, '', '', 'free', $2, 1, $2, 1, $3, false, now(), now(), now())
            ON CONFLICT (user_id) DO UPDATE SET
                total_tokens_used = usage_ledger.total_tokens_used + $2,
                total_impressions = usage_ledger.total_impressions + 1,
                tokens_today = CASE
                    WHEN usage_ledger.last_reset_date::date < CURRENT_DATE THEN $2
                    ELSE usage_ledger.tokens_today + $2
                END,
                impressions_today = CASE
                    WHEN usage_ledger.last_reset_date::date < CURRENT_DATE THEN 1
                    ELSE usage_ledger.impressions_today + 1
                END,
                last_reset_date = CASE
                    WHEN usage_ledger.last_reset_date::date < CURRENT_DATE THEN now()
                    ELSE usage_ledger.last_reset_date
                END,
                total_cost = usage_ledger.total_cost + $3,
                last_used = now()
            RETURNING {ALL_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(tokens)
        .bind(cost)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn reset_usage(&self, user_id: &str) -> AppResult<()> {
        sqlx::query(&format!(
            r#"
            INSERT INTO usage_ledger ({ALL_COLUMNS})
            VALUES ($1, '', '', 'free', 0, 0, 0, 0, 0, false, now(), now(), now())
            ON CONFLICT (user_id) DO UPDATE SET
                total_tokens_used = 0,
                total_impressions = 0,
                tokens_today = 0,
                impressions_today = 0,
                total_cost = 0,
                last_reset_date = now()
            "#
        ))
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn set_plan(&self, user_id: &str, plan: Plan) -> AppResult<()> {
        sqlx::query(&format!(
            r#"
            INSERT INTO usage_ledger ({ALL_COLUMNS})
            VALUES ($1, '', '', $2, 0, 0, 0, 0, 0, false, now(), now(), now())
            ON CONFLICT (user_id) DO UPDATE SET plan = $2
            "#
        ))
        .bind(user_id)
        .bind(plan.to_string())
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn set_blocked(&self, user_id: &str, blocked: bool) -> AppResult<()> {
        sqlx::query(&format!(
            r#"
            INSERT INTO usage_ledger ({ALL_COLUMNS})
            VALUES ($1, '', '', 'free', 0, 0, 0, 0, 0, $2, now(), now(), now())
            ON CONFLICT (user_id) DO UPDATE SET is_blocked = $2
            "#
        ))
        .bind(user_id)
        .bind(blocked)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn all(&self) -> AppResult<Vec<UsageRecord>> {
        let rows = sqlx::query_as::<_, LedgerRow>(&format!(
            "SELECT {ALL_COLUMNS} FROM usage_ledger ORDER BY last_used DESC"
        ))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UsageRecord::from).collect())
    }
}
