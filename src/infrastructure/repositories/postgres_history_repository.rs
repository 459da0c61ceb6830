use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

use super::history_repository::{HistoryRepository, HISTORY_CAP};
use crate::domain::impression::{HistoryEntry, ImpressionFormat, TokenUsage};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;

/// Durable history backend on Postgres. The per-user retention cap is
/// enforced on append so the table cannot grow unbounded.
pub struct PostgresHistoryRepository {
    pool: Arc<DbPool>,
}

#[derive(Debug, FromRow)]
struct HistoryRow {
    id: Uuid,
    user_id: String,
    findings: String,
    impression: String,
    prompt_tokens: i64,
    completion_tokens: i64,
    total_tokens: i64,
    cost: f64,
    format: String,
    model: String,
    created_at: DateTime<Utc>,
}

impl From<HistoryRow> for HistoryEntry {
    fn from(row: HistoryRow) -> Self {
        let format = if row.format == "short" {
            ImpressionFormat::Short
        } else {
            ImpressionFormat::Formal
        };
        HistoryEntry {
            id: row.id,
            user_id: row.user_id,
            findings: row.findings,
            impression: row.impression,
            token_usage: TokenUsage {
                prompt_tokens: row.prompt_tokens,
                completion_tokens: row.completion_tokens,
                total_tokens: row.total_tokens,
                cost: row.cost,
                model: row.model.clone(),
                format,
            },
            model: row.model,
            created_at: row.created_at,
        }
    }
}

impl PostgresHistoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryRepository for PostgresHistoryRepository {
    async fn append(&self, entry: HistoryEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO impression_history
                (id, user_id, findings, impression, prompt_tokens, completion_tokens,
                 total_tokens, cost, format, model, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.user_id)
        .bind(&entry.findings)
        .bind(&entry.impression)
        .bind(entry.token_usage.prompt_tokens)
        .bind(entry.token_usage.completion_tokens)
        .bind(entry.token_usage.total_tokens)
        .bind(entry.token_usage.cost)
        .bind(entry.token_usage.format.to_string())
        .bind(&entry.model)
        .bind(entry.created_at)
        .execute(self.pool.as_ref())
        .await?;

        // Prune anything past the retention cap for this user
        sqlx::query(
            r#"
            DELETE FROM impression_history
            WHERE user_id = $1 AND id NOT IN (
                SELECT id FROM impression_history
                WHERE user_id = $1
                ORDER BY created_at DESC
                LIMIT $2
            )
            "#,
        )
        .bind(&entry.user_id)
        .bind(HISTORY_CAP as i64)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list_for(&self, user_id: &str) -> AppResult<Vec<HistoryEntry>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT id, user_id, findings, impression, prompt_tokens, completion_tokens,
                   total_tokens, cost, format, model, created_at
            FROM impression_history
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(HISTORY_CAP as i64)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(HistoryEntry::from).collect())
    }
}
