use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::db::{check_connection, DbPool};

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Readiness depends on the configured ledger backend: the in-memory
/// backend is always ready, the Postgres backend needs a live connection
pub async fn health_ready(State(pool): State<Option<Arc<DbPool>>>) -> impl IntoResponse {
    match &pool {
        None => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "ledger": "memory"
            })),
        ),
        Some(pool) => match check_connection(pool).await {
            Ok(_) => (
                StatusCode::OK,
                Json(json!({
                    "status": "ready",
                    "ledger": "postgres",
                    "database": "connected"
                })),
            ),
            Err(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "ledger": "postgres",
                    "database": "disconnected"
                })),
            ),
        },
    }
}
