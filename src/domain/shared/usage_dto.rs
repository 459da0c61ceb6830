use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::plan::Plan;

/// Response for GET /usage
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageResponse {
    pub tokens_used: i64,
    pub tokens_limit: i64,
    pub impressions_generated: i64,
    pub plan: Plan,
    pub blocked: bool,
    pub resets_at: DateTime<Utc>,
}
