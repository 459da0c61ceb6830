use serde::{Deserialize, Serialize};

use super::model::{HistoryEntry, ImpressionFormat, TokenUsage};

/// Request for POST /generate
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateImpressionRequest {
    pub findings: String,
    #[serde(default)]
    pub format: ImpressionFormat,
}

/// Response for POST /generate
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImpressionResponse {
    pub impression: String,
    pub token_usage: TokenUsage,
    pub success: bool,
}

/// Response for GET /history
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}
