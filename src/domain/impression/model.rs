use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Output style for the generated impression section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImpressionFormat {
    #[default]
    Formal,
    Short,
}

impl ImpressionFormat {
    /// System prompt sent to the model for this format
    pub fn system_prompt(&self) -> &'static str {
        match self {
            ImpressionFormat::Formal => {
                "You are a board-certified senior and experienced radiologist. Your task is to \
                 generate a formal, concise \"IMPRESSION\" section suitable for inclusion in a \
                 radiology report. Use professional medical language and appropriate clinical \
                 tone. Do not include recommendations, explanations, or findings section. Use \
                 numbered bullet points. Include lesion size only if provided. Classify clearly \
                 whether findings are primary or incidental."
            }
            ImpressionFormat::Short => {
                "You are an experienced senior radiologist. Based on the provided findings, \
                 generate a concise and minimal \"IMPRESSION\" section using medical terms only. \
                 Limit each point to one line. Do not include explanations, recommendations, or \
                 formatting beyond a numbered list. Focus only on the core findings. No headers \
                 or summaries - output should begin directly with the numbered impression."
            }
        }
    }

    /// Completion budget per format; short impressions get half the room
    pub fn max_tokens(&self) -> u32 {
        match self {
            ImpressionFormat::Formal => 800,
            ImpressionFormat::Short => 400,
        }
    }
}

impl std::fmt::Display for ImpressionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpressionFormat::Formal => write!(f, "formal"),
            ImpressionFormat::Short => write!(f, "short"),
        }
    }
}

/// Token counts and cost for one generation, as returned to the client and
/// stored with each history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
    pub cost: f64,
    pub model: String,
    pub format: ImpressionFormat,
}

/// Raw output of the generation collaborator, before pricing
#[derive(Debug, Clone)]
pub struct GeneratedImpression {
    pub text: String,
    pub model: String,
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// Append-only record of one successful generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,
    pub user_id: String,
    pub findings: String,
    pub impression: String,
    pub token_usage: TokenUsage,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(user_id: &str, findings: &str, impression: &str, token_usage: TokenUsage) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            findings: findings.to_string(),
            impression: impression.to_string(),
            model: token_usage.model.clone(),
            token_usage,
            created_at: Utc::now(),
        }
    }
}
