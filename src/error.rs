use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("Unauthorized - Admin access required")]
    Forbidden,

    #[error("Account temporarily suspended")]
    Blocked,

    #[error("Token limit reached. Please upgrade your plan to continue.")]
    QuotaExceeded { used: i64, limit: i64 },

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Generation failed: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response structure. Carries the extra flags the frontend keys on
/// for blocked and over-quota accounts.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_limit_reached: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<QuotaSnapshot>,
}

/// Usage counters attached to a quota-exceeded error response
#[derive(Debug, Serialize, Deserialize)]
pub struct QuotaSnapshot {
    pub used: i64,
    pub limit: i64,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden | Self::Blocked | Self::QuotaExceeded { .. } => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        let mut response = ErrorResponse {
            error: self.to_string(),
            message: None,
            blocked: None,
            token_limit_reached: None,
            usage: None,
        };

        match self {
            Self::Blocked => {
                response.blocked = Some(true);
                response.message = Some(
                    "Your account has been temporarily suspended. Please email support@radimpression.tech."
                        .to_string(),
                );
            }
            Self::QuotaExceeded { used, limit } => {
                response.token_limit_reached = Some(true);
                response.usage = Some(QuotaSnapshot {
                    used: *used,
                    limit: *limit,
                });
            }
            _ => {}
        }

        response
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(
            error = %self,
            status = %status.as_u16(),
            "Request failed"
        );

        let error_response = self.to_response();

        (status, Json(error_response)).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
