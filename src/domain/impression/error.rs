use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ImpressionServiceError {
    #[error("account suspended")]
    Blocked,
    #[error("token limit reached")]
    QuotaExceeded { used: i64, limit: i64 },
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("generation failed: {0}")]
    Upstream(String),
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for ImpressionServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Blocked => ImpressionServiceError::Blocked,
            AppError::QuotaExceeded { used, limit } => {
                ImpressionServiceError::QuotaExceeded { used, limit }
            }
            AppError::BadRequest(msg) => ImpressionServiceError::Invalid(msg),
            _ => ImpressionServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<ImpressionServiceError> for AppError {
    fn from(err: ImpressionServiceError) -> Self {
        match err {
            ImpressionServiceError::Blocked => AppError::Blocked,
            ImpressionServiceError::QuotaExceeded { used, limit } => {
                AppError::QuotaExceeded { used, limit }
            }
            ImpressionServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ImpressionServiceError::Upstream(msg) => AppError::Upstream(msg),
            ImpressionServiceError::Dependency(msg) => AppError::Internal(msg),
            ImpressionServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
