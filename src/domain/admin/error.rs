use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("admin access required")]
    Forbidden,
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<AppError> for AdminServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Forbidden => AdminServiceError::Forbidden,
            AppError::BadRequest(msg) => AdminServiceError::Invalid(msg),
            _ => AdminServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<AdminServiceError> for AppError {
    fn from(err: AdminServiceError) -> Self {
        match err {
            AdminServiceError::Forbidden => AppError::Forbidden,
            AdminServiceError::Invalid(msg) => AppError::BadRequest(msg),
            AdminServiceError::Dependency(msg) => AppError::Internal(msg),
        }
    }
}
