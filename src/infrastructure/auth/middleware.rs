use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::AppError;

/// User context injected into request extensions after identity extraction
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

/// Identity middleware.
///
/// The frontend authenticates the user (Google or demo sign-in) and forwards
/// the resulting identity in headers; this service trusts those values
/// verbatim, exactly like the upstream deployment it fronts. `x-user-id` is
/// required, the rest default to placeholders.
pub async fn identity_middleware(mut request: Request, next: Next) -> Result<Response, AppError> {
    let headers = request.headers();

    let user_id = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing x-user-id header".to_string()))?
        .to_string();

    let email = headers
        .get("x-user-email")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("unknown@email.com")
        .to_string();

    let display_name = headers
        .get("x-user-name")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("Unknown User")
        .to_string();

    request.extensions_mut().insert(AuthUser {
        user_id,
        email,
        display_name,
    });

    Ok(next.run(request).await)
}
