use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    domain::{admin::AdminService, ledger::UsageRecord, plan::Plan},
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    #[serde(default)]
    pub include_seed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminUsersResponse {
    pub users: Vec<UsageRecord>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlockAction {
    Block,
    Unblock,
}

#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    pub action: BlockAction,
}

#[derive(Debug, Deserialize)]
pub struct ChangePlanRequest {
    pub plan: Plan,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminActionResponse {
    pub success: bool,
    pub message: String,
}

pub struct AdminController {
    admin_service: Arc<AdminService>,
}

impl AdminController {
    pub fn new(admin_service: Arc<AdminService>) -> Self {
        Self { admin_service }
    }

    /// GET /admin/users - List ledger records for the admin dashboard
    pub async fn list_users(
        State(controller): State<Arc<AdminController>>,
        Extension(auth_user): Extension<AuthUser>,
        Query(query): Query<ListUsersQuery>,
    ) -> AppResult<Json<AdminUsersResponse>> {
        let users = controller
            .admin_service
            .list_users(&auth_user.email, query.include_seed)
            .await
            .map_err(AppError::from)?;

        Ok(Json(AdminUsersResponse { users }))
    }

    /// POST /admin/users/:userId/block - Block or unblock a user
    pub async fn block(
        State(controller): State<Arc<AdminController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(user_id): Path<String>,
        Json(request): Json<BlockRequest>,
    ) -> AppResult<Json<AdminActionResponse>> {
        let blocked = request.action == BlockAction::Block;
        controller
            .admin_service
            .set_blocked(&auth_user.email, &user_id, blocked)
            .await
            .map_err(AppError::from)?;

        let verb = if blocked { "blocked" } else { "unblocked" };
        Ok(Json(AdminActionResponse {
            success: true,
            message: format!("User {} successfully", verb),
        }))
    }

    /// POST /admin/users/:userId/reset-usage - Zero a user's counters
    pub async fn reset_usage(
        State(controller): State<Arc<AdminController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(user_id): Path<String>,
    ) -> AppResult<Json<AdminActionResponse>> {
        controller
            .admin_service
            .reset_usage(&auth_user.email, &user_id)
            .await
            .map_err(AppError::from)?;

        Ok(Json(AdminActionResponse {
            success: true,
            message: "User usage reset successfully".to_string(),
        }))
    }

    /// POST /admin/users/:userId/plan - Move a user to another plan
    pub async fn change_plan(
        State(controller): State<Arc<AdminController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(user_id): Path<String>,
        Json(request): Json<ChangePlanRequest>,
    ) -> AppResult<Json<AdminActionResponse>> {
        controller
            .admin_service
            .change_plan(&auth_user.email, &user_id, request.plan)
            .await
            .map_err(AppError::from)?;

        Ok(Json(AdminActionResponse {
            success: true,
            message: format!("User plan updated to {}", request.plan),
        }))
    }
}
