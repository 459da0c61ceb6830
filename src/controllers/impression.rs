use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    domain::{
        impression::{
            GenerateImpressionRequest, GenerateImpressionResponse, HistoryResponse,
            ImpressionService,
        },
        shared::UsageResponse,
    },
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

pub struct ImpressionController {
    impression_service: Arc<ImpressionService>,
}

impl ImpressionController {
    pub fn new(impression_service: Arc<ImpressionService>) -> Self {
        Self { impression_service }
    }

    /// POST /generate - Generate an impression from pasted findings
    pub async fn generate(
        State(controller): State<Arc<ImpressionController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<GenerateImpressionRequest>,
    ) -> AppResult<Json<GenerateImpressionResponse>> {
        let result = controller
            .impression_service
            .generate(
                &auth_user.user_id,
                &auth_user.email,
                &auth_user.display_name,
                &request.findings,
                request.format,
            )
            .await
            .map_err(AppError::from)?;

        Ok(Json(GenerateImpressionResponse {
            impression: result.impression,
            token_usage: result.token_usage,
            success: true,
        }))
    }

    /// GET /usage - Current usage against the caller's plan
    pub async fn get_usage(
        State(controller): State<Arc<ImpressionController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<UsageResponse>> {
        let usage = controller
            .impression_service
            .get_usage(&auth_user.user_id)
            .await
            .map_err(AppError::from)?;

        Ok(Json(usage))
    }

    /// GET /history - Past generations, newest first
    pub async fn get_history(
        State(controller): State<Arc<ImpressionController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<HistoryResponse>> {
        let history = controller
            .impression_service
            .get_history(&auth_user.user_id)
            .await
            .map_err(AppError::from)?;

        Ok(Json(HistoryResponse { history }))
    }
}
