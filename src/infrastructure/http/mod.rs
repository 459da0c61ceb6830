use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{health, AdminController, ImpressionController};
use crate::infrastructure::auth::{identity_middleware, request_id_middleware};
use crate::infrastructure::config::Config;
use crate::infrastructure::db::DbPool;

/// Assemble the application router. Shared with the e2e tests, which build
/// the same router around mocked collaborators.
pub fn build_router(
    db_pool: Option<Arc<DbPool>>,
    impression_controller: Arc<ImpressionController>,
    admin_controller: Arc<AdminController>,
) -> Router {
    // Generation, usage and history routes (need identity)
    let impression_routes = Router::new()
        .route("/generate", post(ImpressionController::generate))
        .route("/usage", get(ImpressionController::get_usage))
        .route("/history", get(ImpressionController::get_history))
        .with_state(impression_controller)
        .layer(middleware::from_fn(identity_middleware));

    // Admin routes (need identity; the allow-list gate lives in the service)
    let admin_routes = Router::new()
        .route("/admin/users", get(AdminController::list_users))
        .route("/admin/users/:userId/block", post(AdminController::block))
        .route(
            "/admin/users/:userId/reset-usage",
            post(AdminController::reset_usage),
        )
        .route("/admin/users/:userId/plan", post(AdminController::change_plan))
        .with_state(admin_controller)
        .layer(middleware::from_fn(identity_middleware));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(db_pool)
        .merge(impression_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
