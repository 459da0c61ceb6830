use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use radimpression_backend::controllers::{AdminController, ImpressionController};
use radimpression_backend::domain::{
    admin::AdminService, impression::ImpressionService, ledger::LedgerService,
};
use radimpression_backend::infrastructure::config::{Config, LedgerBackend, LogFormat};
use radimpression_backend::infrastructure::db::{
    check_connection, create_pool, ensure_schema, DbPool,
};
use radimpression_backend::infrastructure::http::{build_router, start_http_server};
use radimpression_backend::infrastructure::repositories::{
    HistoryRepository, LedgerRepository, MemoryHistoryRepository, MemoryLedgerRepository,
    OpenAiGenerationRepository, PostgresHistoryRepository, PostgresLedgerRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting RadImpression Backend on {}:{}",
        config.host,
        config.port
    );

    // === LEDGER BACKEND SETUP ===
    let (ledger_repo, history_repo, db_pool): (
        Arc<dyn LedgerRepository>,
        Arc<dyn HistoryRepository>,
        Option<Arc<DbPool>>,
    ) = match config.ledger_backend {
        LedgerBackend::Memory => {
            tracing::info!("Using in-memory ledger backend (state is lost on restart)");
            let ledger_repo = Arc::new(MemoryLedgerRepository::new());
            if config.seed_demo_users {
                ledger_repo.seed_demo_users().await;
            }
            (ledger_repo, Arc::new(MemoryHistoryRepository::new()), None)
        }
        LedgerBackend::Postgres => {
            // Presence of the URL is validated in Config::from_env
            let database_url = config
                .database_url
                .clone()
                .ok_or("DATABASE_URL is required when LEDGER_BACKEND=postgres")?;
            let pool = Arc::new(create_pool(&database_url).await?);
            tracing::info!("Database connection pool created");

            check_connection(&pool).await?;
            tracing::info!("Database connection verified");

            ensure_schema(&pool).await?;
            tracing::info!("Ledger schema ensured");

            (
                Arc::new(PostgresLedgerRepository::new(pool.clone())),
                Arc::new(PostgresHistoryRepository::new(pool.clone())),
                Some(pool),
            )
        }
    };

    // === OPENAI CLIENT ===
    tracing::info!(model = %config.openai_model, "Initializing OpenAI client");
    let openai_client = Arc::new(Client::with_config(
        OpenAIConfig::new().with_api_key(config.openai_api_key.clone()),
    ));
    let generation_repo = Arc::new(OpenAiGenerationRepository::new(
        openai_client,
        config.openai_model.clone(),
    ));

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let ledger_service = Arc::new(LedgerService::new(ledger_repo));
    let impression_service = Arc::new(ImpressionService::new(
        ledger_service.clone(),
        generation_repo,
        history_repo,
        Duration::from_secs(config.generation_timeout_secs),
    ));
    let admin_service = Arc::new(AdminService::new(
        ledger_service.clone(),
        config.admin_emails.clone(),
    ));

    // 2. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let impression_controller = Arc::new(ImpressionController::new(impression_service));
    let admin_controller = Arc::new(AdminController::new(admin_service));

    // Start HTTP server with all routes
    let app = build_router(db_pool, impression_controller, admin_controller);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "radimpression_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "radimpression_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
