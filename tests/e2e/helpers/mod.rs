use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use radimpression_backend::controllers::{AdminController, ImpressionController};
use radimpression_backend::domain::{
    admin::AdminService, impression::ImpressionService, ledger::LedgerService,
};
use radimpression_backend::infrastructure::http::build_router;
use radimpression_backend::infrastructure::repositories::{
    GenerationRepository, LedgerRepository, MemoryHistoryRepository, MemoryLedgerRepository,
};

pub mod api_client;

use api_client::TestClient;
use mock_generation::MockGenerationRepository;

/// The allow-listed admin for all e2e tests
pub const ADMIN_EMAIL: &str = "admin@radimpression.tech";

/// Identity headers forwarded with a request
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

impl Identity {
    pub fn user(user_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            email: format!("{}@clinic.org", user_id),
            display_name: "Dr. Test".to_string(),
        }
    }

    pub fn admin() -> Self {
        Self {
            user_id: "admin-user".to_string(),
            email: ADMIN_EMAIL.to_string(),
            display_name: "Admin".to_string(),
        }
    }
}

pub struct TestContext {
    pub client: TestClient,
    /// Direct handle on the ledger for arranging and asserting state
    pub ledger: Arc<LedgerService>,
}

impl TestContext {
    /// App instance with a generation mock that always succeeds
    pub async fn new() -> Result<Self> {
        Self::with_generation(Arc::new(MockGenerationRepository::succeeding())).await
    }

    /// App instance around a custom generation collaborator
    pub async fn with_generation(generation: Arc<dyn GenerationRepository>) -> Result<Self> {
        let ledger_repo: Arc<dyn LedgerRepository> = Arc::new(MemoryLedgerRepository::new());
        let ledger = Arc::new(LedgerService::new(ledger_repo));

        let impression_service = Arc::new(ImpressionService::new(
            ledger.clone(),
            generation,
            Arc::new(MemoryHistoryRepository::new()),
            Duration::from_secs(5),
        ));
        let admin_service = Arc::new(AdminService::new(
            ledger.clone(),
            vec![ADMIN_EMAIL.to_string()],
        ));

        let app = build_router(
            None,
            Arc::new(ImpressionController::new(impression_service)),
            Arc::new(AdminController::new(admin_service)),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for the server to accept connections
        tokio::time::sleep(Duration::from_millis(50)).await;

        Ok(Self {
            client: TestClient::new(&format!("http://{}", addr)),
            ledger,
        })
    }
}
