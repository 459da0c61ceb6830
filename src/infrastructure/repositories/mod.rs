pub mod generation_repository;
pub mod history_repository;
pub mod ledger_repository;
pub mod memory_history_repository;
pub mod memory_ledger_repository;
pub mod openai_generation_repository;
pub mod postgres_history_repository;
pub mod postgres_ledger_repository;

pub use generation_repository::GenerationRepository;
pub use history_repository::{HistoryRepository, HISTORY_CAP};
pub use ledger_repository::LedgerRepository;
pub use memory_history_repository::MemoryHistoryRepository;
pub use memory_ledger_repository::MemoryLedgerRepository;
pub use openai_generation_repository::OpenAiGenerationRepository;
pub use postgres_history_repository::PostgresHistoryRepository;
pub use postgres_ledger_repository::PostgresLedgerRepository;
