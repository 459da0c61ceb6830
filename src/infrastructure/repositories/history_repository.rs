use async_trait::async_trait;

use crate::domain::impression::HistoryEntry;
use crate::error::AppResult;

/// Retention cap per user; older entries are dropped on append
pub const HISTORY_CAP: usize = 50;

/// Append-only log of past generations, kept for display.
/// Entries are never updated; retrieval is newest first.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn append(&self, entry: HistoryEntry) -> AppResult<()>;

    /// Entries for one user, newest first, at most [`HISTORY_CAP`]
    async fn list_for(&self, user_id: &str) -> AppResult<Vec<HistoryEntry>>;
}
