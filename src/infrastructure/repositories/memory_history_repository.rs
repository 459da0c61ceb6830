use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::history_repository::{HistoryRepository, HISTORY_CAP};
use crate::domain::impression::HistoryEntry;
use crate::error::AppResult;

/// In-memory history backend, newest entries first per user
#[derive(Default)]
pub struct MemoryHistoryRepository {
    entries: RwLock<HashMap<String, Vec<HistoryEntry>>>,
}

impl MemoryHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryRepository for MemoryHistoryRepository {
    async fn append(&self, entry: HistoryEntry) -> AppResult<()> {
        let mut entries = self.entries.write().await;
        let user_entries = entries.entry(entry.user_id.clone()).or_default();
        user_entries.insert(0, entry);
        user_entries.truncate(HISTORY_CAP);
        Ok(())
    }

    async fn list_for(&self, user_id: &str) -> AppResult<Vec<HistoryEntry>> {
        let entries = self.entries.read().await;
        Ok(entries.get(user_id).cloned().unwrap_or_default())
    }
}
