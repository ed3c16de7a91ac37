use crate::record::{sort_newest_first, HistoryRecord};
use crate::traits::HistoryStore;
use async_trait::async_trait;
use ds_core::{DsError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    inner: Arc<RwLock<HashMap<String, HistoryRecord>>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn save(&self, record: &HistoryRecord) -> Result<()> {
        self.inner.write().await.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<HistoryRecord> {
        self.inner
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| DsError::HistoryNotFound { id: id.to_string() })
    }

    async fn list(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let mut records: Vec<HistoryRecord> = self.inner.read().await.values().cloned().collect();
        sort_newest_first(&mut records);
        records.truncate(limit);
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.inner.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DsError::HistoryNotFound { id: id.to_string() }),
        }
    }
}
