use crate::record::HistoryRecord;
use async_trait::async_trait;
use ds_core::Result;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Persist `record`, replacing any record with the same id.
    async fn save(&self, record: &HistoryRecord) -> Result<()>;

    /// `DsError::HistoryNotFound` when no record has this id.
    async fn get(&self, id: &str) -> Result<HistoryRecord>;

    /// At most `limit` records, newest first.
    async fn list(&self, limit: usize) -> Result<Vec<HistoryRecord>>;

    async fn delete(&self, id: &str) -> Result<()>;
}
