//! One JSON file per record under a directory.

use crate::record::{sort_newest_first, HistoryRecord};
use crate::traits::HistoryStore;
use async_trait::async_trait;
use ds_core::{DsError, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

pub struct FileHistoryStore {
    dir: PathBuf,
}

impl FileHistoryStore {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ids are uuids; anything else cannot name a file we wrote.
    fn path_for(&self, id: &str) -> Result<PathBuf> {
        uuid::Uuid::parse_str(id).map_err(|_| DsError::HistoryNotFound { id: id.to_string() })?;
        Ok(self.dir.join(format!("{id}.json")))
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn save(&self, record: &HistoryRecord) -> Result<()> {
        let path = self.path_for(&record.id)?;
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| DsError::Storage(format!("mkdir {}: {e}", self.dir.display())))?;
        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json.as_bytes())
            .await
            .map_err(|e| DsError::Storage(format!("write {}: {e}", path.display())))?;
        debug!(id = %record.id, path = %path.display(), "history record written");
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<HistoryRecord> {
        let path = self.path_for(id)?;
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(DsError::HistoryNotFound { id: id.to_string() })
            }
            Err(e) => return Err(DsError::Storage(format!("read {}: {e}", path.display()))),
        };
        serde_json::from_str(&content)
            .map_err(|e| DsError::Storage(format!("parse {}: {e}", path.display())))
    }

    async fn list(&self, limit: usize) -> Result<Vec<HistoryRecord>> {
        let mut rd = match fs::read_dir(&self.dir).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(DsError::Storage(format!("ls {}: {e}", self.dir.display()))),
        };

        let mut records = Vec::new();
        while let Some(entry) = rd
            .next_entry()
            .await
            .map_err(|e| DsError::Storage(format!("ls {}: {e}", self.dir.display())))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let parsed = match fs::read_to_string(&path).await {
                Ok(content) => serde_json::from_str::<HistoryRecord>(&content).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            match parsed {
                Ok(record) => records.push(record),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable history record"),
            }
        }

        sort_newest_first(&mut records);
        records.truncate(limit);
        Ok(records)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.path_for(id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(DsError::HistoryNotFound { id: id.to_string() }),
            Err(e) => Err(DsError::Storage(format!("rm {}: {e}", path.display()))),
        }
    }
}
