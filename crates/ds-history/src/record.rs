use chrono::{DateTime, Utc};
use ds_core::Language;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: String,
    pub filename: String,
    pub language: Language,
    pub content_before: String,
    pub content_after: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryRecord {
    /// New record with a fresh id, stamped now.
    pub fn new(
        filename: impl Into<String>,
        language: Language,
        content_before: impl Into<String>,
        content_after: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            filename: filename.into(),
            language,
            content_before: content_before.into(),
            content_after: content_after.into(),
            created_at: Utc::now(),
        }
    }

    pub fn changed(&self) -> bool {
        self.content_before != self.content_after
    }
}

/// Newest first; ids break ties so the order is stable.
pub(crate) fn sort_newest_first(records: &mut [HistoryRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}
