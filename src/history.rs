use serde::{Deserialize, Serialize};

use crate::config::{HISTORY_CAPACITY, HISTORY_KEY};
use crate::error::{Error, Result};
use crate::kv::KvBackend;

/// One past upload, as shown in the history list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub blob_id: String,
    /// The leading characters of the uploaded text.
    pub preview: String,
    pub end_epoch: u64,
    #[serde(alias = "suiUrl")]
    pub explorer_url: String,
    /// Upload time in milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Recent uploads, most recent first, deduplicated by blob id.
///
/// The whole list lives under a single key and is rewritten on every insert.
#[derive(Debug)]
pub struct HistoryStore<B> {
    backend: B,
    key: String,
    capacity: usize,
}

impl<B: KvBackend> HistoryStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            key: HISTORY_KEY.into(),
            capacity: HISTORY_CAPACITY,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Reads the persisted history. Anything unreadable counts as no history.
    pub fn load(&self) -> Vec<HistoryEntry> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, key = %self.key, "failed to read history");
                return Vec::new();
            }
        };

        serde_json::from_slice(&raw).unwrap_or_else(|err| {
            tracing::warn!(error = %err, key = %self.key, "discarding unreadable history");
            Vec::new()
        })
    }

    /// Puts `entry` at the front, dropping an older entry with the same blob id
    /// and anything past capacity, then persists and returns the new list.
    pub fn insert(&self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.load();
        entries.retain(|existing| existing.blob_id != entry.blob_id);
        entries.insert(0, entry);
        entries.truncate(self.capacity);

        let raw = serde_json::to_vec(&entries).map_err(|err| Error::Persistence(err.into()))?;
        self.backend
            .set(&self.key, raw)
            .map_err(|err| Error::Persistence(err.into()))?;

        Ok(entries)
    }
}
