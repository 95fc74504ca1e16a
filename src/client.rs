use core::fmt;

use bytes::Bytes;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::history::{HistoryEntry, HistoryStore};
use crate::kv::KvBackend;
use crate::response::{RefKind, StoreResponse, StoredBlob};
use crate::transport::Transport;

/// The result of a successful store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub blob_id: String,
    pub end_epoch: u64,
    pub sui_ref: String,
    pub ref_kind: RefKind,
    pub explorer_url: String,
    /// Where the blob can be read back from the aggregator.
    pub blob_url: String,
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "blob id: {}", self.blob_id)?;
        writeln!(f, "stored until epoch: {}", self.end_epoch)?;
        writeln!(f, "sui {}: {}", self.ref_kind, self.sui_ref)?;
        write!(f, "aggregator url: {}", self.blob_url)
    }
}

pub struct BlobClient<T> {
    transport: T,
    config: Config,
}

impl<T: Transport> BlobClient<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    /// Uploads `data` for `epochs` epochs and records it in `history`.
    pub async fn store<B: KvBackend>(
        &self,
        history: &HistoryStore<B>,
        data: &str,
        epochs: u32,
    ) -> Result<UploadOutcome> {
        let outcome = self.publish(data, epochs).await?;

        let entry = HistoryEntry {
            blob_id: outcome.blob_id.clone(),
            preview: data.trim().chars().take(self.config.preview_len).collect(),
            end_epoch: outcome.end_epoch,
            explorer_url: outcome.explorer_url.clone(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        history.insert(entry)?;

        Ok(outcome)
    }

    /// Uploads `data` without touching any history.
    pub async fn publish(&self, data: &str, epochs: u32) -> Result<UploadOutcome> {
        let data = data.trim();
        if data.is_empty() {
            return Err(Error::validation("nothing to store"));
        }

        let url = self.config.store_url(epochs);
        tracing::debug!(%url, len = data.len(), "storing blob");
        let response = self
            .transport
            .put(&url, Bytes::copy_from_slice(data.as_bytes()))
            .await?;

        if !response.status.is_success() {
            return Err(Error::Service {
                status: response.status,
                body: Some(response.text()),
            });
        }

        let StoredBlob {
            blob_id,
            end_epoch,
            sui_ref,
            ref_kind,
        } = StoreResponse::parse(&response.body)?.into_stored_blob();

        if blob_id.trim().is_empty() {
            return Err(Error::Protocol {
                payload: response.text(),
            });
        }

        tracing::info!(%blob_id, end_epoch, %ref_kind, "stored blob");
        Ok(UploadOutcome {
            explorer_url: ref_kind.explorer_url(&self.config.explorer_url, &sui_ref),
            blob_url: self.config.blob_url(&blob_id),
            blob_id,
            end_epoch,
            sui_ref,
            ref_kind,
        })
    }

    /// Fetches the raw contents of a blob.
    pub async fn retrieve(&self, blob_id: &str) -> Result<String> {
        let blob_id = blob_id.trim();
        if blob_id.is_empty() {
            return Err(Error::validation("enter a blob id"));
        }

        let url = self.config.blob_url(blob_id);
        tracing::debug!(%url, "fetching blob");
        let response = self.transport.get(&url).await?;

        if !response.status.is_success() {
            return Err(Error::Service {
                status: response.status,
                body: None,
            });
        }

        tracing::info!(%blob_id, len = response.body.len(), "fetched blob");
        Ok(response.text())
    }

    /// Fetches the blob of the history entry at `index`, 0 being the most recent.
    pub async fn retrieve_from_history<B: KvBackend>(
        &self,
        history: &HistoryStore<B>,
        index: usize,
    ) -> Result<(HistoryEntry, String)> {
        let entry = history
            .load()
            .into_iter()
            .nth(index)
            .ok_or_else(|| Error::validation(format!("no history entry at {index}")))?;

        let contents = self.retrieve(&entry.blob_id).await?;
        Ok((entry, contents))
    }
}
