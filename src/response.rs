//! Decoding of publisher store responses.
//!
//! The publisher answers a successful store in one of two shapes: the blob was
//! just registered (`newlyCreated`, pointing at the new Sui object) or it was
//! already certified earlier (`alreadyCertified`, pointing at the certifying
//! transaction). `newlyCreated` takes precedence when both are present.

use core::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Object,
    Transaction,
}

impl RefKind {
    pub fn explorer_url(self, explorer_base: &str, sui_ref: &str) -> String {
        match self {
            Self::Object => format!("{explorer_base}/object/{sui_ref}"),
            Self::Transaction => format!("{explorer_base}/tx/{sui_ref}"),
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Object => "object",
            Self::Transaction => "tx",
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewlyCreated {
    pub blob_object: BlobObject,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobObject {
    /// The Sui object id of the blob.
    pub id: String,
    pub blob_id: String,
    pub storage: Storage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storage {
    pub end_epoch: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlreadyCertified {
    pub blob_id: String,
    pub end_epoch: u64,
    pub event: CertifyEvent,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertifyEvent {
    pub tx_digest: String,
}

#[derive(Debug)]
pub enum StoreResponse {
    NewlyCreated(NewlyCreated),
    AlreadyCertified(AlreadyCertified),
}

/// The parts of a store response the client cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    pub blob_id: String,
    pub end_epoch: u64,
    pub sui_ref: String,
    pub ref_kind: RefKind,
}

impl StoreResponse {
    pub fn parse(body: &[u8]) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(|_| Error::Protocol {
                payload: String::from_utf8_lossy(body).into_owned(),
            })?;
        let protocol_error = || Error::Protocol {
            payload: value.to_string(),
        };

        let shape = |key: &str| value.get(key).filter(|found| !found.is_null());

        if let Some(created) = shape("newlyCreated") {
            let created = NewlyCreated::deserialize(created).map_err(|_| protocol_error())?;
            return Ok(Self::NewlyCreated(created));
        }
        if let Some(certified) = shape("alreadyCertified") {
            let certified =
                AlreadyCertified::deserialize(certified).map_err(|_| protocol_error())?;
            return Ok(Self::AlreadyCertified(certified));
        }

        Err(protocol_error())
    }

    pub fn into_stored_blob(self) -> StoredBlob {
        match self {
            Self::NewlyCreated(NewlyCreated { blob_object }) => StoredBlob {
                blob_id: blob_object.blob_id,
                end_epoch: blob_object.storage.end_epoch,
                sui_ref: blob_object.id,
                ref_kind: RefKind::Object,
            },
            Self::AlreadyCertified(certified) => StoredBlob {
                blob_id: certified.blob_id,
                end_epoch: certified.end_epoch,
                sui_ref: certified.event.tx_digest,
                ref_kind: RefKind::Transaction,
            },
        }
    }
}
