//! A small client for Walrus blob storage.
//!
//! Uploads text to a publisher, reads blobs back from an aggregator, and keeps
//! a short local history of what was stored.

pub mod client;
pub mod config;
pub mod error;
pub mod history;
pub mod kv;
pub mod response;
pub mod transport;

pub use client::{BlobClient, UploadOutcome};
pub use config::Config;
pub use error::{Error, Result};
pub use history::{HistoryEntry, HistoryStore};
pub use response::RefKind;
pub use transport::{ReqwestTransport, Transport};
