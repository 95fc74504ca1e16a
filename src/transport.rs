use bytes::Bytes;
use reqwest::StatusCode;

use crate::error::{Error, Result};

/// A response as received, before any status handling.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl RawResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// The two HTTP requests the client issues.
///
/// Implementations return `Err` only when no response was received; a
/// non-success status is still a `RawResponse`.
#[async_trait::async_trait]
pub trait Transport {
    async fn put(&self, url: &str, body: Bytes) -> Result<RawResponse>;

    async fn get(&self, url: &str) -> Result<RawResponse>;
}

#[async_trait::async_trait]
impl<T: Transport + Sync + ?Sized> Transport for &T {
    async fn put(&self, url: &str, body: Bytes) -> Result<RawResponse> {
        (**self).put(url, body).await
    }

    async fn get(&self, url: &str) -> Result<RawResponse> {
        (**self).get(url).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn read(response: reqwest::Response) -> Result<RawResponse> {
        let status = response.status();
        let body = response.bytes().await.map_err(Error::Transport)?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn put(&self, url: &str, body: Bytes) -> Result<RawResponse> {
        let response = self
            .client
            .put(url)
            .body(body)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::read(response).await
    }

    async fn get(&self, url: &str) -> Result<RawResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Error::Transport)?;
        Self::read(response).await
    }
}
