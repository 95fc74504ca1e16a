pub const DEFAULT_PUBLISHER: &str = "https://publisher.walrus-testnet.walrus.space";
pub const DEFAULT_AGGREGATOR: &str = "https://aggregator.walrus-testnet.walrus.space";
pub const DEFAULT_EXPLORER: &str = "https://suiscan.xyz/testnet";

pub const HISTORY_KEY: &str = "walrus_demo_history";
pub const HISTORY_CAPACITY: usize = 20;
pub const PREVIEW_LEN: usize = 80;

/// Endpoints and limits of a client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub publisher_url: String,
    pub aggregator_url: String,
    pub explorer_url: String,
    pub history_key: String,
    pub history_capacity: usize,
    pub preview_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            publisher_url: DEFAULT_PUBLISHER.into(),
            aggregator_url: DEFAULT_AGGREGATOR.into(),
            explorer_url: DEFAULT_EXPLORER.into(),
            history_key: HISTORY_KEY.into(),
            history_capacity: HISTORY_CAPACITY,
            preview_len: PREVIEW_LEN,
        }
    }
}

impl Config {
    pub fn with_publisher(mut self, url: impl Into<String>) -> Self {
        self.publisher_url = base_url(url);
        self
    }

    pub fn with_aggregator(mut self, url: impl Into<String>) -> Self {
        self.aggregator_url = base_url(url);
        self
    }

    pub fn with_explorer(mut self, url: impl Into<String>) -> Self {
        self.explorer_url = base_url(url);
        self
    }

    pub fn store_url(&self, epochs: u32) -> String {
        format!("{}/v1/blobs?epochs={epochs}", self.publisher_url)
    }

    pub fn blob_url(&self, blob_id: &str) -> String {
        format!("{}/v1/blobs/{blob_id}", self.aggregator_url)
    }
}

fn base_url(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls() {
        let config = Config::default()
            .with_publisher("http://publisher.local/")
            .with_aggregator("http://aggregator.local//");

        assert_eq!(
            config.store_url(5),
            "http://publisher.local/v1/blobs?epochs=5"
        );
        assert_eq!(
            config.blob_url("B1"),
            "http://aggregator.local/v1/blobs/B1"
        );
        assert_eq!(config.history_capacity, 20);
        assert_eq!(config.preview_len, 80);
    }
}
