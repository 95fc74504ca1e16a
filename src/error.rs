use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input was rejected before anything went over the wire.
    #[error("{0}")]
    Validation(String),

    /// The publisher or aggregator answered with a non-success status.
    #[error("{}", service_message(.status, .body))]
    Service {
        status: StatusCode,
        body: Option<String>,
    },

    /// A success status, but the body matched none of the known shapes.
    #[error("unexpected response shape: {payload}")]
    Protocol { payload: String },

    /// No response was received at all.
    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    /// Writing the history failed.
    #[error("failed to persist history: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

fn service_message(status: &StatusCode, body: &Option<String>) -> String {
    match body {
        Some(body) => format!("service returned {}: {body}", status.as_u16()),
        None => format!("service returned {}", status.as_u16()),
    }
}
