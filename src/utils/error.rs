use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("Endpoint {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("Unexpected reference data: {0}")]
    ReferenceData(String),

    #[error("Failed to encode form record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
