use thiserror::Error;

/// Errors returned by the maps provider client.
#[derive(Debug, Error)]
pub enum MapsError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    ///
    /// The request URL is stripped before wrapping so the API key never
    /// reaches logs or responses.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a body-level status other than `"OK"`.
    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: &'static str,
        status: String,
        /// The raw provider body, kept for diagnostics.
        body: serde_json::Value,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
