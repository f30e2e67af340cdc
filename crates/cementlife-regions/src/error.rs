use thiserror::Error;

/// Errors from a single region endpoint. The client turns all of them into a
/// fallback attempt or an empty list; they never reach storefront callers.
#[derive(Debug, Error)]
pub enum RegionError {
    /// Network or TLS failure, or a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Valid JSON, but neither a list nor an object wrapping one.
    #[error("no region list in response from {url}")]
    UnexpectedShape { url: String },

    #[error("invalid region endpoint URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
