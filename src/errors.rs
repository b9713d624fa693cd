use thiserror::Error;

/// All errors that can occur while talking to OneTimeSecret.
#[derive(Debug, Error)]
pub enum OtsError {
    // --- Request construction ---
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    // --- Exchange errors ---
    #[error("Transport error: {0}")]
    Transport(#[source] ureq::Error),

    #[error("Failed to read response body: {0}")]
    Read(#[source] ureq::Error),

    #[error("Failed to decode response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    // --- Service state ---
    #[error("OneTimeSecret is offline, try again later")]
    ServiceUnavailable,

    // --- Config errors ---
    #[error("Config error: {0}")]
    Config(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for client results.
pub type Result<T> = std::result::Result<T, OtsError>;
