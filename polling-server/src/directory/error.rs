//! Station directory error types.

/// Errors that can occur when querying a station directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check SUPABASE_ANON_KEY")]
    Unauthorized,

    /// Rate limited by the backend
    #[error("rate limited by station directory")]
    RateLimited,

    /// Backend returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Failed to load station data from disk
    #[error("failed to load station data: {message}")]
    Load { message: String },

    /// Client could not be configured
    #[error("invalid directory configuration: {message}")]
    Config { message: String },
}
