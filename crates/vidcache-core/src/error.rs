//! Error types for vidcache.

use std::time::Duration;

use thiserror::Error;

/// Result type alias using vidcache's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for vidcache.
///
/// Every variant is fatal for the session. Transient conditions (an endpoint
/// that does not answer mid-poll, a field that fails to parse) are absorbed
/// before they ever become an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    // Network errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    #[error("Network error: {0}")]
    Network(String),

    // Session errors
    /// The fetch request got no usable answer: the service is down, or it
    /// rejected the request (the client logs the rejection reason).
    #[error("Media cache service at {0} gave no usable answer to the fetch request")]
    StartupUnreachable(String),

    #[error("Service response carried no usable video hash")]
    MissingIdentifier,

    #[error("Download failed: {0}")]
    UpstreamFailure(String),

    #[error("Timed out after {}s waiting for the video (limit {}s)", .elapsed.as_secs(), .limit.as_secs())]
    Timeout { elapsed: Duration, limit: Duration },

    // Player errors
    #[error("Failed to launch player: {0}")]
    PlayerLaunch(String),

    // Generic errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Operation cancelled")]
    Cancelled,
}

/// HTTP-specific errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed with status {status}: {message}")]
    StatusError { status: u16, message: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Returns true if this error is a network condition that may clear up
    /// on the next attempt.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::Http(
                    HttpError::ConnectionFailed(_)
                        | HttpError::Timeout
                        | HttpError::StatusError { status: 500..=599, .. }
                )
        )
    }

    /// Process exit code for a session that ended with this error.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Cancelled => 130,
            _ => 1,
        }
    }
}
