//! Session settings, fixed for the lifetime of one run.

use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Default media cache service address.
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// Default pause between two status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default bound on the whole wait for a video to become ready.
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(3600);

/// Default bound on a single HTTP call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default player program.
pub const DEFAULT_PLAYER: &str = "mpv";

/// Settings for one fetch-and-watch session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base address of the media cache service.
    pub server: Url,
    /// Pause between two status polls.
    pub poll_interval: Duration,
    /// Bound on the whole wait.
    pub wait_timeout: Duration,
    /// Bound on each individual HTTP call.
    pub request_timeout: Duration,
    /// Player program to launch once the video is ready.
    pub player: String,
}

impl Settings {
    /// Parse a server address, accepting only http(s) URLs.
    pub fn parse_server(raw: &str) -> Result<Url> {
        let url = Url::parse(raw.trim())
            .map_err(|e| Error::InvalidArgument(format!("server address {raw:?}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidArgument(format!(
                "server address must be http or https, got {raw:?}"
            )));
        }
        Ok(url)
    }

    /// Check that the settings describe a usable session.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.server.scheme(), "http" | "https") {
            return Err(Error::InvalidArgument(format!(
                "server address must be http or https, got {}",
                self.server
            )));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::InvalidArgument(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.wait_timeout.is_zero() {
            return Err(Error::InvalidArgument(
                "wait timeout must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout.is_zero() {
            return Err(Error::InvalidArgument(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        if self.player.trim().is_empty() {
            return Err(Error::InvalidArgument("player must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for Settings {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self {
            server: Url::parse(DEFAULT_SERVER).expect("default server address is valid"),
            poll_interval: DEFAULT_POLL_INTERVAL,
            wait_timeout: DEFAULT_WAIT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            player: DEFAULT_PLAYER.to_string(),
        }
    }
}
