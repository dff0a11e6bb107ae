//! Media cache service client implementation.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::{debug, warn};
use url::Url;
use vidcache_core::config::DEFAULT_REQUEST_TIMEOUT;
use vidcache_core::{
    extract_field, Endpoint, Error, HttpError, MediaService, Result, ServiceResponse, Settings,
};

const USER_AGENT: &str = concat!("vidcache/", env!("CARGO_PKG_VERSION"));

/// Upper bound on establishing a connection, independent of the request timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Longest error body excerpt kept in a [`HttpError::StatusError`].
const MAX_ERROR_EXCERPT: usize = 200;

/// HTTP client for the media cache service.
#[derive(Clone)]
pub struct MediaCacheClient {
    /// HTTP client for making requests.
    http: reqwest::Client,
    /// Service base address.
    base_url: Url,
}

impl MediaCacheClient {
    /// Create a client with the default per-request timeout.
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client from session settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::with_timeout(settings.server.clone(), settings.request_timeout)
    }

    /// Create a client whose every request is bounded by `timeout`.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::Http(HttpError::InvalidUrl(base_url.to_string())));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .connect_timeout(timeout.min(CONNECT_TIMEOUT))
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Fetch the raw body of one endpoint.
    pub async fn get(&self, endpoint: Endpoint<'_>) -> Result<String> {
        let url = endpoint.url(&self.base_url)?;
        debug!("GET {url}");
        self.do_request(url).await
    }

    async fn do_request(&self, url: Url) -> Result<String> {
        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Http(HttpError::Timeout)
            } else if e.is_connect() {
                Error::Http(HttpError::ConnectionFailed(e.to_string()))
            } else {
                Error::Network(e.to_string())
            }
        })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http(HttpError::StatusError {
                status: status.as_u16(),
                message: error_excerpt(&body),
            }));
        }

        response.text().await.map_err(|e| {
            if e.is_timeout() {
                Error::Http(HttpError::Timeout)
            } else {
                Error::Network(format!("Failed to read response body: {e}"))
            }
        })
    }
}

impl MediaService for MediaCacheClient {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn query(&self, endpoint: Endpoint<'_>) -> Option<ServiceResponse> {
        match self.get(endpoint).await {
            Ok(body) if body.trim().is_empty() => {
                debug!("{} endpoint returned an empty body", endpoint.name());
                None
            }
            Ok(body) => {
                let response = ServiceResponse::parse(&body);
                if response.is_empty() {
                    debug!(
                        "{} endpoint returned no recognisable fields",
                        endpoint.name()
                    );
                }
                Some(response)
            }
            Err(e) => {
                log_failure(endpoint, &e);
                None
            }
        }
    }
}

/// Missing endpoints and transient network trouble are expected while
/// polling; anything else (e.g. a rejected URL) deserves a warning.
fn log_failure(endpoint: Endpoint<'_>, error: &Error) {
    let expected = error.is_retryable()
        || matches!(
            error,
            Error::Http(HttpError::StatusError {
                status: 404 | 405,
                ..
            })
        );
    if expected {
        debug!("{} endpoint unavailable: {error}", endpoint.name());
    } else {
        warn!("{} endpoint failed: {error}", endpoint.name());
    }
}

/// The service reports errors as `{"detail": "..."}`; fall back to the
/// start of the raw body.
fn error_excerpt(body: &str) -> String {
    if let Some(detail) = extract_field(body, "detail") {
        return detail;
    }
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_EXCERPT) {
        Some((end, _)) => format!("{}...", &trimmed[..end]),
        None => trimmed.to_string(),
    }
}
