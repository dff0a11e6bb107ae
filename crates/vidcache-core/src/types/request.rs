//! One fetch-and-watch session as seen by the client.

use std::fmt;

use crate::{Error, Result, ServiceResponse, Status};

/// Identifier the service assigns to a fetch request.
///
/// Guaranteed non-empty and never the literal `"null"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentId(String);

impl ContentId {
    /// Validate an identifier taken from a service response.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(Error::MissingIdentifier);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used for log lines and fallback titles.
    pub fn short(&self) -> &str {
        self.0
            .char_indices()
            .nth(8)
            .map_or(self.0.as_str(), |(end, _)| &self.0[..end])
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// State of one tracked fetch request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedRequest {
    /// URL the user asked for, passed through untouched.
    pub source_url: String,
    /// Identifier from the first response; never replaced afterwards.
    content_id: ContentId,
    /// Last observed status.
    pub status: Status,
    /// Stream location from the last response, if any.
    pub stream_path: Option<String>,
    /// Last progress or failure text from the service.
    pub message: Option<String>,
}

impl TrackedRequest {
    /// Start tracking from the service's first response.
    ///
    /// Fails with [`Error::MissingIdentifier`] when the response has no
    /// usable hash.
    pub fn from_first_response(
        source_url: impl Into<String>,
        response: &ServiceResponse,
    ) -> Result<Self> {
        let content_id = response
            .hash
            .as_deref()
            .ok_or(Error::MissingIdentifier)
            .and_then(ContentId::new)?;

        let mut request = Self {
            source_url: source_url.into(),
            content_id,
            status: Status::Unknown,
            stream_path: None,
            message: None,
        };
        request.observe(Some(response));
        Ok(request)
    }

    pub const fn content_id(&self) -> &ContentId {
        &self.content_id
    }

    /// Fold the result of one status query into the request.
    ///
    /// `None` means no endpoint answered and marks the request unreachable.
    /// The content id is left untouched.
    pub fn observe(&mut self, response: Option<&ServiceResponse>) {
        match response {
            Some(response) => {
                self.status = response.status();
                self.stream_path = response.stream_path().map(str::to_string);
                self.message = response.message.clone();
            }
            None => {
                self.status = Status::Unreachable;
                self.stream_path = None;
            }
        }
    }

    /// Stream location, only when the service reports the video ready.
    pub fn ready_stream(&self) -> Option<&str> {
        if self.status == Status::Ready {
            self.stream_path.as_deref()
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn response(body: &str) -> ServiceResponse {
        ServiceResponse::parse(body)
    }

    #[test]
    fn test_content_id_validation() {
        assert!(ContentId::new("abc").is_ok());
        assert!(matches!(ContentId::new(""), Err(Error::MissingIdentifier)));
        assert!(matches!(ContentId::new("null"), Err(Error::MissingIdentifier)));
        assert!(matches!(ContentId::new("   "), Err(Error::MissingIdentifier)));
    }

    #[test]
    fn test_content_id_short() {
        let id = ContentId::new("abc123def456").unwrap();
        assert_eq!(id.short(), "abc123de");
        let id = ContentId::new("xyz").unwrap();
        assert_eq!(id.short(), "xyz");
        let id = ContentId::new("ééééééééé").unwrap();
        assert_eq!(id.short(), "éééééééé");
    }

    #[test]
    fn test_from_first_response() {
        let first = response(r#"{"hash":"xyz","status":"processing","message":"queued"}"#);
        let request = TrackedRequest::from_first_response("https://youtu.be/x", &first).unwrap();
        assert_eq!(request.content_id().as_str(), "xyz");
        assert_eq!(request.status, Status::Processing);
        assert_eq!(request.message.as_deref(), Some("queued"));
        assert_eq!(request.ready_stream(), None);
    }

    #[test]
    fn test_from_first_response_without_hash() {
        for body in [r#"{"status":"pending"}"#, r#"{"hash":null}"#, r#"{"hash":"null"}"#] {
            let result = TrackedRequest::from_first_response("u", &response(body));
            assert!(matches!(result, Err(Error::MissingIdentifier)), "{body}");
        }
    }

    #[test]
    fn test_observe_keeps_content_id() {
        let first = response(r#"{"hash":"xyz","status":"processing"}"#);
        let mut request = TrackedRequest::from_first_response("u", &first).unwrap();

        request.observe(Some(&response(
            r#"{"hash":"other","status":"ready","stream_url":"/stream/xyz"}"#,
        )));
        assert_eq!(request.content_id().as_str(), "xyz");
        assert_eq!(request.ready_stream(), Some("/stream/xyz"));

        request.observe(None);
        assert_eq!(request.status, Status::Unreachable);
        assert_eq!(request.ready_stream(), None);
    }

    #[test]
    fn test_ready_requires_stream_path() {
        let first = response(r#"{"hash":"xyz","status":"ready"}"#);
        let request = TrackedRequest::from_first_response("u", &first).unwrap();
        assert_eq!(request.status, Status::Ready);
        assert_eq!(request.ready_stream(), None);
    }
}
