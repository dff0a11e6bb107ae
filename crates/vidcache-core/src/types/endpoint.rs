//! Service endpoints and the order in which status queries try them.

use std::fmt;

use url::Url;

use crate::{ContentId, HttpError, Result, TrackedRequest};

/// One request against the media cache service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `GET /video?url=<source>`: start (or re-join) a fetch.
    Video { source_url: &'a str },
    /// `GET /status/<hash>`.
    Status { content_id: &'a ContentId },
    /// `GET /info/<hash>`: metadata, including status and title.
    Info { content_id: &'a ContentId },
}

impl Endpoint<'_> {
    /// Resolve against the service base address.
    ///
    /// Path segments are appended after the base path, so a base of
    /// `http://host/api` keeps its `/api` prefix.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| HttpError::InvalidUrl(format!("{base} cannot be a base URL")))?;
            segments.pop_if_empty();
            match self {
                Self::Video { .. } => {
                    segments.push("video");
                }
                Self::Status { content_id } => {
                    segments.extend(["status", content_id.as_str()]);
                }
                Self::Info { content_id } => {
                    segments.extend(["info", content_id.as_str()]);
                }
            }
        }
        if let Self::Video { source_url } = self {
            url.query_pairs_mut().append_pair("url", source_url);
        }
        Ok(url)
    }

    /// Short name for logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Video { .. } => "video",
            Self::Status { .. } => "status",
            Self::Info { .. } => "info",
        }
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video { source_url } => write!(f, "/video?url={source_url}"),
            Self::Status { content_id } => write!(f, "/status/{content_id}"),
            Self::Info { content_id } => write!(f, "/info/{content_id}"),
        }
    }
}

/// Ways to learn the current state of a tracked request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryStrategy {
    /// Repeat the original fetch; the service deduplicates it.
    Refetch,
    /// Ask the status endpoint.
    StatusPath,
    /// Ask the metadata endpoint, which also carries a status.
    InfoPath,
}

impl QueryStrategy {
    /// Order in which a status query tries the strategies.
    pub const FALLBACK_ORDER: [Self; 3] = [Self::Refetch, Self::StatusPath, Self::InfoPath];

    pub fn endpoint(self, request: &TrackedRequest) -> Endpoint<'_> {
        match self {
            Self::Refetch => Endpoint::Video {
                source_url: request.source_url.as_str(),
            },
            Self::StatusPath => Endpoint::Status {
                content_id: request.content_id(),
            },
            Self::InfoPath => Endpoint::Info {
                content_id: request.content_id(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ServiceResponse;

    fn base(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_video_url_encodes_source() {
        let endpoint = Endpoint::Video {
            source_url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42",
        };
        let url = endpoint.url(&base("http://localhost:8000")).unwrap();
        assert_eq!(url.path(), "/video");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "url");
        assert_eq!(pairs[0].1, "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42");
    }

    #[test]
    fn test_hash_paths_keep_base_prefix() {
        let id = ContentId::new("abc123").unwrap();
        let status = Endpoint::Status { content_id: &id }
            .url(&base("http://cache.lan/api/"))
            .unwrap();
        assert_eq!(status.as_str(), "http://cache.lan/api/status/abc123");

        let info = Endpoint::Info { content_id: &id }
            .url(&base("http://localhost:8000"))
            .unwrap();
        assert_eq!(info.as_str(), "http://localhost:8000/info/abc123");
    }

    #[test]
    fn test_fallback_order() {
        let first = ServiceResponse::parse(r#"{"hash":"h1","status":"pending"}"#);
        let request = TrackedRequest::from_first_response("https://youtu.be/x", &first).unwrap();
        let names: Vec<_> = QueryStrategy::FALLBACK_ORDER
            .iter()
            .map(|s| s.endpoint(&request).name())
            .collect();
        assert_eq!(names, ["video", "status", "info"]);
    }
}
