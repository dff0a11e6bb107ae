//! Turning a ready request into a player launch.

use tracing::{debug, info};
use url::Url;
use vidcache_core::{ContentId, Endpoint, MediaService, Result};

use crate::{Player, PlayerExit, PlayerLaunch, ReadyRequest};

/// Resolves titles and stream locations, then hands off to a [`Player`].
pub struct Dispatcher<'a, S> {
    service: &'a S,
}

impl<'a, S: MediaService> Dispatcher<'a, S> {
    pub const fn new(service: &'a S) -> Self {
        Self { service }
    }

    /// Title from the metadata endpoint, or a synthetic one built from the
    /// first eight characters of the content id.
    pub async fn resolve_title(&self, content_id: &ContentId) -> String {
        let title = self
            .service
            .query(Endpoint::Info { content_id })
            .await
            .and_then(|response| response.title)
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty());

        match title {
            Some(title) => title,
            None => {
                debug!("No title for {}, using a synthetic one", content_id.short());
                fallback_title(content_id)
            }
        }
    }

    /// Build the player launch for a ready request.
    pub async fn prepare(&self, ready: &ReadyRequest, passthrough: &[String]) -> PlayerLaunch {
        let title = self.resolve_title(ready.content_id()).await;
        let stream_url = stream_location(self.service.base_url(), ready.stream_path());
        PlayerLaunch {
            title,
            stream_url,
            passthrough: passthrough.to_vec(),
        }
    }

    /// Resolve everything and run the player to completion.
    pub async fn dispatch<P: Player>(
        &self,
        player: &P,
        ready: &ReadyRequest,
        passthrough: &[String],
    ) -> Result<PlayerExit> {
        let launch = self.prepare(ready, passthrough).await;
        info!("Streaming {}", launch.stream_url);
        player.play(&launch).await
    }
}

/// Title used when the service has none.
pub fn fallback_title(content_id: &ContentId) -> String {
    format!("Video {}", content_id.short())
}

/// Fully-qualified stream URL for a service-relative `stream_path`.
///
/// Absolute http(s) URLs pass through; anything else is appended to the
/// base address with exactly one `/` between them.
pub fn stream_location(base: &Url, stream_path: &str) -> String {
    let stream_path = stream_path.trim();
    if let Ok(url) = Url::parse(stream_path) {
        if matches!(url.scheme(), "http" | "https") {
            return url.into();
        }
    }
    format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        stream_path.trim_start_matches('/')
    )
}
