//! The first request of a session.

use tracing::{debug, info};
use vidcache_core::{Endpoint, Error, MediaService, Result, TrackedRequest};

/// Ask the service to fetch `source_url` and start tracking the request.
///
/// Unlike later polls, silence here is fatal: the service is assumed down.
/// The returned request may already be ready; check
/// [`TrackedRequest::ready_stream`].
pub async fn initiate<S: MediaService>(service: &S, source_url: &str) -> Result<TrackedRequest> {
    debug!("Requesting {source_url} from {}", service.base_url());

    let response = service
        .query(Endpoint::Video { source_url })
        .await
        .ok_or_else(|| Error::StartupUnreachable(service.base_url().to_string()))?;

    let request = TrackedRequest::from_first_response(source_url, &response)?;

    info!(
        "Tracking {} (status: {})",
        request.content_id().short(),
        request.status
    );
    if let Some(message) = &request.message {
        info!("{message}");
    }

    Ok(request)
}
