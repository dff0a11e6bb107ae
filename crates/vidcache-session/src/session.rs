//! One fetch-and-watch run, end to end.

use tracing::info;
use vidcache_core::{MediaService, Result, Settings};

use crate::initiator::initiate;
use crate::poll::upstream_failure;
use crate::{Dispatcher, Player, PlayerExit, PlayerLaunch, PollLoop, PollPhase, ReadyRequest};

/// Fetches a URL through the media cache service and plays the result.
pub struct Session<S, P> {
    service: S,
    player: P,
    poll: PollLoop,
}

impl<S: MediaService, P: Player> Session<S, P> {
    pub const fn new(service: S, player: P, poll: PollLoop) -> Self {
        Self {
            service,
            player,
            poll,
        }
    }

    pub const fn from_settings(service: S, player: P, settings: &Settings) -> Self {
        Self::new(service, player, PollLoop::from_settings(settings))
    }

    pub const fn service(&self) -> &S {
        &self.service
    }

    pub const fn player(&self) -> &P {
        &self.player
    }

    /// Request `source_url` and wait until the service has it ready.
    /// Skips polling when the first answer is already terminal.
    pub async fn wait_until_ready(&self, source_url: &str) -> Result<ReadyRequest> {
        let request = initiate(&self.service, source_url).await?;
        if let Some(ready) = ReadyRequest::new(request.clone()) {
            info!("{} is already cached", ready.content_id().short());
            return Ok(ready);
        }
        // Polling re-sends the fetch, which would re-queue a failed download.
        if PollPhase::of(&request) == PollPhase::Failed {
            return Err(upstream_failure(&request));
        }
        self.poll.run(&self.service, request).await
    }

    /// Wait for the video and work out how to play it, without playing.
    pub async fn prepare(&self, source_url: &str, passthrough: &[String]) -> Result<PlayerLaunch> {
        let ready = self.wait_until_ready(source_url).await?;
        Ok(Dispatcher::new(&self.service)
            .prepare(&ready, passthrough)
            .await)
    }

    /// Wait for the video, then play it. The player's exit status is
    /// returned so the caller can relay it.
    pub async fn run(&self, source_url: &str, passthrough: &[String]) -> Result<PlayerExit> {
        let ready = self.wait_until_ready(source_url).await?;
        Dispatcher::new(&self.service)
            .dispatch(&self.player, &ready, passthrough)
            .await
    }
}
