//! Waiting for the service to finish a fetch.
//!
//! Every iteration first checks the elapsed wall time against the timeout,
//! then runs one status query. Anything short of `ready` or `failed` sleeps
//! for the fixed interval and tries again. Time comes from
//! [`tokio::time::Instant`], so tests can pause and advance the clock.

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};
use vidcache_core::{ContentId, Error, MediaService, Result, Settings, Status, TrackedRequest};

use crate::status::query_status;

/// Where a tracked request stands after an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    /// Still being worked on (or status unknown); poll again.
    Pending,
    /// No endpoint answered this time; poll again.
    Unreachable,
    /// Playable stream available.
    Ready,
    /// The service gave up on the download.
    Failed,
}

impl PollPhase {
    /// Classify the last observation of `request`.
    pub fn of(request: &TrackedRequest) -> Self {
        if request.ready_stream().is_some() {
            return Self::Ready;
        }
        match request.status {
            Status::Failed => Self::Failed,
            Status::Unreachable => Self::Unreachable,
            _ => Self::Pending,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

/// Timing of one poll iteration. A fresh value is derived for every
/// iteration; nothing is updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollState {
    started_at: Instant,
    /// Wall time since polling began, as of this iteration.
    pub elapsed: Duration,
    /// 1-based iteration number; 0 before the first iteration.
    pub iteration: u32,
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollState {
    pub const fn new(started_at: Instant, interval: Duration, timeout: Duration) -> Self {
        Self {
            started_at,
            elapsed: Duration::ZERO,
            iteration: 0,
            interval,
            timeout,
        }
    }

    /// State for the next iteration, observed at `now`.
    pub fn next(self, now: Instant) -> Self {
        Self {
            elapsed: now.saturating_duration_since(self.started_at),
            iteration: self.iteration + 1,
            ..self
        }
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed > self.timeout
    }
}

/// The fatal error for a request the service reports `failed`.
pub(crate) fn upstream_failure(request: &TrackedRequest) -> Error {
    let reason = request
        .message
        .clone()
        .unwrap_or_else(|| "the service reported a failed download".to_string());
    Error::UpstreamFailure(reason)
}

/// A request the service reports ready, with its stream location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadyRequest {
    request: TrackedRequest,
    stream_path: String,
}

impl ReadyRequest {
    /// `None` unless the request is ready with a usable stream path.
    pub fn new(request: TrackedRequest) -> Option<Self> {
        let stream_path = request.ready_stream()?.to_string();
        Some(Self {
            request,
            stream_path,
        })
    }

    pub const fn content_id(&self) -> &ContentId {
        self.request.content_id()
    }

    pub fn stream_path(&self) -> &str {
        &self.stream_path
    }

    pub const fn request(&self) -> &TrackedRequest {
        &self.request
    }
}

/// Repeated status queries with a fixed interval and an overall timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollLoop {
    pub interval: Duration,
    pub timeout: Duration,
}

impl PollLoop {
    pub const fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    pub const fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.poll_interval, settings.wait_timeout)
    }

    /// Poll until `request` is ready.
    ///
    /// Fails with [`Error::UpstreamFailure`] when the service reports the
    /// download failed and [`Error::Timeout`] when the wait runs out.
    pub async fn run<S: MediaService>(
        &self,
        service: &S,
        mut request: TrackedRequest,
    ) -> Result<ReadyRequest> {
        let id = request.content_id().short().to_string();
        let mut state = PollState::new(Instant::now(), self.interval, self.timeout);
        let mut last_message = request.message.clone();

        info!("Waiting for {id} (poll every {:?}, timeout {:?})", self.interval, self.timeout);

        loop {
            state = state.next(Instant::now());
            if state.is_expired() {
                info!("Gave up on {id} after {:?}", state.elapsed);
                return Err(Error::Timeout {
                    elapsed: state.elapsed,
                    limit: state.timeout,
                });
            }

            let answer = query_status(service, &request).await;
            if let Some(answer) = &answer {
                if let Some(hash) = answer.response.hash.as_deref() {
                    if hash != request.content_id().as_str() {
                        debug!("{:?} answered for hash {hash}, keeping {id}", answer.strategy);
                    }
                }
            }
            request.observe(answer.as_ref().map(|a| &a.response));

            match PollPhase::of(&request) {
                PollPhase::Ready => {
                    if let Some(ready) = ReadyRequest::new(request.clone()) {
                        info!("{id} is ready after {:?}", state.elapsed);
                        return Ok(ready);
                    }
                }
                PollPhase::Failed => return Err(upstream_failure(&request)),
                PollPhase::Unreachable => {
                    debug!(
                        "Iteration {}: no endpoint answered, retrying in {:?}",
                        state.iteration, state.interval
                    );
                }
                PollPhase::Pending => {
                    if request.status.is_in_progress() {
                        debug!(
                            "Iteration {}: {} ({:?} elapsed)",
                            state.iteration, request.status, state.elapsed
                        );
                    } else {
                        debug!(
                            "Iteration {}: no usable status yet ({:?} elapsed)",
                            state.iteration, state.elapsed
                        );
                    }
                    if let Some(message) = request
                        .message
                        .as_ref()
                        .filter(|m| last_message.as_ref() != Some(*m))
                    {
                        info!("{message}");
                        last_message = Some(message.clone());
                    }
                }
            }

            sleep(state.interval).await;
        }
    }
}
