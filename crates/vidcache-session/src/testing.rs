//! In-memory service and player doubles for engine tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, VecDeque};

use parking_lot::Mutex;
use url::Url;
use vidcache_core::{Endpoint, MediaService, Result, ServiceResponse};

use crate::{Player, PlayerExit, PlayerLaunch};

/// Answers each endpoint from its own script. The last scripted answer of
/// an endpoint repeats forever; an endpoint without a script never answers.
pub struct ScriptedService {
    base: Url,
    scripts: Mutex<HashMap<&'static str, VecDeque<Option<ServiceResponse>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self {
            base: Url::parse("http://localhost:8000").unwrap(),
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue answers for an endpoint (`"video"`, `"status"`, `"info"`).
    /// A `None` body means the endpoint gave no usable response.
    pub fn script(self, endpoint: &'static str, bodies: &[Option<&str>]) -> Self {
        self.scripts.lock().entry(endpoint).or_default().extend(
            bodies
                .iter()
                .map(|body| body.map(ServiceResponse::parse)),
        );
        self
    }

    /// Endpoint names in the order they were queried.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == endpoint).count()
    }
}

impl MediaService for ScriptedService {
    fn base_url(&self) -> &Url {
        &self.base
    }

    async fn query(&self, endpoint: Endpoint<'_>) -> Option<ServiceResponse> {
        self.calls.lock().push(endpoint.name().to_string());
        let mut scripts = self.scripts.lock();
        let script = scripts.get_mut(endpoint.name())?;
        if script.len() > 1 {
            script.pop_front().flatten()
        } else {
            script.front().cloned().flatten()
        }
    }
}

/// Records launches instead of spawning a process.
pub struct RecordingPlayer {
    exit: PlayerExit,
    launches: Mutex<Vec<PlayerLaunch>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::exiting_with(Some(0))
    }

    pub fn exiting_with(code: Option<i32>) -> Self {
        Self {
            exit: PlayerExit { code },
            launches: Mutex::new(Vec::new()),
        }
    }

    pub fn launches(&self) -> Vec<PlayerLaunch> {
        self.launches.lock().clone()
    }
}

impl Player for RecordingPlayer {
    async fn play(&self, launch: &PlayerLaunch) -> Result<PlayerExit> {
        self.launches.lock().push(launch.clone());
        Ok(self.exit)
    }
}
