//! Launching the local media player.

use std::future::Future;
use std::io::ErrorKind;

use tokio::process::Command;
use tracing::{debug, info};
use vidcache_core::{Error, Result};

/// Environment variable that names the player program.
pub const PLAYER_ENV_KEY: &str = "VIDCACHE_PLAYER";

/// Everything a player needs to start playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLaunch {
    /// Display title.
    pub title: String,
    /// Fully-qualified stream URL.
    pub stream_url: String,
    /// Extra arguments from the command line, forwarded untouched.
    pub passthrough: Vec<String>,
}

/// How the player process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerExit {
    /// Exit code; `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl PlayerExit {
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// The player's exit code, relayed as this program's exit code.
    pub fn exit_code(&self) -> u8 {
        self.code.and_then(|c| u8::try_from(c).ok()).unwrap_or(1)
    }
}

/// A local program that can play a stream.
pub trait Player {
    /// Start playback and wait for the player to exit.
    fn play(&self, launch: &PlayerLaunch) -> impl Future<Output = Result<PlayerExit>>;
}

/// mpv, or any player accepting `--force-media-title=<title> <url>`.
#[derive(Debug, Clone)]
pub struct MpvPlayer {
    program: String,
}

impl MpvPlayer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, launch: &PlayerLaunch) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(format!("--force-media-title={}", launch.title));
        cmd.arg(&launch.stream_url);
        cmd.args(&launch.passthrough);
        cmd
    }
}

impl Default for MpvPlayer {
    fn default() -> Self {
        Self::new(vidcache_core::config::DEFAULT_PLAYER)
    }
}

impl Player for MpvPlayer {
    async fn play(&self, launch: &PlayerLaunch) -> Result<PlayerExit> {
        info!("Playing \"{}\" with {}", launch.title, self.program);
        debug!(
            "Player arguments: {} {:?}",
            launch.stream_url, launch.passthrough
        );

        let status = self.command(launch).status().await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::PlayerLaunch(format!(
                    "player '{}' not found. Install mpv or set {PLAYER_ENV_KEY} to a valid command.",
                    self.program
                ))
            } else {
                Error::PlayerLaunch(format!("{}: {e}", self.program))
            }
        })?;

        debug!("Player exited with {status}");
        Ok(PlayerExit {
            code: status.code(),
        })
    }
}
