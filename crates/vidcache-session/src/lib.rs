//! # vidcache-session
//!
//! Fetch, wait, and play engine for vidcache.
//!
//! A session asks the media cache service to fetch a URL, polls until the
//! cached copy is ready, then hands the stream to a local player:
//!
//! - [`initiator`] issues the first request and validates the hash
//! - [`status`] runs one status query across the fallback endpoints
//! - [`poll`] repeats status queries until ready, failed, or timed out
//! - [`dispatch`] resolves a title and launches the [`player`]

pub mod dispatch;
pub mod initiator;
pub mod player;
pub mod poll;
pub mod session;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{stream_location, Dispatcher};
pub use player::{MpvPlayer, Player, PlayerExit, PlayerLaunch};
pub use poll::{PollLoop, PollPhase, PollState, ReadyRequest};
pub use session::Session;
