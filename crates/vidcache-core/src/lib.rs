//! # vidcache-core
//!
//! Core types, traits, and error handling for the vidcache media-cache client.

pub mod config;
pub mod error;
pub mod service;
pub mod types;

pub use config::Settings;
pub use error::{Error, HttpError, Result};
pub use service::MediaService;
pub use types::*;
