//! # vidcache-client
//!
//! HTTP client for the media cache service.
//!
//! The service exposes three status-bearing endpoints (`/video`, `/status`,
//! `/info`) that all answer with the same flat JSON object. This crate turns
//! them into a [`vidcache_core::MediaService`].

pub mod client;

pub use client::MediaCacheClient;
