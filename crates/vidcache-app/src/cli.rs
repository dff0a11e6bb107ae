//! Command-line interface.

use std::time::Duration;

use clap::Parser;
use url::Url;
use vidcache_core::config::{
    DEFAULT_PLAYER, DEFAULT_POLL_INTERVAL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SERVER,
    DEFAULT_WAIT_TIMEOUT,
};
use vidcache_core::Settings;

#[derive(Debug, Parser)]
#[command(
    name = "vidcache",
    about = "Fetch a video through a media cache service and play it with mpv.",
    version
)]
pub struct Cli {
    /// Media cache service address.
    #[arg(long, env = "VIDCACHE_SERVER", default_value = DEFAULT_SERVER, value_parser = parse_server)]
    pub server: Url,

    /// Seconds between status polls.
    #[arg(long, env = "VIDCACHE_POLL_INTERVAL", value_name = "SECS", default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    pub interval: u64,

    /// Seconds to wait for the video before giving up.
    #[arg(long, env = "VIDCACHE_TIMEOUT", value_name = "SECS", default_value_t = DEFAULT_WAIT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Seconds allowed for each HTTP request.
    #[arg(long, env = "VIDCACHE_REQUEST_TIMEOUT", value_name = "SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub request_timeout: u64,

    /// Player program.
    #[arg(long, env = "VIDCACHE_PLAYER", default_value = DEFAULT_PLAYER)]
    pub player: String,

    /// Print the stream URL instead of launching the player.
    #[arg(long)]
    pub print_url: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Video URL to fetch, then arguments forwarded to the player unchanged.
    ///
    /// Option parsing stops at the URL, so `vidcache URL -v` hands `-v` to
    /// the player.
    #[arg(
        value_name = "URL",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    target: Vec<String>,
}

impl Cli {
    /// The video URL.
    pub fn url(&self) -> &str {
        self.target.first().map_or("", String::as_str)
    }

    /// Everything after the URL.
    pub fn player_args(&self) -> &[String] {
        self.target.split_first().map(|(_, rest)| rest).unwrap_or_default()
    }

    pub fn settings(&self) -> Settings {
        Settings {
            server: self.server.clone(),
            poll_interval: Duration::from_secs(self.interval),
            wait_timeout: Duration::from_secs(self.timeout),
            request_timeout: Duration::from_secs(self.request_timeout),
            player: self.player.clone(),
        }
    }
}

fn parse_server(raw: &str) -> Result<Url, String> {
    Settings::parse_server(raw).map_err(|e| e.to_string())
}
