//! # vidcache
//!
//! Asks a media cache service to fetch a video, waits until the cached copy
//! is ready, then plays it with mpv.

mod cli;

use std::future::Future;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidcache_client::MediaCacheClient;
use vidcache_core::Error;
use vidcache_session::{MpvPlayer, Player, Session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            let code = e.downcast_ref::<Error>().map_or(1, Error::exit_code);
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "vidcache=debug,vidcache_app=debug,vidcache_session=debug,vidcache_client=debug"
    } else {
        "vidcache=info,vidcache_app=info,vidcache_session=info,vidcache_client=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();
}

/// Run one session and return the process exit code.
async fn run(cli: Cli) -> Result<u8> {
    let settings = cli.settings();
    settings.validate()?;
    debug!("Settings: {settings:?}");

    info!("vidcache v{} using {}", env!("CARGO_PKG_VERSION"), settings.server);

    let client = MediaCacheClient::from_settings(&settings)?;
    let session = Session::from_settings(client, MpvPlayer::new(&settings.player), &settings);

    // Ctrl-C aborts everything up to the player launch, title lookup included.
    let launch = cancellable(session.prepare(cli.url(), cli.player_args())).await?;

    if cli.print_url {
        info!("Title: {}", launch.title);
        println!("{}", launch.stream_url);
        return Ok(0);
    }

    // The player owns the terminal from here on, including Ctrl-C.
    info!("Streaming {}", launch.stream_url);
    let exit = session.player().play(&launch).await?;

    // The player's own exit status becomes ours.
    if !exit.success() {
        debug!("Player exited with {:?}", exit.code);
    }
    Ok(exit.exit_code())
}

/// Abort the wait on Ctrl-C.
async fn cancellable<T>(
    work: impl Future<Output = vidcache_core::Result<T>>,
) -> vidcache_core::Result<T> {
    tokio::select! {
        result = work => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            Err(Error::Cancelled)
        }
    }
}
