use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use sched_core::TrackFilter;
use tracing_subscriber::EnvFilter;

use sched_cli::commands::{details, groups, show, tracks, util, watch};
use sched_cli::load::load_timeline;
use sched_cli::{Cli, Commands, Config};

/// Load config, applying the `--feed` override.
fn load_config(config_path: Option<&Path>, feed: Option<&str>) -> Result<Config> {
    let mut config = Config::load_from(config_path).context("failed to load configuration")?;
    if let Some(feed) = feed {
        config.feed = feed.to_string();
    }
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let result = runtime.block_on(async_main(cli));
    // A pending stdin read cannot be cancelled; don't wait for it.
    runtime.shutdown_background();
    result
}

async fn async_main(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = load_config(cli.config.as_deref(), cli.feed.as_deref())?;
    if matches!(command, Commands::Watch { .. }) {
        eprintln!("Loading schedule from {}...", config.feed);
    }
    let mut timeline = load_timeline(&config).await?;
    let mut stdout = std::io::stdout();

    match command {
        Commands::Groups => groups::run(&mut stdout, &timeline)?,
        Commands::Tracks => tracks::run(&mut stdout, &timeline)?,
        Commands::Show { track, at, json } => {
            let Ok(filter) = track.parse::<TrackFilter>();
            let now = util::resolve_at(at.as_deref(), Utc::now())?;
            show::run(&mut stdout, &mut timeline, filter, now, json, &Local)?;
        }
        Commands::Details { id } => details::run(&mut stdout, &timeline, &id, &Local)?,
        Commands::Watch { track } => {
            let Ok(filter) = track.parse::<TrackFilter>();
            watch::run(timeline, filter, config.tick_interval()).await?;
        }
    }

    Ok(())
}
