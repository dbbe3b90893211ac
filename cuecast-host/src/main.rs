//! cuecast-host - Load a playlist module and run one host session
//!
//! Resolves configuration, loads the configured module from the registry,
//! pulls the requested number of tracks and logs what a streaming daemon
//! would publish for each of them.

use anyhow::{Context, Result};
use clap::Parser;
use cuecast_common::config::ConfigResolver;
use cuecast_common::EventBus;
use cuecast_host::{session, PlaylistHost, SessionOptions};
use cuecast_pm::ModuleRegistry;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Playlist module host
#[derive(Parser, Debug)]
#[command(name = "cuecast-host", version, about)]
struct Args {
    /// Playlist module to load (overrides CUECAST_MODULE and the config file)
    #[arg(short, long)]
    module: Option<String>,

    /// Number of tracks to pull before shutdown
    #[arg(short, long)]
    tracks: Option<u32>,

    /// Config file path (overrides CUECAST_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not sleep through metadata publish delays
    #[arg(long)]
    no_delay: bool,

    /// List registered modules and exit
    #[arg(long)]
    list_modules: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let resolver = ConfigResolver::new()
        .with_cli_config(args.config.clone())
        .with_cli_module(args.module.clone());

    // Config is read before tracing is up; RUST_LOG still wins over the file's level
    let config_path = resolver.config_path();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config_path
            .as_deref()
            .and_then(|path| cuecast_common::config::TomlConfig::load(path).ok())
            .map(|config| config.logging.level)
            .unwrap_or_else(|| "info".to_string());
        EnvFilter::new(level)
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting cuecast-host v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let registry = ModuleRegistry::with_builtin();
    if args.list_modules {
        for name in registry.names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let config = resolver.load();
    let module_name = resolver.module_name(&config);

    let events = EventBus::new(100);
    let event_logger = tokio::spawn(session::log_events(events.subscribe()));

    let mut host = PlaylistHost::from_registry(&registry, &module_name, &config, events)
        .with_context(|| format!("Could not load playlist module '{}'", module_name))?;

    let options = SessionOptions {
        tracks: args.tracks.unwrap_or(config.tracks),
        honor_publish_delay: !args.no_delay,
    };

    let result = session::run(&mut host, options).await;

    // Dropping the host closes the event channel and ends the logger
    drop(host);
    if let Ok(stats) = event_logger.await {
        debug!("Logged {} host events ({} skipped)", stats.logged, stats.skipped);
    }

    let report = result.context("Playlist session failed")?;
    info!(
        "Session complete: {} track(s), module shutdown {}",
        report.selections.len(),
        if report.shutdown.is_ok() { "ok" } else { "failed" }
    );

    Ok(())
}
