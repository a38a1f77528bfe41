use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Target};
use jamalie_config::SettingsLoader;
use jamalie_site::{DocumentHost, LoadingGate, LoadingTiming, Session};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "jamalie-site",
    about = "Replay a visit to the Jamaliè home page carousels"
)]
struct Cli {
    /// Settings file (TOML or JSON); overrides the environment lookup
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Viewport width in CSS pixels
    #[arg(long, default_value_t = 1280.0)]
    viewport_width: f32,
    /// How long to keep the carousels mounted
    #[arg(
        long,
        default_value = "12s",
        value_parser = humantime::parse_duration
    )]
    run_for: Duration,
    /// Mount the carousels without the splash screen
    #[arg(long)]
    skip_loading: bool,
}

/// Page body standing in for the browser document.
#[derive(Debug)]
struct HeadlessDocument;

impl DocumentHost for HeadlessDocument {
    fn set_scroll_locked(&self, locked: bool) {
        log::debug!(
            "page scrolling {}",
            if locked { "locked" } else { "unlocked" }
        );
    }
}

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("jamalie_site", LevelFilter::Debug)
        .filter_module("jamalie_carousel", LevelFilter::Debug)
        .filter_module("jamalie_config", LevelFilter::Debug)
        .init();
}

fn load_env_file() -> Result<bool, dotenvy::Error> {
    dotenvy::dotenv().map(|_| true).or_else(|err| match err {
        dotenvy::Error::Io(_) => Ok(false),
        other => Err(other),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = load_env_file().context("failed to read .env")?;

    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }
    if env_loaded {
        log::debug!("loaded environment from .env");
    }

    let cli = Cli::parse();
    anyhow::ensure!(
        cli.viewport_width.is_finite() && cli.viewport_width > 0.0,
        "viewport width must be a positive number of pixels"
    );

    let loader = SettingsLoader::from_env();
    let (settings, source) = match &cli.config {
        Some(path) => loader.load_path(path),
        None => loader.load(),
    }
    .context("failed to load carousel settings")?;
    log::info!("carousel settings from {source:?}");

    if !cli.skip_loading {
        let gate = LoadingGate::new(
            Arc::new(HeadlessDocument),
            LoadingTiming::default(),
        );
        gate.run().await;
    }

    let report = Session::new(settings, cli.viewport_width)
        .run(cli.run_for)
        .await
        .context("session failed")?;

    log::info!(
        "hero slide {}, gallery item {}, autoplay {}",
        report.hero.current_index + 1,
        report.gallery_strip.active_index + 1,
        if report.hero.is_autoplaying { "running" } else { "paused" }
    );
    Ok(())
}
