//! Entry point for the wordburst reveal player.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse command-line arguments.
//! - Load the text via `loader`.
//! - Load user configuration from `conf/config.toml`.
//! - Chunk, schedule, and hand the result to the terminal player.

use anyhow::{Context, Result, anyhow};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};
use wordburst::cancellation::StopSignal;
use wordburst::chunker::build_chunks;
use wordburst::config::load_config;
use wordburst::loader::load_text;
use wordburst::player::play;
use wordburst::schedule::{schedule_chunks_with, total_duration};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let text_path = parse_args()?;
    let config = load_config(Path::new("conf/config.toml"));
    set_log_level(reload_handle, config.log_level.as_filter_str());
    info!(
        path = %text_path.display(),
        level = %config.log_level,
        max_chunk_len = ?config.max_chunk_len,
        repeat = config.repeat,
        "Starting reveal player"
    );

    let text = load_text(&text_path)?;
    let chunks =
        build_chunks(&text, config.max_chunk_len).context("Invalid chunking configuration")?;
    let entries = schedule_chunks_with(&chunks, config.pacing)
        .context("Invalid pacing configuration")?;
    info!(
        chunks = chunks.len(),
        pass_seconds = total_duration(&entries),
        "Schedule ready"
    );

    let stop = StopSignal::with_ctrlc();
    play(&entries, &config, &stop).context("Playback did not finish")?;
    Ok(())
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow!("Usage: wordburst <path-to-text-file>"))?;

    let path = PathBuf::from(path);
    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.as_path().display()));
    }
    Ok(path)
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    }
}
