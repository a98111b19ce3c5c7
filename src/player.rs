//! Terminal playback of a reveal schedule.
//!
//! The player is one consumer of the schedule: it shows each chunk on a
//! single terminal line at its start time and clears the line once the last
//! entry's duration has elapsed. All timing comes from the schedule; nothing
//! here recomputes pacing.

use crate::cancellation::StopSignal;
use crate::config::AppConfig;
use crate::schedule::{ScheduleEntry, total_duration};
use anyhow::Result;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// How often to wake up and check the stop signal while waiting.
const POLL_SLICE: Duration = Duration::from_millis(25);

const CLEAR_LINE: &str = "\x1b[2K\r";

/// Play the schedule: one initial pass plus `config.repeat` extra passes,
/// separated by `config.repeat_delay`, after an initial `config.start_delay`.
pub fn play(entries: &[ScheduleEntry], config: &AppConfig, stop: &StopSignal) -> Result<()> {
    if entries.is_empty() {
        info!("Nothing to play");
        return Ok(());
    }

    let passes = config.repeat.saturating_add(1);
    info!(
        passes,
        pass_seconds = total_duration(entries),
        "Starting playback"
    );

    wait(config.start_delay, stop, "start delay")?;
    for pass in 0..passes {
        if pass > 0 {
            wait(config.repeat_delay, stop, "repeat delay")?;
        }
        debug!(pass, "Playback pass");
        play_pass(entries, stop)?;
    }
    info!("Playback finished");
    Ok(())
}

fn play_pass(entries: &[ScheduleEntry], stop: &StopSignal) -> Result<()> {
    let started = Instant::now();
    let mut out = io::stdout().lock();

    for entry in entries {
        wait_until(started, entry.start_time, stop)?;
        write!(out, "{CLEAR_LINE}{}", entry.content)?;
        out.flush()?;
    }

    // Hold the final chunk for its full duration, then clear the line.
    wait_until(started, total_duration(entries), stop)?;
    write!(out, "{CLEAR_LINE}")?;
    out.flush()?;
    Ok(())
}

fn wait_until(started: Instant, target_secs: f64, stop: &StopSignal) -> Result<()> {
    // NaN compares false against everything and would panic inside
    // Duration::from_secs_f64; infinities would never elapse.
    if !target_secs.is_finite() {
        return Ok(());
    }
    loop {
        stop.checkpoint("reveal")?;
        let elapsed = started.elapsed().as_secs_f64();
        if elapsed >= target_secs {
            return Ok(());
        }
        let remaining = Duration::from_secs_f64(target_secs - elapsed);
        thread::sleep(remaining.min(POLL_SLICE));
    }
}

fn wait(secs: f64, stop: &StopSignal, stage: &'static str) -> Result<()> {
    if !secs.is_finite() {
        return Ok(());
    }
    let started = Instant::now();
    loop {
        stop.checkpoint(stage)?;
        let elapsed = started.elapsed().as_secs_f64();
        if elapsed >= secs {
            return Ok(());
        }
        thread::sleep(Duration::from_secs_f64(secs - elapsed).min(POLL_SLICE));
    }
}
