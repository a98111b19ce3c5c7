//! Configuration loading for the reveal player.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! sensible defaults so the player can still run.

use crate::schedule::Pacing;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// High-level app configuration; deserializable from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Maximum characters per displayed chunk; omit for one word per chunk.
    #[serde(default = "default_max_chunk_len")]
    pub max_chunk_len: Option<usize>,
    #[serde(default)]
    pub pacing: Pacing,
    /// Seconds to wait before the first chunk appears.
    #[serde(default = "default_start_delay")]
    pub start_delay: f64,
    /// Extra playback passes after the first one.
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Seconds between playback passes.
    #[serde(default = "default_repeat_delay")]
    pub repeat_delay: f64,
    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            max_chunk_len: default_max_chunk_len(),
            pacing: Pacing::default(),
            start_delay: default_start_delay(),
            repeat: default_repeat(),
            repeat_delay: default_repeat_delay(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Replace unusable delay values with their defaults. TOML accepts `nan`
    /// and negative floats, and both would reach the playback clock.
    fn sanitize(mut self) -> Self {
        if !self.start_delay.is_finite() || self.start_delay < 0.0 {
            warn!(value = self.start_delay, "Ignoring invalid start_delay");
            self.start_delay = default_start_delay();
        }
        if !self.repeat_delay.is_finite() || self.repeat_delay < 0.0 {
            warn!(value = self.repeat_delay, "Ignoring invalid repeat_delay");
            self.repeat_delay = default_repeat_delay();
        }
        self
    }
}

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg.sanitize()
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

fn default_max_chunk_len() -> Option<usize> {
    Some(24)
}

fn default_start_delay() -> f64 {
    0.6
}

fn default_repeat() -> u32 {
    2
}

fn default_repeat_delay() -> f64 {
    4.0
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: AppConfig = toml::from_str("repeat = 0").expect("valid toml");
        assert_eq!(cfg.repeat, 0);
        assert_eq!(cfg.max_chunk_len, Some(24));
        assert_eq!(cfg.log_level, LogLevel::Info);
        assert!((cfg.start_delay - 0.6).abs() < 1e-9);
        assert!((cfg.pacing.per_char - 0.08).abs() < 1e-9);
    }

    #[test]
    fn pacing_table_overrides_defaults() {
        let cfg: AppConfig =
            toml::from_str("log_level = \"warn\"\n\n[pacing]\nsentence_pause = 1.0\n")
                .expect("valid toml");
        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert!((cfg.pacing.sentence_pause - 1.0).abs() < 1e-9);
        // Untouched pacing fields keep their defaults.
        assert!((cfg.pacing.min_duration - 0.5).abs() < 1e-9);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config(Path::new("conf/definitely-not-here.toml"));
        assert_eq!(cfg.repeat, 2);
    }

    #[test]
    fn nan_and_negative_delays_fall_back_to_defaults() {
        // TOML parses `nan` into a perfectly deserializable f64; without the
        // sanitize pass it would flow into Duration::from_secs_f64 and panic.
        let cfg: AppConfig = toml::from_str("start_delay = nan\nrepeat_delay = -1.0")
            .expect("valid toml");
        assert!(cfg.start_delay.is_nan());

        let cfg = cfg.sanitize();
        assert!((cfg.start_delay - 0.6).abs() < 1e-9);
        assert!((cfg.repeat_delay - 4.0).abs() < 1e-9);
    }

    #[test]
    fn sanitize_keeps_valid_delays() {
        let cfg: AppConfig =
            toml::from_str("start_delay = 0.0\nrepeat_delay = 2.5").expect("valid toml");
        let cfg = cfg.sanitize();
        assert!((cfg.start_delay - 0.0).abs() < 1e-9);
        assert!((cfg.repeat_delay - 2.5).abs() < 1e-9);
    }
}
