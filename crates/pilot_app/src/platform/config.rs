//! Client configuration, read from `pilot.ron` (or the file named by
//! `PILOT_CONFIG`). Every field is optional; a missing file means defaults.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use pilot_engine::BackendSettings;
use serde::Deserialize;

use super::logging::LogDestination;

const CONFIG_FILENAME: &str = "pilot.ron";
const CONFIG_ENV: &str = "PILOT_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// Delay between entering the timeline and focusing the selected card.
    pub settle_delay_ms: u64,
    pub log_destination: LogDestination,
    pub log_level: LogLevel,
    /// Lines of timeline shown at once.
    pub viewport_height: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let backend = BackendSettings::default();
        Self {
            base_url: backend.base_url,
            connect_timeout_ms: duration_ms(backend.connect_timeout),
            request_timeout_ms: duration_ms(backend.request_timeout),
            settle_delay_ms: 100,
            log_destination: LogDestination::default(),
            log_level: LogLevel::default(),
            viewport_height: 20,
        }
    }
}

impl Config {
    pub fn backend_settings(&self) -> BackendSettings {
        BackendSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub fn load() -> anyhow::Result<Config> {
    let path = env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    load_from(&path)
}

pub fn load_from(path: &Path) -> anyhow::Result<Config> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("reading config {}", path.display()));
        }
    };
    ron::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
}
