//! Configuration schema definitions.

use std::path::PathBuf;

use cliplog_protocols::{ContextKey, TraceLevel};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gate: GateConfig,

    #[serde(default)]
    pub funnel: FunnelConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Directory holding cliplog's own files (`~/.cliplog`).
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".cliplog"))
            .unwrap_or_else(|| PathBuf::from(".cliplog"))
    }

    /// Default output of the JSON-lines sink (`~/.cliplog/events.jsonl`).
    pub fn default_events_path() -> PathBuf {
        Self::home_dir().join("events.jsonl")
    }

    /// Give an enabled JSON-lines sink without a path the default output.
    pub fn fill_default_paths(&mut self) {
        if self.sink.kind.writes_jsonl() && self.sink.path.is_none() {
            self.sink.path = Some(Self::default_events_path());
        }
    }
}

/// Context gate configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    /// Context keys that must be set before anything is logged.
    /// Empty disables the gate.
    #[serde(default)]
    pub required_context: Vec<String>,
}

impl GateConfig {
    /// Parse the required keys.
    pub fn required_keys(&self) -> Result<Vec<ContextKey>, ConfigError> {
        self.required_context
            .iter()
            .map(|name| name.parse::<ContextKey>().map_err(ConfigError::from))
            .collect()
    }
}

/// Funnel interaction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunnelConfig {
    /// Click ids that do not count as user interaction, on top of the built-in ones.
    #[serde(default)]
    pub extra_non_interaction_ids: Vec<String>,
}

/// Which sink receives log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Tracing,
    Jsonl,
    Both,
}

impl SinkKind {
    pub fn writes_jsonl(&self) -> bool {
        matches!(self, SinkKind::Jsonl | SinkKind::Both)
    }

    pub fn writes_tracing(&self) -> bool {
        matches!(self, SinkKind::Tracing | SinkKind::Both)
    }
}

/// Sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    #[serde(default)]
    pub kind: SinkKind,

    /// Output file for the JSON-lines sink.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Most verbose trace level forwarded by the tracing sink.
    #[serde(default = "default_min_trace_level")]
    pub min_trace_level: String,
}

impl SinkConfig {
    pub fn trace_level(&self) -> Result<TraceLevel, ConfigError> {
        Ok(self.min_trace_level.parse::<TraceLevel>()?)
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::default(),
            path: None,
            min_trace_level: default_min_trace_level(),
        }
    }
}

/// Output format of cliplog's own diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Diagnostics configuration for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,

    /// Directory for daily-rotated log files. Console only when unset.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            log_dir: None,
        }
    }
}

fn default_min_trace_level() -> String {
    "verbose".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
