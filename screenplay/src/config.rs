//! Ambient configuration
//!
//! Two switches drive the engine's observability: `diagnostics` controls
//! whether activities record a call-stack log, `structured_logging` makes
//! the process-wide pipeline write raw JSON events. Both are resolved once
//! per process, either installed explicitly through [`init`] or read from
//! the environment on first use.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Variable whose comma separated entries enable diagnostics
pub const DEBUG_VAR: &str = "DEBUG";

/// Variable enabling structured JSON events on stdout
pub const STRUCTURED_LOGS_VAR: &str = "SCREENPLAY_STRUCTURED_LOGS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Observability switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenplayConfig {
    /// Record call-stack logs on activities
    pub diagnostics: bool,

    /// Surface raw structured events
    pub structured_logging: bool,
}

impl ScreenplayConfig {
    /// Read the switches from the process environment
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_VAR).ok();
        let structured = std::env::var(STRUCTURED_LOGS_VAR).ok();
        Self::from_vars(debug.as_deref(), structured.as_deref())
    }

    /// Resolve the switches from raw variable values
    pub fn from_vars(debug: Option<&str>, structured: Option<&str>) -> Self {
        Self {
            diagnostics: debug.map(debug_enables_screenplay).unwrap_or(false),
            structured_logging: structured.map(is_truthy).unwrap_or(false),
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    pub fn with_structured_logging(mut self, enabled: bool) -> Self {
        self.structured_logging = enabled;
        self
    }
}

fn debug_enables_screenplay(value: &str) -> bool {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .any(|entry| {
            entry == "*"
                || entry.starts_with("screenplay")
                || entry.starts_with("testla:sp")
                || entry.starts_with("testla:screenplay")
        })
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

static CURRENT: OnceCell<ScreenplayConfig> = OnceCell::new();

/// Install the process-wide configuration
///
/// Returns false if a configuration was already installed or already read
/// from the environment.
pub fn init(config: ScreenplayConfig) -> bool {
    CURRENT.set(config).is_ok()
}

/// The process-wide configuration, read from the environment on first use
pub fn current() -> &'static ScreenplayConfig {
    CURRENT.get_or_init(ScreenplayConfig::from_env)
}
