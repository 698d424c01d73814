use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::day::DayClock;
use crate::error::ConfigError;
use crate::selector::PostListSelector;

/// Environment override for [`DisplayConfig::show_join_leave`].
pub const SHOW_JOIN_LEAVE_ENV: &str = "THREADVIEW_SHOW_JOIN_LEAVE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_join_leave: bool,
    #[serde(default = "default_true")]
    pub indicate_new_messages: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_join_leave: default_true(),
            indicate_new_messages: default_true(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Minutes east of UTC used to split posts into calendar days.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl ClockConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::OffsetOutOfRange`] for offsets of a day or more.
    pub fn day_clock(&self) -> Result<DayClock, ConfigError> {
        DayClock::from_offset_minutes(self.utc_offset_minutes)
    }
}

impl ViewConfig {
    /// Build a selector counting days in the configured offset.
    ///
    /// # Errors
    ///
    /// Returns an error when the clock offset is out of range.
    pub fn selector(&self) -> Result<PostListSelector, ConfigError> {
        Ok(PostListSelector::new(self.clock.day_clock()?))
    }
}

/// Default per-user config location (`<config_dir>/threadview/config.toml`).
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("threadview/config.toml"))
}

/// Load a config file, falling back to defaults when it does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or holds an
/// invalid clock offset.
pub fn load_config(path: &Path) -> Result<ViewConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ViewConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config = toml::from_str::<ViewConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config
        .clock
        .day_clock()
        .with_context(|| format!("Invalid clock in {}", path.display()))?;
    Ok(config)
}

/// Load the config from `explicit` or the default location, then apply
/// environment overrides.
///
/// # Errors
///
/// Returns an error if loading fails or an override is malformed.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ViewConfig> {
    let mut config = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => load_config(&path)?,
        None => ViewConfig::default(),
    };

    if let Some(show) = env_bool(SHOW_JOIN_LEAVE_ENV, env::var(SHOW_JOIN_LEAVE_ENV).ok())? {
        config.display.show_join_leave = show;
    }
    Ok(config)
}

fn env_bool(var: &'static str, raw: Option<String>) -> Result<Option<bool>, ConfigError> {
    let Some(value) = raw else {
        return Ok(None);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => Err(ConfigError::InvalidBool { var, value }),
    }
}

const fn default_true() -> bool {
    true
}
