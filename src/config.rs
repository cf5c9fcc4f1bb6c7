//! Configuration management for timesift
//!
//! This module provides configuration structures and defaults for the
//! startup filter assembly and the timeline state bounds, with TOML file
//! loading and environment overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimesiftError};
use crate::events::EventType;
use crate::filter::Filter;

/// Global configuration for timesift
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimesiftConfig {
    /// Startup filter assembly
    pub filters: FilterDefaults,
    /// Timeline state bounds
    pub state: StateConfig,
}

/// Configuration for the startup filter set
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDefaults {
    /// Whether the hide-known filter starts active
    pub hide_known: bool,
    /// Initial search text; empty leaves the text filter inactive
    pub text: String,
    /// Name of the event type whose subtree the type filter accepts
    pub root_type: String,
}

/// Configuration for the timeline state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Maximum number of events to keep in memory
    pub max_events: usize,
    /// Maximum number of filter snapshots kept in history
    pub history_limit: usize,
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            hide_known: true,
            text: String::new(),
            root_type: "root".to_string(),
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            max_events: 10_000,
            history_limit: 20,
        }
    }
}

impl TimesiftConfig {
    /// Load configuration from a TOML file, or use defaults when the file
    /// does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from environment variables, starting from
    /// defaults. Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("TIMESIFT_MAX_EVENTS") {
            match val.parse::<usize>() {
                Ok(max) => config.state.max_events = max,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid TIMESIFT_MAX_EVENTS"),
            }
        }

        if let Ok(val) = std::env::var("TIMESIFT_HISTORY_LIMIT") {
            match val.parse::<usize>() {
                Ok(limit) => config.state.history_limit = limit,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid TIMESIFT_HISTORY_LIMIT"),
            }
        }

        if let Ok(val) = std::env::var("TIMESIFT_HIDE_KNOWN") {
            match val.parse::<bool>() {
                Ok(hide) => config.filters.hide_known = hide,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid TIMESIFT_HIDE_KNOWN"),
            }
        }

        config
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.state.max_events == 0 {
            return Err(TimesiftError::Config(
                "max_events must be greater than 0".to_string(),
            ));
        }

        if self.state.history_limit == 0 {
            return Err(TimesiftError::Config(
                "history_limit must be greater than 0".to_string(),
            ));
        }

        EventType::from_name(&self.filters.root_type)?;

        Ok(())
    }

    /// Build the startup filter tree described by this configuration: the
    /// same three-child intersection as [`Filter::default_filter`], with
    /// the configured hide-known activation, search text, and type root.
    pub fn build_filter(&self) -> Result<Filter> {
        let root_type = EventType::from_name(&self.filters.root_type)?;

        let mut hide_known = Filter::hide_known();
        hide_known.set_active(self.filters.hide_known);

        Ok(Filter::intersection(vec![
            hide_known,
            Filter::text(self.filters.text.clone()),
            Filter::event_type(root_type),
        ]))
    }
}
