//! Configuration file loading and command-line overrides.
//!
//! Precedence: command-line flag > `[workday]` table in the TOML file > default.

use std::path::Path;

use anyhow::{Context, Result};
use freetime_engine::config::parse_timezone;
use freetime_engine::WorkdayConfig;
use serde::Deserialize;

/// Contents of a `freetime.toml` file.
///
/// ```toml
/// [workday]
/// timezone = "America/Los_Angeles"
/// start_hour = 8
/// end_hour = 16
/// min_free_minutes = 45
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub workday: WorkdayConfig,
}

/// Values given on the command line.
#[derive(Debug, Default)]
pub struct Overrides {
    pub timezone: Option<String>,
    pub start_hour: Option<u32>,
    pub end_hour: Option<u32>,
    pub min_free_minutes: Option<u32>,
}

impl Settings {
    /// Load settings from `path`, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply command-line overrides and validate the result.
    pub fn into_workday(self, overrides: &Overrides) -> Result<WorkdayConfig> {
        let mut workday = self.workday;
        if let Some(name) = overrides.timezone.as_deref() {
            workday.timezone = parse_timezone(name)?;
        }
        if let Some(hour) = overrides.start_hour {
            workday.start_hour = hour;
        }
        if let Some(hour) = overrides.end_hour {
            workday.end_hour = hour;
        }
        if let Some(minutes) = overrides.min_free_minutes {
            workday.min_free_minutes = minutes;
        }
        workday.validate().context("Invalid workday configuration")?;
        Ok(workday)
    }
}
