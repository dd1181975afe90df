//! Workday configuration consumed by the engine.

use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer};

use crate::dst::DstPolicy;
use crate::error::{FreeTimeError, Result};
use crate::window::WorkHours;

/// Settings for free-slot computation.
///
/// Deserializes from any serde format; missing keys take the defaults
/// (09:00-17:00 UTC, 30 minute minimum).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkdayConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    /// IANA zone all interval math is done in.
    #[serde(deserialize_with = "deserialize_tz")]
    pub timezone: Tz,
    pub min_free_minutes: u32,
    pub dst_policy: DstPolicy,
}

impl Default for WorkdayConfig {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            timezone: Tz::UTC,
            min_free_minutes: 30,
            dst_policy: DstPolicy::default(),
        }
    }
}

impl WorkdayConfig {
    /// # Errors
    /// Returns `FreeTimeError::InvalidWindow` for out-of-range or inverted hours.
    pub fn work_hours(&self) -> Result<WorkHours> {
        WorkHours::new(self.start_hour, self.end_hour)
    }

    /// Check the configuration before any computation.
    pub fn validate(&self) -> Result<()> {
        self.work_hours().map(|_| ())
    }

    pub fn min_free_duration(&self) -> Duration {
        Duration::minutes(i64::from(self.min_free_minutes))
    }

    /// Set the target zone from an IANA name.
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidTimezone` if the name is unknown.
    pub fn with_timezone_name(mut self, name: &str) -> Result<Self> {
        self.timezone = parse_timezone(name)?;
        Ok(self)
    }
}

/// Parse an IANA zone name such as `"America/Los_Angeles"`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| FreeTimeError::InvalidTimezone(name.to_string()))
}

fn deserialize_tz<'de, D>(deserializer: D) -> std::result::Result<Tz, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    parse_timezone(&name).map_err(serde::de::Error::custom)
}
