//! JSON input: already-decoded occurrences and recurring series.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};
use freetime_engine::config::parse_timezone;
use freetime_engine::{Calendar, Occurrence, OccurrenceStatus, RecurringSeries};
use serde::Deserialize;

/// Top-level input document.
///
/// ```json
/// {
///   "events": [{"start": "2026-03-16T10:00:00-07:00", "end": "2026-03-16T11:00:00-07:00", "status": "CONFIRMED"}],
///   "series": [{"rrule": "FREQ=DAILY", "dtstart": "2026-03-01T12:00:00", "duration_minutes": 30, "timezone": "America/Los_Angeles"}]
/// }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CalendarInput {
    pub events: Vec<Occurrence>,
    pub series: Vec<SeriesInput>,
}

#[derive(Debug, Deserialize)]
pub struct SeriesInput {
    pub rrule: String,
    /// Local start of the first instance in `timezone`.
    pub dtstart: NaiveDateTime,
    pub duration_minutes: u32,
    pub timezone: String,
    #[serde(default)]
    pub exdates: Vec<NaiveDateTime>,
    #[serde(default)]
    pub status: Option<OccurrenceStatus>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl CalendarInput {
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse calendar JSON")
    }

    pub fn into_calendar(self) -> Result<Calendar> {
        let series = self
            .series
            .into_iter()
            .enumerate()
            .map(|(i, s)| s.into_series().with_context(|| format!("Invalid series #{}", i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Calendar::new(self.events, series))
    }
}

impl SeriesInput {
    fn into_series(self) -> Result<RecurringSeries> {
        let tz = parse_timezone(&self.timezone)?;
        let duration = Duration::minutes(i64::from(self.duration_minutes));
        let mut series = RecurringSeries::new(&self.rrule, self.dtstart, duration, tz)?
            .with_exdates(self.exdates);
        if let Some(status) = self.status {
            series = series.with_status(status);
        }
        if let Some(summary) = self.summary {
            series = series.with_summary(summary);
        }
        Ok(series)
    }
}
