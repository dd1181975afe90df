//! Event occurrences as produced by an external calendar parser or recurrence
//! expander.
//!
//! An [`Occurrence`] is one concrete instance of an event. Its timestamps may be
//! zoned, floating (no zone information) or date-only. Timestamps that are
//! missing or cannot be parsed deserialize to `None`; the normalizer discards
//! such occurrences instead of failing the whole batch.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Participation status of an occurrence.
///
/// Only `Tentative` and `Cancelled` leave time free. Status text that is not
/// recognised becomes `Unknown` and counts as busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum OccurrenceStatus {
    #[default]
    Confirmed,
    Tentative,
    Cancelled,
    Unknown,
}

impl OccurrenceStatus {
    pub fn blocks_time(self) -> bool {
        !matches!(self, Self::Tentative | Self::Cancelled)
    }
}

impl From<&str> for OccurrenceStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONFIRMED" => Self::Confirmed,
            "TENTATIVE" => Self::Tentative,
            "CANCELLED" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for OccurrenceStatus {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// An occurrence timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceTime {
    /// A timestamp with a known UTC offset.
    Zoned(DateTime<FixedOffset>),
    /// A wall-clock timestamp without zone information.
    Floating(NaiveDateTime),
    /// A date-only ("all day") marker.
    AllDay(NaiveDate),
}

impl OccurrenceTime {
    /// The instant this timestamp denotes, reading floating times as UTC.
    /// Date-only markers have no time-of-day and yield `None`.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Zoned(dt) => Some(dt.with_timezone(&Utc)),
            Self::Floating(naive) => Some(Utc.from_utc_datetime(&naive)),
            Self::AllDay(_) => None,
        }
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for OccurrenceTime {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Zoned(dt.fixed_offset())
    }
}

impl From<NaiveDateTime> for OccurrenceTime {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Floating(naive)
    }
}

impl From<NaiveDate> for OccurrenceTime {
    fn from(date: NaiveDate) -> Self {
        Self::AllDay(date)
    }
}

/// Error returned when a string is not a recognisable timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOccurrenceTimeError(String);

impl fmt::Display for ParseOccurrenceTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognised timestamp: {}", self.0)
    }
}

impl std::error::Error for ParseOccurrenceTimeError {}

impl FromStr for OccurrenceTime {
    type Err = ParseOccurrenceTimeError;

    /// Accepts RFC 3339 (`2026-03-16T09:00:00-07:00`), floating local time
    /// (`2026-03-16T09:00:00`, seconds optional) and plain dates (`2026-03-16`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Zoned(dt));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self::Floating(naive));
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::AllDay(date));
        }
        Err(ParseOccurrenceTimeError(s.to_string()))
    }
}

impl fmt::Display for OccurrenceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoned(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Floating(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S")),
            Self::AllDay(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for OccurrenceTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn lenient_time<'de, D>(deserializer: D) -> Result<Option<OccurrenceTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| match s.parse() {
        Ok(time) => Some(time),
        Err(e) => {
            tracing::debug!(error = %e, "unparseable occurrence timestamp");
            None
        }
    }))
}

/// One concrete instance of an event (recurring or singular).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Occurrence {
    #[serde(default, deserialize_with = "lenient_time")]
    pub start: Option<OccurrenceTime>,
    #[serde(default, deserialize_with = "lenient_time")]
    pub end: Option<OccurrenceTime>,
    /// Missing status is treated as busy.
    #[serde(default)]
    pub status: Option<OccurrenceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Occurrence {
    pub fn new(start: impl Into<OccurrenceTime>, end: impl Into<OccurrenceTime>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
            status: None,
            summary: None,
        }
    }

    pub fn with_status(mut self, status: OccurrenceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn blocks_time(&self) -> bool {
        self.status.unwrap_or_default().blocks_time()
    }

    /// Both endpoints as UTC instants, or `None` when either endpoint is
    /// missing or date-only.
    pub fn instants(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.start?.to_utc()?, self.end?.to_utc()?))
    }
}
