//! Zoned time intervals.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A half-open `[start, end)` interval of zoned timestamps with `start < end`.
///
/// Intervals cannot be mutated after construction, and an interval with
/// `start >= end` cannot be constructed at all.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

/// A normalized, status-filtered interval clamped to a work window.
pub type BusyInterval = TimeInterval;

/// A derived interval of available time meeting the minimum duration.
pub type FreeInterval = TimeInterval;

impl TimeInterval {
    /// Returns `None` when `start >= end`.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whole minutes, truncated.
    pub fn duration_minutes(&self) -> i64 {
        self.duration().num_minutes()
    }

    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Touching intervals do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Returns `true` if `other` lies entirely inside this interval.
    pub fn contains(&self, other: &TimeInterval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl Serialize for TimeInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TimeInterval", 3)?;
        state.serialize_field("start", &self.start.to_rfc3339())?;
        state.serialize_field("end", &self.end.to_rfc3339())?;
        state.serialize_field("duration_minutes", &self.duration_minutes())?;
        state.end()
    }
}
