//! Occurrence sources: where each day's occurrences come from.
//!
//! The engine asks a source for every occurrence intersecting a day's window.
//! A source failure is returned to the caller as-is; it is never read as "no
//! occurrences".

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::SourceError;
use crate::expander::RecurringSeries;
use crate::occurrence::Occurrence;

/// Provider of concrete event occurrences.
pub trait OccurrenceSource {
    /// Return all occurrences (recurring or singular) whose interval intersects
    /// `[window_start, window_end]`.
    ///
    /// Sources may return extra occurrences; the normalizer filters them.
    fn occurrences(
        &self,
        window_start: &DateTime<Tz>,
        window_end: &DateTime<Tz>,
    ) -> Result<Vec<Occurrence>, SourceError>;
}

impl<S: OccurrenceSource + ?Sized> OccurrenceSource for &S {
    fn occurrences(
        &self,
        window_start: &DateTime<Tz>,
        window_end: &DateTime<Tz>,
    ) -> Result<Vec<Occurrence>, SourceError> {
        (**self).occurrences(window_start, window_end)
    }
}

/// An in-memory list of already expanded occurrences.
///
/// Occurrences without two datetime endpoints are passed through so the
/// normalizer can account for them.
impl OccurrenceSource for [Occurrence] {
    fn occurrences(
        &self,
        window_start: &DateTime<Tz>,
        window_end: &DateTime<Tz>,
    ) -> Result<Vec<Occurrence>, SourceError> {
        let window_start = window_start.with_timezone(&Utc);
        let window_end = window_end.with_timezone(&Utc);
        Ok(self
            .iter()
            .filter(|o| match o.instants() {
                Some((start, end)) => start <= window_end && end >= window_start,
                None => true,
            })
            .cloned()
            .collect())
    }
}

impl OccurrenceSource for Vec<Occurrence> {
    fn occurrences(
        &self,
        window_start: &DateTime<Tz>,
        window_end: &DateTime<Tz>,
    ) -> Result<Vec<Occurrence>, SourceError> {
        self.as_slice().occurrences(window_start, window_end)
    }
}

/// A calendar of singular occurrences plus recurring series.
#[derive(Debug, Clone, Default)]
pub struct Calendar {
    pub events: Vec<Occurrence>,
    pub series: Vec<RecurringSeries>,
}

impl Calendar {
    pub fn new(events: Vec<Occurrence>, series: Vec<RecurringSeries>) -> Self {
        Self { events, series }
    }
}

impl OccurrenceSource for Calendar {
    fn occurrences(
        &self,
        window_start: &DateTime<Tz>,
        window_end: &DateTime<Tz>,
    ) -> Result<Vec<Occurrence>, SourceError> {
        let mut occurrences = self.events.occurrences(window_start, window_end)?;
        for series in &self.series {
            occurrences.extend(series.expand_between(window_start, window_end)?);
        }
        Ok(occurrences)
    }
}
