//! Occurrence normalization: raw occurrences to busy intervals.
//!
//! Filters one day's occurrences down to those that block time, converts them
//! into the window's zone, and clamps them to the work window. Occurrences that
//! are malformed or irrelevant are dropped silently (logged at `debug`), since
//! real-world recurrence data routinely contains partial entries.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::interval::{BusyInterval, TimeInterval};
use crate::occurrence::Occurrence;
use crate::window::WorkWindow;

/// Why an occurrence did not become a busy interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Discard {
    NotBusy,
    NoTimeOfDay,
    OtherDay,
    OutsideWindow,
}

/// Normalize `occurrences` into busy intervals within `window`.
///
/// The target zone is the zone of `window`. Floating timestamps are read as
/// UTC before conversion. The output is in input order, not sorted.
pub fn normalize(occurrences: &[Occurrence], window: &WorkWindow) -> Vec<BusyInterval> {
    occurrences
        .iter()
        .filter_map(|occurrence| match normalize_one(occurrence, window) {
            Ok(interval) => Some(interval),
            Err(reason) => {
                debug!(
                    date = %window.date(),
                    summary = occurrence.summary.as_deref().unwrap_or(""),
                    ?reason,
                    "discarding occurrence"
                );
                None
            }
        })
        .collect()
}

fn normalize_one(
    occurrence: &Occurrence,
    window: &WorkWindow,
) -> std::result::Result<BusyInterval, Discard> {
    if !occurrence.blocks_time() {
        return Err(Discard::NotBusy);
    }

    let (start, end) = occurrence.instants().ok_or(Discard::NoTimeOfDay)?;
    let tz = window.timezone();
    let start = to_zone(start, tz);
    let end = to_zone(end, tz);

    // Upstream expanders may return neighbouring-day spillover.
    let date = window.date();
    if end.date_naive() < date || start.date_naive() > date {
        return Err(Discard::OtherDay);
    }

    let clamped_start = start.max(window.start());
    let clamped_end = end.min(window.end());
    TimeInterval::new(clamped_start, clamped_end).ok_or(Discard::OutsideWindow)
}

fn to_zone(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}
