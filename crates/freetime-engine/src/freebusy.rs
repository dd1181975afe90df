//! Compute free time slots from busy intervals.
//!
//! Sorts busy intervals by start time, merges overlapping or touching busy
//! periods, then computes the gaps between merged periods within a work window,
//! dropping gaps shorter than the configured minimum.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use tracing::trace;

use crate::interval::{BusyInterval, FreeInterval, TimeInterval};
use crate::window::WorkWindow;

/// Merge overlapping or touching busy intervals.
///
/// Returns a sorted, pairwise-disjoint list of intervals covering exactly the
/// same time as the input. Intervals that touch (`start == previous end`) are
/// merged into one block.
pub fn merge_busy_periods(busy: &[BusyInterval]) -> Vec<BusyInterval> {
    let mut bounds: Vec<(DateTime<Tz>, DateTime<Tz>)> =
        busy.iter().map(|b| (b.start(), b.end())).collect();
    bounds.sort_by_key(|&(start, _)| start);

    let mut merged: Vec<(DateTime<Tz>, DateTime<Tz>)> = Vec::with_capacity(bounds.len());
    for (start, end) in bounds {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                // Overlapping or touching: extend the current block.
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    trace!(input = busy.len(), merged = merged.len(), "merged busy periods");
    merged
        .into_iter()
        .filter_map(|(start, end)| TimeInterval::new(start, end))
        .collect()
}

/// Derive the free intervals of `window` not covered by `busy`.
///
/// `busy` need not be sorted or disjoint. Every returned interval lies within
/// the window, is at least `min_duration` long, and the result is sorted by
/// start time. Zero-length gaps are never emitted, even for a zero minimum.
pub fn derive_free_slots(
    busy: &[BusyInterval],
    window: &WorkWindow,
    min_duration: Duration,
) -> Vec<FreeInterval> {
    let merged = merge_busy_periods(busy);

    let mut free_slots = Vec::new();
    let mut cursor = window.start();

    for block in &merged {
        if cursor < block.start() && block.start() - cursor >= min_duration {
            free_slots.extend(TimeInterval::new(cursor, block.start()));
        }
        cursor = cursor.max(block.end());
    }

    // Trailing free slot after the last busy block.
    if cursor < window.end() && window.end() - cursor >= min_duration {
        free_slots.extend(TimeInterval::new(cursor, window.end()));
    }

    free_slots
}

/// Find the first free slot of at least `min_duration` within the window.
///
/// Delegates to [`derive_free_slots`], so the result is the earliest slot that
/// would appear in the day's schedule.
pub fn find_first_free_slot(
    busy: &[BusyInterval],
    window: &WorkWindow,
    min_duration: Duration,
) -> Option<FreeInterval> {
    derive_free_slots(busy, window, min_duration)
        .into_iter()
        .next()
}
