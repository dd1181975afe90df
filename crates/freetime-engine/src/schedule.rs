//! Day-range orchestration.
//!
//! Each date in the requested range is computed independently: build the work
//! window, fetch that day's occurrences, normalize them, derive free slots.
//! Results are collected into a map ordered by date with exactly one entry per
//! date in the range.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::thread;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::WorkdayConfig;
use crate::error::{FreeTimeError, Result};
use crate::freebusy;
use crate::interval::FreeInterval;
use crate::normalizer::normalize;
use crate::source::OccurrenceSource;
use crate::window::WorkWindow;

/// The free time of a single date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    /// Chronological, non-overlapping, each at least the configured minimum.
    pub free: Vec<FreeInterval>,
}

/// Per-date schedules, ordered by date.
pub type ScheduleMap = BTreeMap<NaiveDate, DaySchedule>;

/// Every date from `start_date` to `end_date` inclusive. Empty when
/// `end_date < start_date`.
pub fn days(start_date: NaiveDate, end_date: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start_date.iter_days().take_while(move |d| *d <= end_date)
}

/// Compute the free slots of a single date.
///
/// # Errors
/// Returns `FreeTimeError::InvalidWindow` for invalid work hours or an
/// unresolvable window boundary, and `FreeTimeError::Source` if the source fails.
/// A window that DST shrinks to nothing gives an empty schedule.
pub fn compute_day<S>(source: &S, date: NaiveDate, config: &WorkdayConfig) -> Result<DaySchedule>
where
    S: OccurrenceSource + ?Sized,
{
    let hours = config.work_hours()?;
    let Some(window) = WorkWindow::open_for_date(date, hours, config.timezone, config.dst_policy)?
    else {
        debug!(%date, "work window collapsed by DST transition");
        return Ok(DaySchedule {
            date,
            free: Vec::new(),
        });
    };
    let occurrences = source
        .occurrences(&window.start(), &window.end())
        .map_err(FreeTimeError::Source)?;

    let busy = normalize(&occurrences, &window);
    let free = freebusy::derive_free_slots(&busy, &window, config.min_free_duration());

    debug!(
        %date,
        occurrences = occurrences.len(),
        busy = busy.len(),
        free = free.len(),
        "computed day"
    );
    Ok(DaySchedule { date, free })
}

/// Compute free slots for every date in `[start_date, end_date]`.
///
/// An inverted range yields an empty map, not an error. Callers that need a
/// non-empty range must check it themselves.
///
/// # Errors
/// Configuration errors are reported before any day is computed. A source
/// failure aborts the whole range and is returned unchanged.
pub fn compute_schedule<S>(
    source: &S,
    start_date: NaiveDate,
    end_date: NaiveDate,
    config: &WorkdayConfig,
) -> Result<ScheduleMap>
where
    S: OccurrenceSource + ?Sized,
{
    config.validate()?;
    if end_date < start_date {
        warn!(%start_date, %end_date, "end date precedes start date; nothing to compute");
        return Ok(ScheduleMap::new());
    }

    days(start_date, end_date)
        .map(|date| compute_day(source, date, config).map(|schedule| (date, schedule)))
        .collect()
}

/// Same as [`compute_schedule`], spreading the days over scoped worker threads.
///
/// The result is identical to the sequential version, including which error is
/// returned when several days fail (the earliest date wins).
pub fn compute_schedule_parallel<S>(
    source: &S,
    start_date: NaiveDate,
    end_date: NaiveDate,
    config: &WorkdayConfig,
) -> Result<ScheduleMap>
where
    S: OccurrenceSource + Sync + ?Sized,
{
    config.validate()?;
    let dates: Vec<NaiveDate> = days(start_date, end_date).collect();
    if dates.is_empty() {
        return Ok(ScheduleMap::new());
    }

    let workers = thread::available_parallelism()
        .map_or(1, NonZeroUsize::get)
        .min(dates.len());
    let chunk_len = dates.len().div_ceil(workers);

    thread::scope(|scope| {
        let handles: Vec<_> = dates
            .chunks(chunk_len)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|&date| compute_day(source, date, config).map(|s| (date, s)))
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect();

        let mut schedule = ScheduleMap::new();
        for handle in handles {
            let part = handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload))?;
            schedule.extend(part);
        }
        Ok(schedule)
    })
}

/// Find the earliest free slot of at least `min_duration` in the range.
///
/// Days are computed in order and the search stops at the first day with a
/// qualifying slot.
///
/// # Errors
/// Same as [`compute_day`].
pub fn first_free_slot_in_range<S>(
    source: &S,
    start_date: NaiveDate,
    end_date: NaiveDate,
    config: &WorkdayConfig,
    min_duration: Duration,
) -> Result<Option<FreeInterval>>
where
    S: OccurrenceSource + ?Sized,
{
    let hours = config.work_hours()?;
    for date in days(start_date, end_date) {
        let Some(window) =
            WorkWindow::open_for_date(date, hours, config.timezone, config.dst_policy)?
        else {
            continue;
        };
        let occurrences = source
            .occurrences(&window.start(), &window.end())
            .map_err(FreeTimeError::Source)?;
        let busy = normalize(&occurrences, &window);
        if let Some(slot) = freebusy::find_first_free_slot(&busy, &window, min_duration) {
            return Ok(Some(slot));
        }
    }
    Ok(None)
}
