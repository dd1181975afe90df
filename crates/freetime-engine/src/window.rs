//! Per-day work windows.
//!
//! A [`WorkWindow`] is the time range of one calendar date within which free
//! time is evaluated. It is built from the date, the configured start and end
//! hours, and the target time zone. Exactly one window exists per day.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::dst::{resolve_local, DstPolicy};
use crate::error::{FreeTimeError, Result};

/// Configured start and end hour of the workday, in the target zone.
///
/// `end_hour` may be 24, meaning midnight at the end of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkHours {
    start_hour: u32,
    end_hour: u32,
}

impl WorkHours {
    /// # Errors
    /// Returns `FreeTimeError::InvalidWindow` unless `start_hour <= 23`,
    /// `end_hour <= 24` and `end_hour > start_hour`.
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self> {
        if start_hour > 23 {
            return Err(FreeTimeError::InvalidWindow(format!(
                "start hour {} is out of range 0-23",
                start_hour
            )));
        }
        if end_hour > 24 {
            return Err(FreeTimeError::InvalidWindow(format!(
                "end hour {} is out of range 1-24",
                end_hour
            )));
        }
        if end_hour <= start_hour {
            return Err(FreeTimeError::InvalidWindow(format!(
                "end hour {} must be after start hour {}",
                end_hour, start_hour
            )));
        }
        Ok(Self {
            start_hour,
            end_hour,
        })
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
        }
    }
}

/// The workday range of a single calendar date, in the target zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkWindow {
    date: NaiveDate,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl WorkWindow {
    /// Build a window from explicit boundaries.
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidWindow` if `start >= end`.
    pub fn new(date: NaiveDate, start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        if start >= end {
            return Err(FreeTimeError::InvalidWindow(format!(
                "window start {} is not before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { date, start, end })
    }

    /// Build the window for `date` from work hours in `tz`.
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidWindow` if a boundary falls in a DST gap
    /// under [`DstPolicy::Reject`], or if DST shifting collapses the window.
    pub fn for_date(date: NaiveDate, hours: WorkHours, tz: Tz, policy: DstPolicy) -> Result<Self> {
        Self::open_for_date(date, hours, tz, policy)?.ok_or_else(|| {
            FreeTimeError::InvalidWindow(format!(
                "work hours {}-{} on {} fall entirely in a DST gap in {}",
                hours.start_hour,
                hours.end_hour,
                date,
                tz.name()
            ))
        })
    }

    /// Like [`WorkWindow::for_date`], but a window that a DST transition shifts
    /// to zero length yields `Ok(None)`: the day exists but has no work time.
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidWindow` if a boundary falls in a DST gap
    /// under [`DstPolicy::Reject`].
    pub fn open_for_date(
        date: NaiveDate,
        hours: WorkHours,
        tz: Tz,
        policy: DstPolicy,
    ) -> Result<Option<Self>> {
        let start = boundary(date, hours.start_hour, tz, policy)?;
        let end = boundary(date, hours.end_hour, tz, policy)?;
        // Validated hours keep start <= end; equality only comes from shifting.
        if start >= end {
            return Ok(None);
        }
        Self::new(date, start, end).map(Some)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn start(&self) -> DateTime<Tz> {
        self.start
    }

    pub fn end(&self) -> DateTime<Tz> {
        self.end
    }

    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

fn boundary(date: NaiveDate, hour: u32, tz: Tz, policy: DstPolicy) -> Result<DateTime<Tz>> {
    // Hour 24 is midnight of the following day.
    let (day, hour) = if hour == 24 {
        let next = date.succ_opt().ok_or_else(|| {
            FreeTimeError::InvalidWindow(format!("no day follows {}", date))
        })?;
        (next, 0)
    } else {
        (date, hour)
    };
    let time = NaiveTime::from_hms_opt(hour, 0, 0)
        .ok_or_else(|| FreeTimeError::InvalidWindow(format!("hour {} is out of range", hour)))?;
    let naive = day.and_time(time);
    resolve_local(tz, naive, policy).ok_or_else(|| {
        FreeTimeError::InvalidWindow(format!(
            "local time {} does not exist in {}",
            naive,
            tz.name()
        ))
    })
}
