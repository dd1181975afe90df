//! Recurring series expansion -- turns an RRULE-based series into the concrete
//! occurrences that intersect a query window.
//!
//! Wraps the `rrule` crate (v0.13). DTSTART and EXDATE values are local wall
//! times in the series' IANA zone, so each instance keeps its local start time
//! across DST transitions.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use chrono_tz::Tz;
use rrule::RRuleSet;

use crate::error::{FreeTimeError, Result};
use crate::occurrence::{Occurrence, OccurrenceStatus, OccurrenceTime};

/// Upper bound on instances produced for a single query window.
const MAX_INSTANCES: u16 = 500;

/// A repeating event definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecurringSeries {
    rrule: String,
    dtstart: NaiveDateTime,
    duration: Duration,
    timezone: Tz,
    exdates: Vec<NaiveDateTime>,
    status: Option<OccurrenceStatus>,
    summary: Option<String>,
}

impl RecurringSeries {
    /// Define a series.
    ///
    /// # Arguments
    /// - `rrule` -- RFC 5545 RRULE string (e.g., "FREQ=WEEKLY;BYDAY=TU,TH")
    /// - `dtstart` -- local start of the first instance, in `timezone`
    /// - `duration` -- length of each instance
    /// - `timezone` -- zone the local times are expressed in
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidRule` if the RRULE is empty or unparseable,
    /// or the duration is not positive.
    pub fn new(rrule: &str, dtstart: NaiveDateTime, duration: Duration, timezone: Tz) -> Result<Self> {
        if rrule.trim().is_empty() {
            return Err(FreeTimeError::InvalidRule("empty RRULE string".to_string()));
        }
        if duration <= Duration::zero() {
            return Err(FreeTimeError::InvalidRule(format!(
                "instance duration must be positive, got {} minutes",
                duration.num_minutes()
            )));
        }
        let series = Self {
            rrule: rrule.trim().to_string(),
            dtstart,
            duration,
            timezone,
            exdates: Vec::new(),
            status: None,
            summary: None,
        };
        series.rule_set()?;
        Ok(series)
    }

    /// Exclude instances starting at these local times (RFC 5545 EXDATE).
    pub fn with_exdates(mut self, exdates: Vec<NaiveDateTime>) -> Self {
        self.exdates = exdates;
        self
    }

    /// Status copied onto every expanded occurrence.
    pub fn with_status(mut self, status: OccurrenceStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Expand the instances whose `[start, start + duration)` intersects
    /// `[window_start, window_end)`, in chronological order.
    ///
    /// # Errors
    /// Returns `FreeTimeError::InvalidRule` if the rule set cannot be built, and
    /// `FreeTimeError::Expansion` if the window holds more than 500 instances.
    pub fn expand_between<Z: chrono::TimeZone>(
        &self,
        window_start: &DateTime<Z>,
        window_end: &DateTime<Z>,
    ) -> Result<Vec<Occurrence>> {
        let window_start = window_start.with_timezone(&Utc);
        let window_end = window_end.with_timezone(&Utc);
        if window_start >= window_end {
            return Ok(Vec::new());
        }

        // Instances that started before the window may still run into it.
        let earliest = window_start - self.duration - Duration::seconds(1);
        let rule_set = self
            .rule_set()?
            .after(earliest.with_timezone(&rrule::Tz::UTC))
            .before(window_end.with_timezone(&rrule::Tz::UTC));

        let result = rule_set.all(MAX_INSTANCES);
        if result.limited {
            // Instances past the cap would otherwise read as free time.
            return Err(FreeTimeError::Expansion(format!(
                "more than {} instances of \"{}\" between {} and {}",
                MAX_INSTANCES,
                self.rrule,
                window_start.to_rfc3339(),
                window_end.to_rfc3339()
            )));
        }

        let occurrences = result
            .dates
            .into_iter()
            .filter_map(|dt| {
                let local = dt.fixed_offset();
                let start = local.with_timezone(&Utc);
                if start >= window_end || start + self.duration <= window_start {
                    return None;
                }
                Some(Occurrence {
                    start: Some(OccurrenceTime::Zoned(local)),
                    end: Some(OccurrenceTime::Zoned(local + self.duration)),
                    status: self.status,
                    summary: self.summary.clone(),
                })
            })
            .collect();

        Ok(occurrences)
    }

    fn rule_set(&self) -> Result<RRuleSet> {
        // "2026-02-17T14:00:00" style local times become "20260217T140000".
        let ical = |dt: &NaiveDateTime| dt.format("%Y%m%dT%H%M%S").to_string();
        let tzid = self.timezone.name();

        let mut text = format!(
            "DTSTART;TZID={}:{}\nRRULE:{}",
            tzid,
            ical(&self.dtstart),
            self.rrule
        );
        if !self.exdates.is_empty() {
            let exdates: Vec<String> = self.exdates.iter().map(ical).collect();
            text.push_str(&format!("\nEXDATE;TZID={}:{}", tzid, exdates.join(",")));
        }

        text.parse::<RRuleSet>()
            .map_err(|e| FreeTimeError::InvalidRule(format!("{}", e)))
    }
}
