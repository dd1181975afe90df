//! # freetime-engine
//!
//! Free-slot derivation for calendar availability.
//!
//! Given the busy occurrences of a calendar (possibly overlapping, recurring,
//! or expressed in different time zones), computes for every day in a date
//! range the free intervals inside a configured workday window that are at
//! least a minimum length.
//!
//! ## Modules
//!
//! - [`occurrence`] — Event occurrences as delivered by a calendar parser
//! - [`normalizer`] — Occurrences → busy intervals clamped to a work window
//! - [`freebusy`] — Merge busy intervals and derive free slots
//! - [`schedule`] — Day-range orchestration, one `DaySchedule` per date
//! - [`source`] — `OccurrenceSource` trait and in-memory calendars
//! - [`expander`] — RRULE series → concrete occurrences
//! - [`window`] — Work hours and per-day work windows
//! - [`dst`] — DST gap/overlap resolution for window boundaries
//! - [`interval`] — Zoned time intervals
//! - [`config`] — Workday configuration
//! - [`error`] — Error types

pub mod config;
pub mod dst;
pub mod error;
pub mod expander;
pub mod freebusy;
pub mod interval;
pub mod normalizer;
pub mod occurrence;
pub mod schedule;
pub mod source;
pub mod window;

pub use config::WorkdayConfig;
pub use error::FreeTimeError;
pub use expander::RecurringSeries;
pub use freebusy::{derive_free_slots, merge_busy_periods};
pub use interval::{BusyInterval, FreeInterval, TimeInterval};
pub use normalizer::normalize;
pub use occurrence::{Occurrence, OccurrenceStatus, OccurrenceTime};
pub use schedule::{compute_schedule, DaySchedule, ScheduleMap};
pub use source::{Calendar, OccurrenceSource};
pub use window::{WorkHours, WorkWindow};
