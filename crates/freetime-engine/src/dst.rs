//! DST transition policies for work-window boundaries.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;

/// Policy for a work-window boundary whose wall-clock time does not exist
/// (e.g., 2:30 AM during spring forward).
///
/// Ambiguous wall-clock times (fall back) always resolve to the earlier instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Shift to the first valid minute after the gap
    #[default]
    ShiftForward,
    /// Treat the boundary as invalid
    Reject,
}

/// Longest DST gap searched when shifting forward. Real-world gaps are at most
/// two hours.
const MAX_GAP_MINUTES: i64 = 180;

/// Resolve a wall-clock time in `tz` to an instant according to `policy`.
///
/// Returns `None` only when the time falls in a gap and the policy is
/// [`DstPolicy::Reject`].
pub fn resolve_local(tz: Tz, naive: NaiveDateTime, policy: DstPolicy) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => match policy {
            DstPolicy::Reject => None,
            DstPolicy::ShiftForward => (1..=MAX_GAP_MINUTES)
                .find_map(|m| tz.from_local_datetime(&(naive + Duration::minutes(m))).earliest()),
        },
    }
}
