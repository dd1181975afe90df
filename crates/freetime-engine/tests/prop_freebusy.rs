//! Property-based tests for free-slot derivation using proptest.
//!
//! These verify invariants that hold for *any* set of busy intervals, not just
//! the scenarios in `freebusy_tests.rs`.

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use chrono_tz::Tz;
use freetime_engine::dst::DstPolicy;
use freetime_engine::freebusy::{derive_free_slots, merge_busy_periods};
use freetime_engine::{
    normalize, BusyInterval, Occurrence, OccurrenceStatus, TimeInterval, WorkHours, WorkWindow,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Minutes in the 09:00-17:00 window.
const WINDOW_MINUTES: i64 = 480;

fn day_start() -> DateTime<Tz> {
    Tz::UTC.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn window() -> WorkWindow {
    WorkWindow::for_date(
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
        WorkHours::default(),
        Tz::UTC,
        DstPolicy::default(),
    )
    .unwrap()
}

/// A busy interval inside the window, given as minute offsets from 09:00.
fn arb_busy() -> impl Strategy<Value = BusyInterval> {
    (0i64..WINDOW_MINUTES, 1i64..=240).prop_map(|(offset, len)| {
        let start = day_start() + Duration::minutes(offset);
        let end = day_start() + Duration::minutes((offset + len).min(WINDOW_MINUTES));
        TimeInterval::new(start, end).unwrap()
    })
}

fn arb_busy_set() -> impl Strategy<Value = Vec<BusyInterval>> {
    prop::collection::vec(arb_busy(), 0..20)
}

fn arb_min_duration() -> impl Strategy<Value = Duration> {
    (0i64..=120).prop_map(Duration::minutes)
}

fn arb_status() -> impl Strategy<Value = Option<OccurrenceStatus>> {
    prop_oneof![
        Just(None),
        Just(Some(OccurrenceStatus::Confirmed)),
        Just(Some(OccurrenceStatus::Tentative)),
        Just(Some(OccurrenceStatus::Cancelled)),
        Just(Some(OccurrenceStatus::Unknown)),
    ]
}

/// Occurrences anywhere between 06:00 and 20:00 with a random status.
fn arb_occurrences() -> impl Strategy<Value = Vec<Occurrence>> {
    prop::collection::vec((-180i64..660, 1i64..=240, arb_status()), 0..20).prop_map(|raw| {
        raw.into_iter()
            .map(|(offset, len, status)| {
                let start = day_start() + Duration::minutes(offset);
                let mut occurrence = Occurrence::new(start, start + Duration::minutes(len));
                occurrence.status = status;
                occurrence
            })
            .collect()
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn derivation_is_idempotent(busy in arb_busy_set(), min in arb_min_duration()) {
        let window = window();
        prop_assert_eq!(
            derive_free_slots(&busy, &window, min),
            derive_free_slots(&busy, &window, min)
        );
    }

    #[test]
    fn free_slots_are_sorted_disjoint_and_in_window(busy in arb_busy_set(), min in arb_min_duration()) {
        let window = window();
        let free = derive_free_slots(&busy, &window, min);

        let bounds = TimeInterval::new(window.start(), window.end()).unwrap();
        for slot in &free {
            prop_assert!(bounds.contains(slot), "{:?} escapes the window", slot);
        }
        for pair in free.windows(2) {
            prop_assert!(pair[0].end() < pair[1].start(), "slots overlap or touch: {:?}", pair);
        }
    }

    #[test]
    fn no_slot_is_shorter_than_minimum(busy in arb_busy_set(), min in arb_min_duration()) {
        for slot in derive_free_slots(&busy, &window(), min) {
            prop_assert!(slot.duration() >= min);
            prop_assert!(slot.duration() > Duration::zero());
        }
    }

    #[test]
    fn free_slots_never_overlap_busy_time(busy in arb_busy_set(), min in arb_min_duration()) {
        for slot in derive_free_slots(&busy, &window(), min) {
            for b in &busy {
                prop_assert!(!slot.overlaps(b), "{:?} overlaps busy {:?}", slot, b);
            }
        }
    }

    #[test]
    fn merged_busy_and_all_gaps_tile_the_window(busy in arb_busy_set()) {
        let window = window();
        let merged = merge_busy_periods(&busy);
        let gaps = derive_free_slots(&busy, &window, Duration::zero());

        for pair in merged.windows(2) {
            prop_assert!(pair[0].end() < pair[1].start());
        }

        let mut tiles: Vec<(DateTime<Tz>, DateTime<Tz>)> = merged
            .iter()
            .chain(gaps.iter())
            .map(|i| (i.start(), i.end()))
            .collect();
        tiles.sort();

        prop_assert_eq!(tiles.first().map(|t| t.0), Some(window.start()));
        prop_assert_eq!(tiles.last().map(|t| t.1), Some(window.end()));
        for pair in tiles.windows(2) {
            prop_assert_eq!(pair[0].1, pair[1].0, "seam between {:?} and {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn minimum_filter_only_removes_gaps(busy in arb_busy_set(), min in arb_min_duration()) {
        let window = window();
        let all_gaps = derive_free_slots(&busy, &window, Duration::zero());
        let filtered = derive_free_slots(&busy, &window, min);

        let expected: Vec<_> = all_gaps.into_iter().filter(|g| g.duration() >= min).collect();
        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn tentative_and_cancelled_never_contribute(occurrences in arb_occurrences()) {
        let window = window();
        let blocking: Vec<Occurrence> = occurrences
            .iter()
            .filter(|o| !matches!(o.status, Some(OccurrenceStatus::Tentative | OccurrenceStatus::Cancelled)))
            .cloned()
            .collect();

        prop_assert_eq!(normalize(&occurrences, &window), normalize(&blocking, &window));
    }

    #[test]
    fn normalized_intervals_lie_in_window(occurrences in arb_occurrences()) {
        let window = window();
        let bounds = TimeInterval::new(window.start(), window.end()).unwrap();
        for busy in normalize(&occurrences, &window) {
            prop_assert!(bounds.contains(&busy), "{:?} escapes the window", busy);
            prop_assert!(busy.start() < busy.end());
        }
    }
}
