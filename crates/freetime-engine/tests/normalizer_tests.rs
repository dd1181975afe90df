//! Tests for occurrence normalization into busy intervals.

use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use freetime_engine::dst::DstPolicy;
use freetime_engine::{normalize, Occurrence, OccurrenceStatus, OccurrenceTime, WorkHours, WorkWindow};

// ── Helpers ─────────────────────────────────────────────────────────────────

const LA: Tz = chrono_tz::America::Los_Angeles;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
}

/// 09:00-17:00 in Los Angeles on 2026-03-16 (PDT, UTC-7).
fn la_window() -> WorkWindow {
    WorkWindow::for_date(date(), WorkHours::default(), LA, DstPolicy::default()).unwrap()
}

fn la(hour: u32, min: u32) -> DateTime<Tz> {
    LA.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn occ(start: &str, end: &str) -> Occurrence {
    Occurrence::new(
        start.parse::<OccurrenceTime>().unwrap(),
        end.parse::<OccurrenceTime>().unwrap(),
    )
}

// ── Status filtering ────────────────────────────────────────────────────────

#[test]
fn tentative_and_cancelled_do_not_block_time() {
    let occurrences = vec![
        occ("2026-03-16T10:00:00-07:00", "2026-03-16T11:00:00-07:00")
            .with_status(OccurrenceStatus::Tentative),
        occ("2026-03-16T12:00:00-07:00", "2026-03-16T13:00:00-07:00")
            .with_status(OccurrenceStatus::Cancelled),
    ];

    assert!(normalize(&occurrences, &la_window()).is_empty());
}

#[test]
fn confirmed_unknown_and_missing_status_block_time() {
    let occurrences = vec![
        occ("2026-03-16T10:00:00-07:00", "2026-03-16T11:00:00-07:00")
            .with_status(OccurrenceStatus::Confirmed),
        occ("2026-03-16T12:00:00-07:00", "2026-03-16T13:00:00-07:00")
            .with_status(OccurrenceStatus::Unknown),
        occ("2026-03-16T14:00:00-07:00", "2026-03-16T15:00:00-07:00"),
    ];

    let busy = normalize(&occurrences, &la_window());

    assert_eq!(busy.len(), 3);
}

#[test]
fn unrecognised_status_text_counts_as_busy() {
    assert_eq!(OccurrenceStatus::from("busy"), OccurrenceStatus::Unknown);
    assert_eq!(OccurrenceStatus::from("tentative"), OccurrenceStatus::Tentative);
    assert!(OccurrenceStatus::from("OOF").blocks_time());
}

// ── Malformed occurrences ───────────────────────────────────────────────────

#[test]
fn all_day_occurrences_are_skipped() {
    let occurrences = vec![occ("2026-03-16", "2026-03-17")];

    assert!(normalize(&occurrences, &la_window()).is_empty());
}

#[test]
fn missing_endpoints_are_skipped() {
    let mut missing_end = occ("2026-03-16T10:00:00-07:00", "2026-03-16T11:00:00-07:00");
    missing_end.end = None;
    let missing_both = Occurrence::default();

    assert!(normalize(&[missing_end, missing_both], &la_window()).is_empty());
}

#[test]
fn unparseable_timestamps_deserialize_to_none() {
    let json = r#"[
        {"start": "not a time", "end": "2026-03-16T11:00:00-07:00", "status": "CONFIRMED"},
        {"start": "2026-03-16T10:00:00-07:00", "end": "2026-03-16T11:00:00-07:00"}
    ]"#;

    let occurrences: Vec<Occurrence> = serde_json::from_str(json).unwrap();
    assert!(occurrences[0].start.is_none());
    assert_eq!(occurrences[1].status, None);

    let busy = normalize(&occurrences, &la_window());
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].start(), la(10, 0));
}

#[test]
fn inverted_occurrence_is_skipped() {
    let occurrences = vec![occ("2026-03-16T11:00:00-07:00", "2026-03-16T10:00:00-07:00")];

    assert!(normalize(&occurrences, &la_window()).is_empty());
}

// ── Zone handling ───────────────────────────────────────────────────────────

#[test]
fn floating_times_are_read_as_utc() {
    // 17:00 UTC is 10:00 PDT.
    let occurrences = vec![occ("2026-03-16T17:00:00", "2026-03-16T18:00:00")];

    let busy = normalize(&occurrences, &la_window());

    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].start(), la(10, 0));
    assert_eq!(busy[0].end(), la(11, 0));
}

#[test]
fn zoned_times_are_converted_to_target_zone() {
    // 12:00 in New York (EDT, UTC-4) is 09:00 in Los Angeles.
    let occurrences = vec![occ("2026-03-16T12:00:00-04:00", "2026-03-16T13:30:00-04:00")];

    let busy = normalize(&occurrences, &la_window());

    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].start(), la(9, 0));
    assert_eq!(busy[0].end(), la(10, 30));
    assert_eq!(busy[0].start().timezone(), LA);
}

// ── Clamping and day filtering ──────────────────────────────────────────────

#[test]
fn occurrences_are_clamped_to_the_work_window() {
    let occurrences = vec![
        occ("2026-03-16T07:00:00-07:00", "2026-03-16T09:45:00-07:00"),
        occ("2026-03-16T16:30:00-07:00", "2026-03-16T19:00:00-07:00"),
    ];

    let busy = normalize(&occurrences, &la_window());

    assert_eq!(busy.len(), 2);
    assert_eq!((busy[0].start(), busy[0].end()), (la(9, 0), la(9, 45)));
    assert_eq!((busy[1].start(), busy[1].end()), (la(16, 30), la(17, 0)));
}

#[test]
fn occurrences_outside_the_window_are_dropped() {
    let occurrences = vec![
        occ("2026-03-16T07:00:00-07:00", "2026-03-16T09:00:00-07:00"),
        occ("2026-03-16T17:00:00-07:00", "2026-03-16T18:00:00-07:00"),
    ];

    assert!(normalize(&occurrences, &la_window()).is_empty());
}

#[test]
fn neighbouring_day_spillover_is_dropped() {
    let occurrences = vec![
        occ("2026-03-15T10:00:00-07:00", "2026-03-15T11:00:00-07:00"),
        occ("2026-03-17T10:00:00-07:00", "2026-03-17T11:00:00-07:00"),
    ];

    assert!(normalize(&occurrences, &la_window()).is_empty());
}

#[test]
fn overnight_occurrence_ending_today_is_kept() {
    let occurrences = vec![occ("2026-03-15T22:00:00-07:00", "2026-03-16T09:30:00-07:00")];

    let busy = normalize(&occurrences, &la_window());

    assert_eq!(busy.len(), 1);
    assert_eq!((busy[0].start(), busy[0].end()), (la(9, 0), la(9, 30)));
}

#[test]
fn output_preserves_input_order() {
    let occurrences = vec![
        occ("2026-03-16T15:00:00-07:00", "2026-03-16T16:00:00-07:00"),
        occ("2026-03-16T10:00:00-07:00", "2026-03-16T11:00:00-07:00"),
    ];

    let busy = normalize(&occurrences, &la_window());

    assert_eq!(busy[0].start(), la(15, 0));
    assert_eq!(busy[1].start(), la(10, 0));
}
