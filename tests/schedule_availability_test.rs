use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use repair_desk::core::schedule::{ScheduleError, WeeklyCalendar, AVAILABILITY_NOTE};
use repair_desk::DeskConfig;

fn manila() -> FixedOffset {
    FixedOffset::east_opt(8 * 3600).unwrap()
}

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    manila()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

// Week of 2025-06-02: Mon 2nd ... Sun 8th
fn monday_morning() -> DateTime<Utc> {
    local(2025, 6, 2, 8, 0)
}

#[test]
fn default_week_matches_the_posted_hours() {
    let cal = WeeklyCalendar::default();
    let now = monday_morning();

    // Mon/Tue/Thu/Fri: 14:00-16:00 only
    for day in [2, 3, 5, 6] {
        assert!(
            cal.check_requested_time(local(2025, 6, day, 14, 30), now, manila())
                .is_ok(),
            "day {}",
            day
        );
        assert!(
            cal.check_requested_time(local(2025, 6, day, 13, 59), now, manila())
                .is_err(),
            "day {}",
            day
        );
    }

    // Wed/Sat: whole day
    assert!(cal
        .check_requested_time(local(2025, 6, 4, 7, 0), now, manila())
        .is_ok());
    assert!(cal
        .check_requested_time(local(2025, 6, 7, 22, 45), now, manila())
        .is_ok());
}

#[test]
fn out_of_window_rejection_quotes_the_note() {
    let cal = WeeklyCalendar::default();
    let err = cal
        .check_requested_time(local(2025, 6, 2, 10, 0), monday_morning(), manila())
        .unwrap_err();
    assert_eq!(err.to_string(), AVAILABILITY_NOTE);
}

#[test]
fn window_end_is_exclusive_but_start_is_inclusive() {
    let cal = WeeklyCalendar::default();
    let now = monday_morning();
    assert!(cal
        .check_requested_time(local(2025, 6, 2, 14, 0), now, manila())
        .is_ok());
    assert!(matches!(
        cal.check_requested_time(local(2025, 6, 2, 16, 0), now, manila()),
        Err(ScheduleError::OutsideWindows { .. })
    ));
}

#[test]
fn same_instant_is_not_in_the_past() {
    let cal = WeeklyCalendar::default();
    let wednesday = local(2025, 6, 4, 10, 0);
    assert!(cal.check_requested_time(wednesday, wednesday, manila()).is_ok());
}

#[test]
fn offset_changes_the_weekday_verdict() {
    let cal = WeeklyCalendar::default();
    let now = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
    // 22:00 UTC Saturday = 06:00 Sunday in Manila, but still Saturday in UTC-5
    let instant = Utc.with_ymd_and_hms(2025, 6, 7, 22, 0, 0).unwrap();
    assert!(matches!(
        cal.check_requested_time(instant, now, manila()),
        Err(ScheduleError::ClosedDay { day: "Sunday" })
    ));
    let lima = FixedOffset::east_opt(-5 * 3600).unwrap();
    assert!(cal.check_requested_time(instant, now, lima).is_ok());
}

#[test]
fn configured_week_drives_the_calendar() {
    let toml = r#"
[desk]
name = "desk"
description = "desk"
version = "1.0"

[schedule]
utc_offset = "+08:00"

[schedule.week]
monday = [[9, 12]]
saturday = [[8, 20]]
"#;
    let config = DeskConfig::from_toml_str(toml).unwrap();
    let cal = config.calendar();
    let now = monday_morning();

    assert!(cal
        .check_requested_time(local(2025, 6, 2, 9, 30), now, manila())
        .is_ok());
    // default slot hours are gone under the override
    assert!(cal
        .check_requested_time(local(2025, 6, 2, 14, 30), now, manila())
        .is_err());
    // unlisted days are closed, and the message names the day
    let err = cal
        .check_requested_time(local(2025, 6, 4, 10, 0), now, manila())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "We are closed on Wednesdays. Please pick another day."
    );
    // derived note mentions the custom spans
    assert!(cal.note().contains("Mon 09:00-12:00"));
}

#[test]
fn next_opening_walks_forward_across_days() {
    let cal = WeeklyCalendar::default();

    // Sunday anywhere -> Monday 14:00
    let next = cal.next_opening(local(2025, 6, 8, 9, 0), manila()).unwrap();
    assert_eq!(next, local(2025, 6, 9, 14, 0));

    // Friday after the slot -> Saturday midnight (whole day)
    let next = cal
        .next_opening(local(2025, 6, 6, 18, 0), manila())
        .unwrap();
    assert_eq!(next, local(2025, 6, 7, 0, 0));

    // mid-window stays put
    let next = cal
        .next_opening(local(2025, 6, 2, 15, 30), manila())
        .unwrap();
    assert_eq!(next, local(2025, 6, 2, 15, 30));
}
