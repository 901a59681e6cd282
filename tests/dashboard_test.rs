//! Dashboard derivation tests — weekday histogram, month/year/unit
//! aggregates, period filters.

mod common;

use common::*;

use vcadmin::models::dashboard::{self, PeriodFilter};

// fixed_now() is Wednesday 2024-05-22; its Monday-Sunday window is
// 2024-05-20 through 2024-05-26.

#[test]
fn weekday_histogram_counts_current_week_only() {
    let meetings = vec![
        meeting("M1", "2024-05-20T08:00:00Z", "Unit A"), // Monday
        meeting("M2", "2024-05-22T10:00:00Z", "Unit A"), // Wednesday
        meeting("M3", "2024-05-22T15:00:00Z", "Unit B"), // Wednesday
        meeting("M4", "2024-05-26T09:00:00Z", "Unit B"), // Sunday
        meeting("M5", "2024-05-13T08:00:00Z", "Unit A"), // previous Monday
        meeting("M6", "2024-06-03T08:00:00Z", "Unit A"), // next month
    ];

    let slots = dashboard::weekday_histogram(&meetings, fixed_now().date_naive());
    assert_eq!(slots, [1, 0, 2, 0, 0, 0, 1]);

    let in_week = 4;
    assert_eq!(slots.iter().sum::<u32>(), in_week);
}

#[test]
fn weekday_histogram_is_all_zero_for_empty_collection() {
    let slots = dashboard::weekday_histogram(&[], fixed_now().date_naive());
    assert_eq!(slots, [0; 7]);
}

#[test]
fn monthly_counts_cover_every_meeting() {
    let meetings = vec![
        meeting("M1", "2024-05-20T08:00:00Z", "Unit A"),
        meeting("M2", "2024-05-21T08:00:00Z", "Unit A"),
        meeting("M3", "2023-05-10T08:00:00Z", "Unit A"), // same month, other year
        meeting("M4", "2024-06-01T08:00:00Z", "Unit B"),
        meeting("M5", "2024-01-15T08:00:00Z", "Unit B"),
    ];

    let monthly = dashboard::monthly_counts(&meetings);
    let total: u32 = monthly.iter().map(|b| b.value).sum();
    assert_eq!(total as usize, meetings.len());

    // Ascending by month number; month label alone, any year.
    let names: Vec<&str> = monthly.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["Jan", "May", "Jun"]);
    assert_eq!(monthly[1].value, 3);
}

#[test]
fn yearly_counts_sort_ascending() {
    let meetings = vec![
        meeting("M1", "2024-05-20T08:00:00Z", "Unit A"),
        meeting("M2", "2022-03-01T08:00:00Z", "Unit A"),
        meeting("M3", "2024-07-01T08:00:00Z", "Unit A"),
    ];

    let yearly = dashboard::yearly_counts(&meetings);
    let names: Vec<&str> = yearly.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["2022", "2024"]);
    assert_eq!(yearly[1].value, 2);
}

#[test]
fn unit_counts_sort_descending_by_count() {
    let meetings = vec![
        meeting("M1", "2024-05-20T08:00:00Z", "Unit B"),
        meeting("M2", "2024-05-21T08:00:00Z", "Unit A"),
        meeting("M3", "2024-05-22T08:00:00Z", "Unit B"),
    ];

    let units = dashboard::unit_counts(&meetings);
    assert_eq!(units[0].name, "Unit B");
    assert_eq!(units[0].value, 2);
    assert_eq!(units[1].name, "Unit A");
    assert_eq!(units[1].value, 1);
}

#[test]
fn week_filter_spans_monday_to_now() {
    let meetings = vec![
        meeting("M1", "2024-05-20T00:00:00Z", "Unit A"), // Monday midnight
        meeting("M2", "2024-05-22T11:59:00Z", "Unit A"), // just before now
        meeting("M3", "2024-05-22T13:00:00Z", "Unit A"), // after now
        meeting("M4", "2024-05-19T23:59:00Z", "Unit A"), // Sunday before
    ];

    let selected = dashboard::select_for_period(&meetings, PeriodFilter::Week, fixed_now());
    let ids: Vec<&str> = selected.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["M1", "M2"]);
}

#[test]
fn month_filter_matches_month_of_any_year() {
    // Documented current behavior: the month filter compares calendar month
    // number only, so May meetings of any year match in May.
    let meetings = vec![
        meeting("M1", "2024-05-02T08:00:00Z", "Unit A"),
        meeting("M2", "2019-05-30T08:00:00Z", "Unit A"),
        meeting("M3", "2024-04-30T08:00:00Z", "Unit A"),
    ];

    let selected = dashboard::select_for_period(&meetings, PeriodFilter::Month, fixed_now());
    let ids: Vec<&str> = selected.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["M1", "M2"]);
}

#[test]
fn recent_filter_returns_ten_newest_descending() {
    let mut meetings = Vec::new();
    for day in 1..=12 {
        meetings.push(meeting(
            &format!("M{day}"),
            &format!("2024-03-{day:02}T08:00:00Z"),
            "Unit A",
        ));
    }

    let selected = dashboard::select_for_period(&meetings, PeriodFilter::Recent, fixed_now());
    assert_eq!(selected.len(), 10);
    assert_eq!(selected[0].id, "M12");
    assert_eq!(selected[9].id, "M3");
}

#[test]
fn period_parse_defaults_to_recent() {
    assert_eq!(PeriodFilter::parse("week"), PeriodFilter::Week);
    assert_eq!(PeriodFilter::parse("month"), PeriodFilter::Month);
    assert_eq!(PeriodFilter::parse("year"), PeriodFilter::Recent);
    assert_eq!(PeriodFilter::parse(""), PeriodFilter::Recent);
}
