//! Calendar grid tests — cell counts, weekday alignment, per-day meeting
//! buckets.

mod common;

use common::*;
use chrono::NaiveDate;

use vcadmin::models::calendar::{DayCell, month_grid};

fn flatten(grid: &[Vec<Option<DayCell>>]) -> Vec<&Option<DayCell>> {
    grid.iter().flatten().collect()
}

#[test]
fn grid_has_one_cell_per_day_of_month() {
    // May 2024 has 31 days and starts on a Wednesday.
    let grid = month_grid(2024, 5, &[]).expect("valid month");
    let cells = flatten(&grid);

    let real: Vec<_> = cells.iter().filter(|c| c.is_some()).collect();
    assert_eq!(real.len(), 31);

    // Every week is exactly 7 wide.
    for week in &grid {
        assert_eq!(week.len(), 7);
    }
}

#[test]
fn first_day_lands_in_its_weekday_column() {
    // 2024-05-01 is a Wednesday: two leading pads, first real cell at index 2.
    let grid = month_grid(2024, 5, &[]).expect("valid month");
    assert!(grid[0][0].is_none());
    assert!(grid[0][1].is_none());
    let first = grid[0][2].as_ref().expect("first day cell");
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"));
}

#[test]
fn monday_first_month_has_no_leading_pad() {
    // 2024-04-01 is a Monday.
    let grid = month_grid(2024, 4, &[]).expect("valid month");
    let first = grid[0][0].as_ref().expect("first day cell");
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date"));

    let real = flatten(&grid).iter().filter(|c| c.is_some()).count();
    assert_eq!(real, 30);
}

#[test]
fn february_leap_year_has_29_cells() {
    let grid = month_grid(2024, 2, &[]).expect("valid month");
    let real = flatten(&grid).iter().filter(|c| c.is_some()).count();
    assert_eq!(real, 29);
}

#[test]
fn december_grid_handles_year_rollover() {
    let grid = month_grid(2023, 12, &[]).expect("valid month");
    let real = flatten(&grid).iter().filter(|c| c.is_some()).count();
    assert_eq!(real, 31);
}

#[test]
fn invalid_month_is_rejected() {
    assert!(month_grid(2024, 0, &[]).is_none());
    assert!(month_grid(2024, 13, &[]).is_none());
}

#[test]
fn day_cells_bucket_meetings_sorted_by_start() {
    let meetings = vec![
        meeting("M-late", "2024-05-15T14:00:00Z", "Unit A"),
        meeting("M-early", "2024-05-15T08:00:00Z", "Unit A"),
        meeting("M-other-day", "2024-05-16T08:00:00Z", "Unit A"),
        meeting("M-other-month", "2024-06-15T08:00:00Z", "Unit A"),
    ];

    let grid = month_grid(2024, 5, &meetings).expect("valid month");
    let cells = flatten(&grid);
    let day15 = cells
        .iter()
        .filter_map(|c| c.as_ref())
        .find(|c| c.date == NaiveDate::from_ymd_opt(2024, 5, 15).expect("valid date"))
        .expect("day 15 present");

    let ids: Vec<&str> = day15.meetings.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["M-early", "M-late"]);

    let day1 = cells
        .iter()
        .filter_map(|c| c.as_ref())
        .find(|c| c.date == NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date"))
        .expect("day 1 present");
    assert!(day1.meetings.is_empty());
}
