use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::meeting::Meeting;

/// One real day in the month grid, with that day's meetings attached.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub meetings: Vec<Meeting>,
}

/// Week-major month grid, Monday first.
///
/// Each inner vec is one 7-wide week; leading and trailing `None` cells pad
/// the first and last weeks. Returns `None` for an invalid year/month.
pub fn month_grid(
    year: i32,
    month: u32,
    meetings: &[Meeting],
) -> Option<Vec<Vec<Option<DayCell>>>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days = (first_of_next - first).num_days();

    let mut cells: Vec<Option<DayCell>> = Vec::new();
    for _ in 0..first.weekday().num_days_from_monday() {
        cells.push(None);
    }
    for offset in 0..days {
        let date = first + Duration::days(offset);
        let mut day_meetings: Vec<Meeting> = meetings
            .iter()
            .filter(|m| m.start.date_naive() == date)
            .cloned()
            .collect();
        day_meetings.sort_by(|a, b| a.start.cmp(&b.start));
        cells.push(Some(DayCell {
            date,
            meetings: day_meetings,
        }));
    }
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    Some(cells.chunks(7).map(|week| week.to_vec()).collect())
}
