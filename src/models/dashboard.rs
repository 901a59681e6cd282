//! Dashboard aggregates, recomputed from the meetings collection on demand.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::models::meeting::Meeting;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub name: String,
    pub value: u32,
}

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Monday of the week containing `day`.
pub fn week_start(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_monday()))
}

/// Fixed 7-slot histogram (Monday first) of meetings whose start date falls
/// in the Monday-Sunday week containing `today`.
pub fn weekday_histogram(meetings: &[Meeting], today: NaiveDate) -> [u32; 7] {
    let monday = week_start(today);
    let sunday = monday + Duration::days(6);
    let mut slots = [0u32; 7];
    for m in meetings {
        let d = m.start.date_naive();
        if d >= monday && d <= sunday {
            slots[m.start.weekday().num_days_from_monday() as usize] += 1;
        }
    }
    slots
}

/// Meetings per calendar month label, ascending by month number.
///
/// Bucketing is on the month label alone, not month+year — every meeting
/// lands in exactly one of the twelve labels, so the counts sum to the
/// collection total. This mirrors the month-number matching used by the
/// dashboard period filter.
pub fn monthly_counts(meetings: &[Meeting]) -> Vec<Bucket> {
    let mut counts = [0u32; 12];
    for m in meetings {
        counts[m.start.month0() as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(month0, &count)| Bucket {
            name: MONTH_LABELS[month0].to_string(),
            value: count,
        })
        .collect()
}

/// Meetings per calendar year, ascending by year.
pub fn yearly_counts(meetings: &[Meeting]) -> Vec<Bucket> {
    let mut years: Vec<(i32, u32)> = Vec::new();
    for m in meetings {
        let year = m.start.year();
        match years.iter_mut().find(|(y, _)| *y == year) {
            Some((_, count)) => *count += 1,
            None => years.push((year, 1)),
        }
    }
    years.sort_by_key(|(year, _)| *year);
    years
        .into_iter()
        .map(|(year, count)| Bucket {
            name: year.to_string(),
            value: count,
        })
        .collect()
}

/// Meetings per hosting unit, descending by count (name ascending on ties).
pub fn unit_counts(meetings: &[Meeting]) -> Vec<Bucket> {
    let mut units: Vec<Bucket> = Vec::new();
    for m in meetings {
        match units.iter_mut().find(|b| b.name == m.host_unit) {
            Some(bucket) => bucket.value += 1,
            None => units.push(Bucket {
                name: m.host_unit.clone(),
                value: 1,
            }),
        }
    }
    units.sort_by(|a, b| b.value.cmp(&a.value).then(a.name.cmp(&b.name)));
    units
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodFilter {
    Week,
    Month,
    Recent,
}

impl PeriodFilter {
    /// Anything other than "week" or "month" falls through to the
    /// most-recent-10 listing.
    pub fn parse(s: &str) -> PeriodFilter {
        match s {
            "week" => PeriodFilter::Week,
            "month" => PeriodFilter::Month,
            _ => PeriodFilter::Recent,
        }
    }
}

/// Select the dashboard meeting list for a period filter.
///
/// `Week` spans Monday 00:00 of the current week through `now`. `Month`
/// matches the calendar month number of `now` in any year — documented
/// current behavior, pending product clarification. `Recent` is the 10
/// most recent meetings by start time, newest first.
pub fn select_for_period(
    meetings: &[Meeting],
    filter: PeriodFilter,
    now: DateTime<Utc>,
) -> Vec<Meeting> {
    match filter {
        PeriodFilter::Week => {
            let monday = week_start(now.date_naive())
                .and_hms_opt(0, 0, 0)
                .expect("midnight is a valid time")
                .and_utc();
            meetings
                .iter()
                .filter(|m| m.start >= monday && m.start <= now)
                .cloned()
                .collect()
        }
        PeriodFilter::Month => meetings
            .iter()
            .filter(|m| m.start.month() == now.month())
            .cloned()
            .collect(),
        PeriodFilter::Recent => {
            let mut recent = meetings.to_vec();
            recent.sort_by(|a, b| b.start.cmp(&a.start));
            recent.truncate(10);
            recent
        }
    }
}
