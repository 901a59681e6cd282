//! Report grouping: filter meetings into a date range, bucket by a derived
//! key, compute each bucket's percentage share.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::meeting::Meeting;

/// A saved report configuration. Local-only — the remote mirror schema has
/// no table for these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub id: String,
    pub name: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub group_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Day,
    Week,
    Month,
    Year,
    Unit,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(GroupBy::Day),
            "week" => Ok(GroupBy::Week),
            "month" => Ok(GroupBy::Month),
            "year" => Ok(GroupBy::Year),
            "unit" => Ok(GroupBy::Unit),
            other => Err(format!("Unknown group key: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportBucket {
    pub name: String,
    pub value: u32,
    pub pct: f64,
}

/// Meetings whose start date falls inside `[from, to]` (inclusive).
pub fn filter_range<'a>(meetings: &'a [Meeting], from: NaiveDate, to: NaiveDate) -> Vec<&'a Meeting> {
    meetings
        .iter()
        .filter(|m| {
            let d = m.start.date_naive();
            d >= from && d <= to
        })
        .collect()
}

fn bucket_key(meeting: &Meeting, by: GroupBy) -> String {
    let date = meeting.start.date_naive();
    match by {
        GroupBy::Day => date.format("%Y-%m-%d").to_string(),
        GroupBy::Week => {
            let iso = date.iso_week();
            format!("{}-W{:02}", iso.year(), iso.week())
        }
        GroupBy::Month => date.format("%Y-%m").to_string(),
        GroupBy::Year => date.format("%Y").to_string(),
        GroupBy::Unit => meeting.host_unit.clone(),
    }
}

/// Group the meetings inside a date range and compute percentage shares.
///
/// Percentages sum to 100 (up to rounding) across buckets; an empty
/// filtered set yields an empty table rather than dividing by zero.
pub fn group_meetings(
    meetings: &[Meeting],
    from: NaiveDate,
    to: NaiveDate,
    by: GroupBy,
) -> Vec<ReportBucket> {
    let in_range = filter_range(meetings, from, to);
    let total = in_range.len() as u32;
    if total == 0 {
        return Vec::new();
    }

    let mut buckets: Vec<ReportBucket> = Vec::new();
    for m in in_range {
        let key = bucket_key(m, by);
        match buckets.iter_mut().find(|b| b.name == key) {
            Some(bucket) => bucket.value += 1,
            None => buckets.push(ReportBucket {
                name: key,
                value: 1,
                pct: 0.0,
            }),
        }
    }
    for bucket in &mut buckets {
        bucket.pct = f64::from(bucket.value) * 100.0 / f64::from(total);
    }

    match by {
        // Time keys sort chronologically by their lexical form.
        GroupBy::Day | GroupBy::Week | GroupBy::Month | GroupBy::Year => {
            buckets.sort_by(|a, b| a.name.cmp(&b.name));
        }
        GroupBy::Unit => {
            buckets.sort_by(|a, b| b.value.cmp(&a.value).then(a.name.cmp(&b.name)));
        }
    }
    buckets
}
