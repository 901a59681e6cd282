//! CSV downloads: the meetings report and a meeting's endpoint pre-check
//! sheet. UTF-8 with byte-order mark so spreadsheet tools pick the right
//! encoding.

use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::meeting::Meeting;
use crate::models::report;
use crate::state::AppState;

const BOM: &str = "\u{feff}";

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Build the meetings report CSV.
pub fn meetings_csv(meetings: &[&Meeting]) -> String {
    let mut csv = String::from(BOM);
    csv.push_str(
        "title,host_unit,chair_person,start,end,endpoint_count,status,invite_link,description\n",
    );
    for m in meetings {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            escape_csv(&m.title),
            escape_csv(&m.host_unit),
            escape_csv(&m.chair_person),
            m.start.to_rfc3339(),
            m.end.to_rfc3339(),
            m.endpoints.len(),
            m.status,
            escape_csv(m.invite_link.as_deref().unwrap_or("")),
            escape_csv(&m.description),
        ));
    }
    csv
}

/// Build one meeting's endpoint pre-check CSV.
pub fn checks_csv(meeting: &Meeting) -> String {
    let mut csv = String::from(BOM);
    csv.push_str("endpoint,location,checked,notes\n");
    for ep in &meeting.endpoints {
        let check = meeting.tech_checks.get(&ep.id);
        csv.push_str(&format!(
            "{},{},{},{}\n",
            escape_csv(&ep.name),
            escape_csv(&ep.location),
            check.map(|c| c.checked).unwrap_or(false),
            escape_csv(check.map(|c| c.notes.as_str()).unwrap_or("")),
        ));
    }
    csv
}

fn csv_response(filename: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body)
}

#[derive(Deserialize)]
pub struct ExportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// GET /api/reports/export?from=&to= — meetings in range as CSV.
pub async fn export_meetings(
    state: web::Data<AppState>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, AppError> {
    if query.to < query.from {
        return Err(AppError::Validation(vec![
            "Range end must not precede range start".to_string(),
        ]));
    }
    let meetings = state.snapshot().meetings;
    let mut in_range = report::filter_range(&meetings, query.from, query.to);
    in_range.sort_by(|a, b| a.start.cmp(&b.start));

    let body = meetings_csv(&in_range);
    Ok(csv_response(
        &format!("meetings-{}-{}.csv", query.from, query.to),
        body,
    ))
}

/// GET /api/meetings/{id}/checks/export — one meeting's pre-check sheet.
pub async fn export_checks(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let meetings = state.snapshot().meetings;
    let meeting = meetings
        .iter()
        .find(|m| m.id == id)
        .ok_or(AppError::NotFound)?;

    let body = checks_csv(meeting);
    Ok(csv_response(&format!("checks-{id}.csv"), body))
}
