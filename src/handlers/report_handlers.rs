use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use std::str::FromStr;

use crate::audit;
use crate::auth::{session, validate};
use crate::errors::AppError;
use crate::models::report::{self, GroupBy, ReportConfig};
use crate::models::{next_id, remove_by_id};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub group_by: String,
}

/// GET /api/reports?from=&to=&group_by=day|week|month|year|unit
pub async fn run(
    state: web::Data<AppState>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    if query.to < query.from {
        return Err(AppError::Validation(vec![
            "Range end must not precede range start".to_string(),
        ]));
    }
    let group_by = GroupBy::from_str(&query.group_by)
        .map_err(|e| AppError::Validation(vec![e]))?;

    let meetings = state.snapshot().meetings;
    let buckets = report::group_meetings(&meetings, query.from, query.to, group_by);
    let total: u32 = buckets.iter().map(|b| b.value).sum();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "from": query.from,
        "to": query.to,
        "group_by": query.group_by,
        "total": total,
        "buckets": buckets,
    })))
}

#[derive(Deserialize)]
pub struct SaveConfigPayload {
    pub name: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub group_by: String,
}

/// GET /api/reports/saved
pub async fn list_saved(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.snapshot().report_configs))
}

/// POST /api/reports/saved
pub async fn save_config(
    state: web::Data<AppState>,
    sess: Session,
    body: web::Json<SaveConfigPayload>,
) -> Result<HttpResponse, AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&body.name, "Name", 100));
    if GroupBy::from_str(&body.group_by).is_err() {
        errors.push(format!("Unknown group key: {}", body.group_by));
    }
    if body.to < body.from {
        errors.push("Range end must not precede range start".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let created = ReportConfig {
        id: next_id("RPT"),
        name: body.name.trim().to_string(),
        from: body.from,
        to: body.to,
        group_by: body.group_by.clone(),
    };
    let mut next = state.snapshot().report_configs;
    next.push(created.clone());
    state.commit_report_configs(next)?;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "report.saved",
            "report_config",
            &created.id,
            serde_json::json!({ "name": created.name }),
        );
    }

    Ok(HttpResponse::Created().json(created))
}

/// DELETE /api/reports/saved/{id}
pub async fn delete_config(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let configs = state.snapshot().report_configs;

    let next = remove_by_id(&configs, &id, |c| &c.id).ok_or(AppError::NotFound)?;
    state.commit_report_configs(next)?;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "report.deleted",
            "report_config",
            &id,
            serde_json::json!({}),
        );
    }

    Ok(HttpResponse::NoContent().finish())
}
