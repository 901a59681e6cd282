use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::audit;
use crate::auth::{session, validate};
use crate::errors::AppError;
use crate::mirror::tables;
use crate::models::endpoint::Endpoint;
use crate::models::meeting::{self, MeetingDraft};
use crate::models::next_id;
use crate::state::{AppState, Collections};

#[derive(Deserialize)]
pub struct MeetingPayload {
    pub title: String,
    pub host_unit_id: String,
    pub chair_person_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub participant_groups: Vec<String>,
    pub endpoint_ids: Vec<String>,
    #[serde(default)]
    pub invite_link: Option<String>,
}

/// Validate the payload and resolve its snapshot fields (unit name, chair
/// name, endpoint records) from the live collections.
fn resolve_draft(
    payload: &MeetingPayload,
    collections: &Collections,
) -> Result<MeetingDraft, AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&payload.title, "Title", 200));
    errors.extend(validate::validate_optional(
        &payload.description,
        "Description",
        2000,
    ));
    if payload.end <= payload.start {
        errors.push("End time must be after start time".to_string());
    }

    let unit = collections
        .units
        .iter()
        .find(|u| u.id == payload.host_unit_id);
    if unit.is_none() {
        errors.push("Host unit not found".to_string());
    }
    let chair = collections
        .staff
        .iter()
        .find(|s| s.id == payload.chair_person_id);
    if chair.is_none() {
        errors.push("Chair person not found".to_string());
    }

    // A meeting must reference at least one endpoint at creation time.
    let mut endpoints: Vec<Endpoint> = Vec::new();
    for id in &payload.endpoint_ids {
        match collections.endpoints.iter().find(|ep| &ep.id == id) {
            Some(ep) if !endpoints.iter().any(|e| e.id == ep.id) => endpoints.push(ep.clone()),
            Some(_) => {}
            None => errors.push(format!("Unknown endpoint: {id}")),
        }
    }
    if endpoints.is_empty() {
        errors.push("At least one endpoint is required".to_string());
    }

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let unit = unit.expect("validated above");
    let chair = chair.expect("validated above");
    Ok(MeetingDraft {
        title: payload.title.trim().to_string(),
        host_unit: unit.name.clone(),
        host_unit_id: unit.id.clone(),
        chair_person: chair.full_name.clone(),
        chair_person_id: chair.id.clone(),
        start: payload.start,
        end: payload.end,
        description: payload.description.trim().to_string(),
        participant_groups: payload.participant_groups.clone(),
        endpoints,
        invite_link: payload
            .invite_link
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    })
}

/// GET /api/meetings
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let mut meetings = state.snapshot().meetings;
    meetings.sort_by(|a, b| b.start.cmp(&a.start));
    Ok(HttpResponse::Ok().json(meetings))
}

/// GET /api/meetings/{id}
pub async fn read(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let meetings = state.snapshot().meetings;
    let meeting = meetings
        .iter()
        .find(|m| m.id == id)
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(meeting))
}

/// POST /api/meetings
pub async fn create(
    state: web::Data<AppState>,
    sess: Session,
    body: web::Json<MeetingPayload>,
) -> Result<HttpResponse, AppError> {
    let collections = state.snapshot();
    let draft = resolve_draft(&body, &collections)?;

    let (next, created) = meeting::schedule(&collections.meetings, next_id("MTG"), draft);
    state.commit_meetings(next)?;
    let remote = state.push_upsert(tables::MEETINGS, &created).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "meeting.scheduled",
            "meeting",
            &created.id,
            serde_json::json!({ "title": created.title, "endpoints": created.endpoints.len() }),
        );
    }

    Ok(HttpResponse::Created().json(serde_json::json!({
        "meeting": created,
        "remote": remote.as_str(),
    })))
}

/// PUT /api/meetings/{id}
pub async fn update(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<MeetingPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let collections = state.snapshot();
    let draft = resolve_draft(&body, &collections)?;

    let (next, updated) = meeting::edit(&collections.meetings, &id, draft)?;
    state.commit_meetings(next)?;
    let remote = state.push_upsert(tables::MEETINGS, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "meeting.updated",
            "meeting",
            &id,
            serde_json::json!({ "title": updated.title }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "meeting": updated,
        "remote": remote.as_str(),
    })))
}

/// DELETE /api/meetings/{id}
pub async fn delete(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let collections = state.snapshot();

    let next = meeting::remove(&collections.meetings, &id)?;
    state.commit_meetings(next)?;
    let remote = state.push_delete(tables::MEETINGS, &id).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "meeting.deleted",
            "meeting",
            &id,
            serde_json::json!({}),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "remote": remote.as_str() })))
}
