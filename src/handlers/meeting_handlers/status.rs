use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::audit;
use crate::auth::session;
use crate::errors::AppError;
use crate::mirror::tables;
use crate::models::meeting;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ReasonPayload {
    pub reason: String,
}

#[derive(Deserialize)]
pub struct NotesPayload {
    #[serde(default)]
    pub notes: String,
}

/// POST /api/meetings/{id}/cancel
pub async fn cancel(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<ReasonPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let collections = state.snapshot();

    let (next, updated) = meeting::cancel(&collections.meetings, &id, &body.reason)?;
    state.commit_meetings(next)?;
    let remote = state.push_upsert(tables::MEETINGS, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "meeting.cancelled",
            "meeting",
            &id,
            serde_json::json!({ "reason": body.reason }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "meeting": updated,
        "remote": remote.as_str(),
    })))
}

/// POST /api/meetings/{id}/postpone
pub async fn postpone(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<ReasonPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let collections = state.snapshot();

    let (next, updated) = meeting::postpone(&collections.meetings, &id, &body.reason)?;
    state.commit_meetings(next)?;
    let remote = state.push_upsert(tables::MEETINGS, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "meeting.postponed",
            "meeting",
            &id,
            serde_json::json!({ "reason": body.reason }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "meeting": updated,
        "remote": remote.as_str(),
    })))
}

/// PUT /api/meetings/{id}/notes
pub async fn save_notes(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<NotesPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let collections = state.snapshot();

    let (next, updated) = meeting::save_notes(&collections.meetings, &id, &body.notes)?;
    state.commit_meetings(next)?;
    let remote = state.push_upsert(tables::MEETINGS, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "meeting.notes_saved",
            "meeting",
            &id,
            serde_json::json!({}),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "meeting": updated,
        "remote": remote.as_str(),
    })))
}
