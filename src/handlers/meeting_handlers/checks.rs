use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::audit;
use crate::auth::session;
use crate::errors::AppError;
use crate::mirror::tables;
use crate::models::meeting::{self, TechCheck};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ChecksPayload {
    pub checks: BTreeMap<String, TechCheck>,
}

/// PUT /api/meetings/{id}/checks — save the per-endpoint technical-check
/// records. Keys must be endpoint ids embedded in the meeting.
pub async fn save_checks(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<ChecksPayload>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let collections = state.snapshot();

    let (next, updated) =
        meeting::save_tech_checks(&collections.meetings, &id, body.into_inner().checks)?;
    state.commit_meetings(next)?;
    let remote = state.push_upsert(tables::MEETINGS, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "meeting.checks_saved",
            "meeting",
            &id,
            serde_json::json!({ "checked": updated.tech_checks.values().filter(|c| c.checked).count() }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "meeting": updated,
        "remote": remote.as_str(),
    })))
}
