use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::audit;
use crate::auth::{session, validate};
use crate::errors::AppError;
use crate::models::group::ParticipantGroup;
use crate::models::{next_id, remove_by_id, replace_by_id};
use crate::state::AppState;

// Participant groups are informational and local-only: the remote mirror
// schema has no table for them.

#[derive(Deserialize)]
pub struct GroupPayload {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn validate_payload(payload: &GroupPayload) -> Result<(), AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&payload.name, "Name", 100));
    if let Some(desc) = &payload.description {
        errors.extend(validate::validate_optional(desc, "Description", 500));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// GET /api/groups
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.snapshot().groups))
}

/// POST /api/groups
pub async fn create(
    state: web::Data<AppState>,
    sess: Session,
    body: web::Json<GroupPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&body)?;

    let created = ParticipantGroup {
        id: next_id("GRP"),
        name: body.name.trim().to_string(),
        description: body.description.clone(),
    };
    let mut next = state.snapshot().groups;
    next.push(created.clone());
    state.commit_groups(next)?;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "group.created",
            "group",
            &created.id,
            serde_json::json!({ "name": created.name }),
        );
    }

    Ok(HttpResponse::Created().json(created))
}

/// PUT /api/groups/{id}
pub async fn update(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<GroupPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&body)?;

    let id = path.into_inner();
    let groups = state.snapshot().groups;

    let updated = ParticipantGroup {
        id: id.clone(),
        name: body.name.trim().to_string(),
        description: body.description.clone(),
    };
    let next = replace_by_id(&groups, &id, |g| &g.id, updated.clone()).ok_or(AppError::NotFound)?;
    state.commit_groups(next)?;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "group.updated",
            "group",
            &id,
            serde_json::json!({ "name": updated.name }),
        );
    }

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/groups/{id}
pub async fn delete(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let groups = state.snapshot().groups;

    let next = remove_by_id(&groups, &id, |g| &g.id).ok_or(AppError::NotFound)?;
    state.commit_groups(next)?;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "group.deleted",
            "group",
            &id,
            serde_json::json!({}),
        );
    }

    Ok(HttpResponse::NoContent().finish())
}
