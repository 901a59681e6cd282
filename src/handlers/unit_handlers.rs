use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::audit;
use crate::auth::{session, validate};
use crate::errors::AppError;
use crate::mirror::tables;
use crate::models::unit::Unit;
use crate::models::{next_id, remove_by_id, replace_by_id};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UnitPayload {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn validate_payload(payload: &UnitPayload) -> Result<(), AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&payload.name, "Name", 100));
    errors.extend(validate::validate_required(&payload.code, "Code", 20));
    if let Some(desc) = &payload.description {
        errors.extend(validate::validate_optional(desc, "Description", 500));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// GET /api/units
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.snapshot().units))
}

/// POST /api/units
pub async fn create(
    state: web::Data<AppState>,
    sess: Session,
    body: web::Json<UnitPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&body)?;

    let created = Unit {
        id: next_id("UNIT"),
        name: body.name.trim().to_string(),
        code: body.code.trim().to_uppercase(),
        description: body.description.clone(),
    };
    let mut next = state.snapshot().units;
    next.push(created.clone());
    state.commit_units(next)?;
    let remote = state.push_upsert(tables::UNITS, &created).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "unit.created",
            "unit",
            &created.id,
            serde_json::json!({ "name": created.name }),
        );
    }

    Ok(HttpResponse::Created().json(serde_json::json!({
        "unit": created,
        "remote": remote.as_str(),
    })))
}

/// PUT /api/units/{id}
///
/// Does not rewrite `host_unit` snapshots in existing meetings.
pub async fn update(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<UnitPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&body)?;

    let id = path.into_inner();
    let units = state.snapshot().units;
    if !units.iter().any(|u| u.id == id) {
        return Err(AppError::NotFound);
    }

    let updated = Unit {
        id: id.clone(),
        name: body.name.trim().to_string(),
        code: body.code.trim().to_uppercase(),
        description: body.description.clone(),
    };
    let next = replace_by_id(&units, &id, |u| &u.id, updated.clone()).ok_or(AppError::NotFound)?;
    state.commit_units(next)?;
    let remote = state.push_upsert(tables::UNITS, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "unit.updated",
            "unit",
            &id,
            serde_json::json!({ "name": updated.name }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "unit": updated,
        "remote": remote.as_str(),
    })))
}

/// DELETE /api/units/{id} — no cascade into staff or meetings.
pub async fn delete(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let units = state.snapshot().units;

    let next = remove_by_id(&units, &id, |u| &u.id).ok_or(AppError::NotFound)?;
    state.commit_units(next)?;
    let remote = state.push_delete(tables::UNITS, &id).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "unit.deleted",
            "unit",
            &id,
            serde_json::json!({}),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "remote": remote.as_str() })))
}
