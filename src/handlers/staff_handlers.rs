use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::collections::HashMap;

use crate::audit;
use crate::auth::{session, validate};
use crate::errors::AppError;
use crate::mirror::tables;
use crate::models::staff::{self, Staff};
use crate::models::{next_id, remove_by_id, replace_by_id};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct StaffPayload {
    pub full_name: String,
    pub unit_id: String,
    pub position: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

fn validate_payload(payload: &StaffPayload, state: &AppState) -> Result<(), AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(
        &payload.full_name,
        "Full name",
        100,
    ));
    errors.extend(validate::validate_required(
        &payload.position,
        "Position",
        100,
    ));
    if !state
        .snapshot()
        .units
        .iter()
        .any(|u| u.id == payload.unit_id)
    {
        errors.push("Unit not found".to_string());
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// GET /api/staff — optionally filtered by unit for chair assignment.
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let all = state.snapshot().staff;
    match query.get("unit_id") {
        Some(unit_id) => Ok(HttpResponse::Ok().json(staff::filter_by_unit(&all, unit_id))),
        None => Ok(HttpResponse::Ok().json(all)),
    }
}

/// POST /api/staff
pub async fn create(
    state: web::Data<AppState>,
    sess: Session,
    body: web::Json<StaffPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&body, &state)?;

    let created = Staff {
        id: next_id("STF"),
        full_name: body.full_name.trim().to_string(),
        unit_id: body.unit_id.clone(),
        position: body.position.trim().to_string(),
        email: body.email.clone(),
        phone: body.phone.clone(),
    };
    let mut next = state.snapshot().staff;
    next.push(created.clone());
    state.commit_staff(next)?;
    let remote = state.push_upsert(tables::STAFF, &created).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "staff.created",
            "staff",
            &created.id,
            serde_json::json!({ "full_name": created.full_name }),
        );
    }

    Ok(HttpResponse::Created().json(serde_json::json!({
        "staff": created,
        "remote": remote.as_str(),
    })))
}

/// PUT /api/staff/{id}
pub async fn update(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<StaffPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&body, &state)?;

    let id = path.into_inner();
    let all = state.snapshot().staff;
    if !all.iter().any(|s| s.id == id) {
        return Err(AppError::NotFound);
    }

    let updated = Staff {
        id: id.clone(),
        full_name: body.full_name.trim().to_string(),
        unit_id: body.unit_id.clone(),
        position: body.position.trim().to_string(),
        email: body.email.clone(),
        phone: body.phone.clone(),
    };
    let next = replace_by_id(&all, &id, |s| &s.id, updated.clone()).ok_or(AppError::NotFound)?;
    state.commit_staff(next)?;
    let remote = state.push_upsert(tables::STAFF, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "staff.updated",
            "staff",
            &id,
            serde_json::json!({ "full_name": updated.full_name }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "staff": updated,
        "remote": remote.as_str(),
    })))
}

/// DELETE /api/staff/{id} — no cascade; meetings keep their chair snapshot.
pub async fn delete(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let all = state.snapshot().staff;

    let next = remove_by_id(&all, &id, |s| &s.id).ok_or(AppError::NotFound)?;
    state.commit_staff(next)?;
    let remote = state.push_delete(tables::STAFF, &id).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "staff.deleted",
            "staff",
            &id,
            serde_json::json!({}),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "remote": remote.as_str() })))
}
