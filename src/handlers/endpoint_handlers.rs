use actix_session::Session;
use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use crate::audit;
use crate::auth::{session, validate};
use crate::errors::AppError;
use crate::mirror::tables;
use crate::models::endpoint::{self, Endpoint, EndpointStatus};
use crate::models::{next_id, remove_by_id, replace_by_id};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct EndpointPayload {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub status: Option<EndpointStatus>,
}

fn validate_payload(payload: &EndpointPayload) -> Result<(), AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&payload.name, "Name", 100));
    errors.extend(validate::validate_required(
        &payload.location,
        "Location",
        200,
    ));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// GET /api/endpoints
pub async fn list(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.snapshot().endpoints))
}

/// POST /api/endpoints
pub async fn create(
    state: web::Data<AppState>,
    sess: Session,
    body: web::Json<EndpointPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&body)?;

    let created = Endpoint {
        id: next_id("EP"),
        name: body.name.trim().to_string(),
        location: body.location.trim().to_string(),
        status: body.status.unwrap_or_default(),
        last_connected: None,
    };
    let mut next = state.snapshot().endpoints;
    next.push(created.clone());
    state.commit_endpoints(next)?;
    let remote = state.push_upsert(tables::ENDPOINTS, &created).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "endpoint.created",
            "endpoint",
            &created.id,
            serde_json::json!({ "name": created.name }),
        );
    }

    Ok(HttpResponse::Created().json(serde_json::json!({
        "endpoint": created,
        "remote": remote.as_str(),
    })))
}

/// PUT /api/endpoints/{id}
///
/// Edits do not touch the copies embedded in existing meetings — those are
/// point-in-time snapshots.
pub async fn update(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<EndpointPayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&body)?;

    let id = path.into_inner();
    let endpoints = state.snapshot().endpoints;
    let current = endpoints
        .iter()
        .find(|ep| ep.id == id)
        .ok_or(AppError::NotFound)?;

    let updated = Endpoint {
        id: current.id.clone(),
        name: body.name.trim().to_string(),
        location: body.location.trim().to_string(),
        status: body.status.unwrap_or(current.status),
        last_connected: current.last_connected.clone(),
    };
    let next =
        replace_by_id(&endpoints, &id, |ep| &ep.id, updated.clone()).ok_or(AppError::NotFound)?;
    state.commit_endpoints(next)?;
    let remote = state.push_upsert(tables::ENDPOINTS, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "endpoint.updated",
            "endpoint",
            &id,
            serde_json::json!({ "name": updated.name }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "endpoint": updated,
        "remote": remote.as_str(),
    })))
}

/// DELETE /api/endpoints/{id} — no cascade; meetings keep their snapshots.
pub async fn delete(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let endpoints = state.snapshot().endpoints;

    let next = remove_by_id(&endpoints, &id, |ep| &ep.id).ok_or(AppError::NotFound)?;
    state.commit_endpoints(next)?;
    let remote = state.push_delete(tables::ENDPOINTS, &id).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "endpoint.deleted",
            "endpoint",
            &id,
            serde_json::json!({}),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "remote": remote.as_str() })))
}

/// POST /api/endpoints/{id}/probe — refresh connectivity through the
/// retry-wrapped reachability check, then commit the result like any other
/// mutation.
pub async fn probe(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let endpoints = state.snapshot().endpoints;
    let current = endpoints
        .iter()
        .find(|ep| ep.id == id)
        .ok_or(AppError::NotFound)?;

    let status = endpoint::probe(current).await;

    let mut updated = current.clone();
    updated.status = status;
    if status == EndpointStatus::Connected {
        updated.last_connected = Some(Utc::now().to_rfc3339());
    }

    let next =
        replace_by_id(&endpoints, &id, |ep| &ep.id, updated.clone()).ok_or(AppError::NotFound)?;
    state.commit_endpoints(next)?;
    let remote = state.push_upsert(tables::ENDPOINTS, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "endpoint.probed",
            "endpoint",
            &id,
            serde_json::json!({ "status": updated.status }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "endpoint": updated,
        "remote": remote.as_str(),
    })))
}
