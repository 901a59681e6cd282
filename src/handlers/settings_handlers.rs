use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::audit;
use crate::auth::{session, validate};
use crate::errors::AppError;
use crate::mirror::tables;
use crate::models::settings::SystemSettings;
use crate::state::AppState;
use crate::sync::SettingsRow;

#[derive(Deserialize)]
pub struct SettingsPayload {
    pub system_name: String,
    pub short_name: String,
    #[serde(default)]
    pub logo_data: Option<String>,
    pub primary_color: String,
}

/// GET /api/settings — readable by any signed-in user.
pub async fn read(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(state.snapshot().settings))
}

/// PUT /api/settings — admin-only; the singleton is replaced as a whole.
pub async fn update(
    state: web::Data<AppState>,
    sess: Session,
    body: web::Json<SettingsPayload>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&sess)?;

    let mut errors = Vec::new();
    errors.extend(validate::validate_required(
        &body.system_name,
        "System name",
        200,
    ));
    errors.extend(validate::validate_required(
        &body.short_name,
        "Short name",
        50,
    ));
    errors.extend(validate::validate_required(
        &body.primary_color,
        "Primary color",
        20,
    ));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let updated = SystemSettings {
        system_name: body.system_name.trim().to_string(),
        short_name: body.short_name.trim().to_string(),
        logo_data: body.logo_data.clone(),
        primary_color: body.primary_color.trim().to_string(),
    };
    state.commit_settings(updated.clone())?;
    let remote = state
        .push_upsert(tables::SETTINGS, &SettingsRow::singleton(updated.clone()))
        .await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "settings.updated",
            "settings",
            "system",
            serde_json::json!({ "system_name": updated.system_name }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "settings": updated,
        "remote": remote.as_str(),
    })))
}
