use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use std::str::FromStr;

use crate::audit;
use crate::auth::{password, session, validate};
use crate::errors::AppError;
use crate::mirror::tables;
use crate::models::user::{self, User, UserRole, UserView};
use crate::models::{next_id, remove_by_id, replace_by_id};
use crate::state::AppState;

// All user management is admin-only.

#[derive(Deserialize)]
pub struct UserPayload {
    pub username: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub password: Option<String>,
}

struct ValidatedUser {
    username: String,
    full_name: String,
    role: UserRole,
}

fn validate_payload(payload: &UserPayload, password_required: bool) -> Result<ValidatedUser, AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_username(&payload.username));
    errors.extend(validate::validate_required(
        &payload.full_name,
        "Full name",
        100,
    ));
    match &payload.password {
        Some(pwd) => errors.extend(validate::validate_password(pwd)),
        None if password_required => errors.push("Password is required".to_string()),
        None => {}
    }
    let role = match UserRole::from_str(&payload.role) {
        Ok(role) => Some(role),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    Ok(ValidatedUser {
        username: payload.username.trim().to_lowercase(),
        full_name: payload.full_name.trim().to_string(),
        role: role.expect("validated above"),
    })
}

/// GET /api/users
pub async fn list(state: web::Data<AppState>, sess: Session) -> Result<HttpResponse, AppError> {
    session::require_admin(&sess)?;
    let users = state.snapshot().users;
    let views: Vec<UserView> = users.iter().map(UserView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    sess: Session,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&sess)?;
    let valid = validate_payload(&body, true)?;

    let users = state.snapshot().users;
    if user::find_by_username(&users, &valid.username).is_some() {
        return Err(AppError::Validation(vec![format!(
            "Username '{}' is already taken",
            valid.username
        )]));
    }

    let hash = password::hash_password(body.password.as_deref().expect("validated above"))
        .map_err(AppError::Hash)?;
    let created = User {
        id: next_id("USR"),
        username: valid.username,
        full_name: valid.full_name,
        role: valid.role,
        password_hash: hash,
    };
    let mut next = users;
    next.push(created.clone());
    state.commit_users(next)?;
    let remote = state.push_upsert(tables::USERS, &created).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "user.created",
            "user",
            &created.id,
            serde_json::json!({ "username": created.username, "role": created.role }),
        );
    }

    Ok(HttpResponse::Created().json(serde_json::json!({
        "user": UserView::from(&created),
        "remote": remote.as_str(),
    })))
}

/// PUT /api/users/{id} — password is only changed when provided.
pub async fn update(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
    body: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&sess)?;
    let valid = validate_payload(&body, false)?;

    let id = path.into_inner();
    let users = state.snapshot().users;
    let current = users.iter().find(|u| u.id == id).ok_or(AppError::NotFound)?;

    if users
        .iter()
        .any(|u| u.id != id && u.username == valid.username)
    {
        return Err(AppError::Validation(vec![format!(
            "Username '{}' is already taken",
            valid.username
        )]));
    }

    // Demoting the last admin would lock everyone out.
    if current.role == UserRole::Admin
        && valid.role != UserRole::Admin
        && user::is_last_admin(&users, &id)
    {
        return Err(AppError::Conflict(
            "Cannot demote the last admin account".to_string(),
        ));
    }

    let password_hash = match &body.password {
        Some(pwd) => password::hash_password(pwd).map_err(AppError::Hash)?,
        None => current.password_hash.clone(),
    };
    let updated = User {
        id: id.clone(),
        username: valid.username,
        full_name: valid.full_name,
        role: valid.role,
        password_hash,
    };
    let next = replace_by_id(&users, &id, |u| &u.id, updated.clone()).ok_or(AppError::NotFound)?;
    state.commit_users(next)?;
    let remote = state.push_upsert(tables::USERS, &updated).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "user.updated",
            "user",
            &id,
            serde_json::json!({ "username": updated.username, "role": updated.role }),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": UserView::from(&updated),
        "remote": remote.as_str(),
    })))
}

/// DELETE /api/users/{id} — self-deletion and deleting the last admin are
/// both refused.
pub async fn delete(
    state: web::Data<AppState>,
    sess: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    session::require_admin(&sess)?;

    let id = path.into_inner();
    if session::get_user_id(&sess).as_deref() == Some(id.as_str()) {
        return Err(AppError::Conflict(
            "Cannot delete your own account".to_string(),
        ));
    }

    let users = state.snapshot().users;
    let target = users.iter().find(|u| u.id == id).ok_or(AppError::NotFound)?;
    if target.role == UserRole::Admin && user::is_last_admin(&users, &id) {
        return Err(AppError::Conflict(
            "Cannot delete the last admin account".to_string(),
        ));
    }

    let next = remove_by_id(&users, &id, |u| &u.id).ok_or(AppError::NotFound)?;
    state.commit_users(next)?;
    let remote = state.push_delete(tables::USERS, &id).await;

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &session::actor(&sess),
            "user.deleted",
            "user",
            &id,
            serde_json::json!({}),
        );
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "remote": remote.as_str() })))
}
