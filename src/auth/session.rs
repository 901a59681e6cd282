use actix_session::Session;
use std::str::FromStr;

use crate::errors::AppError;
use crate::models::user::{User, UserRole};

pub fn get_user_id(session: &Session) -> Option<String> {
    session.get::<String>("user_id").unwrap_or(None)
}

pub fn get_username(session: &Session) -> Option<String> {
    session.get::<String>("username").unwrap_or(None)
}

pub fn get_role(session: &Session) -> Option<UserRole> {
    session
        .get::<String>("role")
        .unwrap_or(None)
        .and_then(|s| UserRole::from_str(&s).ok())
}

/// Record a successful login in the session.
pub fn store_login(session: &Session, user: &User) {
    let _ = session.insert("user_id", &user.id);
    let _ = session.insert("username", &user.username);
    let _ = session.insert("role", user.role.to_string());
}

/// The acting username for audit entries; falls back to "anonymous".
pub fn actor(session: &Session) -> String {
    get_username(session).unwrap_or_else(|| "anonymous".to_string())
}

/// Admin gate for user management and system settings.
pub fn require_admin(session: &Session) -> Result<(), AppError> {
    match get_role(session) {
        Some(UserRole::Admin) => Ok(()),
        Some(role) => Err(AppError::PermissionDenied(format!(
            "admin access required, current role is {role}"
        ))),
        None => Err(AppError::Session("No role in session".to_string())),
    }
}
