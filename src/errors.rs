use actix_web::{HttpResponse, ResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Serde(serde_json::Error),
    Remote(reqwest::Error),
    Validation(Vec<String>),
    Conflict(String),
    Session(String),
    Hash(String),
    PermissionDenied(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Serde(e) => write!(f, "Serialization error: {e}"),
            AppError::Remote(e) => write!(f, "Remote mirror error: {e}"),
            AppError::Validation(msgs) => write!(f, "Validation failed: {}", msgs.join("; ")),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AppError::Session(msg) => write!(f, "Session error: {msg}"),
            AppError::Hash(msg) => write!(f, "Hash error: {msg}"),
            AppError::PermissionDenied(what) => write!(f, "Permission denied: {what}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => {
                HttpResponse::NotFound().json(serde_json::json!({ "error": "Not found" }))
            }
            AppError::Validation(msgs) => HttpResponse::BadRequest().json(serde_json::json!({
                "error": "Validation failed",
                "details": msgs,
            })),
            AppError::Conflict(msg) => {
                HttpResponse::Conflict().json(serde_json::json!({ "error": msg }))
            }
            AppError::Session(_) => HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Not authenticated" })),
            AppError::PermissionDenied(_) => {
                log::warn!("{self}");
                HttpResponse::Forbidden().json(serde_json::json!({ "error": "Permission denied" }))
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Internal server error" }))
            }
        }
    }
}

impl From<crate::models::meeting::MeetingOpError> for AppError {
    fn from(e: crate::models::meeting::MeetingOpError) -> Self {
        use crate::models::meeting::MeetingOpError;
        match e {
            MeetingOpError::NotFound => AppError::NotFound,
            MeetingOpError::NotEditable => AppError::Conflict(e.to_string()),
            MeetingOpError::ReasonRequired | MeetingOpError::UnknownEndpoint(_) => {
                AppError::Validation(vec![e.to_string()])
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Serde(e)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Remote(e)
    }
}
