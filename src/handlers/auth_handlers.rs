use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::audit;
use crate::auth::rate_limit::RateLimiter;
use crate::auth::{password, session};
use crate::errors::AppError;
use crate::models::user::{self, UserView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/login
pub async fn login(
    req: HttpRequest,
    state: web::Data<AppState>,
    sess: Session,
    limiter: web::Data<RateLimiter>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    // Rate-limit check before touching any state.
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        return Ok(HttpResponse::TooManyRequests().json(serde_json::json!({
            "error": "Too many failed login attempts. Please try again later."
        })));
    }

    let collections = state.snapshot();
    let found = user::find_by_username(&collections.users, &body.username);

    match found {
        Some(u) if password::verify_password(&body.password, &u.password_hash).unwrap_or(false) => {
            limiter.clear(ip);
            session::store_login(&sess, u);

            if let Ok(conn) = state.store.conn() {
                let _ = audit::log(
                    &conn,
                    &u.username,
                    "auth.login",
                    "user",
                    &u.id,
                    serde_json::json!({ "summary": "Signed in" }),
                );
            }

            Ok(HttpResponse::Ok().json(UserView::from(u)))
        }
        _ => {
            limiter.record_failure(ip);
            Ok(HttpResponse::Unauthorized().json(serde_json::json!({
                "error": "Invalid username or password"
            })))
        }
    }
}

/// POST /api/logout
pub async fn logout(state: web::Data<AppState>, sess: Session) -> Result<HttpResponse, AppError> {
    let actor = session::actor(&sess);
    let user_id = session::get_user_id(&sess).unwrap_or_default();
    sess.purge();

    if let Ok(conn) = state.store.conn() {
        let _ = audit::log(
            &conn,
            &actor,
            "auth.logout",
            "user",
            &user_id,
            serde_json::json!({ "summary": "Signed out" }),
        );
    }

    Ok(HttpResponse::NoContent().finish())
}
