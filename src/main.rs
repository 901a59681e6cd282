use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use vcadmin::auth::rate_limit::RateLimiter;
use vcadmin::handlers;
use vcadmin::mirror::{MirrorConfig, RemoteMirror};
use vcadmin::state::AppState;
use vcadmin::store::LocalStore;
use vcadmin::sync;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Ensure data directory exists
    std::fs::create_dir_all("data").expect("Failed to create data directory");

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/vcadmin.db".to_string());
    let store = LocalStore::open(&database_path).expect("Failed to open local store");

    // Seed collections (and the default admin account) on first run only
    let admin_hash = vcadmin::store::default_admin_hash().expect("Failed to hash default password");
    store
        .init(&admin_hash)
        .expect("Failed to initialize local store");

    // Remote mirroring is fixed at launch: present credentials or none
    let mirror = match MirrorConfig::from_env() {
        Some(config) => {
            log::info!("Remote mirror configured at {}", config.base_url);
            Some(RemoteMirror::new(config))
        }
        None => {
            log::info!("Remote mirror not configured, running local-only");
            None
        }
    };

    let state = web::Data::new(AppState::load(store, mirror));
    let limiter = web::Data::new(RateLimiter::new());

    // One-shot startup sync: remote data overwrites local where non-empty.
    // Fire-and-forget; the server starts serving from local state meanwhile.
    {
        let state = state.clone();
        actix_web::rt::spawn(async move {
            sync::run_startup_sync(&state).await;
        });
    }

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .app_data(limiter.clone())
            // Public routes
            .route("/api/login", web::post().to(handlers::auth_handlers::login))
            // Protected routes
            .service(
                web::scope("/api")
                    .wrap(actix_web::middleware::from_fn(
                        vcadmin::auth::middleware::require_auth,
                    ))
                    .wrap(actix_web::middleware::from_fn(
                        handlers::require_json_content_type,
                    ))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout))
                    // Dashboard and calendar read models
                    .route("/dashboard", web::get().to(handlers::dashboard_handlers::index))
                    .route("/calendar", web::get().to(handlers::calendar_handlers::month))
                    // Meetings — fixed segments BEFORE /{id} to avoid routing conflicts
                    .route("/meetings", web::get().to(handlers::meeting_handlers::list))
                    .route("/meetings", web::post().to(handlers::meeting_handlers::create))
                    .route("/meetings/{id}", web::get().to(handlers::meeting_handlers::read))
                    .route("/meetings/{id}", web::put().to(handlers::meeting_handlers::update))
                    .route("/meetings/{id}", web::delete().to(handlers::meeting_handlers::delete))
                    .route("/meetings/{id}/cancel", web::post().to(handlers::meeting_handlers::cancel))
                    .route("/meetings/{id}/postpone", web::post().to(handlers::meeting_handlers::postpone))
                    .route("/meetings/{id}/notes", web::put().to(handlers::meeting_handlers::save_notes))
                    .route("/meetings/{id}/checks", web::put().to(handlers::meeting_handlers::save_checks))
                    .route("/meetings/{id}/checks/export", web::get().to(handlers::export_handlers::export_checks))
                    // Endpoints
                    .route("/endpoints", web::get().to(handlers::endpoint_handlers::list))
                    .route("/endpoints", web::post().to(handlers::endpoint_handlers::create))
                    .route("/endpoints/{id}", web::put().to(handlers::endpoint_handlers::update))
                    .route("/endpoints/{id}", web::delete().to(handlers::endpoint_handlers::delete))
                    .route("/endpoints/{id}/probe", web::post().to(handlers::endpoint_handlers::probe))
                    // Units
                    .route("/units", web::get().to(handlers::unit_handlers::list))
                    .route("/units", web::post().to(handlers::unit_handlers::create))
                    .route("/units/{id}", web::put().to(handlers::unit_handlers::update))
                    .route("/units/{id}", web::delete().to(handlers::unit_handlers::delete))
                    // Staff
                    .route("/staff", web::get().to(handlers::staff_handlers::list))
                    .route("/staff", web::post().to(handlers::staff_handlers::create))
                    .route("/staff/{id}", web::put().to(handlers::staff_handlers::update))
                    .route("/staff/{id}", web::delete().to(handlers::staff_handlers::delete))
                    // Participant groups
                    .route("/groups", web::get().to(handlers::group_handlers::list))
                    .route("/groups", web::post().to(handlers::group_handlers::create))
                    .route("/groups/{id}", web::put().to(handlers::group_handlers::update))
                    .route("/groups/{id}", web::delete().to(handlers::group_handlers::delete))
                    // Reports
                    .route("/reports", web::get().to(handlers::report_handlers::run))
                    .route("/reports/export", web::get().to(handlers::export_handlers::export_meetings))
                    .route("/reports/saved", web::get().to(handlers::report_handlers::list_saved))
                    .route("/reports/saved", web::post().to(handlers::report_handlers::save_config))
                    .route("/reports/saved/{id}", web::delete().to(handlers::report_handlers::delete_config))
                    // Users and settings (admin-gated in the handlers)
                    .route("/users", web::get().to(handlers::user_handlers::list))
                    .route("/users", web::post().to(handlers::user_handlers::create))
                    .route("/users/{id}", web::put().to(handlers::user_handlers::update))
                    .route("/users/{id}", web::delete().to(handlers::user_handlers::delete))
                    .route("/settings", web::get().to(handlers::settings_handlers::read))
                    .route("/settings", web::put().to(handlers::settings_handlers::update)),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Not found" }))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
