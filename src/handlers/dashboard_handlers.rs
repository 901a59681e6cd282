use actix_web::{HttpResponse, web};
use chrono::Utc;
use std::collections::HashMap;

use crate::audit;
use crate::errors::AppError;
use crate::models::dashboard::{self, PeriodFilter};
use crate::state::AppState;

/// GET /api/dashboard?period=week|month|recent
///
/// Counts, period aggregates and the filtered meeting list, recomputed from
/// the current collections on every request.
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let collections = state.snapshot();
    let now = Utc::now();

    let filter = PeriodFilter::parse(query.get("period").map(String::as_str).unwrap_or("recent"));
    let selected = dashboard::select_for_period(&collections.meetings, filter, now);

    let recent_activity = match state.store.conn() {
        Ok(conn) => audit::find_recent(&conn, 5).unwrap_or_default(),
        Err(_) => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "counts": {
            "meetings": collections.meetings.len(),
            "endpoints": collections.endpoints.len(),
            "units": collections.units.len(),
            "staff": collections.staff.len(),
            "users": collections.users.len(),
        },
        "weekday_histogram": dashboard::weekday_histogram(&collections.meetings, now.date_naive()),
        "monthly": dashboard::monthly_counts(&collections.meetings),
        "yearly": dashboard::yearly_counts(&collections.meetings),
        "by_unit": dashboard::unit_counts(&collections.meetings),
        "meetings": selected,
        "recent_activity": recent_activity,
    })))
}
