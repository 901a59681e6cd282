use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::calendar;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

/// GET /api/calendar?year=&month= — Monday-first month grid with per-day
/// meeting buckets.
pub async fn month(
    state: web::Data<AppState>,
    query: web::Query<CalendarQuery>,
) -> Result<HttpResponse, AppError> {
    let meetings = state.snapshot().meetings;
    let grid = calendar::month_grid(query.year, query.month, &meetings).ok_or_else(|| {
        AppError::Validation(vec![format!(
            "Invalid year/month: {}-{}",
            query.year, query.month
        )])
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "year": query.year,
        "month": query.month,
        "weeks": grid,
    })))
}
