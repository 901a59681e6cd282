//! One-shot startup synchronization: if a remote mirror is configured,
//! fetch every collection and let non-empty remote data overwrite local
//! state. One-way, best-effort per collection, no merge and no conflict
//! detection — local data wins wherever the remote has nothing.

use serde::{Deserialize, Serialize};

use crate::mirror::{SETTINGS_ROW_ID, tables};
use crate::models::endpoint::Endpoint;
use crate::models::meeting::Meeting;
use crate::models::settings::SystemSettings;
use crate::models::staff::Staff;
use crate::models::unit::Unit;
use crate::models::user::User;
use crate::state::AppState;

/// Remote row shape of the settings singleton (fixed row id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsRow {
    pub id: String,
    #[serde(flatten)]
    pub settings: SystemSettings,
}

impl SettingsRow {
    pub fn singleton(settings: SystemSettings) -> SettingsRow {
        SettingsRow {
            id: SETTINGS_ROW_ID.to_string(),
            settings,
        }
    }
}

/// What the mirror returned, one slot per collection. `None` marks a fetch
/// that failed and must leave local data alone.
#[derive(Debug, Default)]
pub struct Fetched {
    pub meetings: Option<Vec<Meeting>>,
    pub endpoints: Option<Vec<Endpoint>>,
    pub units: Option<Vec<Unit>>,
    pub staff: Option<Vec<Staff>>,
    pub users: Option<Vec<User>>,
    pub settings: Option<SystemSettings>,
}

fn fetched_or_skip<T>(collection: &str, result: Result<T, crate::errors::AppError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Sync: fetching '{collection}' from the mirror failed, keeping local data: {e}");
            None
        }
    }
}

/// Overwrite local state with every non-empty fetched collection.
///
/// Empty collections (and a missing settings row) leave local data
/// untouched. Separated from the network step so it is testable without a
/// live mirror.
pub fn apply_fetched(state: &AppState, fetched: Fetched) -> Result<(), crate::errors::AppError> {
    if let Some(meetings) = fetched.meetings.filter(|v| !v.is_empty()) {
        log::info!("Sync: remote overwrites {} meeting(s)", meetings.len());
        state.commit_meetings(meetings)?;
    }
    if let Some(endpoints) = fetched.endpoints.filter(|v| !v.is_empty()) {
        log::info!("Sync: remote overwrites {} endpoint(s)", endpoints.len());
        state.commit_endpoints(endpoints)?;
    }
    if let Some(units) = fetched.units.filter(|v| !v.is_empty()) {
        log::info!("Sync: remote overwrites {} unit(s)", units.len());
        state.commit_units(units)?;
    }
    if let Some(staff) = fetched.staff.filter(|v| !v.is_empty()) {
        log::info!("Sync: remote overwrites {} staff record(s)", staff.len());
        state.commit_staff(staff)?;
    }
    if let Some(users) = fetched.users.filter(|v| !v.is_empty()) {
        log::info!("Sync: remote overwrites {} user(s)", users.len());
        state.commit_users(users)?;
    }
    if let Some(settings) = fetched.settings {
        log::info!("Sync: remote overwrites system settings");
        state.commit_settings(settings)?;
    }
    Ok(())
}

/// Fetch all collections from the mirror concurrently and apply them.
/// Runs once, spawned from `main` — a no-op when no mirror is configured.
pub async fn run_startup_sync(state: &AppState) {
    let Some(mirror) = &state.mirror else {
        log::info!("No remote mirror configured, skipping startup sync");
        return;
    };

    let (meetings, endpoints, units, staff, users, settings) = tokio::join!(
        mirror.fetch_all::<Meeting>(tables::MEETINGS),
        mirror.fetch_all::<Endpoint>(tables::ENDPOINTS),
        mirror.fetch_all::<Unit>(tables::UNITS),
        mirror.fetch_all::<Staff>(tables::STAFF),
        mirror.fetch_all::<User>(tables::USERS),
        mirror.fetch_one::<SettingsRow>(tables::SETTINGS, SETTINGS_ROW_ID),
    );

    let fetched = Fetched {
        meetings: fetched_or_skip(tables::MEETINGS, meetings),
        endpoints: fetched_or_skip(tables::ENDPOINTS, endpoints),
        units: fetched_or_skip(tables::UNITS, units),
        staff: fetched_or_skip(tables::STAFF, staff),
        users: fetched_or_skip(tables::USERS, users),
        settings: fetched_or_skip(tables::SETTINGS, settings)
            .flatten()
            .map(|row| row.settings),
    };

    if let Err(e) = apply_fetched(state, fetched) {
        log::error!("Sync: applying fetched collections failed: {e}");
    } else {
        log::info!("Startup sync complete");
    }
}
