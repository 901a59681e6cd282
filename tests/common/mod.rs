//! Shared test infrastructure: temp-dir store setup and entity builders.
//!
//! `setup_store()` creates a seeded temporary store; `setup_state()` wraps
//! it in an `AppState` with no remote mirror. The `TempDir` must be kept
//! alive for the store to remain valid.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use vcadmin::models::endpoint::{Endpoint, EndpointStatus};
use vcadmin::models::meeting::{Meeting, MeetingDraft};
use vcadmin::state::AppState;
use vcadmin::store::LocalStore;

pub const TEST_ADMIN_PASS: &str = "admin123";

pub fn setup_store() -> (TempDir, LocalStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let store = LocalStore::open(db_path.to_str().expect("utf-8 temp path"))
        .expect("Failed to open test store");

    let admin_hash =
        vcadmin::auth::password::hash_password(TEST_ADMIN_PASS).expect("Failed to hash password");
    store.init(&admin_hash).expect("Failed to init test store");

    (dir, store)
}

pub fn setup_state() -> (TempDir, AppState) {
    let (dir, store) = setup_store();
    (dir, AppState::load(store, None))
}

pub fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid RFC 3339 timestamp")
}

pub fn endpoint(id: &str, name: &str) -> Endpoint {
    Endpoint {
        id: id.to_string(),
        name: name.to_string(),
        location: "Test lab".to_string(),
        status: EndpointStatus::Disconnected,
        last_connected: None,
    }
}

pub fn draft(title: &str, start: &str, end: &str, endpoints: Vec<Endpoint>) -> MeetingDraft {
    MeetingDraft {
        title: title.to_string(),
        host_unit: "Operations".to_string(),
        host_unit_id: "UNIT-1".to_string(),
        chair_person: "Alice Morgan".to_string(),
        chair_person_id: "STF-1".to_string(),
        start: ts(start),
        end: ts(end),
        description: String::new(),
        participant_groups: Vec::new(),
        endpoints,
        invite_link: None,
    }
}

/// A scheduled meeting with one endpoint, for derivation tests.
pub fn meeting(id: &str, start: &str, host_unit: &str) -> Meeting {
    let d = MeetingDraft {
        host_unit: host_unit.to_string(),
        ..draft("Weekly sync", start, &end_of(start), vec![endpoint("EP-1", "Bridge A")])
    };
    let (_, m) = vcadmin::models::meeting::schedule(&[], id.to_string(), d);
    m
}

fn end_of(start: &str) -> String {
    let start: DateTime<Utc> = start.parse().expect("valid RFC 3339 timestamp");
    (start + chrono::Duration::hours(1)).to_rfc3339()
}

/// Fixed "now" used by time-dependent derivation tests:
/// Wednesday 2024-05-22 12:00 UTC.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 22, 12, 0, 0).single().expect("valid fixed now")
}
