//! Local persistence store tests — seeding idempotency, default fallback,
//! whole-collection replace round trips.

mod common;

use common::*;
use rusqlite::params;

use vcadmin::models::endpoint::Endpoint;
use vcadmin::models::settings::SystemSettings;
use vcadmin::models::unit::Unit;
use vcadmin::models::user::{User, UserRole};
use vcadmin::store::keys;

#[test]
fn init_seeds_default_collections() {
    let (_dir, store) = setup_store();

    let endpoints: Vec<Endpoint> = store.get(keys::ENDPOINTS, Vec::new());
    assert!(!endpoints.is_empty(), "endpoints should be seeded");

    let units: Vec<Unit> = store.get(keys::UNITS, Vec::new());
    assert!(!units.is_empty(), "units should be seeded");

    let settings: SystemSettings = store.get(keys::SETTINGS, SystemSettings::default());
    assert!(!settings.system_name.is_empty());

    let users: Vec<User> = store.get(keys::USERS, Vec::new());
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].username, "admin");
    assert_eq!(users[0].role, UserRole::Admin);

    let meetings: Vec<serde_json::Value> = store.get(keys::MEETINGS, Vec::new());
    assert!(meetings.is_empty(), "meetings start empty");
}

#[test]
fn init_is_idempotent_and_never_overwrites() {
    let (_dir, store) = setup_store();

    let custom = vec![endpoint("EP-X", "Custom Bridge")];
    store.set(keys::ENDPOINTS, &custom).expect("set failed");

    // A second init must leave existing data alone.
    let hash = vcadmin::auth::password::hash_password(TEST_ADMIN_PASS).expect("hash failed");
    store.init(&hash).expect("re-init failed");

    let after: Vec<Endpoint> = store.get(keys::ENDPOINTS, Vec::new());
    assert_eq!(after, custom);
}

#[test]
fn get_returns_default_when_absent() {
    let (_dir, store) = setup_store();

    let missing: Vec<Endpoint> = store.get("no_such_collection", Vec::new());
    assert!(missing.is_empty());
}

#[test]
fn get_returns_default_on_corrupt_row() {
    let (_dir, store) = setup_store();

    let conn = store.conn().expect("conn failed");
    conn.execute(
        "UPDATE collections SET value = 'not json at all' WHERE key = ?1",
        params![keys::ENDPOINTS],
    )
    .expect("corrupt write failed");

    let endpoints: Vec<Endpoint> = store.get(keys::ENDPOINTS, Vec::new());
    assert!(endpoints.is_empty(), "corrupt row falls back to default");
}

#[test]
fn set_then_get_round_trips() {
    let (_dir, store) = setup_store();

    let meetings = vec![meeting("M1", "2024-05-20T08:00:00Z", "Unit A")];
    store.set(keys::MEETINGS, &meetings).expect("set failed");

    let loaded: Vec<vcadmin::models::meeting::Meeting> = store.get(keys::MEETINGS, Vec::new());
    assert_eq!(loaded, meetings);
}

#[test]
fn set_replaces_the_whole_collection() {
    let (_dir, store) = setup_store();

    store
        .set(keys::MEETINGS, &vec![meeting("M1", "2024-05-20T08:00:00Z", "Unit A")])
        .expect("first set failed");
    store
        .set(keys::MEETINGS, &vec![meeting("M2", "2024-06-01T08:00:00Z", "Unit B")])
        .expect("second set failed");

    let loaded: Vec<vcadmin::models::meeting::Meeting> = store.get(keys::MEETINGS, Vec::new());
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, "M2");
}
