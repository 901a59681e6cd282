//! User model and credential tests — lookup normalization, admin
//! protection rules, password hashing.

mod common;

use common::*;

use vcadmin::auth::password;
use vcadmin::models::user::{User, UserRole, find_by_username, is_last_admin};
use vcadmin::store::keys;

fn user(id: &str, username: &str, role: UserRole) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        full_name: "Test User".to_string(),
        role,
        password_hash: String::new(),
    }
}

#[test]
fn lookup_is_case_insensitive_on_input() {
    let users = vec![user("U1", "admin", UserRole::Admin)];

    assert!(find_by_username(&users, "ADMIN").is_some());
    assert!(find_by_username(&users, "  Admin  ").is_some());
    assert!(find_by_username(&users, "operator").is_none());
}

#[test]
fn last_admin_detection() {
    let users = vec![
        user("U1", "admin", UserRole::Admin),
        user("U2", "viewer", UserRole::Viewer),
    ];
    assert!(is_last_admin(&users, "U1"));

    let two_admins = vec![
        user("U1", "admin", UserRole::Admin),
        user("U2", "backup", UserRole::Admin),
    ];
    assert!(!is_last_admin(&two_admins, "U1"));
}

#[test]
fn password_hash_round_trip() {
    let hash = password::hash_password("correct horse").expect("hash failed");
    assert_ne!(hash, "correct horse", "hash must not be plaintext");
    assert!(password::verify_password("correct horse", &hash).expect("verify failed"));
    assert!(!password::verify_password("wrong", &hash).expect("verify failed"));
}

#[test]
fn seeded_admin_can_authenticate() {
    let (_dir, store) = setup_store();

    let users: Vec<User> = store.get(keys::USERS, Vec::new());
    let admin = find_by_username(&users, "admin").expect("admin seeded");
    assert!(
        password::verify_password(TEST_ADMIN_PASS, &admin.password_hash).expect("verify failed")
    );
}

#[test]
fn role_parsing_accepts_any_case() {
    use std::str::FromStr;
    assert_eq!(UserRole::from_str("admin").expect("parses"), UserRole::Admin);
    assert_eq!(
        UserRole::from_str("OPERATOR").expect("parses"),
        UserRole::Operator
    );
    assert!(UserRole::from_str("root").is_err());
}
