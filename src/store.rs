//! Local persistence: a string-keyed store of JSON-serialized collections
//! backed by SQLite. The authoritative working copy of every collection
//! lives here; the remote mirror only ever replicates it.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::auth;
use crate::errors::AppError;
use crate::models::user::{User, UserRole};

pub type DbPool = Pool<SqliteConnectionManager>;

pub const MIGRATIONS: &str = include_str!("schema.sql");

/// Logical collection keys. One row per key in the `collections` table.
pub mod keys {
    pub const MEETINGS: &str = "meetings";
    pub const ENDPOINTS: &str = "endpoints";
    pub const UNITS: &str = "units";
    pub const STAFF: &str = "staff";
    pub const GROUPS: &str = "groups";
    pub const USERS: &str = "users";
    pub const REPORT_CONFIGS: &str = "report_configs";
    pub const SETTINGS: &str = "settings";
}

const ENDPOINTS_SEED: &str = include_str!("../data/seed/endpoints.json");
const UNITS_SEED: &str = include_str!("../data/seed/units.json");
const STAFF_SEED: &str = include_str!("../data/seed/staff.json");
const GROUPS_SEED: &str = include_str!("../data/seed/groups.json");
const SETTINGS_SEED: &str = include_str!("../data/seed/settings.json");

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

#[derive(Clone)]
pub struct LocalStore {
    pool: DbPool,
}

impl LocalStore {
    pub fn open(database_path: &str) -> Result<LocalStore, AppError> {
        let manager = SqliteConnectionManager::file(database_path).with_init(|conn| {
            conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
            Ok(())
        });
        let pool = Pool::builder().max_size(8).build(manager)?;
        Ok(LocalStore { pool })
    }

    pub fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, AppError> {
        Ok(self.pool.get()?)
    }

    /// Apply the schema and seed every absent collection with its default
    /// dataset. Idempotent: existing rows are never overwritten.
    pub fn init(&self, admin_password_hash: &str) -> Result<(), AppError> {
        let conn = self.conn()?;
        conn.execute_batch(MIGRATIONS)?;

        let seeds: [(&str, &str); 7] = [
            (keys::MEETINGS, "[]"),
            (keys::ENDPOINTS, ENDPOINTS_SEED),
            (keys::UNITS, UNITS_SEED),
            (keys::STAFF, STAFF_SEED),
            (keys::GROUPS, GROUPS_SEED),
            (keys::REPORT_CONFIGS, "[]"),
            (keys::SETTINGS, SETTINGS_SEED),
        ];
        let mut seeded = 0;
        for (key, json) in seeds {
            seeded += conn.execute(
                "INSERT OR IGNORE INTO collections (key, value) VALUES (?1, ?2)",
                params![key, json],
            )?;
        }

        if !self.has_key(&conn, keys::USERS)? {
            let admin = User {
                id: crate::models::next_id("USR"),
                username: DEFAULT_ADMIN_USERNAME.to_string(),
                full_name: "Administrator".to_string(),
                role: UserRole::Admin,
                password_hash: admin_password_hash.to_string(),
            };
            let json = serde_json::to_string(&vec![admin])?;
            conn.execute(
                "INSERT INTO collections (key, value) VALUES (?1, ?2)",
                params![keys::USERS, json],
            )?;
            seeded += 1;
        }

        if seeded > 0 {
            log::info!("Seeded {seeded} collection(s) with defaults");
        } else {
            log::debug!("All collections already present, nothing to seed");
        }
        Ok(())
    }

    fn has_key(&self, conn: &rusqlite::Connection, key: &str) -> Result<bool, AppError> {
        let exists: bool = conn.query_row(
            "SELECT COUNT(*) > 0 FROM collections WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Deserialize a collection, or hand back `default` when the row is
    /// absent or its JSON no longer parses. A corrupt row is logged and
    /// defaulted, never surfaced to the caller.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let conn = match self.conn() {
            Ok(conn) => conn,
            Err(e) => {
                log::warn!("Local store unavailable reading '{key}': {e}");
                return default;
            }
        };
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM collections WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .ok();
        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => value,
                Err(e) => {
                    log::warn!("Corrupt collection '{key}' in local store, using default: {e}");
                    default
                }
            },
            None => default,
        }
    }

    /// Serialize and store the full collection — whole-collection replace,
    /// not a patch.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let json = serde_json::to_string(value)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO collections (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, \
                 updated_at = strftime('%Y-%m-%dT%H:%M:%S','now')",
            params![key, json],
        )?;
        Ok(())
    }
}

/// Hash the default admin password for first-run seeding.
pub fn default_admin_hash() -> Result<String, AppError> {
    auth::password::hash_password("admin123").map_err(AppError::Hash)
}
