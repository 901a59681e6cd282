//! Best-effort adapter to the hosted table store (PostgREST-style REST
//! interface, one table per entity type, rows keyed by `id`).
//!
//! Strictly remote: this module never touches the local store. Whether a
//! mirror exists is fixed at launch from the environment; there is no
//! runtime reconfiguration.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Remote table names.
pub mod tables {
    pub const MEETINGS: &str = "meetings";
    pub const ENDPOINTS: &str = "endpoints";
    pub const UNITS: &str = "units";
    pub const STAFF: &str = "staff";
    pub const USERS: &str = "users";
    pub const SETTINGS: &str = "system_settings";
}

/// Fixed row key of the settings singleton.
pub const SETTINGS_ROW_ID: &str = "system";

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub base_url: String,
    pub api_key: String,
}

impl MirrorConfig {
    /// Read mirror credentials from the environment. `None` disables
    /// mirroring for the lifetime of the process.
    pub fn from_env() -> Option<MirrorConfig> {
        let base_url = std::env::var("MIRROR_URL").ok()?;
        let api_key = std::env::var("MIRROR_API_KEY").ok()?;
        if base_url.trim().is_empty() || api_key.trim().is_empty() {
            return None;
        }
        Some(MirrorConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

pub struct RemoteMirror {
    client: reqwest::Client,
    config: MirrorConfig,
}

impl RemoteMirror {
    pub fn new(config: MirrorConfig) -> RemoteMirror {
        RemoteMirror {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.config.base_url, table)
    }

    /// All rows of a table. A table with no rows is an empty vec, not an
    /// error; transport and HTTP errors propagate.
    pub async fn fetch_all<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, AppError> {
        let rows = self
            .client
            .get(self.table_url(table))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<T>>()
            .await?;
        Ok(rows)
    }

    /// A single row by primary key, `None` when it does not exist.
    pub async fn fetch_one<T: DeserializeOwned>(
        &self,
        table: &str,
        id: &str,
    ) -> Result<Option<T>, AppError> {
        let mut rows = self
            .client
            .get(self.table_url(table))
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<T>>()
            .await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.remove(0)))
        }
    }

    /// Insert-or-replace a row by primary key.
    pub async fn upsert<T: Serialize>(&self, table: &str, entity: &T) -> Result<(), AppError> {
        self.client
            .post(self.table_url(table))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(entity)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Remove a row by primary key.
    pub async fn delete(&self, table: &str, id: &str) -> Result<(), AppError> {
        self.client
            .delete(self.table_url(table))
            .query(&[("id", format!("eq.{id}"))])
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
