//! Shared application state: the in-memory snapshot of every collection,
//! the local store it is written through to, and the optional remote
//! mirror.
//!
//! Every mutation follows one fixed protocol: compute the new collection
//! value, commit it to memory, write the whole collection to the local
//! store, then push the single changed entity to the mirror and report the
//! outcome. The remote leg never rolls back the local commit.

use serde::Serialize;
use std::sync::RwLock;

use crate::errors::AppError;
use crate::mirror::RemoteMirror;
use crate::models::endpoint::Endpoint;
use crate::models::group::ParticipantGroup;
use crate::models::meeting::Meeting;
use crate::models::report::ReportConfig;
use crate::models::settings::SystemSettings;
use crate::models::staff::Staff;
use crate::models::unit::Unit;
use crate::models::user::User;
use crate::store::{LocalStore, keys};

#[derive(Debug, Clone, Default)]
pub struct Collections {
    pub meetings: Vec<Meeting>,
    pub endpoints: Vec<Endpoint>,
    pub units: Vec<Unit>,
    pub staff: Vec<Staff>,
    pub groups: Vec<ParticipantGroup>,
    pub users: Vec<User>,
    pub report_configs: Vec<ReportConfig>,
    pub settings: SystemSettings,
}

/// Outcome of the remote leg of a mutation. Local state is committed
/// either way; `Failed` means local and remote have diverged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteWrite {
    Disabled,
    Synced,
    Failed,
}

impl RemoteWrite {
    pub fn as_str(self) -> &'static str {
        match self {
            RemoteWrite::Disabled => "disabled",
            RemoteWrite::Synced => "synced",
            RemoteWrite::Failed => "failed",
        }
    }
}

pub struct AppState {
    pub store: LocalStore,
    pub mirror: Option<RemoteMirror>,
    collections: RwLock<Collections>,
}

impl AppState {
    /// Build process state from the local store's current contents.
    pub fn load(store: LocalStore, mirror: Option<RemoteMirror>) -> AppState {
        let collections = Collections {
            meetings: store.get(keys::MEETINGS, Vec::new()),
            endpoints: store.get(keys::ENDPOINTS, Vec::new()),
            units: store.get(keys::UNITS, Vec::new()),
            staff: store.get(keys::STAFF, Vec::new()),
            groups: store.get(keys::GROUPS, Vec::new()),
            users: store.get(keys::USERS, Vec::new()),
            report_configs: store.get(keys::REPORT_CONFIGS, Vec::new()),
            settings: store.get(keys::SETTINGS, SystemSettings::default()),
        };
        AppState {
            store,
            mirror,
            collections: RwLock::new(collections),
        }
    }

    pub fn mirror_configured(&self) -> bool {
        self.mirror.is_some()
    }

    /// A point-in-time copy of all collections.
    pub fn snapshot(&self) -> Collections {
        self.collections
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    // The write lock is held across the store write so two rapid local
    // mutations can never interleave between memory and store.

    pub fn commit_meetings(&self, meetings: Vec<Meeting>) -> Result<(), AppError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.meetings = meetings;
        self.store.set(keys::MEETINGS, &guard.meetings)
    }

    pub fn commit_endpoints(&self, endpoints: Vec<Endpoint>) -> Result<(), AppError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.endpoints = endpoints;
        self.store.set(keys::ENDPOINTS, &guard.endpoints)
    }

    pub fn commit_units(&self, units: Vec<Unit>) -> Result<(), AppError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.units = units;
        self.store.set(keys::UNITS, &guard.units)
    }

    pub fn commit_staff(&self, staff: Vec<Staff>) -> Result<(), AppError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.staff = staff;
        self.store.set(keys::STAFF, &guard.staff)
    }

    pub fn commit_groups(&self, groups: Vec<ParticipantGroup>) -> Result<(), AppError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.groups = groups;
        self.store.set(keys::GROUPS, &guard.groups)
    }

    pub fn commit_users(&self, users: Vec<User>) -> Result<(), AppError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.users = users;
        self.store.set(keys::USERS, &guard.users)
    }

    pub fn commit_report_configs(&self, configs: Vec<ReportConfig>) -> Result<(), AppError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.report_configs = configs;
        self.store.set(keys::REPORT_CONFIGS, &guard.report_configs)
    }

    pub fn commit_settings(&self, settings: SystemSettings) -> Result<(), AppError> {
        let mut guard = self.collections.write().unwrap_or_else(|e| e.into_inner());
        guard.settings = settings;
        self.store.set(keys::SETTINGS, &guard.settings)
    }

    /// Push one changed entity to the mirror, reporting the outcome.
    pub async fn push_upsert<T: Serialize>(&self, table: &str, entity: &T) -> RemoteWrite {
        match &self.mirror {
            None => RemoteWrite::Disabled,
            Some(mirror) => match mirror.upsert(table, entity).await {
                Ok(()) => RemoteWrite::Synced,
                Err(e) => {
                    log::warn!(
                        "Remote upsert to '{table}' failed, local and remote have diverged: {e}"
                    );
                    RemoteWrite::Failed
                }
            },
        }
    }

    /// Push one deletion to the mirror, reporting the outcome.
    pub async fn push_delete(&self, table: &str, id: &str) -> RemoteWrite {
        match &self.mirror {
            None => RemoteWrite::Disabled,
            Some(mirror) => match mirror.delete(table, id).await {
                Ok(()) => RemoteWrite::Synced,
                Err(e) => {
                    log::warn!(
                        "Remote delete from '{table}' failed, local and remote have diverged: {e}"
                    );
                    RemoteWrite::Failed
                }
            },
        }
    }
}
