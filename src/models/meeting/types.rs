use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::endpoint::Endpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingStatus {
    #[default]
    Scheduled,
    Cancelled,
    Postponed,
}

impl std::fmt::Display for MeetingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeetingStatus::Scheduled => write!(f, "SCHEDULED"),
            MeetingStatus::Cancelled => write!(f, "CANCELLED"),
            MeetingStatus::Postponed => write!(f, "POSTPONED"),
        }
    }
}

/// Per-endpoint pre-meeting technical verification record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TechCheck {
    pub checked: bool,
    #[serde(default)]
    pub notes: String,
}

/// A scheduled meeting.
///
/// `host_unit`, `chair_person` and `endpoints` are point-in-time snapshots
/// taken when the meeting is scheduled or edited; deleting or editing the
/// referenced unit, staff member or endpoint afterwards leaves these fields
/// as they were. Meetings are historical records in that respect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub host_unit: String,
    pub host_unit_id: String,
    pub chair_person: String,
    pub chair_person_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub participant_groups: Vec<String>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tech_checks: BTreeMap<String, TechCheck>,
    #[serde(default)]
    pub status: MeetingStatus,
    #[serde(default)]
    pub status_reason: Option<String>,
    #[serde(default)]
    pub invite_link: Option<String>,
}

impl Meeting {
    pub fn is_editable(&self) -> bool {
        self.status == MeetingStatus::Scheduled
    }

    pub fn has_endpoint(&self, endpoint_id: &str) -> bool {
        self.endpoints.iter().any(|ep| ep.id == endpoint_id)
    }
}

/// Validated input for scheduling or editing a meeting. Snapshot fields
/// (unit name, chair name, endpoint records) are resolved by the caller
/// from the live collections before the mutation is applied.
#[derive(Debug, Clone)]
pub struct MeetingDraft {
    pub title: String,
    pub host_unit: String,
    pub host_unit_id: String,
    pub chair_person: String,
    pub chair_person_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub participant_groups: Vec<String>,
    pub endpoints: Vec<Endpoint>,
    pub invite_link: Option<String>,
}
