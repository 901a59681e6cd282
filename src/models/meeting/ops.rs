//! Pure mutations over the meetings collection.
//!
//! Every operation computes a new collection value from the current one;
//! committing it to memory, the local store and the remote mirror is the
//! coordinator's job (`AppState`).

use std::collections::BTreeMap;

use super::types::{Meeting, MeetingDraft, MeetingStatus, TechCheck};

#[derive(Debug, PartialEq, Eq)]
pub enum MeetingOpError {
    NotFound,
    /// The meeting was cancelled or postponed and is closed to normal edits.
    NotEditable,
    ReasonRequired,
    /// A tech-check referenced an endpoint id the meeting does not embed.
    UnknownEndpoint(String),
}

impl std::fmt::Display for MeetingOpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MeetingOpError::NotFound => write!(f, "Meeting not found"),
            MeetingOpError::NotEditable => {
                write!(f, "Cancelled or postponed meetings cannot be edited")
            }
            MeetingOpError::ReasonRequired => write!(f, "A reason is required"),
            MeetingOpError::UnknownEndpoint(id) => {
                write!(f, "Endpoint {id} is not attached to this meeting")
            }
        }
    }
}

type OpResult = Result<Vec<Meeting>, MeetingOpError>;

/// Schedule a new meeting. The draft is already validated (≥ 1 endpoint).
pub fn schedule(meetings: &[Meeting], id: String, draft: MeetingDraft) -> (Vec<Meeting>, Meeting) {
    let meeting = Meeting {
        id,
        title: draft.title,
        host_unit: draft.host_unit,
        host_unit_id: draft.host_unit_id,
        chair_person: draft.chair_person,
        chair_person_id: draft.chair_person_id,
        start: draft.start,
        end: draft.end,
        description: draft.description,
        participant_groups: draft.participant_groups,
        endpoints: draft.endpoints,
        notes: None,
        tech_checks: BTreeMap::new(),
        status: MeetingStatus::Scheduled,
        status_reason: None,
        invite_link: draft.invite_link,
    };
    let mut next = meetings.to_vec();
    next.push(meeting.clone());
    (next, meeting)
}

/// Edit a scheduled meeting in place. Notes, tech checks and status survive
/// the edit; the endpoint set is re-snapshotted from the draft.
pub fn edit(meetings: &[Meeting], id: &str, draft: MeetingDraft) -> Result<(Vec<Meeting>, Meeting), MeetingOpError> {
    let current = meetings
        .iter()
        .find(|m| m.id == id)
        .ok_or(MeetingOpError::NotFound)?;
    if !current.is_editable() {
        return Err(MeetingOpError::NotEditable);
    }

    let updated = Meeting {
        id: current.id.clone(),
        title: draft.title,
        host_unit: draft.host_unit,
        host_unit_id: draft.host_unit_id,
        chair_person: draft.chair_person,
        chair_person_id: draft.chair_person_id,
        start: draft.start,
        end: draft.end,
        description: draft.description,
        participant_groups: draft.participant_groups,
        endpoints: draft.endpoints,
        notes: current.notes.clone(),
        tech_checks: current.tech_checks.clone(),
        status: current.status,
        status_reason: current.status_reason.clone(),
        invite_link: draft.invite_link,
    };
    let next = crate::models::replace_by_id(meetings, id, |m| &m.id, updated.clone())
        .ok_or(MeetingOpError::NotFound)?;
    Ok((next, updated))
}

fn transition(meetings: &[Meeting], id: &str, status: MeetingStatus, reason: &str) -> Result<(Vec<Meeting>, Meeting), MeetingOpError> {
    if reason.trim().is_empty() {
        return Err(MeetingOpError::ReasonRequired);
    }
    let current = meetings
        .iter()
        .find(|m| m.id == id)
        .ok_or(MeetingOpError::NotFound)?;

    // Status and reason change together, as one update.
    let mut updated = current.clone();
    updated.status = status;
    updated.status_reason = Some(reason.trim().to_string());

    let next = crate::models::replace_by_id(meetings, id, |m| &m.id, updated.clone())
        .ok_or(MeetingOpError::NotFound)?;
    Ok((next, updated))
}

/// Cancel a meeting. Requires a non-empty reason; never deletes the record.
pub fn cancel(meetings: &[Meeting], id: &str, reason: &str) -> Result<(Vec<Meeting>, Meeting), MeetingOpError> {
    transition(meetings, id, MeetingStatus::Cancelled, reason)
}

/// Postpone a meeting. Requires a non-empty reason; never deletes the record.
pub fn postpone(meetings: &[Meeting], id: &str, reason: &str) -> Result<(Vec<Meeting>, Meeting), MeetingOpError> {
    transition(meetings, id, MeetingStatus::Postponed, reason)
}

/// Save free-text notes. Allowed in any status — notes are not the normal
/// edit path.
pub fn save_notes(meetings: &[Meeting], id: &str, notes: &str) -> Result<(Vec<Meeting>, Meeting), MeetingOpError> {
    let current = meetings
        .iter()
        .find(|m| m.id == id)
        .ok_or(MeetingOpError::NotFound)?;
    let mut updated = current.clone();
    updated.notes = if notes.is_empty() {
        None
    } else {
        Some(notes.to_string())
    };
    let next = crate::models::replace_by_id(meetings, id, |m| &m.id, updated.clone())
        .ok_or(MeetingOpError::NotFound)?;
    Ok((next, updated))
}

/// Save the per-endpoint technical-check records. Every key must be an
/// endpoint id embedded in this meeting.
pub fn save_tech_checks(
    meetings: &[Meeting],
    id: &str,
    checks: BTreeMap<String, TechCheck>,
) -> Result<(Vec<Meeting>, Meeting), MeetingOpError> {
    let current = meetings
        .iter()
        .find(|m| m.id == id)
        .ok_or(MeetingOpError::NotFound)?;
    for endpoint_id in checks.keys() {
        if !current.has_endpoint(endpoint_id) {
            return Err(MeetingOpError::UnknownEndpoint(endpoint_id.clone()));
        }
    }
    let mut updated = current.clone();
    updated.tech_checks = checks;
    let next = crate::models::replace_by_id(meetings, id, |m| &m.id, updated.clone())
        .ok_or(MeetingOpError::NotFound)?;
    Ok((next, updated))
}

/// Delete a meeting outright.
pub fn remove(meetings: &[Meeting], id: &str) -> OpResult {
    crate::models::remove_by_id(meetings, id, |m| &m.id).ok_or(MeetingOpError::NotFound)
}
