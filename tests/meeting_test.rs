//! Meeting mutation tests — scheduling, editing, cancel/postpone rules,
//! notes, tech checks, deletion round trips.

mod common;

use common::*;
use std::collections::BTreeMap;

use vcadmin::models::meeting::{self, MeetingOpError, MeetingStatus, TechCheck};

#[test]
fn schedule_then_delete_restores_collection() {
    let before = vec![meeting("M0", "2024-05-01T09:00:00Z", "Unit A")];

    let d = draft(
        "Budget review",
        "2024-05-20T08:00:00Z",
        "2024-05-20T09:00:00Z",
        vec![endpoint("EP-1", "Bridge A"), endpoint("EP-2", "Bridge B")],
    );
    let (with_new, created) = meeting::schedule(&before, "M1".to_string(), d);
    assert_eq!(with_new.len(), 2);
    assert_eq!(created.endpoints.len(), 2);
    assert_eq!(created.status, MeetingStatus::Scheduled);

    let after = meeting::remove(&with_new, "M1").expect("delete failed");
    assert_eq!(after, before);
}

#[test]
fn edit_preserves_untouched_fields() {
    let m = meeting("M1", "2024-05-20T08:00:00Z", "Unit A");
    let meetings = vec![m.clone()];

    let mut d = draft(
        "Renamed meeting",
        "2024-05-20T08:00:00Z",
        "2024-05-20T09:00:00Z",
        m.endpoints.clone(),
    );
    d.host_unit = m.host_unit.clone();

    let (next, updated) = meeting::edit(&meetings, "M1", d).expect("edit failed");
    assert_eq!(next.len(), 1);
    assert_eq!(updated.title, "Renamed meeting");
    assert_eq!(updated.id, m.id);
    assert_eq!(updated.host_unit, m.host_unit);
    assert_eq!(updated.chair_person, m.chair_person);
    assert_eq!(updated.start, m.start);
    assert_eq!(updated.status, m.status);
    assert_eq!(updated.notes, m.notes);
    assert_eq!(updated.tech_checks, m.tech_checks);
}

#[test]
fn edit_unknown_meeting_is_not_found() {
    let meetings = vec![meeting("M1", "2024-05-20T08:00:00Z", "Unit A")];
    let d = draft(
        "Nope",
        "2024-05-20T08:00:00Z",
        "2024-05-20T09:00:00Z",
        vec![endpoint("EP-1", "Bridge A")],
    );
    assert_eq!(
        meeting::edit(&meetings, "M999", d).unwrap_err(),
        MeetingOpError::NotFound
    );
}

#[test]
fn cancel_with_empty_reason_is_rejected() {
    let meetings = vec![meeting("M1", "2024-05-20T08:00:00Z", "Unit A")];

    let err = meeting::cancel(&meetings, "M1", "   ").unwrap_err();
    assert_eq!(err, MeetingOpError::ReasonRequired);

    // Collection unchanged — the caller never got a new value to commit.
    assert_eq!(meetings[0].status, MeetingStatus::Scheduled);
    assert_eq!(meetings[0].status_reason, None);
}

#[test]
fn cancel_sets_status_and_reason_together() {
    let meetings = vec![meeting("M1", "2024-05-20T08:00:00Z", "Unit A")];

    let (next, updated) =
        meeting::cancel(&meetings, "M1", "Chair unavailable").expect("cancel failed");
    assert_eq!(updated.status, MeetingStatus::Cancelled);
    assert_eq!(updated.status_reason.as_deref(), Some("Chair unavailable"));
    assert_eq!(next[0].status, MeetingStatus::Cancelled);
}

#[test]
fn cancelled_meeting_is_closed_to_edits() {
    let meetings = vec![meeting("M1", "2024-05-20T08:00:00Z", "Unit A")];
    let (next, _) = meeting::cancel(&meetings, "M1", "Room conflict").expect("cancel failed");

    let d = draft(
        "Still trying",
        "2024-05-21T08:00:00Z",
        "2024-05-21T09:00:00Z",
        vec![endpoint("EP-1", "Bridge A")],
    );
    assert_eq!(
        meeting::edit(&next, "M1", d).unwrap_err(),
        MeetingOpError::NotEditable
    );
}

#[test]
fn postpone_requires_reason_and_keeps_record() {
    let meetings = vec![meeting("M1", "2024-05-20T08:00:00Z", "Unit A")];

    assert_eq!(
        meeting::postpone(&meetings, "M1", "").unwrap_err(),
        MeetingOpError::ReasonRequired
    );

    let (next, updated) =
        meeting::postpone(&meetings, "M1", "Awaiting quorum").expect("postpone failed");
    assert_eq!(updated.status, MeetingStatus::Postponed);
    assert_eq!(next.len(), 1, "postpone never deletes");
}

#[test]
fn notes_can_be_saved_after_cancellation() {
    let meetings = vec![meeting("M1", "2024-05-20T08:00:00Z", "Unit A")];
    let (cancelled, _) = meeting::cancel(&meetings, "M1", "Cancelled").expect("cancel failed");

    let (_, updated) =
        meeting::save_notes(&cancelled, "M1", "Follow up next quarter").expect("notes failed");
    assert_eq!(updated.notes.as_deref(), Some("Follow up next quarter"));
}

#[test]
fn tech_checks_accept_embedded_endpoints_only() {
    let m = meeting("M1", "2024-05-20T08:00:00Z", "Unit A");
    let meetings = vec![m];

    let mut checks = BTreeMap::new();
    checks.insert(
        "EP-1".to_string(),
        TechCheck {
            checked: true,
            notes: "Audio verified".to_string(),
        },
    );
    let (next, updated) =
        meeting::save_tech_checks(&meetings, "M1", checks).expect("checks failed");
    assert!(updated.tech_checks["EP-1"].checked);
    assert_eq!(next[0].tech_checks.len(), 1);

    let mut bad = BTreeMap::new();
    bad.insert("EP-OTHER".to_string(), TechCheck::default());
    assert_eq!(
        meeting::save_tech_checks(&next, "M1", bad).unwrap_err(),
        MeetingOpError::UnknownEndpoint("EP-OTHER".to_string())
    );
}

#[test]
fn endpoint_snapshots_survive_source_edits() {
    let m = meeting("M1", "2024-05-20T08:00:00Z", "Unit A");
    let snapshot_name = m.endpoints[0].name.clone();

    // Editing the live endpoint collection happens elsewhere; the embedded
    // copy must be unaffected by construction.
    let mut live = endpoint("EP-1", "Bridge A");
    live.name = "Renamed Bridge".to_string();

    assert_eq!(m.endpoints[0].name, snapshot_name);
    assert_ne!(m.endpoints[0].name, live.name);
}

#[test]
fn state_commit_round_trip() {
    let (_dir, state) = setup_state();

    let d = draft(
        "Stand-up",
        "2024-05-20T08:00:00Z",
        "2024-05-20T08:30:00Z",
        vec![endpoint("EP-1", "Bridge A")],
    );
    let before = state.snapshot().meetings;
    let (next, created) = meeting::schedule(&before, "M1".to_string(), d);
    state.commit_meetings(next).expect("commit failed");

    // Both the in-memory snapshot and the persisted store hold the change.
    assert_eq!(state.snapshot().meetings.len(), 1);
    let persisted: Vec<vcadmin::models::meeting::Meeting> =
        state.store.get(vcadmin::store::keys::MEETINGS, Vec::new());
    assert_eq!(persisted.len(), 1);
    assert_eq!(persisted[0].id, created.id);

    let after = meeting::remove(&state.snapshot().meetings, "M1").expect("delete failed");
    state.commit_meetings(after).expect("commit failed");
    assert_eq!(state.snapshot().meetings, before);
}
