use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::retry;

/// Connectivity state of a video-bridge endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndpointStatus {
    Connected,
    #[default]
    Disconnected,
    Connecting,
}

/// A video-bridge/meeting-room resource that can be attached to a meeting.
///
/// Meetings embed copies of this record at scheduling time; later edits to
/// the endpoint collection do not change those historical snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub status: EndpointStatus,
    #[serde(default)]
    pub last_connected: Option<String>,
}

#[derive(Debug)]
pub struct Unreachable;

impl std::fmt::Display for Unreachable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "endpoint did not answer")
    }
}

fn byte_sum(id: &str) -> u32 {
    id.bytes().map(u32::from).sum()
}

/// How many attempts the simulated signalling call needs before it answers.
fn attempts_needed(id: &str) -> u32 {
    byte_sum(id) % 3 + 1
}

/// Whether the simulated endpoint answers at all.
fn is_reachable(id: &str) -> bool {
    byte_sum(id) % 7 != 0
}

async fn signalling_call(id: &str, attempt: u32) -> Result<(), Unreachable> {
    if is_reachable(id) && attempt >= attempts_needed(id) {
        Ok(())
    } else {
        Err(Unreachable)
    }
}

/// Probe an endpoint's reachability.
///
/// Stands in for the signalling round-trip a real bridge integration would
/// make; deterministic on the endpoint id so the outcome is reproducible.
/// Retries with exponential backoff and reports the resulting status.
pub async fn probe(endpoint: &Endpoint) -> EndpointStatus {
    let id = endpoint.id.clone();
    let outcome = retry::with_backoff(3, Duration::from_millis(50), |attempt| {
        let id = id.clone();
        async move { signalling_call(&id, attempt).await }
    })
    .await;

    match outcome {
        Ok(()) => EndpointStatus::Connected,
        Err(Unreachable) => EndpointStatus::Disconnected,
    }
}
