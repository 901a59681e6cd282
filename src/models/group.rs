use serde::{Deserialize, Serialize};

/// A participant group. Informational only — meetings reference groups by
/// label, not by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
