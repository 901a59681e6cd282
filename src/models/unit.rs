use serde::{Deserialize, Serialize};

/// An organizational department that hosts meetings and employs staff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}
