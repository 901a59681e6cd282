use serde::{Deserialize, Serialize};

/// Singleton system settings record. Seeded with defaults, mutated via the
/// settings endpoint, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSettings {
    pub system_name: String,
    pub short_name: String,
    #[serde(default)]
    pub logo_data: Option<String>,
    pub primary_color: String,
}

impl Default for SystemSettings {
    fn default() -> Self {
        SystemSettings {
            system_name: "Videoconference Administration".to_string(),
            short_name: "VC Admin".to_string(),
            logo_data: None,
            primary_color: "#1d4ed8".to_string(),
        }
    }
}
