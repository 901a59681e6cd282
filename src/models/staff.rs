use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub full_name: String,
    pub unit_id: String,
    pub position: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Staff of one unit, for chair-person assignment.
pub fn filter_by_unit<'a>(staff: &'a [Staff], unit_id: &str) -> Vec<&'a Staff> {
    staff.iter().filter(|s| s.unit_id == unit_id).collect()
}
