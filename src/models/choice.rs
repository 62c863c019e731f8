use serde::{Deserialize, Serialize};

/// One selectable entry (id, display name) of an appointment form dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: i64,
    pub name: String,
}
