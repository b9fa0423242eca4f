use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Staff {
    pub staff_id: i64,
    pub name: String,
    pub specialty: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStaff {
    #[serde(default)]
    pub name: String,
    pub specialty: Option<String>,
}
