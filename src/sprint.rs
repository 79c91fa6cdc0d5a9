use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, dated iteration work items can be assigned to.
///
/// Work items refer to sprints by free-text id only; nothing on the board
/// resolves that id against stored sprints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sprint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub goals: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Sprint {
    pub fn new(name: impl Into<String>, start_date: DateTime<Utc>, end_date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            start_date,
            end_date,
            ..Default::default()
        }
    }
}
