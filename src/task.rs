use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kanban column a work item sits in.
///
/// Variants are declared in board order; `ALL` is the left-to-right layout
/// and the direction of forward moves.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Status {
    #[default]
    Backlog,
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    Test,
    Done,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Backlog,
        Status::Todo,
        Status::InProgress,
        Status::Test,
        Status::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Backlog => "Backlog",
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Test => "Test",
            Status::Done => "Done",
        }
    }

    /// Position of this column on the board.
    pub fn index(&self) -> usize {
        match self {
            Status::Backlog => 0,
            Status::Todo => 1,
            Status::InProgress => 2,
            Status::Test => 3,
            Status::Done => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Status> {
        Status::ALL.get(index).copied()
    }

    /// The column to the right, or `None` from `Done`.
    pub fn next(&self) -> Option<Status> {
        Status::from_index(self.index() + 1)
    }

    /// The column to the left, or `None` from `Backlog`.
    pub fn prev(&self) -> Option<Status> {
        self.index().checked_sub(1).and_then(Status::from_index)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WorkType {
    Epic,
    Story,
    #[default]
    Task,
}

impl WorkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::Epic => "Epic",
            WorkType::Story => "Story",
            WorkType::Task => "Task",
        }
    }
}

impl fmt::Display for WorkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reference from one work item to another it depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WorkType,
    /// Must be completed before the dependent item.
    pub blocking: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkItem {
    /// Assigned by the store on first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: WorkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub points: u32,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

fn is_zero(points: &u32) -> bool {
    *points == 0
}

impl WorkItem {
    /// A fresh task in the backlog, stamped with `now`.
    pub fn new_task(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            kind: WorkType::Task,
            status: Status::Backlog,
            created_at: now,
            updated_at: now,
            ..Default::default()
        }
    }

    /// Whether `term` appears in the sprint id, the priority label or any tag.
    ///
    /// Case-sensitive. An empty term matches every item.
    pub fn matches_filter(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.sprint_id.as_deref().is_some_and(|s| s.contains(term))
            || self.priority.is_some_and(|p| p.as_str().contains(term))
            || self.tags.iter().any(|t| t.contains(term))
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
