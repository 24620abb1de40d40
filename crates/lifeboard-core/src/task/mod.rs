//! Task types.
//!
//! Tasks are created by the user or by an AI breakdown of a larger goal, and
//! only ever change through toggle and delete.

mod store;

pub use store::TaskStore;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Life area a task belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    #[default]
    Work,
    Personal,
    Growth,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 3] = [TaskCategory::Work, TaskCategory::Personal, TaskCategory::Growth];

    pub fn as_str(self) -> &'static str {
        match self {
            TaskCategory::Work => "work",
            TaskCategory::Personal => "personal",
            TaskCategory::Growth => "growth",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(TaskCategory::Work),
            "personal" => Ok(TaskCategory::Personal),
            "growth" => Ok(TaskCategory::Growth),
            other => Err(ValidationError::InvalidValue {
                field: "category".into(),
                message: format!("expected work, personal or growth, got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub category: TaskCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(title: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            completed: false,
            category,
            due_date: None,
        }
    }
}

/// One sub-task proposed by the breakdown call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub category: TaskCategory,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            title: title.into(),
            category,
        }
    }
}
