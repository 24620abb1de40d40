//! Screen selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Dashboard,
    Coach,
    Tasks,
    Habits,
    Focus,
    Notes,
}

impl View {
    /// Navigation order.
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::Coach,
        View::Tasks,
        View::Habits,
        View::Focus,
        View::Notes,
    ];

    pub fn id(self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Coach => "coach",
            View::Tasks => "tasks",
            View::Habits => "habits",
            View::Focus => "focus",
            View::Notes => "notes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Coach => "AI Coach",
            View::Tasks => "Tasks",
            View::Habits => "Habits",
            View::Focus => "Focus Timer",
            View::Notes => "Offline Notes",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for View {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        View::ALL
            .into_iter()
            .find(|v| v.id() == needle)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "view".into(),
                message: format!("unknown view '{s}'"),
            })
    }
}

/// Currently selected view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Router {
    current: View,
}

impl Router {
    pub fn current(&self) -> View {
        self.current
    }

    /// Switch to `view`. Returns the view left behind, or `None` when it was
    /// already selected.
    pub fn navigate(&mut self, view: View) -> Option<View> {
        if self.current == view {
            return None;
        }
        Some(std::mem::replace(&mut self.current, view))
    }
}
