use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const FOCUS_SECS: u32 = 25 * 60;
pub const BREAK_SECS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Focus,
    Break,
}

impl TimerMode {
    /// Fixed length of one run in this mode.
    pub fn duration_secs(self) -> u32 {
        match self {
            TimerMode::Focus => FOCUS_SECS,
            TimerMode::Break => BREAK_SECS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Deep Focus",
            TimerMode::Break => "Short Break",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerMode::Focus => "focus",
            TimerMode::Break => "break",
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimerMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(TimerMode::Focus),
            "break" => Ok(TimerMode::Break),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("expected 'focus' or 'break', got '{other}'"),
            }),
        }
    }
}
