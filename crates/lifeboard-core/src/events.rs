use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::TimerMode;

/// Every timer state change produces an Event.
/// The CLI prints them; callers may also record completed sessions from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: TimerMode,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: TimerMode,
        time_left_secs: u32,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. The timer is inactive and stays in `mode`.
    TimerCompleted {
        mode: TimerMode,
        duration_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: TimerMode,
        at: DateTime<Utc>,
    },
    ModeSwitched {
        from: TimerMode,
        to: TimerMode,
        at: DateTime<Utc>,
    },
}
