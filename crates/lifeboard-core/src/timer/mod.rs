mod engine;
mod mode;

pub use engine::{FocusTimer, TimerSnapshot};
pub use mode::{TimerMode, BREAK_SECS, FOCUS_SECS};
