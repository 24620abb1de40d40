//! Focus timer implementation.
//!
//! The timer is a countdown over whole seconds with two fixed-length modes.
//! It does not use internal threads - the caller drives it either by calling
//! `tick()` once per elapsed second, or by calling `sync()` with the wall
//! clock so a process that was not running in between catches up.
//!
//! ## State Transitions
//!
//! ```text
//! Paused --toggle--> Active --tick x N--> Paused (time_left = 0)
//!    ^                  |
//!    +----toggle--------+
//! reset / switch_mode: any -> Paused (time_left = full duration)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::mode::TimerMode;
use crate::events::Event;

/// Countdown state machine for the focus/break cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusTimer {
    mode: TimerMode,
    /// Seconds left in the current run.
    time_left: u32,
    is_active: bool,
    /// Wall-clock instant (ms since epoch) up to which elapsed time has been
    /// applied. Only set while active.
    #[serde(default)]
    last_sync_epoch_ms: Option<u64>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(TimerMode::Focus)
    }
}

impl FocusTimer {
    /// Create a paused timer holding the full duration of `mode`.
    pub fn new(mode: TimerMode) -> Self {
        Self {
            mode,
            time_left: mode.duration_secs(),
            is_active: false,
            last_sync_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn total_secs(&self) -> u32 {
        self.mode.duration_secs()
    }

    /// 0.0 .. 1.0 fraction of the current run already elapsed.
    pub fn progress(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.time_left) as f64;
        (elapsed / total as f64).clamp(0.0, 1.0)
    }

    /// `MM:SS` rendering of the time left.
    pub fn clock(&self) -> String {
        format!("{:02}:{:02}", self.time_left / 60, self.time_left % 60)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            label: self.mode.label().to_string(),
            time_left: self.time_left,
            clock: self.clock(),
            is_active: self.is_active,
            progress: self.progress(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start if paused, pause if running.
    pub fn toggle(&mut self) -> Option<Event> {
        self.toggle_at(now_ms())
    }

    pub fn toggle_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.is_active {
            self.pause_at(now_ms)
        } else {
            self.start_at(now_ms)
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    /// Activate the countdown. No-op when already active or when nothing is
    /// left to count down.
    pub fn start_at(&mut self, now_ms: u64) -> Option<Event> {
        if self.is_active || self.time_left == 0 {
            return None;
        }
        self.is_active = true;
        self.last_sync_epoch_ms = Some(now_ms);
        Some(Event::TimerStarted {
            mode: self.mode,
            time_left_secs: self.time_left,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.pause_at(now_ms())
    }

    /// Deactivate after applying any whole seconds elapsed up to `now_ms`.
    /// If that catch-up finishes the run, the completion event is returned.
    pub fn pause_at(&mut self, now_ms: u64) -> Option<Event> {
        if !self.is_active {
            return None;
        }
        if let Some(completed) = self.sync_at(now_ms) {
            return Some(completed);
        }
        self.is_active = false;
        self.last_sync_epoch_ms = None;
        Some(Event::TimerPaused {
            mode: self.mode,
            time_left_secs: self.time_left,
            at: Utc::now(),
        })
    }

    /// Advance one second. Returns `Some(Event::TimerCompleted)` when the
    /// countdown reaches zero; the timer then stays in its mode, inactive.
    pub fn tick(&mut self) -> Option<Event> {
        self.advance(Utc::now)
    }

    /// One second of countdown. `completed_at` stamps the completion event.
    fn advance(&mut self, completed_at: impl FnOnce() -> DateTime<Utc>) -> Option<Event> {
        if !self.is_active {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if let Some(last) = self.last_sync_epoch_ms.as_mut() {
            *last += 1000;
        }
        if self.time_left == 0 {
            self.is_active = false;
            self.last_sync_epoch_ms = None;
            return Some(Event::TimerCompleted {
                mode: self.mode,
                duration_secs: self.total_secs(),
                at: completed_at(),
            });
        }
        None
    }

    /// Stop and restore the full duration of the current mode.
    pub fn reset(&mut self) -> Option<Event> {
        self.is_active = false;
        self.last_sync_epoch_ms = None;
        self.time_left = self.mode.duration_secs();
        Some(Event::TimerReset {
            mode: self.mode,
            at: Utc::now(),
        })
    }

    /// Stop, change mode, and load that mode's full duration.
    pub fn switch_mode(&mut self, mode: TimerMode) -> Option<Event> {
        let from = self.mode;
        self.mode = mode;
        self.is_active = false;
        self.last_sync_epoch_ms = None;
        self.time_left = mode.duration_secs();
        Some(Event::ModeSwitched {
            from,
            to: mode,
            at: Utc::now(),
        })
    }

    /// Catch up with the system clock.
    pub fn sync(&mut self) -> Option<Event> {
        self.sync_at(now_ms())
    }

    /// Apply one tick per whole second elapsed since the last sync. The
    /// sub-second remainder is carried over to the next call. A completion
    /// found while catching up is stamped with the second the run ended.
    pub fn sync_at(&mut self, now_ms: u64) -> Option<Event> {
        let last = match (self.is_active, self.last_sync_epoch_ms) {
            (true, Some(last)) => last,
            _ => return None,
        };
        let whole_secs = now_ms.saturating_sub(last) / 1000;
        let ticks = whole_secs.min(self.time_left as u64);
        for applied in 1..=ticks {
            let instant = last + applied * 1000;
            if let Some(completed) = self.advance(|| epoch_ms_to_utc(instant)) {
                return Some(completed);
            }
        }
        None
    }
}

/// Display-ready view of the timer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub label: String,
    pub time_left: u32,
    pub clock: String,
    pub is_active: bool,
    pub progress: f64,
}

fn epoch_ms_to_utc(ms: u64) -> DateTime<Utc> {
    i64::try_from(ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(Utc::now)
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
