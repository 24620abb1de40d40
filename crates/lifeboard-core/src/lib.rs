//! # Lifeboard Core Library
//!
//! This library provides the business logic for Lifeboard, a personal
//! productivity dashboard: tasks, habits, a pomodoro-style focus timer,
//! offline notes and a chat-based AI coach. Every operation is available
//! through the standalone CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: countdown state machine; the caller drives it with
//!   `tick()` or catches it up with the wall clock via `sync()`
//! - **Stores**: tasks, habits and the coach conversation held in memory and
//!   saved as JSON slots; notes autosave to their slot on every change
//! - **Stats**: life score and friends, recomputed from the stores on demand
//! - **Gateway**: chat, task breakdown and habit analysis over Gemini, each
//!   degrading to a fixed fallback instead of failing
//! - **Storage**: SQLite key-value slots and session log, TOML configuration
//!
//! ## Key Components
//!
//! - [`FocusTimer`]: focus/break countdown
//! - [`Dashboard`]: aggregate state with stale-reply protection for AI calls
//! - [`NoteStore`]: persisted notes
//! - [`AiGateway`]: text-generation requests with fallbacks
//! - [`Database`] / [`Config`]: persistence and configuration

pub mod chat;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod gateway;
pub mod habit;
pub mod note;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;
pub mod view;

pub use chat::{ChatLog, ChatMessage, ChatRole, Turn};
pub use dashboard::{ChatRequest, Dashboard};
pub use error::{ConfigError, CoreError, DatabaseError, GatewayError, ValidationError};
pub use events::Event;
pub use gateway::{AiGateway, GeminiClient, RequestTicket, RequestTracker, TextGenerator};
pub use habit::{Habit, HabitFrequency, HabitTracker};
pub use note::{Note, NotePatch, NoteStore};
pub use stats::{compute_stats, UserStats};
pub use storage::{Config, Database, KvStore, MemoryKv};
pub use task::{Task, TaskCategory, TaskDraft, TaskStore};
pub use timer::{FocusTimer, TimerMode, TimerSnapshot};
pub use view::{Router, View};
