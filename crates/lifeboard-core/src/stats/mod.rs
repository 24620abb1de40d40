//! Statistics module for Lifeboard
//!
//! Everything here is derived state: recomputed from the task and habit
//! collections on every read, never stored or mutated on its own.

mod life_score;

pub use life_score::{
    compute_stats, habit_consistency, life_score, UserStats, BASE_COMPONENT, HABIT_COMPONENT,
    TASK_WEIGHT,
};
