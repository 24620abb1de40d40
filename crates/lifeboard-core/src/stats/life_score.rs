//! Life score aggregation.
//!
//! `life_score = round(completed / max(1, total) * 40 + 40 + 20)`
//!
//! The habit component is a fixed 40 points; habits only feed the separate
//! consistency percentage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::HabitTracker;
use crate::task::TaskStore;

/// Weight of the task completion ratio.
pub const TASK_WEIGHT: f64 = 40.0;
/// Fixed habit contribution to the life score.
pub const HABIT_COMPONENT: f64 = 40.0;
/// Fixed baseline contribution to the life score.
pub const BASE_COMPONENT: f64 = 20.0;

/// Dashboard figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// 0..=100
    pub life_score: u32,
    /// Minutes of completed focus runs.
    pub focus_minutes: u64,
    pub tasks_completed: u32,
    /// Share of habits done today, 0..=100.
    pub habit_consistency: u32,
}

/// Score for `completed` out of `total` tasks.
pub fn life_score(completed: usize, total: usize) -> u32 {
    let ratio = completed as f64 / total.max(1) as f64;
    let score = (ratio * TASK_WEIGHT + HABIT_COMPONENT + BASE_COMPONENT).round();
    score.clamp(0.0, 100.0) as u32
}

/// Percentage of habits marked done on `date`; 0 with no habits.
pub fn habit_consistency(habits: &HabitTracker, date: NaiveDate) -> u32 {
    if habits.is_empty() {
        return 0;
    }
    let done = habits.done_count_on(date) as f64;
    (done / habits.len() as f64 * 100.0).round() as u32
}

pub fn compute_stats(
    tasks: &TaskStore,
    habits: &HabitTracker,
    focus_minutes: u64,
    today: NaiveDate,
) -> UserStats {
    let completed = tasks.completed_count();
    UserStats {
        life_score: life_score(completed, tasks.len()),
        focus_minutes,
        tasks_completed: completed as u32,
        habit_consistency: habit_consistency(habits, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskCategory;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn empty_collections_score_sixty() {
        let stats = compute_stats(&TaskStore::new(), &HabitTracker::new(), 0, today());
        assert_eq!(stats.life_score, 60);
        assert_eq!(stats.tasks_completed, 0);
        assert_eq!(stats.habit_consistency, 0);
    }

    #[test]
    fn write_report_scenario() {
        let mut tasks = TaskStore::new();
        let id = tasks.add_task("Write report", TaskCategory::Work).unwrap().id.clone();
        let habits = HabitTracker::new();
        assert_eq!(compute_stats(&tasks, &habits, 0, today()).life_score, 60);

        tasks.toggle_task(&id);
        let stats = compute_stats(&tasks, &habits, 0, today());
        assert_eq!(stats.tasks_completed, 1);
        assert_eq!(stats.life_score, 100);
    }

    #[test]
    fn partial_completion_rounds() {
        // 1/3 * 40 = 13.33 -> 73
        assert_eq!(life_score(1, 3), 73);
        // 2/3 * 40 = 26.67 -> 87
        assert_eq!(life_score(2, 3), 87);
    }

    #[test]
    fn consistency_counts_habits_done_today() {
        let mut habits = HabitTracker::new();
        let id = habits.add_habit("Read").unwrap().id.clone();
        habits.add_habit("Walk");
        habits.add_habit("Sleep early");
        habits.toggle_on(&id, today());
        assert_eq!(habit_consistency(&habits, today()), 33);
        assert_eq!(habit_consistency(&habits, today().succ_opt().unwrap()), 0);
    }

    #[test]
    fn focus_minutes_pass_through() {
        let stats = compute_stats(&TaskStore::new(), &HabitTracker::new(), 125, today());
        assert_eq!(stats.focus_minutes, 125);
    }
}
