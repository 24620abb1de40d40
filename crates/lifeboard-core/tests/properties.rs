//! Property tests for the derived-state rules.

use chrono::NaiveDate;
use lifeboard_core::{compute_stats, FocusTimer, HabitTracker, TaskCategory, TaskStore, TimerMode};
use proptest::prelude::*;

fn date(offset: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Days::new(offset as u64)
}

proptest! {
    #[test]
    fn life_score_follows_completion_ratio(flags in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut tasks = TaskStore::new();
        for (i, done) in flags.iter().enumerate() {
            let id = tasks.add_task(&format!("task {i}"), TaskCategory::Work).unwrap().id.clone();
            if *done {
                tasks.toggle_task(&id);
            }
        }
        let completed = flags.iter().filter(|d| **d).count();
        let stats = compute_stats(&tasks, &HabitTracker::new(), 0, date(0));

        prop_assert_eq!(stats.tasks_completed as usize, completed);
        let ratio = completed as f64 / flags.len().max(1) as f64;
        let expected = (ratio * 40.0 + 40.0 + 20.0).round() as u32;
        prop_assert_eq!(stats.life_score, expected);
        prop_assert!((60..=100).contains(&stats.life_score));
    }

    #[test]
    fn toggling_a_date_twice_is_identity(
        prior in prop::collection::vec(0u32..30, 0..10),
        target in 0u32..30,
    ) {
        let mut habits = HabitTracker::new();
        let id = habits.add_habit("Read").unwrap().id.clone();
        for d in prior {
            habits.toggle_on(&id, date(d));
        }
        let before = habits.get(&id).unwrap().clone();

        habits.toggle_on(&id, date(target));
        habits.toggle_on(&id, date(target));
        let after = habits.get(&id).unwrap();

        prop_assert_eq!(after.streak, before.streak);
        let mut a = after.completed_dates.clone();
        let mut b = before.completed_dates.clone();
        a.sort();
        b.sort();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn completed_dates_never_repeat(toggles in prop::collection::vec(0u32..7, 0..60)) {
        let mut habits = HabitTracker::new();
        let id = habits.add_habit("Walk").unwrap().id.clone();
        for d in toggles {
            habits.toggle_on(&id, date(d));
        }
        let habit = habits.get(&id).unwrap();
        let mut dates = habit.completed_dates.clone();
        dates.sort();
        dates.dedup();
        prop_assert_eq!(dates.len(), habit.completed_dates.len());
    }

    #[test]
    fn reset_restores_full_duration(ticks in 0u32..2000, start_in_break in any::<bool>()) {
        let mode = if start_in_break { TimerMode::Break } else { TimerMode::Focus };
        let mut timer = FocusTimer::new(mode);
        timer.start_at(0);
        for _ in 0..ticks {
            timer.tick();
        }
        timer.reset();
        prop_assert_eq!(timer.time_left(), mode.duration_secs());
        prop_assert!(!timer.is_active());
    }

    #[test]
    fn switch_mode_always_stops_and_loads(ticks in 0u32..400, running in any::<bool>(), to_break in any::<bool>()) {
        let mut timer = FocusTimer::default();
        timer.start_at(0);
        for _ in 0..ticks {
            timer.tick();
        }
        if !running {
            timer.pause_at(0);
        }
        let target = if to_break { TimerMode::Break } else { TimerMode::Focus };
        timer.switch_mode(target);
        prop_assert!(!timer.is_active());
        prop_assert_eq!(timer.mode(), target);
        prop_assert_eq!(timer.time_left(), target.duration_secs());
    }

    #[test]
    fn sync_matches_tick_count(secs in 0u64..1600) {
        let mut synced = FocusTimer::default();
        let mut ticked = FocusTimer::default();
        synced.start_at(0);
        ticked.start_at(0);
        synced.sync_at(secs * 1000);
        for _ in 0..secs {
            ticked.tick();
        }
        prop_assert_eq!(synced.time_left(), ticked.time_left());
        prop_assert_eq!(synced.is_active(), ticked.is_active());
    }
}

#[test]
fn focus_run_of_1500_ticks_ends_inactive() {
    let mut timer = FocusTimer::default();
    assert_eq!(timer.time_left(), 1500);
    timer.toggle();
    for _ in 0..1500 {
        timer.tick();
    }
    assert_eq!(timer.time_left(), 0);
    assert!(!timer.is_active());
}
