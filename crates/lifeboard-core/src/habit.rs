//! Habit streak tracking.
//!
//! The streak counter moves only through `toggle_on`: marking a date done
//! increments it, undoing that date decrements it (floored at zero). Dates
//! are not checked for contiguity, so toggling days out of order can inflate
//! a streak. `completed_dates` never holds the same date twice.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub title: String,
    pub streak: u32,
    #[serde(deserialize_with = "unique_dates")]
    pub completed_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub frequency: HabitFrequency,
}

/// Saved data may repeat a date; keep the first occurrence of each.
fn unique_dates<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<NaiveDate>, D::Error> {
    let mut dates = Vec::<NaiveDate>::deserialize(deserializer)?;
    let mut seen = std::collections::HashSet::new();
    dates.retain(|d| seen.insert(*d));
    Ok(dates)
}

impl Habit {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            streak: 0,
            completed_dates: Vec::new(),
            frequency: HabitFrequency::Daily,
        }
    }

    pub fn is_done_on(&self, date: NaiveDate) -> bool {
        self.completed_dates.contains(&date)
    }

    /// Returns whether the habit is done for `date` afterwards.
    fn toggle(&mut self, date: NaiveDate) -> bool {
        if self.is_done_on(date) {
            self.completed_dates.retain(|d| *d != date);
            self.streak = self.streak.saturating_sub(1);
            false
        } else {
            self.completed_dates.push(date);
            self.streak += 1;
            true
        }
    }
}

/// Ordered habit collection (oldest first).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitTracker {
    habits: Vec<Habit>,
}

impl HabitTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    /// Append a daily habit with no history. Blank titles are ignored.
    pub fn add_habit(&mut self, title: &str) -> Option<&Habit> {
        if title.trim().is_empty() {
            return None;
        }
        self.habits.push(Habit::new(title));
        self.habits.last()
    }

    pub fn delete_habit(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        self.habits.len() != before
    }

    /// Toggle today's completion using the local calendar date.
    pub fn toggle_today(&mut self, id: &str) -> Option<bool> {
        self.toggle_on(id, today())
    }

    /// Mark `date` done, or undo it if it was already done. `None` for an
    /// unknown id.
    pub fn toggle_on(&mut self, id: &str, date: NaiveDate) -> Option<bool> {
        let habit = self.habits.iter_mut().find(|h| h.id == id)?;
        Some(habit.toggle(date))
    }

    /// `"<title>: <streak> day streak"` entries joined by `", "`.
    pub fn summary(&self) -> String {
        self.habits
            .iter()
            .map(|h| format!("{}: {} day streak", h.title, h.streak))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn done_count_on(&self, date: NaiveDate) -> usize {
        self.habits.iter().filter(|h| h.is_done_on(date)).count()
    }
}

/// Today's date on the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
