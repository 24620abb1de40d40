use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Task, TaskCategory, TaskDraft};

/// In-memory task collection, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Prepend a new incomplete task. Blank titles are ignored.
    pub fn add_task(&mut self, title: &str, category: TaskCategory) -> Option<&Task> {
        if title.trim().is_empty() {
            return None;
        }
        self.tasks.insert(0, Task::new(title, category));
        self.tasks.first()
    }

    /// Flip completion. Returns the new state, or `None` for an unknown id.
    pub fn toggle_task(&mut self, id: &str) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Returns whether a task was removed.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn set_due_date(&mut self, id: &str, due: Option<NaiveDate>) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.due_date = due;
                true
            }
            None => false,
        }
    }

    /// Prepend a batch, keeping the batch's own order ahead of older tasks.
    /// Drafts with blank titles are skipped. Returns the number inserted.
    pub fn bulk_insert(&mut self, drafts: Vec<TaskDraft>) -> usize {
        let batch: Vec<Task> = drafts
            .into_iter()
            .filter(|d| !d.title.trim().is_empty())
            .map(|d| Task::new(d.title, d.category))
            .collect();
        let inserted = batch.len();
        self.tasks.splice(0..0, batch);
        inserted
    }

    /// Merge a breakdown result: the sub-tasks when there are any, otherwise
    /// the original text as a single work task.
    pub fn apply_breakdown(&mut self, original: &str, drafts: Vec<TaskDraft>) -> usize {
        if !drafts.is_empty() {
            let inserted = self.bulk_insert(drafts);
            if inserted > 0 {
                return inserted;
            }
        }
        usize::from(self.add_task(original, TaskCategory::Work).is_some())
    }
}
