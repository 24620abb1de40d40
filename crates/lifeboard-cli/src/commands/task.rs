//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use lifeboard_core::{TaskCategory, ValidationError};

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task at the top of the list
    Add {
        /// Task title
        title: String,
        /// Category: work, personal or growth
        #[arg(long, default_value = "work")]
        category: TaskCategory,
    },
    /// List tasks, newest first
    List {
        /// Only tasks that are not done yet
        #[arg(long)]
        open: bool,
    },
    /// Flip a task between done and not done
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Set or clear a task's due date
    Due {
        /// Task ID
        id: String,
        /// Due date (YYYY-MM-DD); omit to clear
        date: Option<NaiveDate>,
    },
    /// Ask the coach to split a goal into sub-tasks
    Breakdown {
        /// Goal description
        text: String,
    },
}

fn not_found(id: &str) -> ValidationError {
    ValidationError::NotFound {
        entity: "task",
        id: id.to_string(),
    }
}

pub async fn run(action: TaskAction) -> CmdResult {
    let mut session = Session::open()?;
    let tasks = &mut session.dashboard.tasks;

    match action {
        TaskAction::Add { title, category } => {
            let task = tasks.add_task(&title, category).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "title".into(),
                    message: "must not be blank".into(),
                }
            })?;
            print_json(task)?;
        }
        TaskAction::List { open } => {
            let listed: Vec<_> = tasks
                .tasks()
                .iter()
                .filter(|t| !open || !t.completed)
                .collect();
            print_json(&listed)?;
            return Ok(());
        }
        TaskAction::Toggle { id } => {
            tasks.toggle_task(&id).ok_or_else(|| not_found(&id))?;
            print_json(&tasks.get(&id))?;
        }
        TaskAction::Delete { id } => {
            if !tasks.delete_task(&id) {
                return Err(not_found(&id).into());
            }
            println!("deleted {id}");
        }
        TaskAction::Due { id, date } => {
            if !tasks.set_due_date(&id, date) {
                return Err(not_found(&id).into());
            }
            print_json(&tasks.get(&id))?;
        }
        TaskAction::Breakdown { text } => {
            let gateway = session.gateway()?;
            let inserted = session
                .dashboard
                .breakdown(&gateway, &text)
                .await
                .unwrap_or(0);
            let added = &session.dashboard.tasks.tasks()[..inserted];
            print_json(added)?;
        }
    }

    session.save()
}
