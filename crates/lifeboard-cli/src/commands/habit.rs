use chrono::NaiveDate;
use clap::Subcommand;
use lifeboard_core::habit::today;
use lifeboard_core::ValidationError;

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Track a new daily habit
    Add {
        /// Habit title
        title: String,
    },
    /// List habits with streaks
    List,
    /// Mark a day done, or undo it
    Toggle {
        /// Habit ID
        id: String,
        /// Day to toggle (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Stop tracking a habit
    Delete {
        /// Habit ID
        id: String,
    },
    /// Ask the coach for a read on current streaks
    Analyze,
}

fn not_found(id: &str) -> ValidationError {
    ValidationError::NotFound {
        entity: "habit",
        id: id.to_string(),
    }
}

pub async fn run(action: HabitAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        HabitAction::Add { title } => {
            let habit = session.dashboard.habits.add_habit(&title).ok_or_else(|| {
                ValidationError::InvalidValue {
                    field: "title".into(),
                    message: "must not be blank".into(),
                }
            })?;
            print_json(habit)?;
        }
        HabitAction::List => {
            return print_json(session.dashboard.habits.habits());
        }
        HabitAction::Toggle { id, date } => {
            let habits = &mut session.dashboard.habits;
            let done = habits
                .toggle_on(&id, date.unwrap_or_else(today))
                .ok_or_else(|| not_found(&id))?;
            tracing::debug!(habit = %id, done, "habit toggled");
            print_json(&habits.get(&id))?;
        }
        HabitAction::Delete { id } => {
            if !session.dashboard.habits.delete_habit(&id) {
                return Err(not_found(&id).into());
            }
            println!("deleted {id}");
        }
        HabitAction::Analyze => {
            let gateway = session.gateway()?;
            match session.dashboard.analyze_habits(&gateway).await {
                Some(insight) => println!("{insight}"),
                None => println!("no habits to analyze"),
            }
        }
    }

    session.save()
}
