//! Offline note commands. Every change is written through immediately.

use clap::Subcommand;
use lifeboard_core::storage::kv::{load_json, save_json};
use lifeboard_core::{Database, NotePatch, NoteStore, ValidationError};

use super::{print_json, CmdResult};

/// Slot remembering the selected note between invocations.
const ACTIVE_NOTE_SLOT: &str = "active_note";

#[derive(Subcommand)]
pub enum NoteAction {
    /// Create an empty note and select it
    New,
    /// List notes, newest first
    List,
    /// Print a note (the selected one when no ID is given)
    Show {
        /// Note ID
        id: Option<String>,
    },
    /// Change a note's title and/or content
    Edit {
        /// Note ID
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Select a note
    Select {
        /// Note ID
        id: String,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
}

fn not_found(id: &str) -> ValidationError {
    ValidationError::NotFound {
        entity: "note",
        id: id.to_string(),
    }
}

fn remember(db: &Database, notes: &NoteStore<&Database>) -> CmdResult {
    save_json(db, ACTIVE_NOTE_SLOT, &notes.active_id())?;
    Ok(())
}

pub fn run(action: NoteAction) -> CmdResult {
    let db = Database::open()?;
    let mut notes = NoteStore::open(&db)?;
    if let Some(id) = load_json::<Option<String>>(&db, ACTIVE_NOTE_SLOT)?.flatten() {
        notes.select(&id);
    }

    match action {
        NoteAction::New => {
            print_json(notes.create_note()?)?;
            remember(&db, &notes)?;
        }
        NoteAction::List => print_json(notes.list())?,
        NoteAction::Show { id } => {
            let note = match id.as_deref() {
                Some(id) => notes.get(id).ok_or_else(|| not_found(id))?,
                None => notes.active().ok_or_else(|| not_found("<selected>"))?,
            };
            print_json(note)?;
        }
        NoteAction::Edit { id, title, content } => {
            let patch = NotePatch { title, content };
            let note = notes.update_note(&id, patch)?.ok_or_else(|| not_found(&id))?;
            print_json(note)?;
        }
        NoteAction::Select { id } => {
            if !notes.select(&id) {
                return Err(not_found(&id).into());
            }
            remember(&db, &notes)?;
            print_json(&notes.active())?;
        }
        NoteAction::Delete { id } => {
            if !notes.delete_note(&id)? {
                return Err(not_found(&id).into());
            }
            remember(&db, &notes)?;
            println!("deleted {id}");
        }
    }
    Ok(())
}
