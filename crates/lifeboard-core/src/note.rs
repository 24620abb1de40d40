//! Offline notes.
//!
//! The whole collection is serialized into one key-value slot after every
//! mutation and read back once when the store is opened. A corrupt slot is
//! reported as an error; there is no recovery path.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::kv::{load_json, save_json, KvStore};

/// Slot holding the serialized note collection.
pub const NOTES_SLOT: &str = "fcm_notes";
pub const UNTITLED: &str = "Untitled Note";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

/// Fields to overwrite on update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }
}

/// Persisted note collection, newest first, with an active selection.
pub struct NoteStore<K: KvStore> {
    kv: K,
    notes: Vec<Note>,
    active_id: Option<String>,
}

impl<K: KvStore> NoteStore<K> {
    /// Load the collection from `kv`; an empty collection if nothing was
    /// saved yet.
    ///
    /// # Errors
    /// Returns an error if the slot cannot be read or does not hold a valid
    /// note collection.
    pub fn open(kv: K) -> Result<Self> {
        let notes: Vec<Note> = load_json(&kv, NOTES_SLOT)?.unwrap_or_default();
        tracing::debug!(count = notes.len(), "notes loaded");
        Ok(Self {
            kv,
            notes,
            active_id: None,
        })
    }

    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn active(&self) -> Option<&Note> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Make `id` the active note. Returns false for an unknown id.
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_some() {
            self.active_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Prepend an empty untitled note and make it active.
    pub fn create_note(&mut self) -> Result<&Note> {
        let note = Note {
            id: uuid::Uuid::new_v4().to_string(),
            title: UNTITLED.to_string(),
            content: String::new(),
            updated_at: Utc::now(),
        };
        self.active_id = Some(note.id.clone());
        self.notes.insert(0, note);
        self.persist()?;
        Ok(&self.notes[0])
    }

    /// Merge `patch` into the note and advance its timestamp. Returns
    /// `Ok(None)` for an unknown id.
    pub fn update_note(&mut self, id: &str, patch: NotePatch) -> Result<Option<&Note>> {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            return Ok(None);
        };
        let note = &mut self.notes[index];
        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(content) = patch.content {
            note.content = content;
        }
        note.updated_at = next_timestamp(note.updated_at);
        self.persist()?;
        Ok(Some(&self.notes[index]))
    }

    /// Remove a note, clearing the selection if it was active. Returns
    /// whether a note was removed.
    pub fn delete_note(&mut self, id: &str) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Ok(false);
        }
        if self.active_id.as_deref() == Some(id) {
            self.active_id = None;
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<()> {
        save_json(&self.kv, NOTES_SLOT, &self.notes)
    }
}

/// Now, or one millisecond after `previous` when the clock has not moved
/// past it.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::MemoryKv;

    #[test]
    fn create_prepends_untitled_and_selects() {
        let kv = MemoryKv::new();
        let mut store = NoteStore::open(&kv).unwrap();
        let first = store.create_note().unwrap().id.clone();
        let second = store.create_note().unwrap().id.clone();
        assert_eq!(store.list()[0].id, second);
        assert_eq!(store.list()[1].id, first);
        assert_eq!(store.active_id(), Some(second.as_str()));
        assert_eq!(store.active().unwrap().title, UNTITLED);
        assert!(store.active().unwrap().content.is_empty());
    }

    #[test]
    fn update_merges_fields_and_advances_timestamp() {
        let kv = MemoryKv::new();
        let mut store = NoteStore::open(&kv).unwrap();
        let id = store.create_note().unwrap().id.clone();
        let before = store.get(&id).unwrap().updated_at;

        let note = store.update_note(&id, NotePatch::title("Groceries")).unwrap().unwrap();
        assert_eq!(note.title, "Groceries");
        assert!(note.updated_at > before);
        let after_title = note.updated_at;

        let note = store.update_note(&id, NotePatch::content("milk")).unwrap().unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk");
        assert!(note.updated_at > after_title);
    }

    #[test]
    fn update_unknown_note_is_none() {
        let kv = MemoryKv::new();
        let mut store = NoteStore::open(&kv).unwrap();
        assert!(store.update_note("ghost", NotePatch::title("x")).unwrap().is_none());
    }

    #[test]
    fn delete_clears_active_selection() {
        let kv = MemoryKv::new();
        let mut store = NoteStore::open(&kv).unwrap();
        let keep = store.create_note().unwrap().id.clone();
        let gone = store.create_note().unwrap().id.clone();
        assert!(store.delete_note(&gone).unwrap());
        assert!(store.active_id().is_none());

        assert!(store.select(&keep));
        assert!(!store.delete_note(&gone).unwrap());
        assert_eq!(store.active_id(), Some(keep.as_str()));
    }

    #[test]
    fn every_mutation_is_persisted_and_reloaded() {
        let kv = MemoryKv::new();
        let id = {
            let mut store = NoteStore::open(&kv).unwrap();
            let id = store.create_note().unwrap().id.clone();
            store
                .update_note(&id, NotePatch { title: Some("Ideas".into()), content: Some("x".into()) })
                .unwrap();
            id
        };
        let reopened = NoteStore::open(&kv).unwrap();
        assert_eq!(reopened.list().len(), 1);
        assert_eq!(reopened.get(&id).unwrap().title, "Ideas");
        assert!(reopened.active_id().is_none());
    }

    #[test]
    fn create_then_delete_restores_persisted_collection() {
        let kv = MemoryKv::new();
        let mut store = NoteStore::open(&kv).unwrap();
        store.create_note().unwrap();
        let snapshot = kv.kv_get(NOTES_SLOT).unwrap();

        let id = store.create_note().unwrap().id.clone();
        store.delete_note(&id).unwrap();
        assert_eq!(kv.kv_get(NOTES_SLOT).unwrap(), snapshot);
    }

    #[test]
    fn reads_original_camel_case_payload() {
        let kv = MemoryKv::new();
        kv.kv_set(
            NOTES_SLOT,
            r#"[{"id":"1700000000000","title":"Old","content":"hi","updatedAt":"2024-01-02T03:04:05.000Z"}]"#,
        )
        .unwrap();
        let store = NoteStore::open(&kv).unwrap();
        assert_eq!(store.get("1700000000000").unwrap().content, "hi");
    }

    #[test]
    fn corrupt_slot_fails_to_open() {
        let kv = MemoryKv::new();
        kv.kv_set(NOTES_SLOT, "not json").unwrap();
        assert!(NoteStore::open(&kv).is_err());
    }
}
