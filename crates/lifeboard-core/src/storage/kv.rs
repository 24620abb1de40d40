//! Named-slot storage.
//!
//! Every persisted collection lives in one slot as a JSON document that is
//! rewritten in full on each save.

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Save/load a string value by key.
pub trait KvStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>>;

    fn kv_set(&self, key: &str, value: &str) -> Result<()>;
}

impl<T: KvStore + ?Sized> KvStore for &T {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        (**self).kv_get(key)
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        (**self).kv_set(key, value)
    }
}

/// Volatile store used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryKv {
    slots: RefCell<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKv {
    fn kv_get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Deserialize a slot. `Ok(None)` when the slot was never written.
pub fn load_json<T: DeserializeOwned>(kv: &impl KvStore, key: &str) -> Result<Option<T>> {
    match kv.kv_get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` and overwrite the slot.
pub fn save_json<T: Serialize + ?Sized>(kv: &impl KvStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    kv.kv_set(key, &raw)?;
    tracing::debug!(slot = key, bytes = raw.len(), "slot saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn missing_slot_loads_as_none() {
        let kv = MemoryKv::new();
        let loaded: Option<Vec<String>> = load_json(&kv, "nothing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn json_roundtrip_through_reference() {
        let kv = MemoryKv::new();
        let by_ref = &kv;
        save_json(&by_ref, "list", &vec![1, 2, 3]).unwrap();
        let loaded: Option<Vec<i32>> = load_json(&kv, "list").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
    }

    #[test]
    fn corrupt_slot_is_an_error() {
        let kv = MemoryKv::new();
        kv.kv_set("list", "{not json").unwrap();
        let err = load_json::<Vec<i32>>(&kv, "list").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }
}
