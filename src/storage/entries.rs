//! Entry store
//!
//! Binds one slot of a `SlotStore` to the entry list. Every write replaces
//! the whole slot; there is no partial update.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::slot::SlotStore;
use crate::storage::types::{CorruptPolicy, Entry};

/// Slot key used when none is configured
pub const DEFAULT_SLOT_KEY: &str = "my_weights";

/// Reads and writes the entry list held in a single slot
#[derive(Debug)]
pub struct EntryStore<S> {
    slots: S,
    key: String,
    on_corrupt: CorruptPolicy,
}

impl<S: SlotStore> EntryStore<S> {
    pub fn new(slots: S, key: impl Into<String>) -> Self {
        Self {
            slots,
            key: key.into(),
            on_corrupt: CorruptPolicy::default(),
        }
    }

    /// Builder method: set the corrupt-slot policy
    pub fn on_corrupt(mut self, policy: CorruptPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    /// Load the persisted list. An absent or blank slot is an empty list.
    pub fn load(&self) -> StorageResult<Vec<Entry>> {
        let Some(content) = self.slots.get_item(&self.key)? else {
            tracing::debug!("Slot '{}' absent, starting empty", self.key);
            return Ok(Vec::new());
        };
        if content.trim().is_empty() {
            tracing::debug!("Slot '{}' blank, starting empty", self.key);
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<Entry>>(&content) {
            Ok(entries) => {
                tracing::debug!("Loaded {} entries from slot '{}'", entries.len(), self.key);
                Ok(entries)
            }
            Err(e) => match self.on_corrupt {
                CorruptPolicy::Fail => Err(StorageError::Corruption {
                    key: self.key.clone(),
                    reason: e.to_string(),
                }),
                CorruptPolicy::Empty => {
                    tracing::warn!(
                        "Slot '{}' is not a valid entry list ({}); starting empty, next save overwrites it",
                        self.key,
                        e
                    );
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Overwrite the slot with `entries`
    pub fn save(&mut self, entries: &[Entry]) -> StorageResult<()> {
        let content = serde_json::to_string(entries)?;
        self.slots.set_item(&self.key, &content)
    }

    /// Remove the slot entirely
    pub fn clear(&mut self) -> StorageResult<()> {
        self.slots.remove_item(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::slot::{FileSlotStore, MemorySlotStore};
    use tempfile::tempdir;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("05/01", 72.4),
            Entry::new("05/01", 72.1),
            Entry::new("05/02", 71.0),
        ]
    }

    #[test]
    fn test_absent_slot_is_empty() {
        let store = EntryStore::new(MemorySlotStore::new(), DEFAULT_SLOT_KEY);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_blank_slot_is_empty() {
        for blank in ["", "  \n"] {
            let mut slots = MemorySlotStore::new();
            slots.set_item(DEFAULT_SLOT_KEY, blank).unwrap();
            let store = EntryStore::new(slots, DEFAULT_SLOT_KEY);
            assert!(store.load().unwrap().is_empty(), "slot {:?}", blank);
        }
    }

    #[test]
    fn test_zero_byte_slot_file_is_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("my_weights.json"), "").unwrap();

        let store = EntryStore::new(FileSlotStore::new(dir.path()), DEFAULT_SLOT_KEY);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let mut store = EntryStore::new(FileSlotStore::new(dir.path()), DEFAULT_SLOT_KEY);
        store.save(&sample()).unwrap();

        let reopened = EntryStore::new(FileSlotStore::new(dir.path()), DEFAULT_SLOT_KEY);
        assert_eq!(reopened.load().unwrap(), sample());
    }

    #[test]
    fn test_save_replaces_whole_slot() {
        let mut store = EntryStore::new(MemorySlotStore::new(), "w");
        store.save(&sample()).unwrap();
        store.save(&[Entry::new("06/01", 69.9)]).unwrap();

        assert_eq!(store.load().unwrap(), vec![Entry::new("06/01", 69.9)]);
    }

    #[test]
    fn test_clear_removes_slot() {
        let mut store = EntryStore::new(MemorySlotStore::new(), "w");
        store.save(&sample()).unwrap();
        store.clear().unwrap();

        assert!(!store.slots().contains("w"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_slot_fails_by_default() {
        let mut slots = MemorySlotStore::new();
        slots.set_item("w", "{not json").unwrap();
        let store = EntryStore::new(slots, "w");

        let err = store.load().unwrap_err();
        assert!(matches!(err, StorageError::Corruption { ref key, .. } if key == "w"));
        // Slot is left for the user to inspect
        assert!(store.slots().contains("w"));
    }

    #[test]
    fn test_corrupt_slot_with_empty_policy() {
        let mut slots = MemorySlotStore::new();
        slots.set_item("w", r#"{"date":"01/01"}"#).unwrap();
        let store = EntryStore::new(slots, "w").on_corrupt(CorruptPolicy::Empty);

        assert!(store.load().unwrap().is_empty());
    }
}
