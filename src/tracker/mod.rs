//! Weight tracker state
//!
//! `Tracker` holds the in-memory entry list and the transient input value,
//! and mirrors every mutation to its `EntryStore`:
//!
//! ```text
//! open:      slot → entries          (once)
//! add_entry: parse → entries + 1 → slot
//! clear_all: confirm → [] → remove slot
//! ```
//!
//! The date source (`Clock`) and the clear confirmation (`Confirm`) are
//! injected so the whole flow runs without a terminal.

pub mod clock;
pub mod confirm;

pub use clock::{Clock, DateFormat, DateFormatError, FixedClock, SystemClock, DEFAULT_DATE_FORMAT};
pub use confirm::{Confirm, LinePrompt};

use crate::storage::{Entry, EntryStore, SlotStore, StorageResult};

/// Question asked before wiping the history
pub const CLEAR_PROMPT: &str = "Clear all records?";

/// Whether there is anything to chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Populated,
}

pub struct Tracker<S, C> {
    store: EntryStore<S>,
    clock: C,
    date_format: DateFormat,
    entries: Vec<Entry>,
    input: String,
}

impl<S: SlotStore, C: Clock> Tracker<S, C> {
    /// Load the persisted list and start with an empty input field
    pub fn open(store: EntryStore<S>, clock: C, date_format: DateFormat) -> StorageResult<Self> {
        let entries = store.load()?;
        tracing::info!("Opened slot '{}' with {} entries", store.key(), entries.len());

        Ok(Self {
            store,
            clock,
            date_format,
            entries,
            input: String::new(),
        })
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn store(&self) -> &EntryStore<S> {
        &self.store
    }

    pub fn phase(&self) -> Phase {
        if self.entries.is_empty() {
            Phase::Empty
        } else {
            Phase::Populated
        }
    }

    /// Record `raw` as today's weight.
    ///
    /// Returns `Ok(None)` without touching anything when `raw` is not a
    /// number. On success the full list is persisted before it replaces the
    /// in-memory list, and the input field is cleared.
    pub fn add_entry(&mut self, raw: &str) -> StorageResult<Option<Entry>> {
        let Some(weight) = parse_weight(raw) else {
            tracing::debug!("Ignoring non-numeric input {:?}", raw);
            return Ok(None);
        };

        let entry = Entry::new(self.date_format.label(self.clock.today()), weight);

        let mut updated = Vec::with_capacity(self.entries.len() + 1);
        updated.extend_from_slice(&self.entries);
        updated.push(entry.clone());
        self.store.save(&updated)?;

        self.entries = updated;
        self.input.clear();

        tracing::info!("Recorded {} ({} entries)", entry, self.entries.len());
        Ok(Some(entry))
    }

    /// Submit the current input field
    pub fn submit(&mut self) -> StorageResult<Option<Entry>> {
        let raw = self.input.clone();
        self.add_entry(&raw)
    }

    /// Wipe every entry after the user agrees. Returns whether anything was cleared.
    pub fn clear_all(&mut self, confirm: &mut impl Confirm) -> StorageResult<bool> {
        if !confirm.confirm(CLEAR_PROMPT) {
            tracing::debug!("Clear declined");
            return Ok(false);
        }

        self.store.clear()?;
        let removed = std::mem::take(&mut self.entries).len();

        tracing::info!("Cleared {} entries", removed);
        Ok(true)
    }
}

/// Parse a weight the way a numeric input field would accept it.
///
/// Surrounding whitespace is ignored. Non-finite values are rejected since
/// they cannot be stored as JSON numbers.
pub fn parse_weight(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|w| w.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemorySlotStore, StorageError, DEFAULT_SLOT_KEY};
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
    }

    fn open(slots: MemorySlotStore) -> Tracker<MemorySlotStore, FixedClock> {
        Tracker::open(
            EntryStore::new(slots, DEFAULT_SLOT_KEY),
            clock(),
            DateFormat::default(),
        )
        .unwrap()
    }

    fn reload(tracker: &Tracker<MemorySlotStore, FixedClock>) -> Vec<Entry> {
        EntryStore::new(tracker.store().slots().clone(), DEFAULT_SLOT_KEY)
            .load()
            .unwrap()
    }

    /// Store whose writes always fail
    struct ReadOnlySlots;

    impl SlotStore for ReadOnlySlots {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(Some(r#"[{"date":"03/06","weight":80}]"#.to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn remove_item(&mut self, _key: &str) -> StorageResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("70.5"), Some(70.5));
        assert_eq!(parse_weight(" 70 \n"), Some(70.0));
        assert_eq!(parse_weight("-1.25"), Some(-1.25));
        assert_eq!(parse_weight("1e2"), Some(100.0));

        assert_eq!(parse_weight(""), None);
        assert_eq!(parse_weight("   "), None);
        assert_eq!(parse_weight("abc"), None);
        assert_eq!(parse_weight("70kg"), None);
        assert_eq!(parse_weight("NaN"), None);
        assert_eq!(parse_weight("inf"), None);
    }

    #[test]
    fn test_first_add_populates() {
        let mut tracker = open(MemorySlotStore::new());
        assert_eq!(tracker.phase(), Phase::Empty);

        let entry = tracker.add_entry("70.5").unwrap();

        assert_eq!(entry, Some(Entry::new("03/07", 70.5)));
        assert_eq!(tracker.entries(), &[Entry::new("03/07", 70.5)]);
        assert_eq!(tracker.phase(), Phase::Populated);
        assert_eq!(reload(&tracker), tracker.entries());
    }

    #[test]
    fn test_valid_inputs_append_one_each() {
        let mut tracker = open(MemorySlotStore::new());

        for (i, raw) in ["70", "71.2", "69.95", "0.1", "70"].iter().enumerate() {
            tracker.add_entry(raw).unwrap();
            assert_eq!(tracker.entries().len(), i + 1);
            assert_eq!(tracker.entries()[i].weight, raw.parse::<f64>().unwrap());
        }

        // Same-day entries are all kept, in order
        assert!(tracker.entries().iter().all(|e| e.date == "03/07"));
        assert_eq!(reload(&tracker).len(), 5);
    }

    #[test]
    fn test_invalid_input_is_ignored() {
        let mut tracker = open(MemorySlotStore::new());
        tracker.add_entry("70").unwrap();

        for raw in ["abc", "", " ", "7 0", "NaN"] {
            assert_eq!(tracker.add_entry(raw).unwrap(), None);
            assert_eq!(tracker.entries().len(), 1);
        }
        assert_eq!(reload(&tracker).len(), 1);
    }

    #[test]
    fn test_submit_clears_input_only_on_success() {
        let mut tracker = open(MemorySlotStore::new());

        tracker.set_input("abc");
        assert_eq!(tracker.submit().unwrap(), None);
        assert_eq!(tracker.input(), "abc");

        tracker.set_input("68.4");
        assert!(tracker.submit().unwrap().is_some());
        assert_eq!(tracker.input(), "");
        assert_eq!(tracker.entries(), &[Entry::new("03/07", 68.4)]);
    }

    #[test]
    fn test_clear_confirmed() {
        let mut tracker = open(MemorySlotStore::new());
        tracker.add_entry("70").unwrap();

        let mut asked = None;
        let cleared = tracker
            .clear_all(&mut |prompt: &str| {
                asked = Some(prompt.to_string());
                true
            })
            .unwrap();

        assert!(cleared);
        assert_eq!(asked.as_deref(), Some(CLEAR_PROMPT));
        assert!(tracker.entries().is_empty());
        assert_eq!(tracker.phase(), Phase::Empty);
        assert!(!tracker.store().slots().contains(DEFAULT_SLOT_KEY));
        assert!(reload(&tracker).is_empty());
    }

    #[test]
    fn test_clear_declined() {
        let mut tracker = open(MemorySlotStore::new());
        tracker.add_entry("70").unwrap();
        tracker.add_entry("71").unwrap();

        let cleared = tracker.clear_all(&mut |_: &str| false).unwrap();

        assert!(!cleared);
        assert_eq!(tracker.entries().len(), 2);
        assert_eq!(reload(&tracker).len(), 2);
    }

    #[test]
    fn test_clear_then_add_again() {
        let mut tracker = open(MemorySlotStore::new());
        tracker.add_entry("70").unwrap();
        tracker.clear_all(&mut |_: &str| true).unwrap();
        tracker.add_entry("69").unwrap();

        assert_eq!(reload(&tracker), vec![Entry::new("03/07", 69.0)]);
    }

    #[test]
    fn test_open_loads_existing_slot() {
        let mut slots = MemorySlotStore::new();
        slots
            .set_item(DEFAULT_SLOT_KEY, r#"[{"date":"03/01","weight":71},{"date":"03/02","weight":70.6}]"#)
            .unwrap();

        let mut tracker = open(slots);
        assert_eq!(tracker.entries().len(), 2);

        tracker.add_entry("70.1").unwrap();
        assert_eq!(
            reload(&tracker),
            vec![
                Entry::new("03/01", 71.0),
                Entry::new("03/02", 70.6),
                Entry::new("03/07", 70.1),
            ]
        );
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let mut tracker = Tracker::open(
            EntryStore::new(ReadOnlySlots, DEFAULT_SLOT_KEY),
            clock(),
            DateFormat::default(),
        )
        .unwrap();
        tracker.set_input("75");

        let err = tracker.submit().unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
        assert_eq!(tracker.entries(), &[Entry::new("03/06", 80.0)]);
        assert_eq!(tracker.input(), "75");

        assert!(tracker.clear_all(&mut |_: &str| true).is_err());
        assert_eq!(tracker.entries().len(), 1);
    }
}
