//! Lightlog Storage
//!
//! Persistence for the entry list:
//!
//! - **types**: `Entry` and the corrupt-slot policy
//! - **slot**: the local key-value store (`SlotStore`) and its file/memory backends
//! - **entries**: `EntryStore`, which maps one slot onto the entry list
//! - **error**: Error types
//!
//! # Layout
//!
//! ```text
//! <data_dir>/
//!   my_weights.json   [{"date":"05/01","weight":72.4}, ...]
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use lightlog::storage::{Entry, EntryStore, FileSlotStore, DEFAULT_SLOT_KEY};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = EntryStore::new(FileSlotStore::new("./data"), DEFAULT_SLOT_KEY);
//!
//!     let mut entries = store.load()?;
//!     entries.push(Entry::new("05/01", 72.4));
//!     store.save(&entries)?;
//!
//!     Ok(())
//! }
//! ```

pub mod entries;
pub mod error;
pub mod slot;
pub mod types;

// Re-export commonly used types
pub use entries::{EntryStore, DEFAULT_SLOT_KEY};
pub use error::{StorageError, StorageResult};
pub use slot::{FileSlotStore, MemorySlotStore, SlotStore};
pub use types::{CorruptPolicy, Entry};
