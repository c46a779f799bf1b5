//! # Lightlog
//!
//! A single-screen personal weight tracker. Each weigh-in is appended to a
//! list kept in one slot of a local key-value store, and the list is shown as
//! a trend chart and a most-recent-first history.
//!
//! ## Modules
//!
//! - [`storage`]: the slot store and the entry list persisted in it
//! - [`tracker`]: in-memory state with the add/clear operations
//! - [`view`]: pure screen model and terminal rendering
//! - [`session`]: interactive event loop
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lightlog::storage::{EntryStore, FileSlotStore, DEFAULT_SLOT_KEY};
//! use lightlog::tracker::{DateFormat, SystemClock, Tracker};
//! use lightlog::view::{render, render_text, TextStyle, ViewOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = EntryStore::new(FileSlotStore::new("./data"), DEFAULT_SLOT_KEY);
//!     let mut tracker = Tracker::open(store, SystemClock, DateFormat::default())?;
//!
//!     tracker.add_entry("70.5")?;
//!
//!     let screen = render(tracker.entries(), tracker.input(), &ViewOptions::default());
//!     println!("{}", render_text(&screen, &TextStyle::default()));
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod session;
pub mod storage;
pub mod tracker;
pub mod view;

// Re-export top-level types for convenience
pub use storage::{
    CorruptPolicy, Entry, EntryStore, FileSlotStore, MemorySlotStore, SlotStore, StorageError,
    StorageResult,
};

pub use tracker::{Clock, Confirm, DateFormat, FixedClock, Phase, SystemClock, Tracker};

pub use view::{render, render_text, Screen, TextStyle, TrendRegion, ViewOptions};

pub use session::{Session, SessionError};

pub use config::{Config, ConfigError, DisplayConfig, LoggingConfig, StorageConfig};
