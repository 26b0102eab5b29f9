//! Persistence layer for Printforge.
//!
//! Collections are stored as one JSON file each under a data directory
//! and written atomically (temp file, then rename). The [`Storage`] trait
//! abstracts the backend so higher layers can be tested against an
//! in-memory map.
//!
//! # Example
//!
//! ```no_run
//! use printforge_store::{FileStorage, SettingsStore};
//!
//! let storage = FileStorage::new("/home/user/.printforge");
//! let settings = SettingsStore::open(storage).unwrap();
//!
//! for material in settings.materials(None).unwrap() {
//!     println!("{}: {}/{}", material.name, material.cost_per_unit, material.unit);
//! }
//! ```

pub mod atomic;
pub mod defaults;
pub mod error;
pub mod quote_store;
pub mod session_store;
pub mod settings_store;
pub mod storage;

pub use error::{Result, StoreError};
pub use quote_store::{CustomerStats, QuoteStats, QuoteStore};
pub use session_store::SessionStore;
pub use settings_store::{ImportSummary, SettingsExport, SettingsStore};
pub use storage::{FileStorage, MemoryStorage, Storage};
