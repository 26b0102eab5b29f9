//! Production queue and kanban board state for Printforge.
//!
//! This crate owns the stateful reducers over persisted collections:
//! the shop-floor job queue with its bucket-local ordering invariant,
//! the kanban board derived from saved quotes, quote list
//! filtering/sorting, and the session-scoped batch list.
//!
//! # Example
//!
//! ```no_run
//! use printforge_production::ProductionQueue;
//! use printforge_store::{FileStorage, SessionStore};
//!
//! let store = SessionStore::new(FileStorage::new("/tmp/printforge/session"));
//! let mut queue = ProductionQueue::load(store).unwrap();
//!
//! for job in queue.unassigned_jobs() {
//!     println!("{} [{}]", job.quote.project_name, job.status);
//! }
//! ```

pub mod batch;
pub mod board;
pub mod error;
pub mod filter;
pub mod queue;

pub use batch::BatchList;
pub use board::{move_quote, Board};
pub use error::{ProductionError, Result};
pub use filter::{filter_and_sort, QuoteFilter, SortOrder};
pub use queue::ProductionQueue;
