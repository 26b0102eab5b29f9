//! Session-scoped store for production jobs and batch quote items.
//!
//! These collections live apart from the persistent settings/quotes data
//! so a session reset can clear them wholesale without touching the rest.

use printforge_models::{ProductionJob, Quote};

use crate::error::Result;
use crate::storage::{load_vec, store_vec, FileStorage, Storage};

const PRODUCTION_JOBS: &str = "production_jobs";
const BATCH_ITEMS: &str = "batch_items";

/// Accessor over the session-scoped collections.
pub struct SessionStore<S: Storage = FileStorage> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    /// Creates a store over the given storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Loads the production job list.
    pub fn jobs(&self) -> Result<Vec<ProductionJob>> {
        load_vec(&self.storage, PRODUCTION_JOBS)
    }

    /// Replaces the production job list.
    pub fn save_jobs(&self, jobs: &[ProductionJob]) -> Result<()> {
        store_vec(&self.storage, PRODUCTION_JOBS, jobs)
    }

    /// Loads the batch quote items.
    pub fn batch_items(&self) -> Result<Vec<Quote>> {
        load_vec(&self.storage, BATCH_ITEMS)
    }

    /// Replaces the batch quote items.
    pub fn save_batch_items(&self, items: &[Quote]) -> Result<()> {
        store_vec(&self.storage, BATCH_ITEMS, items)
    }

    /// Drops both session collections.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(PRODUCTION_JOBS)?;
        self.storage.remove(BATCH_ITEMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::Utc;
    use printforge_models::{
        CostBreakdown, PrintParameters, PrintType, QuoteId, QuoteStatus,
    };

    fn make_quote() -> Quote {
        Quote {
            id: QuoteId::new(),
            project_name: "Gear".to_string(),
            print_colour: String::new(),
            print_type: PrintType::Fdm,
            status: QuoteStatus::Pending,
            costs: CostBreakdown::default(),
            unit_price: 5.0,
            total_price: 5.0,
            quantity: 1,
            customer_id: None,
            client_name: None,
            notes: None,
            status_timeline: Default::default(),
            parameters: PrintParameters::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_jobs_roundtrip() {
        let store = SessionStore::new(MemoryStorage::new());
        let job = ProductionJob::new(make_quote(), None, 0);

        store.save_jobs(std::slice::from_ref(&job)).unwrap();

        let jobs = store.jobs().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, job.id);
    }

    #[test]
    fn test_batch_items_roundtrip() {
        let store = SessionStore::new(MemoryStorage::new());
        let quote = make_quote();

        store.save_batch_items(std::slice::from_ref(&quote)).unwrap();

        assert_eq!(store.batch_items().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_drops_both() {
        let store = SessionStore::new(MemoryStorage::new());
        store
            .save_jobs(&[ProductionJob::new(make_quote(), None, 0)])
            .unwrap();
        store.save_batch_items(&[make_quote()]).unwrap();

        store.clear().unwrap();

        assert!(store.jobs().unwrap().is_empty());
        assert!(store.batch_items().unwrap().is_empty());
    }
}
