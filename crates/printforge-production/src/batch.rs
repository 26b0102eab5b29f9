//! Session-scoped batch quote list with running totals.

use tracing::debug;

use printforge_models::{Quote, QuoteId};
use printforge_pricing::{batch_totals, BatchTotals};
use printforge_store::{SessionStore, Storage};

use crate::error::{ProductionError, Result};

/// A transient list of quotes being assembled into one batch offer.
///
/// Items get a fresh id on add, so batch entries are independent of the
/// saved quotes they were copied from. Every mutation writes through to
/// the session store.
pub struct BatchList<S: Storage> {
    store: SessionStore<S>,
    items: Vec<Quote>,
}

impl<S: Storage> BatchList<S> {
    /// Loads the batch from the session store.
    pub fn load(store: SessionStore<S>) -> Result<Self> {
        let items = store.batch_items()?;
        Ok(Self { store, items })
    }

    /// Current batch items, in insertion order.
    pub fn items(&self) -> &[Quote] {
        &self.items
    }

    /// Appends a quote copy to the batch under a fresh id.
    pub fn add_item(&mut self, quote: Quote) -> Result<QuoteId> {
        let mut item = quote;
        item.id = QuoteId::new();
        let id = item.id.clone();

        debug!(batch_id = %id, project = %item.project_name, "Added quote to batch");

        self.items.push(item);
        self.persist()?;
        Ok(id)
    }

    /// Removes the item at `index`.
    pub fn remove_item(&mut self, index: usize) -> Result<()> {
        if index >= self.items.len() {
            return Err(ProductionError::BatchIndexOutOfRange(index));
        }
        self.items.remove(index);
        self.persist()
    }

    /// Replaces the item at `index`.
    pub fn update_item(&mut self, index: usize, quote: Quote) -> Result<()> {
        let slot = self
            .items
            .get_mut(index)
            .ok_or(ProductionError::BatchIndexOutOfRange(index))?;
        *slot = quote;
        self.persist()
    }

    /// Empties the batch.
    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.persist()
    }

    /// Running totals over the current items.
    pub fn totals(&self) -> BatchTotals {
        batch_totals(&self.items)
    }

    fn persist(&self) -> Result<()> {
        self.store.save_batch_items(&self.items)?;
        Ok(())
    }
}
