//! Store for saved quotes.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use printforge_models::{CustomerId, PrintType, Quote, QuoteId, QuoteStatus};

use crate::error::{Result, StoreError};
use crate::storage::{load_vec, store_vec, FileStorage, Storage};

const QUOTES: &str = "quotes";

/// Aggregate numbers for the dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuoteStats {
    pub total_quotes: usize,
    pub total_revenue: f64,
    pub avg_quote_value: f64,
    pub fdm_count: usize,
    pub resin_count: usize,
    /// Quotes created within the last 7 days.
    pub recent_quotes: usize,
}

/// Per-customer order history summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerStats {
    pub total_spent: f64,
    pub order_count: usize,
    pub last_order_at: Option<DateTime<Utc>>,
}

/// Typed accessor over the saved-quotes collection.
pub struct QuoteStore<S: Storage = FileStorage> {
    storage: S,
}

impl<S: Storage> QuoteStore<S> {
    /// Creates a store over the given storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Lists all saved quotes, newest first.
    pub fn quotes(&self) -> Result<Vec<Quote>> {
        load_vec(&self.storage, QUOTES)
    }

    /// Looks up a quote by id.
    pub fn get(&self, id: &QuoteId) -> Result<Quote> {
        self.quotes()?
            .into_iter()
            .find(|q| q.id == *id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "quote",
                id: id.to_string(),
            })
    }

    /// Persists a quote at the front of the collection.
    pub fn save(&self, quote: &Quote) -> Result<()> {
        let mut quotes = self.quotes()?;
        quotes.insert(0, quote.clone());
        store_vec(&self.storage, QUOTES, &quotes)?;
        debug!(quote_id = %quote.id, project = %quote.project_name, "Saved quote");
        Ok(())
    }

    /// Deletes a quote; deleting an unknown id is a no-op.
    pub fn delete(&self, id: &QuoteId) -> Result<()> {
        let mut quotes = self.quotes()?;
        quotes.retain(|q| q.id != *id);
        store_vec(&self.storage, QUOTES, &quotes)
    }

    /// Replaces the notes of a quote.
    pub fn update_notes(&self, id: &QuoteId, notes: &str) -> Result<()> {
        self.update(id, |quote| {
            quote.notes = if notes.is_empty() {
                None
            } else {
                Some(notes.to_string())
            };
        })
    }

    /// Moves a quote to a new status, stamping the status timeline.
    pub fn update_status(&self, id: &QuoteId, status: QuoteStatus) -> Result<()> {
        self.update(id, |quote| quote.set_status(status))
    }

    fn update(&self, id: &QuoteId, apply: impl FnOnce(&mut Quote)) -> Result<()> {
        let mut quotes = self.quotes()?;
        let quote = quotes
            .iter_mut()
            .find(|q| q.id == *id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "quote",
                id: id.to_string(),
            })?;
        apply(quote);
        store_vec(&self.storage, QUOTES, &quotes)
    }

    /// Computes dashboard statistics over the whole collection.
    pub fn stats(&self) -> Result<QuoteStats> {
        let quotes = self.quotes()?;
        let total_quotes = quotes.len();
        let total_revenue: f64 = quotes.iter().map(|q| q.total_price).sum();
        let cutoff = Utc::now() - Duration::days(7);

        Ok(QuoteStats {
            total_quotes,
            total_revenue,
            avg_quote_value: if total_quotes > 0 {
                total_revenue / total_quotes as f64
            } else {
                0.0
            },
            fdm_count: quotes
                .iter()
                .filter(|q| q.print_type == PrintType::Fdm)
                .count(),
            resin_count: quotes
                .iter()
                .filter(|q| q.print_type == PrintType::Resin)
                .count(),
            recent_quotes: quotes.iter().filter(|q| q.created_at > cutoff).count(),
        })
    }

    /// Summarizes a customer's order history.
    pub fn customer_stats(&self, customer_id: &CustomerId) -> Result<CustomerStats> {
        let quotes = self.quotes()?;
        let orders: Vec<&Quote> = quotes
            .iter()
            .filter(|q| q.customer_id.as_ref() == Some(customer_id))
            .collect();

        Ok(CustomerStats {
            total_spent: orders.iter().map(|q| q.total_price).sum(),
            order_count: orders.len(),
            last_order_at: orders.iter().map(|q| q.created_at).max(),
        })
    }
}
