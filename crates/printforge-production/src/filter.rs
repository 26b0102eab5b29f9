//! Saved-quote filtering and sorting for list views.

use std::str::FromStr;

use printforge_models::{PrintType, Quote, QuoteStatus};

/// Filter criteria for querying saved quotes.
#[derive(Debug, Clone, Default)]
pub struct QuoteFilter {
    /// Case-insensitive substring over project name, client name and
    /// notes.
    pub search: Option<String>,
    /// Filter by print type.
    pub print_type: Option<PrintType>,
    /// Filter by workflow status.
    pub status: Option<QuoteStatus>,
}

impl QuoteFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the print type filter.
    pub fn with_print_type(mut self, print_type: PrintType) -> Self {
        self.print_type = Some(print_type);
        self
    }

    /// Sets the status filter.
    pub fn with_status(mut self, status: QuoteStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the quote matches this filter.
    pub fn matches(&self, quote: &Quote) -> bool {
        if let Some(print_type) = self.print_type {
            if quote.print_type != print_type {
                return false;
            }
        }

        if let Some(status) = self.status {
            if quote.status != status {
                return false;
            }
        }

        if let Some(ref search) = self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() {
                let hit = quote.project_name.to_lowercase().contains(&needle)
                    || quote
                        .client_name
                        .as_ref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
                    || quote
                        .notes
                        .as_ref()
                        .is_some_and(|notes| notes.to_lowercase().contains(&needle));
                if !hit {
                    return false;
                }
            }
        }

        true
    }
}

/// Sort order for quote listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
    PriceHigh,
    PriceLow,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "price-high" => Ok(SortOrder::PriceHigh),
            "price-low" => Ok(SortOrder::PriceLow),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Applies a filter and sort to a quote list.
pub fn filter_and_sort(quotes: &[Quote], filter: &QuoteFilter, order: SortOrder) -> Vec<Quote> {
    let mut result: Vec<Quote> = quotes
        .iter()
        .filter(|q| filter.matches(q))
        .cloned()
        .collect();

    match order {
        SortOrder::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortOrder::Oldest => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::PriceHigh => result.sort_by(|a, b| {
            b.total_price
                .partial_cmp(&a.total_price)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        SortOrder::PriceLow => result.sort_by(|a, b| {
            a.total_price
                .partial_cmp(&b.total_price)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }

    result
}
