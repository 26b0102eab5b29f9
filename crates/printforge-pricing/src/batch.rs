//! Running totals over a batch of quotes.

use serde::Serialize;

use printforge_models::Quote;

/// Aggregated costs across a batch of quotes.
///
/// Quote cost components are already quantity-scaled, so the totals are
/// plain sums.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct BatchTotals {
    pub item_count: usize,
    pub total_quantity: u32,
    pub material_cost: f64,
    pub machine_time_cost: f64,
    pub electricity_cost: f64,
    pub labor_cost: f64,
    pub consumables_cost: f64,
    pub painting_cost: f64,
    pub overhead_cost: f64,
    pub markup: f64,
    pub grand_total: f64,
}

/// Sums a batch into running totals.
pub fn batch_totals(items: &[Quote]) -> BatchTotals {
    items.iter().fold(BatchTotals::default(), |mut acc, item| {
        acc.item_count += 1;
        acc.total_quantity += item.quantity.max(1);
        acc.material_cost += item.costs.material_cost;
        acc.machine_time_cost += item.costs.machine_time_cost;
        acc.electricity_cost += item.costs.electricity_cost;
        acc.labor_cost += item.costs.labor_cost;
        acc.consumables_cost += item.costs.consumables_cost;
        acc.painting_cost += item.costs.painting_cost;
        acc.overhead_cost += item.costs.overhead_cost;
        acc.markup += item.costs.markup;
        acc.grand_total += item.total_price;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use printforge_models::{CostBreakdown, PrintParameters, PrintType, QuoteId, QuoteStatus};

    const EPSILON: f64 = 1e-9;

    fn make_quote(quantity: u32, material: f64, total: f64) -> Quote {
        Quote {
            id: QuoteId::new(),
            project_name: "Item".to_string(),
            print_colour: String::new(),
            print_type: PrintType::Fdm,
            status: QuoteStatus::Pending,
            costs: CostBreakdown {
                material_cost: material,
                ..CostBreakdown::default()
            },
            unit_price: total / f64::from(quantity.max(1)),
            total_price: total,
            quantity,
            customer_id: None,
            client_name: None,
            notes: None,
            status_timeline: Default::default(),
            parameters: PrintParameters::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_batch() {
        let totals = batch_totals(&[]);
        assert_eq!(totals, BatchTotals::default());
    }

    #[test]
    fn test_totals_sum_components() {
        let items = vec![make_quote(2, 6.0, 30.0), make_quote(1, 3.0, 12.0)];

        let totals = batch_totals(&items);

        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert!((totals.material_cost - 9.0).abs() < EPSILON);
        assert!((totals.grand_total - 42.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_quantity_counted_as_one() {
        let totals = batch_totals(&[make_quote(0, 1.0, 5.0)]);
        assert_eq!(totals.total_quantity, 1);
    }
}
