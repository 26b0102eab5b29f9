//! Saved quote records and their workflow status.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::PrintType;
use crate::ids::{CustomerId, QuoteId};

/// Workflow status of a saved quote, in kanban column order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Approved,
    Printing,
    PostProcessing,
    Done,
    Dispatched,
    Delivered,
    Failed,
}

impl QuoteStatus {
    /// All statuses in board column order.
    pub const ALL: [QuoteStatus; 8] = [
        QuoteStatus::Pending,
        QuoteStatus::Approved,
        QuoteStatus::Printing,
        QuoteStatus::PostProcessing,
        QuoteStatus::Done,
        QuoteStatus::Dispatched,
        QuoteStatus::Delivered,
        QuoteStatus::Failed,
    ];
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuoteStatus::Pending => "PENDING",
            QuoteStatus::Approved => "APPROVED",
            QuoteStatus::Printing => "PRINTING",
            QuoteStatus::PostProcessing => "POST_PROCESSING",
            QuoteStatus::Done => "DONE",
            QuoteStatus::Dispatched => "DISPATCHED",
            QuoteStatus::Delivered => "DELIVERED",
            QuoteStatus::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

impl FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "PENDING" => Ok(QuoteStatus::Pending),
            "APPROVED" => Ok(QuoteStatus::Approved),
            "PRINTING" => Ok(QuoteStatus::Printing),
            "POST_PROCESSING" => Ok(QuoteStatus::PostProcessing),
            "DONE" => Ok(QuoteStatus::Done),
            "DISPATCHED" => Ok(QuoteStatus::Dispatched),
            "DELIVERED" => Ok(QuoteStatus::Delivered),
            "FAILED" => Ok(QuoteStatus::Failed),
            other => Err(format!("unknown quote status: {}", other)),
        }
    }
}

/// Tolerant status field: missing or unrecognized values fall back to
/// `PENDING` so old or hand-edited data files still load.
fn status_or_pending<'de, D>(deserializer: D) -> Result<QuoteStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| s.parse().ok())
        .unwrap_or(QuoteStatus::Pending))
}

/// A flat charge attached to a quote (glue, bags, inserts, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumableCharge {
    pub name: String,
    pub value: f64,
}

/// Quantity-scaled cost components of a quote.
///
/// Every field here already includes the quantity multiplier; `subtotal`
/// includes overhead, and `markup` is the profit slice on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub material_cost: f64,
    pub machine_time_cost: f64,
    pub electricity_cost: f64,
    pub labor_cost: f64,
    #[serde(default)]
    pub consumables_cost: f64,
    #[serde(default)]
    pub painting_cost: f64,
    pub overhead_cost: f64,
    pub subtotal: f64,
    pub markup: f64,
}

/// Snapshot of the inputs a quote was computed from.
///
/// Deliberately a closed struct: every supported parameter has a named
/// field, there is no open-ended key/value bag.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrintParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub print_time_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filament_weight_grams: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resin_volume_ml: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub washing_time_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curing_time_minutes: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isopropyl_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labor_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overhead_percentage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markup_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumables: Vec<ConsumableCharge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumables_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub painting_time_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub painting_layers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub painting_layers_secondary: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_area_cm2: Option<f64>,
}

/// A priced print job, persisted in the quotes collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub project_name: String,

    #[serde(default)]
    pub print_colour: String,

    pub print_type: PrintType,

    #[serde(default, deserialize_with = "status_or_pending")]
    pub status: QuoteStatus,

    #[serde(flatten)]
    pub costs: CostBreakdown,

    /// Price of a single unit, markup included.
    pub unit_price: f64,

    /// `unit_price * quantity`.
    pub total_price: f64,

    pub quantity: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,

    /// Display-name snapshot taken when the quote was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// When each status was first entered.
    #[serde(default)]
    pub status_timeline: BTreeMap<QuoteStatus, DateTime<Utc>>,

    #[serde(default)]
    pub parameters: PrintParameters,

    pub created_at: DateTime<Utc>,
}

impl Quote {
    /// Moves the quote to a new status, stamping the timeline.
    pub fn set_status(&mut self, status: QuoteStatus) {
        self.status = status;
        self.status_timeline.entry(status).or_insert_with(Utc::now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_quote() -> Quote {
        Quote {
            id: QuoteId::from("quote-1"),
            project_name: "Benchy".to_string(),
            print_colour: "Red".to_string(),
            print_type: PrintType::Fdm,
            status: QuoteStatus::Pending,
            costs: CostBreakdown {
                material_cost: 3.0,
                machine_time_cost: 10.0,
                electricity_cost: 0.21,
                labor_cost: 7.5,
                consumables_cost: 0.0,
                painting_cost: 0.0,
                overhead_cost: 2.07,
                subtotal: 22.78,
                markup: 6.83,
            },
            unit_price: 29.61,
            total_price: 29.61,
            quantity: 1,
            customer_id: None,
            client_name: None,
            notes: None,
            status_timeline: BTreeMap::new(),
            parameters: PrintParameters::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&QuoteStatus::PostProcessing).unwrap(),
            "\"POST_PROCESSING\""
        );
        let back: QuoteStatus = serde_json::from_str("\"DISPATCHED\"").unwrap();
        assert_eq!(back, QuoteStatus::Dispatched);
    }

    #[test]
    fn test_status_from_str_case_insensitive() {
        assert_eq!(
            "post-processing".parse::<QuoteStatus>().unwrap(),
            QuoteStatus::PostProcessing
        );
        assert_eq!("done".parse::<QuoteStatus>().unwrap(), QuoteStatus::Done);
        assert!("SHIPPED".parse::<QuoteStatus>().is_err());
    }

    #[test]
    fn test_missing_status_defaults_to_pending() {
        let mut value = serde_json::to_value(sample_quote()).unwrap();
        value.as_object_mut().unwrap().remove("status");

        let quote: Quote = serde_json::from_value(value).unwrap();
        assert_eq!(quote.status, QuoteStatus::Pending);
    }

    #[test]
    fn test_unrecognized_status_defaults_to_pending() {
        let mut value = serde_json::to_value(sample_quote()).unwrap();
        value["status"] = serde_json::json!("ARCHIVED");

        let quote: Quote = serde_json::from_value(value).unwrap();
        assert_eq!(quote.status, QuoteStatus::Pending);
    }

    #[test]
    fn test_cost_breakdown_flattened() {
        let value = serde_json::to_value(sample_quote()).unwrap();
        // Components live at the top level of the quote object.
        assert!(value.get("material_cost").is_some());
        assert!(value.get("costs").is_none());
    }

    #[test]
    fn test_set_status_stamps_timeline_once() {
        let mut quote = sample_quote();
        quote.set_status(QuoteStatus::Printing);
        let first = quote.status_timeline[&QuoteStatus::Printing];

        quote.set_status(QuoteStatus::Done);
        quote.set_status(QuoteStatus::Printing);

        assert_eq!(quote.status_timeline[&QuoteStatus::Printing], first);
        assert_eq!(quote.status, QuoteStatus::Printing);
    }

    #[test]
    fn test_quote_roundtrip() {
        let mut quote = sample_quote();
        quote.set_status(QuoteStatus::Approved);
        quote.notes = Some("rush order".to_string());

        let json = serde_json::to_string(&quote).unwrap();
        let back: Quote = serde_json::from_str(&json).unwrap();

        assert_eq!(quote, back);
    }
}
