//! Cost calculation and capacity planning for Printforge.
//!
//! Everything in this crate is pure: given the same inputs the functions
//! return the same breakdowns, with no storage access and no side
//! effects.
//!
//! # Example
//!
//! ```
//! use printforge_models::{Machine, Material, PrintType};
//! use printforge_pricing::{calculate_fdm_quote, CostRates, FdmQuoteInput};
//!
//! let material = Material::new("PLA", 25.0, "kg", PrintType::Fdm);
//! let machine = Machine::new("Ender 3", 2.0, Some(350.0), PrintType::Fdm);
//!
//! let input = FdmQuoteInput {
//!     project_name: "Benchy".to_string(),
//!     print_time_hours: 5.0,
//!     filament_weight_grams: 120.0,
//!     markup_percentage: 30.0,
//!     quantity: 1,
//!     ..FdmQuoteInput::default()
//! };
//!
//! let quote = calculate_fdm_quote(
//!     &input,
//!     &material,
//!     &machine,
//!     &CostRates::default(),
//!     &[],
//!     None,
//!     None,
//! );
//! assert!(quote.total_price > 0.0);
//! ```

pub mod batch;
pub mod capacity;
pub mod cost;

pub use batch::{batch_totals, BatchTotals};
pub use capacity::{
    format_hours, meets_deadline, plan_capacity, CapacityPlan, CapacityQuery, DeadlineCheck,
    MachineLoad,
};
pub use cost::{
    calculate_fdm_quote, calculate_resin_quote, validate_fdm, validate_resin, CostRates,
    FdmQuoteInput, PaintingInput, ResinQuoteInput, ValidationError,
};
