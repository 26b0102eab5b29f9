//! Quote cost calculators.
//!
//! Pure arithmetic: the functions here never validate magnitudes, so
//! negative or NaN inputs propagate into the result. Use [`validate_fdm`]
//! and [`validate_resin`] before calculating when inputs come from a user.

use std::sync::OnceLock;

use chrono::Utc;
use regex::Regex;
use thiserror::Error;

use printforge_models::{
    ConsumableCharge, CostBreakdown, CostConstant, CustomerId, Machine, Material,
    PrintParameters, PrintType, Quote, QuoteId, QuoteStatus,
};

/// Usage rate applied to `$/ml` paints whose description does not carry
/// an explicit "Usage Rate:" figure.
const DEFAULT_PAINT_USAGE_RATE: f64 = 0.02;

/// System rates resolved from the cost-constant collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRates {
    /// $/kWh.
    pub electricity_rate: f64,
    /// $/hour.
    pub labor_rate: f64,
}

impl CostRates {
    pub const DEFAULT_ELECTRICITY: f64 = 0.12;
    pub const DEFAULT_LABOR: f64 = 15.0;

    /// Resolves the electricity and labor rates from the constants
    /// collection, falling back to the shipped defaults.
    pub fn from_constants(constants: &[CostConstant]) -> Self {
        let lookup = |id: &str, fallback: f64| {
            constants
                .iter()
                .find(|c| c.id.as_str() == id)
                .map(|c| c.value)
                .unwrap_or(fallback)
        };
        Self {
            electricity_rate: lookup("electricity", Self::DEFAULT_ELECTRICITY),
            labor_rate: lookup("labor", Self::DEFAULT_LABOR),
        }
    }
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            electricity_rate: Self::DEFAULT_ELECTRICITY,
            labor_rate: Self::DEFAULT_LABOR,
        }
    }
}

/// Post-print painting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PaintingInput {
    pub painting_time_hours: f64,
    pub layers: u32,
    pub layers_secondary: u32,
    pub surface_area_cm2: f64,
}

/// Inputs for an FDM quote.
#[derive(Debug, Clone, Default)]
pub struct FdmQuoteInput {
    pub project_name: String,
    pub print_colour: String,
    pub print_time_hours: f64,
    pub filament_weight_grams: f64,
    pub labor_hours: f64,
    pub overhead_percentage: f64,
    pub markup_percentage: f64,
    /// Clamped to at least 1.
    pub quantity: u32,
    pub painting: Option<PaintingInput>,
    pub customer_id: Option<CustomerId>,
    pub client_name: Option<String>,
}

/// Inputs for a resin quote. Washing and curing times are minutes.
#[derive(Debug, Clone, Default)]
pub struct ResinQuoteInput {
    pub project_name: String,
    pub print_colour: String,
    pub print_time_hours: f64,
    pub resin_volume_ml: f64,
    pub washing_time_minutes: f64,
    pub curing_time_minutes: f64,
    pub isopropyl_cost: f64,
    pub labor_hours: f64,
    pub overhead_percentage: f64,
    pub markup_percentage: f64,
    /// Clamped to at least 1.
    pub quantity: u32,
    pub painting: Option<PaintingInput>,
    pub customer_id: Option<CustomerId>,
    pub client_name: Option<String>,
}

/// Rejected quote input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("project name is required")]
    MissingProjectName,

    #[error("{0} must be greater than 0")]
    NonPositive(&'static str),
}

/// Checks the required FDM fields before calculation.
pub fn validate_fdm(input: &FdmQuoteInput) -> Result<(), ValidationError> {
    if input.project_name.trim().is_empty() {
        return Err(ValidationError::MissingProjectName);
    }
    if !(input.print_time_hours > 0.0) {
        return Err(ValidationError::NonPositive("print time"));
    }
    if !(input.filament_weight_grams > 0.0) {
        return Err(ValidationError::NonPositive("filament weight"));
    }
    Ok(())
}

/// Checks the required resin fields before calculation.
pub fn validate_resin(input: &ResinQuoteInput) -> Result<(), ValidationError> {
    if input.project_name.trim().is_empty() {
        return Err(ValidationError::MissingProjectName);
    }
    if !(input.print_time_hours > 0.0) {
        return Err(ValidationError::NonPositive("print time"));
    }
    if !(input.resin_volume_ml > 0.0) {
        return Err(ValidationError::NonPositive("resin volume"));
    }
    Ok(())
}

/// Extracts the usage rate (ml per cm² per layer) from a paint
/// description, e.g. "Base coat primer. Usage Rate: 0.03ml/cm2".
fn paint_usage_rate(description: Option<&str>) -> f64 {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| {
        Regex::new(r"(?i)usage\s*rate:\s*([0-9]*\.?[0-9]+)").expect("valid usage-rate pattern")
    });

    description
        .and_then(|text| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(DEFAULT_PAINT_USAGE_RATE)
}

/// Material cost of one paint application. `$/ml` paints scale with
/// surface area and layer count; anything else is a flat charge.
fn paint_material_cost(paint: &CostConstant, surface_area_cm2: f64, layers: u32) -> f64 {
    if paint.unit.contains("/ml") {
        let rate = paint_usage_rate(paint.description.as_deref());
        paint.value * surface_area_cm2 * f64::from(layers.max(1)) * rate
    } else {
        paint.value
    }
}

/// Painting cost per unit: painting labor plus up to two paints.
fn painting_cost(
    painting: Option<&PaintingInput>,
    labor_rate: f64,
    paint: Option<&CostConstant>,
    paint_secondary: Option<&CostConstant>,
) -> f64 {
    let Some(painting) = painting else {
        return 0.0;
    };

    let labor = painting.painting_time_hours * labor_rate;
    let primary = paint
        .map(|p| paint_material_cost(p, painting.surface_area_cm2, painting.layers))
        .unwrap_or(0.0);
    let secondary = paint_secondary
        .map(|p| paint_material_cost(p, painting.surface_area_cm2, painting.layers_secondary))
        .unwrap_or(0.0);

    labor + primary + secondary
}

/// Per-unit cost components before overhead and markup.
struct UnitCosts {
    material: f64,
    machine_time: f64,
    electricity: f64,
    labor: f64,
    consumables: f64,
    painting: f64,
}

/// Applies overhead, markup and quantity scaling to the per-unit costs
/// and assembles the final quote record.
#[allow(clippy::too_many_arguments)]
fn finalize_quote(
    unit: UnitCosts,
    overhead_percentage: f64,
    markup_percentage: f64,
    quantity: u32,
    print_type: PrintType,
    project_name: String,
    print_colour: String,
    customer_id: Option<CustomerId>,
    client_name: Option<String>,
    parameters: PrintParameters,
) -> Quote {
    let quantity = quantity.max(1);
    let qty = f64::from(quantity);

    let pre_overhead = unit.material
        + unit.machine_time
        + unit.electricity
        + unit.labor
        + unit.consumables
        + unit.painting;
    let overhead = pre_overhead * overhead_percentage / 100.0;
    let subtotal = pre_overhead + overhead;
    let markup = subtotal * markup_percentage / 100.0;
    let unit_price = subtotal + markup;
    let total_price = unit_price * qty;

    let created_at = Utc::now();
    let mut status_timeline = std::collections::BTreeMap::new();
    status_timeline.insert(QuoteStatus::Pending, created_at);

    Quote {
        id: QuoteId::new(),
        project_name,
        print_colour,
        print_type,
        status: QuoteStatus::Pending,
        costs: CostBreakdown {
            material_cost: unit.material * qty,
            machine_time_cost: unit.machine_time * qty,
            electricity_cost: unit.electricity * qty,
            labor_cost: unit.labor * qty,
            consumables_cost: unit.consumables * qty,
            painting_cost: unit.painting * qty,
            overhead_cost: overhead * qty,
            subtotal: subtotal * qty,
            markup: markup * qty,
        },
        unit_price,
        total_price,
        quantity,
        customer_id,
        client_name,
        notes: None,
        status_timeline,
        parameters,
        created_at,
    }
}

/// Computes an FDM quote from typed inputs and the selected catalog
/// records. Deterministic apart from the generated id and timestamp.
pub fn calculate_fdm_quote(
    input: &FdmQuoteInput,
    material: &Material,
    machine: &Machine,
    rates: &CostRates,
    consumables: &[ConsumableCharge],
    paint: Option<&CostConstant>,
    paint_secondary: Option<&CostConstant>,
) -> Quote {
    let filament_kg = input.filament_weight_grams / 1000.0;
    let power_kw = machine.power_consumption_watts.unwrap_or(0.0) / 1000.0;
    let consumables_total: f64 = consumables.iter().map(|c| c.value).sum();

    let unit = UnitCosts {
        material: filament_kg * material.cost_per_unit,
        machine_time: input.print_time_hours * machine.hourly_cost,
        electricity: input.print_time_hours * power_kw * rates.electricity_rate,
        labor: input.labor_hours * rates.labor_rate,
        consumables: consumables_total,
        painting: painting_cost(
            input.painting.as_ref(),
            rates.labor_rate,
            paint,
            paint_secondary,
        ),
    };

    let parameters = PrintParameters {
        material_name: Some(material.name.clone()),
        machine_name: Some(machine.name.clone()),
        print_time_hours: Some(input.print_time_hours),
        filament_weight_grams: Some(input.filament_weight_grams),
        labor_hours: Some(input.labor_hours),
        overhead_percentage: Some(input.overhead_percentage),
        markup_percentage: Some(input.markup_percentage),
        consumables: consumables.to_vec(),
        consumables_total: Some(consumables_total),
        painting_time_hours: input.painting.map(|p| p.painting_time_hours),
        painting_layers: input.painting.map(|p| p.layers),
        painting_layers_secondary: input.painting.map(|p| p.layers_secondary),
        surface_area_cm2: input.painting.map(|p| p.surface_area_cm2),
        ..PrintParameters::default()
    };

    finalize_quote(
        unit,
        input.overhead_percentage,
        input.markup_percentage,
        input.quantity,
        PrintType::Fdm,
        input.project_name.clone(),
        input.print_colour.clone(),
        input.customer_id.clone(),
        input.client_name.clone(),
        parameters,
    )
}

/// Computes a resin quote. Washing and curing occupy the machine, so the
/// full process time drives machine and electricity costs.
pub fn calculate_resin_quote(
    input: &ResinQuoteInput,
    material: &Material,
    machine: &Machine,
    rates: &CostRates,
    consumables: &[ConsumableCharge],
    paint: Option<&CostConstant>,
    paint_secondary: Option<&CostConstant>,
) -> Quote {
    let resin_liters = input.resin_volume_ml / 1000.0;
    let process_hours = input.print_time_hours
        + input.washing_time_minutes / 60.0
        + input.curing_time_minutes / 60.0;
    let power_kw = machine.power_consumption_watts.unwrap_or(0.0) / 1000.0;
    let consumables_total: f64 = consumables.iter().map(|c| c.value).sum();

    let unit = UnitCosts {
        material: resin_liters * material.cost_per_unit + input.isopropyl_cost,
        machine_time: process_hours * machine.hourly_cost,
        electricity: process_hours * power_kw * rates.electricity_rate,
        labor: input.labor_hours * rates.labor_rate,
        consumables: consumables_total,
        painting: painting_cost(
            input.painting.as_ref(),
            rates.labor_rate,
            paint,
            paint_secondary,
        ),
    };

    let parameters = PrintParameters {
        material_name: Some(material.name.clone()),
        machine_name: Some(machine.name.clone()),
        print_time_hours: Some(input.print_time_hours),
        resin_volume_ml: Some(input.resin_volume_ml),
        washing_time_minutes: Some(input.washing_time_minutes),
        curing_time_minutes: Some(input.curing_time_minutes),
        isopropyl_cost: Some(input.isopropyl_cost),
        labor_hours: Some(input.labor_hours),
        overhead_percentage: Some(input.overhead_percentage),
        markup_percentage: Some(input.markup_percentage),
        consumables: consumables.to_vec(),
        consumables_total: Some(consumables_total),
        painting_time_hours: input.painting.map(|p| p.painting_time_hours),
        painting_layers: input.painting.map(|p| p.layers),
        painting_layers_secondary: input.painting.map(|p| p.layers_secondary),
        surface_area_cm2: input.painting.map(|p| p.surface_area_cm2),
        ..PrintParameters::default()
    };

    finalize_quote(
        unit,
        input.overhead_percentage,
        input.markup_percentage,
        input.quantity,
        PrintType::Resin,
        input.project_name.clone(),
        input.print_colour.clone(),
        input.customer_id.clone(),
        input.client_name.clone(),
        parameters,
    )
}
