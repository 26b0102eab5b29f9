//! The `quote fdm` / `quote resin` calculators.

use printforge_models::{ConsumableCharge, ConstantId, CostConstant, CustomerId, MachineId,
    MaterialId, Quote};
use printforge_pricing::{
    calculate_fdm_quote, calculate_resin_quote, validate_fdm, validate_resin, CostRates,
    FdmQuoteInput, PaintingInput, ResinQuoteInput,
};

use super::{Result, Stores};
use crate::cli::{FdmArgs, QuoteCommand, ResinArgs};

pub fn execute(stores: &Stores, process: QuoteCommand) -> Result<()> {
    match process {
        QuoteCommand::Fdm(args) => cmd_fdm(stores, args),
        QuoteCommand::Resin(args) => cmd_resin(stores, args),
    }
}

/// Resolves the value of a system constant, with a fallback when the
/// constant has been deleted.
fn constant_value(constants: &[CostConstant], id: &str, fallback: f64) -> f64 {
    constants
        .iter()
        .find(|c| c.id.as_str() == id)
        .map(|c| c.value)
        .unwrap_or(fallback)
}

/// Turns selected consumable ids into named charges.
fn resolve_consumables(
    constants: &[CostConstant],
    ids: &[String],
) -> Result<Vec<ConsumableCharge>> {
    ids.iter()
        .map(|id| {
            constants
                .iter()
                .find(|c| c.id.as_str() == id)
                .map(|c| ConsumableCharge {
                    name: c.name.clone(),
                    value: c.value,
                })
                .ok_or_else(|| format!("Unknown consumable: {}", id).into())
        })
        .collect()
}

fn resolve_paint(
    stores: &Stores,
    id: Option<&str>,
) -> Result<Option<CostConstant>> {
    match id {
        Some(id) => Ok(Some(
            stores.settings()?.constant(&ConstantId::from(id))?,
        )),
        None => Ok(None),
    }
}

fn painting_input(
    painting_time: f64,
    layers: u32,
    layers_secondary: u32,
    surface_area: f64,
    has_paint: bool,
) -> Option<PaintingInput> {
    if painting_time > 0.0 || surface_area > 0.0 || has_paint {
        Some(PaintingInput {
            painting_time_hours: painting_time,
            layers,
            layers_secondary,
            surface_area_cm2: surface_area,
        })
    } else {
        None
    }
}

fn cmd_fdm(stores: &Stores, args: FdmArgs) -> Result<()> {
    let settings = stores.settings()?;
    let material = settings.material(&MaterialId::from(args.material.as_str()))?;
    let machine = settings.machine(&MachineId::from(args.machine.as_str()))?;
    let constants = settings.constants()?;

    let rates = CostRates::from_constants(&constants);
    let consumables = resolve_consumables(&constants, &args.consumables)?;
    let paint = resolve_paint(stores, args.paint.as_deref())?;
    let paint_secondary = resolve_paint(stores, args.paint_secondary.as_deref())?;

    let input = FdmQuoteInput {
        project_name: args.project,
        print_colour: args.colour,
        print_time_hours: args.print_time,
        filament_weight_grams: args.filament_weight,
        labor_hours: args.labor_hours,
        overhead_percentage: args
            .overhead
            .unwrap_or_else(|| constant_value(&constants, "overhead", 10.0)),
        markup_percentage: args
            .markup
            .unwrap_or_else(|| constant_value(&constants, "markup", 30.0)),
        quantity: args.quantity,
        painting: painting_input(
            args.painting_time,
            args.layers,
            args.layers_secondary,
            args.surface_area,
            paint.is_some(),
        ),
        customer_id: args.customer.as_deref().map(CustomerId::from),
        client_name: args.client,
    };
    validate_fdm(&input)?;

    let quote = calculate_fdm_quote(
        &input,
        &material,
        &machine,
        &rates,
        &consumables,
        paint.as_ref(),
        paint_secondary.as_ref(),
    );

    print_breakdown(&quote);
    if args.save {
        stores.quotes().save(&quote)?;
        println!("\nSaved quote {}", quote.id);
    }

    Ok(())
}

fn cmd_resin(stores: &Stores, args: ResinArgs) -> Result<()> {
    let settings = stores.settings()?;
    let material = settings.material(&MaterialId::from(args.material.as_str()))?;
    let machine = settings.machine(&MachineId::from(args.machine.as_str()))?;
    let constants = settings.constants()?;

    let rates = CostRates::from_constants(&constants);
    let consumables = resolve_consumables(&constants, &args.consumables)?;
    let paint = resolve_paint(stores, args.paint.as_deref())?;
    let paint_secondary = resolve_paint(stores, args.paint_secondary.as_deref())?;

    let input = ResinQuoteInput {
        project_name: args.project,
        print_colour: args.colour,
        print_time_hours: args.print_time,
        resin_volume_ml: args.resin_volume,
        washing_time_minutes: args.washing_time,
        curing_time_minutes: args.curing_time,
        isopropyl_cost: args.isopropyl_cost,
        labor_hours: args.labor_hours,
        overhead_percentage: args
            .overhead
            .unwrap_or_else(|| constant_value(&constants, "overhead", 10.0)),
        markup_percentage: args
            .markup
            .unwrap_or_else(|| constant_value(&constants, "markup", 30.0)),
        quantity: args.quantity,
        painting: painting_input(
            args.painting_time,
            args.layers,
            args.layers_secondary,
            args.surface_area,
            paint.is_some(),
        ),
        customer_id: args.customer.as_deref().map(CustomerId::from),
        client_name: args.client,
    };
    validate_resin(&input)?;

    let quote = calculate_resin_quote(
        &input,
        &material,
        &machine,
        &rates,
        &consumables,
        paint.as_ref(),
        paint_secondary.as_ref(),
    );

    print_breakdown(&quote);
    if args.save {
        stores.quotes().save(&quote)?;
        println!("\nSaved quote {}", quote.id);
    }

    Ok(())
}

/// Prints the cost breakdown of a freshly computed quote.
pub(crate) fn print_breakdown(quote: &Quote) {
    println!(
        "{} ({}, {} unit{})",
        quote.project_name,
        quote.print_type,
        quote.quantity,
        if quote.quantity == 1 { "" } else { "s" }
    );
    println!("{}", "-".repeat(40));
    println!("  Material          {:>10.2}", quote.costs.material_cost);
    println!("  Machine time      {:>10.2}", quote.costs.machine_time_cost);
    println!("  Electricity       {:>10.2}", quote.costs.electricity_cost);
    println!("  Labor             {:>10.2}", quote.costs.labor_cost);
    if quote.costs.consumables_cost > 0.0 {
        println!("  Consumables       {:>10.2}", quote.costs.consumables_cost);
    }
    if quote.costs.painting_cost > 0.0 {
        println!("  Painting          {:>10.2}", quote.costs.painting_cost);
    }
    println!("  Overhead          {:>10.2}", quote.costs.overhead_cost);
    println!("  Subtotal          {:>10.2}", quote.costs.subtotal);
    println!("  Markup            {:>10.2}", quote.costs.markup);
    println!("{}", "-".repeat(40));
    println!("  Unit price        {:>10.2}", quote.unit_price);
    println!("  Total             {:>10.2}", quote.total_price);
}
