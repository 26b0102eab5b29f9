//! Capacity planning command.

use chrono::Utc;
use printforge_models::MachineId;
use printforge_pricing::{format_hours, meets_deadline, plan_capacity, CapacityQuery};

use super::{Result, Stores};
use crate::cli::{CapacityArgs, OutputFormat};

pub fn execute(stores: &Stores, args: CapacityArgs) -> Result<()> {
    let machines = stores.settings()?.machines(None)?;

    let machine_ids = if args.machines.is_empty() {
        None
    } else {
        Some(
            args.machines
                .iter()
                .map(|id| MachineId::from(id.as_str()))
                .collect(),
        )
    };

    let query = CapacityQuery {
        quantity: args.quantity,
        print_time_per_unit: args.print_time,
        machine_ids,
        work_hours_per_day: args.work_hours,
        start_date: args.start_date.unwrap_or_else(|| Utc::now().date_naive()),
    };

    let plan = plan_capacity(&query, &machines);

    match args.format {
        OutputFormat::Table => {
            println!(
                "{} unit(s) at {} each across {} machine(s)",
                args.quantity,
                format_hours(args.print_time),
                plan.machine_count
            );
            println!("{}", "-".repeat(60));
            for load in &plan.breakdown {
                println!(
                    "  {:<24}  {:>3} unit(s)  {:>10}",
                    load.machine_name,
                    load.units_assigned,
                    format_hours(load.hours_occupied)
                );
            }
            println!("{}", "-".repeat(60));
            println!("  Total print time:  {}", format_hours(plan.total_print_hours));
            println!("  Estimated days:    {}", plan.estimated_days);
            println!("  Completion date:   {}", plan.completion_date);
            println!("  Utilization:       {:.1}%", plan.utilization_percent);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        OutputFormat::Brief => {
            println!(
                "{}\t{}\t{:.1}%",
                plan.estimated_days, plan.completion_date, plan.utilization_percent
            );
        }
    }

    if let Some(deadline) = args.deadline {
        let check = meets_deadline(&query, &machines, deadline);
        if check.feasible {
            println!(
                "\nDeadline {}: feasible ({} day(s) needed, {} available)",
                deadline, check.days_needed, check.days_available
            );
        } else {
            println!(
                "\nDeadline {}: NOT feasible ({} day(s) needed, {} available)",
                deadline, check.days_needed, check.days_available
            );
        }
    }

    Ok(())
}
