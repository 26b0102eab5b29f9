//! Reference-data CRUD: materials, machines, constants, customers.

use printforge_models::{
    ConstantId, CostConstant, Customer, CustomerId, Machine, MachineId, Material, MaterialId,
    PrintType,
};

use super::{truncate, Result, Stores};
use crate::cli::{ConstantsCommand, CustomersCommand, MachinesCommand, MaterialsCommand,
    OutputFormat};

pub fn materials(stores: &Stores, action: MaterialsCommand) -> Result<()> {
    let settings = stores.settings()?;

    match action {
        MaterialsCommand::List { print_type, format } => {
            let print_type = print_type
                .map(|t| t.parse::<PrintType>())
                .transpose()?;
            let materials = settings.materials(print_type)?;

            match format {
                OutputFormat::Table => {
                    println!(
                        "{:<24}  {:<24}  {:>10}  {:<8}  {:<6}",
                        "ID", "NAME", "COST", "UNIT", "TYPE"
                    );
                    println!("{}", "-".repeat(80));
                    for material in &materials {
                        println!(
                            "{:<24}  {:<24}  {:>10.2}  {:<8}  {:<6}",
                            truncate(material.id.as_str(), 24),
                            truncate(&material.name, 24),
                            material.cost_per_unit,
                            material.unit,
                            material.print_type.to_string()
                        );
                    }
                    println!("\n{} material(s)", materials.len());
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&materials)?),
                OutputFormat::Brief => {
                    for material in &materials {
                        println!("{}\t{}", material.id, material.name);
                    }
                }
            }
            Ok(())
        }
        MaterialsCommand::Add {
            name,
            cost,
            unit,
            print_type,
        } => {
            let material = Material::new(name, cost, unit, print_type.parse::<PrintType>()?);
            settings.save_material(material.clone())?;
            println!("Added material {} ({})", material.name, material.id);
            Ok(())
        }
        MaterialsCommand::Remove { id } => {
            settings.delete_material(&MaterialId::from(id.as_str()))?;
            println!("Removed material {}", id);
            Ok(())
        }
    }
}

pub fn machines(stores: &Stores, action: MachinesCommand) -> Result<()> {
    let settings = stores.settings()?;

    match action {
        MachinesCommand::List { print_type, format } => {
            let print_type = print_type
                .map(|t| t.parse::<PrintType>())
                .transpose()?;
            let machines = settings.machines(print_type)?;

            match format {
                OutputFormat::Table => {
                    println!(
                        "{:<24}  {:<24}  {:>8}  {:>8}  {:<6}",
                        "ID", "NAME", "$/HR", "WATTS", "TYPE"
                    );
                    println!("{}", "-".repeat(80));
                    for machine in &machines {
                        println!(
                            "{:<24}  {:<24}  {:>8.2}  {:>8}  {:<6}",
                            truncate(machine.id.as_str(), 24),
                            truncate(&machine.name, 24),
                            machine.hourly_cost,
                            machine
                                .power_consumption_watts
                                .map(|w| format!("{:.0}", w))
                                .unwrap_or_else(|| "-".to_string()),
                            machine.print_type.to_string()
                        );
                    }
                    println!("\n{} machine(s)", machines.len());
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&machines)?),
                OutputFormat::Brief => {
                    for machine in &machines {
                        println!("{}\t{}", machine.id, machine.name);
                    }
                }
            }
            Ok(())
        }
        MachinesCommand::Add {
            name,
            hourly_cost,
            power,
            print_type,
        } => {
            let machine = Machine::new(name, hourly_cost, power, print_type.parse::<PrintType>()?);
            settings.save_machine(machine.clone())?;
            println!("Added machine {} ({})", machine.name, machine.id);
            Ok(())
        }
        MachinesCommand::Remove { id } => {
            settings.delete_machine(&MachineId::from(id.as_str()))?;
            println!("Removed machine {}", id);
            Ok(())
        }
    }
}

pub fn constants(stores: &Stores, action: ConstantsCommand) -> Result<()> {
    let settings = stores.settings()?;

    match action {
        ConstantsCommand::List { all, format } => {
            let constants: Vec<CostConstant> = settings
                .constants()?
                .into_iter()
                .filter(|c| all || c.is_visible)
                .collect();

            match format {
                OutputFormat::Table => {
                    println!(
                        "{:<26}  {:<26}  {:>10}  {:<8}",
                        "ID", "NAME", "VALUE", "UNIT"
                    );
                    println!("{}", "-".repeat(78));
                    for constant in &constants {
                        println!(
                            "{:<26}  {:<26}  {:>10.2}  {:<8}",
                            truncate(constant.id.as_str(), 26),
                            truncate(&constant.name, 26),
                            constant.value,
                            constant.unit
                        );
                    }
                    println!("\n{} constant(s)", constants.len());
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&constants)?),
                OutputFormat::Brief => {
                    for constant in &constants {
                        println!("{}\t{}", constant.id, constant.name);
                    }
                }
            }
            Ok(())
        }
        ConstantsCommand::Add {
            name,
            value,
            unit,
            description,
        } => {
            let mut constant = CostConstant::new(name, value, unit);
            if let Some(description) = description {
                constant = constant.with_description(description);
            }
            settings.save_constant(constant.clone())?;
            println!("Added constant {} ({})", constant.name, constant.id);
            Ok(())
        }
        ConstantsCommand::Remove { id } => {
            settings.delete_constant(&ConstantId::from(id.as_str()))?;
            println!("Removed constant {}", id);
            Ok(())
        }
    }
}

pub fn customers(stores: &Stores, action: CustomersCommand) -> Result<()> {
    let settings = stores.settings()?;

    match action {
        CustomersCommand::List { format } => {
            let customers = settings.customers()?;

            match format {
                OutputFormat::Table => {
                    if customers.is_empty() {
                        println!("No customers.");
                        return Ok(());
                    }

                    println!("{:<40}  {:<24}  {:<24}", "ID", "NAME", "COMPANY");
                    println!("{}", "-".repeat(92));
                    for customer in &customers {
                        println!(
                            "{:<40}  {:<24}  {:<24}",
                            customer.id,
                            truncate(&customer.name, 24),
                            customer
                                .company
                                .as_deref()
                                .map(|c| truncate(c, 24))
                                .unwrap_or_else(|| "-".to_string())
                        );
                    }
                    println!("\n{} customer(s)", customers.len());
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&customers)?),
                OutputFormat::Brief => {
                    for customer in &customers {
                        println!("{}\t{}", customer.id, customer.name);
                    }
                }
            }
            Ok(())
        }
        CustomersCommand::Add {
            name,
            email,
            phone,
            company,
            notes,
        } => {
            let mut customer = Customer::new(name);
            customer.email = email;
            customer.phone = phone;
            customer.company = company;
            customer.notes = notes;

            settings.save_customer(customer.clone())?;
            println!("Added customer {} ({})", customer.name, customer.id);
            Ok(())
        }
        CustomersCommand::Show { id } => {
            let customer_id = CustomerId::from(id.as_str());
            let customer = settings.customer(&customer_id)?;
            let stats = stores.quotes().customer_stats(&customer_id)?;

            println!("Customer: {} ({})", customer.name, customer.id);
            if let Some(email) = &customer.email {
                println!("  Email: {}", email);
            }
            if let Some(phone) = &customer.phone {
                println!("  Phone: {}", phone);
            }
            if let Some(company) = &customer.company {
                println!("  Company: {}", company);
            }
            if let Some(notes) = &customer.notes {
                println!("  Notes: {}", notes);
            }
            println!("  Orders: {}", stats.order_count);
            println!("  Total spent: {:.2}", stats.total_spent);
            if let Some(last) = stats.last_order_at {
                println!("  Last order: {}", last);
            }
            Ok(())
        }
        CustomersCommand::Remove { id } => {
            settings.delete_customer(&CustomerId::from(id.as_str()))?;
            println!("Removed customer {}", id);
            Ok(())
        }
    }
}
