//! Saved-quote management commands.

use printforge_models::{PrintType, Quote, QuoteId, QuoteStatus};
use printforge_production::{filter_and_sort, QuoteFilter, SortOrder};

use super::{truncate, Result, Stores};
use crate::cli::{OutputFormat, QuotesCommand};

pub fn execute(stores: &Stores, action: QuotesCommand) -> Result<()> {
    match action {
        QuotesCommand::List {
            search,
            print_type,
            status,
            sort,
            format,
        } => cmd_list(stores, search, print_type, status, &sort, format),
        QuotesCommand::Show { quote_id } => cmd_show(stores, &quote_id),
        QuotesCommand::Delete { quote_id } => cmd_delete(stores, &quote_id),
        QuotesCommand::Note { quote_id, notes } => cmd_note(stores, &quote_id, &notes),
        QuotesCommand::Stats => cmd_stats(stores),
    }
}

fn cmd_list(
    stores: &Stores,
    search: Option<String>,
    print_type: Option<String>,
    status: Option<String>,
    sort: &str,
    format: OutputFormat,
) -> Result<()> {
    let mut filter = QuoteFilter::new();
    if let Some(search) = search {
        filter = filter.with_search(search);
    }
    if let Some(print_type) = print_type {
        filter = filter.with_print_type(print_type.parse::<PrintType>()?);
    }
    if let Some(status) = status {
        filter = filter.with_status(status.parse::<QuoteStatus>()?);
    }
    let order = sort.parse::<SortOrder>()?;

    let quotes = filter_and_sort(&stores.quotes().quotes()?, &filter, order);

    match format {
        OutputFormat::Table => {
            if quotes.is_empty() {
                println!("No quotes found.");
                return Ok(());
            }

            println!(
                "{:<42}  {:<20}  {:<6}  {:<15}  {:>4}  {:>10}",
                "ID", "PROJECT", "TYPE", "STATUS", "QTY", "TOTAL"
            );
            println!("{}", "-".repeat(106));
            for quote in &quotes {
                println!(
                    "{:<42}  {:<20}  {:<6}  {:<15}  {:>4}  {:>10.2}",
                    quote.id,
                    truncate(&quote.project_name, 20),
                    quote.print_type.to_string(),
                    quote.status.to_string(),
                    quote.quantity,
                    quote.total_price
                );
            }
            println!("\n{} quote(s)", quotes.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&quotes)?);
        }
        OutputFormat::Brief => {
            for quote in &quotes {
                println!("{}\t{}", quote.id, quote.project_name);
            }
        }
    }

    Ok(())
}

fn cmd_show(stores: &Stores, quote_id: &str) -> Result<()> {
    let quote = stores.quotes().get(&QuoteId::from(quote_id))?;
    print_quote(&quote);
    Ok(())
}

fn print_quote(quote: &Quote) {
    println!("Quote: {} ({})", quote.project_name, quote.id);
    println!("  Type: {}", quote.print_type);
    println!("  Status: {}", quote.status);
    println!("  Quantity: {}", quote.quantity);
    println!("  Unit price: {:.2}", quote.unit_price);
    println!("  Total: {:.2}", quote.total_price);
    if let Some(client) = &quote.client_name {
        println!("  Client: {}", client);
    }
    if let Some(customer_id) = &quote.customer_id {
        println!("  Customer: {}", customer_id);
    }
    if let Some(notes) = &quote.notes {
        println!("  Notes: {}", notes);
    }
    if let Some(material) = &quote.parameters.material_name {
        println!("  Material: {}", material);
    }
    if let Some(machine) = &quote.parameters.machine_name {
        println!("  Machine: {}", machine);
    }
    println!("  Created: {}", quote.created_at);
    if !quote.status_timeline.is_empty() {
        println!("  Timeline:");
        for (status, at) in &quote.status_timeline {
            println!("    {:<15}  {}", status.to_string(), at);
        }
    }
}

fn cmd_delete(stores: &Stores, quote_id: &str) -> Result<()> {
    let id = QuoteId::from(quote_id);
    stores.quotes().delete(&id)?;
    println!("Deleted quote {}", id);
    Ok(())
}

fn cmd_note(stores: &Stores, quote_id: &str, notes: &str) -> Result<()> {
    let id = QuoteId::from(quote_id);
    stores.quotes().update_notes(&id, notes)?;
    println!("Updated notes on {}", id);
    Ok(())
}

fn cmd_stats(stores: &Stores) -> Result<()> {
    let stats = stores.quotes().stats()?;

    println!("Saved quotes: {}", stats.total_quotes);
    println!("  Total revenue: {:.2}", stats.total_revenue);
    println!("  Average value: {:.2}", stats.avg_quote_value);
    println!("  FDM: {}  Resin: {}", stats.fdm_count, stats.resin_count);
    println!("  Created in the last 7 days: {}", stats.recent_quotes);

    Ok(())
}
