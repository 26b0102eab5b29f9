//! Batch quoting commands.

use printforge_models::QuoteId;
use printforge_production::BatchList;

use super::{truncate, Result, Stores};
use crate::cli::{BatchCommand, OutputFormat};

pub fn execute(stores: &Stores, action: BatchCommand) -> Result<()> {
    let mut batch = BatchList::load(stores.session())?;

    match action {
        BatchCommand::Add { quote_id } => {
            let quote = stores.quotes().get(&QuoteId::from(quote_id.as_str()))?;
            let id = batch.add_item(quote)?;
            println!("Added batch item {}", id);
            Ok(())
        }
        BatchCommand::Remove { index } => {
            batch.remove_item(index)?;
            println!("Removed batch item {}", index);
            Ok(())
        }
        BatchCommand::List { format } => cmd_list(&batch, format),
        BatchCommand::Clear => {
            batch.clear()?;
            println!("Cleared batch");
            Ok(())
        }
    }
}

fn cmd_list(
    batch: &BatchList<printforge_store::FileStorage>,
    format: OutputFormat,
) -> Result<()> {
    let totals = batch.totals();

    match format {
        OutputFormat::Table => {
            if batch.items().is_empty() {
                println!("Batch is empty.");
                return Ok(());
            }

            println!(
                "{:>3}  {:<24}  {:<6}  {:>4}  {:>10}",
                "#", "PROJECT", "TYPE", "QTY", "TOTAL"
            );
            println!("{}", "-".repeat(56));
            for (index, item) in batch.items().iter().enumerate() {
                println!(
                    "{:>3}  {:<24}  {:<6}  {:>4}  {:>10.2}",
                    index,
                    truncate(&item.project_name, 24),
                    item.print_type.to_string(),
                    item.quantity,
                    item.total_price
                );
            }
            println!("{}", "-".repeat(56));
            println!(
                "{} item(s), {} unit(s), grand total {:.2}",
                totals.item_count, totals.total_quantity, totals.grand_total
            );
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "items": batch.items(),
                "totals": totals,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        OutputFormat::Brief => {
            for (index, item) in batch.items().iter().enumerate() {
                println!("{}\t{}", index, item.project_name);
            }
        }
    }

    Ok(())
}
