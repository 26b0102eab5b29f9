//! Kanban board commands.

use std::collections::BTreeMap;

use printforge_models::{QuoteId, QuoteStatus};
use printforge_production::{move_quote, Board};

use super::{truncate, Result, Stores};
use crate::cli::{BoardCommand, OutputFormat};

pub fn execute(stores: &Stores, action: Option<BoardCommand>) -> Result<()> {
    match action {
        None => cmd_show(stores, OutputFormat::Table),
        Some(BoardCommand::Show { format }) => cmd_show(stores, format),
        Some(BoardCommand::Move { quote_id, status }) => cmd_move(stores, &quote_id, &status),
    }
}

fn cmd_show(stores: &Stores, format: OutputFormat) -> Result<()> {
    let quotes = stores.quotes().quotes()?;
    let board = Board::derive(&quotes);

    match format {
        OutputFormat::Table => {
            for (status, column) in board.columns() {
                println!("{} ({})", status, column.len());
                for quote in column {
                    println!(
                        "  {:<42}  {:<24}  {:>10.2}",
                        quote.id,
                        truncate(&quote.project_name, 24),
                        quote.total_price
                    );
                }
            }
            println!("\n{} quote(s) on the board", board.len());
        }
        OutputFormat::Json => {
            let columns: BTreeMap<String, _> = board
                .columns()
                .map(|(status, column)| (status.to_string(), column.to_vec()))
                .collect();
            println!("{}", serde_json::to_string_pretty(&columns)?);
        }
        OutputFormat::Brief => {
            for (status, column) in board.columns() {
                println!("{}\t{}", status, column.len());
            }
        }
    }

    Ok(())
}

fn cmd_move(stores: &Stores, quote_id: &str, status: &str) -> Result<()> {
    let id = QuoteId::from(quote_id);
    let status = status.parse::<QuoteStatus>()?;

    move_quote(&stores.quotes(), &id, status)?;
    println!("Moved {} to {}", id, status);

    Ok(())
}
