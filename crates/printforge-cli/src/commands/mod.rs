//! Command handlers for CLI subcommands.

mod batch;
mod board;
mod capacity;
mod catalog;
mod production;
mod quote;
mod quotes;
mod settings;

use std::path::{Path, PathBuf};

use printforge_store::{FileStorage, QuoteStore, SessionStore, SettingsStore};

use crate::cli::Commands;

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Factory for the typed stores under one data directory.
///
/// Session-scoped collections (production jobs, batch items) live in a
/// `session/` subdirectory so they can be cleared apart from the rest.
pub struct Stores {
    data_dir: PathBuf,
}

impl Stores {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn settings(&self) -> Result<SettingsStore<FileStorage>> {
        Ok(SettingsStore::open(FileStorage::new(&self.data_dir))?)
    }

    pub fn quotes(&self) -> QuoteStore<FileStorage> {
        QuoteStore::new(FileStorage::new(&self.data_dir))
    }

    pub fn session(&self) -> SessionStore<FileStorage> {
        SessionStore::new(FileStorage::new(self.data_dir.join("session")))
    }
}

/// Execute a CLI command.
pub fn execute(command: Commands, data_dir: &Path) -> Result<()> {
    let stores = Stores::new(data_dir);

    match command {
        Commands::Quote { process } => quote::execute(&stores, process),
        Commands::Quotes { action } => quotes::execute(&stores, action),
        Commands::Board { action } => board::execute(&stores, action),
        Commands::Production { action } => production::execute(&stores, action),
        Commands::Batch { action } => batch::execute(&stores, action),
        Commands::Capacity(args) => capacity::execute(&stores, args),
        Commands::Settings { action } => settings::execute(&stores, action),
        Commands::Materials { action } => catalog::materials(&stores, action),
        Commands::Machines { action } => catalog::machines(&stores, action),
        Commands::Constants { action } => catalog::constants(&stores, action),
        Commands::Customers { action } => catalog::customers(&stores, action),
    }
}

/// Truncates a string to the given length, adding "..." if truncated.
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
