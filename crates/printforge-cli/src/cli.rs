//! Command-line interface definition using clap.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Build version string with git hash and build date.
fn version_string() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const BUILD_DATE: &str = env!("BUILD_DATE");

    // Format: "0.2.0 (abc1234, 2026-08-07)"
    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();
    VERSION_STRING.get_or_init(|| format!("{} ({}, {})", VERSION, GIT_HASH, BUILD_DATE))
}

/// Printforge - quoting and production tracking for 3D print shops
#[derive(Parser, Debug)]
#[command(name = "printforge")]
#[command(author, version = version_string(), about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the data directory
    #[arg(short, long, env = "PRINTFORGE_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a print job
    Quote {
        #[command(subcommand)]
        process: QuoteCommand,
    },

    /// Manage saved quotes
    Quotes {
        #[command(subcommand)]
        action: QuotesCommand,
    },

    /// Kanban board over the saved quotes
    Board {
        #[command(subcommand)]
        action: Option<BoardCommand>,
    },

    /// Shop-floor production queue
    Production {
        #[command(subcommand)]
        action: ProductionCommand,
    },

    /// Assemble several quotes into one batch offer
    Batch {
        #[command(subcommand)]
        action: BatchCommand,
    },

    /// Fit an order onto the machine park
    Capacity(CapacityArgs),

    /// Export, import or reset the settings collections
    Settings {
        #[command(subcommand)]
        action: SettingsCommand,
    },

    /// Material catalog
    Materials {
        #[command(subcommand)]
        action: MaterialsCommand,
    },

    /// Machine catalog
    Machines {
        #[command(subcommand)]
        action: MachinesCommand,
    },

    /// Cost constants and consumables
    Constants {
        #[command(subcommand)]
        action: ConstantsCommand,
    },

    /// Customer records
    Customers {
        #[command(subcommand)]
        action: CustomersCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum QuoteCommand {
    /// Price an FDM print
    Fdm(FdmArgs),
    /// Price a resin print
    Resin(ResinArgs),
}

#[derive(Args, Debug)]
pub struct FdmArgs {
    /// Project name
    #[arg(long)]
    pub project: String,

    /// Print colour
    #[arg(long, default_value = "")]
    pub colour: String,

    /// Material id (see `printforge materials list`)
    #[arg(long)]
    pub material: String,

    /// Machine id (see `printforge machines list`)
    #[arg(long)]
    pub machine: String,

    /// Print time in hours
    #[arg(long)]
    pub print_time: f64,

    /// Filament weight in grams
    #[arg(long)]
    pub filament_weight: f64,

    /// Post-processing labor in hours
    #[arg(long, default_value_t = 0.0)]
    pub labor_hours: f64,

    /// Overhead percentage (default: the stored overhead constant)
    #[arg(long)]
    pub overhead: Option<f64>,

    /// Markup percentage (default: the stored markup constant)
    #[arg(long)]
    pub markup: Option<f64>,

    /// Number of units
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// Consumable constant ids to charge (repeatable)
    #[arg(long = "consumable")]
    pub consumables: Vec<String>,

    /// Primary paint constant id
    #[arg(long)]
    pub paint: Option<String>,

    /// Secondary paint constant id
    #[arg(long)]
    pub paint_secondary: Option<String>,

    /// Painting labor in hours
    #[arg(long, default_value_t = 0.0)]
    pub painting_time: f64,

    /// Primary paint layers
    #[arg(long, default_value_t = 0)]
    pub layers: u32,

    /// Secondary paint layers
    #[arg(long, default_value_t = 0)]
    pub layers_secondary: u32,

    /// Painted surface area in cm²
    #[arg(long, default_value_t = 0.0)]
    pub surface_area: f64,

    /// Customer id to attach the quote to
    #[arg(long)]
    pub customer: Option<String>,

    /// Free-text client name when there is no customer record
    #[arg(long)]
    pub client: Option<String>,

    /// Persist the quote after printing the breakdown
    #[arg(long)]
    pub save: bool,
}

#[derive(Args, Debug)]
pub struct ResinArgs {
    /// Project name
    #[arg(long)]
    pub project: String,

    /// Print colour
    #[arg(long, default_value = "")]
    pub colour: String,

    /// Material id
    #[arg(long)]
    pub material: String,

    /// Machine id
    #[arg(long)]
    pub machine: String,

    /// Print time in hours
    #[arg(long)]
    pub print_time: f64,

    /// Resin volume in milliliters
    #[arg(long)]
    pub resin_volume: f64,

    /// Washing time in minutes
    #[arg(long, default_value_t = 0.0)]
    pub washing_time: f64,

    /// Curing time in minutes
    #[arg(long, default_value_t = 0.0)]
    pub curing_time: f64,

    /// Isopropyl alcohol cost per unit
    #[arg(long, default_value_t = 0.0)]
    pub isopropyl_cost: f64,

    /// Post-processing labor in hours
    #[arg(long, default_value_t = 0.0)]
    pub labor_hours: f64,

    /// Overhead percentage (default: the stored overhead constant)
    #[arg(long)]
    pub overhead: Option<f64>,

    /// Markup percentage (default: the stored markup constant)
    #[arg(long)]
    pub markup: Option<f64>,

    /// Number of units
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// Consumable constant ids to charge (repeatable)
    #[arg(long = "consumable")]
    pub consumables: Vec<String>,

    /// Primary paint constant id
    #[arg(long)]
    pub paint: Option<String>,

    /// Secondary paint constant id
    #[arg(long)]
    pub paint_secondary: Option<String>,

    /// Painting labor in hours
    #[arg(long, default_value_t = 0.0)]
    pub painting_time: f64,

    /// Primary paint layers
    #[arg(long, default_value_t = 0)]
    pub layers: u32,

    /// Secondary paint layers
    #[arg(long, default_value_t = 0)]
    pub layers_secondary: u32,

    /// Painted surface area in cm²
    #[arg(long, default_value_t = 0.0)]
    pub surface_area: f64,

    /// Customer id to attach the quote to
    #[arg(long)]
    pub customer: Option<String>,

    /// Free-text client name when there is no customer record
    #[arg(long)]
    pub client: Option<String>,

    /// Persist the quote after printing the breakdown
    #[arg(long)]
    pub save: bool,
}

#[derive(Subcommand, Debug)]
pub enum QuotesCommand {
    /// List saved quotes
    List {
        /// Substring search over project, client and notes
        #[arg(short, long)]
        search: Option<String>,

        /// Filter by print type (fdm, resin)
        #[arg(short = 't', long = "type")]
        print_type: Option<String>,

        /// Filter by status (PENDING, APPROVED, ...)
        #[arg(long)]
        status: Option<String>,

        /// Sort order (newest, oldest, price-high, price-low)
        #[arg(long, default_value = "newest")]
        sort: String,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one quote in full
    Show {
        /// Quote id
        quote_id: String,
    },

    /// Delete a saved quote
    Delete {
        /// Quote id
        quote_id: String,
    },

    /// Replace the notes on a quote
    Note {
        /// Quote id
        quote_id: String,

        /// New notes text (empty clears)
        notes: String,
    },

    /// Dashboard statistics over all saved quotes
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum BoardCommand {
    /// Show the board columns (the default)
    Show {
        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Move a quote to another column
    Move {
        /// Quote id
        quote_id: String,

        /// Target status (PENDING, APPROVED, ...)
        status: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductionCommand {
    /// Queue a saved quote as a production job
    Add {
        /// Quote id
        quote_id: String,

        /// Machine to assign the job to (default: unassigned)
        #[arg(short, long)]
        machine: Option<String>,
    },

    /// Move a job to a status/machine bucket
    Move {
        /// Job id
        job_id: String,

        /// Target status (queued, printing, post-processing, completed)
        status: String,

        /// Target machine (default: unassigned)
        #[arg(short, long)]
        machine: Option<String>,

        /// Position within the target bucket (default: append)
        #[arg(short, long)]
        index: Option<usize>,
    },

    /// Remove a job from the queue
    Remove {
        /// Job id
        job_id: String,
    },

    /// List jobs
    List {
        /// Only jobs on this machine
        #[arg(short, long)]
        machine: Option<String>,

        /// Only jobs without a machine
        #[arg(short, long)]
        unassigned: bool,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Change a job's priority (low, normal, high)
    Priority {
        /// Job id
        job_id: String,

        /// New priority
        priority: String,
    },

    /// Replace a job's notes
    Note {
        /// Job id
        job_id: String,

        /// New notes text (empty clears)
        notes: String,
    },

    /// Drop all completed jobs
    ClearCompleted,
}

#[derive(Subcommand, Debug)]
pub enum BatchCommand {
    /// Copy a saved quote into the batch
    Add {
        /// Quote id
        quote_id: String,
    },

    /// Remove a batch item by position
    Remove {
        /// Zero-based item index
        index: usize,
    },

    /// List batch items with running totals
    List {
        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Empty the batch
    Clear,
}

#[derive(Args, Debug)]
pub struct CapacityArgs {
    /// Number of units to print
    #[arg(short, long)]
    pub quantity: u32,

    /// Print time per unit in hours
    #[arg(long)]
    pub print_time: f64,

    /// Working hours per day
    #[arg(long, default_value_t = 8.0)]
    pub work_hours: f64,

    /// Restrict to these machine ids (repeatable; default: all)
    #[arg(short, long = "machine")]
    pub machines: Vec<String>,

    /// Start date (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Check feasibility against this deadline (YYYY-MM-DD)
    #[arg(long)]
    pub deadline: Option<NaiveDate>,

    /// Output format (table, json, brief)
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Write all settings collections to a JSON file
    Export {
        /// Target file path
        path: PathBuf,
    },

    /// Replace all settings collections from a JSON file
    Import {
        /// Source file path
        path: PathBuf,
    },

    /// Restore the default reference data
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum MaterialsCommand {
    /// List materials
    List {
        /// Filter by print type (fdm, resin)
        #[arg(short = 't', long = "type")]
        print_type: Option<String>,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a material
    Add {
        #[arg(long)]
        name: String,

        /// Cost per purchasing unit
        #[arg(long)]
        cost: f64,

        /// Purchasing unit label (kg, liter, ...)
        #[arg(long)]
        unit: String,

        /// Print type (fdm, resin)
        #[arg(long = "type")]
        print_type: String,
    },

    /// Remove a material by id
    Remove {
        /// Material id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MachinesCommand {
    /// List machines
    List {
        /// Filter by print type (fdm, resin)
        #[arg(short = 't', long = "type")]
        print_type: Option<String>,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a machine
    Add {
        #[arg(long)]
        name: String,

        /// Running cost per hour
        #[arg(long)]
        hourly_cost: f64,

        /// Power draw in watts
        #[arg(long)]
        power: Option<f64>,

        /// Print type (fdm, resin)
        #[arg(long = "type")]
        print_type: String,
    },

    /// Remove a machine by id
    Remove {
        /// Machine id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConstantsCommand {
    /// List cost constants and consumables
    List {
        /// Include hidden system constants
        #[arg(short, long)]
        all: bool,

        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a constant or consumable
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        value: f64,

        /// Unit label ($/ml, flat, %, ...)
        #[arg(long)]
        unit: String,

        /// Description; "Usage Rate: N" drives per-ml paint math
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove a constant by id
    Remove {
        /// Constant id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum CustomersCommand {
    /// List customers
    List {
        /// Output format (table, json, brief)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Add a customer
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Show a customer with their order history
    Show {
        /// Customer id
        id: String,
    },

    /// Remove a customer by id
    Remove {
        /// Customer id
        id: String,
    },
}

/// Output format for list commands
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Brief,
}

impl Cli {
    /// Returns the data directory path, using the default if not specified.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".printforge"))
                .unwrap_or_else(|| PathBuf::from(".printforge"))
        })
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
