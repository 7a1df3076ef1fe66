pub mod demo;
pub mod edit;
pub mod export;
pub mod import;
pub mod init;
pub mod items;
pub mod list;
pub mod status;
pub mod summary;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::reports::Period;
use crate::settings::get_data_dir;
use crate::storage::{load_snapshot, save_snapshot};
use crate::store::TransactionStore;

/// Load the persisted working set into a store.
pub(crate) fn load_store() -> TransactionStore {
    TransactionStore::new(load_snapshot(&get_data_dir()).transactions)
}

/// Write the working set back to the snapshot blob.
pub(crate) fn persist(store: &TransactionStore) -> crate::error::Result<()> {
    save_snapshot(&get_data_dir(), store.transactions())
}

/// Validation warnings never block; they print dimmed to stderr.
pub(crate) fn print_warnings<S: AsRef<str>>(warnings: &[S]) {
    for w in warnings {
        eprintln!("{} {}", "aviso:".yellow(), w.as_ref().dimmed());
    }
}

#[derive(Parser)]
#[command(
    name = "finanzas",
    about = "Importa extractos bancarios, asigna items de presupuesto y resume por período."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose the data directory for the persisted working set.
    Init {
        /// Path for finanzas data (default: ~/Documents/finanzas)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Import a statement file, replacing the current working set.
    Import {
        /// Path to a CSV, XLSX, or previously exported JSON file
        file: String,
        /// Importer format key (csv, xlsx, json); default: by extension
        #[arg(long)]
        format: Option<String>,
    },
    /// List the working set with row numbers.
    List,
    /// Assign a budget item to one transaction.
    Assign {
        /// Row number as shown by `finanzas list`
        index: usize,
        /// Budget item label; pass '' to unassign
        item: String,
    },
    /// Append a blank transaction for manual entry.
    Add,
    /// Remove one transaction by row number.
    Remove {
        /// Row number as shown by `finanzas list`
        index: usize,
    },
    /// Discard the whole working set.
    Clear,
    /// Show the fixed budget-item set.
    Items,
    /// Totals per budget item and per calendar period.
    Summary {
        /// Period granularity
        #[arg(long, value_enum, default_value_t = Period::Mensual)]
        period: Period,
    },
    /// Export the working set.
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
    /// Load a small sample statement to explore the tool.
    Demo,
    /// Show snapshot location and working-set statistics.
    Status,
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Semicolon CSV mirroring the import layout.
    Csv {
        /// Output file path (default: <data_dir>/exports/transacciones.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// JSON document with the assigned transactions.
    Json {
        #[arg(long)]
        output: Option<String>,
    },
    /// Plain-text summary report.
    Report {
        #[arg(long, value_enum, default_value_t = Period::Mensual)]
        period: Period,
        #[arg(long)]
        output: Option<String>,
    },
}
