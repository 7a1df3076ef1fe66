mod cli;
mod error;
mod fmt;
mod importer;
mod models;
mod reports;
mod settings;
mod storage;
mod store;

use clap::Parser;

use cli::{Cli, Commands, ExportCommands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Import { file, format } => cli::import::run(&file, format.as_deref()),
        Commands::List => cli::list::run(),
        Commands::Assign { index, item } => cli::edit::assign(index, &item),
        Commands::Add => cli::edit::add(),
        Commands::Remove { index } => cli::edit::remove(index),
        Commands::Clear => cli::edit::clear(),
        Commands::Items => cli::items::run(),
        Commands::Summary { period } => cli::summary::run(period),
        Commands::Export { command } => match command {
            ExportCommands::Csv { output } => cli::export::csv(output),
            ExportCommands::Json { output } => cli::export::json(output),
            ExportCommands::Report { period, output } => cli::export::report(period, output),
        },
        Commands::Demo => cli::demo::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
