use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::{persist, print_warnings};
use crate::error::{FinanzasError, Result};
use crate::importer::{get_by_key, get_for_file};
use crate::models::ParseReport;
use crate::storage::parse_json_export;
use crate::store::TransactionStore;

fn is_json(file_path: &Path, format: Option<&str>) -> bool {
    if let Some(key) = format {
        return key == "json";
    }
    file_path
        .extension()
        .map_or(false, |e| e.eq_ignore_ascii_case("json"))
}

fn parse(file_path: &Path, format: Option<&str>) -> Result<ParseReport> {
    if is_json(file_path, format) {
        let content = std::fs::read_to_string(file_path)?;
        return Ok(ParseReport {
            transactions: parse_json_export(&content)?,
            warnings: Vec::new(),
        });
    }
    let importer = if let Some(key) = format {
        get_by_key(key).ok_or_else(|| FinanzasError::UnknownFormat(key.to_string()))?
    } else {
        get_for_file(file_path).ok_or_else(|| {
            FinanzasError::UnknownFormat(file_path.display().to_string())
        })?
    };
    importer.parse(file_path)
}

pub fn run(file: &str, format: Option<&str>) -> Result<()> {
    let file_path = PathBuf::from(file);

    // A new import supersedes the previous working set before the file is
    // read, so a failed attempt leaves the state empty rather than stale.
    let mut store = TransactionStore::default();
    persist(&store)?;

    let report = parse(&file_path, format)?;

    for w in &report.warnings {
        eprintln!(
            "{} línea {}: {}",
            "aviso:".yellow(),
            w.line,
            w.message.dimmed()
        );
    }

    let validation = store.replace(report.transactions);
    print_warnings(&validation);
    persist(&store)?;

    println!(
        "{} movimientos importados ({} avisos)",
        store.len(),
        report.warnings.len()
    );
    Ok(())
}
