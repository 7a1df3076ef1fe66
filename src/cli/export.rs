use std::path::PathBuf;

use crate::cli::load_store;
use crate::cli::summary::format_summary;
use crate::error::{FinanzasError, Result};
use crate::reports::{summarize, Period};
use crate::settings::get_data_dir;
use crate::storage::{export_assigned, write_csv_export};

fn default_path(name: &str) -> PathBuf {
    get_data_dir().join("exports").join(name)
}

fn write_text(path: &PathBuf, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("Escrito {}", path.display());
    Ok(())
}

pub fn csv(output: Option<String>) -> Result<()> {
    let store = load_store();
    if store.is_empty() {
        return Err(FinanzasError::Other("no hay datos para exportar".to_string()));
    }
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path("transacciones.csv"));
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    write_csv_export(&path, store.transactions())?;
    println!("Escrito {}", path.display());
    Ok(())
}

pub fn json(output: Option<String>) -> Result<()> {
    let store = load_store();
    let doc = export_assigned(store.transactions()).ok_or_else(|| {
        FinanzasError::Other("no hay transacciones asignadas para exportar".to_string())
    })?;
    let json = serde_json::to_string_pretty(&doc)
        .map_err(|e| FinanzasError::Storage(e.to_string()))?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path("transacciones.json"));
    write_text(&path, &format!("{json}\n"))
}

pub fn report(period: Period, output: Option<String>) -> Result<()> {
    let store = load_store();
    let summary = summarize(store.transactions(), period).ok_or_else(|| {
        FinanzasError::Other("no hay transacciones asignadas para el informe".to_string())
    })?;
    let path = output
        .map(PathBuf::from)
        .unwrap_or_else(|| default_path("resumen.txt"));
    write_text(&path, &format_summary(&summary, period))
}
