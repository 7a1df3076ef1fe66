use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FinanzasError, Result};
use crate::fmt::csv_amount;
use crate::models::Transaction;

pub const SNAPSHOT_VERSION: &str = "1.0";

/// Fixed blob name the working set is persisted under.
const SNAPSHOT_FILE: &str = "finanzas.json";

// ---------------------------------------------------------------------------
// Snapshot blob
// ---------------------------------------------------------------------------

/// The persisted working set: written wholesale on every change, read back
/// at startup. No partial writes, no migration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: String,
    pub version: String,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            last_updated: String::new(),
            version: SNAPSHOT_VERSION.to_string(),
        }
    }
}

pub fn snapshot_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SNAPSHOT_FILE)
}

/// A missing or unreadable snapshot loads as an empty working set.
pub fn load_snapshot(data_dir: &Path) -> Snapshot {
    let path = snapshot_path(data_dir);
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Snapshot::default()
    }
}

pub fn save_snapshot(data_dir: &Path, transactions: &[Transaction]) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let snapshot = Snapshot {
        transactions: transactions.to_vec(),
        last_updated: chrono::Utc::now().to_rfc3339(),
        version: SNAPSHOT_VERSION.to_string(),
    };
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| FinanzasError::Storage(e.to_string()))?;
    std::fs::write(snapshot_path(data_dir), format!("{json}\n"))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON export (assigned transactions only)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub transactions: Vec<Transaction>,
    #[serde(rename = "exportDate")]
    pub export_date: String,
    pub total: usize,
    pub periodo: String,
}

/// Build the export document from the working set, or `None` when no
/// transaction carries an assigned item.
pub fn export_assigned(transactions: &[Transaction]) -> Option<ExportDocument> {
    let assigned: Vec<Transaction> = transactions
        .iter()
        .filter(|t| t.is_assigned())
        .cloned()
        .collect();
    if assigned.is_empty() {
        return None;
    }
    let periodo = detect_period(&assigned);
    Some(ExportDocument {
        total: assigned.len(),
        export_date: chrono::Utc::now().to_rfc3339(),
        periodo,
        transactions: assigned,
    })
}

/// Re-import a previously exported JSON document.
pub fn parse_json_export(content: &str) -> Result<Vec<Transaction>> {
    let doc: ExportDocument = serde_json::from_str(content)
        .map_err(|e| FinanzasError::Format(format!("documento JSON inválido: {e}")))?;
    Ok(doc.transactions)
}

/// Best-effort guess of the statement period from DD/MM/YYYY dates: one
/// distinct month, a run of months inside one quarter, or a mixed bag.
pub fn detect_period(transactions: &[Transaction]) -> String {
    let mut months: Vec<(u32, String)> = Vec::new();
    for t in transactions {
        let parts: Vec<&str> = t.date.split('/').collect();
        if parts.len() != 3 {
            continue;
        }
        if let Ok(m) = parts[1].parse::<u32>() {
            let key = format!("{}/{}", parts[1], parts[2]);
            if !months.iter().any(|(_, k)| *k == key) {
                months.push((m, key));
            }
        }
    }

    if months.is_empty() {
        return "desconocido".to_string();
    }
    if months.len() == 1 {
        return format!("mes-{}", months[0].1.replace('/', "-"));
    }
    if months.len() <= 3 {
        let min = months.iter().map(|(m, _)| *m).min().unwrap_or(0);
        let max = months.iter().map(|(m, _)| *m).max().unwrap_or(0);
        let year = months[0].1.split('/').nth(1).unwrap_or("").to_string();
        let quarter = match (min, max) {
            (1..=3, 1..=3) => Some(1),
            (4..=6, 4..=6) => Some(2),
            (7..=9, 7..=9) => Some(3),
            (10..=12, 10..=12) => Some(4),
            _ => None,
        };
        if let Some(q) = quarter {
            return format!("trimestre-{q}-{year}");
        }
    }
    "multiple-periodos".to_string()
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

const EXPORT_HEADERS: &[&str] = &["Fecha", "Categoría", "Descripción", "Importe", "Item Asignado"];

/// Write the working set back out as a semicolon CSV mirroring the import
/// layout, amounts with a decimal comma.
pub fn write_csv_export(path: &Path, transactions: &[Transaction]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_path(path)?;
    writer.write_record(EXPORT_HEADERS)?;
    for t in transactions {
        writer.write_record([
            t.date.as_str(),
            t.category.as_str(),
            t.description.as_str(),
            &csv_amount(t.amount),
            t.assigned_item.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
