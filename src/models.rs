use serde::{Deserialize, Serialize};

/// Fixed, closed set of budget items. Declaration order is reporting order.
pub const BUDGET_ITEMS: &[&str] = &["Vivienda 1", "Vivienda 2", "Sociedad Anonima 1"];

pub fn is_budget_item(label: &str) -> bool {
    BUDGET_ITEMS.contains(&label)
}

/// One bank-statement row. Field names on the wire stay Spanish so snapshots
/// and JSON exports from the previous tool remain readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "fecha")]
    pub date: String,
    /// Settlement date; only spreadsheet imports carry one.
    #[serde(rename = "fechaValor", default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<String>,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "importe")]
    pub amount: f64,
    #[serde(rename = "saldo")]
    pub balance: f64,
    /// User-chosen budget item; empty string means unassigned.
    #[serde(rename = "itemAsignado", default)]
    pub assigned_item: String,
}

impl Transaction {
    pub fn blank() -> Self {
        Self {
            date: String::new(),
            value_date: None,
            category: String::new(),
            description: String::new(),
            amount: 0.0,
            balance: 0.0,
            assigned_item: String::new(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        !self.assigned_item.is_empty()
    }
}

/// A non-fatal problem found while parsing one input row.
#[derive(Debug, Clone)]
pub struct RowWarning {
    /// 1-based physical line (CSV) or sheet row (XLSX).
    pub line: usize,
    pub message: String,
}

/// Parser output: the accepted transactions plus everything the parser
/// silently defaulted or dropped, so the caller can choose what to surface.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<RowWarning>,
}
