use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;

use crate::models::{is_budget_item, Transaction, BUDGET_ITEMS};

// ---------------------------------------------------------------------------
// Period granularity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum Period {
    Mensual,
    Trimestral,
}

impl Period {
    /// Bucket key and display label for a calendar date.
    fn key_label(&self, date: NaiveDate) -> (String, String) {
        let year = date.year();
        let month = date.month();
        match self {
            Period::Mensual => (
                format!("{year:04}-{month:02}"),
                format!("{month:02}/{year:04}"),
            ),
            Period::Trimestral => {
                let quarter = month.div_ceil(3);
                (format!("T{quarter}-{year}"), format!("T{quarter} {year}"))
            }
        }
    }
}

/// Parse the display-format date (`DD/MM/YYYY`, possibly with a trailing
/// time component) into a calendar date.
pub fn parse_display_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.get(..10)?;
    NaiveDate::parse_from_str(s, "%d/%m/%Y").ok()
}

// ---------------------------------------------------------------------------
// Summary structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ItemTotals {
    pub income: f64,
    pub expense: f64,
    pub count: usize,
}

impl ItemTotals {
    fn add(&mut self, amount: f64) {
        if amount > 0.0 {
            self.income += amount;
        } else {
            self.expense += amount.abs();
        }
        self.count += 1;
    }
}

#[derive(Debug, Clone, Default)]
pub struct PeriodTotals {
    pub label: String,
    pub income: f64,
    pub expense: f64,
    /// Per-item breakdown inside this period, keyed by budget item.
    pub items: BTreeMap<String, ItemTotals>,
}

#[derive(Debug, Clone)]
pub struct Summary {
    /// One entry per budget item, in `BUDGET_ITEMS` declaration order.
    pub items: Vec<(String, ItemTotals)>,
    /// Period buckets in lexicographic key order.
    pub periods: BTreeMap<String, PeriodTotals>,
    pub total_income: f64,
    pub total_expense: f64,
    /// Transactions that carried a valid assigned item.
    pub assigned_count: usize,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Bucket assigned transactions by budget item and by calendar period.
/// Returns `None` when nothing has been assigned yet — callers render that as
/// "nothing to display," not an error. Assigned labels outside the fixed set
/// are skipped so stale snapshots never distort the totals. Recomputed in
/// full on every call; the working set is one bank statement, not a hot path.
pub fn summarize(transactions: &[Transaction], period: Period) -> Option<Summary> {
    let assigned: Vec<&Transaction> = transactions.iter().filter(|t| t.is_assigned()).collect();
    if assigned.is_empty() {
        return None;
    }

    let mut by_item: BTreeMap<&str, ItemTotals> = BTreeMap::new();
    let mut periods: BTreeMap<String, PeriodTotals> = BTreeMap::new();
    let mut assigned_count = 0usize;

    for t in assigned {
        if !is_budget_item(&t.assigned_item) {
            continue;
        }
        assigned_count += 1;
        by_item.entry(t.assigned_item.as_str()).or_default().add(t.amount);

        // An unparsable date still counts toward item and grand totals but
        // lands in no period bucket.
        if let Some(date) = parse_display_date(&t.date) {
            let (key, label) = period.key_label(date);
            let bucket = periods.entry(key).or_default();
            bucket.label = label;
            if t.amount > 0.0 {
                bucket.income += t.amount;
            } else {
                bucket.expense += t.amount.abs();
            }
            bucket
                .items
                .entry(t.assigned_item.clone())
                .or_default()
                .add(t.amount);
        }
    }

    let items: Vec<(String, ItemTotals)> = BUDGET_ITEMS
        .iter()
        .map(|name| {
            (
                name.to_string(),
                by_item.get(name).copied().unwrap_or_default(),
            )
        })
        .collect();

    let total_income: f64 = items.iter().map(|(_, t)| t.income).sum();
    let total_expense: f64 = items.iter().map(|(_, t)| t.expense).sum();

    Some(Summary {
        items,
        periods,
        total_income,
        total_expense,
        assigned_count,
    })
}
