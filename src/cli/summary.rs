use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::load_store;
use crate::error::Result;
use crate::fmt::money;
use crate::reports::{summarize, Period, Summary};

pub fn run(period: Period) -> Result<()> {
    let store = load_store();
    match summarize(store.transactions(), period) {
        Some(summary) => println!("{}", format_summary(&summary, period)),
        None => println!("No hay transacciones asignadas para mostrar."),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Pure formatting (summary data → String)
// ---------------------------------------------------------------------------

pub fn format_summary(summary: &Summary, period: Period) -> String {
    let mut items = Table::new();
    items.set_header(vec!["Item", "Ingresos", "Gastos", "Neto", "Movs"]);
    for (name, totals) in &summary.items {
        items.add_row(vec![
            Cell::new(name),
            Cell::new(money(totals.income)),
            Cell::new(money(totals.expense)),
            Cell::new(money(totals.income - totals.expense)),
            Cell::new(totals.count),
        ]);
    }
    items.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(money(summary.total_income)),
        Cell::new(money(summary.total_expense)),
        Cell::new(money(summary.total_income - summary.total_expense)),
        Cell::new(summary.assigned_count),
    ]);

    let period_name = match period {
        Period::Mensual => "mensual",
        Period::Trimestral => "trimestral",
    };
    let mut periods = Table::new();
    periods.set_header(vec!["Período", "Ingresos", "Gastos", "Neto"]);
    for bucket in summary.periods.values() {
        periods.add_row(vec![
            Cell::new(bucket.label.clone().bold()),
            Cell::new(money(bucket.income)),
            Cell::new(money(bucket.expense)),
            Cell::new(money(bucket.income - bucket.expense)),
        ]);
        for (name, totals) in &bucket.items {
            periods.add_row(vec![
                Cell::new(format!("  {name}")),
                Cell::new(money(totals.income)),
                Cell::new(money(totals.expense)),
                Cell::new(money(totals.income - totals.expense)),
            ]);
        }
    }

    format!("Resumen por Item\n{items}\n\nPor período ({period_name})\n{periods}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;

    fn tx(date: &str, item: &str, amount: f64) -> Transaction {
        Transaction {
            date: date.to_string(),
            value_date: None,
            category: String::new(),
            description: String::new(),
            amount,
            balance: 0.0,
            assigned_item: item.to_string(),
        }
    }

    #[test]
    fn test_format_summary_lists_every_item_and_period() {
        let txs = vec![
            tx("15/01/2023", "Vivienda 1", 100.0),
            tx("20/02/2023", "Vivienda 2", -30.0),
        ];
        let summary = summarize(&txs, Period::Mensual).unwrap();
        let rendered = format_summary(&summary, Period::Mensual);
        assert!(rendered.contains("Vivienda 1"));
        assert!(rendered.contains("Sociedad Anonima 1"));
        assert!(rendered.contains("01/2023"));
        assert!(rendered.contains("02/2023"));
        assert!(rendered.contains("mensual"));
        assert!(rendered.contains("100,00"));
    }

    #[test]
    fn test_format_summary_quarterly_labels() {
        let txs = vec![tx("15/05/2023", "Vivienda 1", 10.0)];
        let summary = summarize(&txs, Period::Trimestral).unwrap();
        let rendered = format_summary(&summary, Period::Trimestral);
        assert!(rendered.contains("T2 2023"));
        assert!(rendered.contains("trimestral"));
    }
}
