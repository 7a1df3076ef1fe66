use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::load_store;
use crate::error::Result;
use crate::fmt::money;

pub fn run() -> Result<()> {
    let store = load_store();
    if store.is_empty() {
        println!("No hay transacciones cargadas. Importa un extracto para comenzar.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Fecha", "F. Valor", "Categoría", "Descripción", "Importe", "Item"]);
    for (i, t) in store.transactions().iter().enumerate() {
        let amount = if t.amount < 0.0 {
            money(t.amount).red().to_string()
        } else {
            money(t.amount).green().to_string()
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&t.date),
            Cell::new(t.value_date.as_deref().unwrap_or("")),
            Cell::new(&t.category),
            Cell::new(&t.description),
            Cell::new(amount),
            Cell::new(&t.assigned_item),
        ]);
    }
    println!("{table}");
    println!("{} movimientos", store.len());
    Ok(())
}
