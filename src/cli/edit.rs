use crate::cli::{load_store, persist, print_warnings};
use crate::error::{FinanzasError, Result};

/// Convert a 1-based row number from `finanzas list` to a store index.
fn to_index(row: usize) -> Result<usize> {
    row.checked_sub(1).ok_or(FinanzasError::OutOfRange(0))
}

pub fn assign(row: usize, item: &str) -> Result<()> {
    let mut store = load_store();
    let warnings = store.assign_item(to_index(row)?, item)?;
    print_warnings(&warnings);
    persist(&store)?;
    if item.is_empty() {
        println!("Fila {row} sin item asignado");
    } else {
        println!("Fila {row} → {item}");
    }
    Ok(())
}

pub fn add() -> Result<()> {
    let mut store = load_store();
    store.add_blank();
    persist(&store)?;
    println!("Añadida fila {} (vacía)", store.len());
    Ok(())
}

pub fn remove(row: usize) -> Result<()> {
    let mut store = load_store();
    let removed = store.remove(to_index(row)?)?;
    persist(&store)?;
    println!("Eliminada fila {row}: {} {}", removed.date, removed.description);
    Ok(())
}

pub fn clear() -> Result<()> {
    let mut store = load_store();
    store.clear();
    persist(&store)?;
    println!("Conjunto de trabajo vacío");
    Ok(())
}
