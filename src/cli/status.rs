use crate::error::Result;
use crate::settings::get_data_dir;
use crate::storage::{load_snapshot, snapshot_path};

pub fn run() -> Result<()> {
    let data_dir = get_data_dir();
    let snapshot = load_snapshot(&data_dir);

    println!("Datos:      {}", snapshot_path(&data_dir).display());
    println!("Versión:    {}", snapshot.version);
    println!("Movimientos: {}", snapshot.transactions.len());
    let assigned = snapshot
        .transactions
        .iter()
        .filter(|t| t.is_assigned())
        .count();
    println!("Asignados:  {assigned}");
    if !snapshot.last_updated.is_empty() {
        println!("Actualizado: {}", snapshot.last_updated);
    }
    Ok(())
}
