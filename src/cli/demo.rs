use crate::cli::persist;
use crate::error::Result;
use crate::importer::parse_semicolon_csv;
use crate::store::TransactionStore;

const SAMPLE_STATEMENT: &str = "\
Fecha;F. Valor;Categoría;Descripción;Importe;Saldo
02/01/2023;02/01/2023;Nómina;TRANSFERENCIA EMPRESA SL;1850,00;2850,00
05/01/2023;05/01/2023;Recibos;RECIBO LUZ IBERDROLA;-86,40;2763,60
09/01/2023;09/01/2023;Recibos;RECIBO COMUNIDAD PROPIETARIOS;-120,00;2643,60
15/01/2023;16/01/2023;Alquileres;\"TRANSFERENCIA INQUILINO; PISO 2\";650,00;3293,60
28/01/2023;28/01/2023;Hipoteca;CUOTA PRESTAMO HIPOTECARIO;-540,25;2753,35
03/02/2023;03/02/2023;Nómina;TRANSFERENCIA EMPRESA SL;1850,00;4603,35
10/02/2023;10/02/2023;Recibos;RECIBO AGUA CANAL;-32,15;4571,20
";

pub fn run() -> Result<()> {
    let report = parse_semicolon_csv(SAMPLE_STATEMENT)?;
    let mut store = TransactionStore::default();
    store.replace(report.transactions);

    // Pre-assign a few rows so summary/export have something to show.
    store.assign_item(1, "Vivienda 1")?;
    store.assign_item(3, "Vivienda 2")?;
    store.assign_item(4, "Vivienda 1")?;

    persist(&store)?;
    println!("Cargado extracto de ejemplo: {} movimientos", store.len());
    println!("Prueba `finanzas list`, `finanzas summary` o `finanzas export json`.");
    Ok(())
}
