use std::path::Path;

use crate::error::{FinanzasError, Result};
use crate::models::{ParseReport, RowWarning, Transaction};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split one physical line on `sep`, honoring double-quoted fields: a quote
/// toggles the in-quotes flag, the separator only splits outside quotes, and
/// the final field is flushed even without a trailing separator.
pub fn split_quoted_line(line: &str, sep: char) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == sep && !in_quotes {
            result.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    result.push(current);
    result
}

/// Parse a statement decimal. Bank exports write a decimal comma, so the
/// first comma is swapped for a dot before the numeric parse. An absent or
/// empty field defaults to 0; a present but unparsable one yields NaN, which
/// the legacy tool let propagate into totals ("1.234,56" becomes "1.234.56"
/// and therefore NaN).
pub fn parse_decimal(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else { return 0.0 };
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }
    s.replacen(',', ".", 1).parse().unwrap_or(f64::NAN)
}

/// Convert a spreadsheet date serial to DD/MM/YYYY. Serials count days from
/// the 1900 epoch; subtracting 25569 days lands on the Unix epoch, truncated
/// to the UTC day boundary.
#[cfg(any(feature = "xlsx", test))]
pub fn serial_to_date(serial: f64) -> String {
    let base = chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
    let date = base + chrono::Duration::days(serial as i64 - 25569);
    date.format("%d/%m/%Y").to_string()
}

/// Normalize a textual date cell into display form. ISO `YYYY-MM-DD[...]`
/// is reformatted to `DD/MM/YYYY`; an already-formatted `DD/MM/YYYY[...]`
/// value and any other shape pass through unmodified.
#[cfg(any(feature = "xlsx", test))]
pub fn normalize_date_str(raw: &str) -> String {
    let s = raw.trim();
    let b = s.as_bytes();
    let iso = b.len() >= 10
        && b[..4].iter().all(u8::is_ascii_digit)
        && b[4] == b'-'
        && b[5..7].iter().all(u8::is_ascii_digit)
        && b[7] == b'-'
        && b[8..10].iter().all(u8::is_ascii_digit);
    if iso {
        let year = &s[..4];
        let month = &s[5..7];
        let day = &s[8..10];
        return format!("{day}/{month}/{year}");
    }
    s.to_string()
}

// ---------------------------------------------------------------------------
// Importer kinds — enum dispatch instead of trait objects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImporterKind {
    SemicolonCsv,
    #[cfg(feature = "xlsx")]
    BankXlsx,
}

impl ImporterKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::SemicolonCsv => "csv",
            #[cfg(feature = "xlsx")]
            Self::BankXlsx => "xlsx",
        }
    }

    pub fn detect(&self, file_path: &Path) -> bool {
        let ext = file_path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        match self {
            Self::SemicolonCsv => matches!(ext.as_deref(), Some("csv") | Some("txt")),
            #[cfg(feature = "xlsx")]
            Self::BankXlsx => matches!(ext.as_deref(), Some("xlsx") | Some("xls")),
        }
    }

    pub fn parse(&self, file_path: &Path) -> Result<ParseReport> {
        match self {
            Self::SemicolonCsv => {
                let content = std::fs::read_to_string(file_path)?;
                parse_semicolon_csv(&content)
            }
            #[cfg(feature = "xlsx")]
            Self::BankXlsx => parse_bank_xlsx(file_path),
        }
    }
}

const ALL_IMPORTERS: &[ImporterKind] = &[
    ImporterKind::SemicolonCsv,
    #[cfg(feature = "xlsx")]
    ImporterKind::BankXlsx,
];

pub fn get_by_key(key: &str) -> Option<ImporterKind> {
    ALL_IMPORTERS.iter().find(|i| i.key() == key).copied()
}

pub fn get_for_file(file_path: &Path) -> Option<ImporterKind> {
    ALL_IMPORTERS.iter().find(|i| i.detect(file_path)).copied()
}

// ---------------------------------------------------------------------------
// Semicolon CSV parser
// ---------------------------------------------------------------------------

const CSV_SEPARATOR: char = ';';

// Fixed column layout of the bank's CSV export.
const CSV_COL_DATE: usize = 0;
const CSV_COL_CATEGORY: usize = 2;
const CSV_COL_DESCRIPTION: usize = 3;
const CSV_COL_AMOUNT: usize = 4;
const CSV_COL_BALANCE: usize = 5;

pub fn parse_semicolon_csv(content: &str) -> Result<ParseReport> {
    let lines: Vec<&str> = content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    // One header line plus at least one data row.
    if lines.len() < 2 {
        return Err(FinanzasError::Format(
            "se necesita una línea de encabezado y al menos una de datos".to_string(),
        ));
    }

    let mut report = ParseReport::default();

    for (i, line) in lines.iter().enumerate().skip(1) {
        let values = split_quoted_line(line, CSV_SEPARATOR);
        let field = |idx: usize| values.get(idx).map(|s| s.as_str());

        let amount = parse_decimal(field(CSV_COL_AMOUNT));
        let balance = parse_decimal(field(CSV_COL_BALANCE));
        if amount.is_nan() {
            report.warnings.push(RowWarning {
                line: i + 1,
                message: format!(
                    "importe no numérico {:?}; se mantiene como NaN",
                    field(CSV_COL_AMOUNT).unwrap_or("")
                ),
            });
        }
        if balance.is_nan() {
            report.warnings.push(RowWarning {
                line: i + 1,
                message: format!(
                    "saldo no numérico {:?}; se mantiene como NaN",
                    field(CSV_COL_BALANCE).unwrap_or("")
                ),
            });
        }

        report.transactions.push(Transaction {
            date: field(CSV_COL_DATE).unwrap_or("").to_string(),
            value_date: None,
            category: field(CSV_COL_CATEGORY).unwrap_or("").to_string(),
            description: field(CSV_COL_DESCRIPTION).unwrap_or("").to_string(),
            amount,
            balance,
            assigned_item: String::new(),
        });
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Bank XLSX parser
// ---------------------------------------------------------------------------

/// Header labels the bank writes, matched after trimming and uppercasing.
#[cfg(any(feature = "xlsx", test))]
const EXPECTED_HEADERS: &[&str] = &[
    "FECHA",
    "FECHA VALOR",
    "CATEGORÍA",
    "DESCRIPCIÓN",
    "IMPORTE",
    "SALDO",
];

/// Column indices for each transaction field. Resolved by name from the
/// detected header row where possible; any field the header does not name
/// keeps the fixed position of the originally observed statement layout.
#[cfg(any(feature = "xlsx", test))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMap {
    pub date: usize,
    pub value_date: usize,
    pub category: usize,
    pub description: usize,
    pub amount: usize,
    pub balance: usize,
}

#[cfg(any(feature = "xlsx", test))]
impl ColumnMap {
    pub fn fixed() -> Self {
        Self {
            date: 0,
            value_date: 1,
            category: 4,
            description: 5,
            amount: 9,
            balance: 10,
        }
    }

    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let mut map = Self::fixed();
        for (idx, cell) in header.iter().enumerate() {
            match cell.as_ref().trim().to_uppercase().as_str() {
                "FECHA" => map.date = idx,
                "FECHA VALOR" => map.value_date = idx,
                "CATEGORÍA" => map.category = idx,
                "DESCRIPCIÓN" => map.description = idx,
                "IMPORTE" => map.amount = idx,
                "SALDO" => map.balance = idx,
                _ => {}
            }
        }
        map
    }
}

#[cfg(any(feature = "xlsx", test))]
fn is_header_row<S: AsRef<str>>(cells: &[S]) -> bool {
    cells
        .iter()
        .any(|c| EXPECTED_HEADERS.contains(&c.as_ref().trim().to_uppercase().as_str()))
}

#[cfg(feature = "xlsx")]
fn cell_text(cell: &calamine::Data) -> String {
    use calamine::Data;
    match cell {
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(feature = "xlsx")]
fn cell_date(cell: &calamine::Data) -> String {
    use calamine::Data;
    match cell {
        Data::Float(f) => serial_to_date(*f),
        Data::Int(i) => serial_to_date(*i as f64),
        Data::String(s) => normalize_date_str(s),
        _ => String::new(),
    }
}

#[cfg(feature = "xlsx")]
fn cell_number(cell: &calamine::Data) -> f64 {
    use calamine::Data;
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => parse_decimal(Some(s)),
        _ => f64::NAN,
    }
}

#[cfg(feature = "xlsx")]
pub fn parse_bank_xlsx(file_path: &Path) -> Result<ParseReport> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(file_path)
        .map_err(|e| FinanzasError::Format(format!("no se pudo abrir el XLSX: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FinanzasError::Format("el libro no tiene hojas".to_string()))?
        .map_err(|e| FinanzasError::Format(format!("no se pudo leer la hoja: {e}")))?;

    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    let header_idx = rows
        .iter()
        .position(|row| is_header_row(row))
        .ok_or_else(|| {
            FinanzasError::Format("no se encontró la fila de encabezados".to_string())
        })?;
    let columns = ColumnMap::from_header(&rows[header_idx]);

    let mut report = ParseReport::default();

    for (offset, row) in range.rows().enumerate().skip(header_idx + 1) {
        let line = offset + 1;
        if row.len() < 6 || row.iter().all(|c| cell_text(c).is_empty()) {
            continue;
        }
        if cell_text(&row[0]).trim().is_empty() {
            continue;
        }

        let date = row.get(columns.date).map(cell_date).unwrap_or_default();
        let amount = row.get(columns.amount).map(cell_number).unwrap_or(f64::NAN);
        if date.is_empty() || !amount.is_finite() {
            report.warnings.push(RowWarning {
                line,
                message: "fila descartada: fecha vacía o importe no numérico".to_string(),
            });
            continue;
        }

        let value_date = row.get(columns.value_date).map(cell_date).unwrap_or_default();
        let balance = row.get(columns.balance).map(cell_number).unwrap_or(0.0);

        report.transactions.push(Transaction {
            date,
            value_date: if value_date.is_empty() {
                None
            } else {
                Some(value_date)
            },
            category: row
                .get(columns.category)
                .map(cell_text)
                .unwrap_or_default()
                .trim()
                .to_string(),
            description: row
                .get(columns.description)
                .map(cell_text)
                .unwrap_or_default()
                .trim()
                .to_string(),
            amount,
            balance: if balance.is_finite() { balance } else { 0.0 },
            assigned_item: String::new(),
        });
    }

    if report.transactions.is_empty() {
        return Err(FinanzasError::Format(
            "el archivo no contiene movimientos legibles".to_string(),
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_quoted_line_keeps_separator_inside_quotes() {
        assert_eq!(split_quoted_line("a;\"b;c\";d", ';'), vec!["a", "b;c", "d"]);
    }

    #[test]
    fn test_split_quoted_line_flushes_last_field() {
        assert_eq!(split_quoted_line("a;b", ';'), vec!["a", "b"]);
        assert_eq!(split_quoted_line("a;b;", ';'), vec!["a", "b", ""]);
        assert_eq!(split_quoted_line("", ';'), vec![""]);
    }

    #[test]
    fn test_parse_decimal_comma() {
        assert_eq!(parse_decimal(Some("123,45")), 123.45);
        assert_eq!(parse_decimal(Some("-7,5")), -7.5);
        assert_eq!(parse_decimal(Some("40")), 40.0);
    }

    #[test]
    fn test_parse_decimal_defaults_to_zero_when_absent() {
        assert_eq!(parse_decimal(None), 0.0);
        assert_eq!(parse_decimal(Some("")), 0.0);
        assert_eq!(parse_decimal(Some("   ")), 0.0);
    }

    #[test]
    fn test_parse_decimal_thousands_separator_is_nan() {
        // Legacy behavior: only the first comma is swapped, so a thousands
        // dot survives and the parse fails.
        assert!(parse_decimal(Some("1.234,56")).is_nan());
        assert!(parse_decimal(Some("basura")).is_nan());
    }

    #[test]
    fn test_parse_csv_returns_one_record_per_data_line() {
        let content = "Fecha;F.Valor;Categoría;Descripción;Importe;Saldo\n\
                       02/01/2023;02/01/2023;Recibos;Luz;-50,25;949,75\n\
                       \n\
                       03/01/2023;03/01/2023;Nómina;Empresa;1200,00;2149,75\n";
        let report = parse_semicolon_csv(content).unwrap();
        assert_eq!(report.transactions.len(), 2);
        assert!(report.transactions.iter().all(|t| t.assigned_item.is_empty()));
        assert!(report.transactions.iter().all(|t| t.value_date.is_none()));
        assert_eq!(report.transactions[0].amount, -50.25);
        assert_eq!(report.transactions[0].category, "Recibos");
        assert_eq!(report.transactions[1].balance, 2149.75);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_parse_csv_quoted_description_with_separator() {
        let content = "h\n01/02/2023;x;Compras;\"Super; S.A.\";-10,00;90,00\n";
        let report = parse_semicolon_csv(content).unwrap();
        assert_eq!(report.transactions[0].description, "Super; S.A.");
        assert_eq!(report.transactions[0].amount, -10.0);
    }

    #[test]
    fn test_parse_csv_requires_header_and_data() {
        assert!(matches!(
            parse_semicolon_csv(""),
            Err(FinanzasError::Format(_))
        ));
        assert!(matches!(
            parse_semicolon_csv("Fecha;Categoría;Importe\n"),
            Err(FinanzasError::Format(_))
        ));
    }

    #[test]
    fn test_parse_csv_short_rows_default_fields() {
        let content = "h\n05/03/2023\n";
        let report = parse_semicolon_csv(content).unwrap();
        let t = &report.transactions[0];
        assert_eq!(t.date, "05/03/2023");
        assert_eq!(t.category, "");
        assert_eq!(t.description, "");
        assert_eq!(t.amount, 0.0);
        assert_eq!(t.balance, 0.0);
    }

    #[test]
    fn test_parse_csv_garbage_amount_kept_as_nan_with_warning() {
        let content = "h\n05/03/2023;;Recibos;Agua;1.234,56;100,00\n";
        let report = parse_semicolon_csv(content).unwrap();
        assert_eq!(report.transactions.len(), 1);
        assert!(report.transactions[0].amount.is_nan());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line, 2);
    }

    #[test]
    fn test_serial_to_date_uses_unix_day_boundary() {
        assert_eq!(serial_to_date(44927.0), "01/01/2023");
        assert_eq!(serial_to_date(44927.75), "01/01/2023");
        assert_eq!(serial_to_date(25569.0), "01/01/1970");
    }

    #[test]
    fn test_normalize_date_str_shapes() {
        assert_eq!(normalize_date_str("2023-01-15"), "15/01/2023");
        assert_eq!(normalize_date_str("2023-01-15T00:00:00"), "15/01/2023");
        assert_eq!(normalize_date_str("15/01/2023"), "15/01/2023");
        assert_eq!(normalize_date_str("15/01/2023 00:00"), "15/01/2023 00:00");
        assert_eq!(normalize_date_str("enero"), "enero");
    }

    #[test]
    fn test_column_map_resolves_names_with_fixed_fallback() {
        let header = ["Fecha", "", "", "Importe"];
        let map = ColumnMap::from_header(&header);
        assert_eq!(map.date, 0);
        assert_eq!(map.amount, 3);
        // Unnamed fields keep the fixed statement layout.
        assert_eq!(map.value_date, 1);
        assert_eq!(map.category, 4);
        assert_eq!(map.description, 5);
        assert_eq!(map.balance, 10);
    }

    #[test]
    fn test_column_map_fixed_when_header_names_nothing() {
        let header = ["uno", "dos", "tres"];
        assert_eq!(ColumnMap::from_header(&header), ColumnMap::fixed());
    }

    #[test]
    fn test_header_row_detection_is_case_insensitive() {
        assert!(is_header_row(&["fecha valor", "algo"]));
        assert!(is_header_row(&["", "Descripción"]));
        assert!(!is_header_row(&["Extracto de cuenta", "Enero"]));
    }

    #[test]
    fn test_get_for_file_by_extension() {
        assert_eq!(
            get_for_file(Path::new("movs.csv")),
            Some(ImporterKind::SemicolonCsv)
        );
        #[cfg(feature = "xlsx")]
        assert_eq!(
            get_for_file(Path::new("movs.XLSX")),
            Some(ImporterKind::BankXlsx)
        );
        assert_eq!(get_for_file(Path::new("movs.pdf")), None);
    }

    #[test]
    fn test_get_by_key() {
        assert_eq!(get_by_key("csv"), Some(ImporterKind::SemicolonCsv));
        assert_eq!(get_by_key("ofx"), None);
    }
}
