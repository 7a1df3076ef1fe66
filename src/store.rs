use regex::Regex;

use crate::error::{FinanzasError, Result};
use crate::models::{is_budget_item, Transaction};

/// The working set: every transaction from the last import plus manual edits.
/// Identity is positional, so all mutation is index-based, and a new import
/// replaces the whole list. Owning the list here keeps the replace/mutate/
/// clear operations in one place instead of ambient shared state.
#[derive(Debug, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Swap in a freshly imported set, discarding the previous one entirely.
    /// Returns validation warnings for the new records; they never block.
    pub fn replace(&mut self, transactions: Vec<Transaction>) -> Vec<String> {
        self.transactions = transactions;
        let mut warnings = Vec::new();
        for (i, t) in self.transactions.iter().enumerate() {
            for w in validate(t) {
                warnings.push(format!("fila {}: {w}", i + 1));
            }
        }
        warnings
    }

    pub fn clear(&mut self) {
        self.transactions.clear();
    }

    /// Append an empty record for manual entry.
    pub fn add_blank(&mut self) {
        self.transactions.push(Transaction::blank());
    }

    pub fn remove(&mut self, index: usize) -> Result<Transaction> {
        if index >= self.transactions.len() {
            return Err(FinanzasError::OutOfRange(index));
        }
        Ok(self.transactions.remove(index))
    }

    /// Set the budget item on one record. Labels outside the fixed set are
    /// stored as-is (they simply never aggregate) but reported back so the
    /// caller can warn.
    pub fn assign_item(&mut self, index: usize, label: &str) -> Result<Vec<String>> {
        let t = self
            .transactions
            .get_mut(index)
            .ok_or(FinanzasError::OutOfRange(index))?;
        t.assigned_item = label.to_string();
        let mut warnings = validate(t);
        if !label.is_empty() && !is_budget_item(label) {
            warnings.push(format!(
                "'{label}' no pertenece al conjunto de items; no contará en los totales"
            ));
        }
        Ok(warnings)
    }
}

/// Field-shape checks applied on edits and imports. Warn-only.
pub fn validate(t: &Transaction) -> Vec<String> {
    let date_shape = Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap();
    let mut errors = Vec::new();

    if !t.date.is_empty() && !date_shape.is_match(&t.date) {
        errors.push("formato de fecha inválido".to_string());
    }
    if t.amount.is_nan() {
        errors.push("importe debe ser un número válido".to_string());
    }
    if t.balance.is_nan() {
        errors.push("saldo debe ser un número válido".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            date: "15/01/2023".to_string(),
            value_date: None,
            category: "Recibos".to_string(),
            description: "Luz".to_string(),
            amount: -50.0,
            balance: 950.0,
            assigned_item: String::new(),
        }
    }

    #[test]
    fn test_replace_discards_previous_set() {
        let mut store = TransactionStore::new(vec![sample(), sample()]);
        let warnings = store.replace(vec![sample()]);
        assert_eq!(store.len(), 1);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_replace_reports_row_warnings() {
        let mut bad = sample();
        bad.date = "2023-01-15".to_string();
        bad.amount = f64::NAN;
        let mut store = TransactionStore::default();
        let warnings = store.replace(vec![sample(), bad]);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.starts_with("fila 2:")));
        // Bad rows are kept anyway.
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_blank_and_remove_are_index_based() {
        let mut store = TransactionStore::new(vec![sample()]);
        store.add_blank();
        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[1], Transaction::blank());

        let removed = store.remove(0).unwrap();
        assert_eq!(removed.description, "Luz");
        assert_eq!(store.len(), 1);

        assert!(matches!(store.remove(5), Err(FinanzasError::OutOfRange(5))));
    }

    #[test]
    fn test_assign_item_valid_label() {
        let mut store = TransactionStore::new(vec![sample()]);
        let warnings = store.assign_item(0, "Vivienda 1").unwrap();
        assert!(warnings.is_empty());
        assert_eq!(store.transactions()[0].assigned_item, "Vivienda 1");
    }

    #[test]
    fn test_assign_item_outside_set_warns_but_sticks() {
        let mut store = TransactionStore::new(vec![sample()]);
        let warnings = store.assign_item(0, "Chalet antiguo").unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(store.transactions()[0].assigned_item, "Chalet antiguo");
    }

    #[test]
    fn test_assign_item_empty_unassigns_without_warning() {
        let mut store = TransactionStore::new(vec![sample()]);
        store.assign_item(0, "Vivienda 1").unwrap();
        let warnings = store.assign_item(0, "").unwrap();
        assert!(warnings.is_empty());
        assert!(!store.transactions()[0].is_assigned());
    }

    #[test]
    fn test_assign_item_out_of_range() {
        let mut store = TransactionStore::default();
        assert!(matches!(
            store.assign_item(3, "Vivienda 1"),
            Err(FinanzasError::OutOfRange(3))
        ));
    }

    #[test]
    fn test_validate_accepts_empty_date() {
        // Blank manual rows start with no date; that is not an error.
        let t = Transaction::blank();
        assert!(validate(&t).is_empty());
    }
}
