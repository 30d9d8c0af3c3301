use std::sync::Mutex;

use expense_domain::RawExpenseRow;

use crate::CoreError;

/// Tabular store holding one row per expense, in insertion order.
///
/// Positions are zero-based indices into the order returned by
/// [`ExpenseSheet::read_all_rows`]; rows carry no other identity.
pub trait ExpenseSheet: Send + Sync {
    fn read_all_rows(&self) -> Result<Vec<RawExpenseRow>, CoreError>;
    fn append_row(&self, date_iso: &str, category: &str, amount_text: &str)
        -> Result<(), CoreError>;
    /// Removes and returns the row at `position`.
    fn delete_row_at(&self, position: usize) -> Result<RawExpenseRow, CoreError>;

    /// Drops any locally cached view of the rows. No-op for uncached sheets.
    fn invalidate(&self) {}
}

impl<S: ExpenseSheet + ?Sized> ExpenseSheet for Box<S> {
    fn read_all_rows(&self) -> Result<Vec<RawExpenseRow>, CoreError> {
        (**self).read_all_rows()
    }

    fn append_row(
        &self,
        date_iso: &str,
        category: &str,
        amount_text: &str,
    ) -> Result<(), CoreError> {
        (**self).append_row(date_iso, category, amount_text)
    }

    fn delete_row_at(&self, position: usize) -> Result<RawExpenseRow, CoreError> {
        (**self).delete_row_at(position)
    }

    fn invalidate(&self) {
        (**self).invalidate()
    }
}

/// Volatile sheet kept in memory; used for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemorySheet {
    rows: Mutex<Vec<RawExpenseRow>>,
}

impl InMemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<RawExpenseRow>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<RawExpenseRow>>, CoreError> {
        self.rows
            .lock()
            .map_err(|_| CoreError::Storage("in-memory sheet lock poisoned".into()))
    }
}

impl ExpenseSheet for InMemorySheet {
    fn read_all_rows(&self) -> Result<Vec<RawExpenseRow>, CoreError> {
        Ok(self.lock()?.clone())
    }

    fn append_row(
        &self,
        date_iso: &str,
        category: &str,
        amount_text: &str,
    ) -> Result<(), CoreError> {
        self.lock()?
            .push(RawExpenseRow::new(date_iso, category, amount_text));
        Ok(())
    }

    fn delete_row_at(&self, position: usize) -> Result<RawExpenseRow, CoreError> {
        let mut rows = self.lock()?;
        if position >= rows.len() {
            return Err(CoreError::RowNotFound(position));
        }
        Ok(rows.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_keep_insertion_order() {
        let sheet = InMemorySheet::new();
        sheet.append_row("2025-01-01", "Luz", "80").unwrap();
        sheet.append_row("2025-01-02", "Água", "45.9").unwrap();

        let rows = sheet.read_all_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Luz");
        assert_eq!(rows[1].category, "Água");
    }

    #[test]
    fn delete_out_of_range_is_row_not_found() {
        let sheet = InMemorySheet::with_rows(vec![RawExpenseRow::new("2025-01-01", "Luz", "80")]);
        let err = sheet.delete_row_at(1).unwrap_err();
        assert!(matches!(err, CoreError::RowNotFound(1)));

        let removed = sheet.delete_row_at(0).unwrap();
        assert_eq!(removed.category, "Luz");
        assert!(sheet.read_all_rows().unwrap().is_empty());
    }
}
