use std::sync::Arc;

use chrono::NaiveDate;
use expense_domain::{ExpenseEntry, ExpenseRecord, ExpenseTable, RawExpenseRow};
use tracing::{debug, info, warn};

use crate::{
    amount::{canonical_amount_text, try_normalize},
    dates::parse_stored_date,
    storage::ExpenseSheet,
    time::Clock,
    validation::{parse_entry_amount, ExpenseValidator, ValidationIssue},
    CoreError,
};

/// Result of submitting a new expense.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Recorded(ExpenseRecord),
    Rejected(Vec<ValidationIssue>),
}

impl Submission {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Submission::Recorded(_))
    }
}

/// Coordinates the sheet, the validator and the normalizer.
pub struct ExpenseService {
    sheet: Box<dyn ExpenseSheet>,
    validator: ExpenseValidator<Arc<dyn Clock>>,
}

impl ExpenseService {
    pub fn new(sheet: Box<dyn ExpenseSheet>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sheet,
            validator: ExpenseValidator::new(clock),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.validator.today()
    }

    /// Reads every row and normalizes it for display and aggregation.
    pub fn load_table(&self) -> Result<ExpenseTable, CoreError> {
        let rows = self.sheet.read_all_rows()?;
        debug!(rows = rows.len(), "loaded expense rows");
        Ok(build_table(rows))
    }

    /// Validates and, when every rule passes, appends the expense.
    pub fn submit(
        &self,
        date: NaiveDate,
        category: &str,
        amount_text: &str,
    ) -> Result<Submission, CoreError> {
        let issues = self.validator.validate(date, category, amount_text);
        if !issues.is_empty() {
            debug!(?issues, "expense rejected");
            return Ok(Submission::Rejected(issues));
        }

        let amount = parse_entry_amount(amount_text).ok_or_else(|| {
            CoreError::InvalidOperation(format!("amount `{amount_text}` did not parse"))
        })?;
        let record = ExpenseRecord {
            date,
            category: category.trim().to_string(),
            amount_text: canonical_amount_text(amount),
            amount,
        };

        self.sheet
            .append_row(&record.storage_date(), &record.category, &record.amount_text)?;
        info!(
            date = %record.date,
            category = %record.category,
            amount = record.amount,
            "expense recorded"
        );
        Ok(Submission::Recorded(record))
    }

    /// Removes the row at `position` and returns what was stored there.
    pub fn delete(&self, position: usize) -> Result<RawExpenseRow, CoreError> {
        let removed = self.sheet.delete_row_at(position)?;
        info!(position, category = %removed.category, "expense deleted");
        Ok(removed)
    }

    /// Distinct categories in the order they first appear.
    pub fn categories(&self) -> Result<Vec<String>, CoreError> {
        let table = self.load_table()?;
        Ok(distinct_categories(&table))
    }

    /// Forces the next load to bypass any read cache.
    pub fn reload(&self) {
        self.sheet.invalidate();
    }
}

/// Normalizes raw rows into a table. Unparseable amounts become `0.0` and are
/// flagged as degraded.
pub fn build_table(rows: Vec<RawExpenseRow>) -> ExpenseTable {
    let entries = rows
        .into_iter()
        .enumerate()
        .map(|(position, row)| {
            let (amount, degraded) = match try_normalize(&row.amount) {
                Some(value) => (value, false),
                None => {
                    warn!(position, raw = %row.amount, "unparseable amount, using 0.0");
                    (0.0, true)
                }
            };
            let date = parse_stored_date(&row.date);
            if date.is_none() && !row.date.trim().is_empty() {
                warn!(position, raw = %row.date, "unrecognised date");
            }
            ExpenseEntry {
                position,
                date,
                raw_date: row.date,
                category: row.category,
                amount,
                degraded,
            }
        })
        .collect();
    ExpenseTable::new(entries)
}

pub fn distinct_categories(table: &ExpenseTable) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for entry in table {
        let name = entry.category.trim();
        if !name.is_empty() && !seen.iter().any(|known| known == name) {
            seen.push(name.to_string());
        }
    }
    seen
}
