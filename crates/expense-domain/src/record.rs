//! Accepted expense records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used when a record is written to the sheet.
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// An expense that passed validation and was appended to the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub category: String,
    /// Canonical period-decimal text written to the `Valor` column.
    pub amount_text: String,
    pub amount: f64,
}

impl ExpenseRecord {
    pub fn storage_date(&self) -> String {
        self.date.format(STORAGE_DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_date_is_iso() {
        let record = ExpenseRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            category: "Farmácia".into(),
            amount_text: "12.5".into(),
            amount: 12.5,
        };
        assert_eq!(record.storage_date(), "2025-01-07");
    }
}
