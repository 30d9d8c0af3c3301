//! Raw rows as they are stored in (and read back from) the expense sheet.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell value exactly as the sheet hands it back: either a number the
/// sheet already recognised, or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        RawValue::Text(value.into())
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Text(String::new())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Number(value) => write!(f, "{value}"),
            RawValue::Text(value) => f.write_str(value),
        }
    }
}

/// One unnormalized sheet row. Column names follow the sheet header
/// (`Data`, `Tipo`, `Valor`); missing cells deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExpenseRow {
    #[serde(rename = "Data", default)]
    pub date: String,
    #[serde(rename = "Tipo", default)]
    pub category: String,
    #[serde(rename = "Valor", default)]
    pub amount: RawValue,
}

impl RawExpenseRow {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<RawValue>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_uses_sheet_column_names() {
        let row = RawExpenseRow::new("2025-03-01", "Mercado", "26,28");
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"Data":"2025-03-01","Tipo":"Mercado","Valor":"26,28"}"#);
    }

    #[test]
    fn numeric_cells_deserialize_as_numbers() {
        let row: RawExpenseRow =
            serde_json::from_str(r#"{"Data":"2025-03-01","Tipo":"Luz","Valor":120.5}"#).unwrap();
        assert_eq!(row.amount, RawValue::Number(120.5));
    }

    #[test]
    fn missing_cells_default_to_empty_text() {
        let row: RawExpenseRow = serde_json::from_str(r#"{"Tipo":"Luz"}"#).unwrap();
        assert_eq!(row.date, "");
        assert_eq!(row.amount, RawValue::Text(String::new()));
    }
}
