//! Interactive data entry for a new expense.

use chrono::{Duration, NaiveDate};
use dialoguer::theme::ColorfulTheme;
use expense_core::dates::{format_date, parse_input_date};

use crate::cli::core::CommandError;
use crate::cli::io;

const NEW_CATEGORY_LABEL: &str = "+ Nova categoria";

/// Raw values collected from the user. Nothing here is validated beyond
/// the date being a real calendar date; the expense validator does the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseFormData {
    pub date: NaiveDate,
    pub category: String,
    pub amount_text: String,
}

/// Resolves a typed date. Accepts `hoje`/`today`, `ontem`/`yesterday`, and
/// the stored date shapes (`YYYY-MM-DD`, `DD/MM/YYYY`, `YYYY/MM/DD`).
pub fn parse_date_arg(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    match raw.trim().to_lowercase().as_str() {
        "hoje" | "today" => Some(today),
        "ontem" | "yesterday" => Some(today - Duration::days(1)),
        other => parse_input_date(other),
    }
}

pub struct ExpenseForm<'a> {
    theme: &'a ColorfulTheme,
    today: NaiveDate,
    categories: &'a [String],
    date_format: &'a str,
}

impl<'a> ExpenseForm<'a> {
    pub fn new(
        theme: &'a ColorfulTheme,
        today: NaiveDate,
        categories: &'a [String],
        date_format: &'a str,
    ) -> Self {
        Self {
            theme,
            today,
            categories,
            date_format,
        }
    }

    pub fn run(&self) -> Result<ExpenseFormData, CommandError> {
        let date = self.prompt_date()?;
        let category = self.prompt_category()?;
        let amount_text = io::prompt_text(self.theme, "Valor (ex: 26,28 ou 26.28)", None, |_| {
            Ok(())
        })?;
        Ok(ExpenseFormData {
            date,
            category,
            amount_text,
        })
    }

    fn prompt_date(&self) -> Result<NaiveDate, CommandError> {
        let today = self.today;
        let default = format_date(today, self.date_format);
        let typed = io::prompt_text(self.theme, "Data", Some(&default), |value| {
            parse_date_arg(value, today)
                .map(|_| ())
                .ok_or_else(|| "Use DD/MM/AAAA ou AAAA-MM-DD".to_string())
        })?;
        parse_date_arg(&typed, today)
            .ok_or_else(|| CommandError::InvalidArguments(format!("invalid date `{typed}`")))
    }

    fn prompt_category(&self) -> Result<String, CommandError> {
        if !self.categories.is_empty() {
            let mut items = self.categories.to_vec();
            items.push(NEW_CATEGORY_LABEL.to_string());
            let index = io::select(self.theme, "Tipo", &items)?;
            if let Some(existing) = self.categories.get(index) {
                return Ok(existing.clone());
            }
        }
        io::prompt_text(self.theme, "Tipo", None, |_| Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_resolve_relative_to_today() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(parse_date_arg("hoje", today), Some(today));
        assert_eq!(parse_date_arg("Today", today), Some(today));
        assert_eq!(
            parse_date_arg("ontem", today),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
        assert_eq!(
            parse_date_arg("15/02/2025", today),
            NaiveDate::from_ymd_opt(2025, 2, 15)
        );
        assert_eq!(parse_date_arg("amanhã?", today), None);
    }
}
