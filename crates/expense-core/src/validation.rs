//! Entry-time checks applied to a new expense before it is stored.
//!
//! The amount rule here is deliberately stricter than
//! [`crate::amount::normalize_text`]: only a comma-to-period swap is applied,
//! with no grouping separators or symbols tolerated.

use std::fmt;

use chrono::NaiveDate;

use crate::time::Clock;

/// A single rule violation. `Display` yields the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationIssue {
    FutureDate,
    EmptyCategory,
    NotANumber,
    NotPositive,
}

impl ValidationIssue {
    pub fn message(&self) -> &'static str {
        match self {
            ValidationIssue::FutureDate => "Data não pode ser futura",
            ValidationIssue::EmptyCategory => "Tipo não pode estar vazio",
            ValidationIssue::NotANumber => "Valor deve ser um número",
            ValidationIssue::NotPositive => "Valor deve ser positivo",
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Runs every rule and returns all violations in rule order
/// (date, category, amount). An empty vector means the entry is valid.
pub fn validate(
    date: NaiveDate,
    category: &str,
    amount_text: &str,
    today: NaiveDate,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if date > today {
        issues.push(ValidationIssue::FutureDate);
    }

    if category.trim().is_empty() {
        issues.push(ValidationIssue::EmptyCategory);
    }

    match parse_entry_amount(amount_text) {
        None => issues.push(ValidationIssue::NotANumber),
        Some(value) if value <= 0.0 || value.is_nan() => {
            issues.push(ValidationIssue::NotPositive)
        }
        Some(_) => {}
    }

    issues
}

/// Parses user-typed amount text: comma becomes period, nothing else.
///
/// Infinite values are rejected as non-numbers; `NaN` parses and is left for
/// the positivity rule to reject.
pub fn parse_entry_amount(amount_text: &str) -> Option<f64> {
    amount_text
        .trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| !value.is_infinite())
}

pub fn messages(issues: &[ValidationIssue]) -> Vec<String> {
    issues.iter().map(ToString::to_string).collect()
}

/// Validator bound to a clock so "today" is read at call time.
pub struct ExpenseValidator<C: Clock> {
    clock: C,
}

impl<C: Clock> ExpenseValidator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn validate(
        &self,
        date: NaiveDate,
        category: &str,
        amount_text: &str,
    ) -> Vec<ValidationIssue> {
        validate(date, category, amount_text, self.clock.today())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::time::ManualClock;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn future_date_is_the_only_issue() {
        let tomorrow = today() + Duration::days(1);
        let issues = validate(tomorrow, "Food", "10.00", today());
        assert_eq!(issues, vec![ValidationIssue::FutureDate]);
    }

    #[test]
    fn today_and_past_dates_are_accepted() {
        assert!(validate(today(), "Food", "10.00", today()).is_empty());
        let last_year = today() - Duration::days(365);
        assert!(validate(last_year, "Food", "10.00", today()).is_empty());
    }

    #[test]
    fn blank_category_is_rejected() {
        assert_eq!(
            validate(today(), "", "10.00", today()),
            vec![ValidationIssue::EmptyCategory]
        );
        assert_eq!(
            validate(today(), "   \t", "10.00", today()),
            vec![ValidationIssue::EmptyCategory]
        );
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        assert_eq!(
            validate(today(), "Food", "-5", today()),
            vec![ValidationIssue::NotPositive]
        );
        assert_eq!(
            validate(today(), "Food", "0,00", today()),
            vec![ValidationIssue::NotPositive]
        );
        assert_eq!(
            validate(today(), "Food", "NaN", today()),
            vec![ValidationIssue::NotPositive]
        );
    }

    #[test]
    fn non_numeric_amounts_are_rejected() {
        for text in ["abc", "", "R$ 10", "1.234,56", "1,234,5", "inf"] {
            assert_eq!(
                validate(today(), "Food", text, today()),
                vec![ValidationIssue::NotANumber],
                "input {text:?}"
            );
        }
    }

    #[test]
    fn all_issues_are_collected_in_rule_order() {
        assert_eq!(
            validate(today(), "", "abc", today()),
            vec![ValidationIssue::EmptyCategory, ValidationIssue::NotANumber]
        );

        let tomorrow = today() + Duration::days(1);
        assert_eq!(
            messages(&validate(tomorrow, " ", "-1", today())),
            vec![
                "Data não pode ser futura",
                "Tipo não pode estar vazio",
                "Valor deve ser positivo",
            ]
        );
    }

    #[test]
    fn comma_decimal_is_valid() {
        assert!(validate(today(), "Food", "26,28", today()).is_empty());
        assert!(validate(today(), "Food", " 26.28 ", today()).is_empty());
    }

    #[test]
    fn validator_reads_today_from_clock() {
        let clock = ManualClock::at_date(today());
        let validator = ExpenseValidator::new(clock);
        assert!(validator.validate(today(), "Food", "1").is_empty());
        assert_eq!(
            validator.validate(today() + Duration::days(1), "Food", "1"),
            vec![ValidationIssue::FutureDate]
        );
    }
}
