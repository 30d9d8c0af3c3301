//! Lenient monetary value normalization used when loading stored rows.
//!
//! Stored values may have been typed with either comma or period as the
//! decimal separator, carry a currency symbol, or already be numbers. This
//! module maps all of them onto a single period-decimal `f64`. It is
//! intentionally more forgiving than the entry-time rule in
//! [`crate::validation`]; the two must stay separate.

use expense_domain::RawValue;

/// Normalizes a raw sheet value into a canonical amount.
///
/// Numbers pass through untouched. Text goes through
/// [`normalize_text`], which falls back to `0.0` when nothing parseable
/// remains.
pub fn normalize(raw: &RawValue) -> f64 {
    match raw {
        RawValue::Number(value) => *value,
        RawValue::Text(text) => normalize_text(text),
    }
}

/// Same as [`normalize`] but reports unparseable text as `None`.
pub fn try_normalize(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Number(value) => Some(*value),
        RawValue::Text(text) => try_normalize_text(text),
    }
}

/// Normalizes free text, returning `0.0` for garbage so one bad row cannot
/// abort loading the rest of the table.
pub fn normalize_text(text: &str) -> f64 {
    try_normalize_text(text).unwrap_or(0.0)
}

/// Strips everything except digits and separators, resolves which separator
/// is the decimal one, then parses.
pub fn try_normalize_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|ch| ch.is_ascii_digit() || matches!(ch, '.' | ','))
        .collect();
    resolve_separators(&cleaned).parse::<f64>().ok()
}

/// Renders an amount for storage: period decimal, no grouping, no exponent.
///
/// Uses the shortest representation that parses back to the same `f64`, so
/// `normalize_text(&canonical_amount_text(x)) == x` for any finite
/// non-negative `x`.
pub fn canonical_amount_text(amount: f64) -> String {
    format!("{amount}")
}

// `cleaned` only holds ASCII digits, '.' and ',' so byte slicing is safe.
fn resolve_separators(cleaned: &str) -> String {
    let Some(last_comma) = cleaned.rfind(',') else {
        return cleaned.to_string();
    };

    if cleaned.contains('.') {
        return with_decimal_comma(cleaned, last_comma);
    }

    let fraction = &cleaned[last_comma + 1..];
    if fraction.len() == 2 {
        with_decimal_comma(cleaned, last_comma)
    } else {
        cleaned.replace(',', "")
    }
}

/// Treats the comma at `decimal_at` as the decimal separator and drops every
/// other separator as grouping.
fn with_decimal_comma(cleaned: &str, decimal_at: usize) -> String {
    let digits = |part: &str| -> String { part.chars().filter(char::is_ascii_digit).collect() };
    let integer = digits(&cleaned[..decimal_at]);
    let fraction = digits(&cleaned[decimal_at + 1..]);
    format!("{integer}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(normalize(&RawValue::Number(42.0)), 42.0);
        assert_eq!(normalize(&RawValue::Number(0.1)), 0.1);
        assert_eq!(normalize(&RawValue::from(7_i64)), 7.0);
        assert_eq!(normalize(&RawValue::Number(-3.5)), -3.5);
    }

    #[test]
    fn single_comma_with_two_digit_fraction_is_decimal() {
        assert_close(normalize_text("26,28"), 26.28);
    }

    #[test]
    fn period_thousands_with_comma_decimal() {
        assert_close(normalize_text("1.234,56"), 1234.56);
        assert_close(normalize_text("1.234.567,89"), 1_234_567.89);
    }

    #[test]
    fn single_comma_with_three_digit_group_is_thousands() {
        assert_close(normalize_text("1,234"), 1234.0);
        assert_close(normalize_text("1,234,567"), 1_234_567.0);
        assert_close(normalize_text("12,5"), 125.0);
    }

    #[test]
    fn currency_symbols_and_spaces_are_stripped() {
        assert_close(normalize_text("R$ 45,90"), 45.90);
        assert_close(normalize_text("  US$12.50 "), 12.5);
        assert_close(normalize_text("€ 1.000,00"), 1000.0);
    }

    #[test]
    fn periods_only_are_left_as_decimal() {
        assert_close(normalize_text("26.28"), 26.28);
        assert_close(normalize_text("100"), 100.0);
        assert_close(normalize_text("5."), 5.0);
    }

    #[test]
    fn last_comma_wins_when_several_are_present() {
        assert_close(normalize_text("1,234,56"), 1234.56);
        assert_close(normalize_text("1,234.5,6"), 12345.6);
    }

    #[test]
    fn garbage_degrades_to_zero() {
        assert_eq!(normalize_text(""), 0.0);
        assert_eq!(normalize_text("abc"), 0.0);
        assert_eq!(normalize_text("R$"), 0.0);
        assert_eq!(normalize_text("1.234.567"), 0.0);
        assert_eq!(try_normalize_text("abc"), None);
        assert_eq!(try_normalize(&RawValue::text("")), None);
    }

    #[test]
    fn minus_sign_is_stripped_like_any_other_symbol() {
        assert_close(normalize_text("-5"), 5.0);
    }

    #[test]
    fn canonical_text_reparses_to_same_value() {
        for value in [26.28, 10.0, 1234.56, 0.01, 99_999_999.99, 3.0e-7] {
            let text = canonical_amount_text(value);
            assert!(!text.contains(','), "{text}");
            assert!(!text.contains('e'), "{text}");
            assert_eq!(normalize_text(&text), value);
            assert_eq!(normalize_text(&text), normalize(&RawValue::Number(value)));
        }
    }
}
