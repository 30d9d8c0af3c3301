use chrono::{Duration, NaiveDate};
use expense_core::{
    amount::{canonical_amount_text, normalize, normalize_text},
    validation::{messages, parse_entry_amount, validate},
};
use expense_domain::RawValue;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
}

#[test]
fn numeric_cells_normalize_to_themselves() {
    for n in [0.0, 1.0, 26.28, 1e9, 123_456.789] {
        assert_eq!(normalize(&RawValue::Number(n)), n);
    }
    for n in [0_i64, 5, 1_000_000] {
        assert_eq!(normalize(&RawValue::from(n)), n as f64);
    }
}

#[test]
fn reference_text_inputs() {
    assert_eq!(normalize_text("26,28"), 26.28);
    assert_eq!(normalize_text("1.234,56"), 1234.56);
    assert_eq!(normalize_text("1,234"), 1234.0);
    assert_eq!(normalize_text("R$ 45,90"), 45.90);
    assert_eq!(normalize_text(""), 0.0);
    assert_eq!(normalize_text("abc"), 0.0);
}

#[test]
fn renormalizing_canonical_text_is_a_no_op() {
    for typed in ["26,28", "10.00", "0,5", "1500", "99.99"] {
        let amount = parse_entry_amount(typed).expect("valid entry");
        let canonical = canonical_amount_text(amount);
        let once = normalize_text(&canonical);
        assert_eq!(once, normalize(&RawValue::Number(once)));
        assert_eq!(normalize_text(&canonical_amount_text(once)), once);
    }
}

#[test]
fn validation_messages_match_reference_cases() {
    let future = today() + Duration::days(1);
    assert_eq!(
        messages(&validate(future, "Food", "10.00", today())),
        vec!["Data não pode ser futura"]
    );
    assert_eq!(
        messages(&validate(today(), "", "10.00", today())),
        vec!["Tipo não pode estar vazio"]
    );
    assert_eq!(
        messages(&validate(today(), "Food", "-5", today())),
        vec!["Valor deve ser positivo"]
    );
    assert_eq!(
        messages(&validate(today(), "Food", "abc", today())),
        vec!["Valor deve ser um número"]
    );
    assert_eq!(
        messages(&validate(today(), "", "abc", today())),
        vec!["Tipo não pode estar vazio", "Valor deve ser um número"]
    );
    assert!(validate(today(), "Food", "26,28", today()).is_empty());
}
