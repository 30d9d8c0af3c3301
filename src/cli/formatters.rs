//! Text rendering for amounts, dates, tables and bar charts.

use expense_config::Config;
use expense_core::dates::format_date;
use expense_domain::ExpenseEntry;

const BAR_GLYPH: char = '█';
const AMOUNT_PRECISION: usize = 2;

/// Renders `amount` with the configured symbol and separators, e.g. `R$ 1.234,56`.
pub fn format_amount(amount: f64, config: &Config) -> String {
    let body = format_number(
        amount.abs(),
        config.decimal_separator,
        config.grouping_separator,
    );
    let sign = if amount < 0.0 { "-" } else { "" };
    if config.currency_symbol.is_empty() {
        format!("{sign}{body}")
    } else {
        format!("{sign}{} {body}", config.currency_symbol)
    }
}

pub fn format_number(value: f64, decimal_separator: char, grouping_separator: char) -> String {
    let body = format!("{:.*}", AMOUNT_PRECISION, value);
    let (int_part, fraction) = body.split_once('.').unwrap_or((body.as_str(), ""));
    let grouped = group_digits(int_part, grouping_separator);
    if fraction.is_empty() {
        grouped
    } else {
        format!("{grouped}{decimal_separator}{fraction}")
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Parsed dates use the configured format; unparsed ones show the stored text.
pub fn display_date(entry: &ExpenseEntry, config: &Config) -> String {
    match entry.date {
        Some(date) => format_date(date, &config.date_display_format),
        None if entry.raw_date.trim().is_empty() => "-".into(),
        None => entry.raw_date.clone(),
    }
}

/// Lays out `rows` under `headers`; columns flagged in `right_align` are
/// right-justified.
pub fn render_table(
    headers: &[&str],
    rows: &[Vec<String>],
    right_align: &[bool],
) -> Vec<String> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let width = widths.get(idx).copied().unwrap_or(0);
                if right_align.get(idx).copied().unwrap_or(false) {
                    pad_left(cell, width)
                } else {
                    pad_right(cell, width)
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(headers.to_vec()));
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render_row(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// One horizontal bar per `(label, value, value_text)`, scaled so the largest
/// value spans `max_width` glyphs.
pub fn render_bars(items: &[(String, f64, String)], max_width: usize) -> Vec<String> {
    let label_width = items
        .iter()
        .map(|(label, _, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let peak = items
        .iter()
        .map(|(_, value, _)| *value)
        .fold(0.0_f64, f64::max);

    items
        .iter()
        .map(|(label, value, text)| {
            let length = if peak > 0.0 && *value > 0.0 {
                (((*value / peak) * max_width as f64).round() as usize).max(1)
            } else {
                0
            };
            let bar: String = std::iter::repeat(BAR_GLYPH).take(length).collect();
            format!(
                "{}  {}{}  {}",
                pad_right(label, label_width),
                bar,
                " ".repeat(max_width.saturating_sub(length)),
                text
            )
        })
        .collect()
}

fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn pad_left(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{text}", " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn entry(date: Option<NaiveDate>, raw: &str) -> ExpenseEntry {
        ExpenseEntry {
            position: 0,
            date,
            raw_date: raw.into(),
            category: "Luz".into(),
            amount: 1.0,
            degraded: false,
        }
    }

    #[test]
    fn amounts_use_brazilian_separators_by_default() {
        let config = Config::default();
        assert_eq!(format_amount(1234.56, &config), "R$ 1.234,56");
        assert_eq!(format_amount(26.28, &config), "R$ 26,28");
        assert_eq!(format_amount(0.0, &config), "R$ 0,00");
        assert_eq!(format_amount(-1_000_000.0, &config), "-R$ 1.000.000,00");
    }

    #[test]
    fn amounts_follow_configured_separators() {
        let mut config = Config::default();
        config.currency_symbol = String::new();
        config.decimal_separator = '.';
        config.grouping_separator = ',';
        assert_eq!(format_amount(1234.5, &config), "1,234.50");
    }

    #[test]
    fn dates_fall_back_to_raw_text() {
        let config = Config::default();
        let date = NaiveDate::from_ymd_opt(2025, 2, 3);
        assert_eq!(display_date(&entry(date, "2025-02-03"), &config), "03/02/2025");
        assert_eq!(display_date(&entry(None, "ontem"), &config), "ontem");
        assert_eq!(display_date(&entry(None, " "), &config), "-");
    }

    #[test]
    fn table_columns_are_aligned() {
        let rows = vec![
            vec!["1".to_string(), "Mercado".to_string(), "R$ 10,00".to_string()],
            vec!["2".to_string(), "Luz".to_string(), "R$ 120,00".to_string()],
        ];
        let lines = render_table(&["#", "Tipo", "Valor"], &rows, &[true, false, true]);
        assert_eq!(lines[0], "#  Tipo         Valor");
        assert_eq!(lines[1], "-  -------  ---------");
        assert_eq!(lines[2], "1  Mercado   R$ 10,00");
        assert_eq!(lines[3], "2  Luz      R$ 120,00");
    }

    #[test]
    fn bars_scale_to_the_largest_value() {
        let items = vec![
            ("Luz".to_string(), 100.0, "100".to_string()),
            ("Gás".to_string(), 50.0, "50".to_string()),
            ("Nada".to_string(), 0.0, "0".to_string()),
        ];
        let lines = render_bars(&items, 4);
        assert_eq!(lines[0], "Luz   ████  100");
        assert_eq!(lines[1], "Gás   ██    50");
        assert_eq!(lines[2], "Nada        0");
    }
}
