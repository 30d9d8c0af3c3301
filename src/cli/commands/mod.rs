pub mod config;
pub mod expense;
pub mod summary;
pub mod system;

use chrono::NaiveDate;
use expense_core::ExpenseFilter;

use crate::cli::core::CommandError;
use crate::cli::forms::parse_date_arg;
use crate::cli::registry::CommandEntry;

pub fn all_definitions() -> Vec<CommandEntry> {
    let mut entries = Vec::new();
    entries.extend(expense::definitions());
    entries.extend(summary::definitions());
    entries.extend(config::definitions());
    entries.extend(system::definitions());
    entries
}

/// Options shared by the listing and aggregation commands.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ViewOptions {
    pub filter: ExpenseFilter,
    pub json: bool,
}

/// Parses `--category <name>` (repeatable), `--from <date>`, `--to <date>`
/// and `--json`.
pub(crate) fn parse_view_options(
    args: &[&str],
    today: NaiveDate,
) -> Result<ViewOptions, CommandError> {
    let mut options = ViewOptions::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match *flag {
            "--json" => options.json = true,
            "--category" | "-c" => {
                let value = next_value(&mut iter, flag)?;
                options.filter.categories.push(value.trim().to_string());
            }
            "--from" | "--to" => {
                let value = next_value(&mut iter, flag)?;
                let date = parse_date_arg(value, today).ok_or_else(|| {
                    CommandError::InvalidArguments(format!("invalid date `{value}`"))
                })?;
                if *flag == "--from" {
                    options.filter.from = Some(date);
                } else {
                    options.filter.to = Some(date);
                }
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown option `{other}`"
                )))
            }
        }
    }
    if let (Some(from), Some(to)) = (options.filter.from, options.filter.to) {
        if from > to {
            return Err(CommandError::InvalidArguments(
                "`--from` must not be after `--to`".into(),
            ));
        }
    }
    Ok(options)
}

fn next_value<'a>(
    iter: &mut std::slice::Iter<'_, &'a str>,
    flag: &str,
) -> Result<&'a str, CommandError> {
    iter.next()
        .copied()
        .ok_or_else(|| CommandError::InvalidArguments(format!("`{flag}` expects a value")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    #[test]
    fn parses_filters_and_json_flag() {
        let args = [
            "--category", "Luz", "-c", "Gás", "--from", "01/05/2025", "--to", "hoje", "--json",
        ];
        let options = parse_view_options(&args, today()).unwrap();
        assert_eq!(options.filter.categories, vec!["Luz", "Gás"]);
        assert_eq!(options.filter.from, NaiveDate::from_ymd_opt(2025, 5, 1));
        assert_eq!(options.filter.to, Some(today()));
        assert!(options.json);
    }

    #[test]
    fn rejects_bad_options() {
        assert!(parse_view_options(&["--category"], today()).is_err());
        assert!(parse_view_options(&["--from", "someday"], today()).is_err());
        assert!(parse_view_options(&["--verbose"], today()).is_err());
        let reversed = ["--from", "2025-05-10", "--to", "2025-05-01"];
        assert!(parse_view_options(&reversed, today()).is_err());
    }
}
