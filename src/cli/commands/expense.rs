use expense_core::dates::format_date;
use expense_core::{distinct_categories, CoreError, Submission, SummaryService};

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::formatters::{display_date, format_amount, render_table};
use crate::cli::forms::{parse_date_arg, ExpenseForm, ExpenseFormData};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::{CliMode, ShellContext};

use super::parse_view_options;

const EMPTY_TABLE_MESSAGE: &str = "Nenhuma despesa registrada ainda.";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a new expense",
            "add [<date> <category> <amount>]",
            cmd_add,
        )
        .with_aliases(&["registrar"]),
        CommandEntry::new(
            "list",
            "List recorded expenses",
            "list [--category <name>]... [--from <date>] [--to <date>] [--json]",
            cmd_list,
        )
        .with_aliases(&["ls"]),
        CommandEntry::new(
            "delete",
            "Delete the expense at a row number",
            "delete <row>",
            cmd_delete,
        )
        .with_aliases(&["rm"]),
        CommandEntry::new(
            "categories",
            "List categories used so far",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "reload",
            "Drop the cached sheet and read it again",
            "reload",
            cmd_reload,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let today = context.service().today();
    let data = match args {
        [] if context.mode() == CliMode::Interactive => {
            let categories = context.service().categories()?;
            ExpenseForm::new(
                context.theme(),
                today,
                &categories,
                &context.config().date_display_format,
            )
            .run()?
        }
        [date, category, amount] => ExpenseFormData {
            date: parse_date_arg(date, today).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "invalid date `{date}`; use YYYY-MM-DD or DD/MM/YYYY"
                ))
            })?,
            category: category.to_string(),
            amount_text: amount.to_string(),
        },
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: add <date> <category> <amount>".into(),
            ))
        }
    };

    match context
        .service()
        .submit(data.date, &data.category, &data.amount_text)?
    {
        Submission::Recorded(record) => {
            output::success("Despesa registrada com sucesso!");
            output::info(format!(
                "{}  {}  {}",
                format_date(record.date, &context.config().date_display_format),
                record.category,
                format_amount(record.amount, context.config())
            ));
        }
        Submission::Rejected(issues) => {
            for issue in issues {
                output::error(issue);
            }
        }
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let options = parse_view_options(args, context.service().today())?;
    let table = context.service().load_table()?;
    let view = SummaryService::filter(&table, &options.filter);

    if options.json {
        let json = serde_json::to_string_pretty(&view)
            .map_err(|err| CommandError::Message(err.to_string()))?;
        output::lines(json.lines());
        return Ok(());
    }

    if table.is_empty() {
        output::info(EMPTY_TABLE_MESSAGE);
        return Ok(());
    }
    if view.is_empty() {
        output::info("Nenhuma despesa encontrada para o filtro.");
        return Ok(());
    }

    let config = context.config();
    let rows: Vec<Vec<String>> = view
        .iter()
        .map(|entry| {
            let mut amount = format_amount(entry.amount, config);
            if entry.degraded {
                amount.push_str(" *");
            }
            vec![
                (entry.position + 1).to_string(),
                display_date(entry, config),
                entry.category.clone(),
                amount,
            ]
        })
        .collect();

    output::section("Despesas Registradas");
    output::lines(render_table(
        &["#", "Data", "Tipo", "Valor"],
        &rows,
        &[true, false, false, true],
    ));
    output::info(format!(
        "{} despesa(s), total {}",
        view.len(),
        format_amount(SummaryService::total(&view), config)
    ));
    if view.degraded_count() > 0 {
        output::warning("* valor ilegível na planilha, contado como 0");
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let row_text = match args {
        [row] => row.to_string(),
        [] if context.mode() == CliMode::Interactive => {
            io::prompt_text(context.theme(), "Linha a remover", None, |value| {
                parse_row_number(value).map(|_| ())
            })?
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: delete <row>".into(),
            ))
        }
    };
    let position = parse_row_number(&row_text).map_err(CommandError::InvalidArguments)?;

    let table = context.service().load_table()?;
    let entry = table
        .entry(position)
        .ok_or(CoreError::RowNotFound(position))?;
    let summary = format!(
        "{}  {}  {}",
        display_date(entry, context.config()),
        entry.category,
        format_amount(entry.amount, context.config())
    );

    if !context.confirm(&format!("Remover {summary}?"))? {
        output::info("Nada removido.");
        return Ok(());
    }

    context.service().delete(position)?;
    output::success(format!("Despesa removida: {summary}"));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let table = context.service().load_table()?;
    let categories = distinct_categories(&table);
    if categories.is_empty() {
        output::info(EMPTY_TABLE_MESSAGE);
        return Ok(());
    }
    output::section("Tipos");
    output::lines(categories);
    Ok(())
}

fn cmd_reload(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.service().reload();
    let table = context.service().load_table()?;
    output::success(format!("Planilha recarregada: {} linha(s).", table.len()));
    Ok(())
}

/// Row numbers are shown starting at 1; positions start at 0.
fn parse_row_number(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(format!("row must be a number starting at 1, got `{}`", value.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_numbers_are_one_based() {
        assert_eq!(parse_row_number("1"), Ok(0));
        assert_eq!(parse_row_number(" 12 "), Ok(11));
        assert!(parse_row_number("0").is_err());
        assert!(parse_row_number("-1").is_err());
        assert!(parse_row_number("dois").is_err());
    }
}
