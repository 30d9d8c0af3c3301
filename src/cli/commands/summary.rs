use expense_core::dates::format_date;
use expense_core::{ExpenseFilter, SummaryService};
use serde_json::json;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::formatters::{format_amount, render_bars};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

use super::parse_view_options;

const BAR_WIDTH: usize = 30;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show totals per category",
            "summary [--category <name>]... [--from <date>] [--to <date>] [--json]",
            cmd_summary,
        )
        .with_aliases(&["resumo"]),
        CommandEntry::new(
            "chart",
            "Chart daily totals",
            "chart [--category <name>]... [--from <date>] [--to <date>] [--json]",
            cmd_chart,
        )
        .with_aliases(&["grafico"]),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let options = parse_view_options(args, context.service().today())?;
    let table = context.service().load_table()?;
    let view = SummaryService::filter(&table, &options.filter);
    let totals = SummaryService::totals_by_category(&view);
    let grand_total = SummaryService::total(&view);

    if options.json {
        let rows: Vec<_> = totals
            .iter()
            .map(|row| json!({ "category": row.category, "total": row.total, "count": row.count }))
            .collect();
        return print_json(&json!({ "categories": rows, "total": grand_total }));
    }

    if totals.is_empty() {
        output::info(empty_message(&options.filter));
        return Ok(());
    }

    let config = context.config();
    let items: Vec<(String, f64, String)> = totals
        .iter()
        .map(|row| {
            (
                row.category.clone(),
                row.total,
                format!("{} ({})", format_amount(row.total, config), row.count),
            )
        })
        .collect();

    output::section("Gastos por Tipo");
    output::lines(render_bars(&items, BAR_WIDTH));
    output::info(format!("Total: {}", format_amount(grand_total, config)));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let options = parse_view_options(args, context.service().today())?;
    let table = context.service().load_table()?;
    let view = SummaryService::filter(&table, &options.filter);
    let totals = SummaryService::totals_by_date(&view);

    if options.json {
        let rows: Vec<_> = totals
            .iter()
            .map(|row| {
                let categories: Vec<_> = row
                    .categories
                    .iter()
                    .map(|split| json!({ "category": split.category, "total": split.total }))
                    .collect();
                json!({
                    "date": row.date.to_string(),
                    "total": row.total,
                    "categories": categories,
                })
            })
            .collect();
        return print_json(&json!({ "dates": rows }));
    }

    if totals.is_empty() {
        output::info(empty_message(&options.filter));
        return Ok(());
    }

    let config = context.config();
    let items: Vec<(String, f64, String)> = totals
        .iter()
        .map(|row| {
            (
                format_date(row.date, &config.date_display_format),
                row.total,
                format_amount(row.total, config),
            )
        })
        .collect();

    output::section("Despesas por Data");
    for (bar, row) in render_bars(&items, BAR_WIDTH).into_iter().zip(&totals) {
        output::lines([bar]);
        if row.categories.len() > 1 {
            let split: Vec<String> = row
                .categories
                .iter()
                .map(|part| format!("{} {}", part.category, format_amount(part.total, config)))
                .collect();
            output::lines([format!("    {}", split.join(" | "))]);
        }
    }
    Ok(())
}

fn empty_message(filter: &ExpenseFilter) -> &'static str {
    if filter.is_empty() {
        "Nenhuma despesa registrada ainda."
    } else {
        "Nenhuma despesa encontrada para o filtro."
    }
}

fn print_json(value: &serde_json::Value) -> CommandResult {
    let text =
        serde_json::to_string_pretty(value).map_err(|err| CommandError::Message(err.to_string()))?;
    output::lines(text.lines());
    Ok(())
}
