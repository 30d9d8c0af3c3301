use expense_config::Config;
use expense_storage_json::sheet_file_path;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|get <key>|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        return show_config(context);
    }

    match args[0].to_lowercase().as_str() {
        "get" => {
            let key = args.get(1).ok_or_else(|| {
                CommandError::InvalidArguments("usage: config get <key>".into())
            })?;
            let value = context.config().get(key)?;
            output::lines([format!("{key} = {value}")]);
            Ok(())
        }
        "set" => {
            if args.len() < 2 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <key> <value>; keys: {}",
                    Config::KEYS.join(", ")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            let mut config = context.config().clone();
            config.set(key, &value)?;
            context.update_config(config)?;
            output::success(format!(
                "{key} set to `{}`.",
                context.config().get(key)?
            ));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`"
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let config = context.config();
    output::section("Configuração");
    let mut lines = Vec::with_capacity(Config::KEYS.len() + 1);
    for key in Config::KEYS {
        lines.push(format!("  {:<20} {}", key, config.get(key)?));
    }
    lines.push(format!(
        "  {:<20} {}",
        "sheet_path",
        sheet_file_path(&config.resolve_data_dir(context.home()), &config.sheet_name).display()
    ));
    output::lines(lines);
    Ok(())
}
