use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Comandos disponíveis");
    for entry in registry.list() {
        output::lines([format!("  {:<12} {}", entry.name, entry.description)]);
    }
    output::hint("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::lines([
        format!("  Description: {}", entry.description),
        format!("  Usage: {}", entry.usage),
    ]);
    if !entry.aliases.is_empty() {
        output::lines([format!("  Aliases: {}", entry.aliases.join(", "))]);
    }
}
