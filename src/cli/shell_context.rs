use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use dialoguer::{theme::ColorfulTheme, Confirm};
use expense_config::{Config, ConfigManager};
use expense_core::{CachedSheet, Clock, ExpenseService};
use expense_storage_json::JsonSheetStorage;
use strsim::levenshtein;
use tracing::debug;

use crate::cli::commands;
use crate::cli::core::{CommandError, LoopControl};
use crate::cli::io as cli_io;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandRegistry;
use crate::cli::system_clock::SystemClock;
use crate::errors::{AppError, CliError};
use crate::utils::paths::app_home;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler needs: the expense service, configuration
/// and the command registry.
pub struct ShellContext {
    mode: CliMode,
    pub(crate) running: bool,
    pub(crate) last_command: Option<String>,
    registry: CommandRegistry,
    home: PathBuf,
    clock: Arc<dyn Clock>,
    config_manager: ConfigManager,
    config: Config,
    service: ExpenseService,
    theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_home(mode, app_home(), Arc::new(SystemClock))
    }

    /// Builds a context rooted at `home` using `clock` for "today".
    pub fn with_home(
        mode: CliMode,
        home: PathBuf,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(&home)?;
        let config = config_manager.load()?;
        let service = build_service(&config, &home, clock.clone())?;

        let mut registry = CommandRegistry::new();
        for entry in commands::all_definitions() {
            registry.register(entry);
        }

        let context = Self {
            mode,
            running: true,
            last_command: None,
            registry,
            home,
            clock,
            config_manager,
            config,
            service,
            theme: ColorfulTheme::default(),
        };
        context.apply_output_preferences();
        Ok(context)
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &ExpenseService {
        &self.service
    }

    pub fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn prompt(&self) -> String {
        format!("despesas ({})> ", self.config.sheet_name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    /// Persists `config` and rebuilds the service so sheet and cache changes
    /// take effect immediately.
    pub(crate) fn update_config(&mut self, config: Config) -> Result<(), CommandError> {
        let service = build_service(&config, &self.home, self.clock.clone())?;
        self.config_manager.save(&config)?;
        self.config = config;
        self.service = service;
        self.apply_output_preferences();
        Ok(())
    }

    fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color_enabled: self.config.ui_color_enabled && self.mode == CliMode::Interactive,
        });
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = crate::cli::shell::parse_command_line(line)
            .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .into_iter()
            .map(|key| (levenshtein(key, input), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Sair?")
            .default(true)
            .interact()
            .map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                if let Some(line) = &self.last_command {
                    debug!(command = %line, error = %other, "command failed");
                }
                output::error(other);
                Ok(())
            }
        }
    }
}

fn build_service(
    config: &Config,
    home: &Path,
    clock: Arc<dyn Clock>,
) -> Result<ExpenseService, AppError> {
    let storage = JsonSheetStorage::new(&config.resolve_data_dir(home), &config.sheet_name)?;
    debug!(path = %storage.sheet_path().display(), "opening expense sheet");
    let cached = CachedSheet::new(
        storage,
        clock.clone(),
        Duration::from_secs(config.cache_ttl_seconds),
    );
    Ok(ExpenseService::new(Box::new(cached), clock))
}
