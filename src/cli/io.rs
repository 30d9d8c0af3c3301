use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;

/// Prompt the user for confirmation with a yes/no question.
pub fn confirm_action(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(CommandError::from)
}

/// Prompt for free-form text, rejecting input `validate` refuses.
pub fn prompt_text<F>(
    theme: &ColorfulTheme,
    prompt: &str,
    default: Option<&str>,
    validate: F,
) -> Result<String, CommandError>
where
    F: Fn(&str) -> Result<(), String>,
{
    let mut input = Input::<String>::with_theme(theme).with_prompt(prompt);
    if let Some(value) = default {
        input = input.default(value.to_string());
    }
    input
        .validate_with(|value: &String| validate(value))
        .interact_text()
        .map_err(CommandError::from)
}

/// Pick one entry from `items`; returns its index.
pub fn select(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
) -> Result<usize, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(CommandError::from)
}
