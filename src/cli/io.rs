use std::fmt;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::core::CommandError;
use crate::cli::output;

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

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

/// Prompt the user for free-form text input, allowing an empty answer.
pub fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> Result<String, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(CommandError::from)
}

/// Prompt until the answer parses as a non-negative amount.
pub fn prompt_amount(theme: &ColorfulTheme, prompt: &str) -> Result<f64, CommandError> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), String> {
            crate::cli::formatting::parse_amount(input).map(|_| ())
        })
        .interact_text()
        .map_err(CommandError::from)
        .and_then(|raw| {
            crate::cli::formatting::parse_amount(&raw).map_err(CommandError::InvalidArguments)
        })
}

/// Let the user pick one of `items`; `None` when cancelled.
pub fn select(
    theme: &ColorfulTheme,
    prompt: &str,
    items: &[String],
) -> Result<Option<usize>, CommandError> {
    Select::with_theme(theme)
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact_opt()
        .map_err(CommandError::from)
}
