use std::io;

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    cli::{
        commands, formatting,
        io as cli_io,
        output::{self, OutputPreferences},
        registry::{CommandEntry, CommandRegistry},
    },
    config::{Config, ConfigManager},
    core::{ledger_store::LoadOutcome, LedgerStore, SystemClock},
    errors::LedgerError,
    storage::JsonStorage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Core(err) => CliError::Core(err),
            CommandError::Io(err) => CliError::Io(err),
            other => CliError::Command(other.to_string()),
        }
    }
}

/// State shared by every command handler for the lifetime of the shell.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub storage: JsonStorage,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        output::set_preferences(OutputPreferences {
            plain: mode == CliMode::Script,
            quiet: false,
        });
        let config = config_manager.load()?;
        let storage = JsonStorage::new(
            config_manager.data_file(&config),
            config.backup_retention,
        )?;
        let store = LedgerStore::initialize(Box::new(storage.clone()), Box::new(SystemClock));
        let context = Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            storage,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        };
        context.report_load_outcome();
        Ok(context)
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn prompt(&self) -> String {
        let balance = self.store.summary().balance;
        format!("tracker [{}]> ", self.format_amount(balance))
    }

    pub fn format_amount(&self, value: f64) -> String {
        formatting::format_amount(value, &self.config.currency, &self.config.locale)
    }

    /// Reopens storage after settings that affect it have changed.
    pub fn reopen_storage(&mut self) -> Result<(), CommandError> {
        let storage = JsonStorage::new(
            self.config_manager.data_file(&self.config),
            self.config.backup_retention,
        )?;
        self.store = LedgerStore::initialize(Box::new(storage.clone()), Box::new(SystemClock));
        self.storage = storage;
        self.report_load_outcome();
        Ok(())
    }

    pub(crate) fn report_load_outcome(&self) {
        if let LoadOutcome::Recovered(reason) = self.store.load_outcome() {
            cli_io::print_warning(format!(
                "Stored transactions could not be read ({reason}); starting with an empty ledger."
            ));
        }
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

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
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
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(LedgerError::Validation(message)) => {
                self.print_error(&message);
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                self.print_warning(&err.to_string());
                return Ok(LoopControl::Continue);
            }
        };
        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }
}
