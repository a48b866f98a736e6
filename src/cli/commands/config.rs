use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::config::CONFIG_KEYS;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change settings",
        "config [show | set <currency|locale|data_file|backup_retention> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => set(context, key, &value.join(" ")),
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show | set <{}> <value>]",
            CONFIG_KEYS.join("|")
        ))),
    }
}

fn show(context: &ShellContext) {
    output_section("Configuration");
    io::print_info(format!("  Config file     : {}", context.config_manager.path().display()));
    io::print_info(format!("  Currency        : {}", context.config.currency));
    io::print_info(format!("  Locale          : {}", context.config.locale));
    io::print_info(format!("  Data file       : {}", context.storage.data_file().display()));
    io::print_info(format!("  Backup retention: {}", context.config.backup_retention));
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config_manager.save(&updated)?;
    let reopen = updated.data_file != context.config.data_file
        || updated.backup_retention != context.config.backup_retention;
    context.config = updated;
    if reopen {
        context.reopen_storage()?;
    }
    io::print_success(format!("Updated `{key}`."));
    Ok(())
}
