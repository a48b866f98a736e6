use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::formatting::fit;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "backup",
        "List or restore previous versions of the data file",
        "backup <list | restore [name]>",
        cmd_backup,
    )]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["list"] => list(context),
        ["restore"] if context.mode() == CliMode::Interactive => {
            match pick_backup(context)? {
                Some(name) => restore(context, &name),
                None => Ok(()),
            }
        }
        ["restore", name] => restore(context, name),
        _ => Err(CommandError::InvalidArguments(
            "usage: backup <list | restore [name]>".into(),
        )),
    }
}

fn list(context: &ShellContext) -> CommandResult {
    let backups = context.storage.list_backups()?;
    if backups.is_empty() {
        io::print_info("No backups yet.");
        return Ok(());
    }
    output_section("Backups");
    for backup in backups {
        let modified = backup
            .modified
            .map(crate::cli::formatting::format_date)
            .unwrap_or_else(|| "-".into());
        io::print_info(format!(
            "  {}  {}  {:>8} bytes",
            fit(&backup.name, 40),
            modified,
            backup.size_bytes
        ));
    }
    Ok(())
}

fn pick_backup(context: &ShellContext) -> Result<Option<String>, CommandError> {
    let names: Vec<String> = context
        .storage
        .list_backups()?
        .into_iter()
        .map(|backup| backup.name)
        .collect();
    if names.is_empty() {
        io::print_info("No backups yet.");
        return Ok(None);
    }
    let choice = io::select(&context.theme, "Restore which backup?", &names)?;
    Ok(choice.map(|idx| names[idx].clone()))
}

fn restore(context: &mut ShellContext, name: &str) -> CommandResult {
    if !context.confirm(&format!("Replace current transactions with `{name}`?"))? {
        return Ok(());
    }
    let restored = context.storage.restore_backup(name)?;
    context.store.reload();
    context.report_load_outcome();
    io::print_success(format!(
        "Restored {} transaction{} from `{name}`.",
        restored.len(),
        if restored.len() == 1 { "" } else { "s" }
    ));
    Ok(())
}
