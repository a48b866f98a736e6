pub mod backup;
pub mod config;
pub mod summary;
pub mod system;
pub mod transaction;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(transaction::definitions());
    commands.extend(summary::definitions());
    commands.extend(config::definitions());
    commands.extend(backup::definitions());
    commands.extend(system::definitions());
    commands
}

/// Splits `--flag value` pairs out of `args`, returning the remaining
/// positional arguments and the value of `flag` if present.
pub(crate) fn take_option<'a>(
    args: &[&'a str],
    long: &str,
    short: &str,
) -> Result<(Vec<&'a str>, Option<&'a str>), String> {
    let mut positional = Vec::with_capacity(args.len());
    let mut value = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if *arg == long || *arg == short {
            match iter.next() {
                Some(next) => value = Some(*next),
                None => return Err(format!("`{long}` needs a value")),
            }
        } else {
            positional.push(*arg);
        }
    }
    Ok((positional, value))
}
