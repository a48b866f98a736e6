use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Commands");
    for entry in registry.list() {
        io::print_info(format!("  {:<10} {}", entry.name, entry.description));
    }
    io::print_info("Type `help <command>` for usage. Press Tab or `?` to complete.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(entry.name);
    io::print_info(format!("  {}", entry.description));
    io::print_info(format!("  usage: {}", entry.usage));
}
