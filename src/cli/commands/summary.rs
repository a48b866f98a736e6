use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatting::fit;
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::core::services::SummaryService;
use crate::domain::transaction::TransactionKind;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "summary",
        "Show total income, total expense and balance",
        "summary [--by-category]",
        cmd_summary,
    )]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let by_category = match args {
        [] => false,
        ["--by-category"] => true,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: summary [--by-category]".into(),
            ))
        }
    };

    let summary = context.store.summary();
    output_section("Summary");
    io::print_info(format!(
        "  Income : {}",
        context.format_amount(summary.total_income)
    ));
    io::print_info(format!(
        "  Expense: {}",
        context.format_amount(summary.total_expense)
    ));
    io::print_info(format!(
        "  Balance: {}",
        output::signed(summary.balance, context.format_amount(summary.balance))
    ));

    if by_category {
        for kind in [TransactionKind::Income, TransactionKind::Expense] {
            let totals = SummaryService::by_category(context.store.ledger(), kind);
            if totals.is_empty() {
                continue;
            }
            output_section(format!("{kind} by category"));
            for total in totals {
                let label = total.category.as_deref().unwrap_or("(uncategorized)");
                io::print_info(format!(
                    "  {}  {:>14}  ({} entr{})",
                    fit(label, 20),
                    context.format_amount(total.total),
                    total.count,
                    if total.count == 1 { "y" } else { "ies" }
                ));
            }
        }
    }
    Ok(())
}
