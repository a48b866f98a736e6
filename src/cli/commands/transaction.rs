use crate::cli::commands::take_option;
use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::formatting::{self, fit};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::domain::transaction::{NewTransaction, Transaction, TransactionId, TransactionKind};

const ADD_USAGE: &str = "add <income|expense> <amount> [description...] [--category <name>]";
const DELETE_USAGE: &str = "delete <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandEntry::new("delete", "Delete a transaction by id", DELETE_USAGE, cmd_delete),
        CommandEntry::new("remove", "Alias for `delete`", DELETE_USAGE, cmd_delete),
        CommandEntry::new(
            "list",
            "List transactions, newest first",
            "list [income|expense] [--limit <n>]",
            cmd_list,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = if args.is_empty() && context.mode() == CliMode::Interactive {
        match prompt_draft(context)? {
            Some(draft) => draft,
            None => return Ok(()),
        }
    } else {
        parse_draft(args)?
    };

    let message = {
        let (currency, locale) = (context.config.currency.clone(), context.config.locale.clone());
        let txn = context.store.add(draft)?;
        format!(
            "Recorded {} #{}: {}{}",
            txn.kind.to_string().to_lowercase(),
            txn.id,
            formatting::format_amount(txn.amount, &currency, &locale),
            describe_suffix(txn)
        )
    };
    io::print_success(message);
    print_balance_line(context);
    Ok(())
}

pub(crate) fn parse_draft(args: &[&str]) -> Result<NewTransaction, CommandError> {
    let (positional, category) =
        take_option(args, "--category", "-c").map_err(CommandError::InvalidArguments)?;
    let [kind, amount, description @ ..] = positional.as_slice() else {
        return Err(CommandError::InvalidArguments(format!("usage: {ADD_USAGE}")));
    };
    let kind: TransactionKind = kind
        .parse()
        .map_err(|err: crate::domain::transaction::ParseKindError| {
            CommandError::InvalidArguments(err.to_string())
        })?;
    let amount = formatting::parse_amount(amount).map_err(CommandError::InvalidArguments)?;

    let mut draft = NewTransaction::new(kind, amount).with_description(description.join(" "));
    if let Some(category) = category {
        draft = draft.with_category(category);
    }
    Ok(draft)
}

fn prompt_draft(context: &ShellContext) -> Result<Option<NewTransaction>, CommandError> {
    let kinds = [TransactionKind::Income, TransactionKind::Expense];
    let labels: Vec<String> = kinds.iter().map(|kind| kind.to_string()).collect();
    let Some(choice) = io::select(&context.theme, "Type", &labels)? else {
        return Ok(None);
    };
    let amount = io::prompt_amount(&context.theme, "Amount")?;
    let description = io::prompt_text(&context.theme, "Description")?;
    let category = io::prompt_text(&context.theme, "Category (optional)")?;
    Ok(Some(
        NewTransaction::new(kinds[choice], amount)
            .with_description(description)
            .with_category(category),
    ))
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = match args.first() {
        Some(raw) => raw.parse::<TransactionId>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a transaction id"))
        })?,
        None if context.mode() == CliMode::Interactive => match select_transaction(context)? {
            Some(id) => id,
            None => return Ok(()),
        },
        None => return Err(CommandError::InvalidArguments(format!("usage: {DELETE_USAGE}"))),
    };

    match context.store.delete(id) {
        Some(removed) => {
            io::print_success(format!(
                "Deleted {} #{}: {}{}",
                removed.kind.to_string().to_lowercase(),
                removed.id,
                context.format_amount(removed.amount),
                describe_suffix(&removed)
            ));
            print_balance_line(context);
        }
        None => io::print_warning(format!("No transaction with id {id}.")),
    }
    Ok(())
}

fn select_transaction(context: &ShellContext) -> Result<Option<TransactionId>, CommandError> {
    let transactions = context.store.transactions();
    if transactions.is_empty() {
        io::print_info("No transactions recorded yet.");
        return Ok(None);
    }
    let labels: Vec<String> = transactions
        .iter()
        .map(|txn| {
            format!(
                "{} {} {}{}",
                formatting::format_date(txn.date),
                txn.kind,
                context.format_amount(txn.amount),
                describe_suffix(txn)
            )
        })
        .collect();
    let choice = io::select(&context.theme, "Delete which transaction?", &labels)?;
    Ok(choice.map(|idx| transactions[idx].id))
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, limit) =
        take_option(args, "--limit", "-n").map_err(CommandError::InvalidArguments)?;
    let kind = match positional.first() {
        Some(raw) => Some(raw.parse::<TransactionKind>().map_err(|err| {
            CommandError::InvalidArguments(err.to_string())
        })?),
        None => None,
    };
    let limit = match limit {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments(format!("`{raw}` is not a valid limit"))
        })?,
        None => usize::MAX,
    };

    let rows: Vec<&Transaction> = context
        .store
        .transactions()
        .iter()
        .filter(|txn| kind.map_or(true, |kind| txn.kind == kind))
        .take(limit)
        .collect();

    if rows.is_empty() {
        io::print_info("No transactions recorded yet.");
        return Ok(());
    }

    output_section("Transactions");
    io::print_info(format!(
        "{}  {}  {}  {}  {}",
        fit("ID", 14),
        fit("Date", 16),
        fit("Type", 7),
        fit("Amount", 14),
        "Description"
    ));
    for txn in rows {
        let amount = fit(&context.format_amount(txn.amount), 14);
        let amount = match txn.kind {
            TransactionKind::Income => output::signed(txn.amount, amount),
            TransactionKind::Expense => output::signed(-txn.amount, amount),
        };
        io::print_info(format!(
            "{}  {}  {}  {}  {}",
            fit(&txn.id.to_string(), 14),
            fit(&formatting::format_date(txn.date), 16),
            fit(&txn.kind.to_string(), 7),
            amount,
            describe(txn)
        ));
    }
    Ok(())
}

fn describe(txn: &Transaction) -> String {
    match &txn.category {
        Some(category) if txn.description.is_empty() => format!("[{category}]"),
        Some(category) => format!("{} [{category}]", txn.description),
        None => txn.description.clone(),
    }
}

fn describe_suffix(txn: &Transaction) -> String {
    let text = describe(txn);
    if text.is_empty() {
        text
    } else {
        format!(" ({text})")
    }
}

pub(crate) fn print_balance_line(context: &ShellContext) {
    let balance = context.store.summary().balance;
    io::print_info(format!(
        "Balance: {}",
        output::signed(balance, context.format_amount(balance))
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_draft_joins_description_words() {
        let draft = parse_draft(&["expense", "12.50", "bus", "fare", "-c", "Transport"]).unwrap();
        assert_eq!(draft.kind, TransactionKind::Expense);
        assert_eq!(draft.amount, 12.5);
        assert_eq!(draft.description, "bus fare");
        assert_eq!(draft.category.as_deref(), Some("Transport"));
    }

    #[test]
    fn parse_draft_requires_kind_and_amount() {
        assert!(matches!(
            parse_draft(&["income"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_draft(&["gift", "10"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_draft(&["income", "-10"]),
            Err(CommandError::InvalidArguments(_))
        ));
    }
}
