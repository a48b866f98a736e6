use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;

fn cli(home: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tracker_core_cli").unwrap();
    cmd.env("TRACKER_CORE_CLI_SCRIPT", "1")
        .env("TRACKER_CORE_HOME", home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn script_mode_records_and_summarizes() {
    let home = assert_fs::TempDir::new().unwrap();
    let input = "\
# monthly budget
add income 1000 Salary
add expense 300 \"Weekly groceries\" --category Food
summary --by-category
list
exit
";

    cli(&home)
        .write_stdin(input)
        .assert()
        .success()
        .stdout(contains("Recorded income"))
        .stdout(contains("Recorded expense"))
        .stdout(contains("Balance: $700.00"))
        .stdout(contains("Weekly groceries [Food]"))
        .stdout(contains("=== Expense by category ==="));

    home.child("transactions.json")
        .assert(predicate::path::is_file())
        .assert(contains("\"EXPENSE\""))
        .assert(contains("Weekly groceries"));
}

#[test]
fn data_survives_between_runs() {
    let home = assert_fs::TempDir::new().unwrap();
    cli(&home)
        .write_stdin("add income 250.5 Refund\nexit\n")
        .assert()
        .success();

    cli(&home)
        .write_stdin("summary\n")
        .assert()
        .success()
        .stdout(contains("Income : $250.50"))
        .stdout(contains("Balance: $250.50"));
}

#[test]
fn bad_input_is_reported_without_aborting() {
    let home = assert_fs::TempDir::new().unwrap();
    cli(&home)
        .write_stdin("add expense ten\nsumary\ndelete 42\nadd expense 5 Coffee\n")
        .assert()
        .success()
        .stderr(contains("[x]"))
        .stdout(contains("Suggestion: `summary`?"))
        .stdout(contains("No transaction with id 42."))
        .stdout(contains("Recorded expense"));
}

#[test]
fn corrupt_data_file_starts_empty() {
    let home = assert_fs::TempDir::new().unwrap();
    home.child("transactions.json").write_str("not json").unwrap();

    cli(&home)
        .write_stdin("summary\n")
        .assert()
        .success()
        .stdout(contains("could not be read"))
        .stdout(contains("Balance: $0.00"));
}

#[test]
fn config_set_changes_currency() {
    let home = assert_fs::TempDir::new().unwrap();
    cli(&home)
        .write_stdin("config set currency EUR\nadd income 10\n")
        .assert()
        .success()
        .stdout(contains("Updated `currency`."))
        .stdout(contains("€10.00"));

    home.child("config.json").assert(contains("EUR"));
}

#[test]
fn config_locale_changes_separators() {
    let home = assert_fs::TempDir::new().unwrap();
    cli(&home)
        .write_stdin("config set locale de-DE\nadd income 1234.5 Bonus\n")
        .assert()
        .success()
        .stdout(contains("$1.234,50"));
}
