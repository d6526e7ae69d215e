//! E2E tests for the history, summary, report and schema commands

use std::process::{Command, Output};

const EXPENSES: &str = "tests/data/expense_history.json";
const SALARIES: &str = "tests/data/salary_by_currency.json";

fn ledgerview(args: &[&str]) -> Output {
    Command::new("cargo")
        .args(["run", "--"])
        .args(args)
        .env_remove("LEDGERVIEW_TOKEN")
        .env_remove("LEDGERVIEW_TOKEN_FILE")
        .env_remove("LEDGERVIEW_DEFAULT_CURRENCY")
        .output()
        .expect("Failed to execute command")
}

/// History defaults to the BDT ledger and keeps backend order
#[test]
fn history_table_default_currency() {
    let output = ledgerview(&["history", "expense", "-i", EXPENSES]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("EXPENSE HISTORY (All periods BDT)"));
    assert!(stdout.contains("Office rent"));
    assert!(stdout.contains("৳1200"));
    // USD record is filtered out by the default currency
    assert!(!stdout.contains("Domain renewal"));
    assert!(stdout.contains("4 of 5 records"));

    let rent = stdout.find("Office rent").unwrap();
    let stationery = stdout.find("Stationery").unwrap();
    assert!(rent < stationery);
}

/// CSV output keeps placeholders and currency signs
#[test]
fn history_csv_any_currency() {
    let output = ledgerview(&["history", "expense", "-i", EXPENSES, "--any-currency", "--csv"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Date,Purpose,Paid To,Currency,Amount");
    assert_eq!(lines.len(), 6);
    assert!(stdout.contains("Domain renewal,Registrar,USD,$15"));
    assert!(stdout.contains("2024-03-20,Broken import,-,BDT,৳abc"));
    // total is read when amount is absent
    assert!(stdout.contains("Stationery,Book store,BDT,৳40"));
}

/// An exact date clears year and month and matches datetime start dates
#[test]
fn history_json_by_date() {
    let output = ledgerview(&[
        "history",
        "expense",
        "-i",
        EXPENSES,
        "--any-currency",
        "-d",
        "2024-03-02",
        "--json",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let rows: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["purpose"], "Domain renewal");
    assert_eq!(rows[0]["currency_title"], "USD");
}

#[test]
fn date_conflicts_with_year() {
    let output = ledgerview(&[
        "history", "expense", "-i", EXPENSES, "-d", "2024-03-01", "-y", "2024",
    ]);
    assert!(!output.status.success());
}

/// Non-numeric amounts count as zero
#[test]
fn summary_json_totals() {
    let output = ledgerview(&["summary", "expense", "-i", EXPENSES, "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(summary["ledger"], "Expense");
    assert_eq!(summary["record_count"], 4);
    let currencies = summary["currencies"].as_array().unwrap();
    assert_eq!(currencies.len(), 1);
    assert_eq!(currencies[0]["currency"], "BDT");
    assert_eq!(currencies[0]["totals"][0]["field"], "amount");
    assert_eq!(currencies[0]["totals"][0]["total"], "1250.5");
}

#[test]
fn summary_by_month_has_running_totals() {
    let output = ledgerview(&["summary", "expense", "-i", EXPENSES, "--by", "month"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("EXPENSE SUMMARY (All periods BDT)"));
    assert!(stdout.contains("amount: ৳1250.50"));
    assert!(stdout.contains("BY MONTH"));
    assert!(stdout.contains("2024-03"));
    assert!(stdout.contains("2024-04"));
    assert!(stdout.contains("৳1210.50"));
    assert!(stdout.contains("amount (running)"));
}

/// Currency-keyed salary data is split per currency, in key order
#[test]
fn summary_salary_per_currency() {
    let output = ledgerview(&["summary", "salary", "-i", SALARIES, "--any-currency"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("BDT - 2 records"));
    assert!(stdout.contains("amount: ৳100000.00"));
    assert!(stdout.contains("bonus: ৳5000.00"));
    assert!(stdout.contains("USD - 1 records"));
    assert!(stdout.contains("deduction: $150.00"));
    assert!(stdout.find("BDT - 2").unwrap() < stdout.find("USD - 1").unwrap());
}

#[test]
fn summary_empty_selection_reports_zero() {
    let output = ledgerview(&["summary", "expense", "-i", EXPENSES, "-y", "2019"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("No records found matching filters"));
    assert!(stdout.contains("BDT - 0 records"));
}

/// Layout files drive the projected columns
#[test]
fn report_csv_with_layout_file() {
    let output = ledgerview(&[
        "report",
        "expense",
        "-i",
        EXPENSES,
        "--any-currency",
        "-l",
        "tests/data/audit_layout.json",
        "--csv",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Purpose,Paid To,Amount");
    assert_eq!(lines[1], "Office rent,Landlord,৳1200");
    assert_eq!(lines[3], "Broken import,-,৳abc");
    assert_eq!(lines[4], "Domain renewal,Registrar,$15");
}

#[test]
fn report_csv_with_column_flags() {
    let output = ledgerview(&[
        "report",
        "expense",
        "-i",
        EXPENSES,
        "-m",
        "03",
        "--key",
        "purpose",
        "--key",
        "amount",
        "--heading",
        "What",
        "--heading",
        "Cost",
        "--currency-key",
        "amount",
        "--csv",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["What,Cost", "Office rent,৳1200", "Tea,৳10.5", "Broken import,৳abc"]);
}

#[test]
fn report_rejects_mismatched_columns() {
    let output = ledgerview(&[
        "report", "expense", "-i", EXPENSES, "--key", "purpose", "--key", "amount", "--heading",
        "What", "--csv",
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("1 headings given for 2 field keys"));
}

#[test]
fn report_writes_html_document() {
    let path = std::env::temp_dir().join("ledgerview-e2e-report.html");
    let _ = std::fs::remove_file(&path);

    let output = ledgerview(&[
        "report",
        "salary",
        "-i",
        SALARIES,
        "-o",
        path.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "Command failed: {:?}", output);

    let html = std::fs::read_to_string(&path).expect("report written");
    std::fs::remove_file(&path).unwrap();

    assert!(html.contains("<title>Salary History</title>"));
    assert!(html.contains("Rahim"));
    assert!(!html.contains("Lee"));
    assert!(html.contains("BDT amount"));
    assert!(html.contains("৳100000.00"));
    assert!(html.contains("2 rows"));
}

/// A failed envelope surfaces the backend's message
#[test]
fn rejected_envelope_fails_with_message() {
    let output = ledgerview(&["history", "salary", "-i", "tests/data/rejected.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("No salary sheet for this month"));
}

#[test]
fn api_fetch_without_token_fails() {
    let output = ledgerview(&["history", "credit", "--base-url", "http://127.0.0.1:9/api"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("no API token configured"));
}

#[test]
fn schema_fields_list_aliases() {
    let output = ledgerview(&["schema", "fields"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Command failed: {:?}", output);

    assert!(stdout.contains("currency_title"));
    assert!(stdout.contains("also accepted as currency__currency"));
    assert!(stdout.contains("start_date"));
}

#[test]
fn schema_json_and_layout() {
    let output = ledgerview(&["schema"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let schema: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(schema["title"], "HistoryResponse");

    let output = ledgerview(&["schema", "layout"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "Command failed: {:?}", output);
    let schema: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(schema["title"], "ReportLayout");
}
