//! E2E tests for the CLI against fixture snapshots

use std::process::Command;

fn run(args: &[&str]) -> (String, String, bool) {
    let output = Command::new("cargo")
        .args(["run", "--"].iter().chain(args.iter()))
        .output()
        .expect("Failed to execute command");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

#[test]
fn summary_text_output() {
    let (stdout, stderr, ok) = run(&["summary", "-s", "tests/data/snapshot.json", "-y", "2024"]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("TAX SUMMARY (2024)"));
    // 42000 + 8000 of 2024 income; the 2023 record is filtered out
    assert!(stdout.contains("Total income: $50000.00"));
    // 1080 + 64.20 + 800 deductible
    assert!(stdout.contains("Deductible: $1944.20"));
    // Full-year income matches the baseline, so taxes come back unchanged
    assert!(stdout.contains("Federal: $5000.00 | Provincial: $2500.00 | CPP: $5000.00"));
    assert!(stdout.contains("Total: $12500.00 owing"));
    assert!(stdout.contains("Effective rate: 26.0%"));
}

#[test]
fn summary_includes_combined_employment_section() {
    let (stdout, stderr, ok) = run(&["summary", "-s", "tests/data/snapshot.json", "-y", "2024"]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("COMBINED WITH EMPLOYMENT"));
    assert!(stdout.contains("Employment income: $20000.00"));
    // min(1000 + 5000, 7735) - 1000
    assert!(stdout.contains("CPP still owed: $5000.00"));
    assert!(stdout.contains("Taxes already paid: $3000.00"));
}

#[test]
fn summary_json_output() {
    let (stdout, stderr, ok) = run(&[
        "summary",
        "-s",
        "tests/data/snapshot.json",
        "-y",
        "2024",
        "--json",
    ]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("\"total_income\": \"50000.00\""));
    assert!(stdout.contains("\"deductible_expenses\": \"1944.20\""));
    assert!(stdout.contains("\"total_tax_owed\": \"12500.00\""));
    assert!(stdout.contains("\"combined\""));
    assert!(stdout.contains("\"top_categories\""));
}

#[test]
fn summary_empty_snapshot_degrades_to_zero() {
    let (stdout, stderr, ok) = run(&["summary", "-s", "tests/data/empty.json", "-y", "2024"]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("TAX SUMMARY (2024)"));
    assert!(stdout.contains("Total income: $0.00"));
    assert!(stdout.contains("Total: $0.00 owing"));
}

#[test]
fn transactions_table_shows_deductible_amounts() {
    let (stdout, stderr, ok) = run(&[
        "transactions",
        "-s",
        "tests/data/snapshot.json",
        "-y",
        "2024",
    ]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("Union Production"));
    assert!(stdout.contains("Equipment"));
    // 60% business use of a $107 vehicle expense
    assert!(stdout.contains("$64.20"));
}

#[test]
fn transactions_category_filter() {
    let (stdout, stderr, ok) = run(&[
        "transactions",
        "-s",
        "tests/data/snapshot.json",
        "-y",
        "2024",
        "--category",
        "RENT",
        "--csv",
    ]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("Rent"));
    assert!(!stdout.contains("Equipment"));
    assert!(!stdout.contains("Income"));
}

#[test]
fn transactions_unknown_category_fails() {
    let (_, stderr, ok) = run(&[
        "transactions",
        "-s",
        "tests/data/snapshot.json",
        "-y",
        "2024",
        "--category",
        "groceries",
    ]);
    assert!(!ok);
    assert!(stderr.contains("unknown category"));
}

#[test]
fn categories_sorted_by_amount() {
    let (stdout, stderr, ok) = run(&[
        "categories",
        "-s",
        "tests/data/snapshot.json",
        "-y",
        "2024",
    ]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("Rent"));
    assert!(stdout.contains("$2000.00"));
    let rent = stdout.find("Rent").unwrap();
    let equipment = stdout.find("Equipment").unwrap();
    assert!(rent < equipment, "Rent ($2000) should rank above Equipment");
}

#[test]
fn gst_summary() {
    let (stdout, stderr, ok) = run(&["gst", "-s", "tests/data/snapshot.json", "-y", "2024"]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("Collected: $2100.00"));
    // Only the deductible share of GST counts: 50 + 3 from the 60% vehicle
    assert!(stdout.contains("Input tax credits: $53.00"));
    assert!(stdout.contains("Net: $2047.00 owing"));
}

#[test]
fn cpp_parameters_and_cap() {
    let (stdout, stderr, ok) = run(&["cpp", "-y", "2024"]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("Max pensionable earnings: $68500.00"));
    assert!(stdout.contains("Max contribution: $7735.00"));
}

#[test]
fn cpp_owed_with_employment_contributions() {
    let (stdout, stderr, ok) = run(&[
        "cpp",
        "-y",
        "2024",
        "--needed",
        "5000",
        "--paid",
        "4000",
        "--json",
    ]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("\"contribution_owed\": \"3735.00\""));
    assert!(stdout.contains("\"cap_reached\": true"));
}

#[test]
fn cpp_unknown_year_uses_latest_parameters() {
    let (stdout, stderr, ok) = run(&["cpp", "-y", "1999"]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("Using 2026 parameters"));
    assert!(stdout.contains("Max pensionable earnings: $74200.00"));
}

#[test]
fn schema_fields_lists_wire_names() {
    let (stdout, stderr, ok) = run(&["schema", "fields"]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("vehicleUsage"));
    assert!(stdout.contains("baseCost"));
    assert!(stdout.contains("gstHstCollected"));
    assert!(stdout.contains("homeOfficePercent"));
}

#[test]
fn schema_json_schema() {
    let (stdout, stderr, ok) = run(&["schema"]);
    assert!(ok, "Command failed: {stderr}");

    assert!(stdout.contains("\"$schema\""));
    assert!(stdout.contains("Snapshot"));
}
