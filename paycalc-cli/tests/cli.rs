//! End-to-end tests running the `paycalc` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn paycalc() -> Command {
    let mut cmd = Command::cargo_bin("paycalc").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("PAYCALC_CONFIG")
        .env_remove("PAYCALC_LOG_FILE");
    cmd
}

const EXTRA_YEAR_CSV: &str = "year,min,max,base_amount,rate,medicare_levy,super_rate
2026-27,0,18200,0,0,0.02,0.12
2026-27,18200,45000,0,0.15,0.02,0.12
2026-27,45000,135000,4020,0.30,0.02,0.12
2026-27,135000,190000,31020,0.37,0.02,0.12
2026-27,190000,,51370,0.45,0.02,0.12
";

fn write_schedule(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("2026-27.csv");
    fs::write(&path, EXTRA_YEAR_CSV).unwrap();
    path
}

// ─── take-home ───────────────────────────────────────────────────────────────

#[test]
fn take_home_default_year() {
    paycalc()
        .args(["take-home", "$100,000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Take-home pay for 2024-25"))
        .stdout(predicate::str::contains("$20,794.00"))
        .stdout(predicate::str::contains("$77,206.00"))
        .stdout(predicate::str::contains("$6,433.83"))
        .stdout(predicate::str::contains("$2,969.46"))
        .stdout(predicate::str::contains("Marginal tax rate: 30%"));
}

#[test]
fn take_home_including_super() {
    paycalc()
        .args(["take-home", "100000", "--including-super"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$89,686.10"))
        .stdout(predicate::str::contains("$10,313.90"));
}

#[test]
fn take_home_json_output() {
    let output = paycalc()
        .args(["take-home", "100000", "--year", "2025-26", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["year"], "2025-26");
    assert_eq!(
        value["superannuation"]
            .as_str()
            .unwrap()
            .parse::<f64>()
            .unwrap(),
        12000.0
    );
}

#[test]
fn take_home_rejects_non_numeric_salary() {
    paycalc()
        .args(["take-home", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'lots' is not a number"));
}

#[test]
fn take_home_rejects_negative_salary() {
    paycalc()
        .args(["take-home", "-5000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

#[test]
fn take_home_rejects_salary_above_cap() {
    paycalc()
        .args(["take-home", "79228162514264337593543950335"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn take_home_unknown_year() {
    paycalc()
        .args(["take-home", "100000", "--year", "2019-20"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tax year 2019-20 not found"));
}

#[test]
fn take_home_malformed_year() {
    paycalc()
        .args(["take-home", "100000", "--year", "FY25"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-YY"));
}

// ─── contract ────────────────────────────────────────────────────────────────

#[test]
fn contract_default_uplift() {
    paycalc()
        .args(["contract", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20% uplift"))
        .stdout(predicate::str::contains("$115,000.00 - $130,000.00"))
        .stdout(predicate::str::contains("$120,000.00"))
        .stdout(predicate::str::contains("$521.74"));
}

#[test]
fn contract_out_of_band_uplift_warns() {
    paycalc()
        .args(["contract", "100000", "--uplift", "45"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$145,000.00"))
        .stdout(predicate::str::contains("outside the advised"))
        .stderr(predicate::str::contains("WARN"));
}

#[test]
fn contract_rejects_oversized_inputs() {
    paycalc()
        .args(["contract", "79228162514264337593543950335"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    paycalc()
        .args(["contract", "100000", "--uplift", "1000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

// ─── compare ─────────────────────────────────────────────────────────────────

#[test]
fn compare_default_salaries() {
    paycalc()
        .arg("compare")
        .assert()
        .success()
        .stdout(predicate::str::contains("$80,000.00"))
        .stdout(predicate::str::contains("$120,000.00"))
        .stdout(predicate::str::contains("$77,206.00"));
}

#[test]
fn compare_keeps_going_past_bad_salary() {
    paycalc()
        .args(["compare", "abc", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("abc"))
        .stdout(predicate::str::contains("$77,206.00"));
}

#[test]
fn compare_degrades_oversized_salary() {
    paycalc()
        .args(["compare", "79228162514264337593543950335", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("79228162514264337593543950335"))
        .stdout(predicate::str::contains("$77,206.00"));
}

#[test]
fn compare_including_super_bases_contract_on_package() {
    paycalc()
        .args(["compare", "111500", "--including-super"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$11,500.00"))
        .stdout(predicate::str::contains("$133,800.00"));
}

// ─── years ───────────────────────────────────────────────────────────────────

#[test]
fn years_list_shows_builtin_years() {
    paycalc()
        .args(["years", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2022-23"))
        .stdout(predicate::str::contains("2025-26"))
        .stdout(predicate::str::contains("11.5%"));
}

#[test]
fn years_show_unknown_year() {
    paycalc()
        .args(["years", "show", "2030-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tax year 2030-31 not found"));
}

// ─── schedules and settings ──────────────────────────────────────────────────

#[test]
fn schedules_flag_adds_year() {
    let dir = TempDir::new().unwrap();
    let csv = write_schedule(&dir);

    paycalc()
        .arg("--schedules")
        .arg(&csv)
        .args(["take-home", "100000", "--year", "2026-27"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$20,520.00"))
        .stdout(predicate::str::contains("$12,000.00"));
}

#[test]
fn invalid_schedule_file_fails() {
    let dir = TempDir::new().unwrap();
    let csv = dir.path().join("bad.csv");
    fs::write(
        &csv,
        "year,min,max,base_amount,rate,medicare_levy,super_rate\n2026-27,0,18200,0,0,0.02,0.12\n",
    )
    .unwrap();

    paycalc()
        .arg("--schedules")
        .arg(&csv)
        .args(["years", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load schedules"));
}

#[test]
fn settings_file_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    write_schedule(&dir);
    let config = dir.path().join("paycalc.toml");
    fs::write(
        &config,
        "default_year = \"2026-27\"\nuplift_percentage = 25\nschedules = [\"2026-27.csv\"]\n",
    )
    .unwrap();

    paycalc()
        .env("PAYCALC_CONFIG", &config)
        .args(["take-home", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Take-home pay for 2026-27"));

    paycalc()
        .arg("--config")
        .arg(&config)
        .args(["contract", "100000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$125,000.00"));
}

#[test]
fn settings_file_with_negative_super_rate_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("paycalc.toml");
    fs::write(
        &config,
        "including_super = true\nsuper_rate_percent = -100\n",
    )
    .unwrap();

    paycalc()
        .arg("--config")
        .arg(&config)
        .args(["take-home", "100000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid super_rate_percent"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn log_file_receives_records() {
    let dir = TempDir::new().unwrap();
    let log = dir.path().join("paycalc.log");

    paycalc()
        .arg("-vv")
        .arg("--log-file")
        .arg(&log)
        .args(["take-home", "100000"])
        .assert()
        .success();

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("resolved take-home inputs"));
}
