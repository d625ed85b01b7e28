use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";
const DESKTOP: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0";

fn telqr() -> Command {
    let mut cmd = Command::cargo_bin("telqr").expect("binary is built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn classify_reports_the_matching_signature() {
    telqr()
        .args(["classify", IPHONE])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("mobile\ttoken\tip(hone|od)"));
}

#[test]
fn classify_desktop_browser() {
    telqr().args(["classify", DESKTOP]).assert().success().stdout("desktop\n");
}

#[test]
fn modern_table_is_selectable() {
    telqr()
        .args(["classify", "--table", "modern", "Nokia6230/2.0 Profile/MIDP-2.0"])
        .assert()
        .success()
        .stdout("desktop\n");

    telqr()
        .args(["classify", "Nokia6230/2.0 Profile/MIDP-2.0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("mobile"));
}

#[test]
fn extract_trims_the_number() {
    telqr().args(["extract", "tel:  +1 555 0100 "]).assert().success().stdout("+1 555 0100\n");
}

#[test]
fn extract_rejects_other_schemes() {
    telqr()
        .args(["extract", "mailto:team@example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid telephone link"));
}

#[test]
fn config_prints_merged_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("telqr.toml");
    fs::write(&path, "button_text = \"Dial\"\n\n[qr_code]\nwidth = 256\n")?;

    let output = telqr().args(["config", "--file"]).arg(&path).output()?;
    assert!(output.status.success());

    let config: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(config["buttonText"], "Dial");
    assert_eq!(config["showToCallText"], "Show to call");
    assert_eq!(config["qrCode"]["width"], 256);
    assert_eq!(config["qrCode"]["height"], 180);
    assert_eq!(config["qrCode"]["correctLevel"], "M");
    assert_eq!(config["signatureTable"], "legacy");
    Ok(())
}

#[test]
fn missing_config_file_fails() {
    telqr()
        .args(["config", "--file", "/nonexistent/telqr.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

#[test]
fn log_dir_receives_debug_output() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    telqr()
        .args(["--verbose", "--log-dir"])
        .arg(dir.path())
        .args(["classify", IPHONE])
        .assert()
        .success();

    let has_log = fs::read_dir(dir.path())?
        .flatten()
        .any(|entry| entry.path().extension().and_then(|e| e.to_str()) == Some("log"));
    assert!(has_log, "a log file should be created");
    Ok(())
}

#[test]
fn no_arguments_prints_help() {
    telqr().assert().failure().stderr(predicate::str::contains("Usage"));
}
