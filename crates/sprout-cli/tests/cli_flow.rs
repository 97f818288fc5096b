//! End-to-end tests driving the `sprout` binary.
//!
//! Each test gets its own HOME and database so runs never touch real data.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn sprout_binary() -> String {
    env!("CARGO_BIN_EXE_sprout").to_string()
}

fn sprout(temp: &Path, args: &[&str]) -> Output {
    Command::new(sprout_binary())
        .env("HOME", temp)
        .env("XDG_CONFIG_HOME", temp.join(".config"))
        .env("XDG_DATA_HOME", temp.join(".local/share"))
        .env("SPROUT_DATABASE_PATH", temp.join("data/sprout.db"))
        .env_remove("SPROUT_DAILY_TARGET_ML")
        .env_remove("SPROUT_WEIGHT")
        .env_remove("SPROUT_HEIGHT")
        .args(args)
        .output()
        .expect("failed to run sprout")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "sprout should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_drinks_accumulate_across_invocations() {
    let temp = TempDir::new().unwrap();

    stdout_of(&sprout(temp.path(), &["drink"]));
    let second = stdout_of(&sprout(temp.path(), &["drink"]));

    assert!(second.starts_with("Your plant feels refreshed! (+250 ml)"));
    assert!(second.contains("Drank today: 500 ml"));
    assert!(temp.path().join("data/sprout.db").exists());
}

#[test]
fn test_status_json_reflects_logged_drinks() {
    let temp = TempDir::new().unwrap();
    stdout_of(&sprout(temp.path(), &["drink", "--amount", "400"]));

    let status = stdout_of(&sprout(temp.path(), &["status", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&status).unwrap();
    assert_eq!(value["consumedMl"], 400);
    assert_eq!(value["dailyTargetMl"], 2275);
    assert_eq!(value["streak"], 0);
}

#[test]
fn test_history_json_lists_backfilled_days() {
    let temp = TempDir::new().unwrap();
    stdout_of(&sprout(
        temp.path(),
        &["drink", "--amount", "3000", "--date", "yesterday"],
    ));
    stdout_of(&sprout(temp.path(), &["drink", "--amount", "3000"]));

    let history = stdout_of(&sprout(temp.path(), &["history", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&history).unwrap();
    let records = value["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0]["date"].as_str() < records[1]["date"].as_str());

    let status = stdout_of(&sprout(temp.path(), &["status", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&status).unwrap();
    assert_eq!(value["streak"], 2);
}

#[test]
fn test_profile_set_changes_goal() {
    let temp = TempDir::new().unwrap();

    let set = stdout_of(&sprout(
        temp.path(),
        &[
            "profile",
            "set",
            "--weight",
            "80",
            "--activity",
            "sedentary",
            "--season",
            "winter",
        ],
    ));
    assert!(set.contains("New daily goal: 2660 ml"));

    let show = stdout_of(&sprout(temp.path(), &["profile", "show", "--json"]));
    let value: serde_json::Value = serde_json::from_str(&show).unwrap();
    assert_eq!(value["weight"], 80.0);
    assert_eq!(value["activityLevel"], "sedentary");
}

#[test]
fn test_manual_target_from_environment() {
    let temp = TempDir::new().unwrap();

    let output = Command::new(sprout_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .env("SPROUT_DATABASE_PATH", temp.path().join("sprout.db"))
        .env("SPROUT_DAILY_TARGET_ML", "1800")
        .args(["status", "--json"])
        .output()
        .unwrap();

    let status = stdout_of(&output);
    let value: serde_json::Value = serde_json::from_str(&status).unwrap();
    assert_eq!(value["dailyTargetMl"], 1800);
}

#[test]
fn test_invalid_date_is_rejected() {
    let temp = TempDir::new().unwrap();
    let output = sprout(temp.path(), &["drink", "--date", "next tuesday"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid date"), "stderr was: {stderr}");
}

#[test]
fn test_unknown_feedback_verdict_is_rejected() {
    let temp = TempDir::new().unwrap();
    let output = sprout(temp.path(), &["feedback", "sometimes"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown feedback"), "stderr was: {stderr}");
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();
    let help = stdout_of(&sprout(temp.path(), &[]));
    assert!(help.contains("Usage: sprout"));
}
