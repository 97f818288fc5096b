//! Shared utilities for CLI commands.

use std::io::Write;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use regex::Regex;

use sprout_core::{DailyStats, HydrationTracker};
use sprout_db::Database;

use crate::Config;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+ago$").unwrap());

/// Conservative bound for relative dates (~100 years in days).
const MAX_RELATIVE_DAYS: i64 = 100 * 366;

/// Parse a calendar day relative to `today`.
///
/// Supports:
/// - ISO 8601: "2026-01-15"
/// - Keywords: "today", "yesterday"
/// - Relative: "3 days ago", "1 week ago"
pub fn parse_date(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD (e.g., 2026-01-15), 'today', 'yesterday' or relative (e.g., '2 days ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;
    let days_per_unit = match &caps[2] {
        "day" => 1,
        "week" => 7,
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };

    if n > MAX_RELATIVE_DAYS / days_per_unit {
        anyhow::bail!("Relative date too far back: {n} {}", &caps[2]);
    }

    Ok(today - Duration::days(n * days_per_unit))
}

/// Resolve an optional `--date` argument, defaulting to `today`.
pub fn resolve_date(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    arg.map_or(Ok(today), |s| parse_date(s, today))
}

/// Opens the database and loads a tracker for `today`.
pub fn open_tracker(config: &Config, today: NaiveDate) -> Result<HydrationTracker<Database>> {
    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }
    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    HydrationTracker::open(db, config.target_settings(), today)
        .context("failed to load hydration state")
}

/// Writes the stats block shared by `drink` and `status`.
pub fn write_stats<W: Write>(writer: &mut W, stats: &DailyStats) -> Result<()> {
    writeln!(writer, "Daily goal:  {} ml", stats.daily_target_ml)?;
    writeln!(writer, "Drank today: {} ml", stats.consumed_ml)?;
    writeln!(writer, "Progress:    {}%", stats.progress_percent)?;
    writeln!(writer, "Streak:      {}", format_days(stats.streak))?;
    Ok(())
}

/// "1 day" / "3 days".
pub fn format_days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{n} days")
    }
}

/// Generates a 10-character progress bar for `percent` (capped at 100).
pub fn progress_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize + 5) / 10;
    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}
