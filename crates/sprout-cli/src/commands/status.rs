//! Status command for showing the day's progress.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::Config;
use crate::commands::util::{open_tracker, resolve_date, write_stats};

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    date: Option<&str>,
    json: bool,
    today: NaiveDate,
) -> Result<()> {
    let day = resolve_date(date, today)?;
    let tracker = open_tracker(config, day)?;
    let stats = tracker.stats(day).context("failed to read history")?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }

    writeln!(writer, "Sprout status for {day}")?;
    writeln!(writer, "Database: {}", config.database_path.display())?;
    write_stats(writer, &stats)?;
    if stats.consumed_ml == 0 {
        writeln!(writer)?;
        writeln!(writer, "Hint: Run 'sprout drink' after your next glass.")?;
    }
    Ok(())
}
