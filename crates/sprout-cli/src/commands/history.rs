//! History command: weekly summary of daily records.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use sprout_core::HydrationHistory;

use crate::Config;
use crate::commands::util::{format_days, open_tracker, progress_bar};

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    days: usize,
    json: bool,
    today: NaiveDate,
) -> Result<()> {
    let tracker = open_tracker(config, today)?;
    let history = tracker.history().context("failed to read history")?;

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&history)?)?;
        return Ok(());
    }

    write_summary(writer, &history, days)
}

/// Renders the most recent `days` records, oldest first.
pub fn write_summary<W: Write>(writer: &mut W, history: &HydrationHistory, days: usize) -> Result<()> {
    writeln!(writer, "HYDRATION HISTORY")?;
    writeln!(writer, "─────────────────")?;

    let recent = history.last(days);
    if recent.is_empty() {
        writeln!(writer, "No records yet.")?;
        return Ok(());
    }

    for record in recent {
        let percent = record.progress_percent();
        let mark = if record.goal_met() { "  ✓" } else { "" };
        writeln!(
            writer,
            "{}  {}  {:>5} / {} ml  {percent:>3}%{mark}",
            record.date.format("%a %b %d"),
            progress_bar(percent),
            record.consumed_ml,
            record.target_ml,
        )?;
    }

    let met = u32::try_from(recent.iter().filter(|r| r.goal_met()).count()).unwrap_or(u32::MAX);
    writeln!(writer)?;
    writeln!(
        writer,
        "Goal met on {} of the last {}",
        format_days(met),
        format_days(u32::try_from(recent.len()).unwrap_or(u32::MAX))
    )?;
    Ok(())
}
