//! Remind command: a one-shot nudge meant to be run from cron or a timer.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDateTime};

use crate::Config;
use crate::commands::util::open_tracker;

pub fn run<W: Write>(writer: &mut W, config: &Config, now: NaiveDateTime) -> Result<()> {
    let today = now.date();
    let tracker = open_tracker(config, today)?;
    let stats = tracker.stats(today).context("failed to read history")?;

    if stats.consumed_ml >= stats.daily_target_ml {
        writeln!(writer, "Your Sprout is happy. Today's goal is reached!")?;
        return Ok(());
    }

    let remaining = stats.daily_target_ml.saturating_sub(stats.consumed_ml);
    writeln!(writer, "Your Sprout looks thirsty! Take a sip?")?;
    writeln!(
        writer,
        "{remaining} ml to go ({}% of {} ml so far).",
        stats.progress_percent, stats.daily_target_ml
    )?;

    if config.reminder_interval_minutes > 0 {
        let next = now + Duration::minutes(i64::from(config.reminder_interval_minutes));
        writeln!(writer, "Next reminder: {}", next.format("%H:%M"))?;
    }
    Ok(())
}
