//! Drink command: the "water the plant" event.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::Config;
use crate::commands::util::{open_tracker, resolve_date, write_stats};

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    amount_ml: u32,
    date: Option<&str>,
    today: NaiveDate,
) -> Result<()> {
    let day = resolve_date(date, today)?;
    let mut tracker = open_tracker(config, today)?;
    let stats = tracker
        .record_drink(amount_ml, day, today)
        .context("failed to record drink")?;

    writeln!(writer, "Your plant feels refreshed! (+{amount_ml} ml)")?;
    write_stats(writer, &stats)?;
    Ok(())
}
