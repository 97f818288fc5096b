//! Config command: print the effective configuration.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::config::dirs_config_path;

pub fn run<W: Write>(writer: &mut W, config: &Config, json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(config)?)?;
        return Ok(());
    }

    if let Some(dir) = dirs_config_path() {
        writeln!(writer, "Config file:       {}", dir.join("config.toml").display())?;
    }
    writeln!(writer, "Database:          {}", config.database_path.display())?;
    writeln!(writer, "Weight:            {}", optional(config.weight, "kg"))?;
    writeln!(writer, "Height:            {}", optional(config.height, "cm"))?;
    if config.daily_target_ml > 0 {
        writeln!(writer, "Daily target:      {} ml", config.daily_target_ml)?;
    } else {
        writeln!(writer, "Daily target:      recommended")?;
    }
    writeln!(
        writer,
        "Reminder interval: {} min",
        config.reminder_interval_minutes
    )?;
    Ok(())
}

fn optional(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "from profile".to_string(), |v| format!("{v} {unit}"))
}
