//! Recommend command: explain the personalized target.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use sprout_core::Recommendation;

use crate::Config;
use crate::commands::util::{open_tracker, resolve_date};

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    date: Option<&str>,
    json: bool,
    today: NaiveDate,
) -> Result<()> {
    let day = resolve_date(date, today)?;
    let tracker = open_tracker(config, day)?;
    let recommendation = tracker.recommend(day);

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&recommendation)?)?;
        return Ok(());
    }

    write_recommendation(writer, &recommendation)?;
    if config.daily_target_ml > 0 {
        writeln!(
            writer,
            "Note: manual target of {} ml is configured and takes precedence.",
            tracker.daily_target(day)
        )?;
    }
    Ok(())
}

fn write_recommendation<W: Write>(writer: &mut W, rec: &Recommendation) -> Result<()> {
    writeln!(writer, "Recommended: {} ml", rec.daily_target_ml)?;
    writeln!(writer, "Confidence:  {}", rec.confidence)?;
    writeln!(writer, "Factors:     {}", rec.factors_considered.join(", "))?;
    writeln!(writer, "Next review: {}", rec.next_review_date)?;
    Ok(())
}
