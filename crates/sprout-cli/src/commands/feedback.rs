//! Feedback command: adapt the recommendation model.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use sprout_core::Feedback;

use crate::Config;
use crate::commands::util::open_tracker;

#[derive(Debug, Args)]
pub struct FeedbackArgs {
    /// too-much, too-little or just-right.
    pub verdict: Feedback,
    /// What you actually drank, in ml. Defaults to today's total.
    #[arg(long)]
    pub actual: Option<u32>,
    /// The target you were given, in ml. Defaults to today's goal.
    #[arg(long)]
    pub recommended: Option<u32>,
}

pub fn run<W: Write>(
    writer: &mut W,
    config: &Config,
    args: &FeedbackArgs,
    today: NaiveDate,
) -> Result<()> {
    let mut tracker = open_tracker(config, today)?;

    let (actual_ml, recommended_ml) = match (args.actual, args.recommended) {
        (Some(actual), Some(recommended)) => (actual, recommended),
        (actual, recommended) => {
            let stats = tracker.stats(today).context("failed to read history")?;
            (
                actual.unwrap_or(stats.consumed_ml),
                recommended.unwrap_or(stats.daily_target_ml),
            )
        }
    };

    let before = tracker.engine().params().base_weight_factor;
    let params = tracker
        .give_feedback(actual_ml, recommended_ml, args.verdict)
        .context("failed to save model parameters")?;

    writeln!(
        writer,
        "Feedback '{}' recorded ({actual_ml} ml drunk vs {recommended_ml} ml recommended).",
        args.verdict
    )?;
    writeln!(
        writer,
        "Base factor: {before:.2} -> {:.2} ml/kg",
        params.base_weight_factor
    )?;
    writeln!(
        writer,
        "New recommendation: {} ml",
        tracker.recommend(today).daily_target_ml
    )?;
    Ok(())
}
