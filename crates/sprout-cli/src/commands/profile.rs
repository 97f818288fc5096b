//! Profile commands for viewing and merging profile fields.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;

use sprout_core::{
    ActivityLevel, Climate, Gender, HydrationStore, ProfileUpdate, Season, UserProfile,
};

use crate::Config;
use crate::commands::util::open_tracker;

#[derive(Debug, Args)]
pub struct ProfileSetArgs {
    /// Body weight in kg.
    #[arg(long)]
    pub weight: Option<f64>,
    /// Height in cm.
    #[arg(long)]
    pub height: Option<f64>,
    /// Age in years.
    #[arg(long)]
    pub age: Option<u32>,
    /// male, female or other.
    #[arg(long)]
    pub gender: Option<Gender>,
    /// sedentary, light, moderate, active or very-active.
    #[arg(long)]
    pub activity: Option<ActivityLevel>,
    /// cold, temperate or hot.
    #[arg(long)]
    pub climate: Option<Climate>,
    /// spring, summer, fall or winter.
    #[arg(long)]
    pub season: Option<Season>,
}

impl From<&ProfileSetArgs> for ProfileUpdate {
    fn from(args: &ProfileSetArgs) -> Self {
        Self {
            weight: args.weight,
            height: args.height,
            age: args.age,
            gender: args.gender,
            activity_level: args.activity,
            climate: args.climate,
            season: args.season,
        }
    }
}

pub fn show<W: Write>(writer: &mut W, config: &Config, json: bool, today: NaiveDate) -> Result<()> {
    let tracker = open_tracker(config, today)?;
    let profile = tracker
        .store()
        .load_profile()
        .context("failed to read profile")?;

    let Some(profile) = profile else {
        if json {
            writeln!(writer, "null")?;
        } else {
            writeln!(writer, "No profile set.")?;
            writeln!(writer)?;
            writeln!(writer, "Hint: Run 'sprout profile set --weight <kg>' to personalize your goal.")?;
        }
        return Ok(());
    };

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&profile)?)?;
    } else {
        write_profile(writer, &profile)?;
    }
    Ok(())
}

pub fn set<W: Write>(
    writer: &mut W,
    config: &Config,
    args: &ProfileSetArgs,
    today: NaiveDate,
) -> Result<()> {
    let update = ProfileUpdate::from(args);
    if update.is_empty() {
        bail!("no profile fields given");
    }

    let mut tracker = open_tracker(config, today)?;
    let profile = tracker
        .update_profile(&update)
        .context("failed to save profile")?;

    write_profile(writer, &profile)?;
    writeln!(writer)?;
    writeln!(writer, "New daily goal: {} ml", tracker.daily_target(today))?;
    Ok(())
}

fn write_profile<W: Write>(writer: &mut W, profile: &UserProfile) -> Result<()> {
    writeln!(writer, "Weight:   {} kg", profile.weight)?;
    writeln!(writer, "Height:   {} cm", profile.height)?;
    writeln!(writer, "Age:      {}", profile.age)?;
    writeln!(writer, "Gender:   {}", profile.gender)?;
    writeln!(writer, "Activity: {}", profile.activity_level)?;
    writeln!(writer, "Climate:  {}", profile.climate)?;
    writeln!(writer, "Season:   {}", profile.season)?;
    Ok(())
}
