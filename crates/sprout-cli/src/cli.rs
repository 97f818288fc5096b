//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use sprout_core::SERVING_ML;

use crate::commands::feedback::FeedbackArgs;
use crate::commands::profile::ProfileSetArgs;

/// Keep your sprout alive by drinking water.
///
/// Tracks daily water intake against a personalized target and keeps a
/// streak of days where you met it.
#[derive(Debug, Parser)]
#[command(name = "sprout", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Water the plant: log a drink.
    Drink {
        /// Amount in ml.
        #[arg(long, default_value_t = SERVING_ML)]
        amount: u32,

        /// Day to log against (YYYY-MM-DD, "yesterday", "2 days ago").
        #[arg(long)]
        date: Option<String>,
    },

    /// Show today's progress and streak.
    Status {
        /// Day to report on.
        #[arg(long)]
        date: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show recent daily records.
    History {
        /// Number of most recent records to chart.
        #[arg(long, default_value_t = 7)]
        days: usize,

        /// Output the full history as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the personalized recommendation and how it was derived.
    Recommend {
        /// Day to compute the recommendation for.
        #[arg(long)]
        date: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// View or edit the user profile.
    #[command(subcommand)]
    Profile(ProfileAction),

    /// Tell the model whether its target felt right.
    Feedback(FeedbackArgs),

    /// Print a hydration reminder.
    Remind,

    /// Show the effective configuration.
    Config {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Profile subcommands.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile.
    Show {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Update profile fields; omitted fields keep their values.
    Set(ProfileSetArgs),
}
