use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sprout_cli::commands::{config as show_config, drink, feedback, history, profile, recommend, remind, status};
use sprout_cli::{Cli, Commands, Config, ProfileAction};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = load_config(cli.config.as_deref())?;
    let now = chrono::Local::now().naive_local();
    let today = now.date();
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Drink { amount, date } => {
            drink::run(&mut out, &config, *amount, date.as_deref(), today)?;
        }
        Commands::Status { date, json } => {
            status::run(&mut out, &config, date.as_deref(), *json, today)?;
        }
        Commands::History { days, json } => {
            history::run(&mut out, &config, *days, *json, today)?;
        }
        Commands::Recommend { date, json } => {
            recommend::run(&mut out, &config, date.as_deref(), *json, today)?;
        }
        Commands::Profile(action) => match action {
            ProfileAction::Show { json } => profile::show(&mut out, &config, *json, today)?,
            ProfileAction::Set(args) => profile::set(&mut out, &config, args, today)?,
        },
        Commands::Feedback(args) => feedback::run(&mut out, &config, args, today)?,
        Commands::Remind => remind::run(&mut out, &config, now)?,
        Commands::Config { json } => show_config::run(&mut out, &config, *json)?,
    }

    Ok(())
}
