//! Sprout CLI library.
//!
//! This crate provides the CLI interface for the hydration tracker.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, ProfileAction};
pub use config::Config;
