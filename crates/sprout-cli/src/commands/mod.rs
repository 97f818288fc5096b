//! CLI subcommand implementations.

pub mod config;
pub mod drink;
pub mod feedback;
pub mod history;
pub mod profile;
pub mod recommend;
pub mod remind;
pub mod status;
pub mod util;
