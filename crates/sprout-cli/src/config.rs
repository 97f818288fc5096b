//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use sprout_core::TargetSettings;

/// Default minutes between reminders.
pub const DEFAULT_REMINDER_INTERVAL_MINUTES: u32 = 45;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// Body weight in kg; overrides the stored profile when set.
    pub weight: Option<f64>,
    /// Height in cm; overrides the stored profile when set.
    pub height: Option<f64>,
    /// Manual daily target in ml. `0` means "use the recommendation".
    pub daily_target_ml: u32,
    /// Minutes between hydration reminders.
    pub reminder_interval_minutes: u32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("weight", &self.weight)
            .field("height", &self.height)
            .field("daily_target_ml", &self.daily_target_ml)
            .field("reminder_interval_minutes", &self.reminder_interval_minutes)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("sprout.db"),
            weight: None,
            height: None,
            daily_target_ml: 0,
            reminder_interval_minutes: DEFAULT_REMINDER_INTERVAL_MINUTES,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (SPROUT_*)
        figment = figment.merge(Env::prefixed("SPROUT_"));

        figment.extract()
    }

    /// Settings handed to the core when resolving the daily target.
    pub fn target_settings(&self) -> TargetSettings {
        TargetSettings {
            manual_target_ml: self.daily_target_ml,
            weight: self.weight,
            height: self.height,
        }
    }
}

/// Returns the platform-specific config directory for sprout.
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sprout"))
}

/// Returns the platform-specific data directory for sprout.
///
/// On Linux: `~/.local/share/sprout`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("sprout"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_sprout() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "sprout");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("sprout.db"));
        assert_eq!(config.daily_target_ml, 0);
        assert_eq!(config.reminder_interval_minutes, 45);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(
            &path,
            "weight = 72.5\ndaily_target_ml = 3000\nreminder_interval_minutes = 30\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.weight, Some(72.5));
        assert_eq!(config.height, None);
        assert_eq!(config.daily_target_ml, 3000);
        assert_eq!(config.reminder_interval_minutes, 30);
    }

    #[test]
    fn test_target_settings_carry_overrides() {
        let config = Config {
            weight: Some(80.0),
            daily_target_ml: 2500,
            ..Config::default()
        };
        let settings = config.target_settings();
        assert_eq!(settings.manual_target_ml, 2500);
        assert_eq!(settings.weight, Some(80.0));
        assert_eq!(settings.height, None);
    }
}
