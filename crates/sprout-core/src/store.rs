//! Persistence boundary for profile, history and learned parameters.
//!
//! The core never talks to disk directly. Implementations decide where data
//! lives; `sprout-db` provides SQLite, [`MemoryStore`] serves tests.

use std::convert::Infallible;

use crate::engine::ModelParams;
use crate::profile::UserProfile;
use crate::record::HydrationHistory;

/// Key for the hydration history blob.
pub const HISTORY_KEY: &str = "hydration_history";
/// Key for the user profile.
pub const PROFILE_KEY: &str = "profile";
/// Key for learned engine parameters.
pub const PARAMS_KEY: &str = "model_params";
/// Key for the informational streak cache.
pub const STREAK_KEY: &str = "streak";

/// Read/write access to persisted hydration state.
///
/// Every write replaces the whole value. Absent values load as an empty
/// history or `None`.
pub trait HydrationStore {
    /// Error surfaced by the backing storage.
    type Error: std::error::Error + Send + Sync + 'static;

    fn load_history(&self) -> Result<HydrationHistory, Self::Error>;

    fn save_history(&mut self, history: &HydrationHistory) -> Result<(), Self::Error>;

    fn load_profile(&self) -> Result<Option<UserProfile>, Self::Error>;

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), Self::Error>;

    fn load_params(&self) -> Result<Option<ModelParams>, Self::Error>;

    fn save_params(&mut self, params: &ModelParams) -> Result<(), Self::Error>;

    /// Caches the last computed streak. Never read back by the core.
    fn save_streak(&mut self, streak: u32) -> Result<(), Self::Error>;
}

/// In-memory store, mainly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub history: HydrationHistory,
    pub profile: Option<UserProfile>,
    pub params: Option<ModelParams>,
    pub streak: Option<u32>,
}

impl HydrationStore for MemoryStore {
    type Error = Infallible;

    fn load_history(&self) -> Result<HydrationHistory, Self::Error> {
        Ok(self.history.clone())
    }

    fn save_history(&mut self, history: &HydrationHistory) -> Result<(), Self::Error> {
        self.history = history.clone();
        Ok(())
    }

    fn load_profile(&self) -> Result<Option<UserProfile>, Self::Error> {
        Ok(self.profile.clone())
    }

    fn save_profile(&mut self, profile: &UserProfile) -> Result<(), Self::Error> {
        self.profile = Some(profile.clone());
        Ok(())
    }

    fn load_params(&self) -> Result<Option<ModelParams>, Self::Error> {
        Ok(self.params.clone())
    }

    fn save_params(&mut self, params: &ModelParams) -> Result<(), Self::Error> {
        self.params = Some(params.clone());
        Ok(())
    }

    fn save_streak(&mut self, streak: u32) -> Result<(), Self::Error> {
        self.streak = Some(streak);
        Ok(())
    }
}
