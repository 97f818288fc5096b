//! Core domain logic for the sprout hydration tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Recommendation: personalized daily water target with feedback adaptation
//! - Streaks: consecutive days meeting the goal
//! - Aggregation: folding drinks into the day's record
//!
//! Nothing here reads the wall clock; every date-sensitive operation takes `today`.

mod aggregate;
pub mod engine;
pub mod profile;
pub mod record;
pub mod store;
mod streak;
mod tracker;
pub mod types;

pub use aggregate::{DrinkOutcome, SERVING_ML, TargetSettings, apply_drink, record_drink};
pub use engine::{Feedback, ModelParams, Recommendation, RecommendationEngine};
pub use profile::{ActivityLevel, Climate, Gender, ProfileUpdate, Season, UserProfile};
pub use record::{HydrationHistory, HydrationRecord};
pub use store::{HydrationStore, MemoryStore};
pub use streak::calculate_streak;
pub use tracker::{DailyStats, HydrationTracker};
pub use types::{Confidence, ParseEnumError};
