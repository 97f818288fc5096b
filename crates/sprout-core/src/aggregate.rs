//! Daily record aggregation: folds a drink into today's record.

use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{MAX_DAILY_TARGET_ML, MIN_DAILY_TARGET_ML, RecommendationEngine};
use crate::profile::ProfileUpdate;
use crate::record::{HydrationHistory, HydrationRecord, progress_percent};
use crate::store::HydrationStore;

/// Fixed serving size for one "water the plant" action.
pub const SERVING_ML: u32 = 250;

/// Host-provided settings that influence the daily target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetSettings {
    /// Manual daily target. When positive it replaces the factor pipeline
    /// but is still clamped to \[1000, 5000\].
    pub manual_target_ml: u32,
    /// Weight from host settings, overlaid on the stored profile.
    pub weight: Option<f64>,
    /// Height from host settings, overlaid on the stored profile.
    pub height: Option<f64>,
}

impl TargetSettings {
    /// The profile fields the host settings override.
    pub fn profile_overrides(&self) -> ProfileUpdate {
        ProfileUpdate {
            weight: self.weight,
            height: self.height,
            ..ProfileUpdate::default()
        }
    }

    /// Resolves the target for `today`: the manual override if set, else the engine's recommendation.
    pub fn daily_target(&self, engine: &RecommendationEngine, today: NaiveDate) -> u32 {
        if self.manual_target_ml > 0 {
            let target = self
                .manual_target_ml
                .clamp(MIN_DAILY_TARGET_ML, MAX_DAILY_TARGET_ML);
            tracing::debug!(target, "using manual daily target");
            return target;
        }
        engine.recommend(today).daily_target_ml
    }
}

/// Result of recording a drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrinkOutcome {
    pub record: HydrationRecord,
    pub progress_percent: u32,
}

/// Adds `amount_ml` to the record for `today`, creating it if needed.
///
/// The record's target is overwritten with `target_ml` on every call, so a
/// mid-day settings change takes effect immediately.
pub fn apply_drink(
    history: &mut HydrationHistory,
    amount_ml: u32,
    target_ml: u32,
    today: NaiveDate,
) -> DrinkOutcome {
    let record = history.get_or_insert(today, target_ml);
    record.target_ml = target_ml;
    record.consumed_ml = record.consumed_ml.saturating_add(amount_ml);

    DrinkOutcome {
        record: record.clone(),
        progress_percent: record.progress_percent(),
    }
}

/// Read-modify-write of today's record against `store`.
///
/// Store failures propagate unchanged; there is nothing to roll back since the
/// history is written as one value.
pub fn record_drink<S: HydrationStore>(
    store: &mut S,
    amount_ml: u32,
    target_ml: u32,
    today: NaiveDate,
) -> Result<DrinkOutcome, S::Error> {
    let mut history = store.load_history()?;
    let outcome = apply_drink(&mut history, amount_ml, target_ml, today);
    store.save_history(&history)?;

    tracing::info!(
        amount_ml,
        consumed_ml = outcome.record.consumed_ml,
        target_ml,
        progress = outcome.progress_percent,
        %today,
        "recorded drink"
    );
    Ok(outcome)
}

/// Progress for a day without touching the store.
pub fn day_progress(history: &HydrationHistory, target_ml: u32, today: NaiveDate) -> (u32, u32) {
    let consumed_ml = history.get(today).map_or(0, |r| r.consumed_ml);
    (consumed_ml, progress_percent(consumed_ml, target_ml))
}
