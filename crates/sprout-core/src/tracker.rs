//! Session-scoped context tying a store to a recommendation engine.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{self, TargetSettings};
use crate::engine::{Feedback, ModelParams, Recommendation, RecommendationEngine};
use crate::profile::{ProfileUpdate, UserProfile};
use crate::record::HydrationHistory;
use crate::store::HydrationStore;
use crate::streak::calculate_streak;

/// Snapshot handed to the display surface after every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub streak: u32,
    pub consumed_ml: u32,
    pub progress_percent: u32,
    pub daily_target_ml: u32,
}

/// Owns the store and engine for one session.
///
/// The engine is loaded from the store once in [`HydrationTracker::open`]; its
/// 90-day window is applied independently of whatever the store retains.
#[derive(Debug)]
pub struct HydrationTracker<S> {
    store: S,
    engine: RecommendationEngine,
    settings: TargetSettings,
}

impl<S: HydrationStore> HydrationTracker<S> {
    /// Loads profile, parameters and history from `store`.
    ///
    /// Host settings (weight, height) are overlaid on the stored profile; a
    /// host weight alone is enough to create a profile. Only days before
    /// `today` feed the engine, so the target stays fixed while today fills up.
    pub fn open(store: S, settings: TargetSettings, today: NaiveDate) -> Result<Self, S::Error> {
        let params = store.load_params()?.unwrap_or_default();
        let mut engine = RecommendationEngine::with_params(params);

        if let Some(profile) = store.load_profile()? {
            engine.set_profile(&ProfileUpdate::from(&profile));
        }
        let overrides = settings.profile_overrides();
        if !overrides.is_empty() {
            engine.set_profile(&overrides);
        }

        let history = store.load_history()?;
        tracing::debug!(
            records = history.len(),
            has_profile = engine.profile().is_some(),
            "loaded hydration state"
        );
        for record in history.into_records() {
            if record.date < today {
                engine.add_record(record, today);
            }
        }

        Ok(Self {
            store,
            engine,
            settings,
        })
    }

    pub const fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Target in effect for `today`.
    pub fn daily_target(&self, today: NaiveDate) -> u32 {
        self.settings.daily_target(&self.engine, today)
    }

    /// The engine's recommendation, ignoring any manual override.
    pub fn recommend(&self, today: NaiveDate) -> Recommendation {
        self.engine.recommend(today)
    }

    /// Logs a drink against `date` and returns that day's refreshed stats.
    ///
    /// `date` may lie in the past for backfilling. The streak is always
    /// counted back from `today`, and the informational streak cache is
    /// refreshed with it.
    pub fn record_drink(
        &mut self,
        amount_ml: u32,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<DailyStats, S::Error> {
        let target = self.daily_target(date);
        let outcome = aggregate::record_drink(&mut self.store, amount_ml, target, date)?;

        let history = self.store.load_history()?;
        let streak = calculate_streak(history.records(), today);
        self.store.save_streak(streak)?;

        Ok(DailyStats {
            streak,
            consumed_ml: outcome.record.consumed_ml,
            progress_percent: outcome.progress_percent,
            daily_target_ml: target,
        })
    }

    /// Current stats without recording anything.
    pub fn stats(&self, today: NaiveDate) -> Result<DailyStats, S::Error> {
        let history = self.store.load_history()?;
        let target = self.daily_target(today);
        let (consumed_ml, progress_percent) = aggregate::day_progress(&history, target, today);

        Ok(DailyStats {
            streak: calculate_streak(history.records(), today),
            consumed_ml,
            progress_percent,
            daily_target_ml: target,
        })
    }

    /// Full stored history, for charts.
    pub fn history(&self) -> Result<HydrationHistory, S::Error> {
        self.store.load_history()
    }

    /// Merges `update` into the stored profile and the engine.
    ///
    /// Returns the stored profile. Host overrides stay in effect for the
    /// engine but are not persisted.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<UserProfile, S::Error> {
        let mut stored = self.store.load_profile()?.unwrap_or_default();
        stored.merge(update);
        self.store.save_profile(&stored)?;

        self.engine.set_profile(update);
        let overrides = self.settings.profile_overrides();
        if !overrides.is_empty() {
            self.engine.set_profile(&overrides);
        }
        Ok(stored)
    }

    /// Adapts the engine from feedback and persists the new parameters.
    pub fn give_feedback(
        &mut self,
        actual_ml: u32,
        recommended_ml: u32,
        feedback: Feedback,
    ) -> Result<ModelParams, S::Error> {
        self.engine.adapt(actual_ml, recommended_ml, feedback);
        let params = self.engine.params().clone();
        self.store.save_params(&params)?;
        Ok(params)
    }
}

impl From<&UserProfile> for ProfileUpdate {
    fn from(profile: &UserProfile) -> Self {
        Self {
            weight: Some(profile.weight),
            height: Some(profile.height),
            age: Some(profile.age),
            gender: Some(profile.gender),
            activity_level: Some(profile.activity_level),
            climate: Some(profile.climate),
            season: Some(profile.season),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Duration;

    use crate::profile::{ActivityLevel, Climate, Gender, Season};
    use crate::record::HydrationRecord;
    use crate::store::MemoryStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    fn neutral_profile(weight: f64) -> UserProfile {
        UserProfile {
            weight,
            height: 170.0,
            age: 30,
            gender: Gender::Other,
            activity_level: ActivityLevel::Sedentary,
            climate: Climate::Temperate,
            season: Season::Spring,
        }
    }

    fn store_with_profile(weight: f64) -> MemoryStore {
        MemoryStore {
            profile: Some(neutral_profile(weight)),
            ..MemoryStore::default()
        }
    }

    #[test]
    fn empty_store_uses_fallback_target() {
        let tracker =
            HydrationTracker::open(MemoryStore::default(), TargetSettings::default(), today())
                .unwrap();
        let stats = tracker.stats(today()).unwrap();
        assert_eq!(
            stats,
            DailyStats {
                streak: 0,
                consumed_ml: 0,
                progress_percent: 0,
                daily_target_ml: 2275,
            }
        );
    }

    #[test]
    fn drinks_accumulate_and_cache_streak() {
        let mut tracker =
            HydrationTracker::open(store_with_profile(40.0), TargetSettings::default(), today())
                .unwrap();

        // 40 × 35 = 1400
        let first = tracker.record_drink(250, today(), today()).unwrap();
        assert_eq!(first.daily_target_ml, 1400);
        assert_eq!(first.consumed_ml, 250);
        assert_eq!(first.streak, 0);

        let mut last = first;
        for _ in 0..4 {
            last = tracker.record_drink(250, today(), today()).unwrap();
        }
        // 1250 is still short of 90% of 1400
        assert_eq!(last.consumed_ml, 1250);
        assert_eq!(last.progress_percent, 89);
        assert_eq!(last.streak, 0);

        let last = tracker.record_drink(250, today(), today()).unwrap();
        assert_eq!(last.consumed_ml, 1500);
        assert_eq!(last.progress_percent, 100);
        assert_eq!(last.streak, 1);
        assert_eq!(tracker.store().streak, Some(1));
    }

    #[test]
    fn streak_spans_stored_history() {
        let mut store = store_with_profile(40.0);
        store.history = HydrationHistory::from_records((1..=2).map(|n| HydrationRecord {
            date: today() - Duration::days(n),
            target_ml: 1400,
            consumed_ml: 1400,
        }));

        let mut tracker = HydrationTracker::open(store, TargetSettings::default(), today()).unwrap();
        let stats = tracker.record_drink(1400, today(), today()).unwrap();
        assert_eq!(stats.streak, 3);
    }

    #[test]
    fn host_weight_overrides_stored_profile_without_persisting() {
        let settings = TargetSettings {
            weight: Some(80.0),
            ..TargetSettings::default()
        };
        let mut tracker = HydrationTracker::open(store_with_profile(40.0), settings, today()).unwrap();
        assert_eq!(tracker.daily_target(today()), 2800);

        let stored = tracker
            .update_profile(&ProfileUpdate {
                age: Some(70),
                ..ProfileUpdate::default()
            })
            .unwrap();
        assert!((stored.weight - 40.0).abs() < f64::EPSILON);
        assert_eq!(stored.age, 70);
        // 80 × 35 × 1.05
        assert_eq!(tracker.daily_target(today()), 2940);
    }

    #[test]
    fn update_profile_creates_default_profile() {
        let mut tracker =
            HydrationTracker::open(MemoryStore::default(), TargetSettings::default(), today())
                .unwrap();
        let stored = tracker
            .update_profile(&ProfileUpdate {
                weight: Some(60.0),
                ..ProfileUpdate::default()
            })
            .unwrap();

        assert_eq!(stored.activity_level, ActivityLevel::Moderate);
        assert_eq!(tracker.store().profile.as_ref(), Some(&stored));
        // 60 × 35 × 1.15
        assert_eq!(tracker.daily_target(today()), 2415);
    }

    #[test]
    fn feedback_persists_params() {
        let mut tracker =
            HydrationTracker::open(store_with_profile(60.0), TargetSettings::default(), today())
                .unwrap();
        let params = tracker.give_feedback(0, 1000, Feedback::TooLittle).unwrap();
        assert!((params.base_weight_factor - 35.35).abs() < 1e-9);
        assert_eq!(tracker.store().params.as_ref(), Some(&params));

        let store = tracker.into_store();
        let reopened = HydrationTracker::open(store, TargetSettings::default(), today()).unwrap();
        assert_eq!(reopened.daily_target(today()), 2121);
    }

    #[test]
    fn engine_window_ignores_old_store_records() {
        let mut store = store_with_profile(60.0);
        store.history = HydrationHistory::from_records((0..120).map(|n| HydrationRecord {
            date: today() - Duration::days(n),
            target_ml: 2000,
            consumed_ml: 2000,
        }));

        let tracker = HydrationTracker::open(store, TargetSettings::default(), today()).unwrap();
        // today is still in progress; the 89 days before it fit the window
        assert_eq!(tracker.engine().history().len(), 89);
        assert_eq!(tracker.history().unwrap().len(), 120);
    }

    #[test]
    fn target_holds_steady_while_today_fills_up() {
        let mut store = store_with_profile(60.0);
        store.history = HydrationHistory::from_records((1..=10).map(|n| HydrationRecord {
            date: today() - Duration::days(n),
            target_ml: 2000,
            consumed_ml: 2000,
        }));

        let mut tracker = HydrationTracker::open(store, TargetSettings::default(), today()).unwrap();
        let before = tracker.record_drink(250, today(), today()).unwrap();

        let store = tracker.into_store();
        let reopened = HydrationTracker::open(store, TargetSettings::default(), today()).unwrap();
        assert_eq!(reopened.engine().history().len(), 10);
        assert_eq!(reopened.daily_target(today()), before.daily_target_ml);
    }

    #[test]
    fn backfill_counts_streak_from_today() {
        let mut store = store_with_profile(40.0);
        store.history = HydrationHistory::from_records([HydrationRecord {
            date: today(),
            target_ml: 1400,
            consumed_ml: 1400,
        }]);

        let mut tracker = HydrationTracker::open(store, TargetSettings::default(), today()).unwrap();
        let yesterday = today() - Duration::days(1);
        let stats = tracker.record_drink(1400, yesterday, today()).unwrap();

        assert_eq!(stats.consumed_ml, 1400);
        assert_eq!(stats.streak, 2);
        assert_eq!(tracker.store().streak, Some(2));

        let two_days_ago = today() - Duration::days(2);
        let stats = tracker.record_drink(100, two_days_ago, today()).unwrap();
        assert_eq!(stats.streak, 2);
        assert_eq!(tracker.store().streak, Some(2));
    }
}
