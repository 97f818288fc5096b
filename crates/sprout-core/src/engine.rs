//! Recommendation engine: personalized daily target with feedback adaptation.
//!
//! # Algorithm Summary
//!
//! 1. Base target is `weight × base_weight_factor`
//! 2. Profile multipliers compose in a fixed order: activity, climate, season, gender, age
//! 3. With more than 7 records, the last 7 nudge the target by at most ±10%
//! 4. The result is clamped to \[1000, 5000\] ml and rounded
//!
//! The engine is an explicit context object: callers own it and pass the
//! current date into every date-sensitive operation.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::profile::{ProfileUpdate, UserProfile, age_multiplier};
use crate::record::HydrationRecord;
use crate::types::{Confidence, define_string_enum};

/// Smallest daily target the engine will recommend.
pub const MIN_DAILY_TARGET_ML: u32 = 1000;

/// Largest daily target the engine will recommend.
pub const MAX_DAILY_TARGET_ML: u32 = 5000;

/// Target returned when no profile has been set (65 kg × 35 ml).
pub const FALLBACK_DAILY_TARGET_ML: u32 = 2275;

/// Records older than this are pruned from the engine's own history.
pub const HISTORY_WINDOW_DAYS: i64 = 90;

/// Number of trailing records used for pattern detection.
pub const PATTERN_WINDOW: usize = 7;

/// Bounds on the learned base factor (ml per kg).
pub const BASE_WEIGHT_FACTOR_RANGE: (f64, f64) = (25.0, 50.0);

/// Largest pattern-based adjustment, as a fraction of the target.
const MAX_PATTERN_DELTA: f64 = 0.1;

const BASE_CONFIDENCE: f64 = 0.5;
const PROFILE_CONFIDENCE: f64 = 0.2;
const CONFIDENCE_PER_RECORD: f64 = 0.005;
const MAX_HISTORY_CONFIDENCE: f64 = 0.3;

/// Tunable parameters adapted from user feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelParams {
    /// Base ml per kg of body weight. Kept within [`BASE_WEIGHT_FACTOR_RANGE`].
    pub base_weight_factor: f64,
    /// Increase per activity level above sedentary. Not yet used by the
    /// factor pipeline, which reads the fixed activity table.
    pub activity_factor: f64,
    /// Increase per 5°C above 20°C. Not yet used by the factor pipeline.
    pub climate_factor: f64,
    /// Scale applied to the consumed/target ratio before clamping to ±10%.
    pub pattern_adjustment: f64,
    /// How quickly feedback moves `base_weight_factor`.
    pub learning_rate: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            base_weight_factor: 35.0,
            activity_factor: 0.15,
            climate_factor: 0.1,
            pattern_adjustment: 0.1,
            learning_rate: 0.01,
        }
    }
}

/// Computed daily recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub daily_target_ml: u32,
    pub confidence: Confidence,
    /// Names of the factors applied, in application order.
    pub factors_considered: Vec<String>,
    pub next_review_date: NaiveDate,
}

define_string_enum!(
    /// User's verdict on a recommendation.
    Feedback, "feedback" {
        TooMuch => "too_much",
        TooLittle => "too_little",
        JustRight => "just_right",
    }
);

/// Owns the profile, the bounded history window and the tunable parameters.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    profile: Option<UserProfile>,
    history: Vec<HydrationRecord>,
    params: ModelParams,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with previously learned parameters.
    pub fn with_params(params: ModelParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn history(&self) -> &[HydrationRecord] {
        &self.history
    }

    pub const fn params(&self) -> &ModelParams {
        &self.params
    }

    /// Merges `update` into the profile, creating a default profile first if needed.
    pub fn set_profile(&mut self, update: &ProfileUpdate) {
        self.profile
            .get_or_insert_with(UserProfile::default)
            .merge(update);
    }

    /// Appends a record, then drops everything older than the 90-day window.
    ///
    /// A record is kept while `today - date < 90 days`.
    pub fn add_record(&mut self, record: HydrationRecord, today: NaiveDate) {
        self.history.push(record);
        let before = self.history.len();
        self.history
            .retain(|r| (today - r.date).num_days() < HISTORY_WINDOW_DAYS);
        let pruned = before - self.history.len();
        if pruned > 0 {
            tracing::debug!(pruned, %today, "pruned engine history");
        }
    }

    /// Computes the daily recommendation for `today`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is clamped to [1000, 5000] before the cast"
    )]
    pub fn recommend(&self, today: NaiveDate) -> Recommendation {
        let next_review_date = today + Duration::days(1);

        let Some(profile) = &self.profile else {
            return Recommendation {
                daily_target_ml: FALLBACK_DAILY_TARGET_ML,
                confidence: Confidence::clamped(BASE_CONFIDENCE),
                factors_considered: vec!["weight".to_string()],
                next_review_date,
            };
        };

        let mut value = profile.weight * self.params.base_weight_factor;
        let mut factors = vec!["weight".to_string()];

        let multipliers = [
            ("activity", profile.activity_level.multiplier()),
            ("climate", profile.climate.multiplier()),
            ("season", profile.season.multiplier()),
            ("gender", profile.gender.multiplier()),
            ("age", age_multiplier(profile.age)),
        ];
        for (name, multiplier) in multipliers {
            value *= 1.0 + multiplier;
            factors.push(name.to_string());
        }

        if self.history.len() > PATTERN_WINDOW {
            value *= 1.0 + self.pattern_adjustment();
            factors.push("historical_patterns".to_string());
        }

        let daily_target_ml = value
            .clamp(f64::from(MIN_DAILY_TARGET_ML), f64::from(MAX_DAILY_TARGET_ML))
            .round() as u32;

        tracing::debug!(
            daily_target_ml,
            base_weight_factor = self.params.base_weight_factor,
            history_len = self.history.len(),
            "computed recommendation"
        );

        Recommendation {
            daily_target_ml,
            confidence: self.confidence(),
            factors_considered: factors,
            next_review_date,
        }
    }

    /// Nudges `base_weight_factor` from explicit feedback.
    ///
    /// The relative error `|actual - recommended| / recommended` scaled by the
    /// learning rate shrinks (too much) or grows (too little) the factor.
    /// A non-positive `recommended_ml` leaves the parameters unchanged.
    pub fn adapt(&mut self, actual_ml: u32, recommended_ml: u32, feedback: Feedback) {
        if recommended_ml == 0 {
            tracing::warn!(actual_ml, %feedback, "ignoring feedback for a zero recommendation");
            return;
        }

        let error = f64::from(actual_ml) - f64::from(recommended_ml);
        let step = (error.abs() / f64::from(recommended_ml)) * self.params.learning_rate;
        let factor = &mut self.params.base_weight_factor;
        match feedback {
            Feedback::TooMuch => *factor *= 1.0 - step,
            Feedback::TooLittle => *factor *= 1.0 + step,
            Feedback::JustRight => {}
        }

        let (min, max) = BASE_WEIGHT_FACTOR_RANGE;
        *factor = factor.clamp(min, max);

        tracing::info!(
            %feedback,
            actual_ml,
            recommended_ml,
            base_weight_factor = *factor,
            "adapted model parameters"
        );
    }

    /// Ratio of consumed to target over the last 7 records, scaled and bounded to ±10%.
    fn pattern_adjustment(&self) -> f64 {
        let start = self.history.len().saturating_sub(PATTERN_WINDOW);
        let recent = &self.history[start..];
        if recent.is_empty() {
            return 0.0;
        }

        let consumed: f64 = recent.iter().map(|r| f64::from(r.consumed_ml)).sum();
        let target: f64 = recent.iter().map(|r| f64::from(r.target_ml)).sum();
        if target <= 0.0 {
            return 0.0;
        }

        // Equal lengths, so the ratio of sums equals the ratio of averages.
        let ratio = consumed / target;
        ((ratio - 1.0) * self.params.pattern_adjustment).clamp(-MAX_PATTERN_DELTA, MAX_PATTERN_DELTA)
    }

    #[allow(clippy::cast_precision_loss, reason = "history is bounded to 90 days")]
    fn confidence(&self) -> Confidence {
        let mut confidence = BASE_CONFIDENCE;
        if self.profile.is_some() {
            confidence += PROFILE_CONFIDENCE;
        }
        confidence +=
            (self.history.len() as f64 * CONFIDENCE_PER_RECORD).min(MAX_HISTORY_CONFIDENCE);
        Confidence::clamped(confidence.min(1.0))
    }
}
