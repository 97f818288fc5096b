//! User profile and the fixed multiplier tables applied to it.

use serde::{Deserialize, Serialize};

use crate::types::define_string_enum;

define_string_enum!(
    /// Self-reported gender.
    Gender, "gender" {
        Male => "male",
        Female => "female",
        Other => "other",
    }
);

define_string_enum!(
    /// How physically active the user is on a typical day.
    ActivityLevel, "activity level" {
        Sedentary => "sedentary",
        Light => "light",
        Moderate => "moderate",
        Active => "active",
        VeryActive => "very_active",
    }
);

define_string_enum!(
    /// Climate the user lives in.
    Climate, "climate" {
        Cold => "cold",
        Temperate => "temperate",
        Hot => "hot",
    }
);

define_string_enum!(
    /// Current season.
    Season, "season" {
        Spring => "spring",
        Summer => "summer",
        Fall => "fall",
        Winter => "winter",
    }
);

impl Gender {
    /// Fractional adjustment applied as `value *= 1 + multiplier`.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Male => 0.05,
            Self::Female | Self::Other => 0.0,
        }
    }
}

impl ActivityLevel {
    /// Fractional adjustment applied as `value *= 1 + multiplier`.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 0.0,
            Self::Light => 0.10,
            Self::Moderate => 0.15,
            Self::Active => 0.25,
            Self::VeryActive => 0.35,
        }
    }
}

impl Climate {
    /// Fractional adjustment applied as `value *= 1 + multiplier`.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Cold => -0.05,
            Self::Temperate => 0.0,
            Self::Hot => 0.20,
        }
    }
}

impl Season {
    /// Fractional adjustment applied as `value *= 1 + multiplier`.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Spring | Self::Fall => 0.0,
            Self::Summer => 0.15,
            Self::Winter => -0.05,
        }
    }
}

/// Age adjustment: minors and seniors get a bump.
#[must_use]
pub const fn age_multiplier(age: u32) -> f64 {
    if age < 18 {
        0.10
    } else if age > 65 {
        0.05
    } else {
        0.0
    }
}

/// Physical profile used to personalize the daily target.
///
/// No range validation is applied; out-of-range values flow through the
/// engine unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Body weight in kilograms.
    pub weight: f64,
    /// Height in centimeters.
    pub height: f64,
    /// Age in years.
    pub age: u32,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub climate: Climate,
    pub season: Season,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            weight: 65.0,
            height: 170.0,
            age: 30,
            gender: Gender::Other,
            activity_level: ActivityLevel::Moderate,
            climate: Climate::Temperate,
            season: Season::Spring,
        }
    }
}

impl UserProfile {
    /// Overwrites the fields present in `update`, leaving the rest untouched.
    pub fn merge(&mut self, update: &ProfileUpdate) {
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(activity_level) = update.activity_level {
            self.activity_level = activity_level;
        }
        if let Some(climate) = update.climate {
            self.climate = climate;
        }
        if let Some(season) = update.season {
            self.season = season;
        }
    }
}

/// A partial profile: only `Some` fields are applied by [`UserProfile::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub weight: Option<f64>,
    pub height: Option<f64>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub activity_level: Option<ActivityLevel>,
    pub climate: Option<Climate>,
    pub season: Option<Season>,
}

impl ProfileUpdate {
    /// Returns true when no field is set.
    pub const fn is_empty(&self) -> bool {
        self.weight.is_none()
            && self.height.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.activity_level.is_none()
            && self.climate.is_none()
            && self.season.is_none()
    }
}
