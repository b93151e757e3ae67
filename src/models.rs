use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Validation errors for profile and intake input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("age must be at least 1 year")]
    ZeroAge,
    #[error("{0} is not a recognized activity factor (expected 1.2, 1.375, 1.55, 1.725 or 1.9)")]
    UnknownActivityFactor(f64),
    #[error("unknown gender: '{0}' (expected male or female)")]
    UnknownGender(String),
    #[error("unknown goal phase: '{0}' (expected maintenance, cut or bulk)")]
    UnknownPhase(String),
    #[error("intake amounts must be non-negative, got {0}")]
    NegativeIntake(f64),
}

/// Gender as used by the energy model (selects the BMR constant term).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(ProfileError::UnknownGender(other.to_string())),
        }
    }
}

/// Activity level bucket for the TDEE multiplier.
///
/// Only these five multipliers exist; stored records carry the bare number
/// and anything outside the set is rejected at the boundary instead of being
/// fed into the arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// The TDEE multiplier for this level.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }

    /// Display label, multiplier included.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary (1.2)",
            Self::Light => "Light (1.375)",
            Self::Moderate => "Moderate (1.55)",
            Self::Active => "Active (1.725)",
            Self::VeryActive => "Very Active (1.9)",
        }
    }

    /// Map a stored multiplier back to its level.
    pub fn from_multiplier(factor: f64) -> Result<Self, ProfileError> {
        Self::ALL
            .into_iter()
            .find(|level| level.multiplier() == factor)
            .ok_or(ProfileError::UnknownActivityFactor(factor))
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ActivityLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.multiplier())
    }
}

impl<'de> Deserialize<'de> for ActivityLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let factor = f64::deserialize(deserializer)?;
        Self::from_multiplier(factor).map_err(de::Error::custom)
    }
}

/// Dietary goal phase. Keys the calorie multiplier and the macro ratio
/// tables in the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPhase {
    Maintenance,
    Cut,
    Bulk,
}

impl FromStr for GoalPhase {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "maintenance" => Ok(Self::Maintenance),
            "cut" => Ok(Self::Cut),
            "bulk" => Ok(Self::Bulk),
            other => Err(ProfileError::UnknownPhase(other.to_string())),
        }
    }
}

/// A user's biometric profile and goal settings.
///
/// Serializes with the stored record's camelCase keys:
/// `heightInches`, `weightLbs`, `age`, `gender`, `activityFactor`, `phase`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Weight in lbs
    pub weight_lbs: f64,
    /// Height in inches
    pub height_inches: f64,
    /// Age in years
    pub age: u32,
    pub gender: Gender,
    #[serde(rename = "activityFactor")]
    pub activity: ActivityLevel,
    pub phase: GoalPhase,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            weight_lbs: 180.0,
            height_inches: 70.0,
            age: 30,
            gender: Gender::Male,
            activity: ActivityLevel::Moderate,
            phase: GoalPhase::Maintenance,
        }
    }
}

impl Profile {
    /// Check the numeric invariant: weight and height finite and positive,
    /// age at least 1.
    ///
    /// The calculator assumes this holds and does not repeat the checks, so
    /// call it before feeding user input in.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (field, value) in [
            ("weightLbs", self.weight_lbs),
            ("heightInches", self.height_inches),
        ] {
            if !value.is_finite() {
                return Err(ProfileError::NotFinite { field, value });
            }
            if value <= 0.0 {
                return Err(ProfileError::NotPositive { field, value });
            }
        }
        if self.age == 0 {
            return Err(ProfileError::ZeroAge);
        }
        Ok(())
    }
}

/// An inclusive `{min, max}` band in the quantity's own unit (kcal or g).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRange {
    pub min: f64,
    pub max: f64,
}

impl MacroRange {
    /// Both endpoints scaled by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

/// Daily target ranges derived from a [`Profile`].
///
/// A pure function of the profile: recomputed whole on every profile change,
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranges {
    /// Calories (kcal)
    pub calories: MacroRange,
    /// Protein (g)
    pub protein: MacroRange,
    /// Carbs (g)
    pub carbs: MacroRange,
    /// Fat (g)
    pub fats: MacroRange,
}

/// Cumulative consumed amounts for one tracking day.
///
/// Display-side state only; the calculator never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intake {
    pub date: NaiveDate,
    /// Calories (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbs (g)
    pub carbs: f64,
    /// Fat (g)
    pub fats: f64,
}

impl Intake {
    /// Empty accumulator for a tracking day.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fats: 0.0,
        }
    }

    /// Add consumed amounts. Within a day the accumulator only grows, so
    /// every amount must be non-negative (NaN is rejected too).
    pub fn add(
        &mut self,
        calories: f64,
        protein: f64,
        carbs: f64,
        fats: f64,
    ) -> Result<(), ProfileError> {
        for amount in [calories, protein, carbs, fats] {
            if amount.is_nan() || amount < 0.0 {
                return Err(ProfileError::NegativeIntake(amount));
            }
        }
        self.calories += calories;
        self.protein += protein;
        self.carbs += carbs;
        self.fats += fats;
        Ok(())
    }
}
