//! The target range engine.
//!
//! Pure arithmetic from a [`Profile`] to daily [`Ranges`]: imperial to metric
//! conversion, Mifflin-St Jeor BMR (1990), activity-scaled TDEE, a goal
//! multiplier on calories, weight-proportional protein and fat bands, and a
//! carb band filling the remaining calorie budget. Deterministic and
//! allocation-free; equal profiles always produce identical ranges.

use crate::models::{ActivityLevel, Gender, GoalPhase, MacroRange, Profile, Ranges};

/// kcal per gram of protein
const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of carbohydrate
const KCAL_PER_G_CARB: f64 = 4.0;
/// kcal per gram of fat
const KCAL_PER_G_FAT: f64 = 9.0;

/// Half-width of the calorie band around the goal target.
const CALORIE_BAND: f64 = 0.05;

/// Pounds to kilograms.
pub fn pounds_to_kg(lbs: f64) -> f64 {
    lbs / 2.205
}

/// Inches to centimeters.
pub fn inches_to_cm(inches: f64) -> f64 {
    inches * 2.54
}

/// Basal Metabolic Rate via the Mifflin-St Jeor equation (1990).
///
/// `BMR = 10 x weight_kg + 6.25 x height_cm - 5 x age + c`, where `c` is
/// +5 for men and -161 for women. The equation is reproduced as published,
/// with no floor: implausible inputs give implausible output, which is why
/// profiles are validated at the boundary rather than here.
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, gender: Gender) -> f64 {
    let gender_constant = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + gender_constant
}

/// Total Daily Energy Expenditure: BMR scaled by the activity multiplier.
pub fn total_energy_expenditure(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

/// Goal-adjusted daily calorie target.
pub fn calorie_target(tdee: f64, phase: GoalPhase) -> f64 {
    tdee * phase.calorie_multiplier()
}

impl GoalPhase {
    /// Calorie multiplier applied to TDEE.
    pub const fn calorie_multiplier(self) -> f64 {
        match self {
            Self::Maintenance => 1.0,
            Self::Cut => 0.8,
            Self::Bulk => 1.1,
        }
    }

    /// Protein band in grams per kg bodyweight.
    pub const fn protein_g_per_kg(self) -> MacroRange {
        match self {
            Self::Cut => MacroRange { min: 2.2, max: 2.6 },
            Self::Bulk => MacroRange { min: 1.6, max: 2.0 },
            Self::Maintenance => MacroRange { min: 1.6, max: 2.2 },
        }
    }

    /// Fat band in grams per kg bodyweight.
    pub const fn fat_g_per_kg(self) -> MacroRange {
        match self {
            Self::Cut => MacroRange { min: 0.6, max: 0.8 },
            Self::Maintenance | Self::Bulk => MacroRange { min: 0.8, max: 1.0 },
        }
    }
}

/// Derive the full set of daily target ranges from a profile.
///
/// Assumes the profile invariant holds (see [`Profile::validate`]); the
/// engine itself performs no validation.
pub fn compute_ranges(profile: &Profile) -> Ranges {
    debug_assert!(
        profile.validate().is_ok(),
        "compute_ranges needs a validated profile"
    );

    let weight_kg = pounds_to_kg(profile.weight_lbs);
    let height_cm = inches_to_cm(profile.height_inches);

    let bmr = basal_metabolic_rate(weight_kg, height_cm, profile.age, profile.gender);
    let tdee = total_energy_expenditure(bmr, profile.activity);
    let target = calorie_target(tdee, profile.phase);

    let protein = profile.phase.protein_g_per_kg().scale(weight_kg);
    let fats = profile.phase.fat_g_per_kg().scale(weight_kg);

    // Carbs fill whatever the calorie budget has left, at 4 kcal/g. The low
    // end budgets for protein and fat at the top of their bands, the high end
    // at the bottom; keep that pairing as is. Both ends clamp at zero so a
    // hard cut can not go negative.
    let carb_min = ((target - protein.max * KCAL_PER_G_PROTEIN - fats.max * KCAL_PER_G_FAT)
        / KCAL_PER_G_CARB)
        .max(0.0);
    let carb_max = ((target - protein.min * KCAL_PER_G_PROTEIN - fats.min * KCAL_PER_G_FAT)
        / KCAL_PER_G_CARB)
        .max(0.0);

    Ranges {
        calories: MacroRange {
            min: target * (1.0 - CALORIE_BAND),
            max: target * (1.0 + CALORIE_BAND),
        },
        protein,
        carbs: MacroRange {
            min: carb_min,
            max: carb_max,
        },
        fats,
    }
}
