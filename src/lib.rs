//! Daily calorie and macronutrient target ranges from a biometric profile.
//!
//! A [`Profile`] (weight, height, age, gender, activity level, goal phase)
//! feeds the Mifflin-St Jeor energy model and per-phase ratio tables to
//! produce calorie, protein, carb and fat bands; [`MacroTracker`] keeps those
//! ranges consistent with a persisted profile and accumulates the day's
//! intake against them.
//!
//! ```
//! use macro_targets::{compute_ranges, Profile};
//!
//! let ranges = compute_ranges(&Profile::default());
//! assert!(ranges.protein.min <= ranges.protein.max);
//! ```

pub mod calculator;
pub mod models;
pub mod store;
pub mod tracker;

pub use calculator::compute_ranges;
pub use models::{
    ActivityLevel, Gender, GoalPhase, Intake, MacroRange, Profile, ProfileError, Ranges,
};
pub use store::{JsonSlotStore, MemoryStore, ProfileStore};
pub use tracker::{DailyProgress, MacroProgress, MacroTracker};
