//! The tracker facade: current profile, its derived ranges and the day's
//! intake, kept consistent behind one API.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::calculator::compute_ranges;
use crate::models::{Intake, MacroRange, Profile, ProfileError, Ranges};
use crate::store::ProfileStore;

/// Progress of one tracked quantity against its target band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroProgress {
    /// Consumed so far (kcal or g).
    pub consumed: f64,
    pub range: MacroRange,
}

impl MacroProgress {
    /// Bar fill: consumed over the top of the band, capped at 1. A zero-width
    /// band at zero (a fully clamped carb target) reads as full once anything
    /// is consumed.
    pub fn fill_fraction(&self) -> f64 {
        if self.range.max <= 0.0 {
            return if self.consumed > 0.0 { 1.0 } else { 0.0 };
        }
        (self.consumed / self.range.max).min(1.0)
    }

    /// Position of the band-start marker as a fraction of the bar.
    pub fn marker_fraction(&self) -> f64 {
        if self.range.max <= 0.0 {
            return 0.0;
        }
        self.range.min / self.range.max
    }
}

/// Intake against targets for every tracked quantity, in display order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyProgress {
    pub calories: MacroProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fats: MacroProgress,
}

/// Binds the profile store, the range engine and the intake accumulator.
///
/// Holds one profile, ranges recomputed once per profile change, and one
/// intake accumulator. Reads never recompute. The store decides where the
/// profile lives; see [`ProfileStore`].
pub struct MacroTracker<S> {
    store: S,
    profile: Profile,
    ranges: Ranges,
    intake: Intake,
}

impl<S: ProfileStore> MacroTracker<S> {
    /// Open a tracker over `store` with a fresh intake day at `today`.
    ///
    /// Loads the stored profile, falling back to [`Profile::default`] when
    /// the slot is empty or its record unusable.
    pub fn open(store: S, today: NaiveDate) -> Result<Self> {
        let profile = match store.load()? {
            Some(profile) => profile,
            None => {
                info!("no stored profile, using defaults");
                Profile::default()
            }
        };
        let ranges = compute_ranges(&profile);
        Ok(Self {
            store,
            profile,
            ranges,
            intake: Intake::empty(today),
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Current target ranges, always consistent with [`profile`](Self::profile).
    pub fn ranges(&self) -> &Ranges {
        &self.ranges
    }

    pub fn intake(&self) -> &Intake {
        &self.intake
    }

    /// Replace the profile: validate, persist, then recompute the ranges.
    ///
    /// Validation or store failure leaves the in-memory profile and ranges at
    /// their previous values.
    pub fn set_profile(&mut self, profile: Profile) -> Result<&Ranges> {
        profile.validate()?;
        self.store.save(&profile)?;

        info!(
            weight_lbs = profile.weight_lbs,
            phase = ?profile.phase,
            activity = %profile.activity,
            "profile updated, ranges recomputed"
        );
        self.profile = profile;
        self.ranges = compute_ranges(&self.profile);
        Ok(&self.ranges)
    }

    /// Record consumed amounts against the current day's intake.
    pub fn log_intake(
        &mut self,
        calories: f64,
        protein: f64,
        carbs: f64,
        fats: f64,
    ) -> Result<(), ProfileError> {
        self.intake.add(calories, protein, carbs, fats)
    }

    /// Start a new tracking day: the intake accumulator resets to zero.
    /// When to call this is caller policy (midnight rollover, manual reset).
    pub fn start_day(&mut self, date: NaiveDate) {
        debug!(%date, "intake reset for new tracking day");
        self.intake = Intake::empty(date);
    }

    /// Snapshot of today's intake against the current ranges.
    pub fn progress(&self) -> DailyProgress {
        DailyProgress {
            calories: MacroProgress {
                consumed: self.intake.calories,
                range: self.ranges.calories,
            },
            protein: MacroProgress {
                consumed: self.intake.protein,
                range: self.ranges.protein,
            },
            carbs: MacroProgress {
                consumed: self.intake.carbs,
                range: self.ranges.carbs,
            },
            fats: MacroProgress {
                consumed: self.intake.fats,
                range: self.ranges.fats,
            },
        }
    }

    /// Consume the tracker and hand the store back.
    pub fn into_store(self) -> S {
        self.store
    }
}
