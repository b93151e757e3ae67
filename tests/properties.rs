use chrono::NaiveDate;
use macro_targets::{
    compute_ranges, ActivityLevel, Gender, GoalPhase, MacroTracker, MemoryStore, Profile,
};
use proptest::prelude::*;

// Realistic adult inputs. The BMR equation is reproduced without a floor, so
// its output is only meaningful (and the band ordering only guaranteed) over
// ranges the equation was built for.
fn arb_profile() -> impl Strategy<Value = Profile> {
    (
        80.0..500.0f64,
        48.0..90.0f64,
        18u32..90,
        prop_oneof![Just(Gender::Male), Just(Gender::Female)],
        prop_oneof![
            Just(ActivityLevel::Sedentary),
            Just(ActivityLevel::Light),
            Just(ActivityLevel::Moderate),
            Just(ActivityLevel::Active),
            Just(ActivityLevel::VeryActive),
        ],
        prop_oneof![
            Just(GoalPhase::Maintenance),
            Just(GoalPhase::Cut),
            Just(GoalPhase::Bulk),
        ],
    )
        .prop_map(
            |(weight_lbs, height_inches, age, gender, activity, phase)| Profile {
                weight_lbs,
                height_inches,
                age,
                gender,
                activity,
                phase,
            },
        )
}

proptest! {
    #[test]
    fn every_band_is_ordered_and_non_negative(profile in arb_profile()) {
        let ranges = compute_ranges(&profile);
        for (name, band) in [
            ("calories", ranges.calories),
            ("protein", ranges.protein),
            ("carbs", ranges.carbs),
            ("fats", ranges.fats),
        ] {
            prop_assert!(band.min >= 0.0, "{name} min went negative: {}", band.min);
            prop_assert!(
                band.min <= band.max,
                "{name} band inverted: [{}, {}]",
                band.min,
                band.max
            );
        }
    }

    #[test]
    fn equal_profiles_always_derive_identical_ranges(profile in arb_profile()) {
        let first = compute_ranges(&profile);
        let second = compute_ranges(&profile);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn protein_band_grows_with_weight(profile in arb_profile(), extra in 0.5..200.0f64) {
        let lighter = compute_ranges(&profile);
        let heavier_profile = Profile {
            weight_lbs: profile.weight_lbs + extra,
            ..profile
        };
        let heavier = compute_ranges(&heavier_profile);
        prop_assert!(heavier.protein.min >= lighter.protein.min);
        prop_assert!(heavier.protein.max >= lighter.protein.max);
        prop_assert!(heavier.fats.max >= lighter.fats.max);
    }

    #[test]
    fn cut_and_bulk_pull_in_opposite_directions(profile in arb_profile()) {
        let cut = compute_ranges(&Profile { phase: GoalPhase::Cut, ..profile.clone() });
        let bulk = compute_ranges(&Profile { phase: GoalPhase::Bulk, ..profile });
        // 0.8 * 1.05 on one side, 1.1 * 0.95 on the other: the whole cut band
        // ends below where the bulk band begins.
        prop_assert!(cut.calories.max < bulk.calories.min);
        // Meanwhile a cut asks for more protein per kg than a bulk ever does.
        prop_assert!(cut.protein.min > bulk.protein.max);
    }

    #[test]
    fn activity_scales_calories_monotonically(profile in arb_profile()) {
        let mut previous: Option<f64> = None;
        for activity in ActivityLevel::ALL {
            let ranges = compute_ranges(&Profile { activity, ..profile.clone() });
            if let Some(below) = previous {
                prop_assert!(ranges.calories.max > below);
            }
            previous = Some(ranges.calories.max);
        }
    }

    #[test]
    fn logged_intake_totals_match_their_sums(
        entries in proptest::collection::vec(
            (0.0..2000.0f64, 0.0..200.0f64, 0.0..300.0f64, 0.0..150.0f64),
            0..20,
        )
    ) {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut tracker = MacroTracker::open(MemoryStore::new(), today).unwrap();
        for (calories, protein, carbs, fats) in &entries {
            tracker.log_intake(*calories, *protein, *carbs, *fats).unwrap();
        }

        let intake = tracker.intake();
        prop_assert_eq!(intake.calories, entries.iter().map(|e| e.0).sum::<f64>());
        prop_assert_eq!(intake.protein, entries.iter().map(|e| e.1).sum::<f64>());
        prop_assert_eq!(intake.carbs, entries.iter().map(|e| e.2).sum::<f64>());
        prop_assert_eq!(intake.fats, entries.iter().map(|e| e.3).sum::<f64>());
    }
}
