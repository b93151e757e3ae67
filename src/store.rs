//! Profile persistence: one JSON record in a named slot on disk.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{ActivityLevel, Gender, GoalPhase, Profile};

/// Slot name used by [`JsonSlotStore::default_location`].
pub const DEFAULT_SLOT: &str = "user-settings";

/// Persistence contract for the user profile.
///
/// `load` returning `Ok(None)` means "no usable stored profile": an absent
/// slot and a malformed record both land there, so callers can fall back to
/// [`Profile::default`]. I/O failures still surface as errors.
pub trait ProfileStore {
    fn load(&self) -> Result<Option<Profile>>;
    fn save(&mut self, profile: &Profile) -> Result<()>;
}

/// Single-slot store keeping the profile record at `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct JsonSlotStore {
    path: PathBuf,
}

impl JsonSlotStore {
    /// Store a slot under an explicit directory.
    pub fn new(dir: impl AsRef<Path>, slot: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{slot}.json")),
        }
    }

    /// Store under the platform's per-user data directory, e.g.
    /// `~/.local/share/macro-targets/user-settings.json` on Linux.
    pub fn default_location() -> Result<Self> {
        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .context("no user data directory available")?;
        Ok(Self::new(base.join("macro-targets"), DEFAULT_SLOT))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for JsonSlotStore {
    fn load(&self) -> Result<Option<Profile>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("read profile slot {}", self.path.display()))?;

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "profile slot is not valid JSON, ignoring");
                return Ok(None);
            }
        };
        match parse_profile(&value) {
            Some(profile) => Ok(Some(profile)),
            None => {
                warn!(path = %self.path.display(), "profile record is malformed, ignoring");
                Ok(None)
            }
        }
    }

    fn save(&mut self, profile: &Profile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create profile dir {}", parent.display()))?;
        }
        let bytes = serde_json::to_vec_pretty(profile).context("serialize profile")?;
        write_atomic(&self.path, &bytes)?;
        debug!(path = %self.path.display(), "profile saved");
        Ok(())
    }
}

/// Parse a stored profile record.
///
/// The web form that originally wrote these records turns numeric fields into
/// strings once edited, so numbers are accepted in either shape. A record
/// with any missing or unrecognized field is unusable as a whole (`None`);
/// there are no partial profiles.
fn parse_profile(value: &Value) -> Option<Profile> {
    let obj = value.as_object()?;

    let parse_num = |key: &str| -> Option<f64> {
        obj.get(key).and_then(|v| {
            v.as_f64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        })
    };

    let weight_lbs = parse_num("weightLbs")?;
    let height_inches = parse_num("heightInches")?;

    let age = parse_num("age")?;
    if age < 1.0 || age.fract() != 0.0 || age > f64::from(u32::MAX) {
        return None;
    }

    let gender = obj.get("gender")?.as_str()?.parse::<Gender>().ok()?;
    let activity = ActivityLevel::from_multiplier(parse_num("activityFactor")?).ok()?;
    let phase = obj.get("phase")?.as_str()?.parse::<GoalPhase>().ok()?;

    let profile = Profile {
        weight_lbs,
        height_inches,
        age: age as u32,
        gender,
        activity,
        phase,
    };
    profile.validate().ok()?;
    Some(profile)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path.parent().context("profile slot path has no parent")?;
    let tmp = parent.join(format!(
        ".{}.tmp-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_SLOT),
        std::process::id()
    ));

    {
        let mut file =
            File::create(&tmp).with_context(|| format!("create tmp {}", tmp.display()))?;
        file.write_all(bytes)
            .with_context(|| format!("write tmp {}", tmp.display()))?;
        file.sync_all()
            .with_context(|| format!("sync tmp {}", tmp.display()))?;
    }

    std::fs::rename(&tmp, path)
        .with_context(|| format!("rename tmp {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}

/// In-memory store for tests and embedders that own persistence themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profile: Option<Profile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: Some(profile),
        }
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<Profile>> {
        Ok(self.profile.clone())
    }

    fn save(&mut self, profile: &Profile) -> Result<()> {
        self.profile = Some(profile.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_numeric_record() {
        let profile = parse_profile(&json!({
            "weightLbs": 180.0,
            "heightInches": 70,
            "age": 30,
            "gender": "male",
            "activityFactor": 1.55,
            "phase": "maintenance",
        }))
        .unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn parses_a_string_typed_record() {
        // A record as the web form writes it after the user edits the fields.
        let profile = parse_profile(&json!({
            "weightLbs": "205",
            "heightInches": " 71 ",
            "age": "41",
            "gender": "Female",
            "activityFactor": "1.725",
            "phase": "cut",
        }))
        .unwrap();
        assert_eq!(profile.weight_lbs, 205.0);
        assert_eq!(profile.height_inches, 71.0);
        assert_eq!(profile.age, 41);
        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.activity, ActivityLevel::Active);
        assert_eq!(profile.phase, GoalPhase::Cut);
    }

    #[test]
    fn rejects_records_with_missing_or_bad_fields() {
        // Missing weight.
        assert!(parse_profile(&json!({
            "heightInches": 70,
            "age": 30,
            "gender": "male",
            "activityFactor": 1.55,
            "phase": "maintenance",
        }))
        .is_none());

        // Activity factor outside the five known multipliers.
        assert!(parse_profile(&json!({
            "weightLbs": 180,
            "heightInches": 70,
            "age": 30,
            "gender": "male",
            "activityFactor": 1.6,
            "phase": "maintenance",
        }))
        .is_none());

        // Unknown phase.
        assert!(parse_profile(&json!({
            "weightLbs": 180,
            "heightInches": 70,
            "age": 30,
            "gender": "male",
            "activityFactor": 1.55,
            "phase": "recomp",
        }))
        .is_none());

        // Fractional age.
        assert!(parse_profile(&json!({
            "weightLbs": 180,
            "heightInches": 70,
            "age": 30.5,
            "gender": "male",
            "activityFactor": 1.55,
            "phase": "maintenance",
        }))
        .is_none());

        // Numerics that fail validation.
        assert!(parse_profile(&json!({
            "weightLbs": -180,
            "heightInches": 70,
            "age": 30,
            "gender": "male",
            "activityFactor": 1.55,
            "phase": "maintenance",
        }))
        .is_none());

        // Not an object at all.
        assert!(parse_profile(&json!("userSettings")).is_none());
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        let profile = Profile {
            weight_lbs: 222.0,
            ..Profile::default()
        };
        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap(), Some(profile));
    }
}
