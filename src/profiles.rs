//! Exercise profiles
//!
//! A profile names the three joints whose included angle is tracked for one
//! exercise and the angle thresholds that bound the contracted and extended
//! positions. Profiles are loaded once at startup and never mutated.

use crate::error::EvalError;
use crate::landmarks::joint_index;
use crate::types::MotionState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Table key of the fallback profile used for unrecognized exercises
pub const DEFAULT_PROFILE_KEY: &str = "default";

/// Static configuration for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseProfile {
    /// First bracketing joint (e.g. "left_shoulder")
    pub joint1: String,
    /// Vertex joint where the angle is measured (e.g. "left_elbow")
    pub joint2: String,
    /// Second bracketing joint (e.g. "left_wrist")
    pub joint3: String,
    /// Angle at or below which the body position counts as contracted
    pub down_threshold_deg: f64,
    /// Angle at or above which the body position counts as extended
    pub up_threshold_deg: f64,
}

impl ExerciseProfile {
    /// Classify a frame's angle against this profile's thresholds
    ///
    /// Angles strictly between the thresholds fall in the dead zone and
    /// classify as `Unknown`, which the state machine treats as "no state
    /// change considered this frame".
    pub fn classify(&self, angle_deg: f64) -> MotionState {
        if angle_deg <= self.down_threshold_deg {
            MotionState::Down
        } else if angle_deg >= self.up_threshold_deg {
            MotionState::Up
        } else {
            MotionState::Unknown
        }
    }

    fn validate(&self, name: &str) -> Result<(), EvalError> {
        for joint in [&self.joint1, &self.joint2, &self.joint3] {
            if joint_index(joint).is_none() {
                return Err(EvalError::UnknownJoint(format!("{joint} (in '{name}')")));
            }
        }
        if !(0.0..=180.0).contains(&self.down_threshold_deg)
            || !(0.0..=180.0).contains(&self.up_threshold_deg)
        {
            return Err(EvalError::InvalidProfile(format!(
                "'{name}': thresholds must lie in [0, 180]"
            )));
        }
        if self.down_threshold_deg >= self.up_threshold_deg {
            return Err(EvalError::InvalidProfile(format!(
                "'{name}': down threshold {} must be below up threshold {}",
                self.down_threshold_deg, self.up_threshold_deg
            )));
        }
        Ok(())
    }
}

fn profile(j1: &str, j2: &str, j3: &str, down: f64, up: f64) -> ExerciseProfile {
    ExerciseProfile {
        joint1: j1.to_string(),
        joint2: j2.to_string(),
        joint3: j3.to_string(),
        down_threshold_deg: down,
        up_threshold_deg: up,
    }
}

/// Immutable mapping from exercise identifier to profile
///
/// Construction goes through `builtin` or `from_json` so the default entry
/// and per-profile invariants always hold.
#[derive(Debug, Clone)]
pub struct ProfileTable {
    profiles: HashMap<String, ExerciseProfile>,
}

impl Default for ProfileTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProfileTable {
    /// The built-in table covering the stock exercise set
    pub fn builtin() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            DEFAULT_PROFILE_KEY.to_string(),
            profile("left_shoulder", "left_elbow", "left_wrist", 90.0, 170.0),
        );
        profiles.insert(
            "push_up".to_string(),
            profile("left_shoulder", "left_elbow", "left_wrist", 90.0, 170.0),
        );
        profiles.insert(
            "bicep_curl".to_string(),
            profile("left_shoulder", "left_elbow", "left_wrist", 60.0, 160.0),
        );
        profiles.insert(
            "shoulder_press".to_string(),
            profile("left_shoulder", "left_elbow", "left_wrist", 90.0, 170.0),
        );
        profiles.insert(
            "squat".to_string(),
            profile("left_hip", "left_knee", "left_ankle", 90.0, 170.0),
        );
        profiles.insert(
            "lunge".to_string(),
            profile("left_hip", "left_knee", "left_ankle", 90.0, 170.0),
        );
        profiles.insert(
            "sit_up".to_string(),
            profile("left_shoulder", "left_hip", "left_knee", 90.0, 170.0),
        );
        Self { profiles }
    }

    /// Load a table from host-supplied JSON
    ///
    /// The table must contain a `default` entry, every joint name must
    /// resolve against the canonical topology, and each profile's thresholds
    /// must satisfy `0 <= down < up <= 180`.
    pub fn from_json(json: &str) -> Result<Self, EvalError> {
        let profiles: HashMap<String, ExerciseProfile> = serde_json::from_str(json)?;
        if !profiles.contains_key(DEFAULT_PROFILE_KEY) {
            return Err(EvalError::MissingDefaultProfile);
        }
        for (name, profile) in &profiles {
            profile.validate(name)?;
        }
        Ok(Self { profiles })
    }

    /// Serialize the table to JSON
    pub fn to_json(&self) -> Result<String, EvalError> {
        serde_json::to_string_pretty(&self.profiles).map_err(EvalError::JsonError)
    }

    /// Look up a profile, falling back to the default entry
    ///
    /// The second value reports whether the identifier was recognized; the
    /// fallback itself is a documented recovery, never an error.
    pub fn lookup(&self, exercise: &str) -> (&ExerciseProfile, bool) {
        match self.profiles.get(exercise) {
            Some(profile) => (profile, true),
            None => (&self.profiles[DEFAULT_PROFILE_KEY], false),
        }
    }

    /// Iterate over the configured exercise identifiers
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(|k| k.as_str())
    }
}
