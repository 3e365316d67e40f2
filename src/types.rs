//! Core types for the Repform pipeline
//!
//! This module defines the values that flow out of each frame evaluation:
//! motion states, degraded-input flags, per-frame results and end-of-exercise
//! session summaries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Motion state derived from a single frame's joint angle
///
/// Only the single previous value is retained by the state machine; no
/// longer history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionState {
    /// Limb fully extended (angle at or above the up threshold)
    Up,
    /// Limb contracted (angle at or below the down threshold)
    Down,
    /// Angle in the dead zone between thresholds; no state change considered
    Unknown,
}

impl MotionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MotionState::Up => "up",
            MotionState::Down => "down",
            MotionState::Unknown => "unknown",
        }
    }
}

/// Flag indicating a degraded input on one frame
///
/// These are never errors: each condition is recovered locally by a safe
/// numeric default and reported here for transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFlag {
    /// A tracked joint was absent; the origin point was substituted
    MissingLandmark,
    /// The exercise identifier had no profile; the default profile was used
    UnknownExercise,
    /// A bracketing point coincided with the vertex; angle direction undefined
    DegenerateGeometry,
}

/// Result of evaluating one frame of landmarks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameEvaluation {
    /// Included angle at the tracked joint (degrees, 0-180)
    pub angle_deg: f64,
    /// Motion state classified from the angle
    pub state: MotionState,
    /// Repetitions completed so far in this session
    pub repetition_count: u32,
    /// Score accumulated so far in this session
    pub score: u32,
    /// Whether this frame completed a full down→up→down cycle
    pub repetition_completed: bool,
    /// Degraded-input flags raised on this frame
    pub flags: Vec<InputFlag>,
}

/// Summary of one finished (or in-progress) exercise session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Unique id of the session instance
    pub session_id: String,
    /// Producer name, for provenance
    pub producer: String,
    /// Producer version, for provenance
    pub producer_version: String,
    /// Exercise identifier the session was started with
    pub exercise: String,
    /// When the session was created (UTC)
    pub started_at: DateTime<Utc>,
    /// Total repetitions counted
    pub repetition_count: u32,
    /// Total score accumulated
    pub score: u32,
    /// Number of frames evaluated
    pub frames_evaluated: u64,
}
