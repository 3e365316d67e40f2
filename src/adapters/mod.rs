//! Pose-model frame adapters
//!
//! This module provides adapters that parse raw pose-estimation output and
//! map it to the canonical landmark topology. The pose model is a capability
//! collaborator behind this narrow seam, so the state machine and geometry
//! are testable with synthetic landmark sequences and no ML runtime present.

mod blazepose;
mod mediapipe;

pub use blazepose::BlazePoseAdapter;
pub use mediapipe::MediaPipeAdapter;

use crate::error::EvalError;
use crate::landmarks::LandmarkSet;

/// Trait for pose-model frame adapters
pub trait PoseFrameAdapter {
    /// Parse one frame of raw model output into a landmark set
    ///
    /// A frame with no detected pose parses to an empty set; the downstream
    /// origin-default policy then degrades the frame safely.
    fn parse(&self, raw_json: &str) -> Result<LandmarkSet, EvalError>;
}
