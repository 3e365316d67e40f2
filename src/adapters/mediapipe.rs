//! MediaPipe Pose adapter
//!
//! Parses MediaPipe Pose output: 33 landmarks in canonical index order with
//! already-normalized coordinates and an optional visibility score. Landmarks
//! below the visibility floor are treated as missing.

use crate::error::EvalError;
use crate::landmarks::{LandmarkSet, Point};
use serde::Deserialize;

use super::PoseFrameAdapter;

/// Default visibility floor below which a landmark is treated as missing
pub const DEFAULT_MIN_VISIBILITY: f64 = 0.5;

/// MediaPipe Pose frame adapter
pub struct MediaPipeAdapter {
    min_visibility: f64,
}

impl Default for MediaPipeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPipeAdapter {
    pub fn new() -> Self {
        Self {
            min_visibility: DEFAULT_MIN_VISIBILITY,
        }
    }

    /// Override the visibility floor
    pub fn with_min_visibility(mut self, min_visibility: f64) -> Self {
        self.min_visibility = min_visibility;
        self
    }
}

impl PoseFrameAdapter for MediaPipeAdapter {
    fn parse(&self, raw_json: &str) -> Result<LandmarkSet, EvalError> {
        let payload: MediaPipePayload = serde_json::from_str(raw_json)?;

        let points = payload
            .landmarks
            .into_iter()
            .map(|lm| {
                let visible = lm
                    .visibility
                    .map(|v| v >= self.min_visibility)
                    .unwrap_or(true);
                visible.then(|| Point::new(lm.x, lm.y))
            })
            .collect();

        Ok(LandmarkSet::from_indexed(points))
    }
}

#[derive(Debug, Deserialize)]
struct MediaPipePayload {
    #[serde(default)]
    landmarks: Vec<MediaPipeLandmark>,
}

#[derive(Debug, Deserialize)]
struct MediaPipeLandmark {
    x: f64,
    y: f64,
    visibility: Option<f64>,
}
