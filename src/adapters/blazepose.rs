//! BlazePose (TensorFlow.js pose-detection) adapter
//!
//! Parses the `estimatePoses` output: an array of poses whose keypoints
//! carry pixel coordinates, a confidence score and a joint name. Coordinates
//! are normalized by the frame dimensions; low-confidence keypoints are
//! treated as missing.

use crate::error::EvalError;
use crate::landmarks::{LandmarkSet, Point};
use serde::Deserialize;

use super::PoseFrameAdapter;

/// BlazePose frame adapter
pub struct BlazePoseAdapter {
    frame_width: f64,
    frame_height: f64,
    min_score: f64,
}

impl BlazePoseAdapter {
    /// Create an adapter for frames of the given pixel dimensions
    pub fn new(frame_width: f64, frame_height: f64) -> Result<Self, EvalError> {
        if !(frame_width.is_finite() && frame_width > 0.0)
            || !(frame_height.is_finite() && frame_height > 0.0)
        {
            return Err(EvalError::InvalidFrameDimensions(format!(
                "{frame_width}x{frame_height}"
            )));
        }
        Ok(Self {
            frame_width,
            frame_height,
            min_score: 0.0,
        })
    }

    /// Treat keypoints below `min_score` as missing
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }
}

impl PoseFrameAdapter for BlazePoseAdapter {
    fn parse(&self, raw_json: &str) -> Result<LandmarkSet, EvalError> {
        let poses: Vec<BlazePose> = serde_json::from_str(raw_json)?;
        let mut set = LandmarkSet::new();

        // Single-person evaluator: only the first detected pose is used
        let Some(pose) = poses.first() else {
            return Ok(set);
        };

        for keypoint in &pose.keypoints {
            let Some(name) = &keypoint.name else {
                continue;
            };
            if let Some(score) = keypoint.score {
                if score < self.min_score {
                    continue;
                }
            }
            let point = Point::new(
                keypoint.x / self.frame_width,
                keypoint.y / self.frame_height,
            );
            set.set(name, point);
        }

        Ok(set)
    }
}

#[derive(Debug, Deserialize)]
struct BlazePose {
    #[serde(default)]
    keypoints: Vec<BlazePoseKeypoint>,
}

#[derive(Debug, Deserialize)]
struct BlazePoseKeypoint {
    x: f64,
    y: f64,
    score: Option<f64>,
    name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_pose_json() -> &'static str {
        r#"[{
            "score": 0.98,
            "keypoints": [
                { "x": 192.0, "y": 144.0, "score": 0.99, "name": "left_shoulder" },
                { "x": 320.0, "y": 144.0, "score": 0.97, "name": "left_elbow" },
                { "x": 448.0, "y": 144.0, "score": 0.21, "name": "left_wrist" },
                { "x": 100.0, "y": 100.0, "score": 0.95, "name": "left_antenna" }
            ]
        }]"#
    }

    #[test]
    fn test_parse_normalizes_pixel_coordinates() {
        let adapter = BlazePoseAdapter::new(640.0, 480.0).unwrap();
        let set = adapter.parse(sample_pose_json()).unwrap();

        assert_eq!(set.get("left_shoulder"), Some(Point::new(0.3, 0.3)));
        assert_eq!(set.get("left_elbow"), Some(Point::new(0.5, 0.3)));
        // Unknown joint names are dropped, not errors
        assert_eq!(set.present_count(), 3);
    }

    #[test]
    fn test_min_score_gates_low_confidence_keypoints() {
        let adapter = BlazePoseAdapter::new(640.0, 480.0)
            .unwrap()
            .with_min_score(0.5);
        let set = adapter.parse(sample_pose_json()).unwrap();

        assert!(set.get("left_shoulder").is_some());
        assert_eq!(set.get("left_wrist"), None);
    }

    #[test]
    fn test_empty_detection_parses_to_empty_set() {
        let adapter = BlazePoseAdapter::new(640.0, 480.0).unwrap();
        let set = adapter.parse("[]").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let adapter = BlazePoseAdapter::new(640.0, 480.0).unwrap();
        let result = adapter.parse("not json");
        assert!(matches!(result, Err(EvalError::JsonError(_))));
    }

    #[test]
    fn test_rejects_degenerate_frame_dimensions() {
        assert!(matches!(
            BlazePoseAdapter::new(0.0, 480.0),
            Err(EvalError::InvalidFrameDimensions(_))
        ));
        assert!(matches!(
            BlazePoseAdapter::new(640.0, f64::NAN),
            Err(EvalError::InvalidFrameDimensions(_))
        ));
    }
}
