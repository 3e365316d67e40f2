//! Landmark sets and the canonical joint topology
//!
//! A `LandmarkSet` is one frame's worth of named 2-D points, normalized to
//! [0, 1] of the frame width/height, in the canonical 33-point BlazePose
//! topology. It is produced fresh each frame by an adapter and owned
//! transiently by the caller for the duration of one evaluation call.

use serde::{Deserialize, Serialize};

/// Canonical joint names, in landmark-index order
///
/// Matches the BlazePose/MediaPipe 33-point topology so adapter output and
/// profile joint identifiers resolve against the same table.
pub const JOINT_NAMES: [&str; 33] = [
    "nose",
    "left_eye_inner",
    "left_eye",
    "left_eye_outer",
    "right_eye_inner",
    "right_eye",
    "right_eye_outer",
    "left_ear",
    "right_ear",
    "mouth_left",
    "mouth_right",
    "left_shoulder",
    "right_shoulder",
    "left_elbow",
    "right_elbow",
    "left_wrist",
    "right_wrist",
    "left_pinky",
    "right_pinky",
    "left_index",
    "right_index",
    "left_thumb",
    "right_thumb",
    "left_hip",
    "right_hip",
    "left_knee",
    "right_knee",
    "left_ankle",
    "right_ankle",
    "left_heel",
    "right_heel",
    "left_foot_index",
    "right_foot_index",
];

/// Resolve a joint name to its canonical landmark index
pub fn joint_index(name: &str) -> Option<usize> {
    JOINT_NAMES.iter().position(|&n| n == name)
}

/// A 2-D point normalized to [0, 1] of frame width/height
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin, substituted for missing landmarks
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One frame of named landmark points
///
/// `points` always holds one slot per canonical joint; every construction
/// path (including deserialization) normalizes to that length.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawLandmarkSet")]
pub struct LandmarkSet {
    points: Vec<Option<Point>>,
}

#[derive(Deserialize)]
struct RawLandmarkSet {
    points: Vec<Option<Point>>,
}

impl From<RawLandmarkSet> for LandmarkSet {
    fn from(raw: RawLandmarkSet) -> Self {
        Self::from_indexed(raw.points)
    }
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self::new()
    }
}

impl LandmarkSet {
    /// Create an empty set (every joint missing)
    pub fn new() -> Self {
        Self {
            points: vec![None; JOINT_NAMES.len()],
        }
    }

    /// Create a set from points in canonical index order
    ///
    /// Indices beyond the canonical topology are ignored; indices not covered
    /// by the input remain missing.
    pub fn from_indexed(points: Vec<Option<Point>>) -> Self {
        let mut set = Self::new();
        for (i, p) in points.into_iter().take(JOINT_NAMES.len()).enumerate() {
            set.points[i] = p;
        }
        set
    }

    /// Set a joint by name; returns false if the name is not in the topology
    pub fn set(&mut self, name: &str, point: Point) -> bool {
        match joint_index(name) {
            Some(i) => {
                self.points[i] = Some(point);
                true
            }
            None => false,
        }
    }

    /// Look up a joint by name
    pub fn get(&self, name: &str) -> Option<Point> {
        joint_index(name).and_then(|i| self.points.get(i).copied().flatten())
    }

    /// Look up a joint by name, substituting the origin when missing
    ///
    /// The second value reports whether the joint was actually present.
    pub fn get_or_origin(&self, name: &str) -> (Point, bool) {
        match self.get(name) {
            Some(p) => (p, true),
            None => (Point::ORIGIN, false),
        }
    }

    /// Number of joints present in this frame
    pub fn present_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// Whether no joints were detected this frame
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }
}
