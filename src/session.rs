//! Evaluation sessions and the workout orchestrator
//!
//! An `EvaluationSession` holds the mutable state for one exercise: the
//! resolved profile and the repetition tracker. A `WorkoutEvaluator` owns the
//! profile table and at most one active session, creating a fresh session
//! whenever the active exercise changes.

use crate::angle::included_angle;
use crate::landmarks::LandmarkSet;
use crate::profiles::{ExerciseProfile, ProfileTable};
use crate::tracker::RepetitionTracker;
use crate::types::{FrameEvaluation, InputFlag, SessionSummary};
use crate::{PRODUCER_NAME, REPFORM_VERSION};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Mutable per-exercise evaluation state
///
/// Each `evaluate` call is a pure function of (landmarks, session state) and
/// must be invoked strictly in frame order; the session assumes exclusive
/// access and performs no locking of its own.
pub struct EvaluationSession {
    session_id: String,
    exercise: String,
    profile: ExerciseProfile,
    profile_known: bool,
    tracker: RepetitionTracker,
    started_at: DateTime<Utc>,
    frames_evaluated: u64,
}

impl EvaluationSession {
    /// Start a session for `exercise`, resolving its profile from the table
    ///
    /// An unrecognized identifier falls back to the default profile; each
    /// frame evaluated under the fallback carries an `UnknownExercise` flag.
    pub fn new(table: &ProfileTable, exercise: &str) -> Self {
        let (profile, profile_known) = table.lookup(exercise);
        Self {
            session_id: Uuid::new_v4().to_string(),
            exercise: exercise.to_string(),
            profile: profile.clone(),
            profile_known,
            tracker: RepetitionTracker::new(),
            started_at: Utc::now(),
            frames_evaluated: 0,
        }
    }

    /// Evaluate one frame of landmarks
    ///
    /// Missing joints degrade to the origin and degenerate geometry to angle
    /// 0; both are reported as flags, never as errors. A transient bad frame
    /// at worst fails to register a transition.
    pub fn evaluate(&mut self, landmarks: &LandmarkSet) -> FrameEvaluation {
        let mut flags = Vec::new();
        if !self.profile_known {
            flags.push(InputFlag::UnknownExercise);
        }

        let (p1, p1_present) = landmarks.get_or_origin(&self.profile.joint1);
        let (p2, p2_present) = landmarks.get_or_origin(&self.profile.joint2);
        let (p3, p3_present) = landmarks.get_or_origin(&self.profile.joint3);
        if !(p1_present && p2_present && p3_present) {
            flags.push(InputFlag::MissingLandmark);
        }
        if p1 == p2 || p3 == p2 {
            flags.push(InputFlag::DegenerateGeometry);
        }

        let angle_deg = included_angle(p1, p2, p3);
        let state = self.profile.classify(angle_deg);
        let repetition_completed = self.tracker.step(state);
        self.frames_evaluated += 1;

        FrameEvaluation {
            angle_deg,
            state,
            repetition_count: self.tracker.repetition_count(),
            score: self.tracker.score(),
            repetition_completed,
            flags,
        }
    }

    /// Exercise identifier this session was started with
    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    /// Snapshot of the session's counters
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            producer: PRODUCER_NAME.to_string(),
            producer_version: REPFORM_VERSION.to_string(),
            exercise: self.exercise.clone(),
            started_at: self.started_at,
            repetition_count: self.tracker.repetition_count(),
            score: self.tracker.score(),
            frames_evaluated: self.frames_evaluated,
        }
    }
}

/// Stateful orchestrator driving one exercise at a time
///
/// Owns the profile table and the active session. Switching exercises
/// discards the old session's state entirely, including its score; a caller
/// wanting a workout-wide total aggregates the returned summaries.
pub struct WorkoutEvaluator {
    table: ProfileTable,
    active: Option<EvaluationSession>,
}

impl Default for WorkoutEvaluator {
    fn default() -> Self {
        Self::new(ProfileTable::builtin())
    }
}

impl WorkoutEvaluator {
    /// Create an evaluator over the given profile table
    pub fn new(table: ProfileTable) -> Self {
        Self {
            table,
            active: None,
        }
    }

    /// Begin a fresh session for `exercise`
    ///
    /// Returns the summary of the session it replaced, if any.
    pub fn start_exercise(&mut self, exercise: &str) -> Option<SessionSummary> {
        let finished = self.active.as_ref().map(|s| s.summary());
        self.active = Some(EvaluationSession::new(&self.table, exercise));
        finished
    }

    /// Evaluate one frame against the active session
    ///
    /// Returns `None` when no exercise has been started.
    pub fn evaluate_frame(&mut self, landmarks: &LandmarkSet) -> Option<FrameEvaluation> {
        self.active.as_mut().map(|s| s.evaluate(landmarks))
    }

    /// Finish the active session and return its summary
    pub fn finish(&mut self) -> Option<SessionSummary> {
        self.active.take().map(|s| s.summary())
    }

    /// Summary of the active session, if any
    pub fn summary(&self) -> Option<SessionSummary> {
        self.active.as_ref().map(|s| s.summary())
    }

    /// Identifier of the active exercise, if any
    pub fn active_exercise(&self) -> Option<&str> {
        self.active.as_ref().map(|s| s.exercise())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Point;
    use crate::types::MotionState;
    use pretty_assertions::assert_eq;

    /// Left arm held straight along the x axis: included elbow angle 180°
    fn arm_extended() -> LandmarkSet {
        let mut set = LandmarkSet::new();
        set.set("left_shoulder", Point::new(0.3, 0.3));
        set.set("left_elbow", Point::new(0.5, 0.3));
        set.set("left_wrist", Point::new(0.7, 0.3));
        set
    }

    /// Forearm folded perpendicular to the upper arm: elbow angle 90°
    fn arm_contracted() -> LandmarkSet {
        let mut set = LandmarkSet::new();
        set.set("left_shoulder", Point::new(0.3, 0.3));
        set.set("left_elbow", Point::new(0.5, 0.3));
        set.set("left_wrist", Point::new(0.5, 0.5));
        set
    }

    /// Forearm mid-bend: elbow angle in the dead zone
    fn arm_midway() -> LandmarkSet {
        let mut set = LandmarkSet::new();
        set.set("left_shoulder", Point::new(0.3, 0.3));
        set.set("left_elbow", Point::new(0.5, 0.3));
        set.set("left_wrist", Point::new(0.65, 0.45));
        set
    }

    #[test]
    fn test_landmark_stream_counts_repetition() {
        let table = ProfileTable::builtin();
        let mut session = EvaluationSession::new(&table, "push_up");

        let frames = [
            arm_extended(),
            arm_contracted(),
            arm_extended(),
            arm_contracted(),
        ];
        let mut last = None;
        for frame in &frames {
            last = Some(session.evaluate(frame));
        }

        let last = last.unwrap();
        assert!(last.repetition_completed);
        assert_eq!(last.repetition_count, 1);
        assert_eq!(last.score, 10);
        assert!(last.flags.is_empty());
    }

    #[test]
    fn test_dead_zone_frame_is_skipped() {
        let table = ProfileTable::builtin();
        let mut session = EvaluationSession::new(&table, "push_up");

        session.evaluate(&arm_extended());
        session.evaluate(&arm_contracted());
        let mid = session.evaluate(&arm_midway());
        assert_eq!(mid.state, MotionState::Unknown);

        session.evaluate(&arm_extended());
        let last = session.evaluate(&arm_contracted());
        assert_eq!(last.repetition_count, 1);
    }

    #[test]
    fn test_missing_landmarks_degrade_to_down() {
        let table = ProfileTable::builtin();
        let mut session = EvaluationSession::new(&table, "push_up");

        let result = session.evaluate(&LandmarkSet::new());
        assert_eq!(result.angle_deg, 0.0);
        assert_eq!(result.state, MotionState::Down);
        assert!(!result.repetition_completed);
        assert!(result.flags.contains(&InputFlag::MissingLandmark));
        assert!(result.flags.contains(&InputFlag::DegenerateGeometry));
    }

    #[test]
    fn test_empty_frames_cannot_fabricate_repetitions() {
        let table = ProfileTable::builtin();
        let mut session = EvaluationSession::new(&table, "push_up");

        for _ in 0..20 {
            let result = session.evaluate(&LandmarkSet::new());
            assert_eq!(result.repetition_count, 0);
        }
    }

    #[test]
    fn test_unknown_exercise_uses_default_profile_and_flags() {
        let table = ProfileTable::builtin();
        let mut session = EvaluationSession::new(&table, "underwater_basket_weaving");

        let result = session.evaluate(&arm_extended());
        assert_eq!(result.state, MotionState::Up);
        assert!(result.flags.contains(&InputFlag::UnknownExercise));
    }

    #[test]
    fn test_switching_exercise_resets_all_counters() {
        let mut evaluator = WorkoutEvaluator::default();
        evaluator.start_exercise("push_up");

        for frame in [
            arm_extended(),
            arm_contracted(),
            arm_extended(),
            arm_contracted(),
        ] {
            evaluator.evaluate_frame(&frame);
        }
        let finished = evaluator.start_exercise("squat").unwrap();
        assert_eq!(finished.repetition_count, 1);
        assert_eq!(finished.score, 10);

        // The new session starts from scratch; score does not carry over
        let summary = evaluator.summary().unwrap();
        assert_eq!(summary.repetition_count, 0);
        assert_eq!(summary.score, 0);
        assert_eq!(summary.frames_evaluated, 0);
        assert_eq!(evaluator.active_exercise(), Some("squat"));
    }

    #[test]
    fn test_evaluate_without_active_session() {
        let mut evaluator = WorkoutEvaluator::default();
        assert!(evaluator.evaluate_frame(&arm_extended()).is_none());
        assert!(evaluator.finish().is_none());
    }

    #[test]
    fn test_summary_serializes_to_json() {
        let mut evaluator = WorkoutEvaluator::default();
        evaluator.start_exercise("push_up");
        evaluator.evaluate_frame(&arm_extended());

        let summary = evaluator.finish().unwrap();
        assert_eq!(summary.frames_evaluated, 1);

        let json = serde_json::to_string(&summary).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["exercise"], "push_up");
        assert_eq!(parsed["frames_evaluated"], 1);
        assert_eq!(parsed["producer"], crate::PRODUCER_NAME);
        assert!(parsed["session_id"].as_str().is_some());
    }
}
