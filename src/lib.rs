//! Repform - On-device repetition evaluator for pose-estimation landmark streams
//!
//! Repform converts a per-frame stream of normalized body-joint positions into
//! a repetition count and score for a single exercise through a deterministic
//! pipeline: landmark adaptation → joint-angle geometry → motion-state
//! classification → repetition state machine.
//!
//! ## Modules
//!
//! - **Adapters**: Parse pose-model output (BlazePose, MediaPipe) into landmark sets
//! - **Angle**: Included-angle geometry at a tracked joint
//! - **Profiles**: Per-exercise joint selection and motion thresholds
//! - **Tracker**: The down→up→down repetition state machine
//! - **Session**: Per-exercise evaluation state and the workout orchestrator

pub mod adapters;
pub mod angle;
pub mod error;
pub mod landmarks;
pub mod profiles;
pub mod session;
pub mod tracker;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use error::EvalError;
pub use landmarks::{LandmarkSet, Point};
pub use profiles::{ExerciseProfile, ProfileTable, DEFAULT_PROFILE_KEY};
pub use session::{EvaluationSession, WorkoutEvaluator};
pub use tracker::{RepetitionTracker, REPETITION_REWARD};
pub use types::{FrameEvaluation, InputFlag, MotionState, SessionSummary};

// Adapter exports
pub use adapters::{BlazePoseAdapter, MediaPipeAdapter, PoseFrameAdapter};

/// Repform version embedded in session summaries
pub const REPFORM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for session summaries
pub const PRODUCER_NAME: &str = "repform";
