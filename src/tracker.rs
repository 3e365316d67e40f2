//! Repetition state machine
//!
//! A minimal finite-state machine over `{Up, Down, Unknown}` plus a parity
//! counter. Only the `Up → Down` edge drives the counter, so the unit of one
//! counted repetition is a full `down → up → down` cycle regardless of which
//! state the motion started in, and a partial first movement is never
//! credited.

use crate::types::MotionState;

/// Score awarded for each completed repetition
pub const REPETITION_REWARD: u32 = 10;

/// Per-exercise repetition tracking state
///
/// `transition_count` is a parity counter for "has one return-to-down edge
/// been seen since the last completed repetition"; it is 0 or 1 between
/// steps. Strictly frame-ordered: the caller must deliver frames
/// sequentially and serialize access if frames arrive from multiple
/// producers.
#[derive(Debug, Clone)]
pub struct RepetitionTracker {
    previous_state: MotionState,
    transition_count: u8,
    repetition_count: u32,
    score: u32,
}

impl Default for RepetitionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RepetitionTracker {
    /// Create a fresh tracker (no motion observed yet)
    pub fn new() -> Self {
        Self {
            previous_state: MotionState::Unknown,
            transition_count: 0,
            repetition_count: 0,
            score: 0,
        }
    }

    /// Advance the machine by one frame's classified state
    ///
    /// Returns true when this frame completed a repetition. Ambiguous
    /// (`Unknown`) and repeated states are skipped, not destructive, so
    /// jittery frames in the dead zone cannot double-count or reset progress.
    pub fn step(&mut self, current: MotionState) -> bool {
        if current == MotionState::Unknown || current == self.previous_state {
            return false;
        }

        let mut completed = false;
        if self.previous_state == MotionState::Up && current == MotionState::Down {
            self.transition_count += 1;
            if self.transition_count == 2 {
                self.repetition_count += 1;
                self.score += REPETITION_REWARD;
                self.transition_count = 0;
                completed = true;
            }
        }
        self.previous_state = current;
        completed
    }

    /// Reset to the initial state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn previous_state(&self) -> MotionState {
        self.previous_state
    }

    pub fn repetition_count(&self) -> u32 {
        self.repetition_count
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    #[cfg(test)]
    fn transition_count(&self) -> u8 {
        self.transition_count
    }
}
