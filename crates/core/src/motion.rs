//! Motion controller - advances the active layer and decides autopilot drops.

use crate::rng::SimpleRng;
use crate::types::{Layer, MOVE_SPEED_PER_MS, TRAVEL_LIMIT};

/// Who decides when the active layer drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveMode {
    /// Drops only on explicit input.
    Manual,
    /// The controller drops once the layer reaches the support plus a random bias.
    Autopilot,
}

/// Outcome of one motion step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionStep {
    /// The layer moved and is still in play.
    Moved,
    /// The layer passed the travel limit without a drop.
    Overran,
    /// Autopilot wants to drop now.
    Drop,
}

#[derive(Debug, Clone)]
pub struct MotionController {
    mode: DriveMode,
    bias: f32,
}

impl MotionController {
    pub fn new(mode: DriveMode, rng: &mut SimpleRng) -> Self {
        Self {
            mode,
            bias: rng.next_bias(),
        }
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DriveMode) {
        self.mode = mode;
    }

    /// Current autopilot precision bias.
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// Draw a new bias; called after every autopilot drop attempt.
    pub fn reroll(&mut self, rng: &mut SimpleRng) {
        self.bias = rng.next_bias();
    }

    /// Advance `active` by `elapsed_ms`, or ask for a drop.
    ///
    /// In autopilot the layer only moves while it is short of the support offset plus
    /// the bias; once there, no movement happens and [`MotionStep::Drop`] is returned.
    pub fn step(&self, active: &mut Layer, support: &Layer, elapsed_ms: u32) -> MotionStep {
        if self.mode == DriveMode::Autopilot {
            let target = support.position.get(active.axis) + self.bias;
            if active.offset() >= target {
                return MotionStep::Drop;
            }
        }

        let axis = active.axis;
        active
            .position
            .add(axis, MOVE_SPEED_PER_MS * elapsed_ms as f32);

        if active.offset() > TRAVEL_LIMIT {
            MotionStep::Overran
        } else {
            MotionStep::Moved
        }
    }
}
