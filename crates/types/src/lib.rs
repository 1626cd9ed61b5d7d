//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the stacker.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, physics, terminal rendering).
//!
//! # World Units
//!
//! The tower lives in a right-handed world where `y` points up:
//!
//! - **Layer height**: 1 unit (`BOX_HEIGHT`)
//! - **Motion axes**: `x` and `z`, alternating per layer
//! - **Spawn offset**: a new layer starts at -10 on its motion axis
//! - **Travel limit**: a layer that passes +10 without being dropped is a miss
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `OVERLAP_POPUP_MS` | 1000 | Overlap percentage popup lifetime |
//! | `RING_EFFECT_MS` | 600 | Ring acknowledgment lifetime |
//! | `SCORE_PULSE_MS` | 400 | Score highlight after a placement |
//! | `RESULTS_DELAY_MS` | 300 | Delay before the results panel appears |
//! | `DEMO_RESTART_MS` | 1500 | Demo tower rebuild delay after a demo miss |
//!
//! # Examples
//!
//! ```
//! use tui_stacker_types::{Axis, GameAction, Vec3};
//!
//! assert_eq!(Axis::X.perpendicular(), Axis::Z);
//! assert_eq!(Axis::from_str("z"), Some(Axis::Z));
//!
//! let mut p = Vec3::new(1.0, 2.0, 3.0);
//! p.set(Axis::Z, -10.0);
//! assert_eq!(p.get(Axis::Z), -10.0);
//!
//! assert_eq!(GameAction::from_str("toggleMute"), Some(GameAction::ToggleMute));
//! ```

/// Height of every layer in world units.
pub const BOX_HEIGHT: f32 = 1.0;

/// Default base box size (width and depth of the foundation).
pub const DEFAULT_BOX_SIZE: f32 = 3.0;

/// Active layer speed along its motion axis, in world units per millisecond.
pub const MOVE_SPEED_PER_MS: f32 = 0.008;

/// Motion-axis coordinate a new active layer starts from.
pub const SPAWN_OFFSET: f32 = -10.0;

/// Motion-axis coordinate past which an undropped layer counts as a miss.
pub const TRAVEL_LIMIT: f32 = 10.0;

/// Half-width of the autopilot bias range: bias is drawn from `[-0.5, 0.5)`.
pub const AUTOPILOT_BIAS_HALF_RANGE: f32 = 0.5;

/// Camera height when a tower is (re)built.
pub const CAMERA_START_Y: f32 = 4.0;

/// How many layers the camera stays above the top of the placed tower.
pub const CAMERA_LEAD: f32 = 4.0;

/// Gravity applied to debris, in world units per second squared.
pub const GRAVITY: f32 = -10.0;

/// Mass of a full-size debris piece; scaled by its footprint.
pub const DEBRIS_BASE_MASS: f32 = 5.0;

/// Debris falling below this height leaves the world.
pub const DEBRIS_FLOOR_Y: f32 = -30.0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Overlap percentage popup lifetime.
pub const OVERLAP_POPUP_MS: u32 = 1000;

/// Ring acknowledgment lifetime.
pub const RING_EFFECT_MS: u32 = 600;

/// Score highlight duration after a placement.
pub const SCORE_PULSE_MS: u32 = 400;

/// Delay before the results panel is revealed once a run ends.
pub const RESULTS_DELAY_MS: u32 = 300;

/// Delay before the demo rebuilds its tower after the autopilot misses.
pub const DEMO_RESTART_MS: u32 = 1500;

/// Storage key the high score is persisted under.
pub const HIGH_SCORE_KEY: &str = "stackerHighScore";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_MS, 16);
        assert_eq!(OVERLAP_POPUP_MS, 1000);
        assert_eq!(RING_EFFECT_MS, 600);
        assert_eq!(SCORE_PULSE_MS, 400);
        assert_eq!(RESULTS_DELAY_MS, 300);
    }

    #[test]
    fn axis_alternates() {
        assert_eq!(Axis::X.perpendicular(), Axis::Z);
        assert_eq!(Axis::Z.perpendicular(), Axis::X);
        assert_eq!(Axis::X.perpendicular().perpendicular(), Axis::X);
    }

    #[test]
    fn vec3_axis_access() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.get(Axis::X), 1.0);
        assert_eq!(v.get(Axis::Z), 3.0);
        v.add(Axis::X, 0.5);
        assert_eq!(v.x, 1.5);
        assert_eq!(v.y, 2.0);
    }

    #[test]
    fn layer_size_along_axis() {
        let mut layer = Layer::new(Vec3::ZERO, 3.0, 2.0, Axis::X);
        assert_eq!(layer.size(), 3.0);
        layer.axis = Axis::Z;
        assert_eq!(layer.size(), 2.0);
        layer.set_size(1.0);
        assert_eq!(layer.depth, 1.0);
        assert_eq!(layer.width, 3.0);
    }

    #[test]
    fn feedback_tone_thresholds() {
        assert_eq!(FeedbackTone::from_percent(100), FeedbackTone::Green);
        assert_eq!(FeedbackTone::from_percent(90), FeedbackTone::Green);
        assert_eq!(FeedbackTone::from_percent(89), FeedbackTone::Orange);
        assert_eq!(FeedbackTone::from_percent(60), FeedbackTone::Orange);
        assert_eq!(FeedbackTone::from_percent(59), FeedbackTone::Red);
        assert_eq!(FeedbackTone::from_percent(0), FeedbackTone::Red);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!Rect::new(0, 0, 0, 0).contains(0, 0));
    }

    #[test]
    fn hit_regions_prefer_open_modal() {
        let regions = HitRegions {
            mute: Rect::new(0, 0, 4, 1),
            help: Some(Rect::new(0, 0, 20, 10)),
            results_close: None,
        };
        assert_eq!(regions.target_at(1, 0), PointerTarget::HelpModal);
        assert_eq!(regions.target_at(30, 0), PointerTarget::PlayArea);

        let closed = HitRegions {
            help: None,
            results_close: Some(Rect::new(10, 10, 3, 1)),
            ..regions
        };
        assert_eq!(closed.target_at(1, 0), PointerTarget::MuteButton);
        assert_eq!(closed.target_at(11, 10), PointerTarget::ResultsClose);
    }
}

/// Horizontal motion axis of a layer.
///
/// Consecutive layers alternate between the two axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// The other horizontal axis.
    pub fn perpendicular(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Parse axis from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "x" => Some(Axis::X),
            "z" => Some(Axis::Z),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Z => "z",
        }
    }
}

/// A point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Coordinate along a horizontal axis.
    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Z => self.z = value,
        }
    }

    pub fn add(&mut self, axis: Axis, delta: f32) {
        self.set(axis, self.get(axis) + delta);
    }
}

/// One box of the tower (or a debris fragment of one).
///
/// `width` spans the x axis and `depth` the z axis; the height is always [`BOX_HEIGHT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub position: Vec3,
    pub width: f32,
    pub depth: f32,
    pub axis: Axis,
}

impl Layer {
    pub fn new(position: Vec3, width: f32, depth: f32, axis: Axis) -> Self {
        Self {
            position,
            width,
            depth,
            axis,
        }
    }

    /// Size along the layer's own motion axis.
    pub fn size(&self) -> f32 {
        self.size_along(self.axis)
    }

    pub fn size_along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.width,
            Axis::Z => self.depth,
        }
    }

    /// Set the size along the layer's own motion axis.
    pub fn set_size(&mut self, size: f32) {
        match self.axis {
            Axis::X => self.width = size,
            Axis::Z => self.depth = size,
        }
    }

    /// Position along the layer's own motion axis.
    pub fn offset(&self) -> f32 {
        self.position.get(self.axis)
    }
}

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Autopilot drives an unscored showcase tower.
    Demo,
    /// The player is stacking; placements score.
    Active,
    /// The run is over; waiting for a restart.
    Ended,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Demo => "demo",
            Phase::Active => "active",
            Phase::Ended => "ended",
        }
    }
}

/// Semantic actions produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Drop the active layer (or start a game from the demo)
    Drop,
    /// Start over after a run ends (or leave the demo)
    Restart,
    /// Toggle sound cues
    ToggleMute,
    /// Show or hide the shortcuts help
    ToggleHelp,
    /// Close the topmost overlay
    Dismiss,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_stacker_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("drop"), Some(GameAction::Drop));
    /// assert_eq!(GameAction::from_str("RESTART"), Some(GameAction::Restart));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "drop" => Some(GameAction::Drop),
            "restart" => Some(GameAction::Restart),
            "togglemute" => Some(GameAction::ToggleMute),
            "togglehelp" => Some(GameAction::ToggleHelp),
            "dismiss" => Some(GameAction::Dismiss),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Drop => "drop",
            GameAction::Restart => "restart",
            GameAction::ToggleMute => "toggleMute",
            GameAction::ToggleHelp => "toggleHelp",
            GameAction::Dismiss => "dismiss",
        }
    }
}

/// Sound cues the core asks the audio collaborator to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Place,
    Fail,
}

/// Colour band for the overlap percentage popup.
///
/// - **Green**: 90% and above
/// - **Orange**: 60% to 89%
/// - **Red**: below 60%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackTone {
    Green,
    Orange,
    Red,
}

impl FeedbackTone {
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 90 {
            FeedbackTone::Green
        } else if percent >= 60 {
            FeedbackTone::Orange
        } else {
            FeedbackTone::Red
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MissReason {
    /// The drop left no overlap with the layer below.
    NoOverlap,
    /// The active layer travelled past the limit without a drop.
    Overrun,
}

impl MissReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissReason::NoOverlap => "no_overlap",
            MissReason::Overrun => "overrun",
        }
    }
}

/// Identifier of a debris body shared with the physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DebrisId(pub u32);

/// Core-side notification emitted by the session.
///
/// Collaborators (physics, audio, score display, storage) are driven from these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoreEvent {
    /// The stack was discarded and rebuilt; every previous body is gone.
    Reset { phase: Phase },
    /// A layer was pushed onto the stack.
    LayerAdded { index: usize, layer: Layer },
    /// A layer was cut down to its overlap.
    LayerResized { index: usize, layer: Layer },
    /// The top layer left the stack (it became debris).
    LayerRemoved { index: usize },
    /// A falling fragment was created.
    DebrisSpawned { id: DebrisId, layer: Layer, mass: f32 },
    /// A drop landed; `score` is the session score after it.
    Placed {
        score: u32,
        overlap_percent: u32,
        scored: bool,
    },
    /// The run ended.
    Missed {
        reason: MissReason,
        overlap_percent: Option<u32>,
        final_score: u32,
        high_score: u32,
        scored: bool,
    },
    /// A new high score should be persisted.
    HighScore { value: u32 },
}

/// What a pointer press landed on.
///
/// Overlay controls are exclusion zones: pressing them never drives gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// Anywhere that is not an overlay control.
    PlayArea,
    /// The mute toggle button.
    MuteButton,
    /// Inside the shortcuts help modal.
    HelpModal,
    /// The close button of the results panel.
    ResultsClose,
}

/// Terminal-cell rectangle (used for pointer hit regions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x
            && row >= self.y
            && (col as u32) < self.x as u32 + self.width as u32
            && (row as u32) < self.y as u32 + self.height as u32
    }
}

/// Screen areas of the overlay controls, as laid out by the last render.
///
/// A closed help modal or a hidden results panel has no region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitRegions {
    pub mute: Rect,
    pub help: Option<Rect>,
    pub results_close: Option<Rect>,
}

impl HitRegions {
    /// Resolve a press at `(col, row)`; anything outside the controls is the play area.
    pub fn target_at(&self, col: u16, row: u16) -> PointerTarget {
        if self.help.is_some_and(|r| r.contains(col, row)) {
            PointerTarget::HelpModal
        } else if self.results_close.is_some_and(|r| r.contains(col, row)) {
            PointerTarget::ResultsClose
        } else if self.mute.contains(col, row) {
            PointerTarget::MuteButton
        } else {
            PointerTarget::PlayArea
        }
    }
}
