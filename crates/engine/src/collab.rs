//! Collaborator interfaces.
//!
//! The engine talks to the outside world only through these traits. Every call is a
//! one-way notification: nothing is awaited and nothing can fail back into the game.

use crate::types::{Cue, DebrisId, Layer, Vec3};

/// Rigid-body world holding the tower and the debris.
pub trait PhysicsWorld {
    /// A tower layer (kinematic, never simulated).
    fn add_static(&mut self, index: usize, layer: &Layer);
    /// A tower layer moved or was cut.
    fn update_static(&mut self, index: usize, layer: &Layer);
    fn remove_static(&mut self, index: usize);
    /// A debris fragment starts falling.
    fn add_falling(&mut self, id: DebrisId, layer: &Layer, mass: f32);
    /// Advance the simulation by `dt_s` seconds.
    fn step(&mut self, dt_s: f32);
    /// Current position of a falling body.
    fn pose(&self, id: DebrisId) -> Option<Vec3>;
    /// Move the ids of bodies that left the world into `out`.
    fn drain_out_of_bounds(&mut self, out: &mut Vec<DebrisId>);
    /// Remove every body.
    fn clear(&mut self);
}

/// Fire-and-forget sound cues.
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Persistent high score, best effort.
///
/// Implementations swallow their own I/O failures: a broken store reads as 0 and
/// ignores writes.
pub trait HighScoreStore {
    fn load(&mut self) -> u32;
    fn save(&mut self, value: u32);
}

/// Score display.
pub trait ScoreBoard {
    /// A fresh tower was built; the display returns to 0.
    fn session_reset(&mut self);
    /// A placement scored.
    fn score_changed(&mut self, score: u32);
    /// The run ended.
    fn session_ended(&mut self, final_score: u32, high_score: u32);
}

/// Audio sink that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// In-memory high score store.
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScore {
    value: u32,
    writes: u32,
}

impl MemoryHighScore {
    pub fn new(value: u32) -> Self {
        Self { value, writes: 0 }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Number of `save` calls received.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl HighScoreStore for MemoryHighScore {
    fn load(&mut self) -> u32 {
        self.value
    }

    fn save(&mut self, value: u32) {
        self.value = value;
        self.writes += 1;
    }
}

/// Score board that only remembers the last values it was given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TallyBoard {
    pub score: u32,
    pub result: Option<(u32, u32)>,
}

impl ScoreBoard for TallyBoard {
    fn session_reset(&mut self) {
        self.score = 0;
        self.result = None;
    }

    fn score_changed(&mut self, score: u32) {
        self.score = score;
    }

    fn session_ended(&mut self, final_score: u32, high_score: u32) {
        self.result = Some((final_score, high_score));
    }
}
