//! Engine - the stacking session wired to its collaborators.
//!
//! The core crate is pure: it queues events and never performs I/O. This crate drains
//! those events once per frame and turns them into calls on injected collaborators:
//!
//! - [`PhysicsWorld`]: tower bodies and falling debris
//! - [`AudioSink`]: placement and failure cues (gated by mute)
//! - [`HighScoreStore`]: best-effort persistence of a new high score
//! - [`ScoreBoard`]: score display
//!
//! It also holds the overlay state (mute, help modal, results panel) which never
//! influences gameplay.

pub mod collab;
pub mod driver;
pub mod overlay;
pub mod physics;

pub use tui_stacker_core as core;
pub use tui_stacker_types as types;

pub use collab::{
    AudioSink, HighScoreStore, MemoryHighScore, NullAudio, PhysicsWorld, ScoreBoard, TallyBoard,
};
pub use driver::{Engine, EngineConfig};
pub use overlay::Overlays;
pub use physics::DebrisWorld;
