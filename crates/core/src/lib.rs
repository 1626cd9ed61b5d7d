//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the stacking rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, physics, audio or I/O, making it:
//!
//! - **Deterministic**: Same seed produces the same autopilot demo
//! - **Testable**: Unit tests for every rule and transition
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//! - **Allocation-light**: Events are buffered in a fixed-capacity queue
//!
//! # Module Structure
//!
//! - [`geometry`]: overlap measurement and cutting of the active layer
//! - [`stack`]: ordered placed layers plus unordered debris
//! - [`motion`]: manual and autopilot drive of the active layer
//! - [`session`]: demo / active / ended state machine, score and high score
//! - [`rng`]: small LCG for the autopilot precision bias
//! - [`snapshot`]: render-facing copy of a session
//!
//! # Game Rules
//!
//! - A layer slides along one horizontal axis; the next layer uses the other one
//! - Dropping keeps the footprint shared with the layer below; the overhang falls
//! - No overlap (or sliding past the travel limit) ends the run
//! - Score is the number of layers placed above the two-layer foundation
//!
//! # Example
//!
//! ```
//! use tui_stacker_core::Session;
//! use tui_stacker_types::{GameAction, Phase};
//!
//! // A new session runs the autopilot demo
//! let mut session = Session::new(12345, 0, 3.0);
//! assert_eq!(session.phase(), Phase::Demo);
//!
//! // The first drop starts a scored game
//! session.apply_action(GameAction::Drop);
//! assert_eq!(session.phase(), Phase::Active);
//!
//! // Let the layer slide over the foundation, then drop it
//! for _ in 0..78 {
//!     session.tick(16);
//! }
//! session.apply_action(GameAction::Drop);
//! assert_eq!(session.score(), 1);
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](session::Session::tick) every frame with the elapsed time.
//! Layers move at 0.008 units per millisecond; with the 16ms timestep that is
//! 0.128 units per tick.

pub mod geometry;
pub mod motion;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod stack;

pub use tui_stacker_types as types;

// Re-export commonly used types for convenience
pub use geometry::{measure, overlap_percent, split, Cut, Placement};
pub use motion::{DriveMode, MotionController, MotionStep};
pub use rng::SimpleRng;
pub use session::{box_size_for_viewport, Feedback, Ring, Session, EVENT_CAPACITY};
pub use snapshot::SessionSnapshot;
pub use stack::{Debris, Stack};
