//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`]s and
//! [`crate::types::PointerTarget`]s. There is no repeat handling: every action is a
//! single press.

pub mod map;
pub mod pointer;

pub use tui_stacker_types as types;

pub use map::{handle_key_event, should_quit};
pub use pointer::pointer_target;
