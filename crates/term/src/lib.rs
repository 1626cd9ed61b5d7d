//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a framebuffer that is diffed and flushed to the
//! terminal.
//!
//! Besides drawing, this crate provides the terminal-side collaborators the engine
//! talks to: [`Hud`] (score display) and [`TerminalBell`] (sound cues).

pub mod bell;
pub mod fb;
pub mod game_view;
pub mod hud;
pub mod renderer;

pub use tui_stacker_core as core;
pub use tui_stacker_engine as engine;
pub use tui_stacker_types as types;

pub use bell::TerminalBell;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Scene, Viewport};
pub use hud::Hud;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
