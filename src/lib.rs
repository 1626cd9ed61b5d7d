//! TUI Stacker (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_stacker::{core,engine,input,storage,term,types}`
//! and holds the binary's configuration and logging setup.

pub mod config;
pub mod logging;

pub use tui_stacker_core as core;
pub use tui_stacker_engine as engine;
pub use tui_stacker_input as input;
pub use tui_stacker_storage as storage;
pub use tui_stacker_term as term;
pub use tui_stacker_types as types;

pub use config::StackerConfig;
