//! Storage - a file-backed key/value store and the high score built on it.
//!
//! The file is a flat JSON object of strings, the same shape a browser's local
//! storage has. Only the high score lives there today.

pub mod error;
pub mod high_score;
pub mod kv;

pub use tui_stacker_engine as engine;
pub use tui_stacker_types as types;

pub use error::{Result, StorageError};
pub use high_score::{parse_high_score, FileHighScoreStore};
pub use kv::KeyValueFile;
