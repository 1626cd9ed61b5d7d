//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::engine::EngineConfig;

const STORAGE_FILE: &str = ".tui-stacker.json";

#[derive(Debug, Clone, PartialEq)]
pub struct StackerConfig {
    /// Autopilot RNG seed.
    pub seed: u32,
    /// Key/value file holding the high score.
    pub storage_path: PathBuf,
    /// Tracing output file; logging is off when unset.
    pub log_path: Option<PathBuf>,
    /// `EnvFilter` directives.
    pub log_filter: String,
    /// Fixed base box size; `None` follows the terminal size.
    pub box_size: Option<f32>,
    /// Hue of the foundation layer in degrees.
    pub hue_base: f32,
    pub muted: bool,
}

impl Default for StackerConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            storage_path: PathBuf::from(STORAGE_FILE),
            log_path: None,
            log_filter: "info".to_string(),
            box_size: None,
            hue_base: 30.0,
            muted: false,
        }
    }
}

impl StackerConfig {
    /// Create from `STACKER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let seed = non_empty("STACKER_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(time_seed);

        let storage_path = non_empty("STACKER_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_storage_path(non_empty("HOME")));

        let log_path = non_empty("STACKER_LOG_PATH").map(PathBuf::from);
        let log_filter = non_empty("STACKER_LOG").unwrap_or_else(|| "info".to_string());

        let box_size = non_empty("STACKER_BOX_SIZE")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0);

        let hue_base = non_empty("STACKER_HUE_BASE")
            .and_then(|s| s.parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(30.0);

        let muted = non_empty("STACKER_MUTED")
            .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self {
            seed,
            storage_path,
            log_path,
            log_filter,
            box_size,
            hue_base,
            muted,
        }
    }

    /// Engine parameters for a viewport of `viewport_px` pixels.
    pub fn engine_config(&self, viewport_px: (u32, u32)) -> EngineConfig {
        EngineConfig {
            seed: self.seed,
            fixed_box_size: self.box_size,
            muted: self.muted,
            viewport_px,
        }
    }
}

fn default_storage_path(home: Option<String>) -> PathBuf {
    match home {
        Some(home) => PathBuf::from(home).join(STORAGE_FILE),
        None => PathBuf::from(STORAGE_FILE),
    }
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

/// Approximate pixel size of a terminal, for picking the box size band.
///
/// Uses a nominal 8x16 pixel cell.
pub fn viewport_px(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32 * 8, rows as u32 * 16)
}
