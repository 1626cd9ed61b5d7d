//! Best-effort high score persistence.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::engine::HighScoreStore;
use crate::kv::KeyValueFile;
use crate::types::HIGH_SCORE_KEY;

/// Parse a stored high score. Anything that is not an integer, and any negative
/// value, reads as 0.
///
/// # Examples
///
/// ```
/// use tui_stacker_storage::parse_high_score;
///
/// assert_eq!(parse_high_score(Some("17")), 17);
/// assert_eq!(parse_high_score(Some("-3")), 0);
/// assert_eq!(parse_high_score(Some("lots")), 0);
/// assert_eq!(parse_high_score(None), 0);
/// ```
pub fn parse_high_score(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map(|v| v.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0)
}

/// High score kept under [`HIGH_SCORE_KEY`] in a [`KeyValueFile`].
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    file: KeyValueFile,
}

impl FileHighScoreStore {
    /// Open the store; an unreadable or corrupt file starts empty and is replaced on
    /// the first save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file = match KeyValueFile::open(&path) {
            Ok(file) => file,
            Err(err) => {
                warn!(error = %err, "high score storage unavailable, starting empty");
                KeyValueFile::empty(path)
            }
        };
        Self { file }
    }

    pub fn file(&self) -> &KeyValueFile {
        &self.file
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&mut self) -> u32 {
        let value = parse_high_score(self.file.get(HIGH_SCORE_KEY));
        debug!(value, path = %self.file.path().display(), "high score loaded");
        value
    }

    fn save(&mut self, value: u32) {
        if let Err(err) = self.file.set(HIGH_SCORE_KEY, value.to_string()) {
            warn!(error = %err, value, "failed to persist high score");
        }
    }
}
