//! Hud: the score display, fed through [`ScoreBoard`].

use crate::engine::ScoreBoard;
use crate::types::SCORE_PULSE_MS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud {
    score: u32,
    pulse_ms: u32,
    /// `(final, best)` once a run ended.
    result: Option<(u32, u32)>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The score was just raised and is highlighted.
    pub fn pulsing(&self) -> bool {
        self.pulse_ms > 0
    }

    pub fn result(&self) -> Option<(u32, u32)> {
        self.result
    }

    /// The last run beat (or set) the stored best.
    pub fn new_best(&self) -> bool {
        matches!(self.result, Some((final_score, best)) if final_score > 0 && final_score >= best)
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.pulse_ms = self.pulse_ms.saturating_sub(elapsed_ms);
    }
}

impl ScoreBoard for Hud {
    fn session_reset(&mut self) {
        *self = Self::default();
    }

    fn score_changed(&mut self, score: u32) {
        self.score = score;
        self.pulse_ms = SCORE_PULSE_MS;
    }

    fn session_ended(&mut self, final_score: u32, high_score: u32) {
        self.score = final_score;
        self.result = Some((final_score, high_score));
    }
}
