//! TerminalBell: sound cues as terminal bells.

use std::io::{self, Write};

use tracing::debug;

use crate::engine::AudioSink;
use crate::types::Cue;

const BEL: u8 = 0x07;

/// Rings once for a placement and twice for a failure. Write errors are logged and dropped.
pub struct TerminalBell<W: Write = io::Stdout> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        let bells: &[u8] = match cue {
            Cue::Place => &[BEL],
            Cue::Fail => &[BEL, BEL],
        };
        if let Err(err) = self.out.write_all(bells).and_then(|_| self.out.flush()) {
            debug!(?cue, error = %err, "bell write failed");
        }
    }
}
