//! Overlay state - mute, shortcuts help and the results panel.
//!
//! None of this touches gameplay; the view reads it and the engine consults the mute
//! flag before playing cues.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlays {
    muted: bool,
    help_open: bool,
    results_dismissed: bool,
}

impl Overlays {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            ..Self::default()
        }
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn results_dismissed(&self) -> bool {
        self.results_dismissed
    }

    /// Returns the new mute state.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn toggle_help(&mut self) -> bool {
        self.help_open = !self.help_open;
        self.help_open
    }

    /// Escape: close the help modal first, otherwise hide the results panel.
    ///
    /// Results are only hidden while `results_visible`; an early Escape must not
    /// suppress the panel of a run still in progress.
    pub fn dismiss(&mut self, results_visible: bool) -> bool {
        if self.help_open {
            self.help_open = false;
            true
        } else if results_visible && !self.results_dismissed {
            self.results_dismissed = true;
            true
        } else {
            false
        }
    }

    pub fn dismiss_results(&mut self) {
        self.results_dismissed = true;
    }

    /// A new tower was built; the next results panel shows again.
    pub fn on_reset(&mut self) {
        self.results_dismissed = false;
    }
}
