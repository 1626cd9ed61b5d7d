//! Frame driver - owns the session and routes its events to the collaborators.

use tracing::{debug, info, warn};

use crate::collab::{AudioSink, HighScoreStore, PhysicsWorld, ScoreBoard};
use crate::core::{box_size_for_viewport, Session, SessionSnapshot};
use crate::overlay::Overlays;
use crate::types::{CoreEvent, Cue, DebrisId, GameAction, PointerTarget, DEFAULT_BOX_SIZE};

/// Engine construction parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Autopilot RNG seed.
    pub seed: u32,
    /// Pin the base box size instead of following the viewport.
    pub fixed_box_size: Option<f32>,
    /// Start with audio muted.
    pub muted: bool,
    /// Initial viewport in pixels.
    pub viewport_px: (u32, u32),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            fixed_box_size: None,
            muted: false,
            viewport_px: (1280, 800),
        }
    }
}

/// The stacking game with its collaborators attached.
pub struct Engine<P, A, S, B> {
    session: Session,
    overlays: Overlays,
    fixed_box_size: Option<f32>,
    physics: P,
    audio: A,
    store: S,
    board: B,
    out_of_bounds: Vec<DebrisId>,
}

impl<P, A, S, B> Engine<P, A, S, B>
where
    P: PhysicsWorld,
    A: AudioSink,
    S: HighScoreStore,
    B: ScoreBoard,
{
    /// Load the stored high score and start the autopilot demo.
    pub fn new(config: EngineConfig, physics: P, audio: A, mut store: S, board: B) -> Self {
        let high_score = store.load();
        let base_size = match config.fixed_box_size {
            Some(size) if size > 0.0 => size,
            Some(_) => DEFAULT_BOX_SIZE,
            None => box_size_for_viewport(config.viewport_px.0, config.viewport_px.1),
        };
        info!(seed = config.seed, high_score, base_size, "engine started");

        let mut engine = Self {
            session: Session::new(config.seed, high_score, base_size),
            overlays: Overlays::new(config.muted),
            fixed_box_size: config.fixed_box_size,
            physics,
            audio,
            store,
            board,
            out_of_bounds: Vec::new(),
        };
        engine.dispatch_events();
        engine
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Apply a key action. Returns `true` if anything visible changed.
    pub fn handle_action(&mut self, action: GameAction) -> bool {
        let changed = match action {
            GameAction::ToggleMute => {
                let muted = self.overlays.toggle_mute();
                debug!(muted, "mute toggled");
                true
            }
            GameAction::ToggleHelp => {
                self.overlays.toggle_help();
                true
            }
            GameAction::Dismiss => self.overlays.dismiss(self.session.results_visible()),
            GameAction::Drop | GameAction::Restart => self.session.apply_action(action),
        };
        self.dispatch_events();
        changed
    }

    /// Apply a pointer press on `target`.
    pub fn handle_pointer(&mut self, target: PointerTarget) -> bool {
        let changed = match target {
            PointerTarget::PlayArea => self.session.tap(),
            PointerTarget::MuteButton => {
                self.overlays.toggle_mute();
                true
            }
            PointerTarget::HelpModal => false,
            PointerTarget::ResultsClose => {
                self.overlays.dismiss_results();
                true
            }
        };
        self.dispatch_events();
        changed
    }

    /// Advance one frame: session, physics, then debris poses.
    ///
    /// Returns `true` if a drop or a miss happened.
    pub fn frame(&mut self, elapsed_ms: u32) -> bool {
        let changed = self.session.tick(elapsed_ms);
        self.dispatch_events();

        if let Some(layer) = self.session.active_layer().copied() {
            let index = self.session.stack().len().saturating_sub(1);
            self.physics.update_static(index, &layer);
        }

        self.physics.step(elapsed_ms as f32 / 1000.0);
        let physics = &self.physics;
        self.session.sync_debris(|id| physics.pose(id));

        self.physics.drain_out_of_bounds(&mut self.out_of_bounds);
        for id in self.out_of_bounds.drain(..) {
            self.session.discard_debris(id);
        }

        changed
    }

    /// The viewport changed; the next tower uses the matching box size.
    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        if self.fixed_box_size.is_some() {
            return;
        }
        let size = box_size_for_viewport(width_px, height_px);
        self.session.set_next_base_size(size);
        debug!(width_px, height_px, size, "viewport resized");
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        self.session.snapshot_into(out);
    }

    fn cue(&mut self, cue: Cue) {
        if !self.overlays.muted() {
            self.audio.play(cue);
        }
    }

    fn dispatch_events(&mut self) {
        let dropped = self.session.dropped_events();
        if dropped > 0 {
            warn!(dropped, "session event queue overflowed");
        }

        for event in self.session.take_events() {
            match event {
                CoreEvent::Reset { phase } => {
                    self.physics.clear();
                    self.board.session_reset();
                    self.overlays.on_reset();
                    debug!(phase = phase.as_str(), episode = self.session.episode_id(), "tower reset");
                }
                CoreEvent::LayerAdded { index, layer } => self.physics.add_static(index, &layer),
                CoreEvent::LayerResized { index, layer } => {
                    self.physics.update_static(index, &layer)
                }
                CoreEvent::LayerRemoved { index } => self.physics.remove_static(index),
                CoreEvent::DebrisSpawned { id, layer, mass } => {
                    self.physics.add_falling(id, &layer, mass)
                }
                CoreEvent::Placed {
                    score,
                    overlap_percent,
                    scored,
                } => {
                    if scored {
                        self.board.score_changed(score);
                        self.cue(Cue::Place);
                    }
                    debug!(score, overlap_percent, scored, "layer placed");
                }
                CoreEvent::Missed {
                    reason,
                    final_score,
                    high_score,
                    scored,
                    ..
                } => {
                    if scored {
                        self.board.session_ended(final_score, high_score);
                        self.cue(Cue::Fail);
                        info!(?reason, final_score, high_score, "run ended");
                    } else {
                        debug!(?reason, "demo missed");
                    }
                }
                CoreEvent::HighScore { value } => {
                    info!(value, "new high score");
                    self.store.save(value);
                }
            }
        }
    }
}
