//! Session module - the stacking game state machine
//!
//! Ties together the stack, the geometry engine, the motion controller and the RNG.
//! It owns the phase (demo / active / ended), the score and the high score, and the
//! short-lived feedback timers the view reads.
//!
//! The session never performs I/O. Everything a collaborator needs to know is queued
//! as a [`CoreEvent`] and drained by the host with [`Session::take_events`].

use arrayvec::ArrayVec;

use crate::geometry::{self, Cut};
use crate::motion::{DriveMode, MotionController, MotionStep};
use crate::rng::SimpleRng;
use crate::snapshot::SessionSnapshot;
use crate::stack::Stack;
use crate::types::*;

/// Events buffered between two drains.
pub const EVENT_CAPACITY: usize = 32;

/// Overlap percentage popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub percent: u32,
    pub tone: FeedbackTone,
    pub remaining_ms: u32,
}

/// Ring acknowledgment at a placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub position: Vec3,
    pub remaining_ms: u32,
}

/// Base box size for a viewport, in pixels.
///
/// Both dimensions are floored at 320 before picking the size band.
///
/// # Examples
///
/// ```
/// use tui_stacker_core::session::box_size_for_viewport;
///
/// assert_eq!(box_size_for_viewport(375, 812), 1.8);
/// assert_eq!(box_size_for_viewport(1024, 700), 2.6);
/// assert_eq!(box_size_for_viewport(1920, 1080), 4.0);
/// ```
pub fn box_size_for_viewport(width_px: u32, height_px: u32) -> f32 {
    let min_dim = width_px.max(320).min(height_px.max(320));
    if min_dim < 420 {
        1.8
    } else if min_dim < 768 {
        2.6
    } else {
        4.0
    }
}

/// Complete stacking session
#[derive(Debug, Clone)]
pub struct Session {
    stack: Stack,
    phase: Phase,
    motion: MotionController,
    rng: SimpleRng,
    score: u32,
    high_score: u32,
    /// Base size of the current tower.
    base_size: f32,
    /// Base size the next tower will use (follows the viewport).
    next_base_size: f32,
    camera_y: f32,
    feedback: Option<Feedback>,
    ring: Option<Ring>,
    /// Countdown to the results panel; `Some(0)` once visible.
    results_in_ms: Option<u32>,
    /// Countdown to rebuilding the demo tower after an autopilot miss.
    demo_restart_ms: Option<u32>,
    /// Monotonic tower id (increments on every reset).
    episode_id: u32,
    events: ArrayVec<CoreEvent, EVENT_CAPACITY>,
    dropped_events: u32,
}

impl Session {
    /// Create a session in demo mode with the given RNG seed and stored high score.
    pub fn new(seed: u32, high_score: u32, base_size: f32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let motion = MotionController::new(DriveMode::Autopilot, &mut rng);

        let mut session = Self {
            stack: Stack::new(),
            phase: Phase::Demo,
            motion,
            rng,
            score: 0,
            high_score,
            base_size,
            next_base_size: base_size,
            camera_y: CAMERA_START_Y,
            feedback: None,
            ring: None,
            results_in_ms: None,
            demo_restart_ms: None,
            episode_id: 0,
            events: ArrayVec::new(),
            dropped_events: 0,
        };
        session.rebuild(Phase::Demo);
        session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    pub fn camera_y(&self) -> f32 {
        self.camera_y
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn autopilot(&self) -> bool {
        self.motion.mode() == DriveMode::Autopilot
    }

    pub fn bias(&self) -> f32 {
        self.motion.bias()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn ring(&self) -> Option<Ring> {
        self.ring
    }

    pub fn results_visible(&self) -> bool {
        self.phase == Phase::Ended && self.results_in_ms == Some(0)
    }

    /// Events that did not fit in the queue since the last drain.
    pub fn dropped_events(&self) -> u32 {
        self.dropped_events
    }

    /// The layer currently in motion, if any.
    pub fn active_layer(&self) -> Option<&Layer> {
        if self.has_active() {
            self.stack.top()
        } else {
            None
        }
    }

    fn has_active(&self) -> bool {
        self.phase != Phase::Ended && self.demo_restart_ms.is_none() && !self.stack.top_fallen()
    }

    /// Seed a stored high score (only ever raises it).
    pub fn set_high_score(&mut self, value: u32) {
        self.high_score = self.high_score.max(value);
    }

    /// Base size used by the next reset (the current tower keeps its size).
    pub fn set_next_base_size(&mut self, size: f32) {
        if size > 0.0 {
            self.next_base_size = size;
        }
    }

    /// Take all queued events.
    pub fn take_events(&mut self) -> ArrayVec<CoreEvent, EVENT_CAPACITY> {
        self.dropped_events = 0;
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: CoreEvent) {
        if self.events.try_push(event).is_err() {
            self.dropped_events = self.dropped_events.saturating_add(1);
        }
    }

    /// Start a scored game (from the demo or after a run ended).
    pub fn start(&mut self) {
        self.rebuild(Phase::Active);
    }

    fn rebuild(&mut self, phase: Phase) {
        if !self.stack.is_empty() {
            self.episode_id = self.episode_id.wrapping_add(1);
        }

        self.phase = phase;
        self.base_size = self.next_base_size;
        self.stack.reset(self.base_size);
        self.score = 0;
        self.camera_y = CAMERA_START_Y;
        self.feedback = None;
        self.ring = None;
        self.results_in_ms = None;
        self.demo_restart_ms = None;
        self.motion.set_mode(match phase {
            Phase::Demo => DriveMode::Autopilot,
            Phase::Active | Phase::Ended => DriveMode::Manual,
        });
        self.motion.reroll(&mut self.rng);

        self.emit(CoreEvent::Reset { phase });
        for (index, layer) in self.stack.layers().iter().copied().enumerate() {
            if self.events.try_push(CoreEvent::LayerAdded { index, layer }).is_err() {
                self.dropped_events = self.dropped_events.saturating_add(1);
            }
        }
    }

    /// Apply a semantic action.
    ///
    /// Returns `true` if the session changed. Overlay actions (mute, help, dismiss) are
    /// not session concerns and return `false`.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Drop => match self.phase {
                Phase::Demo => {
                    self.start();
                    true
                }
                Phase::Active => self.drop_active(),
                Phase::Ended => false,
            },
            GameAction::Restart => match self.phase {
                Phase::Demo | Phase::Ended => {
                    self.start();
                    true
                }
                Phase::Active => false,
            },
            GameAction::ToggleMute | GameAction::ToggleHelp | GameAction::Dismiss => false,
        }
    }

    /// Pointer tap on the play area: restarts an ended run, otherwise acts as a drop.
    pub fn tap(&mut self) -> bool {
        if self.phase == Phase::Ended {
            self.start();
            true
        } else {
            self.apply_action(GameAction::Drop)
        }
    }

    /// Stop the active layer and cut it against its support.
    ///
    /// Returns `true` if a drop was evaluated (hit or miss).
    pub fn drop_active(&mut self) -> bool {
        if !self.has_active() {
            return false;
        }
        let (Some(top), Some(support)) = (self.stack.top().copied(), self.stack.support().copied())
        else {
            return false;
        };

        let cut = geometry::measure(&top, &support);
        self.show_feedback(&cut);

        match geometry::split(&top, &cut) {
            Some(placement) => {
                if let Some(index) = self.stack.replace_top(placement.kept) {
                    self.emit(CoreEvent::LayerResized {
                        index,
                        layer: placement.kept,
                    });
                }
                if let Some(piece) = placement.debris {
                    let debris = self.stack.add_debris(piece, self.base_size);
                    self.emit(CoreEvent::DebrisSpawned {
                        id: debris.id,
                        layer: debris.layer,
                        mass: debris.mass,
                    });
                }

                let next = placement.next;
                let index = self.stack.push_layer(
                    next.position.x,
                    next.position.z,
                    next.width,
                    next.depth,
                    next.axis,
                );
                if let Some(layer) = self.stack.top().copied() {
                    self.emit(CoreEvent::LayerAdded { index, layer });
                }

                self.ring = Some(Ring {
                    position: placement.kept.position,
                    remaining_ms: RING_EFFECT_MS,
                });

                let scored = self.phase == Phase::Active;
                if scored {
                    self.score = self.stack.placed_count();
                }
                self.emit(CoreEvent::Placed {
                    score: self.score,
                    overlap_percent: cut.overlap_percent,
                    scored,
                });
            }
            None => self.miss(MissReason::NoOverlap, Some(cut.overlap_percent)),
        }

        true
    }

    fn show_feedback(&mut self, cut: &Cut) {
        self.feedback = Some(Feedback {
            percent: cut.overlap_percent,
            tone: FeedbackTone::from_percent(cut.overlap_percent),
            remaining_ms: OVERLAP_POPUP_MS,
        });
    }

    /// The active layer is lost: it falls as debris and the run ends.
    fn miss(&mut self, reason: MissReason, overlap_percent: Option<u32>) {
        let index = self.stack.len().saturating_sub(1);
        if let Some(top) = self.stack.fell() {
            self.emit(CoreEvent::LayerRemoved { index });
            let debris = self.stack.add_debris(top, self.base_size);
            self.emit(CoreEvent::DebrisSpawned {
                id: debris.id,
                layer: debris.layer,
                mass: debris.mass,
            });
        }

        match self.phase {
            Phase::Active => {
                self.phase = Phase::Ended;
                let final_score = self.score;
                if final_score > self.high_score {
                    self.high_score = final_score;
                    self.emit(CoreEvent::HighScore { value: final_score });
                }
                self.results_in_ms = Some(RESULTS_DELAY_MS);
                self.emit(CoreEvent::Missed {
                    reason,
                    overlap_percent,
                    final_score,
                    high_score: self.high_score,
                    scored: true,
                });
            }
            Phase::Demo => {
                // The demo is a showcase: no score, just rebuild after the debris falls.
                self.demo_restart_ms = Some(DEMO_RESTART_MS);
                self.emit(CoreEvent::Missed {
                    reason,
                    overlap_percent,
                    final_score: 0,
                    high_score: self.high_score,
                    scored: false,
                });
            }
            Phase::Ended => {}
        }
    }

    /// Main session tick - advance timers, camera and the active layer.
    ///
    /// Returns `true` if a drop or a miss happened during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        self.tick_timers(elapsed_ms);

        let target_camera = BOX_HEIGHT * self.stack.placed_count() as f32 + CAMERA_LEAD;
        if self.camera_y < target_camera {
            self.camera_y += MOVE_SPEED_PER_MS * elapsed_ms as f32;
        }

        if let Some(ms) = self.demo_restart_ms {
            let left = ms.saturating_sub(elapsed_ms);
            if left == 0 {
                self.rebuild(Phase::Demo);
            } else {
                self.demo_restart_ms = Some(left);
            }
            return false;
        }

        if !self.has_active() {
            return false;
        }

        let Some(support) = self.stack.support().copied() else {
            return false;
        };
        let Some(top) = self.stack.top_mut() else {
            return false;
        };

        match self.motion.step(top, &support, elapsed_ms) {
            MotionStep::Moved => false,
            MotionStep::Overran => {
                self.miss(MissReason::Overrun, None);
                true
            }
            MotionStep::Drop => {
                self.drop_active();
                self.motion.reroll(&mut self.rng);
                true
            }
        }
    }

    fn tick_timers(&mut self, elapsed_ms: u32) {
        if let Some(fb) = self.feedback.as_mut() {
            fb.remaining_ms = fb.remaining_ms.saturating_sub(elapsed_ms);
            if fb.remaining_ms == 0 {
                self.feedback = None;
            }
        }
        if let Some(ring) = self.ring.as_mut() {
            ring.remaining_ms = ring.remaining_ms.saturating_sub(elapsed_ms);
            if ring.remaining_ms == 0 {
                self.ring = None;
            }
        }
        if let Some(ms) = self.results_in_ms.as_mut() {
            *ms = ms.saturating_sub(elapsed_ms);
        }
    }

    /// Copy physics poses back into the debris collection.
    pub fn sync_debris(&mut self, mut pose: impl FnMut(DebrisId) -> Option<Vec3>) {
        for piece in self.stack.debris_mut() {
            if let Some(p) = pose(piece.id) {
                piece.layer.position = p;
            }
        }
    }

    /// Forget a debris piece (it left the world).
    pub fn discard_debris(&mut self, id: DebrisId) -> bool {
        self.stack.remove_debris(id)
    }

    pub fn snapshot_into(&self, out: &mut SessionSnapshot) {
        out.layers.clear();
        out.layers.extend_from_slice(self.stack.standing());
        out.debris.clear();
        out.debris.extend(self.stack.debris().iter().map(|d| d.layer));
        out.active = if self.has_active() {
            Some(out.layers.len().saturating_sub(1))
        } else {
            None
        };
        out.phase = self.phase;
        out.score = self.score;
        out.high_score = self.high_score;
        out.camera_y = self.camera_y;
        out.base_size = self.base_size;
        out.episode_id = self.episode_id;
        out.feedback = self.feedback;
        out.ring = self.ring;
        out.results_visible = self.results_visible();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut s = SessionSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1, 0, DEFAULT_BOX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Put the active layer at `offset` on its axis relative to its support.
    fn aim(session: &mut Session, delta: f32) {
        let support = *session.stack.support().unwrap();
        let top = session.stack.top_mut().unwrap();
        let axis = top.axis;
        top.position.set(axis, support.position.get(axis) + delta);
    }

    fn started(seed: u32) -> Session {
        let mut s = Session::new(seed, 0, 3.0);
        s.start();
        s.take_events();
        s
    }

    #[test]
    fn test_new_session_is_demo() {
        let s = Session::new(1, 7, 3.0);
        assert_eq!(s.phase(), Phase::Demo);
        assert!(s.autopilot());
        assert_eq!(s.score(), 0);
        assert_eq!(s.high_score(), 7);
        assert_eq!(s.stack().len(), 2);
        assert!(s.active_layer().is_some());
    }

    #[test]
    fn test_new_session_announces_foundation() {
        let mut s = Session::new(1, 0, 3.0);
        let events = s.take_events();
        assert_eq!(events[0], CoreEvent::Reset { phase: Phase::Demo });
        assert!(matches!(events[1], CoreEvent::LayerAdded { index: 0, .. }));
        assert!(matches!(events[2], CoreEvent::LayerAdded { index: 1, .. }));
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn test_drop_in_demo_starts_game() {
        let mut s = Session::new(1, 0, 3.0);
        let episode = s.episode_id();
        assert!(s.apply_action(GameAction::Drop));
        assert_eq!(s.phase(), Phase::Active);
        assert!(!s.autopilot());
        assert_eq!(s.stack().len(), 2);
        assert_eq!(s.episode_id(), episode + 1);
    }

    #[test]
    fn test_partial_overlap_placement() {
        let mut s = started(1);
        aim(&mut s, 1.0);

        assert!(s.drop_active());
        assert_eq!(s.phase(), Phase::Active);
        assert_eq!(s.score(), 1);
        assert_eq!(s.stack().len(), 3);

        let kept = s.stack().layers()[1];
        assert_eq!(kept.width, 2.0);
        let next = *s.stack().top().unwrap();
        assert_eq!(next.width, 2.0);
        assert_eq!(next.depth, 3.0);
        assert_eq!(next.axis, Axis::Z);
        assert_eq!(next.position.z, SPAWN_OFFSET);

        let fb = s.feedback().unwrap();
        assert_eq!(fb.percent, 67);
        assert_eq!(fb.tone, FeedbackTone::Orange);

        let events = s.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, CoreEvent::LayerResized { index: 1, .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, CoreEvent::DebrisSpawned { .. })));
        assert!(events
            .iter()
            .any(|e| matches!(e, CoreEvent::LayerAdded { index: 2, .. })));
        assert!(events.iter().any(|e| matches!(
            e,
            CoreEvent::Placed {
                score: 1,
                overlap_percent: 67,
                scored: true
            }
        )));
    }

    #[test]
    fn test_edge_overlap_ends_session() {
        let mut s = started(1);
        aim(&mut s, 3.0);

        assert!(s.drop_active());
        assert_eq!(s.phase(), Phase::Ended);
        assert_eq!(s.stack().len(), 2);
        assert!(s.active_layer().is_none());
        assert_eq!(s.stack().debris().len(), 1);
        let events = s.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, CoreEvent::LayerRemoved { index: 1 })));
        assert!(events.iter().any(|e| matches!(
            e,
            CoreEvent::Missed {
                reason: MissReason::NoOverlap,
                overlap_percent: Some(0),
                final_score: 0,
                ..
            }
        )));
    }

    #[test]
    fn test_negative_overlap_ends_session() {
        let mut s = started(1);
        aim(&mut s, -4.0);
        s.drop_active();
        assert_eq!(s.phase(), Phase::Ended);
    }

    #[test]
    fn test_score_counts_consecutive_placements() {
        let mut s = started(5);
        for n in 1..=10u32 {
            aim(&mut s, 0.05);
            assert!(s.drop_active());
            assert_eq!(s.score(), n);
        }
        assert_eq!(s.stack().len(), 12);
    }

    #[test]
    fn test_axis_alternates_through_stack() {
        let mut s = started(5);
        for _ in 0..6 {
            aim(&mut s, -0.1);
            s.drop_active();
        }
        let layers = s.stack().layers();
        for pair in layers.windows(2) {
            assert_eq!(pair[1].axis, pair[0].axis.perpendicular());
        }
    }

    #[test]
    fn test_restart_after_end_resets() {
        let mut s = started(5);
        for _ in 0..4 {
            aim(&mut s, 0.2);
            s.drop_active();
        }
        aim(&mut s, 10.0);
        s.drop_active();
        assert_eq!(s.phase(), Phase::Ended);

        // Drop does nothing once ended.
        assert!(!s.apply_action(GameAction::Drop));
        assert_eq!(s.phase(), Phase::Ended);

        assert!(s.apply_action(GameAction::Restart));
        assert_eq!(s.phase(), Phase::Active);
        assert_eq!(s.score(), 0);
        assert_eq!(s.stack().len(), 2);
        assert!(s.stack().debris().is_empty());
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut s = started(5);
        aim(&mut s, 0.0);
        s.drop_active();
        assert!(!s.apply_action(GameAction::Restart));
        assert_eq!(s.score(), 1);
    }

    #[test]
    fn test_tap_restarts_ended_run() {
        let mut s = started(5);
        aim(&mut s, 5.0);
        s.drop_active();
        assert_eq!(s.phase(), Phase::Ended);
        assert!(s.tap());
        assert_eq!(s.phase(), Phase::Active);
    }

    #[test]
    fn test_high_score_only_updates_when_beaten() {
        let mut s = Session::new(5, 3, 3.0);
        s.start();
        for _ in 0..2 {
            aim(&mut s, 0.0);
            s.drop_active();
        }
        aim(&mut s, 9.0);
        s.drop_active();
        assert_eq!(s.high_score(), 3);
        let events = s.take_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, CoreEvent::HighScore { .. })));

        s.start();
        for _ in 0..4 {
            aim(&mut s, 0.0);
            s.drop_active();
        }
        aim(&mut s, 9.0);
        s.drop_active();
        assert_eq!(s.high_score(), 4);
        let events = s.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, CoreEvent::HighScore { value: 4 })));
    }

    #[test]
    fn test_equal_score_does_not_persist() {
        let mut s = Session::new(5, 1, 3.0);
        s.start();
        aim(&mut s, 0.0);
        s.drop_active();
        aim(&mut s, 9.0);
        s.drop_active();
        let events = s.take_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, CoreEvent::HighScore { .. })));
    }

    #[test]
    fn test_manual_overrun_ends_session() {
        let mut s = started(5);
        let mut ended = false;
        for _ in 0..2_000 {
            if s.tick(TICK_MS) {
                ended = true;
                break;
            }
        }
        assert!(ended);
        assert_eq!(s.phase(), Phase::Ended);
        let events = s.take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            CoreEvent::Missed {
                reason: MissReason::Overrun,
                overlap_percent: None,
                ..
            }
        )));
    }

    #[test]
    fn test_demo_places_without_scoring() {
        let mut s = Session::new(11, 0, 3.0);
        let mut placed = 0;
        for _ in 0..5_000 {
            s.tick(TICK_MS);
            for e in s.take_events() {
                if let CoreEvent::Placed { scored, .. } = e {
                    assert!(!scored);
                    placed += 1;
                }
            }
            if placed >= 3 {
                break;
            }
        }
        assert!(placed >= 3);
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), Phase::Demo);
    }

    #[test]
    fn test_demo_miss_rebuilds_without_touching_high_score() {
        let mut s = Session::new(11, 2, 3.0);
        s.take_events();
        // Force a miss on the demo's active layer.
        aim(&mut s, 3.5);
        s.drop_active();
        assert_eq!(s.phase(), Phase::Demo);
        assert!(s.active_layer().is_none());
        let events = s.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, CoreEvent::Missed { scored: false, .. })));
        assert!(!events
            .iter()
            .any(|e| matches!(e, CoreEvent::HighScore { .. })));

        let mut ticks = 0;
        while s.active_layer().is_none() {
            s.tick(TICK_MS);
            ticks += 1;
            assert!(ticks < 1_000);
        }
        assert_eq!(s.phase(), Phase::Demo);
        assert_eq!(s.stack().len(), 2);
        assert_eq!(s.high_score(), 2);
    }

    #[test]
    fn test_results_panel_appears_after_delay() {
        let mut s = started(5);
        aim(&mut s, 5.0);
        s.drop_active();
        assert!(!s.results_visible());
        s.tick(RESULTS_DELAY_MS - 1);
        assert!(!s.results_visible());
        s.tick(1);
        assert!(s.results_visible());
    }

    #[test]
    fn test_feedback_and_ring_expire() {
        let mut s = started(5);
        aim(&mut s, 0.0);
        s.drop_active();
        assert!(s.ring().is_some());
        assert_eq!(s.feedback().unwrap().tone, FeedbackTone::Green);

        s.tick(RING_EFFECT_MS);
        assert!(s.ring().is_none());
        s.tick(OVERLAP_POPUP_MS);
        assert!(s.feedback().is_none());
    }

    #[test]
    fn test_camera_rises_with_tower() {
        let mut s = started(5);
        for _ in 0..5 {
            aim(&mut s, 0.0);
            s.drop_active();
        }
        let before = s.camera_y();
        s.tick(100);
        assert!(s.camera_y() > before);

        // Once caught up it stops within one step of the target.
        for _ in 0..2_000 {
            s.tick(TICK_MS);
        }
        let target = BOX_HEIGHT * s.stack().placed_count() as f32 + CAMERA_LEAD;
        assert!(s.camera_y() >= target);
        assert!(s.camera_y() < target + MOVE_SPEED_PER_MS * TICK_MS as f32 + 1e-4);
    }

    #[test]
    fn test_next_base_size_applies_on_reset() {
        let mut s = started(5);
        s.set_next_base_size(4.0);
        assert_eq!(s.base_size(), 3.0);

        aim(&mut s, 10.0);
        s.drop_active();
        s.apply_action(GameAction::Restart);
        assert_eq!(s.base_size(), 4.0);
        assert_eq!(s.stack().layers()[0].width, 4.0);
    }

    #[test]
    fn test_sync_and_discard_debris() {
        let mut s = started(5);
        aim(&mut s, 1.0);
        s.drop_active();
        let id = s.stack().debris()[0].id;

        s.sync_debris(|d| (d == id).then(|| Vec3::new(9.0, -3.0, 1.0)));
        assert_eq!(s.stack().debris()[0].layer.position, Vec3::new(9.0, -3.0, 1.0));

        assert!(s.discard_debris(id));
        assert!(s.stack().debris().is_empty());
    }

    #[test]
    fn test_snapshot_excludes_fallen_layer() {
        let mut s = started(5);
        aim(&mut s, 0.0);
        s.drop_active();
        let snap = s.snapshot();
        assert_eq!(snap.layers.len(), 3);
        assert_eq!(snap.active, Some(2));

        aim(&mut s, 8.0);
        s.drop_active();
        let snap = s.snapshot();
        assert_eq!(snap.layers.len(), 2);
        assert_eq!(snap.active, None);
        assert_eq!(snap.debris.len(), 1);
        assert_eq!(snap.phase, Phase::Ended);
        assert_eq!(snap.score, 1);
    }

    #[test]
    fn test_event_queue_overflow_is_counted() {
        let mut s = started(5);
        for _ in 0..20 {
            aim(&mut s, 0.01);
            s.drop_active();
        }
        assert!(s.dropped_events() > 0);
        let events = s.take_events();
        assert_eq!(events.len(), EVENT_CAPACITY);
        assert_eq!(s.dropped_events(), 0);
    }
}
