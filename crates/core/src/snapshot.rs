use crate::session::{Feedback, Ring};
use crate::types::{Layer, Phase, CAMERA_START_Y, DEFAULT_BOX_SIZE};

/// Render-facing copy of a session.
///
/// Hosts keep one snapshot around and refill it with
/// [`Session::snapshot_into`](crate::Session::snapshot_into) every frame so the
/// layer vectors keep their allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Standing layers, bottom to top.
    pub layers: Vec<Layer>,
    /// Falling fragments at their latest physics pose.
    pub debris: Vec<Layer>,
    /// Index into `layers` of the layer in motion.
    pub active: Option<usize>,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub camera_y: f32,
    pub base_size: f32,
    pub episode_id: u32,
    pub feedback: Option<Feedback>,
    pub ring: Option<Ring>,
    pub results_visible: bool,
}

impl SessionSnapshot {
    pub fn clear(&mut self) {
        self.layers.clear();
        self.debris.clear();
        self.active = None;
        self.phase = Phase::Demo;
        self.score = 0;
        self.high_score = 0;
        self.camera_y = CAMERA_START_Y;
        self.base_size = DEFAULT_BOX_SIZE;
        self.episode_id = 0;
        self.feedback = None;
        self.ring = None;
        self.results_visible = false;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Active && self.active.is_some()
    }

    /// Height of the highest standing layer.
    pub fn top_y(&self) -> f32 {
        self.layers.last().map(|l| l.position.y).unwrap_or(0.0)
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            debris: Vec::new(),
            active: None,
            phase: Phase::Demo,
            score: 0,
            high_score: 0,
            camera_y: CAMERA_START_Y,
            base_size: DEFAULT_BOX_SIZE,
            episode_id: 0,
            feedback: None,
            ring: None,
            results_visible: false,
        }
    }
}
