//! GameView: maps a session snapshot into a terminal framebuffer.
//!
//! The tower is drawn twice: a front projection (x across, y up) and a side
//! projection (z across, y up). Together they show both motion axes. This module is
//! pure (no I/O) and can be unit-tested.

use crate::core::SessionSnapshot;
use crate::engine::Overlays;
use crate::fb::{digit_count, Cell, CellStyle, FrameBuffer, Rgb};
use crate::hud::Hud;
use crate::types::{
    Axis, FeedbackTone, HitRegions, Layer, Phase, Rect, CAMERA_LEAD, RING_EFFECT_MS,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything one frame shows.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub snapshot: &'a SessionSnapshot,
    pub overlays: &'a Overlays,
    pub hud: &'a Hud,
}

impl Scene<'_> {
    fn results_shown(&self) -> bool {
        self.snapshot.results_visible && !self.overlays.results_dismissed()
    }
}

const PANEL_W: u16 = 20;
const MAX_FRAME_W: u16 = 48;
const MUTE_ON: &str = "[ muted ]";
const MUTE_OFF: &str = "[ sound ]";
const CLOSE_LABEL: &str = "[ close ]";
const RESULTS_W: u16 = 30;
const RESULTS_H: u16 = 9;
const HELP_W: u16 = 34;

const SHORTCUTS: &[(&str, &str)] = &[
    ("space/click", "drop / start"),
    ("r", "restart"),
    ("m", "mute"),
    ("h", "this help"),
    ("esc", "close"),
    ("q", "quit"),
];

const BG: Rgb = Rgb::new(0, 0, 0);
const PLAY_BG: Rgb = Rgb::new(22, 24, 34);
const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BG);
const LABEL: CellStyle = TEXT.bold();
const MUTED_TEXT: CellStyle = CellStyle::new(Rgb::new(130, 130, 140), BG);
const BORDER: CellStyle = CellStyle::new(Rgb::new(160, 160, 170), BG);
const MODAL: CellStyle = CellStyle::new(Rgb::new(235, 235, 235), Rgb::new(34, 34, 48));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    front: Rect,
    side: Rect,
    panel: Rect,
    mute: Rect,
    hint_row: u16,
}

/// A lightweight terminal renderer for the stacking game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameView {
    /// Terminal columns per world unit.
    cell_w: u16,
    /// Terminal rows per world unit (one layer).
    cell_h: u16,
    /// Hue of the foundation; each layer above shifts it by 4 degrees.
    hue_base: f32,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            hue_base: 30.0,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_hue_base(mut self, hue_base: f32) -> Self {
        self.hue_base = hue_base;
        self
    }

    /// Colour of the layer at stack index `index`.
    pub fn layer_color(&self, index: usize) -> Rgb {
        Rgb::from_hsl(self.hue_base + index as f32 * 4.0, 1.0, 0.5)
    }

    /// Render a frame into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is resized to the viewport.
    pub fn render_into(&self, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::new(' ', TEXT));

        let layout = self.layout(viewport);
        self.draw_title(fb, scene, &layout);
        self.draw_projection(fb, scene, layout.front, Axis::X, "FRONT");
        self.draw_projection(fb, scene, layout.side, Axis::Z, "SIDE");
        self.draw_side_panel(fb, scene, layout.panel);
        self.draw_hints(fb, layout.hint_row);

        if scene.snapshot.phase == Phase::Demo {
            self.draw_instructions(fb, viewport, layout.front.y + 2);
        }
        if scene.results_shown() {
            self.draw_results(fb, scene, viewport);
        }
        if scene.overlays.help_open() {
            self.draw_help(fb, viewport);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, scene: &Scene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(scene, viewport, &mut fb);
        fb
    }

    /// Screen areas of the overlay controls for this scene and viewport.
    pub fn hit_regions(&self, scene: &Scene<'_>, viewport: Viewport) -> HitRegions {
        HitRegions {
            mute: self.layout(viewport).mute,
            help: scene
                .overlays
                .help_open()
                .then(|| help_rect(viewport)),
            results_close: scene
                .results_shown()
                .then(|| close_rect(results_rect(viewport))),
        }
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let mute_w = MUTE_OFF.chars().count() as u16;
        let mute = Rect::new(
            viewport.width.saturating_sub(mute_w),
            0,
            mute_w.min(viewport.width),
            1,
        );
        let body_h = viewport.height.saturating_sub(2);
        let frame_w = (viewport.width.saturating_sub(PANEL_W) / 2).min(MAX_FRAME_W);

        Layout {
            front: Rect::new(0, 1, frame_w, body_h),
            side: Rect::new(frame_w, 1, frame_w, body_h),
            panel: Rect::new(
                frame_w.saturating_mul(2).saturating_add(2),
                1,
                PANEL_W.saturating_sub(2),
                body_h,
            ),
            mute,
            hint_row: viewport.height.saturating_sub(1),
        }
    }

    fn draw_title(&self, fb: &mut FrameBuffer, scene: &Scene<'_>, layout: &Layout) {
        fb.put_str(1, 0, "STACK", LABEL);
        let (label, style) = if scene.overlays.muted() {
            (MUTE_ON, MUTED_TEXT)
        } else {
            (MUTE_OFF, TEXT)
        };
        fb.put_str(layout.mute.x, layout.mute.y, label, style);
    }

    fn draw_projection(
        &self,
        fb: &mut FrameBuffer,
        scene: &Scene<'_>,
        frame: Rect,
        axis: Axis,
        title: &str,
    ) {
        if frame.width < 3 || frame.height < 3 {
            return;
        }
        fb.draw_box(frame.x, frame.y, frame.width, frame.height, BORDER);
        fb.put_str(frame.x + 2, frame.y, title, BORDER.bold());

        let inner = Rect::new(frame.x + 1, frame.y + 1, frame.width - 2, frame.height - 2);
        let bg = CellStyle::new(PLAY_BG, PLAY_BG);
        fb.fill_rect(inner.x, inner.y, inner.width, inner.height, ' ', bg);

        let snap = scene.snapshot;
        let proj = Projection::new(inner, axis, snap.camera_y - CAMERA_LEAD, self);
        // The side face reads as a different shade of the same block.
        let shade = if axis == Axis::X { 1.0 } else { 0.75 };

        for piece in &snap.debris {
            let style = CellStyle::new(self.layer_color(0).scaled(0.45 * shade), PLAY_BG).dim();
            proj.slab(fb, piece, '▒', style);
        }

        for (index, layer) in snap.layers.iter().enumerate() {
            let mut style = CellStyle::new(self.layer_color(index).scaled(shade), PLAY_BG);
            if snap.active == Some(index) {
                style = style.bold();
            }
            proj.slab(fb, layer, '█', style);
        }

        if let Some(ring) = snap.ring {
            let progress = 1.0 - ring.remaining_ms as f32 / RING_EFFECT_MS as f32;
            let size = snap.base_size * (1.0 + progress);
            let style = CellStyle::new(Rgb::new(255, 255, 255).scaled(1.0 - 0.6 * progress), PLAY_BG);
            if let (Some(row), Some((x, w))) =
                (proj.row(ring.position.y), proj.span(ring.position.get(axis), size))
            {
                fb.put_char(x, row, '(', style);
                fb.put_char(x + w - 1, row, ')', style);
            }
        }

        if axis == Axis::X {
            if let Some(feedback) = snap.feedback {
                if let Some(row) = proj.row(snap.top_y() + 1.0) {
                    let text_w = digit_count(feedback.percent) + 1;
                    let x = inner.x + inner.width.saturating_sub(text_w) / 2;
                    let style = CellStyle::new(tone_color(feedback.tone), PLAY_BG).bold();
                    let end = fb.put_u32(x, row, feedback.percent, style);
                    fb.put_char(end, row, '%', style);
                }
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, scene: &Scene<'_>, panel: Rect) {
        if panel.x >= fb.width() || panel.width < 6 {
            return;
        }
        let snap = scene.snapshot;
        let hud = scene.hud;
        let x = panel.x;
        let mut y = panel.y;

        fb.put_str(x, y, "SCORE", LABEL);
        y += 1;
        let score_style = if hud.pulsing() {
            CellStyle::new(Rgb::new(255, 220, 80), BG).bold()
        } else {
            TEXT
        };
        fb.put_u32(x, y, hud.score(), score_style);
        y += 2;

        fb.put_str(x, y, "BEST", LABEL);
        y += 1;
        fb.put_u32(x, y, snap.high_score, TEXT);
        y += 2;

        fb.put_str(x, y, "MODE", LABEL);
        y += 1;
        let mode = match snap.phase {
            Phase::Demo => "DEMO",
            Phase::Active => "PLAY",
            Phase::Ended => "OVER",
        };
        fb.put_str(x, y, mode, TEXT);
        y += 2;

        fb.put_str(x, y, "SOUND", LABEL);
        y += 1;
        fb.put_str(x, y, if scene.overlays.muted() { "OFF" } else { "ON" }, TEXT);
    }

    fn draw_hints(&self, fb: &mut FrameBuffer, row: u16) {
        fb.put_str(1, row, "space drop  r restart  m mute  h help  q quit", MUTED_TEXT);
    }

    fn draw_instructions(&self, fb: &mut FrameBuffer, viewport: Viewport, row: u16) {
        let area = Rect::new(0, row, viewport.width, 2);
        put_centered(fb, area, row, "STACK THE BLOCKS AS HIGH AS YOU CAN", LABEL);
        put_centered(fb, area, row + 1, "space or click to start", TEXT);
    }

    fn draw_results(&self, fb: &mut FrameBuffer, scene: &Scene<'_>, viewport: Viewport) {
        let rect = results_rect(viewport);
        fb.fill_rect(rect.x, rect.y, rect.width, rect.height, ' ', MODAL);
        fb.draw_box(rect.x, rect.y, rect.width, rect.height, MODAL.bold());

        let (final_score, best) = scene
            .hud
            .result()
            .unwrap_or((scene.snapshot.score, scene.snapshot.high_score));
        let mut y = rect.y + 1;
        put_centered(fb, rect, y, "GAME OVER", MODAL.bold());
        y += 1;
        if scene.hud.new_best() {
            put_centered(fb, rect, y, "NEW BEST!", MODAL.bold());
        }
        y += 1;

        let value_x = rect.x + rect.width.saturating_sub(12);
        fb.put_str(rect.x + 3, y, "Score", MODAL);
        fb.put_u32(value_x, y, final_score, MODAL.bold());
        y += 1;
        fb.put_str(rect.x + 3, y, "Best", MODAL);
        fb.put_u32(value_x, y, best, MODAL.bold());
        y += 2;

        put_centered(fb, rect, y, "r or click to play again", MODAL);
        let close = close_rect(rect);
        fb.put_str(close.x, close.y, CLOSE_LABEL, MODAL.bold());
    }

    fn draw_help(&self, fb: &mut FrameBuffer, viewport: Viewport) {
        let rect = help_rect(viewport);
        fb.fill_rect(rect.x, rect.y, rect.width, rect.height, ' ', MODAL);
        fb.draw_box(rect.x, rect.y, rect.width, rect.height, MODAL.bold());
        put_centered(fb, rect, rect.y + 1, "SHORTCUTS", MODAL.bold());

        for (i, (key, what)) in SHORTCUTS.iter().enumerate() {
            let y = rect.y + 3 + i as u16;
            fb.put_str(rect.x + 3, y, key, MODAL.bold());
            fb.put_str(rect.x + 17, y, what, MODAL);
        }
    }
}

/// World-to-screen mapping for one projection panel.
struct Projection {
    inner: Rect,
    axis: Axis,
    /// World height drawn at `anchor_row`.
    anchor_y: f32,
    anchor_row: i32,
    center_col: i32,
    cell_w: f32,
    cell_h: u16,
}

impl Projection {
    fn new(inner: Rect, axis: Axis, anchor_y: f32, view: &GameView) -> Self {
        Self {
            inner,
            axis,
            anchor_y,
            // The tower top sits two thirds down, leaving room above for the slider.
            anchor_row: inner.y as i32 + (inner.height as i32 * 2) / 3,
            center_col: inner.x as i32 + inner.width as i32 / 2,
            cell_w: view.cell_w as f32,
            cell_h: view.cell_h,
        }
    }

    fn row(&self, y: f32) -> Option<u16> {
        let r = self.anchor_row - ((y - self.anchor_y) * self.cell_h as f32).round() as i32;
        let top = self.inner.y as i32;
        let bottom = top + self.inner.height as i32;
        (r >= top && r < bottom).then_some(r as u16)
    }

    /// Columns covered by `size` units centred on `center`, clipped to the panel.
    fn span(&self, center: f32, size: f32) -> Option<(u16, u16)> {
        let left = (self.center_col as f32 + (center - size / 2.0) * self.cell_w).round() as i32;
        let right = (self.center_col as f32 + (center + size / 2.0) * self.cell_w).round() as i32;
        let right = right.max(left + 1);

        let lo = left.max(self.inner.x as i32);
        let hi = right.min(self.inner.x as i32 + self.inner.width as i32);
        (hi > lo).then(|| (lo as u16, (hi - lo) as u16))
    }

    fn slab(&self, fb: &mut FrameBuffer, layer: &Layer, ch: char, style: CellStyle) {
        let (Some(row), Some((x, w))) = (
            self.row(layer.position.y),
            self.span(layer.position.get(self.axis), layer.size_along(self.axis)),
        ) else {
            return;
        };
        let bottom = self.inner.y + self.inner.height;
        let h = self.cell_h.min(bottom - row);
        fb.fill_rect(x, row, w, h, ch, style);
    }
}

fn tone_color(tone: FeedbackTone) -> Rgb {
    match tone {
        FeedbackTone::Green => Rgb::new(90, 220, 120),
        FeedbackTone::Orange => Rgb::new(255, 165, 0),
        FeedbackTone::Red => Rgb::new(230, 80, 80),
    }
}

fn centered(viewport: Viewport, w: u16, h: u16) -> Rect {
    let w = w.min(viewport.width);
    let h = h.min(viewport.height);
    Rect::new(
        (viewport.width - w) / 2,
        (viewport.height - h) / 2,
        w,
        h,
    )
}

fn results_rect(viewport: Viewport) -> Rect {
    centered(viewport, RESULTS_W, RESULTS_H)
}

fn help_rect(viewport: Viewport) -> Rect {
    centered(viewport, HELP_W, SHORTCUTS.len() as u16 + 5)
}

fn close_rect(results: Rect) -> Rect {
    let w = CLOSE_LABEL.chars().count() as u16;
    Rect::new(
        results.x + results.width.saturating_sub(w) / 2,
        results.y + results.height.saturating_sub(2),
        w,
        1,
    )
}

fn put_centered(fb: &mut FrameBuffer, area: Rect, row: u16, text: &str, style: CellStyle) {
    let w = text.chars().count() as u16;
    fb.put_str(area.x + area.width.saturating_sub(w) / 2, row, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Session;
    use crate::engine::ScoreBoard;
    use crate::types::{GameAction, PointerTarget};

    fn row_text(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width())
            .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect()
    }

    fn screen(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| row_text(fb, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn ended_snapshot() -> SessionSnapshot {
        let mut session = Session::new(3, 0, 3.0);
        session.apply_action(GameAction::Drop);
        while session.phase() != Phase::Ended {
            session.tick(16);
        }
        session.tick(400);
        session.snapshot()
    }

    #[test]
    fn demo_frame_shows_both_projections_and_instructions() {
        let snap = Session::new(1, 5, 3.0).snapshot();
        let overlays = Overlays::default();
        let hud = Hud::new();
        let scene = Scene {
            snapshot: &snap,
            overlays: &overlays,
            hud: &hud,
        };

        let fb = GameView::default().render(&scene, Viewport::new(120, 30));
        let text = screen(&fb);
        assert!(text.contains("FRONT"));
        assert!(text.contains("SIDE"));
        assert!(text.contains("STACK THE BLOCKS"));
        assert!(text.contains("DEMO"));
        assert!(text.contains(MUTE_OFF));
        assert!(text.contains('█'));
    }

    #[test]
    fn layer_colors_step_through_hue() {
        let view = GameView::default().with_hue_base(0.0);
        assert_eq!(view.layer_color(0), Rgb::new(255, 0, 0));
        assert_eq!(view.layer_color(30), Rgb::new(0, 255, 0));
        assert_ne!(view.layer_color(1), view.layer_color(2));
    }

    #[test]
    fn results_panel_exposes_close_region() {
        let snap = ended_snapshot();
        assert!(snap.results_visible);
        let mut overlays = Overlays::default();
        let mut hud = Hud::new();
        hud.session_ended(0, 0);
        let view = GameView::default();
        let vp = Viewport::new(100, 30);

        let scene = Scene {
            snapshot: &snap,
            overlays: &overlays,
            hud: &hud,
        };
        let regions = view.hit_regions(&scene, vp);
        let close = regions.results_close.unwrap();
        let fb = view.render(&scene, vp);
        assert_eq!(fb.get(close.x, close.y).unwrap().ch, '[');
        assert!(screen(&fb).contains("GAME OVER"));
        assert_eq!(
            regions.target_at(close.x + 2, close.y),
            PointerTarget::ResultsClose
        );

        overlays.dismiss_results();
        let scene = Scene {
            snapshot: &snap,
            overlays: &overlays,
            hud: &hud,
        };
        assert!(view.hit_regions(&scene, vp).results_close.is_none());
        assert!(!screen(&view.render(&scene, vp)).contains("GAME OVER"));
    }

    #[test]
    fn help_modal_lists_shortcuts() {
        let snap = SessionSnapshot::default();
        let mut overlays = Overlays::new(true);
        overlays.toggle_help();
        let hud = Hud::new();
        let scene = Scene {
            snapshot: &snap,
            overlays: &overlays,
            hud: &hud,
        };
        let view = GameView::default();
        let vp = Viewport::new(100, 30);

        let text = screen(&view.render(&scene, vp));
        assert!(text.contains("SHORTCUTS"));
        assert!(text.contains("restart"));
        assert!(text.contains(MUTE_ON));

        let regions = view.hit_regions(&scene, vp);
        let help = regions.help.unwrap();
        assert_eq!(
            regions.target_at(help.x + 1, help.y + 1),
            PointerTarget::HelpModal
        );
        assert_eq!(regions.target_at(0, vp.height - 1), PointerTarget::PlayArea);
    }

    #[test]
    fn mute_region_is_top_right() {
        let snap = SessionSnapshot::default();
        let overlays = Overlays::default();
        let hud = Hud::new();
        let scene = Scene {
            snapshot: &snap,
            overlays: &overlays,
            hud: &hud,
        };
        let regions = GameView::default().hit_regions(&scene, Viewport::new(80, 24));
        assert_eq!(regions.mute, Rect::new(71, 0, 9, 1));
        assert_eq!(regions.target_at(75, 0), PointerTarget::MuteButton);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = ended_snapshot();
        let mut overlays = Overlays::default();
        overlays.toggle_help();
        let hud = Hud::new();
        let scene = Scene {
            snapshot: &snap,
            overlays: &overlays,
            hud: &hud,
        };
        for (w, h) in [(0, 0), (1, 1), (5, 3), (12, 4)] {
            let fb = GameView::default().render(&scene, Viewport::new(w, h));
            assert_eq!(fb.width(), w);
        }
    }

    #[test]
    fn projection_clips_to_panel() {
        let view = GameView::default();
        let proj = Projection::new(Rect::new(1, 1, 20, 10), Axis::X, 0.0, &view);
        assert_eq!(proj.row(0.0), Some(7));
        assert_eq!(proj.row(1.0), Some(6));
        assert_eq!(proj.row(100.0), None);
        assert_eq!(proj.span(0.0, 3.0), Some((8, 6)));
        assert_eq!(proj.span(-5.0, 3.0), Some((1, 3)));
        assert_eq!(proj.span(-30.0, 3.0), None);
    }
}
