//! Terminal stacker runner (default binary).
//!
//! crossterm for input and a framebuffer-based renderer; the game itself runs on a
//! fixed 16ms timestep.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};
use tracing::info;

use tui_stacker::config::viewport_px;
use tui_stacker::core::SessionSnapshot;
use tui_stacker::engine::{DebrisWorld, Engine};
use tui_stacker::input::{handle_key_event, pointer_target, should_quit};
use tui_stacker::logging::init_file_logging;
use tui_stacker::storage::FileHighScoreStore;
use tui_stacker::term::{FrameBuffer, GameView, Hud, Scene, TerminalBell, TerminalRenderer, Viewport};
use tui_stacker::types::TICK_MS;
use tui_stacker::StackerConfig;

fn main() -> Result<()> {
    let config = StackerConfig::from_env();
    if let Some(path) = &config.log_path {
        // Logging is optional; the game runs without it.
        if let Err(err) = init_file_logging(path, &config.log_filter) {
            eprintln!("{err:#}");
        }
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &StackerConfig) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(cols, rows);

    let mut engine = Engine::new(
        config.engine_config(viewport_px(cols, rows)),
        DebrisWorld::new(),
        TerminalBell::stdout(),
        FileHighScoreStore::open(&config.storage_path),
        Hud::new(),
    );
    let view = GameView::default().with_hue_base(config.hue_base);

    let mut snapshot = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(cols, rows);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        engine.snapshot_into(&mut snapshot);
        let scene = Scene {
            snapshot: &snapshot,
            overlays: engine.overlays(),
            hud: engine.board(),
        };
        view.render_into(&scene, viewport, &mut fb);
        let regions = view.hit_regions(&scene, viewport);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(
                            high_score = engine.session().high_score(),
                            "quit requested"
                        );
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        engine.handle_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(target) = pointer_target(mouse, &regions) {
                        engine.handle_pointer(target);
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    let (px_w, px_h) = viewport_px(w, h);
                    engine.resize(px_w, px_h);
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            engine.frame(TICK_MS);
            engine.board_mut().advance(TICK_MS);
        }
    }
}
