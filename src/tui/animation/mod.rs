// src/tui/animation/mod.rs
pub mod state;
pub mod ui;

use crate::animate::Scene;
use crate::tui::runner;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use state::AnimationApp;
use std::io;
use std::time::{Duration, Instant};

/// Runs the animation loop on the alternate screen.
///
/// # Errors
/// Returns error if terminal setup fails or during execution.
pub fn run(scene: &Scene, interval: Duration) -> Result<()> {
    runner::setup_terminal()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = run_app(&mut terminal, scene, interval);

    runner::restore_terminal()?;
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    scene: &Scene,
    interval: Duration,
) -> Result<()> {
    let mut app = AnimationApp::new(scene.frame_count);
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, scene, &app))?;

        let timeout = interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if last_tick.elapsed() >= interval {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
