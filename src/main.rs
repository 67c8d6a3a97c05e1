//! Terminal runner (default binary).
//!
//! The frame loop plays the role of the animation-frame scheduler: poll
//! input with a timeout until the next tick, then advance the simulation
//! by the measured delta time (clamped to one second so a suspended
//! terminal does not fast-forward the game).

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_blockfall::config::GameConfig;
use tui_blockfall::core::Game;
use tui_blockfall::input::{map_action, map_command, GameCommand};
use tui_blockfall::term::{GameView, TerminalRenderer, Viewport};
use tui_blockfall::types::GamePhase;

/// Target frame interval (~60 fps).
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    let config = GameConfig::load(settings_path().as_deref())?;
    let mut game = Game::new(config, entropy_seed());

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, &mut game);
    // Always try to restore the terminal, even on error.
    let _ = term.exit();
    result
}

/// Settings file: first CLI argument, else `blockfall.json` next to the
/// working directory if it exists.
fn settings_path() -> Option<PathBuf> {
    std::env::args().nth(1).map(PathBuf::from).or_else(|| {
        let default = PathBuf::from("blockfall.json");
        default.exists().then_some(default)
    })
}

fn entropy_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let view = GameView::default();
    let frame = Duration::from_millis(FRAME_MS);
    let mut before = Instant::now();
    let mut needs_redraw = true;

    loop {
        // Redraw when the engine reports stale regions (or after resize).
        if game.take_invalidations().any() || needs_redraw {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let fb = view.render(game, Viewport::new(w, h));
            term.draw(&fb)?;
            needs_redraw = false;
        }

        let timeout = frame.saturating_sub(before.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if key.kind == KeyEventKind::Press {
                        if let Some(command) = map_command(key) {
                            match command {
                                GameCommand::Quit => return Ok(()),
                                GameCommand::Cancel => game.cancel(),
                                GameCommand::StartPauseToggle => {
                                    if game.phase() == GamePhase::Playing {
                                        game.pause();
                                    } else {
                                        game.start_continue();
                                    }
                                }
                            }
                            continue;
                        }
                    }
                    // Actions are only collected mid-game; the queue dies
                    // with the piece anyway.
                    if game.phase() == GamePhase::Playing {
                        if let Some(action) = map_action(key) {
                            game.enqueue(action);
                        }
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                    needs_redraw = true;
                }
                _ => {}
            }
        }

        if before.elapsed() >= frame {
            let dt = before.elapsed().as_secs_f64().min(1.0);
            before = Instant::now();
            game.update(dt);
        }
    }
}
