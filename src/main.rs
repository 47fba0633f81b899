//! Terminal runner (default binary).
//!
//! Owns the session and feeds it a single stream of key presses and gravity
//! ticks; the framebuffer view redraws after every event.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use log::info;

use simple_tetris::core::{GameSession, GameSnapshot, PieceCatalog};
use simple_tetris::input::{handle_key_event, is_press};
use simple_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use simple_tetris::types::TICK_MS;
use simple_tetris::DEFAULT_PIECES;

/// Falling-block puzzle in the terminal, with pieces loaded from a text catalog.
#[derive(Debug, Parser)]
#[command(
    name = "simple-tetris",
    version,
    about,
    long_about = "Falling-block puzzle in the terminal.\n\n\
        CONTROLS:\n  Enter        Start          R            Reset\n  \
        Left/Right   Move           Down         Soft drop\n  \
        Space        Hard drop      X            Rotate CW\n  \
        Up / Z       Rotate CCW     C            Hold\n  \
        Q / Esc      Quit"
)]
struct Args {
    /// Piece catalog to load instead of the built-in one.
    #[arg(short, long, value_name = "FILE")]
    pieces: Option<PathBuf>,

    /// Seed for piece selection. Defaults to the current time.
    #[arg(short, long, value_name = "N")]
    seed: Option<u32>,

    /// Milliseconds between gravity ticks; a piece falls every 10 ticks.
    #[arg(long, default_value_t = TICK_MS, value_name = "MS")]
    tick_ms: u64,

    /// Write logs here (filter with RUST_LOG). The game screen owns the terminal,
    /// so logging is off without this.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let catalog = load_catalog(args.pieces.as_ref())?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("{} pieces loaded, seed {seed}", catalog.len());
    let session = GameSession::with_seed(Arc::new(catalog), seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session, Duration::from_millis(args.tick_ms.max(1)));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: Option<&PathBuf>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialise logger")?;
    Ok(())
}

fn load_catalog(path: Option<&PathBuf>) -> Result<PieceCatalog> {
    match path {
        Some(path) => PieceCatalog::from_path(path)
            .with_context(|| format!("failed to load pieces from {}", path.display())),
        None => PieceCatalog::parse(DEFAULT_PIECES).context("built-in piece catalog is invalid"),
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mut session: GameSession, tick: Duration) -> Result<()> {
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Wait for input until the next tick is due.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if let Some(action) = handle_key_event(key) {
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if session.quit_requested() {
            info!("quit with score {}", session.score());
            return Ok(());
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            session.tick();
        }
    }
}
