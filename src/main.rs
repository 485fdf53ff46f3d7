mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::rc::Rc;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stage_shooter::clock::{Clock, MonotonicClock};
use stage_shooter::config::Config;
use stage_shooter::input::{FrameInput, KeyTracker};
use stage_shooter::score::{FileStore, ScoreLedger};
use stage_shooter::screen::Game;
use stage_shooter::sprites::SpriteTable;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Logs go to a file; stdout belongs to the game frame.
fn init_tracing(config: &Config) -> anyhow::Result<()> {
    let file = File::create(&config.log_path)
        .with_context(|| format!("creating log file {}", config.log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: each press/repeat records the frame it arrived on, releases
/// remove the key, and keys that stop repeating expire after a short window.
/// Every frame turns what is held into left/right/fire intents, runs one
/// update, then draws.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game<rand::rngs::ThreadRng>,
    rx: &mpsc::Receiver<Event>,
    config: &Config,
) -> anyhow::Result<()> {
    let clock = MonotonicClock::new();
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                    _ => keys.press(code, frame),
                },
                KeyEventKind::Repeat => keys.press(code, frame),
                KeyEventKind::Release => keys.release(code),
            }
        }

        let input = FrameInput::new(keys.intents(frame), clock.now_ms());
        game.update(input);

        let size = terminal::size().context("reading terminal size")?;
        display::render(out, &*game, size)?;

        let elapsed = frame_start.elapsed();
        if elapsed < config.frame {
            thread::sleep(config.frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config)?;
    info!(scores = %config.score_path.display(), "Starting");

    let ledger = ScoreLedger::new(Box::new(FileStore::new(config.score_path.clone())));
    let mut game = Game::new(ledger, Rc::new(SpriteTable), thread_rng());

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    if let Err(error) = terminal::disable_raw_mode() {
        warn!(%error, "Could not leave raw mode");
    }

    info!(best = game.ledger().high_scores()[0], "Exiting");
    result
}
