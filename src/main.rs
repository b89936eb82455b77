mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use road_crossing::compute::{handle_input, init_state, restart, tick};
use road_crossing::config::GameConfig;
use road_crossing::entities::World;
use road_crossing::input::{action_for_event, key_trigger, Action};
use road_crossing::sprite::{SpriteCache, Surface};

#[derive(Parser, Debug)]
#[command(about = "Cross the road without getting caught by the bugs")]
struct Cli {
    /// TOML file overriding the default game rules.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for enemy lanes, gaps and speeds.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here; the terminal itself is busy drawing the game.
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the user quits.
///
/// `trigger` is the key kind that moves the player (see `key_trigger`).
/// The win overlay follows the game's `Won` / `Restarted` events; a left
/// click on it, or R, starts the next round.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut World,
    cache: &SpriteCache,
    rx: &mpsc::Receiver<Event>,
    trigger: KeyEventKind,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let frame = Duration::from_millis(state.config.frame_ms);
    let overlay_rect = display::win_overlay_rect(&state.config);
    let mut overlay = false;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match action_for_event(&ev, trigger) {
                Some(Action::Quit) => return Ok(()),
                Some(Action::Move(direction)) => {
                    *state = handle_input(state, Some(direction));
                }
                Some(Action::Restart) => {
                    *state = restart(state);
                }
                Some(Action::Click { column, row }) => {
                    if overlay && overlay_rect.contains(column, row) {
                        *state = restart(state);
                    }
                }
                None => {}
            }
            overlay = display::overlay_after(overlay, &state.events);
        }

        let now = frame_start;
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        *state = tick(state, dt, rng);
        overlay = display::overlay_after(overlay, &state.events);
        display::render(out, state, cache, overlay)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref())?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let cache = SpriteCache::with_builtin();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    let field_width = display::Canvas::new(&mut out, &config).canvas_width();
    let mut state = init_state(&config, field_width, &mut rng);
    let sprites: Vec<_> = std::iter::once(&state.player.sprite)
        .chain(state.enemies.iter().map(|e| &e.sprite))
        .collect();
    cache.preload(sprites);
    info!(enemies = state.enemies.len(), seed = ?cli.seed, "starting game");

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from terminals that speak
    // the kitty keyboard protocol.  Writing the request succeeds everywhere,
    // so ask the terminal first and only then rely on release events.
    let reports_release = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
    let keyboard_enhanced = reports_release
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    let trigger = key_trigger(keyboard_enhanced);
    info!(?trigger, "keyboard trigger selected");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut state, &cache, &rx, trigger, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(frames = state.frame, "game closed");
    result.context("terminal I/O failed")
}
