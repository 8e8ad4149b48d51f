use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        MouseButton, MouseEventKind, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use air_combat::config::GameConfig;
use air_combat::display::terminal::TerminalSurface;
use air_combat::error::AppError;
use air_combat::input::KeyTracker;
use air_combat::scene::{FrameStatus, SceneId, SceneManager};

/// Measures the time between frames, clamped so a stall (window drag, debugger
/// pause) can't push entities through each other.
struct FrameClock {
    last: Instant,
    max_delta: f64,
}

impl FrameClock {
    fn new(max_delta: f64) -> Self {
        Self {
            last: Instant::now(),
            max_delta,
        }
    }

    fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        dt.min(self.max_delta)
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode on the alternate screen, so log records go to
/// a file in the temp directory instead of stderr.
fn init_logging() {
    let path = std::env::temp_dir().join("air_combat.log");
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
    log::info!("logging to {}", path.display());
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    surface: &mut TerminalSurface<W>,
    scenes: &mut SceneManager,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut keys = KeyTracker::new();
    let mut clock = FrameClock::new(config.timing.max_delta);
    let frame_time: Duration = config.timing.frame_duration();

    loop {
        let frame_start = Instant::now();
        keys.begin_frame();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => keys.handle_key(key),
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        keys.handle_click(surface.cell_to_pixel(mouse.column, mouse.row));
                    }
                }
                Event::Resize(cols, rows) => surface.resize(cols, rows),
                _ => {}
            }
        }

        let input = keys.sample();
        let dt = clock.tick();
        if scenes.frame(dt, &input, &mut rng) == FrameStatus::Quit {
            log::info!("quit requested");
            return Ok(());
        }

        scenes.render(surface)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    init_logging();

    let config = GameConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        GameConfig::default()
    });
    let mut scenes = SceneManager::new(config.clone())?;
    scenes.change_scene(SceneId::StartScene);

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

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

    let result = terminal::size().and_then(|(cols, rows)| {
        let mut surface = TerminalSurface::new(
            &mut out,
            cols,
            rows,
            config.play_area.window_width,
            config.play_area.window_height,
        );
        game_loop(&mut surface, &mut scenes, &config, &rx)
    });
    scenes.shutdown();

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("terminal error: {e}");
    }
    Ok(result?)
}
