mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal, ExecutableCommand,
};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crossing_games::compute::{
    dismiss_modal, frame, handle_input, init_state, restart, tick_clock,
    DEFAULT_TIME_LIMIT_SECS,
};
use crossing_games::entities::{BoardHeight, BoardWidth, Layout};
use crossing_games::input::{command_for, Command};
use crossing_games::memory::{
    advance, init_memory, move_cursor, restart_memory, select_at_cursor, tick_stopwatch,
    MemoryStatus, DEFAULT_FLIP_DELAY_SECS,
};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

// ── Command line ──────────────────────────────────────────────────────────────

/// Two small terminal games: a road-crossing arcade and a memory match.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File that receives the log output (the terminal is busy drawing).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// Seed for the random number generator, for reproducible boards.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Game to start directly; without one a menu is shown.
    #[command(subcommand)]
    command: Option<GameCommand>,
}

#[derive(Debug, Subcommand)]
enum GameCommand {
    /// Cross the road, grab gems and reach the star before time runs out.
    Arcade(ArcadeOptions),
    /// Flip cards two at a time and match all eight pairs.
    Memory(MemoryOptions),
}

#[derive(Debug, Clone, clap::Args)]
struct ArcadeOptions {
    /// Board width; `auto` picks the widest board the terminal can hold.
    #[arg(long, value_enum, default_value_t = WidthArg::Auto)]
    board_width: WidthArg,
    /// Board height; `auto` picks the tallest board the terminal can hold.
    #[arg(long, value_enum, default_value_t = HeightArg::Auto)]
    board_height: HeightArg,
    /// Seconds on the countdown.
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_TIME_LIMIT_SECS,
        value_parser = clap::value_parser!(u32).range(1..=3_600)
    )]
    time_limit: u32,
}

impl Default for ArcadeOptions {
    fn default() -> Self {
        ArcadeOptions {
            board_width: WidthArg::Auto,
            board_height: HeightArg::Auto,
            time_limit: DEFAULT_TIME_LIMIT_SECS,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
struct MemoryOptions {
    /// Milliseconds a revealed pair stays visible before play continues.
    #[arg(
        long,
        value_name = "MILLISECONDS",
        default_value_t = (DEFAULT_FLIP_DELAY_SECS * 1000.0) as u64,
        value_parser = clap::value_parser!(u64).range(0..=10_000)
    )]
    flip_delay_ms: u64,
}

impl Default for MemoryOptions {
    fn default() -> Self {
        MemoryOptions {
            flip_delay_ms: (DEFAULT_FLIP_DELAY_SECS * 1000.0) as u64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WidthArg {
    Auto,
    Wide,
    Narrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HeightArg {
    Auto,
    Tall,
    Medium,
    Short,
}

impl WidthArg {
    fn board(self) -> Option<BoardWidth> {
        match self {
            WidthArg::Auto => None,
            WidthArg::Wide => Some(BoardWidth::Wide),
            WidthArg::Narrow => Some(BoardWidth::Narrow),
        }
    }
}

impl HeightArg {
    fn board(self) -> Option<BoardHeight> {
        match self {
            HeightArg::Auto => None,
            HeightArg::Tall => Some(BoardHeight::Tall),
            HeightArg::Medium => Some(BoardHeight::Medium),
            HeightArg::Short => Some(BoardHeight::Short),
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to initialise logger")?;
    Ok(())
}

// ── Terminal ──────────────────────────────────────────────────────────────────

/// Raw mode + alternate screen for as long as it lives.  Dropping it always
/// restores the terminal, including on the error path.
struct TerminalGuard {
    out: BufWriter<Stdout>,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        let mut out = BufWriter::new(stdout());
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        out.execute(terminal::EnterAlternateScreen)
            .context("failed to enter alternate screen")?;
        out.execute(cursor::Hide)?;
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Where a game loop hands control back to.
enum Exit {
    Menu,
    Quit,
}

/// Wait for the next key press, skipping repeats, releases and non-key events.
fn next_key_press(rx: &mpsc::Receiver<Event>) -> Option<KeyEvent> {
    loop {
        match rx.recv() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => return Some(key),
            Ok(_) => {}
            Err(_) => return None,
        }
    }
}

/// Key presses that arrived since the last frame, without blocking.
fn drain_key_presses(rx: &mpsc::Receiver<Event>) -> Vec<KeyEvent> {
    rx.try_iter()
        .filter_map(|ev| match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(key),
            _ => None,
        })
        .collect()
}

fn sleep_rest_of_frame(frame_start: Instant) {
    let elapsed = frame_start.elapsed();
    if elapsed < FRAME {
        thread::sleep(FRAME - elapsed);
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuChoice {
    Arcade,
    Memory,
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> Result<MenuChoice> {
    display::draw_menu(out)?;

    while let Some(key) = next_key_press(rx) {
        match key.code {
            KeyCode::Char('1') => return Ok(MenuChoice::Arcade),
            KeyCode::Char('2') => return Ok(MenuChoice::Memory),
            _ => {
                if matches!(command_for(&key), Some(Command::Leave | Command::Quit)) {
                    return Ok(MenuChoice::Quit);
                }
            }
        }
    }
    Ok(MenuChoice::Quit)
}

// ── Arcade loop ───────────────────────────────────────────────────────────────

fn resolve_layout(options: &ArcadeOptions) -> Result<Layout> {
    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let (auto_width, auto_height) = display::arcade::board_for_terminal(cols, rows);
    Ok(Layout::new(
        options.board_width.board().unwrap_or(auto_width),
        options.board_height.board().unwrap_or(auto_height),
    ))
}

/// Runs until the player leaves.  `dt` is measured from the wall clock each
/// frame; whole seconds are fed to the countdown separately.
fn arcade_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    options: &ArcadeOptions,
) -> Result<Exit> {
    let layout = resolve_layout(options)?;
    let mut state = init_state(layout, options.time_limit, rng);
    let mut last_frame = Instant::now();
    let mut second_acc = 0.0_f32;

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame).as_secs_f32();
        last_frame = frame_start;

        for key in drain_key_presses(rx) {
            match command_for(&key) {
                Some(Command::Quit) => return Ok(Exit::Quit),
                Some(Command::Leave) => return Ok(Exit::Menu),
                Some(Command::Restart) => state = restart(&state, rng),
                Some(Command::Confirm) => state = dismiss_modal(&state, rng),
                Some(Command::Move(direction)) => state = handle_input(&state, Some(direction)),
                None => state = handle_input(&state, None),
            }
        }

        state = frame(&state, dt, rng);

        second_acc += dt;
        while second_acc >= 1.0 {
            state = tick_clock(&state);
            second_acc -= 1.0;
        }

        display::arcade::render(out, &state)?;
        sleep_rest_of_frame(frame_start);
    }
}

// ── Memory loop ───────────────────────────────────────────────────────────────

fn memory_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    options: &MemoryOptions,
) -> Result<Exit> {
    let mut state = init_memory(options.flip_delay_ms as f32 / 1000.0, rng);
    let mut last_frame = Instant::now();
    let mut second_acc = 0.0_f32;

    loop {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last_frame).as_secs_f32();
        last_frame = frame_start;

        for key in drain_key_presses(rx) {
            match command_for(&key) {
                Some(Command::Quit) => return Ok(Exit::Quit),
                Some(Command::Leave) => return Ok(Exit::Menu),
                Some(Command::Restart) => state = restart_memory(&state, rng),
                Some(Command::Confirm) if state.status == MemoryStatus::Won => {
                    state = restart_memory(&state, rng)
                }
                Some(Command::Confirm) => state = select_at_cursor(&state),
                Some(Command::Move(direction)) => state = move_cursor(&state, direction),
                None => {}
            }
        }

        state = advance(&state, dt);

        second_acc += dt;
        while second_acc >= 1.0 {
            state = tick_stopwatch(&state);
            second_acc -= 1.0;
        }

        display::memory::render(out, &state)?;
        sleep_rest_of_frame(frame_start);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("crossing_games.log"));
    init_logging(&log_path)?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!("starting (seed: {:?})", cli.seed);

    let mut guard = TerminalGuard::enter()?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loops never have to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut guard.out, &rx, &mut rng, cli.command);
    drop(guard);

    if let Err(err) = &result {
        error!("exiting with error: {:#}", err);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    command: Option<GameCommand>,
) -> Result<()> {
    if let Some(command) = command {
        match command {
            GameCommand::Arcade(options) => arcade_loop(out, rx, rng, &options)?,
            GameCommand::Memory(options) => memory_loop(out, rx, rng, &options)?,
        };
        return Ok(());
    }

    loop {
        let exit = match show_menu(out, rx)? {
            MenuChoice::Quit => break,
            MenuChoice::Arcade => arcade_loop(out, rx, rng, &ArcadeOptions::default())?,
            MenuChoice::Memory => memory_loop(out, rx, rng, &MemoryOptions::default())?,
        };
        if let Exit::Quit = exit {
            break;
        }
    }
    info!("bye");
    Ok(())
}
