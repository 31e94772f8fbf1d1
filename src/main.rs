//! Gate Flight entry point
//!
//! Sets up the terminal and runs the fixed-timestep game loop.

use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::Print,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use gate_flight::Settings;
use gate_flight::consts::TICK_MS;
use gate_flight::sim::{GamePhase, Session, TickInput};
use gate_flight::ui::{KeyMap, render_view};

/// How long the aborted view stays up before the process exits
const ABORT_LINGER: Duration = Duration::from_millis(800);

#[derive(Parser, Debug, Clone)]
#[command(name = "gate-flight")]
#[command(about = "Fly through the gates: space to climb, q to abort", long_about = None)]
struct Args {
    /// Settings file (JSON)
    #[arg(long, default_value = Settings::FILE_NAME)]
    config: PathBuf,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Render frame interval in milliseconds
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Hide the key help line
    #[arg(long, default_value_t = false)]
    no_help: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = try_main() {
        println!("Houston, we have a problem ({:#})", e);
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::parse();

    let settings =
        Settings::load(&args.config).with_overrides(args.seed, args.frame_ms, args.no_help);

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Gate Flight starting (seed {})", seed);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("enabling raw mode")?;
    let _restore = TerminalGuard;
    execute!(stdout, EnterAlternateScreen, cursor::Hide).context("entering alternate screen")?;

    run(&mut stdout, &settings, seed)
}

/// Leaves the alternate screen and raw mode on drop, including error paths
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        if let Err(e) = terminal::disable_raw_mode() {
            log::warn!("Failed to leave raw mode: {}", e);
        }
    }
}

fn run(stdout: &mut Stdout, settings: &Settings, seed: u64) -> anyhow::Result<()> {
    let keymap = KeyMap::default();
    let mut session = Session::new(seed);

    let frame_dur = Duration::from_millis(settings.frame_ms);
    let max_substeps = settings.max_substeps as i64;

    let mut accumulator_ms = 0.0f64;
    let mut last_time = Instant::now();
    let mut pending: Option<TickInput> = None;

    loop {
        let frame_start = Instant::now();

        // ----- input (non-blocking, first bound key wins) -----
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = keymap.input_for(&key) {
                    pending.get_or_insert(input);
                }
            }
        }

        let phase = session.state().phase;
        if phase.is_terminal() && pending == Some(TickInput::Quit) {
            log::info!("Quit after crash (seed {})", session.seed());
            return Ok(());
        }

        // ----- simulation -----
        if phase == GamePhase::Playing {
            let now = Instant::now();
            accumulator_ms += now.duration_since(last_time).as_secs_f64() * 1000.0;
            last_time = now;

            let mut substeps = 0;
            while accumulator_ms >= TICK_MS as f64 && substeps < max_substeps {
                // One-shot input goes to the first tick of the frame
                let state = session.step(pending.take());
                accumulator_ms -= TICK_MS as f64;
                substeps += 1;
                if state.phase != GamePhase::Playing {
                    break;
                }
            }
            // Drop backlog we could not simulate
            accumulator_ms = accumulator_ms.min((max_substeps * TICK_MS) as f64);
        } else if let Some(input) = pending.take() {
            let state = session.step(Some(input));
            if state.phase == GamePhase::Playing {
                accumulator_ms = 0.0;
                last_time = Instant::now();
            }
        }

        // ----- render -----
        let state = session.state();
        draw(stdout, &render_view(&state.hud(), &keymap, settings.show_help))?;

        if state.phase == GamePhase::Exiting {
            log::info!("Run aborted (seed {})", session.seed());
            std::thread::sleep(ABORT_LINGER);
            return Ok(());
        }

        // ----- frame pacing -----
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

fn draw(stdout: &mut Stdout, lines: &[String]) -> io::Result<()> {
    queue!(stdout, terminal::Clear(ClearType::All))?;
    for (row, line) in lines.iter().enumerate() {
        queue!(stdout, cursor::MoveTo(0, row as u16), Print(line))?;
    }
    stdout.flush()
}
