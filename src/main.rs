//! Circle Pong entry point
//!
//! Parses the command line, sets up logging and the terminal, and runs one
//! match.
//!
//! Usage:
//!   circle-pong                       # manual play
//!   circle-pong --mode auto           # watch the autonomous controller
//!   circle-pong --headless --mode predictive --max-ticks 20000

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use circle_pong::controller::create_controller;
use circle_pong::platform::{
    KeyboardInput, NoInput, NullOutput, TerminalOutput, TerminalSession, wait_for_key,
};
use circle_pong::{ControlMode, GameLoop, MatchSummary, Settings, SpeedUp};

#[derive(Parser, Debug)]
#[command(name = "circle-pong")]
#[command(about = "Keep the ball inside a circular arena with a rotating paddle")]
struct Cli {
    /// Who moves the paddle
    #[arg(long, value_enum, default_value_t = ControlMode::Manual)]
    mode: ControlMode,

    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Speed the ball up a little on every deflection
    #[arg(long)]
    speed_up: bool,

    /// Run without a terminal and print a JSON summary
    #[arg(long)]
    headless: bool,

    /// Stop after this many ticks
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_settings: bool,
}

impl Cli {
    fn settings(&self) -> Settings {
        let mut settings = Settings::for_mode(self.mode);
        if self.speed_up {
            settings.speed_up = SpeedUp::enabled();
        }
        if self.headless {
            settings.tick_ms = 0;
        }
        settings
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = cli.settings();

    if cli.print_settings {
        let json =
            serde_json::to_string_pretty(&settings).context("Failed to serialize settings")?;
        println!("{json}");
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(time_seed);
    log::info!("Circle Pong starting (seed {seed})");

    if cli.headless {
        let summary = run_headless(settings, seed, cli.max_ticks)?;
        let json = serde_json::to_string(&summary).context("Failed to serialize summary")?;
        println!("{json}");
    } else {
        let summary = run_interactive(settings, seed, cli.max_ticks)?;
        println!("{}", summary.banner());
    }
    Ok(())
}

fn run_headless(settings: Settings, seed: u64, max_ticks: Option<u64>) -> Result<MatchSummary> {
    let mut controller = create_controller(&settings, seed);
    GameLoop::new(settings, seed)
        .with_tick_limit(max_ticks)
        .run(controller.as_mut(), &mut NoInput, &mut NullOutput)
        .context("Headless match failed")
}

fn run_interactive(
    settings: Settings,
    seed: u64,
    max_ticks: Option<u64>,
) -> Result<MatchSummary> {
    let mut controller = create_controller(&settings, seed);
    let mut game = GameLoop::new(settings, seed).with_tick_limit(max_ticks);

    let session = TerminalSession::enter().context("Failed to set up the terminal")?;
    let mut output = TerminalOutput::new(io::stdout());
    let summary = game
        .run(controller.as_mut(), &mut KeyboardInput, &mut output)
        .context("Match aborted by a terminal error")?;

    output
        .prompt("Press any key to exit...")
        .context("Failed to write to the terminal")?;
    wait_for_key().context("Failed to read the exit key")?;
    drop(session);

    Ok(summary)
}
