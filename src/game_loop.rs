//! Fixed-cadence game loop driver
//!
//! `Init -> Running -> Terminated`. Each running tick polls one input symbol,
//! asks the controller for a paddle delta, steps the simulation, renders, and
//! sleeps for the tick interval. The loop owns the pause flag; the simulation
//! never sees it.

use std::io;
use std::thread;

use serde::{Deserialize, Serialize};

use crate::controller::{Command, Control, PaddleController};
use crate::platform::{InputSource, OutputDevice};
use crate::renderer::{HudPhase, Scene, status_lines};
use crate::settings::{ControlMode, Settings};
use crate::sim::{GameState, step};

/// Why a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// The ball escaped past the paddle
    GameOver,
    /// The player asked to stop
    Quit,
    /// The loop hit its configured tick limit with the match still live
    TickLimit,
}

impl MatchOutcome {
    /// Final status line for this outcome
    pub fn banner(&self, score: u64, ticks: u64) -> String {
        match self {
            Self::GameOver => format!("GAME OVER! Final Score: {score}"),
            Self::Quit => format!("Quit. Final Score: {score}"),
            Self::TickLimit => format!("Stopped after {ticks} ticks. Final Score: {score}"),
        }
    }
}

/// Result of one finished match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub mode: ControlMode,
    pub score: u64,
    /// Simulation ticks actually stepped (paused ticks don't count)
    pub ticks: u64,
    pub outcome: MatchOutcome,
}

impl MatchSummary {
    pub fn banner(&self) -> String {
        self.outcome.banner(self.score, self.ticks)
    }
}

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Init,
    Running,
    Terminated,
}

/// Owns one match and drives it to completion
#[derive(Debug)]
pub struct GameLoop {
    settings: Settings,
    scene: Scene,
    state: GameState,
    phase: LoopPhase,
    paused: bool,
    quit_requested: bool,
    /// Stop after this many loop iterations (paused ones included)
    tick_limit: Option<u64>,
    iterations: u64,
}

impl GameLoop {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let state = GameState::new(&settings, seed);
        let scene = Scene::from_settings(&settings);
        Self {
            settings,
            scene,
            state,
            phase: LoopPhase::Init,
            paused: false,
            quit_requested: false,
            tick_limit: None,
            iterations: 0,
        }
    }

    pub fn with_tick_limit(mut self, limit: Option<u64>) -> Self {
        self.tick_limit = limit;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Run the match to the end and render the final frame
    ///
    /// Only I/O failures from the ports are reported as errors; every
    /// simulation outcome is a normal [`MatchSummary`].
    pub fn run(
        &mut self,
        controller: &mut dyn PaddleController,
        input: &mut dyn InputSource,
        output: &mut dyn OutputDevice,
    ) -> io::Result<MatchSummary> {
        let mode = controller.mode();
        log::info!(
            "Match started: seed {}, mode {}",
            self.state.seed,
            mode.as_str()
        );

        self.present(output, mode, HudPhase::Playing)?;
        self.phase = LoopPhase::Running;

        let interval = self.settings.tick_interval();
        while self.state.is_running() && !self.limit_reached() {
            self.iterations += 1;

            let command = input.poll_command()?;
            if command == Command::Pause {
                self.paused = !self.paused;
                log::debug!(
                    "{} at tick {}",
                    if self.paused { "Paused" } else { "Resumed" },
                    self.state.time_ticks
                );
            }

            if command == Command::Quit {
                self.quit_requested = true;
                self.state.quit();
                break;
            }

            if !self.paused {
                // The pause symbol belongs to the loop, not the controller
                let command = if command == Command::Pause {
                    Command::None
                } else {
                    command
                };
                match controller.control(&self.state, command) {
                    Control::Rotate(delta) => {
                        step(&mut self.state, delta);
                    }
                    Control::Quit => {
                        self.quit_requested = true;
                        self.state.quit();
                        break;
                    }
                }
            }

            let hud = if self.paused {
                HudPhase::Paused
            } else {
                HudPhase::Playing
            };
            self.present(output, mode, hud)?;

            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }

        self.phase = LoopPhase::Terminated;
        let summary = self.summary(mode);
        self.present(output, mode, HudPhase::Finished(summary.outcome))?;

        log::info!(
            "Match ended: {:?}, score {}, {} ticks",
            summary.outcome,
            summary.score,
            summary.ticks
        );
        Ok(summary)
    }

    fn limit_reached(&self) -> bool {
        self.tick_limit
            .is_some_and(|limit| self.iterations >= limit)
    }

    fn outcome(&self) -> MatchOutcome {
        if self.quit_requested {
            MatchOutcome::Quit
        } else if !self.state.is_running() {
            MatchOutcome::GameOver
        } else {
            MatchOutcome::TickLimit
        }
    }

    fn summary(&self, mode: ControlMode) -> MatchSummary {
        MatchSummary {
            seed: self.state.seed,
            mode,
            score: self.state.score(),
            ticks: self.state.time_ticks,
            outcome: self.outcome(),
        }
    }

    fn present(
        &self,
        output: &mut dyn OutputDevice,
        mode: ControlMode,
        hud: HudPhase,
    ) -> io::Result<()> {
        let frame = self.scene.render(&self.state);
        output.present(&frame, &status_lines(&self.state, mode, hud))
    }
}
