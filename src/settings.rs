//! Game settings
//!
//! Every tunable lives here with its default taken from [`crate::consts`].
//! Settings are built in code (and tweaked by CLI flags), never loaded from disk.

use std::time::Duration;

use clap::ValueEnum;
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which paddle controller drives the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ControlMode {
    /// Keyboard input
    #[default]
    Manual,
    /// Tracks the ball's current angle with some aim error
    Auto,
    /// Aims at the predicted boundary crossing
    Predictive,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Manual => "manual",
            ControlMode::Auto => "auto",
            ControlMode::Predictive => "predictive",
        }
    }

    /// Whether the paddle is steered by the keyboard
    pub fn is_manual(&self) -> bool {
        matches!(self, ControlMode::Manual)
    }

    /// Control hint shown under the playfield
    pub fn controls_hint(&self) -> &'static str {
        match self {
            ControlMode::Manual => "Controls: A/D or Left/Right to move, Space to pause, Q to quit",
            ControlMode::Auto | ControlMode::Predictive => {
                "Auto-play: Space to pause, Q to quit"
            }
        }
    }
}

/// Velocity growth applied on every deflection
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SpeedUp {
    /// Speed only changes by perturbation
    #[default]
    Disabled,
    /// Each velocity component grows by `per_hit` away from zero, then the
    /// overall speed is capped at `max_speed`
    Increment { per_hit: f64, max_speed: f64 },
}

impl SpeedUp {
    /// The policy with the default increment and cap
    pub fn enabled() -> Self {
        SpeedUp::Increment {
            per_hit: SPEED_UP_PER_HIT,
            max_speed: SPEED_UP_MAX_SPEED,
        }
    }

    /// Apply the policy to a post-reflection velocity
    pub fn apply(&self, vel: DVec2) -> DVec2 {
        match *self {
            SpeedUp::Disabled => vel,
            SpeedUp::Increment { per_hit, max_speed } => {
                let grow = |c: f64| if c == 0.0 { c } else { c + per_hit * c.signum() };
                let grown = DVec2::new(grow(vel.x), grow(vel.y));
                let speed = grown.length();
                if speed > max_speed && speed > 0.0 {
                    grown * (max_speed / speed)
                } else {
                    grown
                }
            }
        }
    }
}

/// Complete match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Arena & physics ===
    /// Boundary radius
    pub arena_radius: f64,
    /// Paddle angular half-width (radians)
    pub paddle_half_width: f64,
    /// Ball velocity at match start
    pub initial_velocity: DVec2,
    /// Inset used when pulling a deflected ball back inside
    pub deflect_inset: f64,
    /// Per-component perturbation range on deflection (±)
    pub perturbation: f64,
    /// Speed-up policy
    pub speed_up: SpeedUp,

    // === Controllers ===
    pub mode: ControlMode,
    /// Manual paddle step (radians per tick)
    pub manual_step: f64,
    /// Autonomous paddle step (radians per tick)
    pub auto_step: f64,
    /// Autonomous dead zone (radians)
    pub auto_dead_zone: f64,
    /// Autonomous aim error (±radians)
    pub auto_jitter: f64,
    /// Predictive look-ahead (ticks)
    pub predict_horizon: u32,

    // === Render surface ===
    pub grid_width: usize,
    pub grid_height: usize,
    /// Columns per world unit
    pub grid_scale: f64,
    /// Vertical squash of rows relative to columns
    pub grid_squash: f64,
    /// Draw the boundary guide
    pub show_boundary: bool,
    pub boundary_step: f64,
    pub paddle_sample_step: f64,

    // === Loop ===
    /// Fixed delay between ticks (milliseconds)
    pub tick_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_radius: ARENA_RADIUS,
            paddle_half_width: PADDLE_HALF_WIDTH,
            initial_velocity: DVec2::new(BALL_START_VEL.0, BALL_START_VEL.1),
            deflect_inset: DEFLECT_INSET,
            perturbation: DEFLECT_PERTURBATION,
            speed_up: SpeedUp::Disabled,

            mode: ControlMode::Manual,
            manual_step: MANUAL_STEP,
            auto_step: AUTO_STEP,
            auto_dead_zone: AUTO_DEAD_ZONE,
            auto_jitter: AUTO_JITTER,
            predict_horizon: PREDICT_HORIZON_TICKS,

            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            grid_scale: GRID_SCALE,
            grid_squash: GRID_SQUASH,
            show_boundary: true,
            boundary_step: BOUNDARY_STEP,
            paddle_sample_step: PADDLE_SAMPLE_STEP,

            tick_ms: TICK_MS,
        }
    }
}

impl Settings {
    /// Default settings for a given controller mode
    pub fn for_mode(mode: ControlMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Fixed tick interval
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Settings with no perturbation, for exact physics checks
    pub fn without_perturbation(mut self) -> Self {
        self.perturbation = 0.0;
        self
    }
}
