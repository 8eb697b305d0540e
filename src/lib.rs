//! Circle Pong - A circular arena arcade game for the terminal
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match state)
//! - `controller`: Paddle controllers (manual, autonomous, predictive)
//! - `renderer`: Character-grid frame generation
//! - `platform`: Terminal input/output ports
//! - `game_loop`: Fixed-cadence driver tying the above together

pub mod controller;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use controller::{Control, PaddleController};
pub use game_loop::{GameLoop, MatchOutcome, MatchSummary};
pub use settings::{ControlMode, Settings, SpeedUp};

use glam::DVec2;
use std::f64::consts::{PI, TAU};

/// Game configuration constants
pub mod consts {
    /// Arena boundary radius (world units)
    pub const ARENA_RADIUS: f64 = 8.0;
    /// Paddle angular half-width (radians)
    pub const PADDLE_HALF_WIDTH: f64 = 0.5;

    /// Initial ball velocity, per tick
    pub const BALL_START_VEL: (f64, f64) = (0.3, 0.2);
    /// Distance the ball is pulled back inside the boundary after a deflection
    pub const DEFLECT_INSET: f64 = 0.1;
    /// Perturbation applied to each velocity component on deflection (±)
    pub const DEFLECT_PERTURBATION: f64 = 0.10;

    /// Paddle step for manual input (radians per tick)
    pub const MANUAL_STEP: f64 = 0.15;
    /// Paddle step for the autonomous controllers (radians per tick)
    pub const AUTO_STEP: f64 = 0.15;
    /// Autonomous controllers don't move when closer than this to the target
    pub const AUTO_DEAD_ZONE: f64 = 0.05;
    /// Aim error of the autonomous controllers (±radians)
    pub const AUTO_JITTER: f64 = 0.3;
    /// How far ahead the predictive controller simulates the ball
    pub const PREDICT_HORIZON_TICKS: u32 = 120;

    /// Speed-up defaults when the policy is switched on
    pub const SPEED_UP_PER_HIT: f64 = 0.02;
    pub const SPEED_UP_MAX_SPEED: f64 = 0.8;

    /// Grid dimensions (characters)
    pub const GRID_WIDTH: usize = 41;
    pub const GRID_HEIGHT: usize = 21;
    /// Columns per world unit
    pub const GRID_SCALE: f64 = 2.0;
    /// Rows are squashed relative to columns (character cells are tall)
    pub const GRID_SQUASH: f64 = 0.5;
    /// Angular step of the boundary guide (3 degrees)
    pub const BOUNDARY_STEP: f64 = 3.0 * std::f64::consts::PI / 180.0;
    /// Angular step when sampling the paddle arc
    pub const PADDLE_SAMPLE_STEP: f64 = 0.05;

    /// Fixed tick interval
    pub const TICK_MS: u64 = 100;
}

/// Euclidean distance of (x, y) from the arena center
#[inline]
pub fn distance(x: f64, y: f64) -> f64 {
    x.hypot(y)
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negatives up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Shortest unsigned angular distance between two angles, in [0, π]
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (normalize_angle(a) - normalize_angle(b)).abs();
    if diff > PI { TAU - diff } else { diff }
}

/// Signed shortest rotation taking `from` onto `target`, in (-π, π]
#[inline]
pub fn signed_angle_delta(target: f64, from: f64) -> f64 {
    let delta = normalize_angle(target - from);
    if delta > PI { delta - TAU } else { delta }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta), theta in [0, 2π)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (distance(pos.x, pos.y), normalize_angle(pos.y.atan2(pos.x)))
}
