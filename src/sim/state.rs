//! Match state and core simulation types
//!
//! Everything one match needs lives here and is created once at match start.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arc::ArcSpan;
use crate::settings::{Settings, SpeedUp};
use crate::{cartesian_to_polar, normalize_angle};

/// The ball, in arena coordinates (center = origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    /// Per-tick displacement
    pub vel: DVec2,
}

impl Ball {
    pub fn new(pos: DVec2, vel: DVec2) -> Self {
        Self { pos, vel }
    }

    /// Distance from the arena center (recomputed, never cached)
    #[inline]
    pub fn distance(&self) -> f64 {
        self.pos.length()
    }

    /// Angle from the arena center to the ball, in [0, 2π)
    #[inline]
    pub fn angle(&self) -> f64 {
        cartesian_to_polar(self.pos).1
    }

    /// One explicit Euler step
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Current angle (radians, center of paddle arc, [0, 2π))
    pub theta: f64,
    /// Angular half-width (radians)
    pub half_width: f64,
}

impl Paddle {
    pub fn new(half_width: f64) -> Self {
        Self {
            theta: 0.0,
            half_width,
        }
    }

    /// Get the paddle as an ArcSpan for coverage tests and drawing
    pub fn as_arc(&self) -> ArcSpan {
        ArcSpan::new(self.theta, self.half_width)
    }

    /// Rotate by `delta` radians with wraparound
    pub fn rotate(&mut self, delta: f64) {
        self.theta = normalize_angle(self.theta + delta);
    }
}

/// Score and liveness of the current match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub score: u64,
    running: bool,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            score: 0,
            running: true,
        }
    }
}

impl MatchState {
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Credit one deflection
    pub fn record_deflection(&mut self) {
        self.score += 1;
    }

    /// Stop the match. Returns true only for the call that actually stopped it.
    pub fn end(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }
}

/// Physics constants copied out of [`Settings`] for the match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Physics {
    pub arena_radius: f64,
    pub deflect_inset: f64,
    pub perturbation: f64,
    pub speed_up: SpeedUp,
}

impl From<&Settings> for Physics {
    fn from(settings: &Settings) -> Self {
        Self {
            arena_radius: settings.arena_radius,
            deflect_inset: settings.deflect_inset,
            perturbation: settings.perturbation,
            speed_up: settings.speed_up,
        }
    }
}

/// Complete match state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub match_state: MatchState,
    pub physics: Physics,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Source of deflection perturbation
    rng: Pcg32,
}

impl GameState {
    /// Create a new match with the given seed
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            seed,
            ball: Ball::new(DVec2::ZERO, settings.initial_velocity),
            paddle: Paddle::new(settings.paddle_half_width),
            match_state: MatchState::default(),
            physics: Physics::from(settings),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.match_state.is_running()
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.match_state.score
    }

    /// Explicit quit from the player; irreversible like a miss
    pub fn quit(&mut self) {
        if self.match_state.end() {
            log::info!("Match quit at score {}", self.score());
        }
    }

    pub(crate) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

/// Uniform noise in `[-amplitude, amplitude]`; zero when the amplitude is not positive
pub fn symmetric_noise<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude > 0.0 {
        rng.random_range(-amplitude..=amplitude)
    } else {
        0.0
    }
}
