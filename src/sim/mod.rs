//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod arc;
pub mod collision;
pub mod state;
pub mod tick;

pub use arc::ArcSpan;
pub use collision::{Crossing, boundary_crossing, deflect, is_covered, reflect_velocity};
pub use state::{Ball, GameState, MatchState, Paddle, Physics, symmetric_noise};
pub use tick::{TickResult, predict_crossing_angle, step};
