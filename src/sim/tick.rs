//! Fixed timestep simulation tick
//!
//! One call advances the match by exactly one tick: paddle, then ball, then
//! the boundary check. There is no delta time; a tick is the unit of time.

use glam::DVec2;

use super::collision::{boundary_crossing, deflect, is_covered};
use super::state::GameState;

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Ball still in open play
    Continued,
    /// Ball reached the boundary under the paddle and bounced
    Deflected,
    /// Ball escaped; the match is over
    GameOver,
}

/// Advance the match by one tick, rotating the paddle by `paddle_delta` first
///
/// Once the match has stopped this is a no-op that keeps returning
/// [`TickResult::GameOver`].
pub fn step(state: &mut GameState, paddle_delta: f64) -> TickResult {
    if !state.is_running() {
        return TickResult::GameOver;
    }

    state.time_ticks += 1;
    state.paddle.rotate(paddle_delta);
    state.ball.advance();

    let Some(crossing) = boundary_crossing(state.ball.pos, state.physics.arena_radius) else {
        // Open play, including passes through the center
        return TickResult::Continued;
    };

    if is_covered(crossing.angle, state.paddle.theta, state.paddle.half_width) {
        let physics = state.physics;
        let incoming = state.ball.vel;
        let (vel, pos) = deflect(incoming, &crossing, &physics, state.rng_mut());
        state.ball.vel = vel;
        state.ball.pos = pos;
        state.match_state.record_deflection();
        log::debug!(
            "Deflection #{} at {:.3} rad (tick {})",
            state.score(),
            crossing.angle,
            state.time_ticks
        );
        TickResult::Deflected
    } else {
        state.match_state.end();
        log::info!(
            "Ball escaped at {:.3} rad, paddle at {:.3} rad; final score {}",
            crossing.angle,
            state.paddle.theta,
            state.score()
        );
        TickResult::GameOver
    }
}

/// Predict where the ball will next reach the boundary, ignoring paddle and
/// perturbation. Returns the crossing angle, or None if it doesn't get there
/// within `horizon` ticks.
pub fn predict_crossing_angle(
    pos: DVec2,
    vel: DVec2,
    arena_radius: f64,
    horizon: u32,
) -> Option<f64> {
    let mut future = pos;
    for _ in 0..horizon {
        future += vel;
        if let Some(crossing) = boundary_crossing(future, arena_radius) {
            return Some(crossing.angle);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::Ball;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn quiet_settings() -> Settings {
        Settings::default().without_perturbation()
    }

    fn run_until_boundary(state: &mut GameState) -> TickResult {
        for _ in 0..1000 {
            match step(state, 0.0) {
                TickResult::Continued => continue,
                other => return other,
            }
        }
        panic!("ball never reached the boundary");
    }

    #[test]
    fn test_escape_outside_paddle_is_game_over() {
        // (0,0) moving (0.3, 0.2) crosses r=8 at atan2(0.2, 0.3) ≈ 0.588 rad,
        // outside a paddle at 0 with half-width 0.5
        let mut state = GameState::new(&Settings::default(), 1);
        let result = run_until_boundary(&mut state);
        assert_eq!(result, TickResult::GameOver);
        assert!(!state.is_running());
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_ticks, 23);

        let angle = state.ball.angle();
        assert!((angle - 0.2_f64.atan2(0.3)).abs() < 1e-9);
        assert!(state.ball.distance() >= 8.0);
    }

    #[test]
    fn test_paddle_on_crossing_deflects() {
        let mut state = GameState::new(&quiet_settings(), 1);
        state.paddle.theta = 0.2_f64.atan2(0.3);
        let result = run_until_boundary(&mut state);
        assert_eq!(result, TickResult::Deflected);
        assert_eq!(state.score(), 1);
        assert!(state.is_running());
        assert!(state.ball.distance() < 8.0);
        // Moving straight back toward the center after a head-on hit
        assert!(state.ball.vel.dot(state.ball.pos) < 0.0);
    }

    #[test]
    fn test_deflection_repositions_on_normal() {
        let mut state = GameState::new(&quiet_settings(), 1);
        state.ball = Ball::new(DVec2::new(0.0, 7.9), DVec2::new(0.0, 0.3));
        state.paddle.theta = FRAC_PI_2;
        assert_eq!(step(&mut state, 0.0), TickResult::Deflected);
        assert!((state.ball.pos - DVec2::new(0.0, 7.9)).length() < 1e-9);
        assert!((state.ball.vel - DVec2::new(0.0, -0.3)).length() < 1e-12);
    }

    #[test]
    fn test_paddle_delta_applied_before_check() {
        // Paddle starts off the crossing and is rotated onto it this tick
        let mut state = GameState::new(&quiet_settings(), 1);
        state.ball = Ball::new(DVec2::new(7.9, 0.0), DVec2::new(0.3, 0.0));
        state.paddle.theta = 0.6;
        assert_eq!(step(&mut state, -0.6), TickResult::Deflected);
        assert!(state.paddle.theta.abs() < 1e-12);
    }

    #[test]
    fn test_paddle_delta_wraps() {
        let mut state = GameState::new(&quiet_settings(), 1);
        step(&mut state, -0.15);
        assert!((state.paddle.theta - (2.0 * PI - 0.15)).abs() < 1e-12);
    }

    #[test]
    fn test_game_over_is_terminal() {
        let mut state = GameState::new(&Settings::default(), 1);
        run_until_boundary(&mut state);
        let frozen = state.ball;
        let ticks = state.time_ticks;
        for _ in 0..5 {
            assert_eq!(step(&mut state, 0.15), TickResult::GameOver);
        }
        assert_eq!(state.ball, frozen);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.paddle.theta, 0.0);
    }

    #[test]
    fn test_ball_passes_through_center() {
        let mut state = GameState::new(&quiet_settings(), 1);
        state.ball = Ball::new(DVec2::new(-0.3, 0.0), DVec2::new(0.3, 0.0));
        assert_eq!(step(&mut state, 0.0), TickResult::Continued);
        assert_eq!(state.ball.pos, DVec2::ZERO);
        assert_eq!(step(&mut state, 0.0), TickResult::Continued);
        assert!((state.ball.pos.x - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_zero_velocity_at_center_never_crosses() {
        let mut settings = quiet_settings();
        settings.arena_radius = 0.0;
        settings.initial_velocity = DVec2::ZERO;
        let mut state = GameState::new(&settings, 1);
        for _ in 0..10 {
            assert_eq!(step(&mut state, 0.0), TickResult::Continued);
        }
        assert!(state.is_running());
    }

    #[test]
    fn test_score_counts_every_deflection() {
        // Full-circle paddle: every crossing is a deflection
        let mut settings = Settings::default();
        settings.paddle_half_width = PI;
        let mut state = GameState::new(&settings, 42);
        let mut deflections = 0;
        let mut last_score = 0;
        for _ in 0..2000 {
            if step(&mut state, 0.0) == TickResult::Deflected {
                deflections += 1;
            }
            assert!(state.score() >= last_score);
            assert!(state.ball.distance() < 8.0);
            last_score = state.score();
        }
        assert!(deflections > 10);
        assert_eq!(state.score(), deflections);
        assert!(state.is_running());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut settings = Settings::default();
        settings.paddle_half_width = PI;
        let mut state1 = GameState::new(&settings, 99999);
        let mut state2 = GameState::new(&settings, 99999);

        for i in 0..500 {
            let delta = if i % 3 == 0 { 0.15 } else { -0.15 };
            assert_eq!(step(&mut state1, delta), step(&mut state2, delta));
        }

        assert_eq!(state1.ball, state2.ball);
        assert_eq!(state1.score(), state2.score());
        assert_eq!(state1.paddle.theta, state2.paddle.theta);
    }

    #[test]
    fn test_predict_crossing_angle() {
        let angle = predict_crossing_angle(DVec2::ZERO, DVec2::new(0.0, -0.5), 8.0, 120).unwrap();
        assert!((angle - 1.5 * PI).abs() < 1e-12);
        // Too slow to get there within the horizon
        assert!(predict_crossing_angle(DVec2::ZERO, DVec2::new(0.01, 0.0), 8.0, 120).is_none());
        assert!(predict_crossing_angle(DVec2::ZERO, DVec2::ZERO, 8.0, 120).is_none());
    }
}
