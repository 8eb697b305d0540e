//! Frame generation from match state
//!
//! Layers are drawn back to front and later layers win a shared cell:
//! boundary guide, paddle arc, ball, center marker. The ball stays visible
//! over the paddle; the center marker is always shown.

use std::f64::consts::TAU;

use super::grid::{Frame, Projection};
use crate::polar_to_cartesian;
use crate::settings::Settings;
use crate::sim::GameState;

pub const BOUNDARY_GLYPH: char = '.';
pub const PADDLE_GLYPH: char = '=';
pub const BALL_GLYPH: char = 'O';
pub const CENTER_GLYPH: char = '+';

/// Everything needed to turn a state into a frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub projection: Projection,
    pub arena_radius: f64,
    pub show_boundary: bool,
    pub boundary_step: f64,
    pub paddle_sample_step: f64,
}

impl Scene {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            width: settings.grid_width,
            height: settings.grid_height,
            projection: Projection::from_settings(settings),
            arena_radius: settings.arena_radius,
            show_boundary: settings.show_boundary,
            boundary_step: settings.boundary_step,
            paddle_sample_step: settings.paddle_sample_step,
        }
    }

    /// Regenerate the whole frame from the current state
    pub fn render(&self, state: &GameState) -> Frame {
        let mut frame = Frame::new(self.width, self.height);

        if self.show_boundary {
            self.draw_boundary(&mut frame);
        }
        self.draw_paddle(&mut frame, state);

        let (col, row) = self.projection.project(state.ball.pos);
        frame.set(col, row, BALL_GLYPH);

        frame.set(
            self.projection.center_col,
            self.projection.center_row,
            CENTER_GLYPH,
        );
        frame
    }

    fn draw_boundary(&self, frame: &mut Frame) {
        if self.boundary_step <= 0.0 {
            return;
        }
        let samples = (TAU / self.boundary_step).ceil() as usize;
        for i in 0..samples {
            let theta = i as f64 * self.boundary_step;
            let (col, row) = self
                .projection
                .project(polar_to_cartesian(self.arena_radius, theta));
            frame.set(col, row, BOUNDARY_GLYPH);
        }
    }

    fn draw_paddle(&self, frame: &mut Frame, state: &GameState) {
        let arc = state.paddle.as_arc();
        for point in arc.sample_points(self.arena_radius, self.paddle_sample_step) {
            let (col, row) = self.projection.project(point);
            frame.set(col, row, PADDLE_GLYPH);
        }
    }
}

/// Render one frame with the given settings
pub fn render_frame(state: &GameState, settings: &Settings) -> Frame {
    Scene::from_settings(settings).render(state)
}
