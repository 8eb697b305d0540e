//! Character-grid rendering
//!
//! Each tick the whole grid is regenerated from the match state; there is no
//! diffing. Getting the grid onto a screen is the output device's job.

pub mod grid;
pub mod hud;
pub mod scene;

pub use grid::{Frame, Projection};
pub use hud::{HudPhase, status_lines};
pub use scene::{Scene, render_frame};
