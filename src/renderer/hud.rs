//! Status lines shown under the playfield

use crate::game_loop::MatchOutcome;
use crate::settings::ControlMode;
use crate::sim::GameState;

/// What the loop is doing, as far as the status lines care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudPhase {
    Playing,
    Paused,
    Finished(MatchOutcome),
}

/// Score line, control hints, and the pause / game-over banner
pub fn status_lines(state: &GameState, mode: ControlMode, phase: HudPhase) -> Vec<String> {
    let mut lines = vec![
        format!("Score: {}", state.score()),
        mode.controls_hint().to_string(),
    ];

    match phase {
        HudPhase::Playing => {}
        HudPhase::Paused => lines.push("PAUSED".to_string()),
        HudPhase::Finished(outcome) => {
            lines.push(outcome.banner(state.score(), state.time_ticks));
        }
    }
    lines
}
