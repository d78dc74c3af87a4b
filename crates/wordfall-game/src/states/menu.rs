//! Title screen: shows the best score, waits for Enter.

use crate::context::GameContext;
use crate::frontend::HudSnapshot;
use crate::input::Key;
use crate::machine::{Phase, PhaseParams};
use crate::persist::ScoreStore;
use crate::states::names;

/// Menu phase.
#[derive(Debug, Default)]
pub struct MenuPhase;

impl MenuPhase {
    /// New menu phase.
    pub fn new() -> Self {
        Self
    }
}

impl Phase for MenuPhase {
    fn enter(&mut self, ctx: &mut GameContext, _params: &PhaseParams) {
        ctx.input.clear();
        let best = ctx.scores.best_score();
        ctx.frontend.ui.hud(&HudSnapshot {
            best,
            lives: ctx.config.starting_lives,
            level: 1,
            ..HudSnapshot::default()
        });
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        if ctx.input.drain().contains(&Key::Enter) {
            ctx.request_phase(names::PLAYING, PhaseParams::at_level(1));
        }
    }
}
