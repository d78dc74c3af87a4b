//! Story interlude after a cleared boss; Enter moves on to the briefing.

use crate::content::LORE_LINES;
use crate::context::GameContext;
use crate::input::Key;
use crate::machine::{Phase, PhaseParams};
use crate::states::names;

/// The lore phase.
#[derive(Debug, Default)]
pub struct LorePhase {
    next_level: u32,
    score: u64,
}

impl LorePhase {
    /// New lore phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// The story lines on display.
    pub fn lines(&self) -> &'static [&'static str] {
        LORE_LINES
    }
}

impl Phase for LorePhase {
    fn enter(&mut self, ctx: &mut GameContext, params: &PhaseParams) {
        self.next_level = params.level.unwrap_or(1);
        self.score = params.score.unwrap_or(0);
        ctx.input.clear();
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        if ctx.input.drain().contains(&Key::Enter) {
            ctx.request_phase(
                names::BRIEFING,
                PhaseParams::for_run(self.next_level, self.score),
            );
        }
    }
}
