//! Next-threat briefing between story and play; Enter resumes the run.

use crate::context::GameContext;
use crate::input::Key;
use crate::machine::{Phase, PhaseParams};
use crate::states::names;

/// The briefing phase.
#[derive(Debug, Default)]
pub struct BriefingPhase {
    next_level: u32,
    score: u64,
}

impl BriefingPhase {
    /// New briefing phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// One-line threat description for the upcoming level.
    pub fn threat(&self) -> &'static str {
        match self.next_level {
            0..=10 => "ARCHIVE CORRUPTION SPREADING",
            11..=20 => "CLOCKTOWER DESYNCHRONIZED",
            21..=30 => "VOID BLEED DETECTED",
            _ => "UNKNOWN VECTOR",
        }
    }
}

impl Phase for BriefingPhase {
    fn enter(&mut self, ctx: &mut GameContext, params: &PhaseParams) {
        self.next_level = params.level.unwrap_or(1);
        self.score = params.score.unwrap_or(0);
        ctx.input.clear();
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        if ctx.input.drain().contains(&Key::Enter) {
            ctx.request_phase(
                names::PLAYING,
                PhaseParams::for_run(self.next_level, self.score),
            );
        }
    }
}
