//! Warm-up phase; hands off to the menu on its first update.
//!
//! Asset loading lives with the frontend, so there is nothing to actually
//! wait for headless -- the phase exists to give the machine a well-defined
//! starting point.

use crate::context::GameContext;
use crate::machine::{Phase, PhaseParams};
use crate::states::names;

/// Boot phase.
#[derive(Debug, Default)]
pub struct LoadingPhase {
    handed_off: bool,
}

impl LoadingPhase {
    /// New boot phase.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Phase for LoadingPhase {
    fn enter(&mut self, _ctx: &mut GameContext, _params: &PhaseParams) {
        self.handed_off = false;
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        if !self.handed_off {
            self.handed_off = true;
            ctx.request_phase(names::MENU, PhaseParams::default());
        }
    }
}
