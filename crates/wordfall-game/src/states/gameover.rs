//! Run finished: persist the result, wait for Enter to return to the menu.

use crate::context::GameContext;
use crate::input::Key;
use crate::machine::{Phase, PhaseParams};
use crate::persist::ScoreStore;
use crate::states::names;

/// Name recorded on the leaderboard. A name-entry surface is frontend
/// territory; the core stamps a fixed callsign.
const DEFAULT_NAME: &str = "AGENT";

/// The game-over phase.
#[derive(Debug, Default)]
pub struct GameOverPhase {
    final_score: u64,
}

impl GameOverPhase {
    /// New game-over phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// The score the run ended with.
    pub fn final_score(&self) -> u64 {
        self.final_score
    }
}

impl Phase for GameOverPhase {
    fn enter(&mut self, ctx: &mut GameContext, params: &PhaseParams) {
        self.final_score = params.score.unwrap_or(0);
        ctx.input.clear();

        if let Err(err) = ctx.scores.submit(DEFAULT_NAME, self.final_score) {
            tracing::warn!(error = %err, "failed to record leaderboard entry");
        }
        tracing::info!(score = self.final_score, "game over");
    }

    fn update(&mut self, ctx: &mut GameContext, _dt: f64) {
        if ctx.input.drain().contains(&Key::Enter) {
            ctx.request_phase(names::MENU, PhaseParams::default());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::content::WordBank;
    use crate::frontend::Frontend;
    use crate::persist::MemoryScoreStore;

    fn ctx() -> GameContext {
        GameContext::new(
            GameConfig::default(),
            Frontend::null(),
            Box::new(MemoryScoreStore::new()),
            WordBank::default(),
            1,
        )
    }

    #[test]
    fn entering_submits_the_leaderboard_entry() {
        let mut ctx = ctx();
        let mut over = GameOverPhase::new();
        over.enter(
            &mut ctx,
            &PhaseParams {
                score: Some(4321),
                ..PhaseParams::default()
            },
        );
        assert_eq!(over.final_score(), 4321);
        let board = ctx.scores.leaderboard();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].score, 4321);
        assert_eq!(board[0].name, "AGENT");
        assert_eq!(ctx.scores.best_score(), 4321);
    }

    #[test]
    fn enter_key_returns_to_menu() {
        let mut ctx = ctx();
        let mut over = GameOverPhase::new();
        over.enter(&mut ctx, &PhaseParams::default());
        ctx.input.push(Key::Enter);
        over.update(&mut ctx, 0.016);
        let (name, _) = ctx.take_request().unwrap();
        assert_eq!(name, names::MENU);
    }
}
