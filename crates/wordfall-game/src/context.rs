//! The explicit context threaded through every phase and system.
//!
//! Everything the original design reached for through ambient globals --
//! config, frontend sinks, the score store, the word bank, the input queue --
//! lives here and is passed by reference. Phases also use the context to
//! request transitions, which the game applies at the top of the next frame
//! rather than mid-tick.

use crate::config::GameConfig;
use crate::content::WordBank;
use crate::frontend::Frontend;
use crate::input::InputQueue;
use crate::machine::PhaseParams;
use crate::persist::ScoreStore;

/// Shared services for phases and systems.
pub struct GameContext {
    /// Tuning constants.
    pub config: GameConfig,
    /// Render/audio/HUD collaborators.
    pub frontend: Frontend,
    /// Best-score and leaderboard persistence.
    pub scores: Box<dyn ScoreStore>,
    /// Level-indexed content tables.
    pub bank: WordBank,
    /// Buffered keyboard input.
    pub input: InputQueue,
    /// Seed for session randomness.
    pub seed: u64,
    /// Requested transition, applied at the top of the next frame. Latest
    /// request wins.
    pending: Option<(String, PhaseParams)>,
}

impl GameContext {
    /// Bundle the services.
    pub fn new(
        config: GameConfig,
        frontend: Frontend,
        scores: Box<dyn ScoreStore>,
        bank: WordBank,
        seed: u64,
    ) -> Self {
        Self {
            config,
            frontend,
            scores,
            bank,
            input: InputQueue::new(),
            seed,
            pending: None,
        }
    }

    /// Ask for a phase change. The switch happens at the top of the next
    /// frame, never synchronously mid-tick.
    pub fn request_phase(&mut self, name: &str, params: PhaseParams) {
        if let Some((prev, _)) = &self.pending {
            tracing::debug!(replaced = %prev, with = name, "phase request superseded");
        }
        self.pending = Some((name.to_owned(), params));
    }

    /// Take the pending request, if any.
    pub(crate) fn take_request(&mut self) -> Option<(String, PhaseParams)> {
        self.pending.take()
    }

    /// Whether a transition is waiting.
    pub fn has_pending_request(&self) -> bool {
        self.pending.is_some()
    }
}

impl std::fmt::Debug for GameContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameContext")
            .field("seed", &self.seed)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
