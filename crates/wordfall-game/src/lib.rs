//! Wordfall game core -- fixed-timestep runtime for a falling-words typing
//! game.
//!
//! Builds on [`wordfall_ecs`] with the per-tick systems (spawning, typing
//! resolution, motion, render/HUD sync), the phase state machine that
//! sequences menu, play, boss encounters, and interludes, and the frame clock
//! that drives it all. Rendering, audio, and persistence sit behind narrow
//! collaborator traits, so the whole game runs headless.
//!
//! # Quick Start
//!
//! ```
//! use wordfall_game::prelude::*;
//!
//! let mut game = Game::new(
//!     GameConfig::default(),
//!     Frontend::null(),
//!     Box::new(MemoryScoreStore::new()),
//!     WordBank::default(),
//!     0xC0FFEE,
//! );
//!
//! // Boot lands on the menu; Enter starts a run.
//! game.frame(1.0 / 60.0);
//! game.frame(1.0 / 60.0);
//! game.key(Key::Enter);
//! game.frame(1.0 / 60.0);
//! game.frame(1.0 / 60.0);
//! assert_eq!(game.current_phase(), Some("playing"));
//! ```

#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod content;
pub mod context;
pub mod frontend;
pub mod game;
pub mod input;
pub mod machine;
pub mod ops;
pub mod persist;
pub mod session;
pub mod states;
pub mod systems;

/// Re-export the ECS crate for convenience.
pub use wordfall_ecs;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors surfaced by the game runtime.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A transition targeted a phase name that was never registered. The
    /// machine stays on the previous phase.
    #[error("phase '{0}' is not registered")]
    UnknownPhase(String),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::clock::{Countdown, FixedTimestep, TickDriver};
    pub use crate::config::{GameConfig, LevelParams};
    pub use crate::content::{WordBank, FALLBACK_WORD};
    pub use crate::context::GameContext;
    pub use crate::frontend::{
        AudioSink, Frontend, FrontendEvent, HudSnapshot, NullFrontend, RecordingFrontend,
        RenderSink, SoundCue, UiSink,
    };
    pub use crate::game::Game;
    pub use crate::input::{InputQueue, Key};
    pub use crate::machine::{Phase, PhaseParams, StateMachine};
    pub use crate::persist::{
        JsonFileScoreStore, LeaderboardEntry, MemoryScoreStore, PersistError, ScoreStore,
    };
    pub use crate::session::{GameSession, SessionStats, TickOutcome};
    pub use crate::states::names;
    pub use crate::GameError;

    pub use wordfall_ecs::prelude::*;
}
