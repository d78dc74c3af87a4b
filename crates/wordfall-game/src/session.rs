//! One play session: stats, the entity store, the systems that work it, and
//! the per-tick pipeline.
//!
//! The session is owned by whichever phase is running it (playing or boss).
//! Systems run in a fixed order every tick -- commit, spawn, typing, motion,
//! render sync, HUD sync -- so input resolution always happens before the
//! boundary check and a just-typed word can never also count as a failure in
//! the same tick.

use wordfall_ecs::prelude::*;

use crate::clock::Countdown;
use crate::config::GameConfig;
use crate::content::WordBank;
use crate::frontend::{Frontend, SoundCue};
use crate::input::Key;
use crate::systems::{self, SpawnSystem, TypingSystem};

// ---------------------------------------------------------------------------
// SessionStats
// ---------------------------------------------------------------------------

/// The play-session scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    /// Current score.
    pub score: u64,
    /// Current level, starts at 1.
    pub level: u32,
    /// Remaining lives, never negative.
    pub lives: u32,
    /// Consecutive completed words.
    pub streak: u32,
    /// Rejected keystrokes.
    pub misses: u64,
    /// Debug invincibility; damage skips the life decrement.
    pub god_mode: bool,
}

impl SessionStats {
    /// Fresh stats with the given number of lives.
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            lives,
            streak: 0,
            misses: 0,
            god_mode: false,
        }
    }
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// What one tick of the session produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickOutcome {
    /// Lives lost this tick (one per kill-zone crossing).
    pub lives_lost: u32,
    /// Lives just reached zero; the caller requests the game-over phase.
    pub game_over: bool,
}

/// Stats, store, and systems for one run.
#[derive(Debug)]
pub struct GameSession {
    /// Scoreboard.
    pub stats: SessionStats,
    /// Entity and component storage.
    pub store: EntityStore,
    /// Spawning system (timing, lanes, boss queue).
    pub spawn: SpawnSystem,
    /// Typing system (input buffer).
    pub typing: TypingSystem,
    freeze: Countdown,
    flash: Countdown,
}

impl GameSession {
    /// Build a session; `seed` drives all of its randomness.
    pub fn new(cfg: &GameConfig, seed: u64) -> Self {
        Self {
            stats: SessionStats::new(cfg.starting_lives),
            store: EntityStore::new(),
            spawn: SpawnSystem::new(seed, cfg),
            typing: TypingSystem::new(),
            freeze: Countdown::idle(),
            flash: Countdown::idle(),
        }
    }

    /// Reset to a clean slate at the given level/score, releasing any
    /// leftover visual resources first.
    pub fn reset(&mut self, cfg: &GameConfig, level: u32, score: u64, frontend: &mut Frontend) {
        self.teardown(frontend);
        self.stats = SessionStats::new(cfg.starting_lives);
        self.stats.level = level.max(1);
        self.stats.score = score;
        self.spawn.reset(cfg);
        self.freeze = Countdown::idle();
        self.flash = Countdown::idle();
    }

    /// Release every visual resource and drop all entities. Phases call this
    /// in `exit` so repeated sessions start clean.
    pub fn teardown(&mut self, frontend: &mut Frontend) {
        systems::render_sync::release_all(&mut self.store, frontend.render.as_mut());
        self.store.clear();
        self.typing.reset(&self.store, frontend);
    }

    /// Whether movement is currently frozen.
    pub fn is_frozen(&self) -> bool {
        self.freeze.is_armed()
    }

    /// Run one fixed simulation step.
    pub fn tick(
        &mut self,
        dt: f64,
        keys: &[Key],
        bank: &WordBank,
        cfg: &GameConfig,
        frontend: &mut Frontend,
        best: u64,
    ) -> TickOutcome {
        self.store.commit();
        let _ = self.freeze.tick(dt);
        let _ = self.flash.tick(dt);
        let frozen = self.freeze.is_armed();

        self.spawn
            .update(dt, &mut self.store, self.stats.level, bank, cfg);

        let typed = self
            .typing
            .update(keys, &mut self.store, &mut self.stats, frontend, cfg);
        if typed.freeze_activated {
            self.freeze.reset(cfg.freeze_duration);
        }

        let crossed = systems::motion::advance(&mut self.store, dt, frozen, cfg);
        let mut outcome = TickOutcome {
            lives_lost: crossed.len() as u32,
            ..TickOutcome::default()
        };
        for _ in &crossed {
            if self.damage_sequence(cfg, frontend) {
                outcome.game_over = true;
            }
        }

        systems::render_sync::sync(&mut self.store, frontend.render.as_mut());
        systems::hud::sync(&self.stats, best, frontend.ui.as_mut());

        outcome
    }

    /// A word reached the kill-zone: lose a life, clear the field, reset the
    /// buffer, raise the failure cues.
    ///
    /// Returns `true` exactly when this decrement exhausted the last life;
    /// further calls in the same tick keep lives clamped at zero and return
    /// `false`, so game-over triggers once.
    pub fn damage_sequence(&mut self, cfg: &GameConfig, frontend: &mut Frontend) -> bool {
        let before = self.stats.lives;
        if !self.stats.god_mode {
            self.stats.lives = self.stats.lives.saturating_sub(1);
        }
        self.stats.streak = 0;

        // Clear every falling word for a fresh start.
        let words: Vec<EntityId> = self
            .store
            .query(&[ComponentKind::Word])
            .filter(|&e| self.store.is_active(e))
            .collect();
        for e in words {
            self.store.remove(e);
        }

        self.typing.reset(&self.store, frontend);
        frontend.audio.play(SoundCue::Damage);
        frontend.ui.flash_damage();
        self.flash.reset(cfg.damage_flash);

        before > 0 && self.stats.lives == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
