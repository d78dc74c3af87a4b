//! The main run: owns the session and drives the per-tick system order.

use wordfall_ecs::prelude::*;

use crate::context::GameContext;
use crate::machine::{Phase, PhaseParams};
use crate::ops::EntityInfo;
use crate::persist::ScoreStore;
use crate::session::GameSession;
use crate::states::names;

/// The playing phase.
#[derive(Debug)]
pub struct PlayingPhase {
    session: GameSession,
    best: u64,
    /// A transition has been requested; stop driving the session.
    transitioning: bool,
}

impl PlayingPhase {
    /// Build the phase up front; the session is reset on every `enter`.
    pub fn new(ctx_config: &crate::config::GameConfig, seed: u64) -> Self {
        Self {
            session: GameSession::new(ctx_config, seed),
            best: 0,
            transitioning: false,
        }
    }

    /// Read-only session access (tests, debug ops).
    pub fn session(&self) -> &GameSession {
        &self.session
    }
}

impl Phase for PlayingPhase {
    fn enter(&mut self, ctx: &mut GameContext, params: &PhaseParams) {
        let level = params.level.unwrap_or(1);
        let score = params.score.unwrap_or(0);
        self.session
            .reset(&ctx.config, level, score, &mut ctx.frontend);
        self.best = ctx.scores.best_score();
        self.transitioning = false;
        ctx.input.clear();
        tracing::info!(level, score, best = self.best, "session start");
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        let score = self.session.stats.score;
        if score > ctx.scores.best_score() {
            if let Err(err) = ctx.scores.save_best(score) {
                tracing::warn!(error = %err, "failed to persist best score");
            }
        }
        self.session.teardown(&mut ctx.frontend);
        tracing::info!(score, "session end");
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f64) {
        if self.transitioning {
            return;
        }

        // A boss level pauses the run; the encounter returns through
        // lore/briefing with the run's score.
        let stats = self.session.stats;
        if ctx.config.boss_levels.contains(&stats.level) {
            self.transitioning = true;
            let mut params = PhaseParams::for_run(stats.level, stats.score);
            params.next = Some(names::PLAYING.to_owned());
            ctx.request_phase(names::BOSS, params);
            return;
        }

        let keys = ctx.input.drain();
        let outcome = self.session.tick(
            dt,
            &keys,
            &ctx.bank,
            &ctx.config,
            &mut ctx.frontend,
            self.best,
        );
        self.best = self.best.max(self.session.stats.score);

        if outcome.game_over {
            self.transitioning = true;
            ctx.request_phase(
                names::GAMEOVER,
                PhaseParams {
                    score: Some(self.session.stats.score),
                    ..PhaseParams::default()
                },
            );
        }
    }

    fn toggle_god_mode(&mut self) -> Option<bool> {
        self.session.stats.god_mode = !self.session.stats.god_mode;
        Some(self.session.stats.god_mode)
    }

    fn debug_entities(&self) -> Vec<EntityInfo> {
        let store = &self.session.store;
        store
            .entities()
            .map(|id| EntityInfo {
                id,
                word: store.get::<Word>(id).map(|w| w.text.clone()),
                kind: store.get::<RenderDescriptor>(id).map(|r| r.kind),
                y: store.get::<Position>(id).map(|p| p.y),
                active: store.is_active(id),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::content::WordBank;
    use crate::frontend::Frontend;
    use crate::input::Key;
    use crate::persist::{MemoryScoreStore, ScoreStore};

    fn ctx() -> GameContext {
        GameContext::new(
            GameConfig::default(),
            Frontend::null(),
            Box::new(MemoryScoreStore::new()),
            WordBank::default(),
            5,
        )
    }

    fn step(phase: &mut PlayingPhase, ctx: &mut GameContext) {
        let dt = ctx.config.fixed_step;
        phase.update(ctx, dt);
    }

    #[test]
    fn enter_starts_clean_at_requested_level() {
        let mut ctx = ctx();
        let mut phase = PlayingPhase::new(&ctx.config, 5);
        phase.enter(&mut ctx, &PhaseParams::for_run(4, 3200));
        assert_eq!(phase.session.stats.level, 4);
        assert_eq!(phase.session.stats.score, 3200);
        assert_eq!(phase.session.stats.lives, ctx.config.starting_lives);
        assert!(phase.session.store.is_empty());
    }

    #[test]
    fn boss_level_requests_the_encounter() {
        let mut ctx = ctx();
        let mut phase = PlayingPhase::new(&ctx.config, 5);
        phase.enter(&mut ctx, &PhaseParams::for_run(3, 2000));

        step(&mut phase, &mut ctx);
        let (name, params) = ctx.take_request().unwrap();
        assert_eq!(name, names::BOSS);
        assert_eq!(params.level, Some(3));
        assert_eq!(params.score, Some(2000));
        assert_eq!(params.next.as_deref(), Some(names::PLAYING));

        // Transitioning: the session stops advancing.
        step(&mut phase, &mut ctx);
        assert!(!ctx.has_pending_request());
    }

    #[test]
    fn words_spawn_and_fall_over_time() {
        let mut ctx = ctx();
        let mut phase = PlayingPhase::new(&ctx.config, 5);
        phase.enter(&mut ctx, &PhaseParams::at_level(1));

        // Two simulated seconds: the 1 s initial countdown has fired.
        for _ in 0..120 {
            step(&mut phase, &mut ctx);
        }
        assert!(phase.session.store.len() >= 1);
    }

    #[test]
    fn exit_persists_a_new_best_score() {
        let mut ctx = ctx();
        let mut phase = PlayingPhase::new(&ctx.config, 5);
        phase.enter(&mut ctx, &PhaseParams::at_level(1));
        phase.session.stats.score = 777;
        phase.exit(&mut ctx);
        assert_eq!(ctx.scores.best_score(), 777);
    }

    #[test]
    fn typed_keys_flow_into_the_session() {
        let mut ctx = ctx();
        let mut phase = PlayingPhase::new(&ctx.config, 5);
        phase.enter(&mut ctx, &PhaseParams::at_level(1));

        // Plant a word directly and type it through the input queue.
        let _ = phase.session.store.spawn(
            ComponentSet::new()
                .with(Position { x: 0.0, y: 10.0 })
                .with(Velocity { dx: 0.0, dy: 10.0 })
                .with(Word::new("ZAP")),
        );
        for c in "ZAP".chars() {
            ctx.input.push(Key::Char(c));
        }
        // The tick commits the spawn before typing runs, so the word is
        // already a valid target for the buffered keys.
        step(&mut phase, &mut ctx);
        assert_eq!(phase.session.stats.score, 3 * ctx.config.per_char_points);
    }
}
