//! Boss encounter: the spawner feeds a fixed word queue on a slow cadence;
//! clearing the whole sequence wins the encounter.

use wordfall_ecs::prelude::*;

use crate::context::GameContext;
use crate::frontend::SoundCue;
use crate::machine::{Phase, PhaseParams};
use crate::ops::EntityInfo;
use crate::persist::ScoreStore;
use crate::session::GameSession;
use crate::states::names;

/// The boss phase.
#[derive(Debug)]
pub struct BossPhase {
    session: GameSession,
    best: u64,
    level: u32,
    transitioning: bool,
}

impl BossPhase {
    /// Build the phase; the session is reset on every `enter`.
    pub fn new(cfg: &crate::config::GameConfig, seed: u64) -> Self {
        Self {
            session: GameSession::new(cfg, seed),
            best: 0,
            level: 1,
            transitioning: false,
        }
    }

    /// Read-only session access (tests, debug ops).
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    fn field_cleared(&self) -> bool {
        !self
            .session
            .store
            .query(&[ComponentKind::Word])
            .any(|e| self.session.store.is_active(e))
    }
}

impl Phase for BossPhase {
    fn enter(&mut self, ctx: &mut GameContext, params: &PhaseParams) {
        self.level = params.level.unwrap_or(1);
        let score = params.score.unwrap_or(0);
        self.session
            .reset(&ctx.config, self.level, score, &mut ctx.frontend);
        self.best = ctx.scores.best_score();
        self.transitioning = false;
        ctx.input.clear();

        let sequence = ctx.bank.boss_sequence(self.level).unwrap_or_else(|| {
            tracing::warn!(level = self.level, "no boss sequence for level");
            &[]
        });
        let sequence = sequence.to_vec();
        self.session.spawn.enter_boss(&sequence, &ctx.config);
        tracing::info!(level = self.level, words = sequence.len(), "boss encounter start");
    }

    fn exit(&mut self, ctx: &mut GameContext) {
        self.session.teardown(&mut ctx.frontend);
    }

    fn update(&mut self, ctx: &mut GameContext, dt: f64) {
        if self.transitioning {
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

        if outcome.game_over {
            self.transitioning = true;
            ctx.request_phase(
                names::GAMEOVER,
                PhaseParams {
                    score: Some(self.session.stats.score),
                    ..PhaseParams::default()
                },
            );
            return;
        }

        // Victory: queue dispatched and every boss word resolved.
        if self.session.spawn.boss_exhausted() && self.field_cleared() {
            self.transitioning = true;
            self.session.stats.score += ctx.config.boss_bounty;
            ctx.frontend.audio.play(SoundCue::Victory);
            tracing::info!(level = self.level, "boss encounter cleared");
            ctx.request_phase(
                names::LORE,
                PhaseParams::for_run(self.level + 1, self.session.stats.score),
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
    use crate::persist::MemoryScoreStore;

    fn ctx() -> GameContext {
        GameContext::new(
            GameConfig::default(),
            Frontend::null(),
            Box::new(MemoryScoreStore::new()),
            WordBank::default(),
            11,
        )
    }

    fn run_secs(phase: &mut BossPhase, ctx: &mut GameContext, secs: f64) {
        let dt = ctx.config.fixed_step;
        let steps = (secs / dt).ceil() as u32;
        for _ in 0..steps {
            phase.update(ctx, dt);
        }
    }

    fn type_word(ctx: &mut GameContext, word: &str) {
        for c in word.chars() {
            ctx.input.push(Key::Char(c));
        }
    }

    #[test]
    fn clearing_the_sequence_wins_and_requests_lore() {
        let mut ctx = ctx();
        let mut phase = BossPhase::new(&ctx.config, 11);
        phase.enter(&mut ctx, &PhaseParams::for_run(3, 1000));

        // Default sequence for level 3: DECRYPT FIREWALL QUANTUM BREACH.
        let dt = ctx.config.fixed_step;
        let cadence = ctx.config.boss_cadence;
        let words: Vec<String> = ctx.bank.boss_sequence(3).unwrap().to_vec();
        for word in &words {
            // Wait out the cadence so the word is on the field, then type it.
            run_secs(&mut phase, &mut ctx, cadence + 0.1);
            type_word(&mut ctx, word);
            phase.update(&mut ctx, dt);
        }
        // One more tick to observe the cleared field.
        phase.update(&mut ctx, dt);

        let (name, params) = ctx.take_request().expect("victory should request lore");
        assert_eq!(name, names::LORE);
        assert_eq!(params.level, Some(4));
        let expected_typing: u64 = words
            .iter()
            .map(|w| w.chars().count() as u64 * ctx.config.per_char_points)
            .sum();
        // Bounty plus per-word scoring (with streak bonus on later words).
        assert!(params.score.unwrap() >= 1000 + ctx.config.boss_bounty + expected_typing);
    }

    #[test]
    fn boss_words_reaching_the_floor_still_damage() {
        let mut ctx = ctx();
        let mut phase = BossPhase::new(&ctx.config, 11);
        phase.enter(&mut ctx, &PhaseParams::for_run(3, 0));

        // Let every word spawn and fall; never type anything. Boss fall speed
        // covers the screen in height/speed seconds.
        let fall_time = ctx.config.screen_height / ctx.config.boss_fall_speed;
        let total = 4.0 * ctx.config.boss_cadence + fall_time + 2.0;
        run_secs(&mut phase, &mut ctx, total);
        assert!(
            phase.session.stats.lives < ctx.config.starting_lives,
            "unanswered boss words must cost lives"
        );
    }

    #[test]
    fn missing_sequence_still_playable_via_fallback() {
        let mut ctx = ctx();
        let mut phase = BossPhase::new(&ctx.config, 11);
        // Level 4 has no sequence; the spawner substitutes the fallback word.
        phase.enter(&mut ctx, &PhaseParams::for_run(4, 0));
        let wait = ctx.config.boss_cadence + 0.1;
        run_secs(&mut phase, &mut ctx, wait);
        assert_eq!(phase.session.store.len(), 1);
    }
}
