//! Typing resolution: matches buffered keystrokes against falling words.
//!
//! The system owns the committed correct prefix. A keystroke only commits if
//! the extended buffer is still a prefix of some active word; otherwise it is
//! rejected outright so a stray key never corrupts progress. When several
//! words share the typed prefix the first entity in query iteration order
//! wins -- deliberately simple, and pinned down by test rather than "smart"
//! disambiguation.

use wordfall_ecs::prelude::*;

use crate::config::GameConfig;
use crate::frontend::{Frontend, SoundCue};
use crate::input::Key;
use crate::session::SessionStats;

/// What a tick of typing produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypingOutcome {
    /// A power-up word was completed; the caller starts the freeze.
    pub freeze_activated: bool,
    /// Words completed this tick.
    pub completed: u32,
}

/// Owns the input buffer for one play session.
#[derive(Debug, Default)]
pub struct TypingSystem {
    buffer: String,
}

impl TypingSystem {
    /// Fresh system with an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The committed prefix typed so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Clear the buffer and reset every word's highlight.
    pub fn reset(&mut self, store: &EntityStore, frontend: &mut Frontend) {
        self.buffer.clear();
        self.refresh_highlights(store, frontend);
    }

    /// Consume this tick's buffered keys.
    pub fn update(
        &mut self,
        keys: &[Key],
        store: &mut EntityStore,
        stats: &mut SessionStats,
        frontend: &mut Frontend,
        cfg: &GameConfig,
    ) -> TypingOutcome {
        let mut outcome = TypingOutcome::default();

        for key in keys {
            match key {
                Key::Enter => {}
                Key::Backspace => {
                    if self.buffer.pop().is_some() {
                        self.refresh_highlights(store, frontend);
                    }
                }
                Key::Char(c) => {
                    let mut candidate = self.buffer.clone();
                    candidate.extend(c.to_uppercase());
                    match self.find_match(store, &candidate) {
                        Some(entity) => {
                            self.buffer = candidate;
                            frontend.audio.play(SoundCue::Type);

                            let full_len = store
                                .get::<Word>(entity)
                                .map(|w| w.text.chars().count())
                                .unwrap_or(0);
                            if self.buffer.chars().count() == full_len {
                                self.complete(entity, store, stats, frontend, cfg, &mut outcome);
                                self.buffer.clear();
                            }
                            self.refresh_highlights(store, frontend);
                        }
                        None => {
                            // Reject the keystroke; the buffer keeps its
                            // committed prefix.
                            stats.misses += 1;
                            frontend.audio.play(SoundCue::Error);
                            frontend.ui.shake_input();
                        }
                    }
                }
            }
        }

        outcome
    }

    /// First active word entity, in query iteration order, whose text starts
    /// with `candidate`.
    fn find_match(&self, store: &EntityStore, candidate: &str) -> Option<EntityId> {
        store
            .query(&[ComponentKind::Word])
            .filter(|&e| store.is_active(e))
            .find(|&e| {
                store
                    .get::<Word>(e)
                    .map(|w| w.text.to_uppercase().starts_with(candidate))
                    .unwrap_or(false)
            })
    }

    /// Resolve a full match: destroy the entity, award score, advance the
    /// level when the threshold is crossed.
    fn complete(
        &mut self,
        entity: EntityId,
        store: &mut EntityStore,
        stats: &mut SessionStats,
        frontend: &mut Frontend,
        cfg: &GameConfig,
        outcome: &mut TypingOutcome,
    ) {
        let word_len = store
            .get::<Word>(entity)
            .map(|w| w.text.chars().count() as u64)
            .unwrap_or(0);
        let is_powerup = store
            .get::<RenderDescriptor>(entity)
            .map(|r| r.kind == RenderKind::Powerup)
            .unwrap_or(false);

        let mut points = word_len * cfg.per_char_points + stats.streak as u64 * cfg.streak_bonus;
        if is_powerup {
            points += cfg.powerup_bonus;
            outcome.freeze_activated = true;
            frontend.audio.play(SoundCue::Powerup);
        } else {
            frontend.audio.play(SoundCue::Success);
        }

        stats.score += points;
        stats.streak += 1;
        outcome.completed += 1;
        store.remove(entity);

        if stats.score >= stats.level as u64 * cfg.level_up_threshold {
            stats.level += 1;
            frontend.audio.play(SoundCue::LevelUp);
            tracing::debug!(level = stats.level, score = stats.score, "level up");
        }
    }

    /// Recompute how much of each word reads as matched.
    fn refresh_highlights(&self, store: &EntityStore, frontend: &mut Frontend) {
        let matched_len = self.buffer.chars().count();
        let updates: Vec<(VisualId, usize)> = store
            .query(&[ComponentKind::Word, ComponentKind::Render])
            .filter(|&e| store.is_active(e))
            .filter_map(|e| {
                let visual = store.get::<RenderDescriptor>(e)?.visual?;
                let word = store.get::<Word>(e)?;
                let matched = if !self.buffer.is_empty()
                    && word.text.to_uppercase().starts_with(&self.buffer)
                {
                    matched_len
                } else {
                    0
                };
                Some((visual, matched))
            })
            .collect();
        for (visual, matched) in updates {
            frontend.render.highlight(visual, matched);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{FrontendEvent, RecordingFrontend};

    fn word_entity(store: &mut EntityStore, text: &str) -> EntityId {
        store.spawn(
            ComponentSet::new()
                .with(Position { x: 0.0, y: 0.0 })
                .with(Word::new(text))
                .with(RenderDescriptor::new(RenderKind::Normal, "ghost")),
        )
    }

    fn chars(s: &str) -> Vec<Key> {
        s.chars().map(Key::Char).collect()
    }

    fn setup(texts: &[&str]) -> (TypingSystem, EntityStore, SessionStats, GameConfig) {
        let mut store = EntityStore::new();
        for t in texts {
            word_entity(&mut store, t);
        }
        store.commit();
        (
            TypingSystem::new(),
            store,
            SessionStats::new(3),
            GameConfig::default(),
        )
    }

    #[test]
    fn full_match_scores_by_length_and_removes_entity() {
        let (mut typing, mut store, mut stats, cfg) = setup(&["TEST"]);
        let mut frontend = Frontend::null();

        let outcome = typing.update(&chars("TEST"), &mut store, &mut stats, &mut frontend, &cfg);
        assert_eq!(outcome.completed, 1);
        assert_eq!(stats.score, 4 * cfg.per_char_points);
        assert_eq!(stats.streak, 1);
        assert_eq!(typing.buffer(), "");

        store.commit();
        assert!(store.is_empty());
    }

    #[test]
    fn miss_increments_counter_only() {
        let (mut typing, mut store, mut stats, cfg) = setup(&["TEST"]);
        let mut frontend = Frontend::null();

        typing.update(&chars("TX"), &mut store, &mut stats, &mut frontend, &cfg);
        assert_eq!(typing.buffer(), "T", "miss must not extend the buffer");
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.score, 0);
        store.commit();
        assert_eq!(store.len(), 1, "entities untouched on a miss");
    }

    #[test]
    fn miss_plays_error_cue_and_shakes_input() {
        let (mut typing, mut store, mut stats, cfg) = setup(&["TEST"]);
        let (mut frontend, log) = RecordingFrontend::frontend();

        typing.update(&chars("Q"), &mut store, &mut stats, &mut frontend, &cfg);
        let events = log.borrow();
        assert!(events.contains(&FrontendEvent::Sound(SoundCue::Error)));
        assert!(events.contains(&FrontendEvent::InputShake));
    }

    #[test]
    fn prefix_tie_break_is_first_in_query_order() {
        // "CAT" was created before "CATALOG": typing C-A-T resolves the
        // shorter word because it comes first in iteration order.
        let (mut typing, mut store, mut stats, cfg) = setup(&["CAT", "CATALOG"]);
        let mut frontend = Frontend::null();

        let outcome = typing.update(&chars("CAT"), &mut store, &mut stats, &mut frontend, &cfg);
        assert_eq!(outcome.completed, 1);
        store.commit();

        let remaining: Vec<String> = store
            .query(&[ComponentKind::Word])
            .filter_map(|e| store.get::<Word>(e).map(|w| w.text.clone()))
            .collect();
        assert_eq!(remaining, vec!["CATALOG"]);
    }

    #[test]
    fn lowercase_input_is_normalized() {
        let (mut typing, mut store, mut stats, cfg) = setup(&["TEST"]);
        let mut frontend = Frontend::null();
        let outcome = typing.update(&chars("test"), &mut store, &mut stats, &mut frontend, &cfg);
        assert_eq!(outcome.completed, 1);
        assert_eq!(stats.score, 4 * cfg.per_char_points);
    }

    #[test]
    fn backspace_shrinks_buffer_without_scoring() {
        let (mut typing, mut store, mut stats, cfg) = setup(&["TEST"]);
        let mut frontend = Frontend::null();

        typing.update(&chars("TE"), &mut store, &mut stats, &mut frontend, &cfg);
        assert_eq!(typing.buffer(), "TE");
        typing.update(&[Key::Backspace], &mut store, &mut stats, &mut frontend, &cfg);
        assert_eq!(typing.buffer(), "T");
        assert_eq!(stats.score, 0);
        // Backspace on an empty buffer is harmless.
        typing.update(
            &[Key::Backspace, Key::Backspace],
            &mut store,
            &mut stats,
            &mut frontend,
            &cfg,
        );
        assert_eq!(typing.buffer(), "");
    }

    #[test]
    fn streak_bonus_applies_to_later_words() {
        let (mut typing, mut store, mut stats, cfg) = setup(&["ZAP", "POW"]);
        let mut frontend = Frontend::null();

        typing.update(&chars("ZAP"), &mut store, &mut stats, &mut frontend, &cfg);
        let first = stats.score;
        assert_eq!(first, 3 * cfg.per_char_points);

        typing.update(&chars("POW"), &mut store, &mut stats, &mut frontend, &cfg);
        assert_eq!(
            stats.score - first,
            3 * cfg.per_char_points + cfg.streak_bonus,
            "second word carries one streak step of bonus"
        );
    }

    #[test]
    fn powerup_completion_reports_freeze() {
        let mut store = EntityStore::new();
        let e = store.spawn(
            ComponentSet::new()
                .with(Word::new("FOX"))
                .with(RenderDescriptor::new(RenderKind::Powerup, "rocket")),
        );
        store.commit();
        let mut typing = TypingSystem::new();
        let mut stats = SessionStats::new(3);
        let cfg = GameConfig::default();
        let mut frontend = Frontend::null();

        let outcome = typing.update(&chars("FOX"), &mut store, &mut stats, &mut frontend, &cfg);
        assert!(outcome.freeze_activated);
        assert_eq!(stats.score, 3 * cfg.per_char_points + cfg.powerup_bonus);
        assert!(!store.is_active(e));
    }

    #[test]
    fn level_up_on_threshold_crossing() {
        let (mut typing, mut store, mut stats, mut cfg) = setup(&["GRID"]);
        cfg.level_up_threshold = 40;
        let mut frontend = Frontend::null();

        typing.update(&chars("GRID"), &mut store, &mut stats, &mut frontend, &cfg);
        assert_eq!(stats.level, 2);
    }

    #[test]
    fn highlights_follow_the_buffer() {
        let mut store = EntityStore::new();
        let e = word_entity(&mut store, "GRID");
        store.commit();
        // Give the word a visual so highlight events carry its handle.
        store.get_mut::<RenderDescriptor>(e).unwrap().visual = Some(VisualId(9));

        let mut typing = TypingSystem::new();
        let mut stats = SessionStats::new(3);
        let cfg = GameConfig::default();
        let (mut frontend, log) = RecordingFrontend::frontend();

        typing.update(&chars("GR"), &mut store, &mut stats, &mut frontend, &cfg);
        assert!(log
            .borrow()
            .contains(&FrontendEvent::Highlight(VisualId(9), 2)));

        typing.update(&[Key::Backspace], &mut store, &mut stats, &mut frontend, &cfg);
        assert!(log
            .borrow()
            .contains(&FrontendEvent::Highlight(VisualId(9), 1)));
    }

    #[test]
    fn inactive_words_are_not_match_targets() {
        let (mut typing, mut store, mut stats, cfg) = setup(&["TEST"]);
        let e = store.entities().next().unwrap();
        store.remove(e); // inactive but not yet purged
        let mut frontend = Frontend::null();

        typing.update(&chars("T"), &mut store, &mut stats, &mut frontend, &cfg);
        assert_eq!(typing.buffer(), "", "inactive word must not accept input");
        assert_eq!(stats.misses, 1);
    }
}
