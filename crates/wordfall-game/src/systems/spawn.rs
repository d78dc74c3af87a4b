//! Spawning: decides when and what enters the playfield.
//!
//! Normal mode runs a countdown off the level curve; each firing draws a word
//! from the bank (retrying a bounded number of times if the text is already
//! falling), picks a lane from a shuffle bag, and occasionally substitutes a
//! transient power-up. Boss mode ignores the curve entirely and feeds a fixed
//! ordered word queue on a slow constant cadence.

use std::collections::{HashSet, VecDeque};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use wordfall_ecs::prelude::*;

use crate::clock::Countdown;
use crate::config::GameConfig;
use crate::content::{word_complexity, WordBank, FALLBACK_WORD};

/// Tag carried by boss-encounter words; motion gives these an intrinsic fall
/// speed so the text stays readable.
pub const BOSS_TAG: &str = "boss";

/// Tag carried by power-up entities.
pub const POWERUP_TAG: &str = "powerup";

// ---------------------------------------------------------------------------
// LaneBag
// ---------------------------------------------------------------------------

/// Shuffle-bag lane selection: every lane is used once before any repeats,
/// so spawns spread evenly instead of clustering.
#[derive(Debug)]
struct LaneBag {
    order: Vec<u8>,
    next: usize,
}

impl LaneBag {
    fn new(lane_count: u8) -> Self {
        let order: Vec<u8> = (0..lane_count).collect();
        Self {
            next: order.len(), // force a shuffle on the first draw
            order,
        }
    }

    fn draw(&mut self, rng: &mut impl Rng) -> u8 {
        if self.order.is_empty() {
            return 0;
        }
        if self.next >= self.order.len() {
            self.order.shuffle(rng);
            self.next = 0;
        }
        let lane = self.order[self.next];
        self.next += 1;
        lane
    }
}

// ---------------------------------------------------------------------------
// SpawnSystem
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Mode {
    Normal,
    Boss { queue: VecDeque<String> },
}

/// Owns spawn timing, lane distribution, and the boss-encounter queue.
#[derive(Debug)]
pub struct SpawnSystem {
    rng: Pcg64Mcg,
    lanes: LaneBag,
    countdown: Countdown,
    mode: Mode,
}

impl SpawnSystem {
    /// Seeded spawner in normal mode; the first spawn lands after one second.
    pub fn new(seed: u64, cfg: &GameConfig) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
            lanes: LaneBag::new(cfg.lane_count),
            countdown: Countdown::armed(1.0),
            mode: Mode::Normal,
        }
    }

    /// Back to normal mode with a fresh countdown.
    pub fn reset(&mut self, cfg: &GameConfig) {
        self.lanes = LaneBag::new(cfg.lane_count);
        self.countdown = Countdown::armed(1.0);
        self.mode = Mode::Normal;
    }

    /// Switch to boss mode with the encounter's fixed word queue.
    pub fn enter_boss(&mut self, sequence: &[String], cfg: &GameConfig) {
        let queue: VecDeque<String> = if sequence.is_empty() {
            tracing::warn!("boss sequence empty, substituting fallback word");
            VecDeque::from([FALLBACK_WORD.to_owned()])
        } else {
            sequence.iter().cloned().collect()
        };
        self.mode = Mode::Boss { queue };
        self.countdown = Countdown::armed(cfg.boss_cadence);
    }

    /// Whether the boss queue has been fully dispatched. Always `false` in
    /// normal mode.
    pub fn boss_exhausted(&self) -> bool {
        matches!(&self.mode, Mode::Boss { queue } if queue.is_empty())
    }

    /// Advance spawn timing by one tick.
    pub fn update(
        &mut self,
        dt: f64,
        store: &mut EntityStore,
        level: u32,
        bank: &WordBank,
        cfg: &GameConfig,
    ) {
        if !self.countdown.tick(dt) {
            return;
        }

        // Pull the next boss word out first so the mode borrow is released
        // before the spawn helpers run.
        let boss_step = match &mut self.mode {
            Mode::Boss { queue } => Some((queue.pop_front(), !queue.is_empty())),
            Mode::Normal => None,
        };

        if let Some((word, more_queued)) = boss_step {
            if let Some(word) = word {
                self.spawn_boss_word(store, word, cfg);
                if more_queued {
                    self.countdown.reset(cfg.boss_cadence);
                }
            }
            return;
        }

        if self.rng.gen_bool(cfg.powerup_chance.clamp(0.0, 1.0)) {
            self.spawn_powerup(store, level, cfg);
            self.countdown.reset(cfg.level_params(level).spawn_delay);
        } else {
            let word = self.spawn_word(store, level, bank, cfg);
            // Longer or rarer words buy the player time before the next
            // spawn.
            let (extra_chars, rare) = word_complexity(&word);
            let delay = cfg.level_params(level).spawn_delay
                + extra_chars as f64 * cfg.spawn_credit_per_char
                + rare as f64 * cfg.spawn_credit_per_rare;
            self.countdown.reset(delay);
        }
    }

    /// Spawn one word of the boss sequence.
    fn spawn_boss_word(&mut self, store: &mut EntityStore, word: String, cfg: &GameConfig) {
        let lane = self.lanes.draw(&mut self.rng);
        let avatar = WordBank::avatar(&mut self.rng);
        let id = store.spawn(
            ComponentSet::new()
                .with(Position {
                    x: cfg.lane_center_x(lane),
                    y: cfg.spawn_y,
                })
                .with(Velocity {
                    dx: 0.0,
                    dy: cfg.boss_fall_speed,
                })
                .with(Word::new(word))
                .with(Lane { index: lane })
                .with(RenderDescriptor::new(RenderKind::Boss, avatar)),
        );
        store.tag(id, BOSS_TAG);
    }

    /// Spawn one normal word. Returns the chosen text.
    fn spawn_word(
        &mut self,
        store: &mut EntityStore,
        level: u32,
        bank: &WordBank,
        cfg: &GameConfig,
    ) -> String {
        // Keep the typing challenge unambiguous: avoid duplicating a word
        // already falling, within a bounded number of redraws.
        let active: HashSet<String> = store
            .query(&[ComponentKind::Word, ComponentKind::Render])
            .filter(|&e| store.is_active(e))
            .filter(|&e| {
                store
                    .get::<RenderDescriptor>(e)
                    .map(|r| r.kind == RenderKind::Normal)
                    .unwrap_or(false)
            })
            .filter_map(|e| store.get::<Word>(e).map(|w| w.text.clone()))
            .collect();

        let mut word = bank.draw(level, &mut self.rng);
        let mut retries = cfg.duplicate_retries;
        while active.contains(&word) && retries > 0 {
            word = bank.draw(level, &mut self.rng);
            retries -= 1;
        }
        if active.contains(&word) {
            tracing::debug!(%word, "accepting duplicate word after retries");
        }

        let lane = self.lanes.draw(&mut self.rng);
        let params = cfg.level_params(level);
        let avatar = WordBank::avatar(&mut self.rng);
        let _ = store.spawn(
            ComponentSet::new()
                .with(Position {
                    x: cfg.lane_center_x(lane),
                    y: cfg.spawn_y,
                })
                .with(Velocity {
                    dx: 0.0,
                    dy: params.drop_speed,
                })
                .with(Word::new(word.clone()))
                .with(Lane { index: lane })
                .with(RenderDescriptor::new(RenderKind::Normal, avatar)),
        );
        word
    }

    /// Spawn a transient power-up: faster fall, distinct render kind.
    fn spawn_powerup(&mut self, store: &mut EntityStore, level: u32, cfg: &GameConfig) {
        let lane = self.lanes.draw(&mut self.rng);
        let params = cfg.level_params(level);
        let word = WordBank::powerup_word(&mut self.rng);
        let id = store.spawn(
            ComponentSet::new()
                .with(Position {
                    x: cfg.lane_center_x(lane),
                    y: cfg.spawn_y,
                })
                .with(Velocity {
                    dx: 0.0,
                    dy: params.drop_speed * cfg.powerup_fall_factor,
                })
                .with(Word::new(word))
                .with(Lane { index: lane })
                .with(RenderDescriptor::new(RenderKind::Powerup, "rocket")),
        );
        store.tag(id, POWERUP_TAG);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
