//! Tuning constants for the session: screen geometry, the difficulty curve,
//! scoring, and phase timings.
//!
//! Everything is serde-derived so a tuned config can be loaded from JSON, but
//! the defaults are complete and are what the tests run against.

use serde::{Deserialize, Serialize};

/// All tunables in one place, passed by reference into systems.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playfield width in pixels.
    pub screen_width: f64,
    /// Playfield height in pixels.
    pub screen_height: f64,
    /// Number of spawn lanes across the playfield.
    pub lane_count: u8,
    /// Words start this far above the top edge.
    pub spawn_y: f64,
    /// Kill-zone threshold is `screen_height - kill_margin`.
    pub kill_margin: f64,

    /// Simulation step in seconds.
    pub fixed_step: f64,
    /// Accumulator cap in seconds (stall recovery bound).
    pub max_accumulator: f64,

    /// Lives at session start.
    pub starting_lives: u32,
    /// Points per character of a completed word.
    pub per_char_points: u64,
    /// Extra points per streak step held when a word completes.
    pub streak_bonus: u64,
    /// Level advances when score reaches `level * level_up_threshold`.
    pub level_up_threshold: u64,
    /// Levels that trigger a boss encounter.
    pub boss_levels: Vec<u32>,

    /// Fall speed at level 1, pixels per second.
    pub base_drop_speed: f64,
    /// Fall speed gained per level, pixels per second.
    pub drop_speed_per_level: f64,
    /// Spawn delay at level 1, seconds.
    pub base_spawn_delay: f64,
    /// Spawn delay shaved off per level, seconds.
    pub spawn_delay_per_level: f64,
    /// Spawn delay never drops below this, seconds.
    pub min_spawn_delay: f64,
    /// Length of the sawtooth difficulty cycle in levels; the last level of
    /// each cycle is a relief wave (slower, sparser).
    pub wave_cycle_length: u32,
    /// Extra spawn delay granted per character beyond four in the word just
    /// spawned, seconds.
    pub spawn_credit_per_char: f64,
    /// Extra spawn delay granted per rare letter in the word just spawned,
    /// seconds.
    pub spawn_credit_per_rare: f64,

    /// Chance that an eligible spawn produces a power-up instead of a word.
    pub powerup_chance: f64,
    /// Power-ups fall this much faster than the level speed.
    pub powerup_fall_factor: f64,
    /// Flat score bonus for catching a power-up word.
    pub powerup_bonus: u64,
    /// Seconds of movement freeze granted by a power-up.
    pub freeze_duration: f64,

    /// Seconds between boss-encounter words (not level-scaled).
    pub boss_cadence: f64,
    /// Intrinsic fall speed of boss-tagged words, pixels per second.
    pub boss_fall_speed: f64,
    /// Score bounty for clearing a boss encounter.
    pub boss_bounty: u64,

    /// Duration of the damage flash, seconds.
    pub damage_flash: f64,
    /// Bounded retries when drawing a word that is already on screen.
    pub duplicate_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            lane_count: 6,
            spawn_y: -100.0,
            kill_margin: 60.0,

            fixed_step: 1.0 / 60.0,
            max_accumulator: 0.25,

            starting_lives: 3,
            per_char_points: 10,
            streak_bonus: 5,
            level_up_threshold: 1000,
            boss_levels: vec![3, 10, 20, 30, 40, 50],

            base_drop_speed: 100.0,
            drop_speed_per_level: 6.0,
            base_spawn_delay: 2.5,
            spawn_delay_per_level: 0.035,
            min_spawn_delay: 0.6,
            wave_cycle_length: 10,
            spawn_credit_per_char: 0.08,
            spawn_credit_per_rare: 0.15,

            powerup_chance: 0.05,
            powerup_fall_factor: 1.5,
            powerup_bonus: 200,
            freeze_duration: 4.0,

            boss_cadence: 2.0,
            boss_fall_speed: 40.0,
            boss_bounty: 50_000,

            damage_flash: 0.3,
            duplicate_retries: 5,
        }
    }
}

/// Per-level spawn parameters derived from the sawtooth curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelParams {
    /// Fall speed in pixels per second.
    pub drop_speed: f64,
    /// Base delay before the next spawn, seconds.
    pub spawn_delay: f64,
    /// Whether this is the relief wave of the cycle.
    pub is_relief: bool,
}

impl GameConfig {
    /// The kill-zone y threshold.
    pub fn kill_y(&self) -> f64 {
        self.screen_height - self.kill_margin
    }

    /// Horizontal center of a lane.
    pub fn lane_center_x(&self, lane: u8) -> f64 {
        let lane_width = self.screen_width / self.lane_count as f64;
        lane as f64 * lane_width + lane_width / 2.0
    }

    /// Spawn parameters for a level: linear speed/delay ramps with a relief
    /// wave at the end of each cycle (slower drop, longer delay).
    pub fn level_params(&self, level: u32) -> LevelParams {
        let steps = level.saturating_sub(1) as f64;
        let wave_index = level.saturating_sub(1) % self.wave_cycle_length.max(1);
        let is_relief = wave_index == self.wave_cycle_length.max(1) - 1;

        let mut drop_speed = self.base_drop_speed + steps * self.drop_speed_per_level;
        if is_relief {
            drop_speed *= 0.8;
        }

        let mut spawn_delay = self.base_spawn_delay - steps * self.spawn_delay_per_level;
        if is_relief {
            spawn_delay += 1.0;
        }
        spawn_delay = spawn_delay.max(self.min_spawn_delay);

        LevelParams {
            drop_speed,
            spawn_delay,
            is_relief,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
