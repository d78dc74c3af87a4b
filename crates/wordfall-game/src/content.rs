//! The word bank: level-indexed word pools, boss sequences, and lore lines.
//!
//! Pure queries with no side effects besides consuming randomness from the
//! caller's RNG. The built-in curriculum is complete enough to play; a
//! replacement can be deserialized from JSON.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Substituted whenever the content source comes up empty; spawning never
/// fails a tick over missing content.
pub const FALLBACK_WORD: &str = "VOID";

/// Avatar sprite references handed to the render collaborator.
pub const AVATARS: &[&str] = &[
    "breach", "cipher", "echo", "flux", "ghost", "grid", "link", "sentry", "static", "trace",
    "vanguard", "volt",
];

/// Words that spawn as power-ups rather than threats.
pub const POWERUP_WORDS: &[&str] = &["ROCKET", "CROWN", "CRYSTAL", "FIRE", "FOX"];

/// Story lines shown between a cleared boss and the next briefing.
pub const LORE_LINES: &[&str] = &[
    "ARCHITECT SILENCED.",
    "BLUEPRINTS FOR A PERFECT REALITY EXCLUDED HUMANITY.",
    "SOURCE CODE RECLAIMED.",
    "SYSTEM STABILIZING...",
];

/// A contiguous band of levels sharing one word pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stage {
    /// Inclusive `[first, last]` level range.
    pub levels: (u32, u32),
    /// Words drawn uniformly while inside the range.
    pub words: Vec<String>,
}

/// Level-indexed content tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordBank {
    stages: Vec<Stage>,
    /// Boss level -> fixed ordered word sequence for that encounter.
    boss_sequences: HashMap<u32, Vec<String>>,
}

impl WordBank {
    /// Build a bank from explicit tables.
    pub fn new(stages: Vec<Stage>, boss_sequences: HashMap<u32, Vec<String>>) -> Self {
        Self {
            stages,
            boss_sequences,
        }
    }

    /// Draw a word for the level. Falls back to the last stage when the level
    /// is past the curriculum, and to [`FALLBACK_WORD`] when there is nothing
    /// to draw at all.
    pub fn draw(&self, level: u32, rng: &mut impl Rng) -> String {
        let pool = self
            .stages
            .iter()
            .find(|s| level >= s.levels.0 && level <= s.levels.1)
            .or_else(|| self.stages.last())
            .map(|s| s.words.as_slice())
            .unwrap_or(&[]);

        match pool.choose(rng) {
            Some(word) => word.clone(),
            None => {
                tracing::warn!(level, "word pool empty, substituting fallback");
                FALLBACK_WORD.to_owned()
            }
        }
    }

    /// The fixed ordered word queue for a boss level, if one is defined.
    pub fn boss_sequence(&self, level: u32) -> Option<&[String]> {
        self.boss_sequences.get(&level).map(|v| v.as_slice())
    }

    /// A random avatar reference.
    pub fn avatar(rng: &mut impl Rng) -> &'static str {
        AVATARS.choose(rng).copied().unwrap_or("ghost")
    }

    /// A random power-up word.
    pub fn powerup_word(rng: &mut impl Rng) -> &'static str {
        POWERUP_WORDS.choose(rng).copied().unwrap_or("ROCKET")
    }
}

impl Default for WordBank {
    /// The built-in curriculum: short common words first, longer and stranger
    /// vocabulary as the levels climb.
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|w| w.to_string()).collect()
        }

        let stages = vec![
            Stage {
                levels: (1, 10),
                words: words(&[
                    "ZAP", "BEEP", "BOOP", "POW", "BAM", "ZOOM", "GRID", "LINK", "ROOT", "VOLT",
                    "ECHO", "FLUX",
                ]),
            },
            Stage {
                levels: (11, 20),
                words: words(&[
                    "GLITCH", "CIPHER", "BREACH", "SENTRY", "STATIC", "SIGNAL", "PACKET", "KERNEL",
                    "BUFFER", "SOCKET",
                ]),
            },
            Stage {
                levels: (21, 30),
                words: words(&[
                    "SEGFAULT", "OVERRIDE", "PROTOCOL", "FIREWALL", "TERMINAL", "INJECTOR",
                    "WATCHDOG", "CHECKSUM",
                ]),
            },
            Stage {
                levels: (31, 50),
                words: words(&[
                    "KERFUFFLE", "SKEDADDLE", "VANGUARD", "DISCOMBOBULATE", "QUARANTINE",
                    "HYPERVISOR", "BACKCHANNEL",
                ]),
            },
        ];

        let mut boss_sequences = HashMap::new();
        boss_sequences.insert(3, words(&["DECRYPT", "FIREWALL", "QUANTUM", "BREACH"]));
        boss_sequences.insert(
            10,
            words(&["NEXUS", "GUARDIAN", "OVERRIDE", "BYPASS", "COMPLETE"]),
        );
        boss_sequences.insert(
            20,
            words(&["CLOCKTOWER", "PENDULUM", "ESCAPEMENT", "RESONANCE"]),
        );
        boss_sequences.insert(30, words(&["VOID", "ENTROPY", "SINGULARITY", "COLLAPSE"]));
        boss_sequences.insert(40, words(&["ARCHITECT", "BLUEPRINT", "LATTICE", "AXIOM"]));
        boss_sequences.insert(50, words(&["RECLAIM", "SOURCE", "SYSTEM", "STABILIZE"]));

        Self::new(stages, boss_sequences)
    }
}

/// Spawn-credit complexity of a word: characters past four plus its rare
/// letters. Longer or rarer words buy the player more time before the next
/// spawn.
pub fn word_complexity(word: &str) -> (u32, u32) {
    let extra_chars = (word.chars().count() as u32).saturating_sub(4);
    let rare = word
        .chars()
        .filter(|c| matches!(c.to_ascii_uppercase(), 'J' | 'K' | 'Q' | 'V' | 'X' | 'Z'))
        .count() as u32;
    (extra_chars, rare)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn rng() -> Pcg64Mcg {
        Pcg64Mcg::seed_from_u64(7)
    }

    #[test]
    fn draw_respects_stage_ranges() {
        let bank = WordBank::default();
        let mut rng = rng();
        for _ in 0..50 {
            let w = bank.draw(1, &mut rng);
            assert!(w.chars().count() <= 4, "early levels draw short words, got {w}");
        }
    }

    #[test]
    fn past_curriculum_falls_back_to_last_stage() {
        let bank = WordBank::default();
        let mut rng = rng();
        let w = bank.draw(999, &mut rng);
        assert!(!w.is_empty());
    }

    #[test]
    fn empty_bank_substitutes_fallback() {
        let bank = WordBank::new(Vec::new(), HashMap::new());
        let mut rng = rng();
        assert_eq!(bank.draw(1, &mut rng), FALLBACK_WORD);
    }

    #[test]
    fn boss_sequence_lookup() {
        let bank = WordBank::default();
        assert!(bank.boss_sequence(3).is_some());
        assert_eq!(bank.boss_sequence(4), None);
    }

    #[test]
    fn complexity_counts_length_and_rare_letters() {
        assert_eq!(word_complexity("ZAP"), (0, 1));
        assert_eq!(word_complexity("GLITCH"), (2, 0));
        assert_eq!(word_complexity("QUANTUM"), (3, 1));
    }

    #[test]
    fn bank_roundtrips_through_json() {
        let bank = WordBank::default();
        let json = serde_json::to_string(&bank).unwrap();
        let back: WordBank = serde_json::from_str(&json).unwrap();
        assert!(back.boss_sequence(10).is_some());
    }
}
