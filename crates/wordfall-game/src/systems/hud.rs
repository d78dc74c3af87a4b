//! HUD synchronization: snapshots the session stats out to the UI sink.

use crate::frontend::{HudSnapshot, UiSink};
use crate::session::SessionStats;

/// Push the current stats to the HUD.
pub fn sync(stats: &SessionStats, best: u64, ui: &mut dyn UiSink) {
    ui.hud(&HudSnapshot {
        score: stats.score,
        lives: stats.lives,
        level: stats.level,
        streak: stats.streak,
        best: best.max(stats.score),
    });
}
