//! Movement and the kill-zone boundary.
//!
//! Advances every active entity holding Position and Velocity by one fixed
//! step. Boss-tagged words ignore their stored vertical speed in favor of the
//! intrinsic (slower) boss fall speed so the dialogue stays readable. A
//! session-level freeze suspends movement entirely without touching the
//! elapsed-time accounting -- positions simply resume where they stopped.

use wordfall_ecs::prelude::*;

use crate::config::GameConfig;
use crate::systems::spawn::BOSS_TAG;

/// Advance positions by `dt` seconds and collect kill-zone crossings.
///
/// Crossing entities are removed from the store here; the caller runs the
/// damage sequence once per returned entity, so each crossing costs exactly
/// one life even when several land in the same tick.
pub fn advance(store: &mut EntityStore, dt: f64, frozen: bool, cfg: &GameConfig) -> Vec<EntityId> {
    if frozen {
        return Vec::new();
    }

    let movers: Vec<EntityId> = store
        .query(&[ComponentKind::Position, ComponentKind::Velocity])
        .filter(|&e| store.is_active(e))
        .collect();

    let kill_y = cfg.kill_y();
    let mut crossed = Vec::new();

    for id in movers {
        let Some(vel) = store.get::<Velocity>(id).copied() else {
            continue;
        };
        let dy = if store.has_tag(id, BOSS_TAG) {
            cfg.boss_fall_speed
        } else {
            vel.dy
        };
        let Some(pos) = store.get_mut::<Position>(id) else {
            continue;
        };
        pos.x += vel.dx * dt;
        pos.y += dy * dt;

        if pos.y >= kill_y {
            tracing::debug!(entity = %id, y = pos.y, kill_y, "entity crossed the kill-zone");
            crossed.push(id);
            store.remove(id);
        }
    }

    crossed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
