//! Wordfall ECS -- entity store with a closed component set and two-phase
//! commit.
//!
//! Entities are opaque generational ids owning a bag of typed components.
//! Structural changes (creation, removal) are deferred: they are queued
//! during a tick and folded into the live set by a single `commit` call at
//! the top of the next tick, so systems can iterate without invalidation.
//!
//! # Quick Start
//!
//! ```
//! use wordfall_ecs::prelude::*;
//!
//! let mut store = EntityStore::new();
//! let e = store.spawn(
//!     ComponentSet::new()
//!         .with(Position { x: 120.0, y: -100.0 })
//!         .with(Velocity { dx: 0.0, dy: 100.0 })
//!         .with(Word::new("BREACH")),
//! );
//!
//! // Not visible until the per-tick commit.
//! assert_eq!(store.query(&[ComponentKind::Word]).count(), 0);
//! store.commit();
//! assert_eq!(store.query(&[ComponentKind::Word]).count(), 1);
//! assert_eq!(store.get::<Word>(e).map(|w| w.text.as_str()), Some("BREACH"));
//! ```

#![deny(unsafe_code)]

pub mod component;
pub mod entity;
pub mod store;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The entity does not exist (stale generation, removed, or never
    /// created).
    #[error("entity {0:?} does not exist (stale or never created)")]
    StaleEntity(entity::EntityId),
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::component::{
        Component, ComponentKind, ComponentSet, Lane, Position, RenderDescriptor, RenderKind,
        VisualId, Velocity, Word,
    };
    pub use crate::entity::EntityId;
    pub use crate::store::EntityStore;
    pub use crate::StoreError;
}

// ---------------------------------------------------------------------------
// Integration Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// Drive the store the way the game tick does: commit, then have
    /// "systems" read and enqueue changes for the next commit.
    #[test]
    fn tick_shaped_usage() {
        let mut store = EntityStore::new();

        // Tick 1: a spawner creates two words.
        let cat = store.spawn(
            ComponentSet::new()
                .with(Position { x: 40.0, y: -100.0 })
                .with(Velocity { dx: 0.0, dy: 90.0 })
                .with(Word::new("CAT"))
                .with(Lane { index: 0 }),
        );
        let dog = store.spawn(
            ComponentSet::new()
                .with(Position { x: 200.0, y: -100.0 })
                .with(Velocity { dx: 0.0, dy: 90.0 })
                .with(Word::new("DOG"))
                .with(Lane { index: 3 }),
        );

        // Tick 2: commit makes both visible; typing resolves CAT.
        store.commit();
        let words: Vec<_> = store.query(&[ComponentKind::Word]).collect();
        assert_eq!(words, vec![cat, dog]);
        store.remove(cat);

        // Later systems in the same tick still see the inactive record.
        assert!(store.query(&[ComponentKind::Word]).any(|e| e == cat));
        assert!(!store.is_active(cat));
        assert!(store.is_active(dog));

        // Tick 3: the commit purges it.
        store.commit();
        let words: Vec<_> = store.query(&[ComponentKind::Word]).collect();
        assert_eq!(words, vec![dog]);
    }

    #[test]
    fn render_handle_lifecycle_via_component_slot() {
        let mut store = EntityStore::new();
        let e = store.spawn(
            ComponentSet::new().with(RenderDescriptor::new(RenderKind::Normal, "ghost")),
        );
        store.commit();

        // Render sync lazily fills the handle in...
        if let Some(r) = store.get_mut::<RenderDescriptor>(e) {
            assert_eq!(r.visual, None);
            r.visual = Some(VisualId(7));
        }
        // ...and clears it when the entity goes inactive.
        store.remove(e);
        if !store.is_active(e) {
            if let Some(r) = store.get_mut::<RenderDescriptor>(e) {
                r.visual = None;
            }
        }
        assert_eq!(store.get::<RenderDescriptor>(e).unwrap().visual, None);
        store.commit();
    }
}
