//! The [`EntityStore`] -- owner of all entities and their components.
//!
//! The store is mutated with a two-phase commit: `create` queues a new entity
//! in a pending buffer and `remove` only flags an entity, while `commit`
//! (called exactly once per tick, before any system iterates) merges pending
//! additions into the live set and purges flagged entities. Systems therefore
//! never invalidate an iteration that is in flight; they enqueue structural
//! changes for the next commit instead.
//!
//! A removed entity stays *visible but inactive* until the commit point. The
//! render-sync pass relies on that window to release the entity's visual
//! resource before the record is disposed.

use std::collections::{HashMap, HashSet};

use crate::component::{Component, ComponentKind, ComponentSet};
use crate::entity::{EntityAllocator, EntityId};
use crate::StoreError;

/// Everything the store holds for one entity.
#[derive(Debug, Clone, Default)]
struct Record {
    components: ComponentSet,
    tags: HashSet<String>,
    active: bool,
}

/// Entity and component storage with deferred structural mutation.
///
/// Query iteration order is creation order and is stable within a tick.
#[derive(Debug, Default)]
pub struct EntityStore {
    allocator: EntityAllocator,
    /// Live records, keyed by id. Invariant: keys == `order` contents.
    records: HashMap<EntityId, Record>,
    /// Live ids in creation order; queries walk this.
    order: Vec<EntityId>,
    /// Created this tick, invisible to queries until `commit`.
    pending: Vec<(EntityId, Record)>,
    /// Flagged for disposal at the next `commit`.
    doomed: HashSet<EntityId>,
}

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // -- lifecycle ----------------------------------------------------------

    /// Allocate a new entity with an empty component set.
    ///
    /// The entity is queued in the pending-add buffer and does not show up in
    /// queries until the next [`commit`](Self::commit). Components can be
    /// attached immediately via [`insert`](Self::insert).
    pub fn create(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        self.pending.push((
            id,
            Record {
                active: true,
                ..Record::default()
            },
        ));
        id
    }

    /// Spawn an entity with a prepared [`ComponentSet`].
    pub fn spawn(&mut self, components: ComponentSet) -> EntityId {
        let id = self.allocator.allocate();
        self.pending.push((
            id,
            Record {
                components,
                tags: HashSet::new(),
                active: true,
            },
        ));
        id
    }

    /// Mark an entity inactive and schedule its disposal for the next commit.
    ///
    /// The entity stays visible (but inactive) to queries until then, so
    /// systems running later in the same tick can still observe the
    /// just-removed state. Removing an unknown or already-removed entity is a
    /// no-op.
    pub fn remove(&mut self, id: EntityId) {
        if let Some(rec) = self.record_mut(id) {
            rec.active = false;
            self.doomed.insert(id);
        }
    }

    /// Merge pending additions into the live set and purge entities flagged
    /// for removal. Call exactly once per tick, before any system iterates.
    pub fn commit(&mut self) {
        for (id, rec) in std::mem::take(&mut self.pending) {
            if self.doomed.remove(&id) {
                // Created and removed within the same tick: never goes live.
                self.allocator.deallocate(id);
                continue;
            }
            self.records.insert(id, rec);
            self.order.push(id);
        }
        if !self.doomed.is_empty() {
            let doomed = std::mem::take(&mut self.doomed);
            self.order.retain(|id| !doomed.contains(id));
            for id in doomed {
                self.records.remove(&id);
                self.allocator.deallocate(id);
            }
        }
    }

    /// Drop every entity, live or pending, without waiting for a commit.
    ///
    /// Callers owning visual resources must release them first; the store
    /// only forgets the records.
    pub fn clear(&mut self) {
        tracing::debug!(
            live = self.order.len(),
            pending = self.pending.len(),
            "clearing entity store"
        );
        for id in self.order.drain(..) {
            self.allocator.deallocate(id);
        }
        for (id, _) in self.pending.drain(..) {
            self.allocator.deallocate(id);
        }
        self.records.clear();
        self.doomed.clear();
    }

    // -- queries ------------------------------------------------------------

    /// Entities in the live set holding all of the given kinds, in creation
    /// order. Includes inactive entities awaiting disposal; callers that only
    /// want live gameplay targets filter on [`is_active`](Self::is_active).
    ///
    /// An empty result is just an empty iterator, never an error.
    pub fn query<'a>(
        &'a self,
        kinds: &'a [ComponentKind],
    ) -> impl Iterator<Item = EntityId> + 'a {
        self.order.iter().copied().filter(move |id| {
            self.records
                .get(id)
                .is_some_and(|rec| rec.components.has_all(kinds))
        })
    }

    /// All live entity ids in creation order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.order.iter().copied()
    }

    /// Number of live entities (committed, including inactive-not-yet-purged).
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the live set is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Whether the entity exists (live or pending) and has not been removed.
    pub fn is_active(&self, id: EntityId) -> bool {
        self.record(id).map(|rec| rec.active).unwrap_or(false)
    }

    // -- component access ---------------------------------------------------

    /// Attach (or overwrite) a component on a live or pending entity.
    ///
    /// # Errors
    ///
    /// [`StoreError::StaleEntity`] if the entity does not exist.
    pub fn insert<C: Component>(&mut self, id: EntityId, value: C) -> Result<(), StoreError> {
        let rec = self.record_mut(id).ok_or(StoreError::StaleEntity(id))?;
        *C::slot_mut(&mut rec.components) = Some(value);
        Ok(())
    }

    /// Borrow a component, if the entity exists and holds one.
    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        self.record(id).and_then(|rec| C::slot(&rec.components).as_ref())
    }

    /// Mutably borrow a component, if the entity exists and holds one.
    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        self.record_mut(id)
            .and_then(|rec| C::slot_mut(&mut rec.components).as_mut())
    }

    // -- tags ---------------------------------------------------------------

    /// Attach a free-form tag. Unknown entities are ignored.
    pub fn tag(&mut self, id: EntityId, tag: &str) {
        if let Some(rec) = self.record_mut(id) {
            let _ = rec.tags.insert(tag.to_owned());
        }
    }

    /// Whether the entity carries the given tag.
    pub fn has_tag(&self, id: EntityId, tag: &str) -> bool {
        self.record(id).map(|rec| rec.tags.contains(tag)).unwrap_or(false)
    }

    // -- internals ----------------------------------------------------------

    fn record(&self, id: EntityId) -> Option<&Record> {
        self.records
            .get(&id)
            .or_else(|| self.pending.iter().find(|(p, _)| *p == id).map(|(_, r)| r))
    }

    fn record_mut(&mut self, id: EntityId) -> Option<&mut Record> {
        if self.records.contains_key(&id) {
            return self.records.get_mut(&id);
        }
        self.pending
            .iter_mut()
            .find(|(p, _)| *p == id)
            .map(|(_, r)| r)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
