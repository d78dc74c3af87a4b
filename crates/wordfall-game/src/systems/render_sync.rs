//! Render synchronization: mirrors entity state out to the render
//! collaborator.
//!
//! Visuals are created lazily the first time an entity with a render
//! descriptor is seen, move events follow active entities, and the visual is
//! destroyed as soon as the entity goes inactive -- inside the
//! visible-but-inactive window the store guarantees before the next commit
//! purges the record.

use wordfall_ecs::prelude::*;

use crate::frontend::RenderSink;

/// Push this tick's create/move/destroy events.
pub fn sync(store: &mut EntityStore, render: &mut dyn RenderSink) {
    let ids: Vec<EntityId> = store.query(&[ComponentKind::Render]).collect();

    for id in ids {
        let Some(descriptor) = store.get::<RenderDescriptor>(id).cloned() else {
            continue;
        };
        let active = store.is_active(id);

        match (active, descriptor.visual) {
            (true, None) => {
                let word = store.get::<Word>(id).cloned().unwrap_or_else(|| Word::new(""));
                let at = store
                    .get::<Position>(id)
                    .copied()
                    .unwrap_or(Position { x: 0.0, y: 0.0 });
                let visual = render.create(id, &descriptor, &word, at);
                if let Some(r) = store.get_mut::<RenderDescriptor>(id) {
                    r.visual = Some(visual);
                }
            }
            (true, Some(visual)) => {
                if let Some(at) = store.get::<Position>(id).copied() {
                    render.moved(visual, at);
                }
            }
            (false, Some(visual)) => {
                render.destroy(visual);
                if let Some(r) = store.get_mut::<RenderDescriptor>(id) {
                    r.visual = None;
                }
            }
            (false, None) => {}
        }
    }
}

/// Destroy every visual still held in the store. Phase exit calls this
/// before clearing the store so repeated sessions cannot leak resources.
pub fn release_all(store: &mut EntityStore, render: &mut dyn RenderSink) {
    let ids: Vec<EntityId> = store.query(&[ComponentKind::Render]).collect();
    for id in ids {
        if let Some(visual) = store.get::<RenderDescriptor>(id).and_then(|r| r.visual) {
            render.destroy(visual);
            if let Some(r) = store.get_mut::<RenderDescriptor>(id) {
                r.visual = None;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{Frontend, FrontendEvent, RecordingFrontend};

    fn rendered_entity(store: &mut EntityStore) -> EntityId {
        store.spawn(
            ComponentSet::new()
                .with(Position { x: 10.0, y: 20.0 })
                .with(Word::new("ECHO"))
                .with(RenderDescriptor::new(RenderKind::Normal, "echo")),
        )
    }

    #[test]
    fn visual_created_lazily_then_moved() {
        let mut store = EntityStore::new();
        let e = rendered_entity(&mut store);
        store.commit();
        let (mut frontend, log) = RecordingFrontend::frontend();

        sync(&mut store, frontend.render.as_mut());
        let visual = store.get::<RenderDescriptor>(e).unwrap().visual;
        assert!(visual.is_some(), "handle stored back on the component");
        assert!(matches!(log.borrow()[0], FrontendEvent::Created(id, _) if id == e));

        store.get_mut::<Position>(e).unwrap().y = 50.0;
        sync(&mut store, frontend.render.as_mut());
        assert!(log
            .borrow()
            .contains(&FrontendEvent::Moved(visual.unwrap(), 10.0, 50.0)));
    }

    #[test]
    fn inactive_entity_releases_its_visual_before_purge() {
        let mut store = EntityStore::new();
        let e = rendered_entity(&mut store);
        store.commit();
        let (mut frontend, log) = RecordingFrontend::frontend();

        sync(&mut store, frontend.render.as_mut());
        let visual = store.get::<RenderDescriptor>(e).unwrap().visual.unwrap();

        store.remove(e);
        // Same tick, before the next commit: destroy must be observable.
        sync(&mut store, frontend.render.as_mut());
        assert!(log.borrow().contains(&FrontendEvent::Destroyed(visual)));
        assert_eq!(store.get::<RenderDescriptor>(e).unwrap().visual, None);

        store.commit();
    }

    #[test]
    fn entity_without_visual_needs_no_destroy() {
        let mut store = EntityStore::new();
        let e = rendered_entity(&mut store);
        store.commit();
        store.remove(e); // removed before any visual was created

        let (mut frontend, log) = RecordingFrontend::frontend();
        sync(&mut store, frontend.render.as_mut());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn release_all_destroys_every_held_visual() {
        let mut store = EntityStore::new();
        let _a = rendered_entity(&mut store);
        let _b = rendered_entity(&mut store);
        store.commit();
        let (mut frontend, log) = RecordingFrontend::frontend();
        sync(&mut store, frontend.render.as_mut());
        log.borrow_mut().clear();

        release_all(&mut store, frontend.render.as_mut());
        let destroyed = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, FrontendEvent::Destroyed(_)))
            .count();
        assert_eq!(destroyed, 2);
    }

    #[test]
    fn null_frontend_runs_the_same_path() {
        let mut store = EntityStore::new();
        let e = rendered_entity(&mut store);
        store.commit();
        let mut frontend = Frontend::null();
        sync(&mut store, frontend.render.as_mut());
        assert!(store.get::<RenderDescriptor>(e).unwrap().visual.is_some());
    }
}
