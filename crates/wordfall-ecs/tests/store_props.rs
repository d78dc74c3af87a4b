//! Property tests for the entity store.
//!
//! Random sequences of create/remove/commit operations are generated with
//! `proptest` and checked against a naive model: after a commit, the live set
//! must be exactly the entities created-and-not-removed so far.

use std::collections::HashSet;

use proptest::prelude::*;
use wordfall_ecs::prelude::*;

/// Operations we can perform on the store.
#[derive(Debug, Clone)]
enum StoreOp {
    Create,
    /// Remove the i-th (mod len) tracked entity.
    Remove(usize),
    Commit,
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        3 => Just(StoreOp::Create),
        2 => (0..64usize).prop_map(StoreOp::Remove),
        2 => Just(StoreOp::Commit),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2_000))]

    #[test]
    fn committed_live_set_matches_model(ops in prop::collection::vec(store_op_strategy(), 1..80)) {
        let mut store = EntityStore::new();

        // Model: every id ever created, and the subset removed.
        let mut created: Vec<EntityId> = Vec::new();
        let mut removed: HashSet<EntityId> = HashSet::new();

        for op in ops {
            match op {
                StoreOp::Create => {
                    let e = store.spawn(ComponentSet::new().with(Word::new("WORD")));
                    created.push(e);
                }
                StoreOp::Remove(idx) => {
                    if !created.is_empty() {
                        let e = created[idx % created.len()];
                        store.remove(e);
                        let _ = removed.insert(e);
                        // Removal is observable immediately as inactive.
                        prop_assert!(!store.is_active(e));
                    }
                }
                StoreOp::Commit => {
                    store.commit();
                    let expected: HashSet<EntityId> = created
                        .iter()
                        .copied()
                        .filter(|e| !removed.contains(e))
                        .collect();
                    let live: HashSet<EntityId> =
                        store.query(&[ComponentKind::Word]).collect();
                    prop_assert_eq!(&live, &expected);
                    prop_assert_eq!(store.len(), expected.len());
                }
            }
        }

        // A final commit settles any tail of pending operations.
        store.commit();
        let expected: HashSet<EntityId> = created
            .iter()
            .copied()
            .filter(|e| !removed.contains(e))
            .collect();
        let live: HashSet<EntityId> = store.query(&[ComponentKind::Word]).collect();
        prop_assert_eq!(live, expected);
    }

    #[test]
    fn double_remove_is_harmless(extra_removes in 1..5usize) {
        let mut store = EntityStore::new();
        let e = store.spawn(ComponentSet::new().with(Word::new("ECHO")));
        store.commit();
        for _ in 0..extra_removes {
            store.remove(e);
        }
        store.commit();
        prop_assert!(store.is_empty());
    }
}
