//! Property tests: the forest stays a forest under any mutation sequence

use asset::mutation::{self, AddRequest, DeleteRequest, ModifyRequest};
use asset::store::AssetCollection;
use asset::tree::resolve::{resolve, MatchMode};
use asset::tree::SearchPath;
use proptest::prelude::*;
use std::path::PathBuf;

const ALIASES: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

#[derive(Debug, Clone)]
enum Op {
    Add { alias: usize, parent: Option<usize> },
    Reparent { node: usize, parent: usize },
    Rename { node: usize, alias: usize },
    Delete { node: usize, recursive: bool },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize, proptest::option::of(0..4usize))
            .prop_map(|(alias, parent)| Op::Add { alias, parent }),
        (0..4usize, 0..4usize).prop_map(|(node, parent)| Op::Reparent { node, parent }),
        (0..4usize, 0..4usize).prop_map(|(node, alias)| Op::Rename { node, alias }),
        (0..4usize, any::<bool>()).prop_map(|(node, recursive)| Op::Delete { node, recursive }),
    ]
}

fn apply(collection: &mut AssetCollection, op: &Op) {
    // Errors (duplicates, ambiguity, cycles) are expected; only the
    // structure afterwards matters.
    let _ = match op {
        Op::Add { alias, parent } => mutation::add(
            collection,
            &AddRequest {
                alias: vec![ALIASES[*alias].to_string()],
                parent: parent.map(|p| ALIASES[p].into()),
                ..AddRequest::default()
            },
        )
        .map(|_| ()),
        Op::Reparent { node, parent } => {
            let mut request = ModifyRequest::new(ALIASES[*node]);
            request.parent = Some(ALIASES[*parent].into());
            mutation::modify(collection, &request).map(|_| ())
        }
        Op::Rename { node, alias } => {
            let mut request = ModifyRequest::new(ALIASES[*node]);
            request.alias = Some(vec![ALIASES[*alias].to_string()]);
            mutation::modify(collection, &request).map(|_| ())
        }
        Op::Delete { node, recursive } => mutation::delete(
            collection,
            &DeleteRequest {
                target: ALIASES[*node].into(),
                recursive: *recursive,
            },
        )
        .map(|_| ()),
    };
}

proptest! {
    #[test]
    fn forest_invariants_hold(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut collection = AssetCollection::new(PathBuf::from("/tmp/props.yaml"), None);
        for op in &ops {
            let before = collection.forest.len();
            apply(&mut collection, op);
            prop_assert!(collection.forest.is_consistent());
            if let Op::Add { .. } = op {
                prop_assert!(collection.forest.len() <= before + 1);
            }
        }

        // Every node is reached exactly once walking down from the roots.
        let order = collection.forest.topological_order();
        prop_assert_eq!(order.len(), collection.forest.len());

        // Siblings never share an alias (no tags are used here).
        for id in collection.forest.ids() {
            let parent = collection.forest.parent(id);
            let scope = collection.forest.sibling_scope(parent, Some(id));
            let node = collection.forest.get(id).unwrap();
            prop_assert!(collection.forest.find_collision(&scope, &node.alias, &node.tag).is_none());
        }
    }

    #[test]
    fn search_is_deterministic(ops in proptest::collection::vec(op_strategy(), 1..20), pick in 0..4usize) {
        let mut collection = AssetCollection::new(PathBuf::from("/tmp/props.yaml"), None);
        for op in &ops {
            apply(&mut collection, op);
        }
        let search: SearchPath = ALIASES[pick].into();
        let first = resolve(&collection.forest, &search, MatchMode::Exact);
        let second = resolve(&collection.forest, &search, MatchMode::Fuzzy);
        prop_assert!(first.is_subset(&second));
        prop_assert_eq!(first, resolve(&collection.forest, &search, MatchMode::Exact));
    }
}
