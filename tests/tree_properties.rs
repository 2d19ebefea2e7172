//! Property tests for the course tree
//!
//! Random insert/remove sequences are checked against a sorted `Vec` model.

use course_catalog::{Course, CourseTree};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(String),
    Remove(String),
}

/// Small key space so removals and duplicates actually hit
fn key() -> impl Strategy<Value = String> {
    "[A-D][0-9]{1,2}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => key().prop_map(Op::Insert),
        2 => key().prop_map(Op::Remove),
    ]
}

fn ids(tree: &CourseTree) -> Vec<String> {
    tree.iter().map(|c| c.id.clone()).collect()
}

proptest! {
    #[test]
    fn matches_sorted_model(ops in prop::collection::vec(op(), 0..200)) {
        let mut tree = CourseTree::new();
        let mut model: Vec<String> = Vec::new();

        for op in ops {
            match op {
                Op::Insert(id) => {
                    tree.insert(Course::new(id.clone(), "t"));
                    let pos = model.partition_point(|k| k <= &id);
                    model.insert(pos, id);
                }
                Op::Remove(id) => {
                    let removed = tree.remove(&id);
                    match model.iter().position(|k| k == &id) {
                        Some(pos) => {
                            model.remove(pos);
                            prop_assert_eq!(removed.map(|c| c.id), Some(id));
                        }
                        None => prop_assert!(removed.is_none()),
                    }
                }
            }

            prop_assert!(tree.check_invariants().is_ok());
            prop_assert_eq!(tree.len(), model.len());
        }

        prop_assert_eq!(ids(&tree), model);
    }

    #[test]
    fn search_finds_every_stored_key(
        keys in prop::collection::vec(key(), 0..100),
        candidate in key()
    ) {
        let tree: CourseTree = keys.iter().map(|k| Course::new(k.clone(), "t")).collect();

        for k in &keys {
            prop_assert_eq!(tree.search(k).map(|c| c.id.as_str()), Some(k.as_str()));
        }
        prop_assert_eq!(tree.search(&candidate).is_some(), keys.contains(&candidate));
    }

    #[test]
    fn traversal_is_non_decreasing(keys in prop::collection::vec(key(), 0..100)) {
        let tree: CourseTree = keys.iter().map(|k| Course::new(k.clone(), "t")).collect();

        let mut visited = Vec::new();
        tree.in_order(|c| visited.push(c.id.clone()));

        prop_assert_eq!(visited.len(), keys.len());
        prop_assert!(visited.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(visited, ids(&tree));
    }

    #[test]
    fn removing_absent_key_changes_nothing(keys in prop::collection::vec("[A-D][0-9]", 0..50)) {
        let mut tree: CourseTree = keys.iter().map(|k| Course::new(k.clone(), "t")).collect();
        let before = ids(&tree);

        // Keys are two characters, so this one is never present
        prop_assert!(tree.remove("Z999").is_none());
        prop_assert_eq!(ids(&tree), before);
    }

    #[test]
    fn clear_leaves_empty_tree(keys in prop::collection::vec(key(), 0..100)) {
        let mut tree: CourseTree = keys.iter().map(|k| Course::new(k.clone(), "t")).collect();

        tree.clear();
        prop_assert!(tree.is_empty());
        prop_assert_eq!(tree.len(), 0);
        for k in &keys {
            prop_assert!(tree.search(k).is_none());
        }

        tree.clear();
        prop_assert!(tree.is_empty());
    }
}
