use lazytask_core::{TaskId, TaskStore};
use std::collections::HashSet;

fn store_with_ids(count: usize) -> TaskStore {
    let mut store = TaskStore::new();
    for n in 1..=count {
        store.add(&format!("task {n}")).unwrap();
    }
    store
}

fn ids(store: &TaskStore) -> Vec<TaskId> {
    store.list(true).iter().map(|t| t.id).collect()
}

#[test]
fn reorder_moves_listed_ids_first_and_appends_the_rest() {
    let mut store = store_with_ids(3);

    store.reorder(&[3, 1]);

    assert_eq!(ids(&store), vec![3, 1, 2]);
}

#[test]
fn reorder_keeps_prior_relative_order_of_unmentioned_tasks() {
    let mut store = store_with_ids(5);

    store.reorder(&[4]);

    assert_eq!(ids(&store), vec![4, 1, 2, 3, 5]);
}

#[test]
fn reorder_first_occurrence_wins_for_duplicates() {
    let mut store = store_with_ids(3);

    store.reorder(&[2, 3, 2, 2]);

    assert_eq!(ids(&store), vec![2, 3, 1]);
}

#[test]
fn reorder_drops_unknown_ids() {
    let mut store = store_with_ids(3);

    store.reorder(&[99, 2, 42, 1]);

    assert_eq!(ids(&store), vec![2, 1, 3]);
}

#[test]
fn reorder_with_empty_input_keeps_current_order() {
    let mut store = store_with_ids(4);
    store.reorder(&[2, 1, 4, 3]);

    store.reorder(&[]);

    assert_eq!(ids(&store), vec![2, 1, 4, 3]);
}

#[test]
fn reorder_always_yields_a_permutation_of_the_store() {
    let mut store = store_with_ids(6);
    let before: HashSet<TaskId> = ids(&store).into_iter().collect();

    // Hostile input: duplicates, unknowns, partial coverage.
    store.reorder(&[6, 6, 99, 2, 0, 2, 4]);

    let after = ids(&store);
    assert_eq!(after.len(), before.len());
    assert_eq!(after.iter().copied().collect::<HashSet<_>>(), before);
    assert_eq!(&after[..3], &[6, 2, 4]);
}

#[test]
fn reorder_on_empty_store_is_a_no_op() {
    let mut store = TaskStore::new();
    store.reorder(&[1, 2, 3]);
    assert!(store.list(true).is_empty());
}
