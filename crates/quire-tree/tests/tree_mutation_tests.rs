//! Tests for tree mutation: append (with re-parenting), remove, clear.

use quire_tree::{NodeId, Tree};

/// Helper to build a tree holding string labels.
fn tree_with(labels: &[&'static str]) -> (Tree<&'static str>, Vec<NodeId>) {
    let mut tree = Tree::new();
    let ids = labels.iter().map(|&label| tree.alloc(label)).collect();
    (tree, ids)
}

// ========== append_child ==========

#[test]
fn test_append_sets_parent_and_order() {
    let (mut tree, ids) = tree_with(&["root", "a", "b"]);
    tree.append_child(ids[0], ids[1]);
    tree.append_child(ids[0], ids[2]);

    assert_eq!(tree.children(ids[0]), &[ids[1], ids[2]]);
    assert_eq!(tree.parent(ids[1]), Some(ids[0]));
    assert_eq!(tree.parent(ids[2]), Some(ids[0]));
}

#[test]
fn test_append_moves_between_parents() {
    let (mut tree, ids) = tree_with(&["left", "right", "child"]);
    let (left, right, child) = (ids[0], ids[1], ids[2]);

    tree.append_child(left, child);
    tree.append_child(right, child);

    assert!(tree.children(left).is_empty());
    assert_eq!(tree.children(right), &[child]);
    assert_eq!(tree.parent(child), Some(right));
}

#[test]
fn test_append_to_same_parent_moves_to_end_once() {
    let (mut tree, ids) = tree_with(&["root", "a", "b"]);
    tree.append_child(ids[0], ids[1]);
    tree.append_child(ids[0], ids[2]);
    tree.append_child(ids[0], ids[1]);

    assert_eq!(tree.children(ids[0]), &[ids[2], ids[1]]);
}

#[test]
#[should_panic(expected = "would create a cycle")]
fn test_append_ancestor_under_descendant_panics() {
    let (mut tree, ids) = tree_with(&["root", "child"]);
    tree.append_child(ids[0], ids[1]);
    tree.append_child(ids[1], ids[0]);
}

#[test]
#[should_panic(expected = "would create a cycle")]
fn test_append_to_self_panics() {
    let (mut tree, ids) = tree_with(&["solo"]);
    tree.append_child(ids[0], ids[0]);
}

// ========== remove_child ==========

#[test]
fn test_remove_child_clears_back_reference() {
    let (mut tree, ids) = tree_with(&["root", "a", "b", "c"]);
    for &id in &ids[1..] {
        tree.append_child(ids[0], id);
    }

    tree.remove_child(ids[0], ids[2]);

    assert_eq!(tree.children(ids[0]), &[ids[1], ids[3]]);
    assert_eq!(tree.parent(ids[2]), None);
}

#[test]
fn test_remove_child_from_non_owner_is_noop() {
    let (mut tree, ids) = tree_with(&["owner", "other", "child"]);
    tree.append_child(ids[0], ids[2]);

    tree.remove_child(ids[1], ids[2]);

    assert_eq!(tree.children(ids[0]), &[ids[2]]);
    assert_eq!(tree.parent(ids[2]), Some(ids[0]));
}

// ========== clear_children ==========

#[test]
fn test_clear_children_detaches_all() {
    let (mut tree, ids) = tree_with(&["root", "a", "b"]);
    tree.append_child(ids[0], ids[1]);
    tree.append_child(ids[0], ids[2]);

    let removed = tree.clear_children(ids[0]);

    assert_eq!(removed, vec![ids[1], ids[2]]);
    assert!(tree.children(ids[0]).is_empty());
    assert_eq!(tree.parent(ids[1]), None);
    assert_eq!(tree.parent(ids[2]), None);
}

// ========== traversal ==========

#[test]
fn test_ancestors_and_root() {
    let (mut tree, ids) = tree_with(&["root", "mid", "leaf"]);
    tree.append_child(ids[0], ids[1]);
    tree.append_child(ids[1], ids[2]);

    assert_eq!(tree.ancestors(ids[2]).collect::<Vec<_>>(), vec![ids[1], ids[0]]);
    assert_eq!(tree.root_of(ids[2]), ids[0]);
    assert_eq!(tree.root_of(ids[0]), ids[0]);
    assert!(tree.is_descendant_of(ids[2], ids[0]));
    assert!(!tree.is_descendant_of(ids[0], ids[2]));
}

#[test]
fn test_descendants_pre_order() {
    let (mut tree, ids) = tree_with(&["root", "a", "a1", "b"]);
    tree.append_child(ids[0], ids[1]);
    tree.append_child(ids[1], ids[2]);
    tree.append_child(ids[0], ids[3]);

    let order: Vec<_> = tree
        .descendants(ids[0])
        .filter_map(|id| tree.data(id).copied())
        .collect();
    assert_eq!(order, vec!["root", "a", "a1", "b"]);
}
