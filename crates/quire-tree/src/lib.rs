//! Ownership tree for the Quire layout engine.
//!
//! Every layout entity lives in a [`Tree`] arena and is addressed by a
//! [`NodeId`]. A node has at most one owner: the parent link is a plain index
//! used for ancestor walks and re-parenting, never a second owner.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Detached
//! nodes stay allocated until the arena itself is dropped; they are simply no
//! longer reachable from any root.

use std::fmt;

/// A type-safe index into a [`Tree`].
///
/// Identity of a node is its index: two `NodeId`s are the same node iff they
/// compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the arena: payload plus its ownership links.
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// The owner of this node, or `None` for roots and detached nodes.
    pub parent: Option<NodeId>,

    /// Owned children, in order.
    pub children: Vec<NodeId>,

    /// The node's payload.
    pub data: T,
}

/// Arena-based ownership tree with O(1) node access and traversal.
///
/// All structural mutation goes through [`Tree::append_child`],
/// [`Tree::remove_child`] and [`Tree::clear_children`], which keep the
/// single-owner invariant: a node appears in exactly one parent's child list,
/// or in none.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    nodes: Vec<Node<T>>,
}

impl<T> Tree<T> {
    /// Create an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Allocate a new detached node and return its ID.
    pub fn alloc(&mut self, data: T) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.nodes.get_mut(id.0)
    }

    /// Get a node's payload.
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.get(id).map(|n| &n.data)
    }

    /// Get a node's payload mutably.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.get_mut(id).map(|n| &mut n.data)
    }

    /// Number of allocated nodes, attached or not.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node was ever allocated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// If `child` currently belongs to another parent (or to `parent` itself)
    /// it is detached from there first, so a node can be moved between
    /// containers without an explicit detach step.
    ///
    /// # Panics
    ///
    /// Panics if either ID is out of range, or if `parent` is `child` or one of
    /// its descendants: the append would create a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            parent != child && !self.is_descendant_of(parent, child),
            "appending {child} under {parent} would create a cycle"
        );

        if let Some(old_parent) = self.nodes[child.0].parent {
            self.remove_child(old_parent, child);
        }

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Remove `child` from `parent`'s child list and clear its parent link.
    ///
    /// Does nothing unless `parent` actually owns `child`. Detach races during
    /// tree rebuilds are expected, so a mismatched owner is not an error.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.parent(child) != Some(parent) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.retain(|&c| c != child);
        }
        self.nodes[child.0].parent = None;
    }

    /// Detach every child of `parent` and return them in their former order.
    pub fn clear_children(&mut self, parent: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get_mut(parent.0) else {
            return Vec::new();
        };
        let children = std::mem::take(&mut node.children);
        for &child in &children {
            self.nodes[child.0].parent = None;
        }
        children
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_, T> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Iterate over `id` and its descendants in depth-first pre-order.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> DescendantIterator<'_, T> {
        DescendantIterator {
            tree: self,
            stack: if self.get(id).is_some() {
                vec![id]
            } else {
                Vec::new()
            },
        }
    }

    /// The topmost ancestor of `id` (or `id` itself when it has no parent).
    #[must_use]
    pub fn root_of(&self, id: NodeId) -> NodeId {
        self.ancestors(id).last().unwrap_or(id)
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a, T> {
    tree: &'a Tree<T>,
    current: Option<NodeId>,
}

impl<T> Iterator for AncestorIterator<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Iterator over a subtree in depth-first pre-order.
pub struct DescendantIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<NodeId>,
}

impl<T> Iterator for DescendantIterator<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
