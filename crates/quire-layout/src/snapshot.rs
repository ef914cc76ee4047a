//! Serializable view of a laid-out document.

use quire_tree::NodeId;
use serde::Serialize;

use crate::{Block, Document, Rect};

/// One block of a [`LayoutSnapshot`] tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutSnapshot {
    /// Arena index of the block.
    pub node: usize,
    /// Kind name, e.g. `column` or `slot`.
    pub kind: &'static str,
    /// Bounds from the last layout.
    pub bounds: Rect,
    /// Children, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Self>,
}

impl LayoutSnapshot {
    /// Number of blocks in this subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Self::len).sum::<usize>()
    }

    /// Always false: a snapshot contains at least its own block.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Find the snapshot of a node in this subtree.
    #[must_use]
    pub fn find(&self, node: NodeId) -> Option<&Self> {
        if self.node == node.0 {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(node))
    }
}

impl Document {
    /// Snapshot the whole document from its root.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        self.snapshot_of(self.root)
    }

    /// Snapshot the subtree below `id`.
    #[must_use]
    pub fn snapshot_of(&self, id: NodeId) -> LayoutSnapshot {
        LayoutSnapshot {
            node: id.0,
            kind: self.tree.data(id).map_or("missing", Block::kind_name),
            bounds: self.bounds_of(id),
            children: self
                .tree
                .children(id)
                .iter()
                .map(|&child| self.snapshot_of(child))
                .collect(),
        }
    }
}
