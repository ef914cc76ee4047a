//! The document: owner of the block arena and the top-level sequence.
//!
//! Top-level blocks are children of an internal root column, inset by
//! [`LayoutConfig::document_inset`]. The last layout is cached by available
//! width. The cache is dropped whenever the top-level sequence changes or a
//! placeholder swaps its content; there is no finer-grained dirty tracking,
//! so hosts that mutate nested boxes call [`Document::invalidate_layout`].

use quire_common::warning::warn_once;
use quire_tree::{NodeId, Tree};
use serde::Serialize;

use crate::axis::AxisBox;
use crate::block::{Block, BlockKind};
use crate::container::BoxLayout;
use crate::hit_test::HitTestResult;
use crate::interaction::MouseCapture;
use crate::leaf;
use crate::paint::RenderContext;
use crate::placeholder::PendingPlaceholder;
use crate::{EdgeSizes, LayoutConfig, LayoutContext};

/// The result of the last document layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentLayout {
    /// Width the document was laid out for.
    pub available_width: f32,
    /// Total height of the content, insets included. Drives scrolling.
    pub content_height: f32,
}

/// A retained-mode document.
#[derive(Debug)]
pub struct Document {
    pub(crate) tree: Tree<Block>,
    pub(crate) root: NodeId,
    pub(crate) config: LayoutConfig,
    pub(crate) layout: Option<DocumentLayout>,
    pub(crate) hovered: Option<HitTestResult>,
    pub(crate) capture: MouseCapture,
    pub(crate) pending: Vec<PendingPlaceholder>,
}

impl Document {
    /// An empty document with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// An empty document.
    #[must_use]
    pub fn with_config(config: LayoutConfig) -> Self {
        let mut tree = Tree::new();
        let root = tree.alloc(
            Block::column(AxisBox::new().with_gap(config.document_gap))
                .with_padding(EdgeSizes::uniform(config.document_inset))
                .with_full_width(true),
        );

        Self {
            tree,
            root,
            config,
            layout: None,
            hovered: None,
            capture: MouseCapture::default(),
            pending: Vec::new(),
        }
    }

    /// The configuration the document was created with.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// The internal root column. Its children are the top-level blocks.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Add a detached block to the arena.
    ///
    /// A flow's inline blocks are adopted as its children.
    pub fn create(&mut self, block: Block) -> NodeId {
        let inline_blocks = match &block.kind {
            BlockKind::Box(container) => match &container.layout {
                BoxLayout::Flow(flow) => flow.inline_blocks(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        let id = self.tree.alloc(block);
        for inline in inline_blocks {
            if self.tree.get(inline).is_none() {
                warn_once("document", "flow refers to an inline block that does not exist");
                continue;
            }
            self.detach(inline);
            self.tree.append_child(id, inline);
        }
        id
    }

    /// Create a block and append it to the top-level sequence.
    pub fn push(&mut self, block: Block) -> NodeId {
        let id = self.create(block);
        self.append_child(self.root, id);
        id
    }

    /// Append `child` as the last child of a column or row.
    ///
    /// A child owned by another container is removed from it first. Appending
    /// into anything but a column or row is logged and ignored.
    ///
    /// # Panics
    ///
    /// Panics if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(target) = self.tree.data(parent) else {
            warn_once("document", "append_child target does not exist");
            return;
        };
        if !target
            .as_box()
            .is_some_and(|container| container.layout.accepts_children())
        {
            warn_once(
                "document",
                &format!("cannot append children to a {}", target.kind_name()),
            );
            return;
        }
        if self.tree.get(child).is_none() {
            warn_once("document", "append_child child does not exist");
            return;
        }
        assert!(
            parent != child && !self.tree.is_descendant_of(parent, child),
            "appending {child} under {parent} would create a cycle"
        );

        self.detach(child);
        self.tree.append_child(parent, child);
        if parent == self.root {
            self.invalidate_layout();
        }
    }

    /// Remove `child` from `parent`. Does nothing unless `parent` owns it.
    ///
    /// Removing from a slot grid empties the cell; removing a placeholder's
    /// child leaves an empty label in its place.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.tree.parent(child) != Some(parent) {
            return;
        }

        self.tree.remove_child(parent, child);

        if let Some(grid) = self.slot_grid_mut(parent) {
            grid.forget(child);
        } else if self.placeholder(parent).is_some() {
            self.refill_placeholder(parent);
        }

        if parent == self.root {
            self.invalidate_layout();
        }
    }

    /// Remove every top-level block.
    pub fn clear(&mut self) {
        self.clear_content(self.root);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(owner) = self.tree.parent(node) {
            self.remove_child(owner, node);
        }
    }

    /// A block by ID.
    #[must_use]
    pub fn block(&self, id: NodeId) -> Option<&Block> {
        self.tree.data(id)
    }

    /// A block by ID, mutably. Geometry changes made through it take effect
    /// after [`invalidate_layout`](Self::invalidate_layout).
    pub fn block_mut(&mut self, id: NodeId) -> Option<&mut Block> {
        self.tree.data_mut(id)
    }

    /// The owner of a block.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    /// The children of a block, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    /// The top-level blocks, in order.
    #[must_use]
    pub fn top_level(&self) -> &[NodeId] {
        self.tree.children(self.root)
    }

    /// Blocks from `id`'s parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.ancestors(id)
    }

    /// Lay the document out for `available_width`, unless the cached layout
    /// is already for that width.
    pub fn update_layout(&mut self, ctx: LayoutContext<'_>, available_width: f32) {
        if self
            .layout
            .is_some_and(|layout| layout.available_width.to_bits() == available_width.to_bits())
        {
            return;
        }

        let bounds = self.layout_block(ctx, self.root, 0.0, 0.0, available_width);
        log::debug!(
            "document laid out for width {available_width}: content height {}",
            bounds.height
        );
        self.layout = Some(DocumentLayout {
            available_width,
            content_height: bounds.height,
        });
    }

    /// Drop the cached layout; the next `update_layout` recomputes.
    pub fn invalidate_layout(&mut self) {
        self.layout = None;
    }

    /// The cached layout, if still valid.
    #[must_use]
    pub const fn layout(&self) -> Option<DocumentLayout> {
        self.layout
    }

    /// Height of the laid-out content, or 0 before the first layout.
    #[must_use]
    pub fn content_height(&self) -> f32 {
        self.layout.map_or(0.0, |layout| layout.content_height)
    }

    /// Width of the last layout, or 0 before the first layout.
    #[must_use]
    pub fn available_width(&self) -> f32 {
        self.layout.map_or(0.0, |layout| layout.available_width)
    }

    /// Issue drawing requests for everything inside the context's viewport.
    ///
    /// Uses the bounds of the last layout; call `update_layout` first.
    pub fn render(&self, ctx: &mut dyn RenderContext) {
        if self.layout.is_none() {
            log::debug!("rendering a document without a current layout");
        }
        self.render_block(self.root, ctx);
    }

    pub(crate) fn render_block(&self, id: NodeId, ctx: &mut dyn RenderContext) {
        let Some(block) = self.tree.data(id) else {
            return;
        };
        if block.is_culled(&ctx.viewport()) {
            return;
        }

        let bounds = block.bounds();
        match &block.kind {
            BlockKind::Box(container) => self.render_box(id, block, container, ctx),
            BlockKind::Placeholder(placeholder) => self.render_block(placeholder.current(), ctx),
            BlockKind::Image(image) => leaf::render_image(image, bounds, ctx),
            BlockKind::Sprite(sprite) => leaf::render_sprite(sprite, bounds, ctx),
            BlockKind::Slot(slot) => leaf::render_slot(slot, bounds, &self.config, ctx),
            BlockKind::ThematicBreak => leaf::render_break(bounds, &self.config, ctx),
            BlockKind::ItemImage(item) => leaf::render_item_image(item, bounds, ctx),
            BlockKind::Scene(scene) => leaf::render_scene(scene, bounds, &self.config, ctx),
            BlockKind::Label(label) => leaf::render_label(label, bounds, &self.config, ctx),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
