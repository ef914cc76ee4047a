//! The block layout contract.
//!
//! `layout_block` is the only way `bounds` is computed: it runs the
//! kind-specific layout, applies the full-width rule and stores the result.
//! `set_layout_pos` moves already computed geometry, dragging every
//! descendant along by the same delta without laying anything out again.

#[cfg(feature = "layout-trace")]
use std::cell::Cell;
use std::fmt;

use quire_tree::NodeId;

use crate::block::{Block, BlockKind};
use crate::container::{BoxBlock, BoxLayout};
use crate::flow::TextMeasure;
use crate::leaf;
use crate::{Document, Rect};

#[cfg(feature = "layout-trace")]
thread_local! {
    static LAYOUT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Services layout needs from the host.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    text: &'a dyn TextMeasure,
}

impl<'a> LayoutContext<'a> {
    /// Lay out with the given text metrics.
    #[must_use]
    pub const fn new(text: &'a dyn TextMeasure) -> Self {
        Self { text }
    }

    /// Text metrics.
    #[must_use]
    pub const fn text(&self) -> &'a dyn TextMeasure {
        self.text
    }
}

impl fmt::Debug for LayoutContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutContext").finish_non_exhaustive()
    }
}

/// Decrements the trace depth when a block's layout returns.
#[cfg(feature = "layout-trace")]
struct TraceGuard;

#[cfg(feature = "layout-trace")]
impl TraceGuard {
    fn enter(id: NodeId, kind: &str, x: f32, y: f32, available_width: f32) -> Self {
        let depth = LAYOUT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });
        log::trace!(
            target: "quire::layout",
            "{:indent$}{kind} {id} at ({x}, {y}) width {available_width}",
            "",
            indent = depth * 2
        );
        Self
    }
}

#[cfg(feature = "layout-trace")]
impl Drop for TraceGuard {
    fn drop(&mut self) {
        LAYOUT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

impl Document {
    /// Lay out a block at `(x, y)` within `available_width` and store the
    /// result as its `bounds`.
    ///
    /// A full-width block narrower than `available_width` is widened to it;
    /// its height is unchanged. Margins are not applied here: the containing
    /// layout offsets the position and reduces the width before calling.
    pub fn layout_block(
        &mut self,
        ctx: LayoutContext<'_>,
        id: NodeId,
        x: f32,
        y: f32,
        available_width: f32,
    ) -> Rect {
        #[cfg(feature = "layout-trace")]
        let _trace = TraceGuard::enter(
            id,
            self.tree.data(id).map_or("missing", |block| block.kind_name()),
            x,
            y,
            available_width,
        );

        let computed = self.compute_layout(ctx, id, x, y, available_width);
        let Some(block) = self.tree.data_mut(id) else {
            return computed;
        };

        let bounds = if block.full_width && computed.width < available_width {
            Rect {
                width: available_width,
                ..computed
            }
        } else {
            computed
        };
        block.set_bounds(bounds);
        bounds
    }

    fn compute_layout(
        &mut self,
        ctx: LayoutContext<'_>,
        id: NodeId,
        x: f32,
        y: f32,
        available_width: f32,
    ) -> Rect {
        let Some(block) = self.tree.data(id) else {
            log::debug!("layout requested for unknown node {id}");
            return Rect::new(x, y, 0.0, 0.0);
        };

        match &block.kind {
            BlockKind::Box(_) => self.compute_box_layout(ctx, id, x, y, available_width),
            BlockKind::Placeholder(_) => {
                self.compute_placeholder_layout(ctx, id, x, y, available_width)
            }
            BlockKind::Image(image) => leaf::compute_image_layout(image, x, y, available_width),
            BlockKind::Sprite(sprite) => leaf::compute_sprite_layout(sprite, x, y),
            BlockKind::Slot(_) => leaf::compute_slot_layout(x, y),
            BlockKind::ThematicBreak => {
                leaf::compute_break_layout(&self.config, x, y, available_width)
            }
            BlockKind::ItemImage(item) => leaf::compute_item_image_layout(item, x, y),
            BlockKind::Scene(scene) => leaf::compute_scene_layout(scene, x, y),
            BlockKind::Label(label) => leaf::compute_label_layout(label, &ctx, &self.config, x, y),
        }
    }

    /// Move an already laid-out block so its top-left corner is `(x, y)`.
    ///
    /// Descendants and inline runs are translated by the same delta.
    pub fn set_layout_pos(&mut self, id: NodeId, x: f32, y: f32) {
        let Some(block) = self.tree.data_mut(id) else {
            return;
        };
        let bounds = block.bounds();
        let (dx, dy) = (x - bounds.x, y - bounds.y);
        block.set_bounds(bounds.translate(dx, dy));
        self.on_layout_moved(id, dx, dy);
    }

    /// Translate cached geometry below `id`. `id`'s own bounds have already
    /// moved.
    fn on_layout_moved(&mut self, id: NodeId, dx: f32, dy: f32) {
        let subtree: Vec<NodeId> = self.tree.descendants(id).collect();
        for node in subtree {
            let Some(block) = self.tree.data_mut(node) else {
                continue;
            };
            if node != id {
                let bounds = block.bounds();
                block.set_bounds(bounds.translate(dx, dy));
            }
            if let BlockKind::Box(BoxBlock {
                layout: BoxLayout::Flow(flow),
                ..
            }) = &mut block.kind
            {
                flow.moved(dx, dy);
            }
        }
    }

    /// Bounds of a node from the last layout, or an empty rectangle.
    #[must_use]
    pub fn bounds_of(&self, id: NodeId) -> Rect {
        self.tree.data(id).map(Block::bounds).unwrap_or_default()
    }
}
