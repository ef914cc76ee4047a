//! Boxes: blocks that own an ordered list of child blocks.
//!
//! A box insets its content by padding plus border widths, hands the
//! remaining space to its [`BoxLayout`], then grows the result back out by
//! the same insets. Painting goes background, layout decorations, children,
//! borders, so outlines always sit above content.

use quire_common::warning::warn_once;
use quire_tree::NodeId;

use crate::axis::{Axis, AxisBox};
use crate::block::{Block, BlockKind};
use crate::flow::FlowBox;
use crate::paint::{self, RenderContext};
use crate::slot_grid::SlotGrid;
use crate::{ColorValue, Document, EdgeSizes, LayoutContext, Rect};

/// How a box arranges its children.
#[derive(Debug)]
pub enum BoxLayout {
    /// Vertical stack.
    Column(AxisBox),
    /// Horizontal stack, optionally wrapping.
    Row(AxisBox),
    /// Fixed grid of item slots.
    SlotGrid(SlotGrid),
    /// Inline content arranged by an external text-flow implementation.
    Flow(FlowBox),
}

impl BoxLayout {
    /// An axis box along `axis`.
    #[must_use]
    pub const fn axis(axis: Axis, params: AxisBox) -> Self {
        match axis {
            Axis::Horizontal => Self::Row(params),
            Axis::Vertical => Self::Column(params),
        }
    }

    /// Whether children may be appended through the generic mutation API.
    ///
    /// Slot grids are populated with `set_slot`; flows own their inline
    /// blocks.
    #[must_use]
    pub const fn accepts_children(&self) -> bool {
        matches!(self, Self::Column(_) | Self::Row(_))
    }

    /// Short name, as shown in snapshots.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Column(_) => "column",
            Self::Row(_) => "row",
            Self::SlotGrid(_) => "slot-grid",
            Self::Flow(_) => "flow",
        }
    }
}

/// Box-specific block state.
#[derive(Debug)]
pub struct BoxBlock {
    /// Space between the border and the content.
    pub padding: EdgeSizes,
    /// Fill behind the whole border box.
    pub background: Option<ColorValue>,
    /// Inner arrangement.
    pub layout: BoxLayout,
}

impl BoxBlock {
    /// A box with no padding and no background.
    #[must_use]
    pub const fn new(layout: BoxLayout) -> Self {
        Self {
            padding: EdgeSizes::ZERO,
            background: None,
            layout,
        }
    }
}

/// Copy of the parameters a box layout needs, so the tree can be mutated
/// while arranging.
#[derive(Clone, Copy)]
enum Arrangement {
    Column(AxisBox),
    Row(AxisBox),
    SlotGrid,
    Flow,
}

impl Document {
    /// Inset, arrange, expand.
    pub(crate) fn compute_box_layout(
        &mut self,
        ctx: LayoutContext<'_>,
        id: NodeId,
        x: f32,
        y: f32,
        available_width: f32,
    ) -> Rect {
        let Some(block) = self.tree.data(id) else {
            return Rect::new(x, y, 0.0, 0.0);
        };
        let Some(container) = block.as_box() else {
            return Rect::new(x, y, 0.0, 0.0);
        };

        let insets = container.padding + block.borders.widths();
        let arrangement = match &container.layout {
            BoxLayout::Column(axis) => Arrangement::Column(*axis),
            BoxLayout::Row(axis) => Arrangement::Row(*axis),
            BoxLayout::SlotGrid(_) => Arrangement::SlotGrid,
            BoxLayout::Flow(_) => Arrangement::Flow,
        };

        let inner_x = x + insets.left;
        let inner_y = y + insets.top;
        let inner_width = (available_width - insets.horizontal()).max(0.0);

        let content = match arrangement {
            Arrangement::Column(axis) => {
                self.arrange_column(ctx, id, axis, inner_x, inner_y, inner_width)
            }
            Arrangement::Row(axis) => {
                self.arrange_row(ctx, id, axis, inner_x, inner_y, inner_width)
            }
            Arrangement::SlotGrid => self.arrange_slot_grid(ctx, id, inner_x, inner_y),
            Arrangement::Flow => self.arrange_flow(ctx, id, inner_x, inner_y, inner_width),
        };

        content.expand(insets)
    }

    pub(crate) fn render_box(
        &self,
        id: NodeId,
        block: &Block,
        container: &BoxBlock,
        ctx: &mut dyn RenderContext,
    ) {
        let bounds = block.bounds();

        if let Some(background) = container.background {
            ctx.fill_rect(bounds, background);
        }

        let content = bounds.shrink(container.padding + block.borders.widths());
        match &container.layout {
            BoxLayout::Flow(flow) => flow.render(&self.config, ctx),
            BoxLayout::SlotGrid(grid) if grid.render_empty_slots => {
                for (column, row) in grid.empty_cells() {
                    ctx.fill_rect(
                        SlotGrid::cell_rect(content.x, content.y, column, row),
                        self.config.empty_slot_background,
                    );
                }
            }
            _ => {}
        }

        for &child in self.tree.children(id) {
            self.render_block(child, ctx);
        }

        paint::paint_borders(bounds, &block.borders, ctx);
    }

    /// Detach every child of a box, empty slot-grid cells and clear flow
    /// content.
    ///
    /// Used when a block's content is rebuilt in place. Clearing the
    /// document root invalidates the cached layout.
    pub fn clear_content(&mut self, id: NodeId) {
        let Some(container) = self.tree.data_mut(id).and_then(Block::as_box_mut) else {
            warn_once("document", "clear_content called on a block that is not a box");
            return;
        };

        match &mut container.layout {
            BoxLayout::SlotGrid(grid) => grid.clear(),
            BoxLayout::Flow(flow) => flow.clear(),
            BoxLayout::Column(_) | BoxLayout::Row(_) => {}
        }

        let _ = self.tree.clear_children(id);
        if id == self.root {
            self.invalidate_layout();
        }
    }

    /// The flow box of a node, if it is a flow container.
    pub(crate) fn flow_box(&self, id: NodeId) -> Option<&FlowBox> {
        match &self.tree.data(id)?.kind {
            BlockKind::Box(BoxBlock {
                layout: BoxLayout::Flow(flow),
                ..
            }) => Some(flow),
            _ => None,
        }
    }

    pub(crate) fn flow_box_mut(&mut self, id: NodeId) -> Option<&mut FlowBox> {
        match &mut self.tree.data_mut(id)?.kind {
            BlockKind::Box(BoxBlock {
                layout: BoxLayout::Flow(flow),
                ..
            }) => Some(flow),
            _ => None,
        }
    }
}
