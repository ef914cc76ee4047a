//! Axis boxes: columns and rows.
//!
//! Children are placed one after another along the main axis, separated by
//! `gap`, each offset by its own margins. The cross axis is resolved
//! afterwards from [`AlignItems`]. Rows can wrap onto new lines; columns
//! never do, since their main axis is unbounded.

use quire_tree::NodeId;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::{Document, EdgeSizes, LayoutContext, Rect};

/// Main axis of an axis box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Children side by side (a row).
    Horizontal,
    /// Children stacked top to bottom (a column).
    Vertical,
}

/// Cross-axis placement of children.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlignItems {
    /// Flush with the leading cross edge.
    #[default]
    Start,
    /// Centered on the cross axis.
    Center,
    /// Flush with the trailing cross edge.
    End,
}

impl AlignItems {
    /// Offset of a child of `child` extent inside a container of
    /// `container` extent.
    #[must_use]
    pub fn offset(self, container: f32, child: f32) -> f32 {
        match self {
            Self::Start => 0.0,
            Self::Center => (container - child) / 2.0,
            Self::End => container - child,
        }
    }
}

/// Parameters of a column or row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisBox {
    /// Space between consecutive children along the main axis.
    pub gap: f32,
    /// Cross-axis alignment.
    pub align_items: AlignItems,
    /// Rows only: move children that do not fit onto a new line.
    pub wrap: bool,
}

impl AxisBox {
    /// Start-aligned, no gap, no wrapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap.
    #[must_use]
    pub const fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Set the cross-axis alignment.
    #[must_use]
    pub const fn with_align(mut self, align_items: AlignItems) -> Self {
        self.align_items = align_items;
        self
    }

    /// Enable or disable wrapping.
    #[must_use]
    pub const fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }
}

impl Document {
    /// Stack children vertically inside the content rectangle starting at
    /// `(x, y)`.
    pub(crate) fn arrange_column(
        &mut self,
        ctx: LayoutContext<'_>,
        id: NodeId,
        axis: AxisBox,
        x: f32,
        y: f32,
        available_width: f32,
    ) -> Rect {
        let full_width = self.tree.data(id).is_some_and(|block| block.full_width);
        let children = self.tree.children(id).to_vec();
        let mut cursor = y;
        let mut max_outer_width: f32 = 0.0;

        for (index, &child) in children.iter().enumerate() {
            if index > 0 {
                cursor += axis.gap;
            }
            let margin = self.margin_of(child);
            let bounds = self.layout_block(
                ctx,
                child,
                x + margin.left,
                cursor + margin.top,
                (available_width - margin.horizontal()).max(0.0),
            );
            cursor = bounds.bottom() + margin.bottom;
            max_outer_width = max_outer_width.max(bounds.width + margin.horizontal());
        }

        let cross = if full_width {
            available_width.max(max_outer_width)
        } else {
            max_outer_width
        };

        if axis.align_items != AlignItems::Start {
            for &child in &children {
                let margin = self.margin_of(child);
                let bounds = self.bounds_of(child);
                let offset = axis
                    .align_items
                    .offset(cross, bounds.width + margin.horizontal());
                self.set_layout_pos(child, x + offset + margin.left, bounds.y);
            }
        }

        Rect::new(x, y, cross, cursor - y)
    }

    /// Place children side by side, wrapping onto new lines when enabled.
    ///
    /// The height of a line is the tallest margin box on it.
    pub(crate) fn arrange_row(
        &mut self,
        ctx: LayoutContext<'_>,
        id: NodeId,
        axis: AxisBox,
        x: f32,
        y: f32,
        available_width: f32,
    ) -> Rect {
        let children = self.tree.children(id).to_vec();
        let right_edge = x + available_width;
        let mut cursor = x;
        let mut line_top = y;
        let mut line_height: f32 = 0.0;
        let mut max_right = x;
        let mut line: Vec<NodeId> = Vec::new();

        for &child in &children {
            let margin = self.margin_of(child);
            if !line.is_empty() {
                cursor += axis.gap;
            }

            let mut bounds = self.layout_block(
                ctx,
                child,
                cursor + margin.left,
                line_top + margin.top,
                (right_edge - cursor - margin.horizontal()).max(0.0),
            );

            if axis.wrap && !line.is_empty() && bounds.right() + margin.right > right_edge {
                self.align_line(&line, axis.align_items, line_top, line_height);
                line.clear();
                line_top += line_height + axis.gap;
                line_height = 0.0;
                bounds = self.layout_block(
                    ctx,
                    child,
                    x + margin.left,
                    line_top + margin.top,
                    (available_width - margin.horizontal()).max(0.0),
                );
            }

            cursor = bounds.right() + margin.right;
            line_height = line_height.max(bounds.height + margin.vertical());
            max_right = max_right.max(cursor);
            line.push(child);
        }

        self.align_line(&line, axis.align_items, line_top, line_height);

        let height = if children.is_empty() {
            0.0
        } else {
            line_top + line_height - y
        };
        Rect::new(x, y, max_right - x, height)
    }

    fn align_line(&mut self, line: &[NodeId], align: AlignItems, line_top: f32, line_height: f32) {
        if align == AlignItems::Start {
            return;
        }
        for &child in line {
            let margin = self.margin_of(child);
            let bounds = self.bounds_of(child);
            let offset = align.offset(line_height, bounds.height + margin.vertical());
            self.set_layout_pos(child, bounds.x, line_top + offset + margin.top);
        }
    }

    pub(crate) fn margin_of(&self, id: NodeId) -> EdgeSizes {
        self.tree.data(id).map_or(EdgeSizes::ZERO, |block| block.margin)
    }
}
