//! Slot grids: a fixed `columns × rows` array of optional item slots.
//!
//! Cells are addressed by `(column, row)` and stored row-major. Occupied
//! cells are also ordinary children of the grid's node, so ownership,
//! rendering and picking work the same way as for any other box. Slots sit
//! edge to edge with no gap.

use quire_common::warning::warn_once;
use quire_tree::NodeId;

use crate::block::{Block, BlockKind};
use crate::container::{BoxBlock, BoxLayout};
use crate::leaf::SlotBlock;
use crate::{Document, LayoutContext, Rect};

/// Cell storage of a slot grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGrid {
    columns: usize,
    rows: usize,
    cells: Vec<Option<NodeId>>,
    /// Draw a slot background where a cell is empty.
    pub render_empty_slots: bool,
}

impl SlotGrid {
    /// An empty grid.
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![None; columns * rows],
            render_empty_slots: false,
        }
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// The occupant of a cell. `None` when empty or out of range.
    #[must_use]
    pub fn get(&self, column: usize, row: usize) -> Option<NodeId> {
        self.index(column, row).and_then(|index| self.cells[index])
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| (index % self.columns, index / self.columns))
    }

    /// Occupied cells as `(column, row, slot)`, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, NodeId)> + '_ {
        self.cells.iter().enumerate().filter_map(|(index, cell)| {
            cell.map(|slot| (index % self.columns, index / self.columns, slot))
        })
    }

    /// Rectangle of a cell for a grid whose content starts at `(x, y)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell_rect(x: f32, y: f32, column: usize, row: usize) -> Rect {
        Rect::new(
            x + column as f32 * SlotBlock::OUTER_SIZE,
            y + row as f32 * SlotBlock::OUTER_SIZE,
            SlotBlock::OUTER_SIZE,
            SlotBlock::OUTER_SIZE,
        )
    }

    fn index(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.columns && row < self.rows).then(|| row * self.columns + column)
    }

    /// Forget the cell holding `slot`, if any.
    pub(crate) fn forget(&mut self, slot: NodeId) {
        for cell in &mut self.cells {
            if *cell == Some(slot) {
                *cell = None;
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Document {
    /// Place `slot` into cell `(column, row)` of a slot grid, or empty the
    /// cell with `None`.
    ///
    /// The previous occupant is detached first. A slot owned by another
    /// container is moved. Out-of-range coordinates, non-grid targets and
    /// non-slot blocks are logged and ignored.
    pub fn set_slot(&mut self, grid: NodeId, column: usize, row: usize, slot: Option<NodeId>) {
        let Some(index) = self.slot_grid(grid).and_then(|cells| cells.index(column, row)) else {
            warn_once(
                "slot-grid",
                &format!("cell ({column}, {row}) is outside the grid or the target is not a grid"),
            );
            return;
        };

        if let Some(slot) = slot {
            let is_slot = self
                .tree
                .data(slot)
                .is_some_and(|block| matches!(block.kind, BlockKind::Slot(_)));
            if !is_slot {
                warn_once("slot-grid", "only slot blocks can be placed in a slot grid");
                return;
            }
            if self.slot(grid, column, row) == Some(slot) {
                return;
            }
        }

        if let Some(previous) = self.slot(grid, column, row) {
            self.remove_child(grid, previous);
        }

        if let Some(slot) = slot {
            if let Some(owner) = self.tree.parent(slot) {
                self.remove_child(owner, slot);
            }
            self.tree.append_child(grid, slot);
            if let Some(cells) = self.slot_grid_mut(grid) {
                cells.cells[index] = Some(slot);
            }
        }
    }

    /// The slot in cell `(column, row)` of a grid.
    #[must_use]
    pub fn slot(&self, grid: NodeId, column: usize, row: usize) -> Option<NodeId> {
        self.slot_grid(grid)?.get(column, row)
    }

    /// Whether a grid paints backgrounds for empty cells.
    pub fn set_render_empty_slots(&mut self, grid: NodeId, render: bool) {
        if let Some(cells) = self.slot_grid_mut(grid) {
            cells.render_empty_slots = render;
        }
    }

    /// The cell storage of a slot-grid node.
    #[must_use]
    pub fn slot_grid(&self, id: NodeId) -> Option<&SlotGrid> {
        match &self.tree.data(id)?.kind {
            BlockKind::Box(BoxBlock {
                layout: BoxLayout::SlotGrid(grid),
                ..
            }) => Some(grid),
            _ => None,
        }
    }

    pub(crate) fn slot_grid_mut(&mut self, id: NodeId) -> Option<&mut SlotGrid> {
        self.tree
            .data_mut(id)
            .and_then(Block::as_box_mut)
            .and_then(|container| match &mut container.layout {
                BoxLayout::SlotGrid(grid) => Some(grid),
                _ => None,
            })
    }

    /// Lay out every occupied cell at its grid position. The grid's size
    /// does not depend on which cells are occupied.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn arrange_slot_grid(
        &mut self,
        ctx: LayoutContext<'_>,
        id: NodeId,
        x: f32,
        y: f32,
    ) -> Rect {
        let Some(grid) = self.slot_grid(id) else {
            return Rect::new(x, y, 0.0, 0.0);
        };
        let (columns, rows) = (grid.columns, grid.rows);
        let occupied: Vec<_> = grid.occupied_cells().collect();

        for (column, row, slot) in occupied {
            let cell = SlotGrid::cell_rect(x, y, column, row);
            let _ = self.layout_block(ctx, slot, cell.x, cell.y, cell.width);
        }

        Rect::new(
            x,
            y,
            columns as f32 * SlotBlock::OUTER_SIZE,
            rows as f32 * SlotBlock::OUTER_SIZE,
        )
    }
}
