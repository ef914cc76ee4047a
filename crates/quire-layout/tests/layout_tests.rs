//! Integration tests for block, box and axis-box layout.

use quire_layout::{
    AlignItems, ApproximateTextMeasure, AxisBox, Block, BorderEdge, Borders, ColorValue, Document,
    EdgeSizes, InlineFlow, ItemStack, LayoutContext, NodeId, Rect, SlotBlock, TextureRegion,
};

fn ctx() -> LayoutContext<'static> {
    LayoutContext::new(&ApproximateTextMeasure)
}

fn sprite(width: f32, height: f32) -> Block {
    Block::sprite(TextureRegion::whole("test"), width, height)
}

/// Create `block` and append it to `parent`.
fn add(doc: &mut Document, parent: NodeId, block: Block) -> NodeId {
    let id = doc.create(block);
    doc.append_child(parent, id);
    id
}

// ---------------------------------------------------------------------------
// Block contract
// ---------------------------------------------------------------------------

#[test]
fn test_full_width_block_is_widened() {
    let mut doc = Document::new();
    let id = doc.create(sprite(30.0, 10.0).with_full_width(true));

    let bounds = doc.layout_block(ctx(), id, 4.0, 6.0, 100.0);

    assert_eq!(bounds, Rect::new(4.0, 6.0, 100.0, 10.0));
    assert_eq!(doc.bounds_of(id), bounds);
}

#[test]
fn test_full_width_never_narrows() {
    let mut doc = Document::new();
    let id = doc.create(sprite(130.0, 10.0).with_full_width(true));

    let bounds = doc.layout_block(ctx(), id, 0.0, 0.0, 100.0);

    assert_eq!(bounds.width, 130.0);
}

#[test]
fn test_not_full_width_keeps_computed_width() {
    let mut doc = Document::new();
    let id = doc.create(sprite(30.0, 10.0));

    let bounds = doc.layout_block(ctx(), id, 0.0, 0.0, 100.0);

    assert_eq!(bounds, Rect::new(0.0, 0.0, 30.0, 10.0));
}

#[test]
fn test_layout_is_idempotent() {
    let mut doc = Document::new();
    let row = doc.create(Block::row(AxisBox::new().with_gap(3.0).with_wrap(true)));
    for width in [20.0, 35.0, 50.0, 15.0] {
        let _ = add(&mut doc, row, sprite(width, width / 2.0));
    }

    let first = doc.layout_block(ctx(), row, 0.0, 0.0, 70.0);
    let first_children: Vec<Rect> = doc.children(row).iter().map(|&c| doc.bounds_of(c)).collect();
    let second = doc.layout_block(ctx(), row, 0.0, 0.0, 70.0);
    let second_children: Vec<Rect> = doc.children(row).iter().map(|&c| doc.bounds_of(c)).collect();

    assert_eq!(first, second);
    assert_eq!(first_children, second_children);
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

#[test]
fn test_column_stacks_with_gap() {
    let mut doc = Document::new();
    let column = doc.create(Block::column(AxisBox::new().with_gap(5.0)));
    let a = add(&mut doc, column, sprite(10.0, 10.0).with_full_width(true));
    let b = add(&mut doc, column, sprite(10.0, 20.0).with_full_width(true));
    let c = add(&mut doc, column, sprite(10.0, 30.0).with_full_width(true));

    let bounds = doc.layout_block(ctx(), column, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(a), Rect::new(0.0, 0.0, 100.0, 10.0));
    assert_eq!(doc.bounds_of(b), Rect::new(0.0, 15.0, 100.0, 20.0));
    assert_eq!(doc.bounds_of(c), Rect::new(0.0, 40.0, 100.0, 30.0));
    assert_eq!(bounds.height, 70.0);
}

#[test]
fn test_empty_column_has_no_height() {
    let mut doc = Document::new();
    let column = doc.create(Block::column(AxisBox::new().with_gap(5.0)));

    let bounds = doc.layout_block(ctx(), column, 0.0, 0.0, 100.0);

    assert_eq!(bounds, Rect::new(0.0, 0.0, 0.0, 0.0));
}

#[test]
fn test_column_applies_child_margins() {
    let mut doc = Document::new();
    let column = doc.create(Block::column(AxisBox::new().with_gap(2.0)));
    let a = add(
        &mut doc,
        column,
        sprite(10.0, 10.0).with_margin(EdgeSizes::new(1.0, 2.0, 3.0, 4.0)),
    );
    let b = add(&mut doc, column, sprite(10.0, 10.0));

    let bounds = doc.layout_block(ctx(), column, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(a), Rect::new(4.0, 1.0, 10.0, 10.0));
    // 1 + 10 + 3 (margin box) + 2 (gap)
    assert_eq!(doc.bounds_of(b), Rect::new(0.0, 16.0, 10.0, 10.0));
    assert_eq!(bounds, Rect::new(0.0, 0.0, 16.0, 26.0));
}

#[test]
fn test_column_margins_reduce_child_width() {
    let mut doc = Document::new();
    let column = doc.create(Block::column(AxisBox::new()));
    let child = add(
        &mut doc,
        column,
        Block::thematic_break().with_margin(EdgeSizes::new(0.0, 10.0, 0.0, 15.0)),
    );

    let _ = doc.layout_block(ctx(), column, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(child).x, 15.0);
    assert_eq!(doc.bounds_of(child).width, 75.0);
}

#[test]
fn test_column_center_alignment() {
    let mut doc = Document::new();
    let column = doc.create(
        Block::column(AxisBox::new().with_align(AlignItems::Center)).with_full_width(true),
    );
    let narrow = add(&mut doc, column, sprite(20.0, 5.0));
    let wide = add(&mut doc, column, sprite(60.0, 5.0));

    let _ = doc.layout_block(ctx(), column, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(narrow).x, 40.0);
    assert_eq!(doc.bounds_of(wide).x, 20.0);
}

#[test]
fn test_column_end_alignment_uses_widest_child_when_not_full_width() {
    let mut doc = Document::new();
    let column = doc.create(Block::column(AxisBox::new().with_align(AlignItems::End)));
    let narrow = add(&mut doc, column, sprite(20.0, 5.0));
    let wide = add(&mut doc, column, sprite(60.0, 5.0));

    let bounds = doc.layout_block(ctx(), column, 0.0, 0.0, 100.0);

    assert_eq!(bounds.width, 60.0);
    assert_eq!(doc.bounds_of(narrow).x, 40.0);
    assert_eq!(doc.bounds_of(wide).x, 0.0);
}

#[test]
fn test_zero_width_children_are_still_laid_out() {
    let mut doc = Document::new();
    let column = doc.create(Block::column(AxisBox::new()));
    let child = add(
        &mut doc,
        column,
        Block::thematic_break().with_margin(EdgeSizes::new(0.0, 80.0, 0.0, 80.0)),
    );

    let _ = doc.layout_block(ctx(), column, 0.0, 0.0, 100.0);

    let bounds = doc.bounds_of(child);
    assert_eq!(bounds.x, 80.0);
    assert_eq!(bounds.width, 0.0);
    assert_eq!(bounds.height, 6.0);
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

#[test]
fn test_row_places_children_side_by_side() {
    let mut doc = Document::new();
    let row = doc.create(Block::row(AxisBox::new().with_gap(4.0)));
    let a = add(&mut doc, row, sprite(10.0, 10.0));
    let b = add(&mut doc, row, sprite(20.0, 30.0));

    let bounds = doc.layout_block(ctx(), row, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(a), Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(doc.bounds_of(b), Rect::new(14.0, 0.0, 20.0, 30.0));
    assert_eq!(bounds, Rect::new(0.0, 0.0, 34.0, 30.0));
}

#[test]
fn test_row_without_wrap_overflows() {
    let mut doc = Document::new();
    let row = doc.create(Block::row(AxisBox::new()));
    let _ = add(&mut doc, row, sprite(60.0, 10.0));
    let b = add(&mut doc, row, sprite(60.0, 10.0));

    let bounds = doc.layout_block(ctx(), row, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(b).x, 60.0);
    assert_eq!(bounds.height, 10.0);
}

#[test]
fn test_row_wraps_at_child_boundaries() {
    let mut doc = Document::new();
    let row = doc.create(Block::row(AxisBox::new().with_gap(5.0).with_wrap(true)));
    let a = add(&mut doc, row, sprite(40.0, 10.0));
    let b = add(&mut doc, row, sprite(40.0, 20.0));
    let c = add(&mut doc, row, sprite(40.0, 10.0));

    let bounds = doc.layout_block(ctx(), row, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(a), Rect::new(0.0, 0.0, 40.0, 10.0));
    assert_eq!(doc.bounds_of(b), Rect::new(45.0, 0.0, 40.0, 20.0));
    // New line: tallest on the previous line (20) plus gap (5).
    assert_eq!(doc.bounds_of(c), Rect::new(0.0, 25.0, 40.0, 10.0));
    assert_eq!(bounds, Rect::new(0.0, 0.0, 85.0, 35.0));
}

#[test]
fn test_row_line_height_includes_margins() {
    let mut doc = Document::new();
    let row = doc.create(Block::row(AxisBox::new().with_wrap(true)));
    let _ = add(
        &mut doc,
        row,
        sprite(60.0, 10.0).with_margin(EdgeSizes::new(0.0, 0.0, 8.0, 0.0)),
    );
    let second = add(&mut doc, row, sprite(60.0, 10.0));

    let _ = doc.layout_block(ctx(), row, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(second).y, 18.0);
}

#[test]
fn test_row_center_alignment_per_line() {
    let mut doc = Document::new();
    let row = doc.create(Block::row(AxisBox::new().with_align(AlignItems::Center)));
    let short = add(&mut doc, row, sprite(10.0, 10.0));
    let tall = add(&mut doc, row, sprite(10.0, 30.0));

    let _ = doc.layout_block(ctx(), row, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(short).y, 10.0);
    assert_eq!(doc.bounds_of(tall).y, 0.0);
}

// ---------------------------------------------------------------------------
// Box insets
// ---------------------------------------------------------------------------

#[test]
fn test_padding_and_borders_inset_content() {
    let mut doc = Document::new();
    let edge = BorderEdge::new(2.0, ColorValue::BLACK);
    let column = doc.create(
        Block::column(AxisBox::new())
            .with_padding(EdgeSizes::uniform(3.0))
            .with_borders(Borders::uniform(&edge)),
    );
    let child = add(&mut doc, column, sprite(10.0, 10.0));

    let bounds = doc.layout_block(ctx(), column, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(child), Rect::new(5.0, 5.0, 10.0, 10.0));
    assert_eq!(bounds, Rect::new(0.0, 0.0, 20.0, 20.0));
}

#[test]
fn test_nested_full_width_respects_parent_insets() {
    let mut doc = Document::new();
    let outer = doc.create(
        Block::column(AxisBox::new())
            .with_padding(EdgeSizes::uniform(10.0))
            .with_full_width(true),
    );
    let inner = add(&mut doc, outer, Block::column(AxisBox::new()).with_full_width(true));

    let bounds = doc.layout_block(ctx(), outer, 0.0, 0.0, 100.0);

    assert_eq!(doc.bounds_of(inner), Rect::new(10.0, 10.0, 80.0, 0.0));
    assert_eq!(bounds, Rect::new(0.0, 0.0, 100.0, 20.0));
}

// ---------------------------------------------------------------------------
// Slot grids, placeholders, flows
// ---------------------------------------------------------------------------

#[test]
fn test_slot_grid_size_ignores_occupancy() {
    let mut doc = Document::new();
    let grid = doc.create(Block::slot_grid(2, 1));
    let slot = doc.create(Block::slot(None));
    doc.set_slot(grid, 1, 0, Some(slot));

    let bounds = doc.layout_block(ctx(), grid, 0.0, 0.0, 100.0);

    assert_eq!(
        bounds,
        Rect::new(0.0, 0.0, 2.0 * SlotBlock::OUTER_SIZE, SlotBlock::OUTER_SIZE)
    );
    assert_eq!(
        doc.bounds_of(slot),
        Rect::new(SlotBlock::OUTER_SIZE, 0.0, SlotBlock::OUTER_SIZE, SlotBlock::OUTER_SIZE)
    );
}

#[test]
fn test_placeholder_takes_size_of_current_child() {
    let mut doc = Document::new();
    let (placeholder, _sender) = doc.new_placeholder();
    let content = doc.create(sprite(25.0, 12.0));
    doc.set_placeholder_content(placeholder, content);

    let bounds = doc.layout_block(ctx(), placeholder, 3.0, 4.0, 100.0);

    assert_eq!(bounds, Rect::new(3.0, 4.0, 25.0, 12.0));
    assert_eq!(doc.bounds_of(content), bounds);
}

#[test]
fn test_flow_lays_out_inline_block_on_the_line() {
    let mut doc = Document::new();
    let icon = doc.create(Block::item_image(ItemStack::new("apple", "Apple"), 1.0));
    // Default font size 9: each char is 5.4px wide, a line 10.8px tall.
    let flow = doc.create(Block::flow(InlineFlow::new().text("ab").block(icon)));

    let bounds = doc.layout_block(ctx(), flow, 0.0, 0.0, 200.0);

    let icon_bounds = doc.bounds_of(icon);
    assert_eq!(icon_bounds.width, 16.0);
    assert_eq!(icon_bounds.y, 0.0);
    assert!(icon_bounds.x > 0.0);
    assert_eq!(bounds.height, 16.0);
}

// ---------------------------------------------------------------------------
// Moving laid-out blocks
// ---------------------------------------------------------------------------

#[test]
fn test_set_layout_pos_moves_descendants() {
    let mut doc = Document::new();
    let outer = doc.create(Block::column(AxisBox::new()));
    let inner = add(&mut doc, outer, Block::row(AxisBox::new()));
    let leaf = add(&mut doc, inner, sprite(10.0, 10.0));
    let _ = doc.layout_block(ctx(), outer, 0.0, 0.0, 100.0);

    doc.set_layout_pos(outer, 30.0, 40.0);

    assert_eq!(doc.bounds_of(outer).x, 30.0);
    assert_eq!(doc.bounds_of(inner), Rect::new(30.0, 40.0, 10.0, 10.0));
    assert_eq!(doc.bounds_of(leaf), Rect::new(30.0, 40.0, 10.0, 10.0));
}

#[test]
fn test_set_layout_pos_moves_inline_runs() {
    let mut doc = Document::new();
    let flow = doc.create(Block::flow(InlineFlow::new().text("hello")));
    let _ = doc.layout_block(ctx(), flow, 0.0, 0.0, 200.0);
    let before = doc.inline_runs(flow)[0].bounds;

    doc.set_layout_pos(flow, 10.0, 20.0);

    assert_eq!(doc.inline_runs(flow)[0].bounds, before.translate(10.0, 20.0));
}
