//! JSON page descriptions and the builder that turns them into blocks.
//!
//! A page is a list of block specs. Every spec carries the shared box-model
//! fields (margin, borders, full width) next to a `type` tag selecting the
//! block kind:
//!
//! ```json
//! { "type": "row", "gap": 2, "margin": { "top": 4 }, "children": [
//!     { "type": "slot", "item": { "item": "stone", "display_name": "Stone" } }
//! ] }
//! ```
//!
//! `deferred` blocks become placeholders completed from a worker thread
//! after `delay_ms`, which is how the CLI exercises asynchronous content.

use std::thread;
use std::time::Duration;

use quire_common::image::ImageRef;
use quire_common::warning::warn_once;
use quire_layout::{
    Axis, AxisBox, Block, Borders, ColorValue, Document, EdgeSizes, InlineFlow, InlineItem,
    InteractionContext, InteractiveElement, ItemStack, NodeId, TextureRegion,
};
use serde::Deserialize;

/// A page: top-level blocks in order.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Shown in the header of the layout dump.
    #[serde(default)]
    pub title: Option<String>,
    /// Top-level blocks.
    pub blocks: Vec<BlockSpec>,
}

/// One block and its subtree.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockSpec {
    #[serde(flatten)]
    common: CommonSpec,
    #[serde(flatten)]
    kind: KindSpec,
}

/// Fields every block accepts.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct CommonSpec {
    margin: EdgeSizes,
    borders: Borders,
    full_width: bool,
    /// Message logged when the block is clicked. Makes it interactive.
    on_click: Option<String>,
}

/// Padding and background of boxes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BoxStyle {
    padding: EdgeSizes,
    background: Option<ColorValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum KindSpec {
    Column {
        #[serde(flatten)]
        params: AxisBox,
        #[serde(flatten)]
        style: BoxStyle,
        #[serde(default)]
        children: Vec<BlockSpec>,
    },
    Row {
        #[serde(flatten)]
        params: AxisBox,
        #[serde(flatten)]
        style: BoxStyle,
        #[serde(default)]
        children: Vec<BlockSpec>,
    },
    Stack {
        axis: Axis,
        #[serde(flatten)]
        params: AxisBox,
        #[serde(flatten)]
        style: BoxStyle,
        #[serde(default)]
        children: Vec<BlockSpec>,
    },
    SlotGrid {
        columns: usize,
        rows: usize,
        #[serde(default)]
        render_empty_slots: bool,
        #[serde(flatten)]
        style: BoxStyle,
        #[serde(default)]
        slots: Vec<SlotCell>,
    },
    Paragraph {
        #[serde(flatten)]
        style: BoxStyle,
        runs: Vec<RunSpec>,
    },
    Image {
        id: String,
        width: u32,
        height: u32,
        #[serde(default)]
        display_width: Option<f32>,
        #[serde(default)]
        display_height: Option<f32>,
        #[serde(default)]
        title: Option<String>,
    },
    Sprite {
        texture: String,
        width: f32,
        height: f32,
    },
    Slot {
        #[serde(default)]
        item: Option<ItemStack>,
    },
    ThematicBreak,
    ItemImage {
        item: ItemStack,
        #[serde(default = "default_scale")]
        scale: f32,
    },
    Scene {
        scene: String,
        width: f32,
        height: f32,
    },
    Label {
        text: String,
        #[serde(default)]
        color: Option<ColorValue>,
    },
    Deferred {
        #[serde(default)]
        delay_ms: u64,
        /// Fail with this message instead of delivering `content`.
        #[serde(default)]
        fail: Option<String>,
        content: Box<BlockSpec>,
    },
}

const fn default_scale() -> f32 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
struct SlotCell {
    column: usize,
    row: usize,
    #[serde(default)]
    item: Option<ItemStack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RunSpec {
    Block {
        block: Box<BlockSpec>,
    },
    Text {
        text: String,
        #[serde(default)]
        color: Option<ColorValue>,
        #[serde(default)]
        tooltip: Option<String>,
    },
}

/// Logs a message when clicked.
struct ClickLogger {
    message: String,
}

impl InteractiveElement for ClickLogger {
    fn mouse_entered(&mut self, cx: &mut InteractionContext<'_>) {
        log::debug!("hover entered {}", cx.node());
    }

    fn mouse_left(&mut self, cx: &mut InteractionContext<'_>) {
        log::debug!("hover left {}", cx.node());
    }

    fn mouse_clicked(&mut self, cx: &mut InteractionContext<'_>, x: f32, y: f32) -> bool {
        log::info!("{} clicked at ({x}, {y}): {}", cx.node(), self.message);
        true
    }
}

/// Append every block of `page` to the document's top level.
pub fn build(doc: &mut Document, page: &Page) {
    let root = doc.root();
    for spec in &page.blocks {
        let id = build_block(doc, spec);
        doc.append_child(root, id);
    }
}

/// Create the subtree for `spec` and return its root node.
pub fn build_block(doc: &mut Document, spec: &BlockSpec) -> NodeId {
    let common = &spec.common;
    match &spec.kind {
        KindSpec::Column {
            params,
            style,
            children,
        } => build_box(doc, common, style, Block::column(*params), children),
        KindSpec::Row {
            params,
            style,
            children,
        } => build_box(doc, common, style, Block::row(*params), children),
        KindSpec::Stack {
            axis,
            params,
            style,
            children,
        } => build_box(doc, common, style, Block::stack(*axis, *params), children),
        KindSpec::SlotGrid {
            columns,
            rows,
            render_empty_slots,
            style,
            slots,
        } => {
            let block = style.apply(Block::slot_grid(*columns, *rows));
            let grid = doc.create(decorate(common, block));
            doc.set_render_empty_slots(grid, *render_empty_slots);
            for cell in slots {
                let slot = doc.create(Block::slot(cell.item.clone()));
                doc.set_slot(grid, cell.column, cell.row, Some(slot));
            }
            grid
        }
        KindSpec::Paragraph { style, runs } => {
            let mut flow = InlineFlow::new();
            for run in runs {
                flow = match run {
                    RunSpec::Text {
                        text,
                        color,
                        tooltip,
                    } => flow.item(InlineItem::Text {
                        text: text.clone(),
                        color: *color,
                        tooltip: tooltip.clone(),
                    }),
                    RunSpec::Block { block } => {
                        let inline = build_block(doc, block);
                        flow.block(inline)
                    }
                };
            }
            doc.create(decorate(common, style.apply(Block::flow(flow))))
        }
        KindSpec::Image {
            id,
            width,
            height,
            display_width,
            display_height,
            title,
        } => {
            let mut image = Block::image(ImageRef::new(id.clone(), *width, *height))
                .with_image_size(*display_width, *display_height);
            if let Some(title) = title {
                image = image.with_title(title.clone());
            }
            doc.create(decorate(common, image))
        }
        KindSpec::Sprite {
            texture,
            width,
            height,
        } => doc.create(decorate(
            common,
            Block::sprite(TextureRegion::whole(texture.clone()), *width, *height),
        )),
        KindSpec::Slot { item } => doc.create(decorate(common, Block::slot(item.clone()))),
        KindSpec::ThematicBreak => doc.create(decorate(common, Block::thematic_break())),
        KindSpec::ItemImage { item, scale } => {
            doc.create(decorate(common, Block::item_image(item.clone(), *scale)))
        }
        KindSpec::Scene {
            scene,
            width,
            height,
        } => doc.create(decorate(common, Block::scene(scene.clone(), *width, *height))),
        KindSpec::Label { text, color } => {
            let color = color.unwrap_or(doc.config().text_color);
            doc.create(decorate(common, Block::label(text.clone(), color)))
        }
        KindSpec::Deferred {
            delay_ms,
            fail,
            content,
        } => build_deferred(doc, common, *delay_ms, fail.clone(), content),
    }
}

fn build_box(
    doc: &mut Document,
    common: &CommonSpec,
    style: &BoxStyle,
    block: Block,
    children: &[BlockSpec],
) -> NodeId {
    let id = doc.create(decorate(common, style.apply(block)));
    for child in children {
        let child = build_block(doc, child);
        doc.append_child(id, child);
    }
    id
}

fn build_deferred(
    doc: &mut Document,
    common: &CommonSpec,
    delay_ms: u64,
    fail: Option<String>,
    content: &BlockSpec,
) -> NodeId {
    let (placeholder, sender) = doc.new_placeholder();
    if let Some(block) = doc.block_mut(placeholder) {
        block.margin = common.margin;
        block.full_width = common.full_width;
    }
    if common.borders != Borders::default() {
        warn_once("page", "borders on a deferred block are ignored");
    }

    let content = content.clone();
    let _ = thread::spawn(move || {
        thread::sleep(Duration::from_millis(delay_ms));
        match fail {
            Some(message) => sender.fail_with(message),
            None => sender.complete(move |doc| build_block(doc, &content)),
        }
    });
    placeholder
}

impl BoxStyle {
    fn apply(&self, mut block: Block) -> Block {
        block = block.with_padding(self.padding);
        if let Some(background) = self.background {
            block = block.with_background(background);
        }
        block
    }
}

fn decorate(common: &CommonSpec, block: Block) -> Block {
    let block = block
        .with_margin(common.margin)
        .with_borders(common.borders.clone())
        .with_full_width(common.full_width);
    match &common.on_click {
        Some(message) => block.with_interaction(ClickLogger {
            message: message.clone(),
        }),
        None => block,
    }
}
