//! Blocks: the payload of every node in a document tree.
//!
//! A [`Block`] carries the box-model properties shared by every layout
//! entity (margin, borders, the full-width flag and the computed `bounds`)
//! plus a [`BlockKind`] describing what it actually is. The set of kinds is
//! closed; behavior is dispatched by matching on it.

use std::fmt;

use quire_common::image::ImageRef;
use quire_common::warning::warn_once;

use crate::axis::{Axis, AxisBox};
use crate::container::{BoxBlock, BoxLayout};
use crate::flow::{FlowBox, FlowContent};
use crate::interaction::InteractiveElement;
use crate::leaf::{
    ImageBlock, ItemImageBlock, ItemStack, LabelBlock, SceneBlock, SlotBlock, SpriteBlock,
    TextureRegion,
};
use crate::placeholder::PlaceholderBlock;
use crate::slot_grid::SlotGrid;
use crate::{Borders, ColorValue, EdgeSizes, Rect};

/// What a block is.
#[derive(Debug)]
pub enum BlockKind {
    /// A container with padding, background and a box layout.
    Box(BoxBlock),
    /// A stand-in whose single child is swapped when async content arrives.
    Placeholder(PlaceholderBlock),
    /// An image.
    Image(ImageBlock),
    /// A fixed-size texture region.
    Sprite(SpriteBlock),
    /// An item slot.
    Slot(SlotBlock),
    /// A horizontal rule.
    ThematicBreak,
    /// An item icon.
    ItemImage(ItemImageBlock),
    /// An embedded scene viewport.
    Scene(SceneBlock),
    /// One line of text.
    Label(LabelBlock),
}

/// A layout entity.
///
/// `bounds` is only meaningful after the owning document has laid the block
/// out for the current width; it is written exclusively by layout and by
/// position adjustments that translate already computed geometry.
pub struct Block {
    /// Space kept around the border box by the containing layout.
    pub margin: EdgeSizes,
    /// The four border edges.
    pub borders: Borders,
    /// Widen to the available width when the computed width is smaller.
    pub full_width: bool,
    /// What this block is.
    pub kind: BlockKind,
    bounds: Rect,
    interaction: Option<Box<dyn InteractiveElement>>,
}

impl Block {
    /// A block of the given kind with no margin or borders.
    #[must_use]
    pub fn new(kind: BlockKind) -> Self {
        Self {
            margin: EdgeSizes::ZERO,
            borders: Borders::default(),
            full_width: false,
            kind,
            bounds: Rect::default(),
            interaction: None,
        }
    }

    /// A vertical stack.
    #[must_use]
    pub fn column(axis: AxisBox) -> Self {
        Self::new(BlockKind::Box(BoxBlock::new(BoxLayout::Column(axis))))
    }

    /// A horizontal stack.
    #[must_use]
    pub fn row(axis: AxisBox) -> Self {
        Self::new(BlockKind::Box(BoxBlock::new(BoxLayout::Row(axis))))
    }

    /// An axis box along `axis`.
    #[must_use]
    pub fn stack(axis: Axis, params: AxisBox) -> Self {
        Self::new(BlockKind::Box(BoxBlock::new(BoxLayout::axis(axis, params))))
    }

    /// An empty `columns × rows` slot grid.
    #[must_use]
    pub fn slot_grid(columns: usize, rows: usize) -> Self {
        Self::new(BlockKind::Box(BoxBlock::new(BoxLayout::SlotGrid(
            SlotGrid::new(columns, rows),
        ))))
    }

    /// A flow container around externally provided inline content.
    #[must_use]
    pub fn flow(content: impl FlowContent + 'static) -> Self {
        Self::new(BlockKind::Box(BoxBlock::new(BoxLayout::Flow(FlowBox::new(
            Box::new(content),
        )))))
    }

    /// An image at its intrinsic size.
    #[must_use]
    pub fn image(image: ImageRef) -> Self {
        Self::new(BlockKind::Image(ImageBlock {
            image,
            width: None,
            height: None,
            title: None,
        }))
    }

    /// A fixed-size sprite.
    #[must_use]
    pub fn sprite(region: TextureRegion, width: f32, height: f32) -> Self {
        Self::new(BlockKind::Sprite(SpriteBlock {
            region,
            width,
            height,
        }))
    }

    /// An item slot.
    #[must_use]
    pub fn slot(stack: Option<ItemStack>) -> Self {
        Self::new(BlockKind::Slot(SlotBlock { stack }))
    }

    /// A thematic break.
    #[must_use]
    pub fn thematic_break() -> Self {
        Self::new(BlockKind::ThematicBreak)
    }

    /// An item icon at `scale` times the base icon size.
    #[must_use]
    pub fn item_image(stack: ItemStack, scale: f32) -> Self {
        Self::new(BlockKind::ItemImage(ItemImageBlock { stack, scale }))
    }

    /// An embedded scene viewport.
    #[must_use]
    pub fn scene(scene: impl Into<String>, width: f32, height: f32) -> Self {
        Self::new(BlockKind::Scene(SceneBlock {
            scene: scene.into(),
            width,
            height,
        }))
    }

    /// A single line of text.
    #[must_use]
    pub fn label(text: impl Into<String>, color: ColorValue) -> Self {
        Self::new(BlockKind::Label(LabelBlock {
            text: text.into(),
            color,
        }))
    }

    /// Set the margin.
    #[must_use]
    pub const fn with_margin(mut self, margin: EdgeSizes) -> Self {
        self.margin = margin;
        self
    }

    /// Set the borders of a box. Ignored for other kinds.
    #[must_use]
    pub fn with_borders(mut self, borders: Borders) -> Self {
        if matches!(self.kind, BlockKind::Box(_)) {
            self.borders = borders;
        } else if borders != Borders::default() {
            warn_once("block", "borders only apply to boxes");
        }
        self
    }

    /// Set the full-width flag.
    #[must_use]
    pub const fn with_full_width(mut self, full_width: bool) -> Self {
        self.full_width = full_width;
        self
    }

    /// Set the padding of a box. Ignored for other kinds.
    #[must_use]
    pub fn with_padding(mut self, padding: EdgeSizes) -> Self {
        match &mut self.kind {
            BlockKind::Box(container) => container.padding = padding,
            _ => warn_once("block", "padding only applies to boxes"),
        }
        self
    }

    /// Set the background of a box. Ignored for other kinds.
    #[must_use]
    pub fn with_background(mut self, color: ColorValue) -> Self {
        match &mut self.kind {
            BlockKind::Box(container) => container.background = Some(color),
            _ => warn_once("block", "backgrounds only apply to boxes"),
        }
        self
    }

    /// Attach an interaction handler.
    #[must_use]
    pub fn with_interaction(mut self, handler: impl InteractiveElement + 'static) -> Self {
        self.interaction = Some(Box::new(handler));
        self
    }

    /// Set an image's explicit display size. Ignored for other kinds.
    #[must_use]
    pub fn with_image_size(mut self, width: Option<f32>, height: Option<f32>) -> Self {
        if let BlockKind::Image(image) = &mut self.kind {
            image.width = width;
            image.height = height;
        }
        self
    }

    /// Set an image's tooltip title. Ignored for other kinds.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        if let BlockKind::Image(image) = &mut self.kind {
            image.title = Some(title.into());
        }
        self
    }

    /// The border box computed by the last layout.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    pub(crate) const fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// True when the block lies completely outside `viewport`.
    #[must_use]
    pub fn is_culled(&self, viewport: &Rect) -> bool {
        !self.bounds.intersects(viewport)
    }

    /// The box part of this block, if it is one.
    #[must_use]
    pub const fn as_box(&self) -> Option<&BoxBlock> {
        match &self.kind {
            BlockKind::Box(container) => Some(container),
            _ => None,
        }
    }

    pub(crate) const fn as_box_mut(&mut self) -> Option<&mut BoxBlock> {
        match &mut self.kind {
            BlockKind::Box(container) => Some(container),
            _ => None,
        }
    }

    /// Whether an interaction handler is attached.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interaction.is_some()
    }

    pub(crate) fn interaction_mut(&mut self) -> Option<&mut (dyn InteractiveElement + 'static)> {
        self.interaction.as_deref_mut()
    }

    pub(crate) fn interaction(&self) -> Option<&(dyn InteractiveElement + 'static)> {
        self.interaction.as_deref()
    }

    /// Short name of the kind, as shown in snapshots and logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match &self.kind {
            BlockKind::Box(container) => container.layout.name(),
            BlockKind::Placeholder(_) => "placeholder",
            BlockKind::Image(_) => "image",
            BlockKind::Sprite(_) => "sprite",
            BlockKind::Slot(_) => "slot",
            BlockKind::ThematicBreak => "thematic-break",
            BlockKind::ItemImage(_) => "item-image",
            BlockKind::Scene(_) => "scene",
            BlockKind::Label(_) => "label",
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("kind", &self.kind)
            .field("bounds", &self.bounds)
            .field("margin", &self.margin)
            .field("borders", &self.borders)
            .field("full_width", &self.full_width)
            .field("interactive", &self.interaction.is_some())
            .finish()
    }
}
