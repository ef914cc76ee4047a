//! Leaf content blocks: images, sprites, item slots, thematic breaks, item
//! icons, embedded scenes and one-line labels.
//!
//! Leaves have no children. Each computes its own rectangle from the
//! available width and intrinsic data, and renders itself with primitive
//! requests on a [`RenderContext`].

use quire_common::image::ImageRef;
use serde::{Deserialize, Serialize};

use crate::paint::{RenderContext, TextStyle};
use crate::{ColorValue, LayoutConfig, LayoutContext, Rect};

/// A region of a texture, in normalized UV coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureRegion {
    /// Texture lookup key.
    pub texture: String,
    /// Left UV coordinate.
    pub u0: f32,
    /// Top UV coordinate.
    pub v0: f32,
    /// Right UV coordinate.
    pub u1: f32,
    /// Bottom UV coordinate.
    pub v1: f32,
}

impl TextureRegion {
    /// The entire texture.
    #[must_use]
    pub fn whole(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            u0: 0.0,
            v0: 0.0,
            u1: 1.0,
            v1: 1.0,
        }
    }
}

/// An item stack shown in slots and item icons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Registry identifier of the item.
    pub item: String,
    /// Stack size.
    #[serde(default = "ItemStack::default_count")]
    pub count: u32,
    /// Human-readable name, used for tooltips.
    pub display_name: String,
}

impl ItemStack {
    /// A stack of one item.
    #[must_use]
    pub fn new(item: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            count: 1,
            display_name: display_name.into(),
        }
    }

    const fn default_count() -> u32 {
        1
    }
}

/// An image with optional explicit size and title.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBlock {
    /// The resolved image resource.
    pub image: ImageRef,
    /// Explicit width; the height follows the aspect ratio when not given.
    pub width: Option<f32>,
    /// Explicit height; the width follows the aspect ratio when not given.
    pub height: Option<f32>,
    /// Tooltip text.
    pub title: Option<String>,
}

impl ImageBlock {
    /// Preferred size, then scaled down (aspect preserved) to fit the
    /// available width.
    fn compute_layout(&self, x: f32, y: f32, available_width: f32) -> Rect {
        let (intrinsic_width, intrinsic_height) = self.image.dimensions_f32();
        let (mut width, mut height) = match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) if intrinsic_width > 0.0 => (w, w * intrinsic_height / intrinsic_width),
            (Some(w), None) => (w, intrinsic_height),
            (None, Some(h)) if intrinsic_height > 0.0 => {
                (h * intrinsic_width / intrinsic_height, h)
            }
            (None, Some(h)) => (intrinsic_width, h),
            (None, None) => (intrinsic_width, intrinsic_height),
        };

        if width > available_width && width > 0.0 {
            let fitted = available_width.max(0.0);
            height = height * fitted / width;
            width = fitted;
        }

        Rect::new(x, y, width, height)
    }
}

/// A fixed-size region of a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteBlock {
    /// What to draw.
    pub region: TextureRegion,
    /// Rendered width.
    pub width: f32,
    /// Rendered height.
    pub height: f32,
}

/// An inventory-style slot, optionally holding an item stack.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotBlock {
    /// The item shown in the slot.
    pub stack: Option<ItemStack>,
}

impl SlotBlock {
    /// Size of a slot including its 1px frame.
    pub const OUTER_SIZE: f32 = 18.0;
    /// Size of the item icon inside the frame.
    pub const INNER_SIZE: f32 = 16.0;
}

/// An item icon drawn at a multiple of the base icon size.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemImageBlock {
    /// The item to draw.
    pub stack: ItemStack,
    /// Multiplier on the 16px icon size.
    pub scale: f32,
}

/// An embedded 3D scene. The scene renders into a texture owned by the host;
/// the engine only reserves space and draws that texture.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBlock {
    /// Texture key of the scene's render target.
    pub scene: String,
    /// Viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
}

/// A single line of text. Used for placeholder loading and error lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelBlock {
    /// The text.
    pub text: String,
    /// Text color.
    pub color: ColorValue,
}

pub(crate) fn compute_image_layout(
    image: &ImageBlock,
    x: f32,
    y: f32,
    available_width: f32,
) -> Rect {
    image.compute_layout(x, y, available_width)
}

pub(crate) fn compute_sprite_layout(sprite: &SpriteBlock, x: f32, y: f32) -> Rect {
    Rect::new(x, y, sprite.width, sprite.height)
}

pub(crate) const fn compute_slot_layout(x: f32, y: f32) -> Rect {
    Rect::new(x, y, SlotBlock::OUTER_SIZE, SlotBlock::OUTER_SIZE)
}

pub(crate) fn compute_break_layout(
    config: &LayoutConfig,
    x: f32,
    y: f32,
    available_width: f32,
) -> Rect {
    Rect::new(x, y, available_width.max(0.0), config.thematic_break_height)
}

pub(crate) fn compute_item_image_layout(item: &ItemImageBlock, x: f32, y: f32) -> Rect {
    let size = SlotBlock::INNER_SIZE * item.scale;
    Rect::new(x, y, size, size)
}

pub(crate) fn compute_scene_layout(scene: &SceneBlock, x: f32, y: f32) -> Rect {
    Rect::new(x, y, scene.width, scene.height)
}

pub(crate) fn compute_label_layout(
    label: &LabelBlock,
    ctx: &LayoutContext<'_>,
    config: &LayoutConfig,
    x: f32,
    y: f32,
) -> Rect {
    let text = ctx.text();
    Rect::new(
        x,
        y,
        text.text_width(&label.text, config.font_size),
        text.line_height(config.font_size),
    )
}

pub(crate) fn render_image(image: &ImageBlock, bounds: Rect, ctx: &mut dyn RenderContext) {
    ctx.draw_texture(bounds, &TextureRegion::whole(image.image.id()));
}

pub(crate) fn render_sprite(sprite: &SpriteBlock, bounds: Rect, ctx: &mut dyn RenderContext) {
    ctx.draw_texture(bounds, &sprite.region);
}

pub(crate) fn render_slot(
    slot: &SlotBlock,
    bounds: Rect,
    config: &LayoutConfig,
    ctx: &mut dyn RenderContext,
) {
    ctx.fill_rect(bounds, config.slot_background);
    if let Some(stack) = &slot.stack {
        let inset = (SlotBlock::OUTER_SIZE - SlotBlock::INNER_SIZE) / 2.0;
        let icon = Rect::new(
            bounds.x + inset,
            bounds.y + inset,
            SlotBlock::INNER_SIZE,
            SlotBlock::INNER_SIZE,
        );
        ctx.draw_item(icon, stack);
    }
}

/// One pixel line across the middle of the break.
pub(crate) fn render_break(bounds: Rect, config: &LayoutConfig, ctx: &mut dyn RenderContext) {
    let line_y = (bounds.y + bounds.height / 2.0).floor();
    ctx.fill_rect(
        Rect::new(bounds.x, line_y, bounds.width, 1.0),
        config.thematic_break_color,
    );
}

pub(crate) fn render_item_image(item: &ItemImageBlock, bounds: Rect, ctx: &mut dyn RenderContext) {
    ctx.draw_item(bounds, &item.stack);
}

pub(crate) fn render_scene(
    scene: &SceneBlock,
    bounds: Rect,
    config: &LayoutConfig,
    ctx: &mut dyn RenderContext,
) {
    ctx.fill_rect(bounds, config.scene_background);
    ctx.draw_texture(bounds, &TextureRegion::whole(scene.scene.as_str()));
}

pub(crate) fn render_label(
    label: &LabelBlock,
    bounds: Rect,
    config: &LayoutConfig,
    ctx: &mut dyn RenderContext,
) {
    let style = TextStyle {
        font_size: config.font_size,
        color: label.color,
    };
    ctx.draw_text(bounds.x, bounds.y, &label.text, &style);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: Option<f32>, height: Option<f32>) -> ImageBlock {
        ImageBlock {
            image: ImageRef::new("guide:diagram.png", 200, 100),
            width,
            height,
            title: None,
        }
    }

    #[test]
    fn test_image_intrinsic_size() {
        let rect = image(None, None).compute_layout(0.0, 0.0, 500.0);
        assert_eq!(rect, Rect::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_image_width_only_keeps_aspect() {
        let rect = image(Some(50.0), None).compute_layout(0.0, 0.0, 500.0);
        assert_eq!(rect, Rect::new(0.0, 0.0, 50.0, 25.0));
    }

    #[test]
    fn test_image_scaled_down_to_available_width() {
        let rect = image(None, None).compute_layout(3.0, 4.0, 100.0);
        assert_eq!(rect, Rect::new(3.0, 4.0, 100.0, 50.0));
    }

    #[test]
    fn test_zero_sized_image_does_not_divide_by_zero() {
        let block = ImageBlock {
            image: ImageRef::new("empty", 0, 0),
            width: Some(10.0),
            height: None,
            title: None,
        };
        assert_eq!(block.compute_layout(0.0, 0.0, 100.0), Rect::new(0.0, 0.0, 10.0, 0.0));
    }
}
