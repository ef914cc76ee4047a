use serde::Serialize;

use crate::leaf::{ItemStack, TextureRegion};
use crate::{ColorValue, Rect};

/// How a run of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Text color.
    pub color: ColorValue,
}

/// Primitive drawing requests the engine issues while rendering.
///
/// Texture and item caches live behind the implementation, so the engine
/// never touches them directly.
pub trait RenderContext {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: ColorValue);

    /// Draw a region of a texture stretched over `rect`.
    fn draw_texture(&mut self, rect: Rect, region: &TextureRegion);

    /// Draw one line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle);

    /// Draw an item icon filling `rect`.
    fn draw_item(&mut self, rect: Rect, stack: &ItemStack);

    /// Restrict subsequent drawing to `rect`, intersected with the current
    /// scissor.
    fn push_scissor(&mut self, rect: Rect);

    /// Undo the most recent [`push_scissor`](Self::push_scissor).
    fn pop_scissor(&mut self);

    /// The visible area, in document coordinates.
    fn viewport(&self) -> Rect;

    /// True when `bounds` falls completely outside the viewport.
    fn is_culled(&self, bounds: Rect) -> bool {
        !bounds.intersects(&self.viewport())
    }
}
