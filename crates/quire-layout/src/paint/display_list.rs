//! Display List - a sequence of recorded drawing requests
//!
//! Commands are stored in painting order (back to front), so a renderer can
//! simply iterate and execute each one.

use serde::Serialize;

use super::{RenderContext, TextStyle};
use crate::leaf::{ItemStack, TextureRegion};
use crate::{ColorValue, Rect};

/// A single drawing command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid color.
    ///
    /// Used for backgrounds, borders, empty slots and thematic breaks.
    FillRect {
        /// Area to fill.
        rect: Rect,
        /// Fill color.
        color: ColorValue,
    },

    /// Draw a texture region stretched over a rectangle.
    DrawTexture {
        /// Destination rectangle.
        rect: Rect,
        /// Source region.
        region: TextureRegion,
    },

    /// Draw a line of text.
    DrawText {
        /// X coordinate of the text's top-left corner.
        x: f32,
        /// Y coordinate of the text's top-left corner.
        y: f32,
        /// The text content to draw.
        text: String,
        /// Size and color.
        style: TextStyle,
    },

    /// Draw an item icon.
    DrawItem {
        /// Destination rectangle.
        rect: Rect,
        /// The item to draw.
        stack: ItemStack,
    },

    /// Push a clip rectangle onto the clip stack.
    ///
    /// The rectangle is already intersected with the enclosing clip.
    PushClip {
        /// Effective clip rectangle.
        rect: Rect,
    },

    /// Pop the most recent clip rectangle from the clip stack.
    PopClip,
}

/// A list of drawing commands in painting order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// A [`RenderContext`] that records every request into a [`DisplayList`].
#[derive(Debug, Clone)]
pub struct RecordingContext {
    list: DisplayList,
    viewport: Rect,
    clips: Vec<Rect>,
}

impl RecordingContext {
    /// Record with the given viewport used for culling.
    #[must_use]
    pub const fn new(viewport: Rect) -> Self {
        Self {
            list: DisplayList::new(),
            viewport,
            clips: Vec::new(),
        }
    }

    /// Commands recorded so far.
    #[must_use]
    pub const fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// Consume the context and return its display list.
    #[must_use]
    pub fn finish(self) -> DisplayList {
        self.list
    }

    /// Depth of the scissor stack.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clips.len()
    }
}

impl RenderContext for RecordingContext {
    fn fill_rect(&mut self, rect: Rect, color: ColorValue) {
        self.list.push(DisplayCommand::FillRect { rect, color });
    }

    fn draw_texture(&mut self, rect: Rect, region: &TextureRegion) {
        self.list.push(DisplayCommand::DrawTexture {
            rect,
            region: region.clone(),
        });
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, style: &TextStyle) {
        self.list.push(DisplayCommand::DrawText {
            x,
            y,
            text: text.to_string(),
            style: *style,
        });
    }

    fn draw_item(&mut self, rect: Rect, stack: &ItemStack) {
        self.list.push(DisplayCommand::DrawItem {
            rect,
            stack: stack.clone(),
        });
    }

    fn push_scissor(&mut self, rect: Rect) {
        let effective = self
            .clips
            .last()
            .map_or(rect, |current| current.intersection(&rect));
        self.clips.push(effective);
        self.list.push(DisplayCommand::PushClip { rect: effective });
    }

    fn pop_scissor(&mut self) {
        if self.clips.pop().is_some() {
            self.list.push(DisplayCommand::PopClip);
        } else {
            log::warn!("pop_scissor called with an empty scissor stack");
        }
    }

    fn viewport(&self) -> Rect {
        self.viewport
    }
}
