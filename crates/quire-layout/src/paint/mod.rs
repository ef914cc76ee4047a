//! Painting
//!
//! The engine never draws anything itself. `Document::render` walks the
//! laid-out tree back to front and issues primitive requests on a
//! [`RenderContext`] supplied by the host:
//!
//! ```text
//! Build → Layout → Render → (host renderer)
//!                    ↓
//!              RenderContext
//! ```
//!
//! [`RecordingContext`] is a `RenderContext` that records requests into a
//! [`DisplayList`]. Tests assert on it and the CLI prints it.

mod context;
mod display_list;

pub use context::{RenderContext, TextStyle};
pub use display_list::{DisplayCommand, DisplayList, RecordingContext};

use crate::{Borders, Rect};

/// Paint the four border edges of a box on top of its content.
///
/// Top and bottom edges span the full width including the corners. Left and
/// right edges sit between them.
pub(crate) fn paint_borders(bounds: Rect, borders: &Borders, ctx: &mut dyn RenderContext) {
    let widths = borders.widths();

    if let Some(edge) = &borders.top {
        ctx.fill_rect(
            Rect::new(bounds.x, bounds.y, bounds.width, edge.width),
            edge.color,
        );
    }

    if let Some(edge) = &borders.bottom {
        ctx.fill_rect(
            Rect::new(bounds.x, bounds.bottom() - edge.width, bounds.width, edge.width),
            edge.color,
        );
    }

    let side_y = bounds.y + widths.top;
    let side_height = (bounds.height - widths.vertical()).max(0.0);

    if let Some(edge) = &borders.left {
        ctx.fill_rect(Rect::new(bounds.x, side_y, edge.width, side_height), edge.color);
    }

    if let Some(edge) = &borders.right {
        ctx.fill_rect(
            Rect::new(bounds.right() - edge.width, side_y, edge.width, side_height),
            edge.color,
        );
    }
}
