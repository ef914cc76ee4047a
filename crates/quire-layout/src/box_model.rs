//! Box model geometry: rectangles, edge sizes and borders.
//!
//! Every block's `bounds` is its border box: content, padding and border.
//! Margins sit outside `bounds` and are honoured by whichever container
//! positions the block.
//!
//! ```text
//! ┌───────────────────────────────────┐
//! │            margin-top             │
//! │   ┌───────────────────────────┐   │
//! │   │ border-top    (bounds)    │   │
//! │   │   ┌───────────────────┐   │   │
//! │ m │ b │ p    CONTENT    p │ b │ m │
//! │   │   └───────────────────┘   │   │
//! │   │        border-bottom      │   │
//! │   └───────────────────────────┘   │
//! │           margin-bottom           │
//! └───────────────────────────────────┘
//! ```

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::ColorValue;

/// A rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether the point lies inside. Left/top edges are inclusive,
    /// right/bottom edges exclusive, so adjacent cells never both match.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether two rectangles overlap. Empty rectangles overlap nothing.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// The overlapping area of two rectangles (zero-sized when disjoint).
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self::new(x, y, (right - x).max(0.0), (bottom - y).max(0.0))
    }

    /// The smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// The same rectangle moved by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow outward by the given edges.
    #[must_use]
    pub fn expand(&self, edges: EdgeSizes) -> Self {
        Self::new(
            self.x - edges.left,
            self.y - edges.top,
            self.width + edges.horizontal(),
            self.height + edges.vertical(),
        )
    }

    /// Shrink inward by the given edges. Size never goes negative.
    #[must_use]
    pub fn shrink(&self, edges: EdgeSizes) -> Self {
        Self::new(
            self.x + edges.left,
            self.y + edges.top,
            (self.width - edges.horizontal()).max(0.0),
            (self.height - edges.vertical()).max(0.0),
        )
    }
}

/// Edge sizes for padding, border widths, or margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl EdgeSizes {
    /// All four edges zero.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Edges in CSS order: top, right, bottom, left.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// The same size on every edge.
    #[must_use]
    pub const fn uniform(size: f32) -> Self {
        Self::new(size, size, size, size)
    }

    /// `left + right`
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl Add for EdgeSizes {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
            self.left + rhs.left,
        )
    }
}

/// One border edge: a solid line of the given width and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderEdge {
    /// Line thickness in pixels.
    pub width: f32,
    /// Line color.
    pub color: ColorValue,
}

impl BorderEdge {
    /// Create a border edge.
    #[must_use]
    pub const fn new(width: f32, color: ColorValue) -> Self {
        Self { width, color }
    }
}

/// The four independent border edges of a block. Each defaults to none.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Borders {
    /// Top edge.
    pub top: Option<BorderEdge>,
    /// Right edge.
    pub right: Option<BorderEdge>,
    /// Bottom edge.
    pub bottom: Option<BorderEdge>,
    /// Left edge.
    pub left: Option<BorderEdge>,
}

impl Borders {
    /// The same edge on all four sides.
    #[must_use]
    pub fn uniform(edge: &BorderEdge) -> Self {
        Self {
            top: Some(edge.clone()),
            right: Some(edge.clone()),
            bottom: Some(edge.clone()),
            left: Some(edge.clone()),
        }
    }

    /// Widths of the four edges (zero where absent).
    #[must_use]
    pub fn widths(&self) -> EdgeSizes {
        let width = |edge: &Option<BorderEdge>| edge.as_ref().map_or(0.0, |e| e.width);
        EdgeSizes::new(
            width(&self.top),
            width(&self.right),
            width(&self.bottom),
            width(&self.left),
        )
    }

    /// True when no edge is set.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }
}
