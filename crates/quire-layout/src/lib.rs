//! Retained-mode document layout for Quire.
//!
//! A [`Document`] owns an arena of [`Block`]s. Boxes stack their children in
//! columns and rows, arrange item slots in grids, or hand inline content to
//! a flow implementation. Leaves (images, sprites, slots, scenes, ...) size
//! themselves. The document lays the tree out for an available width,
//! issues drawing requests through a [`RenderContext`], resolves points to
//! blocks and inline runs, and tracks hover and mouse capture for
//! interaction handlers.
//!
//! # Frame cycle
//!
//! ```text
//! poll_placeholders → update_layout → render
//!                           ↓
//!                pick → set_hovered_element / click / tooltip
//! ```
//!
//! Layout is never computed on demand: `render` and `pick` use whatever the
//! last `update_layout` produced.
//!
//! # Example
//!
//! ```
//! use quire_layout::{ApproximateTextMeasure, AxisBox, Block, Document, LayoutContext};
//!
//! let mut doc = Document::new();
//! let row = doc.push(Block::row(AxisBox::new().with_gap(2.0)));
//! let slot = doc.create(Block::slot(None));
//! doc.append_child(row, slot);
//!
//! doc.update_layout(LayoutContext::new(&ApproximateTextMeasure), 200.0);
//! assert_eq!(doc.pick(6.0, 6.0).map(|hit| hit.node), Some(slot));
//! ```

pub mod axis;
pub mod block;
pub mod box_model;
pub mod color;
pub mod config;
pub mod container;
pub mod document;
pub mod error;
pub mod flow;
pub mod interaction;
pub mod layout;
pub mod leaf;
pub mod paint;
pub mod placeholder;
pub mod slot_grid;
pub mod snapshot;

pub use axis::{AlignItems, Axis, AxisBox};
pub use block::{Block, BlockKind};
pub use box_model::{BorderEdge, Borders, EdgeSizes, Rect};
pub use color::ColorValue;
pub use config::LayoutConfig;
pub use container::{BoxBlock, BoxLayout};
pub use document::{Document, DocumentLayout};
pub use error::{ColorParseError, ContentError};
pub use flow::{
    ApproximateTextMeasure, FlowContent, FlowHost, InlineFlow, InlineHit, InlineItem, InlineRun,
    RunId, TextMeasure,
};
pub use hit_test::HitTestResult;
pub use interaction::{InteractionContext, InteractiveElement, MouseCapture};
pub use layout::LayoutContext;
pub use leaf::{ItemStack, SlotBlock, TextureRegion};
pub use paint::{DisplayCommand, DisplayList, RecordingContext, RenderContext, TextStyle};
pub use placeholder::{ContentBuilder, ContentSender, PlaceholderBlock};
pub use slot_grid::SlotGrid;
pub use snapshot::LayoutSnapshot;

pub use quire_tree::NodeId;
