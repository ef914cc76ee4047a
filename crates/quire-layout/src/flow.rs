//! Flow containers: boxes whose inner arrangement is inline text.
//!
//! Line breaking and shaping belong to an external text-flow subsystem. The
//! engine talks to it through [`FlowContent`] and gives it access to text
//! metrics and to the inline blocks it embeds through [`FlowHost`].
//!
//! [`InlineFlow`] is a small greedy word-wrapping implementation, enough for
//! paragraphs with embedded inline blocks.

use std::fmt;

use quire_tree::NodeId;
use serde::Serialize;

use crate::paint::{RenderContext, TextStyle};
use crate::{ColorValue, Document, LayoutConfig, LayoutContext, Rect};

/// Text metrics, injected by the host.
pub trait TextMeasure {
    /// Advance width of `text` at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Height of one line at `font_size`.
    fn line_height(&self, font_size: f32) -> f32;
}

/// Metrics from fixed ratios, for hosts without font data.
///
/// Every character advances 0.6 × the font size and a line is 1.2 × the
/// font size tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateTextMeasure;

impl TextMeasure for ApproximateTextMeasure {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        text.chars().count() as f32 * font_size * CHAR_WIDTH_RATIO
    }

    fn line_height(&self, font_size: f32) -> f32 {
        const LINE_HEIGHT_RATIO: f32 = 1.2;
        font_size * LINE_HEIGHT_RATIO
    }
}

/// Identifies one inline run inside a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RunId(pub usize);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "run {}", self.0)
    }
}

/// What a flow found under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineHit {
    /// A run of text.
    Run(RunId),
    /// An embedded inline block; picking continues inside it.
    Block(NodeId),
}

/// Position of one laid-out run, for debug highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InlineRun {
    /// The run.
    pub id: RunId,
    /// Where it was placed.
    pub bounds: Rect,
}

/// What a flow may ask of the document while laying out.
pub trait FlowHost {
    /// Text metrics.
    fn text(&self) -> &dyn TextMeasure;

    /// Font size for inline text.
    fn font_size(&self) -> f32;

    /// Lay out one of the flow's inline blocks and return its bounds.
    fn layout_block(&mut self, block: NodeId, x: f32, y: f32, available_width: f32) -> Rect;
}

/// Inline content of a flow container.
pub trait FlowContent {
    /// Arrange the content inside `available_width` starting at `(x, y)` and
    /// return the area used.
    fn layout(&mut self, host: &mut dyn FlowHost, x: f32, y: f32, available_width: f32) -> Rect;

    /// Translate laid-out geometry without relayout.
    fn moved(&mut self, dx: f32, dy: f32);

    /// Positions of the laid-out runs.
    fn runs(&self) -> Vec<InlineRun>;

    /// The run or inline block under a point.
    fn pick(&self, x: f32, y: f32) -> Option<InlineHit>;

    /// Draw the text. Inline blocks are drawn by the document.
    fn render(&self, config: &LayoutConfig, ctx: &mut dyn RenderContext);

    /// Nodes embedded as inline blocks. The document adopts them as the
    /// flow's children.
    fn inline_blocks(&self) -> Vec<NodeId>;

    /// Drop all content.
    fn clear(&mut self);

    /// Tooltip text of a run.
    fn tooltip(&self, _run: RunId) -> Option<String> {
        None
    }
}

/// Flow-specific box state.
pub struct FlowBox {
    content: Option<Box<dyn FlowContent>>,
}

impl FlowBox {
    /// Wrap a flow implementation.
    #[must_use]
    pub fn new(content: Box<dyn FlowContent>) -> Self {
        Self {
            content: Some(content),
        }
    }

    /// Positions of the laid-out runs.
    #[must_use]
    pub fn runs(&self) -> Vec<InlineRun> {
        self.content.as_ref().map_or_else(Vec::new, |content| content.runs())
    }

    /// The run or inline block under a point.
    #[must_use]
    pub fn pick(&self, x: f32, y: f32) -> Option<InlineHit> {
        self.content.as_ref()?.pick(x, y)
    }

    /// Tooltip text of a run.
    #[must_use]
    pub fn tooltip(&self, run: RunId) -> Option<String> {
        self.content.as_ref()?.tooltip(run)
    }

    pub(crate) fn inline_blocks(&self) -> Vec<NodeId> {
        self.content
            .as_ref()
            .map_or_else(Vec::new, |content| content.inline_blocks())
    }

    pub(crate) fn render(&self, config: &LayoutConfig, ctx: &mut dyn RenderContext) {
        if let Some(content) = &self.content {
            content.render(config, ctx);
        }
    }

    pub(crate) fn moved(&mut self, dx: f32, dy: f32) {
        if let Some(content) = &mut self.content {
            content.moved(dx, dy);
        }
    }

    pub(crate) fn clear(&mut self) {
        if let Some(content) = &mut self.content {
            content.clear();
        }
    }
}

impl fmt::Debug for FlowBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowBox")
            .field("runs", &self.runs().len())
            .finish_non_exhaustive()
    }
}

/// [`FlowHost`] over a document, scoped to one flow node.
struct DocumentFlowHost<'d, 'a> {
    document: &'d mut Document,
    ctx: LayoutContext<'a>,
    flow: NodeId,
}

impl FlowHost for DocumentFlowHost<'_, '_> {
    fn text(&self) -> &dyn TextMeasure {
        self.ctx.text()
    }

    fn font_size(&self) -> f32 {
        self.document.config.font_size
    }

    fn layout_block(&mut self, block: NodeId, x: f32, y: f32, available_width: f32) -> Rect {
        if self.document.tree.parent(block) != Some(self.flow) {
            log::debug!("flow {} does not own inline block {block}", self.flow);
            return Rect::new(x, y, 0.0, 0.0);
        }
        self.document.layout_block(self.ctx, block, x, y, available_width)
    }
}

impl Document {
    /// Let the flow implementation arrange its content.
    ///
    /// The content is taken out of the tree for the duration so it can call
    /// back into the document for its inline blocks.
    pub(crate) fn arrange_flow(
        &mut self,
        ctx: LayoutContext<'_>,
        id: NodeId,
        x: f32,
        y: f32,
        available_width: f32,
    ) -> Rect {
        let Some(mut content) = self.flow_box_mut(id).and_then(|flow| flow.content.take()) else {
            return Rect::new(x, y, 0.0, 0.0);
        };

        let bounds = {
            let mut host = DocumentFlowHost {
                document: self,
                ctx,
                flow: id,
            };
            content.layout(&mut host, x, y, available_width)
        };

        if let Some(flow) = self.flow_box_mut(id) {
            flow.content = Some(content);
        }
        bounds
    }

    /// Inline run positions of a flow container, for debug highlighting.
    #[must_use]
    pub fn inline_runs(&self, id: NodeId) -> Vec<InlineRun> {
        self.flow_box(id).map_or_else(Vec::new, FlowBox::runs)
    }
}

/// One item of an [`InlineFlow`].
#[derive(Debug, Clone, PartialEq)]
pub enum InlineItem {
    /// Words, wrapped at whitespace.
    Text {
        /// The text.
        text: String,
        /// Color override.
        color: Option<ColorValue>,
        /// Shown when the run is hovered.
        tooltip: Option<String>,
    },
    /// An embedded block, placed like a single word.
    Block(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
enum FragmentContent {
    Text(String),
    Block(NodeId),
}

#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    item: usize,
    bounds: Rect,
    content: FragmentContent,
}

/// Greedy word-wrapping inline content.
///
/// Items become runs whose [`RunId`] is the item's index. Words of one item
/// that end up on the same line share a fragment. Everything on a line is
/// top-aligned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineFlow {
    items: Vec<InlineItem>,
    fragments: Vec<Fragment>,
}

impl InlineFlow {
    /// An empty flow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text run.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.items.push(InlineItem::Text {
            text: text.into(),
            color: None,
            tooltip: None,
        });
        self
    }

    /// Append an arbitrary item.
    #[must_use]
    pub fn item(mut self, item: InlineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Append an inline block.
    #[must_use]
    pub fn block(mut self, node: NodeId) -> Self {
        self.items.push(InlineItem::Block(node));
        self
    }

    /// The items, in order.
    #[must_use]
    pub fn items(&self) -> &[InlineItem] {
        &self.items
    }
}

/// Line-breaking state while laying out an [`InlineFlow`].
struct LineCursor {
    left: f32,
    right: f32,
    x: f32,
    line_top: f32,
    line_height: f32,
    max_right: f32,
    empty: bool,
}

impl LineCursor {
    fn break_line(&mut self) {
        self.line_top += self.line_height;
        self.line_height = 0.0;
        self.x = self.left;
        self.empty = true;
    }

    fn place(&mut self, width: f32, height: f32) -> (f32, f32) {
        let origin = (self.x, self.line_top);
        self.x += width;
        self.line_height = self.line_height.max(height);
        self.max_right = self.max_right.max(self.x);
        self.empty = false;
        origin
    }
}

impl FlowContent for InlineFlow {
    fn layout(&mut self, host: &mut dyn FlowHost, x: f32, y: f32, available_width: f32) -> Rect {
        self.fragments.clear();
        let font_size = host.font_size();
        let line_height = host.text().line_height(font_size);
        let space = host.text().text_width(" ", font_size);

        let mut cursor = LineCursor {
            left: x,
            right: x + available_width,
            x,
            line_top: y,
            line_height: 0.0,
            max_right: x,
            empty: true,
        };

        for (index, item) in self.items.iter().enumerate() {
            match item {
                InlineItem::Text { text, .. } => {
                    for word in text.split_whitespace() {
                        let word_width = host.text().text_width(word, font_size);
                        let lead = if cursor.empty { 0.0 } else { space };
                        if !cursor.empty && cursor.x + lead + word_width > cursor.right {
                            cursor.break_line();
                        }
                        let lead = if cursor.empty { 0.0 } else { space };

                        let joins_previous = !cursor.empty
                            && self.fragments.last().is_some_and(|last| {
                                last.item == index
                                    && (last.bounds.y - cursor.line_top).abs() < f32::EPSILON
                                    && matches!(last.content, FragmentContent::Text(_))
                            });

                        let (fx, fy) = cursor.place(lead + word_width, line_height);
                        match self.fragments.last_mut() {
                            Some(Fragment {
                                bounds,
                                content: FragmentContent::Text(joined),
                                ..
                            }) if joins_previous => {
                                joined.push(' ');
                                joined.push_str(word);
                                bounds.width += lead + word_width;
                            }
                            _ => self.fragments.push(Fragment {
                                item: index,
                                bounds: Rect::new(fx + lead, fy, word_width, line_height),
                                content: FragmentContent::Text(word.to_string()),
                            }),
                        }
                    }
                }
                InlineItem::Block(node) => {
                    let mut bounds = host.layout_block(
                        *node,
                        cursor.x,
                        cursor.line_top,
                        (cursor.right - cursor.x).max(0.0),
                    );
                    if !cursor.empty && bounds.right() > cursor.right {
                        cursor.break_line();
                        bounds =
                            host.layout_block(*node, cursor.x, cursor.line_top, available_width);
                    }
                    let _ = cursor.place(bounds.width, bounds.height);
                    self.fragments.push(Fragment {
                        item: index,
                        bounds,
                        content: FragmentContent::Block(*node),
                    });
                }
            }
        }

        let height = cursor.line_top + cursor.line_height - y;
        Rect::new(x, y, cursor.max_right - x, height)
    }

    fn moved(&mut self, dx: f32, dy: f32) {
        for fragment in &mut self.fragments {
            fragment.bounds = fragment.bounds.translate(dx, dy);
        }
    }

    fn runs(&self) -> Vec<InlineRun> {
        self.fragments
            .iter()
            .filter(|fragment| matches!(fragment.content, FragmentContent::Text(_)))
            .map(|fragment| InlineRun {
                id: RunId(fragment.item),
                bounds: fragment.bounds,
            })
            .collect()
    }

    fn pick(&self, x: f32, y: f32) -> Option<InlineHit> {
        let fragment = self
            .fragments
            .iter()
            .rev()
            .find(|fragment| fragment.bounds.contains(x, y))?;
        Some(match fragment.content {
            FragmentContent::Text(_) => InlineHit::Run(RunId(fragment.item)),
            FragmentContent::Block(node) => InlineHit::Block(node),
        })
    }

    fn render(&self, config: &LayoutConfig, ctx: &mut dyn RenderContext) {
        for fragment in &self.fragments {
            let FragmentContent::Text(text) = &fragment.content else {
                continue;
            };
            let color = match self.items.get(fragment.item) {
                Some(InlineItem::Text {
                    color: Some(color), ..
                }) => *color,
                _ => config.text_color,
            };
            let style = TextStyle {
                font_size: config.font_size,
                color,
            };
            if !ctx.is_culled(fragment.bounds) {
                ctx.draw_text(fragment.bounds.x, fragment.bounds.y, text, &style);
            }
        }
    }

    fn inline_blocks(&self) -> Vec<NodeId> {
        self.items
            .iter()
            .filter_map(|item| match item {
                InlineItem::Block(node) => Some(*node),
                InlineItem::Text { .. } => None,
            })
            .collect()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.fragments.clear();
    }

    fn tooltip(&self, run: RunId) -> Option<String> {
        match self.items.get(run.0)? {
            InlineItem::Text { tooltip, .. } => tooltip.clone(),
            InlineItem::Block(_) => None,
        }
    }
}
