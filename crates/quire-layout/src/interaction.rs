//! Mouse interaction handlers attached to blocks.

use quire_tree::NodeId;

use crate::flow::RunId;

/// Reacts to the mouse. Every method has a do-nothing default.
///
/// The document looks for handlers by walking from the picked block towards
/// the root, so a handler on a box also covers its descendants.
pub trait InteractiveElement {
    /// The pointer moved onto this element.
    fn mouse_entered(&mut self, _cx: &mut InteractionContext<'_>) {}

    /// The pointer left this element.
    fn mouse_left(&mut self, _cx: &mut InteractionContext<'_>) {}

    /// A click at `(x, y)`. Return `true` when handled, which stops the walk
    /// towards the root.
    fn mouse_clicked(&mut self, _cx: &mut InteractionContext<'_>, _x: f32, _y: f32) -> bool {
        false
    }

    /// The mouse capture held by this element was released.
    fn mouse_released(&mut self, _cx: &mut InteractionContext<'_>) {}

    /// Tooltip text. `content` is the hovered run when the pick landed on
    /// inline content of this very element.
    fn tooltip(&self, _content: Option<RunId>) -> Option<String> {
        None
    }
}

/// What a handler sees while being notified.
#[derive(Debug)]
pub struct InteractionContext<'a> {
    node: NodeId,
    content: Option<RunId>,
    capture: &'a mut MouseCapture,
}

impl<'a> InteractionContext<'a> {
    pub(crate) fn new(node: NodeId, content: Option<RunId>, capture: &'a mut MouseCapture) -> Self {
        Self {
            node,
            content,
            capture,
        }
    }

    /// The block the handler is attached to.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// The inline run under the pointer, when the pick landed on this
    /// element's own inline content.
    #[must_use]
    pub const fn content(&self) -> Option<RunId> {
        self.content
    }

    /// Route every subsequent click to this element until released.
    ///
    /// # Panics
    ///
    /// Panics when called from this element's own `mouse_released`.
    pub fn capture_mouse(&mut self) {
        self.capture.capture(self.node);
    }

    /// Whether this element currently holds the capture.
    #[must_use]
    pub fn has_capture(&self) -> bool {
        self.capture.captured() == Some(self.node)
    }
}

/// Which element holds the mouse, and which one is being told it lost it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseCapture {
    captured: Option<NodeId>,
    releasing: Option<NodeId>,
}

impl MouseCapture {
    /// The element holding the capture.
    #[must_use]
    pub const fn captured(&self) -> Option<NodeId> {
        self.captured
    }

    /// Give the capture to `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is currently being notified of its own release.
    /// Re-capturing from inside that notification breaks the release
    /// sequence and is a bug in the handler.
    pub fn capture(&mut self, node: NodeId) {
        assert!(
            self.releasing != Some(node),
            "{node} re-captured the mouse during its own release notification"
        );
        self.captured = Some(node);
    }

    /// Take the capture away and mark its holder as being released.
    pub(crate) const fn begin_release(&mut self) -> Option<NodeId> {
        let node = self.captured.take();
        self.releasing = node;
        node
    }

    pub(crate) const fn end_release(&mut self) {
        self.releasing = None;
    }
}
