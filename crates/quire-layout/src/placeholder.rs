//! Placeholders: blocks whose content arrives asynchronously.
//!
//! A placeholder starts out showing a loading label. The producer of the
//! real content holds a [`ContentSender`], which may live on any thread.
//! Completion is only a message: nothing touches the tree until the host
//! calls [`Document::poll_placeholders`] on the UI thread, which builds the
//! content and swaps it in. Failures become an error label in place.
//!
//! A placeholder always has exactly one child: the loading label, the
//! resolved content or the error label.

use std::fmt;

use futures::channel::oneshot;
use quire_common::warning::warn_once;
use quire_tree::NodeId;

use crate::block::{Block, BlockKind};
use crate::error::ContentError;
use crate::{Document, LayoutContext, Rect};

/// Builds the resolved content on the UI thread and returns its root node.
pub type ContentBuilder = Box<dyn FnOnce(&mut Document) -> NodeId + Send>;

type ContentResult = Result<ContentBuilder, ContentError>;

/// Placeholder-specific block state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderBlock {
    current: NodeId,
}

impl PlaceholderBlock {
    /// The child currently displayed.
    #[must_use]
    pub const fn current(&self) -> NodeId {
        self.current
    }
}

/// Completes one placeholder. Consumed by the first completion.
pub struct ContentSender {
    node: NodeId,
    sender: oneshot::Sender<ContentResult>,
}

impl ContentSender {
    /// The placeholder this sender completes.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Deliver content. `build` runs on the UI thread during the next poll.
    pub fn complete(self, build: impl FnOnce(&mut Document) -> NodeId + Send + 'static) {
        self.send(Ok(Box::new(build)));
    }

    /// Report a failure; the placeholder shows `error` as an error label.
    pub fn fail(self, error: ContentError) {
        self.send(Err(error));
    }

    /// Report a failure from any displayable message.
    pub fn fail_with(self, message: impl fmt::Display) {
        self.fail(ContentError::failed(message));
    }

    /// Whether the document side is gone, so completing would be ignored.
    #[must_use]
    pub fn is_discarded(&self) -> bool {
        self.sender.is_canceled()
    }

    fn send(self, result: ContentResult) {
        if self.sender.send(result).is_err() {
            log::debug!(
                "placeholder {} was discarded before its content arrived",
                self.node
            );
        }
    }
}

impl fmt::Debug for ContentSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSender")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

/// A placeholder still waiting for its sender.
pub(crate) struct PendingPlaceholder {
    node: NodeId,
    receiver: oneshot::Receiver<ContentResult>,
}

impl fmt::Debug for PendingPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingPlaceholder")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Create a detached placeholder showing the loading label.
    ///
    /// Returns the placeholder node and the sender that completes it.
    pub fn new_placeholder(&mut self) -> (NodeId, ContentSender) {
        let loading = self.tree.alloc(Block::label(
            self.config.loading_text.clone(),
            self.config.loading_color,
        ));
        let node = self
            .tree
            .alloc(Block::new(BlockKind::Placeholder(PlaceholderBlock {
                current: loading,
            })));
        self.tree.append_child(node, loading);

        let (sender, receiver) = oneshot::channel();
        self.pending.push(PendingPlaceholder { node, receiver });
        log::debug!("placeholder {node} waiting for content");

        (node, ContentSender { node, sender })
    }

    /// Swap in every completed placeholder. Returns how many were resolved.
    ///
    /// Call once per frame on the UI thread, before `update_layout`.
    pub fn poll_placeholders(&mut self) -> usize {
        let mut resolved = 0;

        for mut entry in std::mem::take(&mut self.pending) {
            let outcome = match entry.receiver.try_recv() {
                Ok(None) => {
                    self.pending.push(entry);
                    continue;
                }
                Ok(Some(result)) => result,
                Err(oneshot::Canceled) => Err(ContentError::Abandoned),
            };

            let built = outcome.and_then(|build| {
                let content = build(self);
                if self.can_hold(entry.node, content) {
                    Ok(content)
                } else {
                    Err(ContentError::Unplaceable(content))
                }
            });
            let content = match built {
                Ok(content) => content,
                Err(error) => {
                    log::debug!("placeholder {} failed: {error}", entry.node);
                    self.tree
                        .alloc(Block::label(error.to_string(), self.config.error_color))
                }
            };

            self.set_placeholder_content(entry.node, content);
            resolved += 1;
        }

        resolved
    }

    /// Number of placeholders still waiting for content.
    #[must_use]
    pub fn pending_placeholders(&self) -> usize {
        self.pending.len()
    }

    /// Make `content` the single displayed child of a placeholder.
    ///
    /// `content` is detached from any previous owner. Setting the child the
    /// placeholder already shows does nothing; any other swap invalidates
    /// the document layout. A missing node, the placeholder itself or one of
    /// its ancestors is logged and ignored, leaving the current child shown.
    pub fn set_placeholder_content(&mut self, placeholder: NodeId, content: NodeId) {
        let Some(current) = self.placeholder(placeholder).map(PlaceholderBlock::current) else {
            warn_once("placeholder", "set_placeholder_content target is not a placeholder");
            return;
        };
        if current == content {
            return;
        }
        if !self.can_hold(placeholder, content) {
            warn_once(
                "placeholder",
                "set_placeholder_content got a missing node or an ancestor",
            );
            return;
        }

        if let Some(owner) = self.tree.parent(content) {
            self.remove_child(owner, content);
        }
        let _ = self.tree.clear_children(placeholder);
        self.tree.append_child(placeholder, content);
        if let Some(BlockKind::Placeholder(state)) =
            self.tree.data_mut(placeholder).map(|block| &mut block.kind)
        {
            state.current = content;
        }

        self.invalidate_layout();
    }

    /// Whether `content` exists and attaching it under `placeholder` keeps
    /// the tree acyclic.
    fn can_hold(&self, placeholder: NodeId, content: NodeId) -> bool {
        self.tree.get(content).is_some()
            && content != placeholder
            && !self.tree.is_descendant_of(placeholder, content)
    }

    /// Placeholder state of a node.
    #[must_use]
    pub fn placeholder(&self, id: NodeId) -> Option<&PlaceholderBlock> {
        match &self.tree.data(id)?.kind {
            BlockKind::Placeholder(state) => Some(state),
            _ => None,
        }
    }

    /// Replace a placeholder child that was taken away with an empty label,
    /// so the placeholder never ends up childless.
    pub(crate) fn refill_placeholder(&mut self, placeholder: NodeId) {
        let empty = self.tree.alloc(Block::label("", self.config.text_color));
        self.tree.append_child(placeholder, empty);
        if let Some(BlockKind::Placeholder(state)) =
            self.tree.data_mut(placeholder).map(|block| &mut block.kind)
        {
            state.current = empty;
        }
        self.invalidate_layout();
    }

    /// A placeholder occupies exactly the space of its current child.
    pub(crate) fn compute_placeholder_layout(
        &mut self,
        ctx: LayoutContext<'_>,
        id: NodeId,
        x: f32,
        y: f32,
        available_width: f32,
    ) -> Rect {
        match self.placeholder(id).map(PlaceholderBlock::current) {
            Some(current) => self.layout_block(ctx, current, x, y, available_width),
            None => Rect::new(x, y, 0.0, 0.0),
        }
    }
}
