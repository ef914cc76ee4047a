//! Error types surfaced by the layout engine.

use quire_tree::NodeId;
use thiserror::Error;

/// Why a placeholder's asynchronous content never arrived.
///
/// The engine never propagates this past the placeholder: it is rendered in
/// place as a one-line error label showing the `Display` text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The producer reported a failure.
    #[error("{0}")]
    Failed(String),

    /// The producer was dropped without completing.
    #[error("content source was dropped before completing")]
    Abandoned,

    /// The builder returned a node that cannot become the placeholder's
    /// child: a missing node, the placeholder itself or one of its ancestors.
    #[error("content {0} cannot be shown in this placeholder")]
    Unplaceable(NodeId),
}

impl ContentError {
    /// Wrap any displayable failure.
    pub fn failed(message: impl std::fmt::Display) -> Self {
        Self::Failed(message.to_string())
    }
}

/// A color string that is neither a known name nor valid hex.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{0}`")]
pub struct ColorParseError(pub String);
