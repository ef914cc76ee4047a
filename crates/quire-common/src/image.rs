//! Image references shared across engine components.
//!
//! Asset loading happens outside the engine. By the time a page is built the
//! loader has resolved every image to an identifier and its intrinsic size,
//! which is all layout needs.

use serde::{Deserialize, Serialize};

/// A resolved image resource: lookup key plus intrinsic dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// Key the renderer uses to find the decoded texture.
    id: String,
    /// Intrinsic width of the image in pixels.
    width: u32,
    /// Intrinsic height of the image in pixels.
    height: u32,
}

impl ImageRef {
    /// Create a new reference to a loaded image.
    ///
    /// # Arguments
    ///
    /// * `id` - Texture lookup key
    /// * `width` - Intrinsic width of the image in pixels
    /// * `height` - Intrinsic height of the image in pixels
    #[must_use]
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }

    /// Texture lookup key.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Intrinsic width of the image in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height of the image in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Intrinsic dimensions as `(width, height)` in `f32`, for layout.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn dimensions_f32(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }
}
