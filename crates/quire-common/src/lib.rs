//! Common utilities for the Quire layout engine.
//!
//! This crate provides shared infrastructure used by all engine components:
//! - **Warning System** - deduplicated warnings routed through the `log` facade
//! - **Image references** - intrinsic dimensions of externally loaded images

pub mod image;
pub mod warning;
