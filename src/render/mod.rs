//! Font cache, rasterizer and the render pipeline tying them to the layout engine.

/// Process-wide font asset.
pub mod font;
/// Render requests and entry points.
pub mod pipeline;
/// Vector document to PNG.
pub mod raster;
