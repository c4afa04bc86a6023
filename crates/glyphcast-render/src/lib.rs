//! glyphcast render - Output Sinks and Glyph Cache
//!
//! This crate turns a [`TextLayout`](glyphcast_layout::TextLayout) into output:
//! - [`OutputSink`]: the path protocol shared by every backend
//! - [`RasterSink`]: fills outlines into a tiny-skia pixmap
//! - [`VectorSink`]: accumulates SVG path data, one path per `fill`
//! - [`GlyphCache`]: per-font rasters and vector definitions, built once
//! - [`render`] drives a sink glyph by glyph; [`render_cached`] blits cached
//!   rasters and emits `<use>` placements of shared definitions

mod cache;
mod raster;
mod render;
mod sink;
mod vector;

pub use cache::{CacheOptions, CachedGlyph, GlyphCache};
pub use raster::{GlyphRaster, RasterSink};
pub use render::{render, render_cached, surface_size, RenderedText};
pub use sink::{trace_outline, OutlineTransform, OutputSink};
pub use vector::{GlyphVector, Placement, VectorDocument, VectorSink};

use glyphcast_layout::LayoutError;

/// Rendering error types
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Glyph cache has no entry for {ch:?} (U+{code_point:04X}); rebuild the cache for this font")]
    CacheConsistency { ch: char, code_point: u32 },

    #[error("Invalid glyph cache resolution {value}: expected a finite number of pixels per font unit above zero")]
    InvalidResolution { value: f32 },

    #[error("Cannot allocate a {width}x{height} pixel surface")]
    Surface { width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, RenderError>;
