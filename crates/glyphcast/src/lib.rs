//! glyphcast - Text Layout and Glyph Rendering
//!
//! Lays out text with a font's metrics and renders it to a raster image and
//! an SVG document. This crate ties the pieces together:
//! - [`Config`]: sizes, wrapping and colors, loadable from TOML
//! - [`Typesetter`]: a font plus its shared glyph cache
//!
//! The building blocks are re-exported from the member crates.

mod config;
mod typesetter;

pub use config::{parse_color, Config};
pub use typesetter::Typesetter;

pub use glyphcast_font::{
    FontDatabase, FontError, FontFace, FontMetrics, FontQuery, GlyphId, MetricsProvider,
    SyntheticFont,
};
pub use glyphcast_layout::{
    ContainerWidth, LayoutEngine, LayoutError, LayoutRequest, PositionedGlyph, TextLayout,
};
pub use glyphcast_render::{
    render, render_cached, surface_size, CacheOptions, GlyphCache, OutputSink, RasterSink,
    RenderError, RenderedText, VectorDocument, VectorSink,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Top-level error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
