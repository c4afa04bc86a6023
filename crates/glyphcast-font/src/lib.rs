//! glyphcast font - Metrics Provider
//!
//! This crate supplies everything the layout engine and the output sinks
//! need to know about a font:
//! - Font metrics (units per em, ascender, descender)
//! - Per-glyph advance widths, bounding boxes and side bearings
//! - Kerning between ordered glyph pairs
//! - Glyph outlines as move/line/quad/cubic/close commands in font units
//!
//! [`FontFace`] reads OpenType/TrueType data through `ttf-parser`,
//! [`FontDatabase`] finds installed fonts through `fontdb`, and
//! [`SyntheticFont`] builds a font in memory for tests and tooling.

pub mod database;
pub mod face;
pub mod outline;
pub mod provider;
pub mod synthetic;

pub use database::{FontDatabase, FontQuery, FontStyle, FontWeight};
pub use face::FontFace;
pub use outline::{BoundingBox, GlyphOutline, PathCommand};
pub use provider::{FontMetrics, GlyphId, MetricsProvider};
pub use synthetic::SyntheticFont;

/// Font loading error types
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("Failed to parse font: {0}")]
    Parse(String),

    #[error("Failed to read font file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;
