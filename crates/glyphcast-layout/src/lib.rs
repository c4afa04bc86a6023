//! glyphcast layout - Text Layout Engine
//!
//! Turns a string into glyphs positioned in device space:
//! - Hard line breaks on `\n`
//! - Word wrap at whitespace, with words kept whole whenever they fit
//! - Kerning between neighbouring glyphs of a word
//! - Left-edge clamping for glyphs that overhang their origin
//!
//! Line height follows the font metrics: `scale * (ascender - descender)`.

mod line;
mod paragraph;
mod request;

pub use line::{split_lines, split_words, PenState};
pub use paragraph::LayoutEngine;
pub use request::{ContainerWidth, LayoutRequest};

use glyphcast_font::GlyphId;

/// Layout error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Invalid layout parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("Unsupported character {cluster:?}: multi-codepoint characters cannot be mapped to a single glyph")]
    GlyphResolution { cluster: String },
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// A glyph placed on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedGlyph {
    /// Source character
    pub ch: char,
    /// Glyph the character resolved to
    pub glyph: GlyphId,
    /// Pen x at the glyph origin, device pixels
    pub x: f32,
    /// Baseline y, device pixels
    pub y: f32,
    /// Zero-based line index
    pub line: usize,
    /// Kerning applied before this glyph, device pixels
    pub kerning: f32,
    /// Right edge of the glyph's ink, device pixels
    pub extent: f32,
    /// The font had no glyph for `ch` and `.notdef` is used instead
    pub fallback: bool,
}

impl PositionedGlyph {
    /// Code point used to key glyph caches
    pub fn code_point(&self) -> u32 {
        self.ch as u32
    }
}

/// Complete text layout result
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    /// Glyphs in text order
    pub glyphs: Vec<PositionedGlyph>,
    /// Number of lines, including empty ones
    pub line_count: usize,
    /// Line height used
    pub line_height: f32,
    /// Font units to device pixels
    pub scale: f32,
    /// Right-most ink extent of any glyph
    pub width: f32,
    /// Last baseline plus one line height
    pub height: f32,
    /// Device pixels per CSS pixel the layout was computed for
    pub pixel_ratio: f32,
}

impl TextLayout {
    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Glyphs grouped by line; lines without glyphs are skipped
    pub fn lines(&self) -> impl Iterator<Item = &[PositionedGlyph]> {
        self.glyphs.chunk_by(|a, b| a.line == b.line)
    }

    /// Baseline of a line
    pub fn baseline(&self, line: usize) -> f32 {
        self.line_height * (line + 1) as f32
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
