//! Pen state and line/word splitting

use glyphcast_font::GlyphId;

/// Pen position while laying out text, in device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenState {
    /// Horizontal pen position
    pub x: f32,
    /// Current baseline
    pub y: f32,
    /// Zero-based line index
    pub line: usize,
    /// Previous glyph for kerning, `None` at the start of a line
    pub prev: Option<GlyphId>,
    line_has_content: bool,
}

impl PenState {
    /// Pen at the start of the first line; the first baseline sits one line
    /// height below the top
    pub fn new(line_height: f32) -> Self {
        Self {
            x: 0.0,
            y: line_height,
            line: 0,
            prev: None,
            line_has_content: false,
        }
    }

    /// Move to the start of the next line and drop the kerning context
    pub fn break_line(&mut self, line_height: f32) {
        self.x = 0.0;
        self.y += line_height;
        self.line += 1;
        self.prev = None;
        self.line_has_content = false;
    }

    /// Nothing has been placed on the current line yet
    pub fn at_line_start(&self) -> bool {
        !self.line_has_content
    }

    /// Record that a glyph run ended at `x` with `last` as its final glyph
    pub fn commit(&mut self, x: f32, last: GlyphId) {
        self.x = x;
        self.prev = Some(last);
        self.line_has_content = true;
    }

    /// Skip an inter-word gap: advance by `width` and kern the next word
    /// against `space`
    pub fn skip_space(&mut self, width: f32, space: GlyphId) {
        self.x += width;
        self.prev = Some(space);
    }
}

/// Split text into hard lines on `\n`, dropping a trailing `\r` from each.
///
/// A trailing newline produces a final empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Split a line into words at runs of whitespace
pub fn split_words(line: &str) -> impl Iterator<Item = &str> {
    line.split_whitespace()
}
