//! The metrics provider interface consumed by layout and rendering

use crate::outline::{BoundingBox, GlyphOutline};

/// Glyph index inside a font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GlyphId(pub u16);

impl GlyphId {
    /// The `.notdef` glyph, always index 0
    pub const NOTDEF: GlyphId = GlyphId(0);

    pub fn is_notdef(self) -> bool {
        self == Self::NOTDEF
    }
}

impl From<ttf_parser::GlyphId> for GlyphId {
    fn from(id: ttf_parser::GlyphId) -> Self {
        GlyphId(id.0)
    }
}

impl From<GlyphId> for ttf_parser::GlyphId {
    fn from(id: GlyphId) -> Self {
        ttf_parser::GlyphId(id.0)
    }
}

/// Font-wide vertical metrics, in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    /// Units per em, always > 0
    pub units_per_em: u16,
    /// Ascender (above baseline)
    pub ascender: i16,
    /// Descender (below baseline, usually negative)
    pub descender: i16,
    /// Line gap
    pub line_gap: i16,
}

impl FontMetrics {
    /// Font units to device pixels at the given size
    pub fn scale(&self, font_size: f32) -> f32 {
        font_size / self.units_per_em as f32
    }

    /// Line height in device pixels: `scale * (ascender - descender)`
    pub fn line_height(&self, font_size: f32) -> f32 {
        self.scale(font_size) * (self.ascender as f32 - self.descender as f32)
    }
}

/// Source of glyph metrics, kerning and outlines.
///
/// All values are in font units. Implementations are expected to be cheap to
/// query repeatedly; the layout engine calls into them once per character.
pub trait MetricsProvider {
    /// Font-wide metrics
    fn metrics(&self) -> FontMetrics;

    /// Glyph mapped to a character, `None` when the font has no mapping
    fn glyph_index(&self, c: char) -> Option<GlyphId>;

    /// Horizontal advance of a glyph
    fn advance_width(&self, glyph: GlyphId) -> f32;

    /// Kerning adjustment between an ordered glyph pair (negative = tighter)
    fn kerning(&self, left: GlyphId, right: GlyphId) -> f32;

    /// Bounding box of the glyph outline, `None` for empty glyphs such as space
    fn bounding_box(&self, glyph: GlyphId) -> Option<BoundingBox>;

    /// Glyph outline, empty for glyphs without contours
    fn outline(&self, glyph: GlyphId) -> GlyphOutline;

    /// Every character the font maps to a glyph, paired with that glyph
    fn code_points(&self) -> Vec<(char, GlyphId)>;

    /// Offset from the glyph origin to the left-most outline point
    fn left_side_bearing(&self, glyph: GlyphId) -> f32 {
        self.bounding_box(glyph).map(|b| b.x_min).unwrap_or(0.0)
    }

    /// Glyph for a character, falling back to `.notdef` when unmapped
    fn glyph_for(&self, c: char) -> GlyphId {
        match self.glyph_index(c) {
            Some(glyph) => glyph,
            None => {
                tracing::debug!("No glyph for {:?} (U+{:04X}), using .notdef", c, c as u32);
                GlyphId::NOTDEF
            }
        }
    }

    fn units_per_em(&self) -> u16 {
        self.metrics().units_per_em
    }

    fn ascender(&self) -> i16 {
        self.metrics().ascender
    }

    fn descender(&self) -> i16 {
        self.metrics().descender
    }
}

impl<T: MetricsProvider + ?Sized> MetricsProvider for &T {
    fn metrics(&self) -> FontMetrics {
        (**self).metrics()
    }

    fn glyph_index(&self, c: char) -> Option<GlyphId> {
        (**self).glyph_index(c)
    }

    fn advance_width(&self, glyph: GlyphId) -> f32 {
        (**self).advance_width(glyph)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f32 {
        (**self).kerning(left, right)
    }

    fn bounding_box(&self, glyph: GlyphId) -> Option<BoundingBox> {
        (**self).bounding_box(glyph)
    }

    fn outline(&self, glyph: GlyphId) -> GlyphOutline {
        (**self).outline(glyph)
    }

    fn code_points(&self) -> Vec<(char, GlyphId)> {
        (**self).code_points()
    }

    fn left_side_bearing(&self, glyph: GlyphId) -> f32 {
        (**self).left_side_bearing(glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_line_height() {
        let metrics = FontMetrics {
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            line_gap: 0,
        };
        assert_eq!(metrics.scale(20.0), 0.02);
        assert!((metrics.line_height(20.0) - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_notdef() {
        assert!(GlyphId(0).is_notdef());
        assert!(!GlyphId(3).is_notdef());
    }
}
