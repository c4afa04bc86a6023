//! In-memory fonts built from code
//!
//! Used by the test suites across the workspace and handy for tooling that
//! needs deterministic metrics without shipping font files.

use std::collections::{BTreeMap, HashMap};

use crate::outline::{BoundingBox, GlyphOutline};
use crate::provider::{FontMetrics, GlyphId, MetricsProvider};

#[derive(Debug, Clone)]
struct SyntheticGlyph {
    advance: f32,
    outline: GlyphOutline,
    bbox: Option<BoundingBox>,
}

impl SyntheticGlyph {
    fn new(advance: f32, outline: GlyphOutline) -> Self {
        let bbox = outline.control_bounds();
        Self {
            advance,
            outline,
            bbox,
        }
    }
}

/// A font whose glyphs, metrics and kerning pairs are defined in code
#[derive(Debug, Clone)]
pub struct SyntheticFont {
    metrics: FontMetrics,
    glyphs: Vec<SyntheticGlyph>,
    cmap: BTreeMap<char, GlyphId>,
    kerning: HashMap<(GlyphId, GlyphId), f32>,
}

impl SyntheticFont {
    /// Create a font containing only `.notdef` (a half-em box)
    pub fn new(units_per_em: u16, ascender: i16, descender: i16) -> Self {
        let em = units_per_em.max(1) as f32;
        let notdef = SyntheticGlyph::new(
            em * 0.5,
            GlyphOutline::rect(em * 0.05, 0.0, em * 0.45, ascender.max(1) as f32 * 0.875),
        );
        Self {
            metrics: FontMetrics {
                units_per_em: units_per_em.max(1),
                ascender,
                descender,
                line_gap: 0,
            },
            glyphs: vec![notdef],
            cmap: BTreeMap::new(),
            kerning: HashMap::new(),
        }
    }

    /// Map a character to a new glyph
    pub fn with_glyph(mut self, c: char, advance: f32, outline: GlyphOutline) -> Self {
        let id = GlyphId(self.glyphs.len() as u16);
        self.glyphs.push(SyntheticGlyph::new(advance, outline));
        self.cmap.insert(c, id);
        self
    }

    /// Add a kerning pair; pairs naming unmapped characters are ignored
    pub fn with_kerning(mut self, left: char, right: char, value: f32) -> Self {
        match (self.cmap.get(&left), self.cmap.get(&right)) {
            (Some(&l), Some(&r)) => {
                self.kerning.insert((l, r), value);
            }
            _ => tracing::debug!("Ignoring kerning pair {:?}/{:?}: unmapped", left, right),
        }
        self
    }

    /// Printable ASCII as solid blocks.
    ///
    /// 1000 units per em, ascender 800, descender -200. Every glyph is a
    /// rectangle from 50 units right of the origin to 50 units before the
    /// advance, 700 units tall. Advances: 300 for narrow punctuation and
    /// `i`, `j`, `l`; 900 for `m`, `w`, `M`, `W`; 600 otherwise; space is 250
    /// with no outline. Kerning: `AV`/`VA` -80, `To` -60.
    pub fn blocks() -> Self {
        let mut font = Self::new(1000, 800, -200).with_glyph(' ', 250.0, GlyphOutline::new());
        for c in '!'..='~' {
            let advance = match c {
                'i' | 'j' | 'l' | '!' | '.' | ',' | '\'' | '|' | ':' | ';' => 300.0,
                'm' | 'w' | 'M' | 'W' => 900.0,
                _ => 600.0,
            };
            font = font.with_glyph(c, advance, GlyphOutline::rect(50.0, 0.0, advance - 50.0, 700.0));
        }
        font.with_kerning('A', 'V', -80.0)
            .with_kerning('V', 'A', -80.0)
            .with_kerning('T', 'o', -60.0)
    }

    fn glyph(&self, glyph: GlyphId) -> Option<&SyntheticGlyph> {
        self.glyphs.get(glyph.0 as usize)
    }
}

impl MetricsProvider for SyntheticFont {
    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.cmap.get(&c).copied()
    }

    fn advance_width(&self, glyph: GlyphId) -> f32 {
        self.glyph(glyph).map(|g| g.advance).unwrap_or(0.0)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f32 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0.0)
    }

    fn bounding_box(&self, glyph: GlyphId) -> Option<BoundingBox> {
        self.glyph(glyph).and_then(|g| g.bbox)
    }

    fn outline(&self, glyph: GlyphId) -> GlyphOutline {
        self.glyph(glyph).map(|g| g.outline.clone()).unwrap_or_default()
    }

    fn code_points(&self) -> Vec<(char, GlyphId)> {
        self.cmap.iter().map(|(&c, &g)| (c, g)).collect()
    }
}
