//! Font face backed by ttf-parser

use std::path::Path;
use std::sync::Arc;

use ttf_parser::gpos::{PairAdjustment, PositioningSubtable};
use ttf_parser::{Face, Tag};

use crate::outline::{BoundingBox, GlyphOutline};
use crate::provider::{FontMetrics, GlyphId, MetricsProvider};
use crate::{FontError, Result};

/// Parsed font face.
///
/// Owns the font bytes and re-creates a `ttf_parser::Face` per query.
/// Parsing only validates the header and builds the table directory, so it is
/// cheap compared to the outline and kerning lookups that follow.
#[derive(Clone)]
pub struct FontFace {
    data: Arc<[u8]>,
    index: u32,
    metrics: FontMetrics,
    glyph_count: u16,
}

impl FontFace {
    /// Parse a font face from data
    pub fn from_bytes(data: impl Into<Arc<[u8]>>, index: u32) -> Result<Self> {
        let data = data.into();
        let face = Face::parse(&data, index).map_err(|e| FontError::Parse(e.to_string()))?;

        let metrics = FontMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
        };
        if metrics.units_per_em == 0 {
            return Err(FontError::Parse("units per em is zero".to_string()));
        }
        let glyph_count = face.number_of_glyphs();

        tracing::debug!(
            "Loaded face #{}: {} glyphs, {} units/em, ascender {}, descender {}",
            index,
            glyph_count,
            metrics.units_per_em,
            metrics.ascender,
            metrics.descender
        );

        Ok(Self {
            data,
            index,
            metrics,
            glyph_count,
        })
    }

    /// Load the first face of a font file
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data, 0)
    }

    /// Number of glyphs in font
    pub fn number_of_glyphs(&self) -> u16 {
        self.glyph_count
    }

    fn face(&self) -> Option<Face<'_>> {
        // The bytes were validated in `from_bytes`, so this only fails if the
        // same data stops parsing, which ttf-parser never does.
        Face::parse(&self.data, self.index).ok()
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("index", &self.index)
            .field("bytes", &self.data.len())
            .field("metrics", &self.metrics)
            .field("glyph_count", &self.glyph_count)
            .finish()
    }
}

impl MetricsProvider for FontFace {
    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn glyph_index(&self, c: char) -> Option<GlyphId> {
        self.face()?.glyph_index(c).map(GlyphId::from)
    }

    fn advance_width(&self, glyph: GlyphId) -> f32 {
        self.face()
            .and_then(|face| face.glyph_hor_advance(glyph.into()))
            .unwrap_or(0) as f32
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        let (left, right) = (left.into(), right.into());
        kern_table_kerning(&face, left, right)
            .or_else(|| gpos_kerning(&face, left, right))
            .unwrap_or(0) as f32
    }

    fn bounding_box(&self, glyph: GlyphId) -> Option<BoundingBox> {
        self.face()?.glyph_bounding_box(glyph.into()).map(BoundingBox::from)
    }

    fn left_side_bearing(&self, glyph: GlyphId) -> f32 {
        let Some(face) = self.face() else {
            return 0.0;
        };
        match face.glyph_hor_side_bearing(glyph.into()) {
            Some(lsb) => lsb as f32,
            None => face
                .glyph_bounding_box(glyph.into())
                .map(|b| b.x_min as f32)
                .unwrap_or(0.0),
        }
    }

    fn outline(&self, glyph: GlyphId) -> GlyphOutline {
        let mut outline = GlyphOutline::new();
        if let Some(face) = self.face() {
            // Returns None for glyphs without contours; the builder stays empty.
            let _ = face.outline_glyph(glyph.into(), &mut outline);
        }
        outline
    }

    fn code_points(&self) -> Vec<(char, GlyphId)> {
        let Some(face) = self.face() else {
            return Vec::new();
        };
        let Some(cmap) = face.tables().cmap else {
            return Vec::new();
        };

        let mut code_points = Vec::new();
        for subtable in cmap.subtables.into_iter().filter(|st| st.is_unicode()) {
            subtable.codepoints(|cp| {
                let Some(c) = char::from_u32(cp) else {
                    return;
                };
                if let Some(glyph) = subtable.glyph_index(cp) {
                    if glyph.0 != 0 {
                        code_points.push((c, GlyphId::from(glyph)));
                    }
                }
            });
        }
        code_points.sort_unstable_by_key(|(c, _)| *c);
        code_points.dedup_by_key(|(c, _)| *c);
        code_points
    }
}

const KERN: Tag = Tag::from_bytes(b"kern");

/// Pair value from the legacy `kern` table
fn kern_table_kerning(
    face: &Face<'_>,
    left: ttf_parser::GlyphId,
    right: ttf_parser::GlyphId,
) -> Option<i16> {
    face.tables()
        .kern?
        .subtables
        .into_iter()
        .filter(|st| st.horizontal && !st.variable)
        .find_map(|st| st.glyphs_kerning(left, right))
}

/// First non-zero pair adjustment among the lookups of the GPOS `kern`
/// feature. Only the first glyph's x advance is used.
fn gpos_kerning(
    face: &Face<'_>,
    left: ttf_parser::GlyphId,
    right: ttf_parser::GlyphId,
) -> Option<i16> {
    let gpos = face.tables().gpos?;
    gpos.features
        .into_iter()
        .filter(|feature| feature.tag == KERN)
        .flat_map(|feature| feature.lookup_indices)
        .filter_map(|index| gpos.lookups.get(index))
        .flat_map(|lookup| lookup.subtables.into_iter::<PositioningSubtable>())
        .find_map(|subtable| match subtable {
            PositioningSubtable::Pair(pair) => {
                pair_x_advance(&pair, left, right).filter(|&value| value != 0)
            }
            _ => None,
        })
}

fn pair_x_advance(
    pair: &PairAdjustment<'_>,
    left: ttf_parser::GlyphId,
    right: ttf_parser::GlyphId,
) -> Option<i16> {
    let (first, _) = match pair {
        PairAdjustment::Format1 { coverage, sets } => {
            sets.get(coverage.get(left)?)?.get(right)?
        }
        PairAdjustment::Format2 {
            coverage,
            classes,
            matrix,
        } => {
            coverage.get(left)?;
            matrix.get((classes.0.get(left), classes.1.get(right)))?
        }
    };
    Some(first.x_advance)
}
