//! Glyph cache: one raster and one vector form per mapped character

use std::collections::HashMap;

use glyphcast_font::{GlyphId, MetricsProvider};
use glyphcast_layout::PositionedGlyph;
use tiny_skia::Color;

use crate::raster::GlyphRaster;
use crate::vector::GlyphVector;
use crate::{RenderError, Result};

/// Glyph cache build options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheOptions {
    /// Bitmap pixels per font unit; 1.0 keeps rasters at font-unit size
    pub resolution: f32,
    /// Raster fill color
    pub color: Color,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            color: Color::BLACK,
        }
    }
}

impl CacheOptions {
    /// Resolution that keeps rasters near `oversample` pixels per device
    /// pixel for one rendering size
    pub fn for_size(units_per_em: u16, device_font_size: f32, oversample: f32) -> Self {
        let upem = f32::from(units_per_em.max(1));
        Self {
            resolution: (device_font_size * oversample / upem).clamp(f32::EPSILON, 1.0),
            ..Self::default()
        }
    }
}

/// Both cached forms of a glyph
#[derive(Debug, Clone)]
pub struct CachedGlyph {
    pub glyph: GlyphId,
    pub raster: GlyphRaster,
    pub vector: GlyphVector,
}

/// Per-font glyph cache keyed by code point.
///
/// Built eagerly for every character the font maps, plus `.notdef` for
/// characters it does not. The cache is immutable after `build` and can be
/// shared across threads.
#[derive(Debug, Clone)]
pub struct GlyphCache {
    glyphs: HashMap<u32, CachedGlyph>,
    notdef: CachedGlyph,
    options: CacheOptions,
}

impl GlyphCache {
    /// Rasterize and trace every mapped glyph of `font`
    pub fn build(font: &dyn MetricsProvider, options: &CacheOptions) -> Result<Self> {
        if !options.resolution.is_finite() || options.resolution <= 0.0 {
            return Err(RenderError::InvalidResolution {
                value: options.resolution,
            });
        }

        let code_points = font.code_points();
        let mut glyphs = HashMap::with_capacity(code_points.len());
        for (ch, glyph) in code_points {
            glyphs.insert(ch as u32, Self::cache_glyph(font, glyph, options)?);
        }
        let notdef = Self::cache_glyph(font, GlyphId::NOTDEF, options)?;

        tracing::debug!(
            "Built glyph cache: {} glyphs at {} px/unit",
            glyphs.len(),
            options.resolution
        );

        Ok(Self {
            glyphs,
            notdef,
            options: *options,
        })
    }

    fn cache_glyph(
        font: &dyn MetricsProvider,
        glyph: GlyphId,
        options: &CacheOptions,
    ) -> Result<CachedGlyph> {
        let outline = font.outline(glyph);
        let raster = GlyphRaster::rasterize(
            &outline,
            font.bounding_box(glyph),
            options.resolution,
            options.color,
        )?;
        Ok(CachedGlyph {
            glyph,
            raster,
            vector: GlyphVector::from_outline(&outline),
        })
    }

    /// Cache entry for a placed glyph.
    ///
    /// Fallback glyphs resolve to `.notdef`. A mapped character without an
    /// entry means the cache was built for a different font.
    pub fn lookup(&self, glyph: &PositionedGlyph) -> Result<&CachedGlyph> {
        if glyph.fallback {
            return Ok(&self.notdef);
        }
        self.glyphs
            .get(&glyph.code_point())
            .ok_or(RenderError::CacheConsistency {
                ch: glyph.ch,
                code_point: glyph.code_point(),
            })
    }

    pub fn get(&self, c: char) -> Option<&CachedGlyph> {
        self.glyphs.get(&(c as u32))
    }

    pub fn notdef(&self) -> &CachedGlyph {
        &self.notdef
    }

    pub fn contains(&self, c: char) -> bool {
        self.glyphs.contains_key(&(c as u32))
    }

    /// Number of mapped characters cached, `.notdef` excluded
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Cached code points in ascending order
    pub fn code_points(&self) -> Vec<u32> {
        let mut cps: Vec<u32> = self.glyphs.keys().copied().collect();
        cps.sort_unstable();
        cps
    }

    pub fn resolution(&self) -> f32 {
        self.options.resolution
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }
}
