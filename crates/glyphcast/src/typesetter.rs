//! A font bound to its glyph cache

use std::sync::Arc;

use glyphcast_font::MetricsProvider;
use glyphcast_layout::{LayoutEngine, LayoutRequest, TextLayout};
use glyphcast_render::{GlyphCache, OutputSink, RenderedText};

use crate::{Config, Result};

/// Renders text in one font.
///
/// Holds the font and a glyph cache built for it. The cache is shared
/// through an `Arc`, so renders that cloned it keep a consistent snapshot
/// while the font is replaced.
pub struct Typesetter<F> {
    font: F,
    cache: Arc<GlyphCache>,
    config: Config,
}

impl<F: MetricsProvider> Typesetter<F> {
    /// Build the glyph cache for `font`
    pub fn new(font: F, config: Config) -> Result<Self> {
        let cache = Arc::new(build_cache(&font, &config)?);
        Ok(Self {
            font,
            cache,
            config,
        })
    }

    /// Switch to another font.
    ///
    /// The new cache is built completely before anything is swapped, so a
    /// failed build leaves the current font and cache in place.
    pub fn replace_font(&mut self, font: F) -> Result<()> {
        let cache = Arc::new(build_cache(&font, &self.config)?);
        self.font = font;
        self.cache = cache;
        tracing::info!("Font replaced, {} glyphs cached", self.cache.len());
        Ok(())
    }

    pub fn font(&self) -> &F {
        &self.font
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the current glyph cache
    pub fn cache(&self) -> Arc<GlyphCache> {
        Arc::clone(&self.cache)
    }

    pub fn request(&self) -> LayoutRequest {
        self.config.request()
    }

    /// Lay out without rendering
    pub fn layout(&self, text: &str) -> Result<TextLayout> {
        Ok(LayoutEngine::new(&self.font).layout(text, &self.request())?)
    }

    /// Render from the glyph cache
    pub fn render(&self, text: &str) -> Result<RenderedText> {
        Ok(glyphcast_render::render_cached(
            text,
            &self.font,
            &self.cache,
            &self.request(),
        )?)
    }

    /// Trace outlines straight into `sink`
    pub fn render_to<S: OutputSink + ?Sized>(&self, sink: &mut S, text: &str) -> Result<TextLayout> {
        Ok(glyphcast_render::render(
            sink,
            text,
            &self.font,
            &self.request(),
        )?)
    }
}

fn build_cache(font: &dyn MetricsProvider, config: &Config) -> Result<GlyphCache> {
    let options = config.cache_options(font.units_per_em())?;
    Ok(GlyphCache::build(font, &options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use glyphcast_font::{GlyphOutline, SyntheticFont};
    use glyphcast_render::{RenderError, VectorSink};

    fn config() -> Config {
        Config {
            cache_resolution: Some(0.05),
            ..Config::default()
        }
    }

    fn letters(chars: &str) -> SyntheticFont {
        chars.chars().fold(SyntheticFont::new(1000, 800, -200), |font, c| {
            font.with_glyph(c, 500.0, GlyphOutline::rect(50.0, 0.0, 450.0, 600.0))
        })
    }

    #[test]
    fn test_render_both_modes() {
        let typesetter = Typesetter::new(SyntheticFont::blocks(), config()).unwrap();

        let rendered = typesetter.render("hello world").unwrap();
        assert_eq!(rendered.vector.placements().len(), 10);

        let mut sink = VectorSink::new();
        let layout = typesetter.render_to(&mut sink, "hello world").unwrap();
        assert_eq!(layout, rendered.layout);
        assert_eq!(sink.paths().len(), 10);
    }

    #[test]
    fn test_replace_font_swaps_cache() {
        let mut typesetter = Typesetter::new(letters("ab"), config()).unwrap();
        let old = typesetter.cache();
        assert_eq!(old.len(), 2);

        typesetter.replace_font(letters("abcd")).unwrap();
        assert_eq!(typesetter.cache().len(), 4);
        assert!(typesetter.render("cab dab").is_ok());

        // Holders of the old cache keep their snapshot
        assert_eq!(old.len(), 2);
        assert!(!Arc::ptr_eq(&old, &typesetter.cache()));
    }

    #[test]
    fn test_stale_cache_is_detected() {
        let old = Typesetter::new(letters("ab"), config()).unwrap();
        let new = Typesetter::new(letters("abc"), config()).unwrap();
        let err = glyphcast_render::render_cached("cab", new.font(), &old.cache(), &new.request())
            .unwrap_err();
        assert!(matches!(err, RenderError::CacheConsistency { ch: 'c', .. }));
    }

    #[test]
    fn test_failed_replace_keeps_current_font() {
        let mut typesetter = Typesetter::new(letters("ab"), config()).unwrap();
        typesetter.config.cache_resolution = Some(0.0);

        let err = typesetter.replace_font(letters("xyz")).unwrap_err();
        assert!(matches!(
            err,
            Error::Render(RenderError::InvalidResolution { value }) if value == 0.0
        ));
        assert!(typesetter.font().glyph_index('a').is_some());
        assert_eq!(typesetter.cache().len(), 2);
    }

    #[test]
    fn test_invalid_request_is_layout_error() {
        let config = Config {
            font_size: -1.0,
            ..config()
        };
        // The cache does not depend on the font size when the resolution is set
        let typesetter = Typesetter::new(SyntheticFont::blocks(), config).unwrap();
        assert!(matches!(typesetter.layout("abc"), Err(Error::Layout(_))));
        assert!(matches!(typesetter.render("abc"), Err(Error::Render(_))));
    }
}
