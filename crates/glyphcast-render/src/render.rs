//! Drive layouts into sinks

use glyphcast_font::MetricsProvider;
use glyphcast_layout::{ContainerWidth, LayoutEngine, LayoutRequest, TextLayout};
use tiny_skia::Pixmap;

use crate::cache::{CachedGlyph, GlyphCache};
use crate::sink::{trace_outline, OutlineTransform, OutputSink};
use crate::vector::{Placement, VectorDocument};
use crate::{RenderError, Result};

/// Output of a cached render
#[derive(Debug, Clone)]
pub struct RenderedText {
    pub layout: TextLayout,
    /// Blitted raster, device pixels
    pub raster: Pixmap,
    /// Shared definitions and their placements
    pub vector: VectorDocument,
}

/// Lay out `text` and trace every glyph outline into `sink`, one `fill` per
/// glyph.
///
/// Layout completes before the first sink call, so an invalid request or
/// unresolvable character leaves the sink untouched.
pub fn render<S: OutputSink + ?Sized>(
    sink: &mut S,
    text: &str,
    font: &dyn MetricsProvider,
    request: &LayoutRequest,
) -> Result<TextLayout> {
    let layout = LayoutEngine::new(font).layout(text, request)?;

    for glyph in &layout.glyphs {
        let outline = font.outline(glyph.glyph);
        let transform = OutlineTransform::to_device(glyph.x, glyph.y, layout.scale);
        trace_outline(&outline, transform, sink);
        sink.fill();
    }

    tracing::debug!("Rendered {} glyphs immediately", layout.glyphs.len());
    Ok(layout)
}

/// Lay out `text` and compose output from a prebuilt glyph cache.
///
/// Every glyph is looked up before anything is drawn; a cache built for
/// another font fails with [`RenderError::CacheConsistency`].
pub fn render_cached(
    text: &str,
    font: &dyn MetricsProvider,
    cache: &GlyphCache,
    request: &LayoutRequest,
) -> Result<RenderedText> {
    let layout = LayoutEngine::new(font).layout(text, request)?;
    let entries = layout
        .glyphs
        .iter()
        .map(|glyph| cache.lookup(glyph))
        .collect::<Result<Vec<&CachedGlyph>>>()?;

    let (width, height) = surface_size(&layout, request);
    let mut raster = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;
    let mut vector = VectorDocument::new(width as f32, height as f32, request.pixel_ratio);
    vector.color = cache.options().color;

    for (glyph, entry) in layout.glyphs.iter().zip(&entries) {
        entry.raster.draw(&mut raster, glyph.x, glyph.y, layout.scale);
        vector.define(glyph.code_point(), &entry.vector);
        vector.place(Placement {
            code_point: glyph.code_point(),
            x: glyph.x,
            y: glyph.y,
            scale: layout.scale,
        });
    }

    tracing::debug!(
        "Rendered {} glyphs from cache, {} definitions, {}x{}px",
        layout.glyphs.len(),
        vector.definition_count(),
        width,
        height
    );

    Ok(RenderedText {
        layout,
        raster,
        vector,
    })
}

/// Device surface for a layout: the container width when bounded, the ink
/// width otherwise
pub fn surface_size(layout: &TextLayout, request: &LayoutRequest) -> (u32, u32) {
    let width = match request.width {
        ContainerWidth::Bounded(_) => request.device_width().ceil(),
        ContainerWidth::Unbounded => layout.width.ceil(),
    };
    (
        (width as u32).max(1),
        (layout.height.ceil() as u32).max(1),
    )
}
