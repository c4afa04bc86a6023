//! Raster output: outlines filled into tiny-skia pixmaps

use glyphcast_font::{BoundingBox, GlyphOutline};
use tiny_skia::{
    Color, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use crate::sink::{trace_outline, OutlineTransform, OutputSink};
use crate::{RenderError, Result};

/// Output sink that fills each traced shape into a pixmap.
///
/// Incoming coordinates pass through `transform` before filling, which is
/// how cached glyph rasters flip font units into pixel space.
pub struct RasterSink {
    pixmap: Pixmap,
    builder: PathBuilder,
    paint: Paint<'static>,
    transform: Transform,
    fill_rule: FillRule,
    fills: usize,
}

impl RasterSink {
    /// Create a sink over a new transparent pixmap
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;
        Ok(Self::from_pixmap(pixmap))
    }

    /// Draw into an existing pixmap
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        let mut paint = Paint::default();
        paint.set_color(Color::BLACK);
        paint.anti_alias = true;

        Self {
            pixmap,
            builder: PathBuilder::new(),
            paint,
            transform: Transform::identity(),
            fill_rule: FillRule::Winding,
            fills: 0,
        }
    }

    /// Set fill color
    pub fn with_color(mut self, color: Color) -> Self {
        self.paint.set_color(color);
        self
    }

    /// Set the transform applied to incoming coordinates
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Number of non-empty shapes filled so far
    pub fn fill_count(&self) -> usize {
        self.fills
    }
}

impl OutputSink for RasterSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn close_path(&mut self) {
        self.builder.close();
    }

    fn fill(&mut self) {
        let builder = std::mem::replace(&mut self.builder, PathBuilder::new());
        // Empty glyphs (space) produce no path
        if let Some(path) = builder.finish() {
            self.pixmap
                .fill_path(&path, &self.paint, self.fill_rule, self.transform, None);
            self.fills += 1;
        }
    }
}

/// A glyph pre-rendered at font-unit resolution
#[derive(Debug, Clone)]
pub struct GlyphRaster {
    pixmap: Pixmap,
    /// Font-unit offset from the bitmap's left edge to the glyph origin (`-xMin`)
    pub origin_x: f32,
    /// Font-unit offset from the bitmap's top edge to the baseline (`yMax`)
    pub origin_y: f32,
    /// Pixels per font unit in `pixmap`
    pub resolution: f32,
}

impl GlyphRaster {
    /// Rasterize an outline into a bitmap covering its bounding box.
    ///
    /// At resolution 1.0 the bitmap is `xMax - xMin + 1` by
    /// `yMax - yMin + 1` pixels; glyphs without bounds get a 1x1 bitmap.
    pub fn rasterize(
        outline: &GlyphOutline,
        bbox: Option<BoundingBox>,
        resolution: f32,
        color: Color,
    ) -> Result<Self> {
        let (width, height, origin_x, origin_y) = match bbox {
            Some(b) => (
                (b.width() * resolution).ceil() as u32 + 1,
                (b.height() * resolution).ceil() as u32 + 1,
                -b.x_min,
                b.y_max,
            ),
            None => (1, 1, 0.0, 0.0),
        };

        let pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;
        // translate(origin) then flip y, all in pixels
        let transform = Transform::from_row(
            resolution,
            0.0,
            0.0,
            -resolution,
            origin_x * resolution,
            origin_y * resolution,
        );
        let mut sink = RasterSink::from_pixmap(pixmap)
            .with_color(color)
            .with_transform(transform);
        trace_outline(outline, OutlineTransform::IDENTITY, &mut sink);
        sink.fill();

        Ok(Self {
            pixmap: sink.into_pixmap(),
            origin_x,
            origin_y,
            resolution,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Blit onto `target` with the glyph origin at device `(x, y)`.
    ///
    /// `scale` is device pixels per font unit. Only the area under the scaled
    /// bitmap is touched.
    pub fn draw(&self, target: &mut Pixmap, x: f32, y: f32, scale: f32) {
        let k = scale / self.resolution;
        let transform = Transform::from_row(
            k,
            0.0,
            0.0,
            k,
            x - self.origin_x * scale,
            y - self.origin_y * scale,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        target.draw_pixmap(0, 0, self.pixmap.as_ref(), &paint, transform, None);
    }
}
