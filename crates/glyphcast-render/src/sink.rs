//! The drawing protocol shared by raster and vector output

use glyphcast_font::{GlyphOutline, PathCommand};

/// Receiver for path construction commands.
///
/// Commands arrive in outline order; `fill` ends the current shape.
pub trait OutputSink {
    /// Start a new contour
    fn move_to(&mut self, x: f32, y: f32);
    /// Straight line to point
    fn line_to(&mut self, x: f32, y: f32);
    /// Cubic bezier curve
    fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32);
    /// Quadratic bezier curve
    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32);
    /// Close the current contour
    fn close_path(&mut self);
    /// Fill everything traced since the previous `fill`
    fn fill(&mut self);
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn move_to(&mut self, x: f32, y: f32) {
        (**self).move_to(x, y)
    }

    fn line_to(&mut self, x: f32, y: f32) {
        (**self).line_to(x, y)
    }

    fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        (**self).cubic_to(x1, y1, x2, y2, x, y)
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        (**self).quad_to(x1, y1, x, y)
    }

    fn close_path(&mut self) {
        (**self).close_path()
    }

    fn fill(&mut self) {
        (**self).fill()
    }
}

/// Maps font-unit outline points into sink coordinates:
/// `(origin_x + scale_x * x, origin_y + scale_y * y)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineTransform {
    pub origin_x: f32,
    pub origin_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl OutlineTransform {
    /// Font units in, font units out
    pub const IDENTITY: OutlineTransform = OutlineTransform {
        origin_x: 0.0,
        origin_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Place a glyph origin at a device-space pen position; y is flipped
    /// because fonts are y-up and devices are y-down
    pub fn to_device(x: f32, y: f32, scale: f32) -> Self {
        Self {
            origin_x: x,
            origin_y: y,
            scale_x: scale,
            scale_y: -scale,
        }
    }

    #[inline]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.origin_x + self.scale_x * x,
            self.origin_y + self.scale_y * y,
        )
    }
}

impl Default for OutlineTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Replay an outline into a sink. Does not call `fill`.
pub fn trace_outline<S: OutputSink + ?Sized>(
    outline: &GlyphOutline,
    transform: OutlineTransform,
    sink: &mut S,
) {
    for cmd in outline.iter() {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                let (x, y) = transform.apply(x, y);
                sink.move_to(x, y);
            }
            PathCommand::LineTo { x, y } => {
                let (x, y) = transform.apply(x, y);
                sink.line_to(x, y);
            }
            PathCommand::QuadTo { x1, y1, x, y } => {
                let (x1, y1) = transform.apply(x1, y1);
                let (x, y) = transform.apply(x, y);
                sink.quad_to(x1, y1, x, y);
            }
            PathCommand::CubicTo { x1, y1, x2, y2, x, y } => {
                let (x1, y1) = transform.apply(x1, y1);
                let (x2, y2) = transform.apply(x2, y2);
                let (x, y) = transform.apply(x, y);
                sink.cubic_to(x1, y1, x2, y2, x, y);
            }
            PathCommand::Close => sink.close_path(),
        }
    }
}
