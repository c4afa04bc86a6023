//! Glyph outlines in font units

/// A single path command, coordinates in font units with y pointing up
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    QuadTo { x1: f32, y1: f32, x: f32, y: f32 },
    CubicTo { x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32 },
    Close,
}

/// A complete glyph outline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    pub commands: Vec<PathCommand>,
}

impl GlyphOutline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned rectangle contour, wound counter-clockwise
    pub fn rect(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        let mut outline = Self::new();
        outline.push_rect(x_min, y_min, x_max, y_max);
        outline
    }

    /// Append a closed rectangle contour
    pub fn push_rect(&mut self, x_min: f32, y_min: f32, x_max: f32, y_max: f32) {
        self.commands.extend([
            PathCommand::MoveTo { x: x_min, y: y_min },
            PathCommand::LineTo { x: x_max, y: y_min },
            PathCommand::LineTo { x: x_max, y: y_max },
            PathCommand::LineTo { x: x_min, y: y_max },
            PathCommand::Close,
        ]);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathCommand> {
        self.commands.iter()
    }

    /// Bounding box of the on- and off-curve points.
    ///
    /// Control points are included, so this can be slightly larger than the
    /// tight box a font stores in its `glyf`/`CFF` tables.
    pub fn control_bounds(&self) -> Option<BoundingBox> {
        let mut bounds: Option<BoundingBox> = None;
        let mut add = |x: f32, y: f32| {
            bounds = Some(match bounds {
                Some(b) => b.include(x, y),
                None => BoundingBox::new(x, y, x, y),
            });
        };
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => add(x, y),
                PathCommand::QuadTo { x1, y1, x, y } => {
                    add(x1, y1);
                    add(x, y);
                }
                PathCommand::CubicTo { x1, y1, x2, y2, x, y } => {
                    add(x1, y1);
                    add(x2, y2);
                    add(x, y);
                }
                PathCommand::Close => {}
            }
        }
        bounds
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::QuadTo { x1, y1, x, y });
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.commands.push(PathCommand::CubicTo { x1, y1, x2, y2, x, y });
    }

    fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }
}

/// Glyph bounding box in font units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_min: f32,
    pub y_min: f32,
    pub x_max: f32,
    pub y_max: f32,
}

impl BoundingBox {
    pub fn new(x_min: f32, y_min: f32, x_max: f32, y_max: f32) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }

    pub fn width(&self) -> f32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f32 {
        self.y_max - self.y_min
    }

    /// Grow the box to contain a point
    pub fn include(self, x: f32, y: f32) -> Self {
        Self {
            x_min: self.x_min.min(x),
            y_min: self.y_min.min(y),
            x_max: self.x_max.max(x),
            y_max: self.y_max.max(y),
        }
    }
}

impl From<ttf_parser::Rect> for BoundingBox {
    fn from(rect: ttf_parser::Rect) -> Self {
        Self {
            x_min: rect.x_min as f32,
            y_min: rect.y_min as f32,
            x_max: rect.x_max as f32,
            y_max: rect.y_max as f32,
        }
    }
}
