//! Vector output: SVG path data, shared definitions and placements

use std::collections::BTreeMap;
use std::fmt::Write;

use glyphcast_font::GlyphOutline;
use svg::node::element::{Definitions, Path, Use};
use svg::Document;
use tiny_skia::Color;

use crate::sink::{trace_outline, OutlineTransform, OutputSink};

/// Decimal places kept in path data
const DEFAULT_PRECISION: usize = 4;

/// Format a coordinate with trailing zeros stripped
fn fmt_coord(v: f32, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_owned()
    } else {
        s
    };
    if s == "-0" {
        "0".to_owned()
    } else {
        s
    }
}

/// CSS `#rrggbb` for the color channels; alpha goes to `fill-opacity`
fn css_rgb(color: Color) -> String {
    let c = color.to_color_u8();
    format!("#{:02x}{:02x}{:02x}", c.red(), c.green(), c.blue())
}

fn with_fill(doc: Document, color: Color) -> Document {
    let doc = doc.set("fill", css_rgb(color));
    if color.alpha() < 1.0 {
        doc.set("fill-opacity", fmt_coord(color.alpha(), 3))
    } else {
        doc
    }
}

/// Output sink that writes SVG path data.
///
/// Commands are appended to the current path in emission order; `fill`
/// commits the current path as a standalone shape and starts a new one.
#[derive(Debug, Clone, Default)]
pub struct VectorSink {
    current: String,
    paths: Vec<String>,
}

impl VectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path data traced since the last `fill`
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Committed paths, one per non-empty `fill`
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Wrap the committed paths in an SVG document of the given device size
    pub fn to_svg(&self, width: f32, height: f32, color: Color) -> Document {
        let mut doc = with_fill(
            Document::new()
                .set("xmlns", "http://www.w3.org/2000/svg")
                .set(
                    "viewBox",
                    format!("0 0 {} {}", fmt_coord(width, 2), fmt_coord(height, 2)),
                ),
            color,
        );
        for d in &self.paths {
            doc = doc.add(Path::new().set("d", d.as_str()));
        }
        doc
    }

    fn point(&mut self, x: f32, y: f32) {
        let _ = write!(
            self.current,
            "{},{}",
            fmt_coord(x, DEFAULT_PRECISION),
            fmt_coord(y, DEFAULT_PRECISION)
        );
    }
}

impl OutputSink for VectorSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.current.push('M');
        self.point(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.current.push('L');
        self.point(x, y);
    }

    fn cubic_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.current.push('C');
        self.point(x1, y1);
        self.current.push(',');
        self.point(x2, y2);
        self.current.push(',');
        self.point(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.current.push('Q');
        self.point(x1, y1);
        self.current.push(',');
        self.point(x, y);
    }

    fn close_path(&mut self) {
        self.current.push('Z');
    }

    fn fill(&mut self) {
        if !self.current.is_empty() {
            self.paths.push(std::mem::take(&mut self.current));
        }
    }
}

/// Path data of one glyph in font units, y-up
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphVector {
    path_data: String,
}

impl GlyphVector {
    /// Trace an outline without transforming it
    pub fn from_outline(outline: &GlyphOutline) -> Self {
        let mut sink = VectorSink::new();
        trace_outline(outline, OutlineTransform::IDENTITY, &mut sink);
        Self {
            path_data: std::mem::take(&mut sink.current),
        }
    }

    pub fn path_data(&self) -> &str {
        &self.path_data
    }

    pub fn is_empty(&self) -> bool {
        self.path_data.is_empty()
    }
}

/// A reference to a shared definition at a device position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Code point of the referenced definition
    pub code_point: u32,
    /// Glyph origin, device pixels
    pub x: f32,
    pub y: f32,
    /// Device pixels per font unit
    pub scale: f32,
}

impl Placement {
    /// Fragment reference to the definition
    pub fn href(&self) -> String {
        format!("#{}", VectorDocument::definition_id(self.code_point))
    }

    /// SVG transform placing the definition
    pub fn transform(&self) -> String {
        format!(
            "translate({} {}) scale({})",
            fmt_coord(self.x, DEFAULT_PRECISION),
            fmt_coord(self.y, DEFAULT_PRECISION),
            fmt_coord(self.scale, 6)
        )
    }
}

/// Vector output of a cached render: one definition per distinct character
/// and one placement per glyph occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    /// Device width
    pub width: f32,
    /// Device height
    pub height: f32,
    /// Device pixels per CSS pixel
    pub pixel_ratio: f32,
    /// Fill color for every glyph
    pub color: Color,
    definitions: BTreeMap<u32, String>,
    placements: Vec<Placement>,
}

impl VectorDocument {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
            color: Color::BLACK,
            definitions: BTreeMap::new(),
            placements: Vec::new(),
        }
    }

    /// Element id of the definition for a code point
    pub fn definition_id(code_point: u32) -> String {
        format!("g{code_point}")
    }

    /// Register a definition; later calls for the same code point are ignored
    pub fn define(&mut self, code_point: u32, glyph: &GlyphVector) {
        self.definitions
            .entry(code_point)
            .or_insert_with(|| glyph.path_data().to_owned());
    }

    /// Append a placement
    pub fn place(&mut self, placement: Placement) {
        self.placements.push(placement);
    }

    /// Definitions ordered by code point
    pub fn definitions(&self) -> impl Iterator<Item = (u32, &str)> {
        self.definitions.iter().map(|(&cp, d)| (cp, d.as_str()))
    }

    pub fn definition(&self, code_point: u32) -> Option<&str> {
        self.definitions.get(&code_point).map(String::as_str)
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    /// Placements in text order
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Build an SVG document.
    ///
    /// Definitions are written in font units with a vertical flip, so each
    /// `<use>` only needs a translate and a uniform scale.
    pub fn to_svg(&self) -> Document {
        let mut defs = Definitions::new();
        for (code_point, d) in self.definitions() {
            defs = defs.add(
                Path::new()
                    .set("id", Self::definition_id(code_point))
                    .set("d", d)
                    .set("transform", "scale(1 -1)"),
            );
        }

        let ratio = if self.pixel_ratio > 0.0 { self.pixel_ratio } else { 1.0 };
        let doc = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set(
                "viewBox",
                format!("0 0 {} {}", fmt_coord(self.width, 2), fmt_coord(self.height, 2)),
            )
            .set("width", format!("{}px", fmt_coord(self.width / ratio, 2)))
            .set("height", format!("{}px", fmt_coord(self.height / ratio, 2)));
        let mut doc = with_fill(doc, self.color).add(defs);

        for placement in &self.placements {
            doc = doc.add(
                Use::new()
                    .set("href", placement.href())
                    .set("transform", placement.transform()),
            );
        }
        doc
    }

    /// Serialize as SVG markup
    pub fn to_svg_string(&self) -> String {
        self.to_svg().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_coord() {
        assert_eq!(fmt_coord(12.0, 4), "12");
        assert_eq!(fmt_coord(12.5, 4), "12.5");
        assert_eq!(fmt_coord(-0.00001, 4), "0");
        assert_eq!(fmt_coord(1.23456, 2), "1.23");
    }

    #[test]
    fn test_css_rgb() {
        assert_eq!(css_rgb(Color::from_rgba8(255, 0, 16, 255)), "#ff0010");
        assert_eq!(css_rgb(Color::from_rgba8(255, 0, 16, 64)), "#ff0010");
    }

    #[test]
    fn test_translucent_fill_keeps_alpha() {
        let mut doc = VectorDocument::new(10.0, 10.0, 1.0);
        doc.color = Color::from_rgba8(51, 102, 153, 128);
        let svg = doc.to_svg_string();
        assert!(svg.contains("fill=\"#336699\""));
        assert!(svg.contains("fill-opacity=\"0.502\""));

        doc.color = Color::from_rgba8(51, 102, 153, 255);
        assert!(!doc.to_svg_string().contains("fill-opacity"));

        let sink = VectorSink::new().to_svg(10.0, 10.0, Color::from_rgba8(0, 0, 0, 64));
        assert!(sink.to_string().contains("fill-opacity=\"0.251\""));
    }

    #[test]
    fn test_commands_in_emission_order() {
        let mut sink = VectorSink::new();
        sink.move_to(1.0, 2.0);
        sink.line_to(3.5, -4.0);
        sink.quad_to(1.0, 1.0, 2.0, 2.0);
        sink.cubic_to(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        sink.close_path();
        assert_eq!(sink.current(), "M1,2L3.5,-4Q1,1,2,2C1,2,3,4,5,6Z");
    }

    #[test]
    fn test_fill_commits_and_clears() {
        let mut sink = VectorSink::new();
        sink.move_to(0.0, 0.0);
        sink.line_to(1.0, 0.0);
        sink.close_path();
        sink.fill();
        assert_eq!(sink.paths(), ["M0,0L1,0Z"]);
        assert!(sink.current().is_empty());

        // Nothing traced: nothing committed
        sink.fill();
        assert_eq!(sink.paths().len(), 1);
    }

    #[test]
    fn test_glyph_vector_keeps_font_units() {
        let glyph = GlyphVector::from_outline(&GlyphOutline::rect(50.0, 0.0, 550.0, 700.0));
        assert_eq!(glyph.path_data(), "M50,0L550,0L550,700L50,700Z");
        assert!(GlyphVector::from_outline(&GlyphOutline::new()).is_empty());
    }

    #[test]
    fn test_definitions_are_deduplicated() {
        let a = GlyphVector::from_outline(&GlyphOutline::rect(0.0, 0.0, 1.0, 1.0));
        let b = GlyphVector::from_outline(&GlyphOutline::rect(0.0, 0.0, 2.0, 2.0));

        let mut doc = VectorDocument::new(100.0, 50.0, 1.0);
        doc.define('a' as u32, &a);
        doc.define('a' as u32, &b);
        doc.define('b' as u32, &b);
        assert_eq!(doc.definition_count(), 2);
        assert_eq!(doc.definition('a' as u32), Some(a.path_data()));
    }

    #[test]
    fn test_placement_transform() {
        let placement = Placement {
            code_point: 72,
            x: 10.5,
            y: 20.0,
            scale: 0.02,
        };
        assert_eq!(placement.href(), "#g72");
        assert_eq!(placement.transform(), "translate(10.5 20) scale(0.02)");
    }

    #[test]
    fn test_svg_has_defs_and_uses() {
        let glyph = GlyphVector::from_outline(&GlyphOutline::rect(0.0, 0.0, 10.0, 10.0));
        let mut doc = VectorDocument::new(200.0, 80.0, 2.0);
        doc.define(65, &glyph);
        doc.place(Placement { code_point: 65, x: 0.0, y: 40.0, scale: 0.04 });
        doc.place(Placement { code_point: 65, x: 24.0, y: 40.0, scale: 0.04 });

        let svg = doc.to_svg_string();
        assert!(svg.contains("viewBox=\"0 0 200 80\""));
        assert!(svg.contains("width=\"100px\""));
        assert!(svg.contains("id=\"g65\""));
        assert!(svg.contains("scale(1 -1)"));
        assert_eq!(svg.matches("<use").count(), 2);
        assert_eq!(svg.matches("<path").count(), 1);
    }

    #[test]
    fn test_sink_svg_has_one_path_per_fill() {
        let mut sink = VectorSink::new();
        for i in 0..3 {
            sink.move_to(i as f32, 0.0);
            sink.line_to(i as f32 + 1.0, 1.0);
            sink.close_path();
            sink.fill();
        }
        let svg = sink.to_svg(10.0, 10.0, Color::BLACK).to_string();
        assert_eq!(svg.matches("<path").count(), 3);
    }
}
