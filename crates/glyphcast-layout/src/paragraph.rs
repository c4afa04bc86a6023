//! Word-wrapping layout engine

use glyphcast_font::{GlyphId, MetricsProvider};
use unicode_segmentation::UnicodeSegmentation;

use crate::line::{split_lines, split_words, PenState};
use crate::request::LayoutRequest;
use crate::{LayoutError, PositionedGlyph, Result, TextLayout};

/// A character resolved against the font, metrics still in font units
#[derive(Debug, Clone, Copy)]
struct ResolvedChar {
    ch: char,
    glyph: GlyphId,
    advance: f32,
    x_max: f32,
    lsb: f32,
    fallback: bool,
}

/// Values fixed for one layout pass, device pixels unless noted
#[derive(Debug, Clone, Copy)]
struct Pass {
    scale: f32,
    line_height: f32,
    width: f32,
    space: GlyphId,
    space_advance: f32,
}

/// Glyphs a word would occupy from the current pen position
struct Run {
    /// Each glyph with the pen x after it, up to and including the first
    /// glyph that crosses the container edge
    placed: Vec<(PositionedGlyph, f32)>,
    overflow_at: Option<usize>,
}

/// Layout engine over a metrics provider
pub struct LayoutEngine<'a> {
    font: &'a dyn MetricsProvider,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(font: &'a dyn MetricsProvider) -> Self {
        Self { font }
    }

    /// Lay out `text` for one request.
    ///
    /// Fails before producing any glyph if the request is invalid or the
    /// text contains a character made of several code points.
    pub fn layout(&self, text: &str, request: &LayoutRequest) -> Result<TextLayout> {
        request.validate()?;
        let pass = self.pass(request);

        let lines = split_lines(text)
            .map(|line| {
                split_words(line)
                    .map(|word| self.resolve_word(word))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let mut pen = PenState::new(pass.line_height);
        let mut glyphs = Vec::with_capacity(text.len());
        for (i, words) in lines.iter().enumerate() {
            if i > 0 {
                pen.break_line(pass.line_height);
            }
            for word in words {
                self.place_word(word, &pass, &mut pen, &mut glyphs);
            }
        }

        let width = glyphs.iter().map(|g| g.extent).fold(0.0, f32::max);
        tracing::debug!(
            "Layout complete: {} glyphs on {} lines, {:.1}x{:.1}px",
            glyphs.len(),
            pen.line + 1,
            width,
            pen.y + pass.line_height
        );

        Ok(TextLayout {
            glyphs,
            line_count: pen.line + 1,
            line_height: pass.line_height,
            scale: pass.scale,
            width,
            height: pen.y + pass.line_height,
            pixel_ratio: request.pixel_ratio,
        })
    }

    /// Advance width of a single word laid out on one line, device pixels
    pub fn measure_word(&self, word: &str, request: &LayoutRequest) -> Result<f32> {
        request.validate()?;
        let pass = self.pass(request);
        let mut prev = None;
        let mut width = 0.0;
        for rc in self.resolve_word(word)? {
            if let Some(prev) = prev {
                width += pass.scale * self.font.kerning(prev, rc.glyph);
            }
            width += pass.scale * rc.advance;
            prev = Some(rc.glyph);
        }
        Ok(width)
    }

    fn pass(&self, request: &LayoutRequest) -> Pass {
        let metrics = self.font.metrics();
        let size = request.device_font_size();
        let scale = metrics.scale(size);
        let space = self.font.glyph_for(' ');
        Pass {
            scale,
            line_height: metrics.line_height(size),
            width: request.device_width(),
            space,
            space_advance: scale * self.font.advance_width(space),
        }
    }

    fn resolve_word(&self, word: &str) -> Result<Vec<ResolvedChar>> {
        let mut resolved = Vec::with_capacity(word.len());
        for cluster in word.graphemes(true) {
            let mut chars = cluster.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(LayoutError::GlyphResolution {
                    cluster: cluster.to_string(),
                });
            };

            let (glyph, fallback) = match self.font.glyph_index(ch) {
                Some(glyph) => (glyph, false),
                None => (self.font.glyph_for(ch), true),
            };
            resolved.push(ResolvedChar {
                ch,
                glyph,
                advance: self.font.advance_width(glyph),
                x_max: self.font.bounding_box(glyph).map(|b| b.x_max).unwrap_or(0.0),
                lsb: self.font.left_side_bearing(glyph),
                fallback,
            });
        }
        Ok(resolved)
    }

    /// Place a word, moving it to a new line when it crosses the container
    /// edge.
    ///
    /// A word gets one retry per line: if it still overflows on a fresh line
    /// it is cut after the last glyph that fits, and a glyph too wide for an
    /// empty line is placed anyway.
    fn place_word(
        &self,
        word: &[ResolvedChar],
        pass: &Pass,
        pen: &mut PenState,
        out: &mut Vec<PositionedGlyph>,
    ) {
        let mut rest = word;
        while !rest.is_empty() {
            let fresh_line = pen.at_line_start();
            let run = self.fit_run(rest, pass, pen);

            let take = match run.overflow_at {
                None => run.placed.len(),
                Some(_) if !fresh_line => {
                    pen.break_line(pass.line_height);
                    continue;
                }
                Some(0) => {
                    tracing::warn!(
                        "Glyph {:?} is wider than the container ({:.1}px), placing it anyway",
                        rest[0].ch,
                        pass.width
                    );
                    1
                }
                Some(at) => at,
            };

            let (last, end_x) = run.placed[take - 1];
            out.extend(run.placed[..take].iter().map(|(glyph, _)| *glyph));
            pen.commit(end_x, last.glyph);

            rest = &rest[take..];
            if !rest.is_empty() {
                pen.break_line(pass.line_height);
            }
        }
        pen.skip_space(pass.space_advance, pass.space);
    }

    fn fit_run(&self, run: &[ResolvedChar], pass: &Pass, pen: &PenState) -> Run {
        // Keep glyphs that overhang their origin from being clipped at the left edge.
        let mut x = match run.first() {
            Some(first) => pen.x.max(-pass.scale * first.lsb),
            None => pen.x,
        };
        let mut prev = pen.prev;
        let mut placed = Vec::with_capacity(run.len());

        for (i, rc) in run.iter().enumerate() {
            let kerning = prev
                .map(|prev| pass.scale * self.font.kerning(prev, rc.glyph))
                .unwrap_or(0.0);
            x += kerning;

            let glyph = PositionedGlyph {
                ch: rc.ch,
                glyph: rc.glyph,
                x,
                y: pen.y,
                line: pen.line,
                kerning,
                extent: x + pass.scale * rc.x_max,
                fallback: rc.fallback,
            };
            x += pass.scale * rc.advance;
            placed.push((glyph, x));

            if glyph.extent >= pass.width {
                return Run {
                    placed,
                    overflow_at: Some(i),
                };
            }
            prev = Some(rc.glyph);
        }

        Run {
            placed,
            overflow_at: None,
        }
    }
}
