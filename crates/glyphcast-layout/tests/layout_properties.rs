//! Layout scenarios and invariants
//!
//! All tests use the synthetic block font: 1000 units per em, so at 20px one
//! font unit is 0.02px. Regular glyphs advance 12px, `i`/`l` 6px, `w`/`m`
//! 18px, and the space 5px.

use glyphcast_font::{GlyphOutline, MetricsProvider, SyntheticFont};
use glyphcast_layout::*;

fn layout(text: &str, request: LayoutRequest) -> TextLayout {
    let font = SyntheticFont::blocks();
    LayoutEngine::new(&font).layout(text, &request).unwrap()
}

/// Glyph ranges of each whitespace-separated word, in glyph order
fn word_ranges(text: &str) -> Vec<std::ops::Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_two_words_on_one_line() {
    let font = SyntheticFont::blocks();
    let result = LayoutEngine::new(&font)
        .layout("Hi there", &LayoutRequest::new(20.0, 1000.0))
        .unwrap();

    assert_eq!(result.line_count(), 1);
    assert!(result.glyphs.iter().all(|g| g.line == 0));

    let i = result.glyphs[1];
    let first_word_end = i.x + result.scale * font.advance_width(i.glyph);
    let space_advance = result.scale * font.advance_width(font.glyph_for(' '));
    let t = result.glyphs[2];
    assert_eq!(t.ch, 't');
    assert!((t.x - (first_word_end + space_advance)).abs() <= 0.01);
}

#[test]
fn test_long_word_wraps_inside_container() {
    let result = layout("wwwwwwwwww", LayoutRequest::new(20.0, 100.0));

    assert!(result.line_count() >= 2, "expected a wrap, got {} line(s)", result.line_count());
    for line in result.lines() {
        let right = line.iter().map(|g| g.extent).fold(0.0, f32::max);
        assert!(right < 100.0, "line extends to {right}");
    }
    assert_eq!(result.glyphs.len(), 10);
}

#[test]
fn test_newline_advances_exactly_one_line_height() {
    let result = layout("a\nb", LayoutRequest::new(20.0, 800.0));

    assert_eq!(result.line_count(), 2);
    let (a, b) = (result.glyphs[0], result.glyphs[1]);
    assert_eq!(a.line, 0);
    assert_eq!(b.line, 1);
    assert_eq!(b.y, a.y + result.line_height);
    assert_eq!(b.x, 0.0);
    assert_eq!(result.height, b.y + result.line_height);
}

// ============================================================================
// WRAPPING
// ============================================================================

#[test]
fn test_words_narrower_than_container_are_never_split() {
    let text = "alpha beta gamma delta epsilon zeta eta theta iota kappa lambda";
    let result = layout(text, LayoutRequest::new(20.0, 100.0));

    assert!(result.line_count() > 1);
    for range in word_ranges(text) {
        let line = result.glyphs[range.start].line;
        assert!(
            result.glyphs[range.clone()].iter().all(|g| g.line == line),
            "word at {range:?} was split"
        );
    }
}

#[test]
fn test_wrapped_word_starts_at_left_edge() {
    // "abcdefgh" is 96px wide; the second word cannot share the first line
    let result = layout("abcdefgh ab", LayoutRequest::new(20.0, 100.0));
    let second = result.glyphs[8];
    assert_eq!(second.ch, 'a');
    assert_eq!(second.line, 1);
    assert_eq!(second.x, 0.0);
}

#[test]
fn test_wrap_resets_kerning() {
    // Both the space and 'a' pull a following 'b' in by 6px at 20px
    let font = SyntheticFont::blocks()
        .with_kerning(' ', 'b', -300.0)
        .with_kerning('a', 'b', -300.0);
    let engine = LayoutEngine::new(&font);

    // On one line the word start kerns against the space
    let joined = engine.layout("a b", &LayoutRequest::unbounded(20.0)).unwrap();
    assert!((joined.glyphs[1].kerning + 6.0).abs() < 1e-4);

    // "bb" overflows after the seven a's and restarts on the next line
    let wrapped = engine
        .layout("aaaaaaa bb", &LayoutRequest::new(20.0, 100.0))
        .unwrap();
    let b = wrapped.glyphs[7];
    assert_eq!(b.ch, 'b');
    assert_eq!(b.line, 1);
    assert_eq!(b.x, 0.0);
    assert_eq!(b.kerning, 0.0);
}

#[test]
fn test_unbounded_never_wraps() {
    let text = "the quick brown fox jumps over the lazy dog ".repeat(20);
    let result = layout(&text, LayoutRequest::unbounded(20.0));
    assert_eq!(result.line_count(), 1);
    assert!(result.width > 1000.0);
}

#[test]
fn test_single_oversized_glyph_is_placed() {
    // 6000 units = 120px at 20px, wider than the 50px container
    let font = SyntheticFont::new(1000, 800, -200)
        .with_glyph(' ', 250.0, GlyphOutline::new())
        .with_glyph('X', 6000.0, GlyphOutline::rect(0.0, 0.0, 6000.0, 700.0));
    let engine = LayoutEngine::new(&font);

    let one = engine.layout("X", &LayoutRequest::new(20.0, 50.0)).unwrap();
    assert_eq!(one.glyphs.len(), 1);
    assert_eq!(one.line_count(), 1);
    assert!(one.glyphs[0].extent > 50.0);

    let two = engine.layout("XX", &LayoutRequest::new(20.0, 50.0)).unwrap();
    assert_eq!(two.glyphs.len(), 2);
    assert_eq!(two.line_count(), 2);
    assert_eq!(two.glyphs[1].line, 1);
}

#[test]
fn test_word_following_oversized_glyph_moves_down() {
    let font = SyntheticFont::new(1000, 800, -200)
        .with_glyph(' ', 250.0, GlyphOutline::new())
        .with_glyph('a', 600.0, GlyphOutline::rect(50.0, 0.0, 550.0, 700.0))
        .with_glyph('X', 6000.0, GlyphOutline::rect(0.0, 0.0, 6000.0, 700.0));
    let result = LayoutEngine::new(&font)
        .layout("X a", &LayoutRequest::new(20.0, 50.0))
        .unwrap();
    assert_eq!(result.glyphs[1].line, 1);
}

// ============================================================================
// KERNING
// ============================================================================

#[test]
fn test_newline_resets_kerning() {
    let joined = layout("AV", LayoutRequest::new(20.0, 800.0));
    assert!(joined.glyphs[1].kerning < 0.0);

    let split = layout("A\nV", LayoutRequest::new(20.0, 800.0));
    let v = split.glyphs[1];
    assert_eq!(v.line, 1);
    assert_eq!(v.kerning, 0.0);
}

#[test]
fn test_word_start_kerns_against_space() {
    let font = SyntheticFont::new(1000, 800, -200)
        .with_glyph(' ', 250.0, GlyphOutline::new())
        .with_glyph('a', 600.0, GlyphOutline::rect(50.0, 0.0, 550.0, 700.0))
        .with_kerning(' ', 'a', -100.0);
    let result = LayoutEngine::new(&font)
        .layout("a a", &LayoutRequest::new(20.0, 800.0))
        .unwrap();

    // line start: no previous glyph
    assert_eq!(result.glyphs[0].kerning, 0.0);
    // second word: kerned against the space glyph
    assert!((result.glyphs[1].kerning + 2.0).abs() < 1e-4);
    assert!((result.glyphs[1].x - (12.0 + 5.0 - 2.0)).abs() < 1e-4);
}

// ============================================================================
// PEN MOVEMENT
// ============================================================================

#[test]
fn test_pen_y_is_monotonic() {
    let text = "one two three\nfour five six seven eight\n\nnine ten wwwwwwwwwwww eleven";
    let result = layout(text, LayoutRequest::new(20.0, 120.0));

    for pair in result.glyphs.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(b.y >= a.y);
        if b.line == a.line {
            assert_eq!(b.y, a.y);
            assert!(b.x > a.x);
        } else {
            assert!(b.y > a.y);
            assert!(b.line > a.line);
        }
    }
}

#[test]
fn test_empty_lines_still_advance() {
    let result = layout("a\n\nb", LayoutRequest::new(20.0, 800.0));
    assert_eq!(result.line_count(), 3);
    assert_eq!(result.glyphs[1].line, 2);
    assert!((result.glyphs[1].y - result.baseline(2)).abs() < 1e-4);
}

#[test]
fn test_left_overhang_is_clamped() {
    let font = SyntheticFont::new(1000, 800, -200)
        .with_glyph(' ', 250.0, GlyphOutline::new())
        .with_glyph('f', 400.0, GlyphOutline::rect(-100.0, 0.0, 450.0, 700.0));
    let result = LayoutEngine::new(&font)
        .layout("f", &LayoutRequest::new(20.0, 800.0))
        .unwrap();
    // 100 units of overhang at 0.02px per unit
    assert!((result.glyphs[0].x - 2.0).abs() < 1e-4);
}

#[test]
fn test_pixel_ratio_scales_device_positions() {
    let base = layout("ab cd", LayoutRequest::new(20.0, 800.0));
    let hidpi = layout("ab cd", LayoutRequest::new(20.0, 800.0).with_pixel_ratio(2.0));

    assert_eq!(hidpi.pixel_ratio, 2.0);
    assert!((hidpi.line_height - 2.0 * base.line_height).abs() < 1e-4);
    for (a, b) in base.glyphs.iter().zip(&hidpi.glyphs) {
        assert!((b.x - 2.0 * a.x).abs() < 1e-3);
    }
}

#[test]
fn test_line_height_is_metrics_driven() {
    let result = layout("a", LayoutRequest::new(20.0, 800.0));
    // (800 - (-200)) units at 0.02px
    assert!((result.line_height - 20.0).abs() < 1e-4);
    assert_eq!(result.glyphs[0].y, result.line_height);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_invalid_parameters_are_rejected() {
    let font = SyntheticFont::blocks();
    let engine = LayoutEngine::new(&font);

    let err = engine.layout("abc", &LayoutRequest::new(0.0, 800.0)).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidParameter { name: "font_size", .. }));

    let err = engine.layout("abc", &LayoutRequest::new(20.0, -1.0)).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidParameter { name: "container_width", .. }));
}

#[test]
fn test_zwj_sequence_is_rejected() {
    let font = SyntheticFont::blocks();
    let err = LayoutEngine::new(&font)
        .layout("ok \u{1F469}\u{200D}\u{1F4BB}", &LayoutRequest::new(20.0, 800.0))
        .unwrap_err();
    assert!(matches!(err, LayoutError::GlyphResolution { .. }));
}
