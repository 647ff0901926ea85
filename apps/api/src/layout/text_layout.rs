//! Wrapped text layout: the reference `CoordinateResolver`.
//!
//! The document's marked text is split on `\n` into hard lines, and each hard
//! line is greedy-wrapped on word boundaries at the region width. A word that
//! does not fit on a non-empty line starts the next one. Trailing whitespace
//! stays on the line it follows. A single word wider than the region overflows
//! instead of breaking.
//!
//! Every visual line keeps its caret stops: the x position before each of its
//! chars plus one after the last. Stops are non-decreasing, so picking the
//! nearest stop is monotonic in x along a line.

use serde::{Deserialize, Serialize};

use crate::editor::caret::{CoordinateResolver, Point};
use crate::layout::font_metrics::{get_metrics, FontFamily, FontMetricTable};

/// The editable region in client coordinates (px).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Inclusive on all edges. NaN coordinates are never contained.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Rendering parameters the client reports for its editable surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSpec {
    pub font: FontFamily,
    pub font_size_px: f32,
    pub line_height_px: f32,
    pub region: Rect,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            font: FontFamily::Inter,
            font_size_px: 16.0,
            line_height_px: 20.8,
            region: Rect {
                x: 0.0,
                y: 0.0,
                width: 640.0,
                height: 480.0,
            },
        }
    }
}

impl LayoutSpec {
    /// Checks that every dimension is finite and positive.
    pub fn validate(&self) -> Result<(), String> {
        let dims = [
            ("font_size_px", self.font_size_px),
            ("line_height_px", self.line_height_px),
            ("region.width", self.region.width),
            ("region.height", self.region.height),
        ];
        for (name, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive number"));
            }
        }
        if !self.region.x.is_finite() || !self.region.y.is_finite() {
            return Err("region origin must be finite".to_string());
        }
        Ok(())
    }

    pub fn layout(&self, text: &str) -> TextLayout {
        TextLayout::build(text, self)
    }
}

#[derive(Debug, Clone)]
struct VisualLine {
    /// Char offset of the first caret stop.
    start: usize,
    /// x (px, relative to the region's left edge) of each caret stop.
    stops: Vec<f32>,
}

impl VisualLine {
    fn new(start: usize) -> Self {
        Self {
            start,
            stops: vec![0.0],
        }
    }

    fn end(&self) -> usize {
        self.start + self.stops.len() - 1
    }

    fn is_empty(&self) -> bool {
        self.stops.len() == 1
    }
}

#[derive(Debug, Clone)]
pub struct TextLayout {
    lines: Vec<VisualLine>,
    line_height: f32,
    region: Rect,
}

impl TextLayout {
    pub fn build(text: &str, spec: &LayoutSpec) -> Self {
        let metrics = get_metrics(&spec.font);
        let mut lines = Vec::new();
        let mut offset = 0usize;

        for hard_line in text.split('\n') {
            let chars: Vec<char> = hard_line.chars().collect();
            wrap_hard_line(&chars, offset, metrics, spec, &mut lines);
            // +1 for the '\n' itself
            offset += chars.len() + 1;
        }

        Self {
            lines,
            line_height: spec.line_height_px,
            region: spec.region,
        }
    }

    #[cfg(test)]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Client coordinates of the caret before `offset` (top of its line).
    /// The first visual line holding the offset wins at wrap points.
    pub fn caret_position(&self, offset: usize) -> Option<Point> {
        self.lines
            .iter()
            .enumerate()
            .find(|(_, line)| (line.start..=line.end()).contains(&offset))
            .map(|(row, line)| Point {
                x: self.region.x + line.stops[offset - line.start],
                y: self.region.y + row as f32 * self.line_height,
            })
    }
}

impl CoordinateResolver for TextLayout {
    fn resolve(&self, point: Point) -> Option<usize> {
        if !self.region.contains(point) {
            return None;
        }
        // Below the last line but still inside the region resolves on the last line.
        let row = ((point.y - self.region.y) / self.line_height).floor() as usize;
        let line = &self.lines[row.min(self.lines.len() - 1)];

        let x = point.x - self.region.x;
        let stops = &line.stops;
        let idx = stops.partition_point(|stop| *stop < x);
        let nearest = if idx == 0 {
            0
        } else if idx == stops.len() {
            stops.len() - 1
        } else if x - stops[idx - 1] <= stops[idx] - x {
            idx - 1
        } else {
            idx
        };

        Some(line.start + nearest)
    }
}

fn wrap_hard_line(
    chars: &[char],
    line_start: usize,
    metrics: &FontMetricTable,
    spec: &LayoutSpec,
    out: &mut Vec<VisualLine>,
) {
    let px = |c: char| metrics.char_width(c) * spec.font_size_px;
    let max_width = spec.region.width;

    let mut line = VisualLine::new(line_start);
    let mut width = 0.0_f32;
    let mut i = 0usize;

    while i < chars.len() {
        let word_end = (i..chars.len())
            .find(|&j| chars[j].is_whitespace())
            .unwrap_or(chars.len());
        let chunk_end = (word_end..chars.len())
            .find(|&j| !chars[j].is_whitespace())
            .unwrap_or(chars.len());

        let word_width: f32 = chars[i..word_end].iter().map(|&c| px(c)).sum();
        if word_end > i && !line.is_empty() && width + word_width > max_width {
            out.push(line);
            line = VisualLine::new(line_start + i);
            width = 0.0;
        }

        for &c in &chars[i..chunk_end] {
            width += px(c);
            line.stops.push(width);
        }
        i = chunk_end;
    }

    out.push(line);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Monospace 10px → every glyph is exactly 6px wide.
    fn mono(width: f32) -> LayoutSpec {
        LayoutSpec {
            font: FontFamily::Monospace,
            font_size_px: 10.0,
            line_height_px: 20.0,
            region: Rect {
                x: 100.0,
                y: 50.0,
                width,
                height: 200.0,
            },
        }
    }

    fn at(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    #[test]
    fn test_resolves_nearest_stop_on_first_line() {
        let layout = mono(600.0).layout("hello world");
        assert_eq!(layout.resolve(at(100.0, 55.0)), Some(0));
        // 6px glyphs: x=100+13 is nearest stop 2 (at 12px)
        assert_eq!(layout.resolve(at(113.0, 55.0)), Some(2));
        // exactly halfway between stops 2 and 3 ties left
        assert_eq!(layout.resolve(at(115.0, 55.0)), Some(2));
        // far right of the line clamps to the line end
        assert_eq!(layout.resolve(at(690.0, 55.0)), Some(11));
    }

    #[test]
    fn test_outside_region_is_none() {
        let layout = mono(600.0).layout("hello");
        assert_eq!(layout.resolve(at(99.0, 55.0)), None);
        assert_eq!(layout.resolve(at(150.0, 49.0)), None);
        assert_eq!(layout.resolve(at(150.0, 251.0)), None);
        assert_eq!(layout.resolve(at(f32::NAN, 55.0)), None);
    }

    #[test]
    fn test_hard_line_breaks_select_rows() {
        let layout = mono(600.0).layout("ab\ncdef\n\nxyz");
        assert_eq!(layout.line_count(), 4);
        assert_eq!(layout.resolve(at(100.0, 75.0)), Some(3));
        assert_eq!(layout.resolve(at(500.0, 75.0)), Some(7));
        // empty third line has a single stop
        assert_eq!(layout.resolve(at(300.0, 95.0)), Some(8));
        assert_eq!(layout.resolve(at(106.0, 115.0)), Some(10));
    }

    #[test]
    fn test_below_last_line_uses_last_line() {
        let layout = mono(600.0).layout("one\ntwo");
        assert_eq!(layout.resolve(at(100.0, 240.0)), Some(4));
    }

    #[test]
    fn test_greedy_wrap_on_word_boundaries() {
        // 60px region = 10 glyphs per line
        let layout = mono(60.0).layout("aaaa bbbb cccc");
        assert_eq!(layout.line_count(), 2);
        // second visual line starts at "cccc" (offset 10)
        assert_eq!(layout.resolve(at(100.0, 75.0)), Some(10));
        // the wrap point belongs to the end of the first line
        assert_eq!(layout.caret_position(10), Some(at(160.0, 50.0)));
    }

    #[test]
    fn test_overlong_word_overflows_instead_of_breaking() {
        let layout = mono(30.0).layout("abcdefghij");
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.resolve(at(130.0, 55.0)), Some(5));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let layout = LayoutSpec::default().layout("Dear Hiring Manager,\nI am writing to you.");
        let p = at(57.3, 24.1);
        let first = layout.resolve(p);
        for _ in 0..10 {
            assert_eq!(layout.resolve(p), first);
        }
    }

    #[test]
    fn test_monotonic_along_a_line() {
        let text = "The quick brown fox jumps over the lazy dog while the caret tracks it, \
                    wrapping onto more lines as proportional glyphs accumulate width.";
        let spec = LayoutSpec::default();
        let layout = spec.layout(text);
        assert!(layout.line_count() > 1);
        for row in 0..layout.line_count() {
            let y = spec.region.y + row as f32 * spec.line_height_px + 5.0;
            let mut previous = 0usize;
            let mut x = spec.region.x;
            while x <= spec.region.x + spec.region.width {
                let offset = layout.resolve(at(x, y)).unwrap();
                assert!(offset >= previous, "row {row}: x={x} went back to {offset}");
                previous = offset;
                x += 0.7;
            }
        }
    }

    #[test]
    fn test_caret_position_round_trips_through_resolve() {
        let spec = mono(600.0);
        let layout = spec.layout("ab\ncd");
        let p = layout.caret_position(4).unwrap();
        assert_eq!(p, at(106.0, 70.0));
        assert_eq!(layout.resolve(at(p.x, p.y + 1.0)), Some(4));
        assert_eq!(layout.caret_position(99), None);
    }

    #[test]
    fn test_empty_text_resolves_to_zero() {
        let layout = mono(600.0).layout("");
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.resolve(at(300.0, 200.0)), Some(0));
    }

    #[test]
    fn test_validate_rejects_degenerate_specs() {
        assert!(LayoutSpec::default().validate().is_ok());
        let mut spec = LayoutSpec::default();
        spec.line_height_px = 0.0;
        assert!(spec.validate().is_err());
        spec = LayoutSpec::default();
        spec.region.width = f32::INFINITY;
        assert!(spec.validate().is_err());
    }
}
