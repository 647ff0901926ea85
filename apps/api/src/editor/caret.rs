//! Caret Resolution: pointer coordinates to document positions.
//!
//! The geometry lives behind `CoordinateResolver` so the editor core never
//! depends on a rendering surface. `layout::TextLayout` is the built-in one.

use serde::{Deserialize, Serialize};

use crate::editor::document::{CaretTarget, Document};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Maps a pointer position to a char offset in the rendered text, or `None`
/// when the point is outside the editable region.
pub trait CoordinateResolver {
    fn resolve(&self, point: Point) -> Option<usize>;
}

impl<F> CoordinateResolver for F
where
    F: Fn(Point) -> Option<usize>,
{
    fn resolve(&self, point: Point) -> Option<usize> {
        self(point)
    }
}

/// Resolves a point against `doc`. Offsets past the end are clamped.
pub fn resolve_target<R>(doc: &Document, resolver: &R, point: Point) -> Option<CaretTarget>
where
    R: CoordinateResolver + ?Sized,
{
    resolver.resolve(point).map(|offset| doc.locate(offset))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaretIndicator {
    pub offset: usize,
}

/// The transient drop-target indicator. At most one is visible at a time.
#[derive(Debug, Clone, Default)]
pub struct CaretOverlay {
    indicator: Option<CaretIndicator>,
}

impl CaretOverlay {
    /// Shows the indicator at `target`, replacing any previous one.
    pub fn show(&mut self, target: CaretTarget) -> CaretIndicator {
        let indicator = CaretIndicator {
            offset: target.offset,
        };
        self.indicator = Some(indicator);
        indicator
    }

    pub fn clear(&mut self) {
        self.indicator = None;
    }

    pub fn current(&self) -> Option<CaretIndicator> {
        self.indicator
    }

    /// Marked text with a `|` drawn at the indicator. Display only.
    pub fn render(&self, doc: &Document) -> String {
        let text = doc.to_marked_text();
        match self.indicator {
            Some(CaretIndicator { offset }) => {
                let at = text
                    .char_indices()
                    .nth(offset)
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                format!("{}|{}", &text[..at], &text[at..])
            }
            None => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point {
        Point { x, y }
    }

    #[test]
    fn test_closure_resolver() {
        let doc = Document::load("hello");
        let resolver = |point: Point| (point.x >= 0.0).then(|| (point.x / 10.0) as usize);
        assert_eq!(resolve_target(&doc, &resolver, p(20.0, 0.0)).map(|t| t.offset), Some(2));
        assert_eq!(resolve_target(&doc, &resolver, p(-1.0, 0.0)), None);
    }

    #[test]
    fn test_resolved_offset_is_clamped() {
        let doc = Document::load("hi");
        let far = |_: Point| Some(50);
        assert_eq!(resolve_target(&doc, &far, p(0.0, 0.0)).map(|t| t.offset), Some(2));
    }

    #[test]
    fn test_overlay_keeps_single_indicator() {
        let doc = Document::load("abcd");
        let mut overlay = CaretOverlay::default();
        overlay.show(doc.locate(1));
        overlay.show(doc.locate(3));
        assert_eq!(overlay.current(), Some(CaretIndicator { offset: 3 }));
        assert_eq!(overlay.render(&doc), "abc|d");
        overlay.clear();
        assert_eq!(overlay.current(), None);
        assert_eq!(overlay.render(&doc), "abcd");
    }
}
