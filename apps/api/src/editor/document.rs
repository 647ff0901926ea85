//! Document Model: an ordered buffer of plain-text runs and markers.
//!
//! # Invariants
//! - No two adjacent segments are both text.
//! - No text segment is empty.
//! - `len` equals the summed char length of all segments.
//!
//! Offsets count chars of the marked rendering (markers with their sentinels),
//! from the start of the document. Callers never address segments directly.
//! Out-of-range offsets clamp to the document end, so every operation is total.

use serde::Serialize;

use crate::editor::markers::{Delimiters, Marker};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Segment {
    Text(String),
    Marker(Marker),
}

impl Segment {
    pub fn char_len(&self) -> usize {
        match self {
            Segment::Text(text) => text.chars().count(),
            Segment::Marker(marker) => marker.char_len(),
        }
    }

    fn push_marked(&self, out: &mut String) {
        match self {
            Segment::Text(text) => out.push_str(text),
            Segment::Marker(marker) => out.push_str(&marker.rendered()),
        }
    }

    fn push_plain(&self, out: &mut String) {
        match self {
            Segment::Text(text) => out.push_str(text),
            Segment::Marker(marker) => out.push_str(marker.value()),
        }
    }
}

/// A resolved insertion point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaretTarget {
    /// Index of the segment the caret sits in (or at the end of).
    pub segment: usize,
    pub offset_in_segment: usize,
    /// Document-wide char offset.
    pub offset: usize,
}

/// A marker as it currently sits in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedMarker {
    pub offset: usize,
    pub len: usize,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    segments: Vec<Segment>,
    len: usize,
}

impl Document {
    #[cfg(test)]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a document from extracted source text. `\r\n` and `\r` become `\n`.
    pub fn load(text: &str) -> Self {
        Self::from_segments(vec![Segment::Text(normalize_newlines(text))])
    }

    #[cfg(test)]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len_chars(&self) -> usize {
        self.len
    }

    /// Marked text between two offsets. Reversed bounds are swapped.
    pub fn read_range(&self, start: usize, end: usize) -> String {
        let (start, end) = self.clamp_range(start, end);
        let mut out = String::new();
        let mut seg_start = 0;
        for seg in &self.segments {
            let seg_end = seg_start + seg.char_len();
            let a = start.max(seg_start);
            let b = end.min(seg_end);
            if a < b {
                let mut rendered = String::new();
                seg.push_marked(&mut rendered);
                out.push_str(char_slice(&rendered, a - seg_start, b - seg_start));
            }
            seg_start = seg_end;
        }
        out
    }

    /// Inserts a text run or a marker at `offset`.
    ///
    /// Text landing inside a marker's value edits that value; text landing inside
    /// a sentinel dissolves the marker into plain text. A marker landing strictly
    /// inside another marker is placed right after it.
    pub fn insert(&self, offset: usize, content: Segment) -> Document {
        if let Segment::Text(text) = &content {
            if text.is_empty() {
                return self.clone();
            }
        }
        let content = match content {
            Segment::Text(text) => Segment::Text(normalize_newlines(&text)),
            marker => marker,
        };

        let offset = offset.min(self.len);
        let mut out = Vec::with_capacity(self.segments.len() + 2);
        let mut pending = Some(content);
        let mut seg_start = 0;

        for seg in &self.segments {
            let seg_end = seg_start + seg.char_len();
            match pending.take() {
                Some(item) if offset <= seg_start => {
                    out.push(item);
                    out.push(seg.clone());
                }
                Some(item) if offset < seg_end => {
                    out.extend(splice_into(seg, offset - seg_start, item));
                }
                other => {
                    pending = other;
                    out.push(seg.clone());
                }
            }
            seg_start = seg_end;
        }
        if let Some(item) = pending {
            out.push(item);
        }

        Self::from_segments(out)
    }

    pub fn insert_text(&self, offset: usize, text: &str) -> Document {
        self.insert(offset, Segment::Text(text.to_string()))
    }

    /// Removes the chars in `start..end`. Reversed bounds are swapped.
    ///
    /// A marker fully inside the range disappears; a cut confined to its value
    /// shrinks the value; any other cut into a marker dissolves what is left of
    /// it into plain text.
    pub fn delete_range(&self, start: usize, end: usize) -> Document {
        let (start, end) = self.clamp_range(start, end);
        if start == end {
            return self.clone();
        }

        let mut out = Vec::with_capacity(self.segments.len());
        let mut seg_start = 0;
        for seg in &self.segments {
            let seg_end = seg_start + seg.char_len();
            let a = start.max(seg_start);
            let b = end.min(seg_end);
            if a >= b {
                out.push(seg.clone());
            } else if let Some(rest) = cut(seg, a - seg_start, b - seg_start) {
                out.push(rest);
            }
            seg_start = seg_end;
        }

        Self::from_segments(out)
    }

    /// Text with markers reduced to their bare values.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            seg.push_plain(&mut out);
        }
        out
    }

    /// Text with markers rendered inside their sentinels. Offsets index this string.
    pub fn to_marked_text(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            seg.push_marked(&mut out);
        }
        out
    }

    /// Maps a document offset to its segment coordinates.
    pub fn locate(&self, offset: usize) -> CaretTarget {
        let offset = offset.min(self.len);
        let last = self.segments.len().saturating_sub(1);
        let mut seg_start = 0;
        for (index, seg) in self.segments.iter().enumerate() {
            let seg_end = seg_start + seg.char_len();
            if offset < seg_end || (offset == seg_end && index == last) {
                return CaretTarget {
                    segment: index,
                    offset_in_segment: offset - seg_start,
                    offset,
                };
            }
            seg_start = seg_end;
        }
        CaretTarget {
            segment: 0,
            offset_in_segment: 0,
            offset: 0,
        }
    }

    /// Moves an offset that falls strictly inside a marker to that marker's end.
    pub fn snap_outside_marker(&self, offset: usize) -> usize {
        let offset = offset.min(self.len);
        let mut seg_start = 0;
        for seg in &self.segments {
            let seg_end = seg_start + seg.char_len();
            if matches!(seg, Segment::Marker(_)) && seg_start < offset && offset < seg_end {
                return seg_end;
            }
            if seg_end >= offset {
                break;
            }
            seg_start = seg_end;
        }
        offset
    }

    pub fn markers(&self) -> Vec<PlacedMarker> {
        let mut placed = Vec::new();
        let mut seg_start = 0;
        for seg in &self.segments {
            let len = seg.char_len();
            if let Segment::Marker(marker) = seg {
                placed.push(PlacedMarker {
                    offset: seg_start,
                    len,
                    value: marker.value().to_string(),
                });
            }
            seg_start += len;
        }
        placed
    }

    /// Occurrences of either sentinel that are not a marker's own boundaries:
    /// in plain text runs or inside marker values.
    pub fn count_sentinels(&self, delimiters: &Delimiters) -> usize {
        self.segments
            .iter()
            .map(|seg| match seg {
                Segment::Text(text) => delimiters.count_in(text),
                Segment::Marker(marker) => delimiters.count_in(marker.value()),
            })
            .sum()
    }

    /// Replaces every marker with its bare value as plain text.
    pub fn strip_markers(&self) -> Document {
        Self::from_segments(
            self.segments
                .iter()
                .map(|seg| match seg {
                    Segment::Marker(marker) => Segment::Text(marker.value().to_string()),
                    text => text.clone(),
                })
                .collect(),
        )
    }

    pub fn is_normalized(&self) -> bool {
        let no_empty_text = self
            .segments
            .iter()
            .all(|seg| !matches!(seg, Segment::Text(t) if t.is_empty()));
        let no_adjacent_text = self
            .segments
            .windows(2)
            .all(|w| !matches!((&w[0], &w[1]), (Segment::Text(_), Segment::Text(_))));
        let len_matches = self.segments.iter().map(Segment::char_len).sum::<usize>() == self.len;
        no_empty_text && no_adjacent_text && len_matches
    }

    /// Merges adjacent text runs and drops empty ones.
    fn from_segments(segments: Vec<Segment>) -> Self {
        let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());
        for seg in segments {
            match seg {
                Segment::Text(text) if text.is_empty() => {}
                Segment::Text(text) => match merged.last_mut() {
                    Some(Segment::Text(prev)) => prev.push_str(&text),
                    _ => merged.push(Segment::Text(text)),
                },
                marker => merged.push(marker),
            }
        }
        let len = merged.iter().map(Segment::char_len).sum();
        let doc = Self {
            segments: merged,
            len,
        };
        debug_assert!(doc.is_normalized(), "document invariant violated: {doc:?}");
        doc
    }

    fn clamp_range(&self, start: usize, end: usize) -> (usize, usize) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        (start.min(self.len), end.min(self.len))
    }
}

/// Splices `item` into `seg` at a local offset strictly inside it.
fn splice_into(seg: &Segment, local: usize, item: Segment) -> Vec<Segment> {
    match (seg, item) {
        (Segment::Text(text), item) => {
            let (head, tail) = split_chars(text, local);
            vec![
                Segment::Text(head.to_string()),
                item,
                Segment::Text(tail.to_string()),
            ]
        }
        (Segment::Marker(existing), Segment::Marker(new)) => {
            vec![Segment::Marker(existing.clone()), Segment::Marker(new)]
        }
        (Segment::Marker(existing), Segment::Text(text)) => {
            let (value_start, value_end) = existing.value_range();
            if (value_start..=value_end).contains(&local) {
                let (head, tail) = split_chars(existing.value(), local - value_start);
                vec![Segment::Marker(
                    existing.with_value(format!("{head}{text}{tail}")),
                )]
            } else {
                let rendered = existing.rendered();
                let (head, tail) = split_chars(&rendered, local);
                vec![Segment::Text(format!("{head}{text}{tail}"))]
            }
        }
    }
}

/// What remains of `seg` after removing local chars `a..b`.
fn cut(seg: &Segment, a: usize, b: usize) -> Option<Segment> {
    match seg {
        Segment::Text(text) => Some(Segment::Text(remove_chars(text, a, b))),
        Segment::Marker(marker) => {
            if a == 0 && b == marker.char_len() {
                return None;
            }
            let (value_start, value_end) = marker.value_range();
            if value_start <= a && b <= value_end {
                Some(Segment::Marker(marker.with_value(remove_chars(
                    marker.value(),
                    a - value_start,
                    b - value_start,
                ))))
            } else {
                Some(Segment::Text(remove_chars(&marker.rendered(), a, b)))
            }
        }
    }
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

fn split_chars(text: &str, at: usize) -> (&str, &str) {
    text.split_at(byte_index(text, at))
}

fn char_slice(text: &str, start: usize, end: usize) -> &str {
    &text[byte_index(text, start)..byte_index(text, end)]
}

fn remove_chars(text: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..byte_index(text, start)]);
    out.push_str(&text[byte_index(text, end)..]);
    out
}

pub(crate) fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
