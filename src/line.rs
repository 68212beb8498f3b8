//! Line representation and byte-range helpers

use std::ops::Range;

/// A single line of text in a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    /// Create a new empty line
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the line is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Insert a string at byte position
    pub fn insert_str(&mut self, byte_pos: usize, s: &str) {
        let pos = floor_char_boundary(&self.text, byte_pos);
        self.text.insert_str(pos, s);
    }

    /// Delete a range of bytes and return the deleted text
    pub fn delete_range(&mut self, start: usize, end: usize) -> String {
        let range = clamp_range(&self.text, start..end);
        self.text.drain(range).collect()
    }

    /// Split the line at byte position, returning the remainder
    pub fn split_off(&mut self, byte_pos: usize) -> Line {
        let pos = floor_char_boundary(&self.text, byte_pos);
        Line::from(self.text.split_off(pos))
    }

    /// Append another line's content to this line
    pub fn append(&mut self, other: Line) {
        self.text.push_str(&other.text);
    }

    /// Replace the whole content
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self { text: s.to_string() }
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self { text }
    }
}

/// Find the nearest valid UTF-8 char boundary at or before `pos`
pub fn floor_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    while p > 0 && !text.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Find the nearest valid UTF-8 char boundary at or after `pos`
pub fn ceil_char_boundary(text: &str, pos: usize) -> usize {
    if pos >= text.len() {
        return text.len();
    }
    let mut p = pos;
    while p < text.len() && !text.is_char_boundary(p) {
        p += 1;
    }
    p
}

/// Clamp a byte range to `text`, widening it to char boundaries
///
/// The result always satisfies `start <= end <= text.len()`.
pub fn clamp_range(text: &str, range: Range<usize>) -> Range<usize> {
    let start = floor_char_boundary(text, range.start);
    let end = ceil_char_boundary(text, range.end.min(text.len()));
    start..end.max(start)
}
