//! In-memory document: a collection of lines that reports its edits
//!
//! Every mutating method returns the [`TextChange`]s it caused, ready to
//! be forwarded to [`Highlighter::notify`](crate::Highlighter::notify)
//! and [`StyledLines::notify`](crate::StyledLines::notify).

use crate::highlighter::{TextChange, TextSource};
use crate::line::Line;

/// A document containing lines of text
#[derive(Debug, Clone)]
pub struct Document {
    /// Lines of text
    lines: Vec<Line>,
}

impl Document {
    /// Create a document with a single empty line
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new()], // Always have at least one line
        }
    }

    /// Create a document from text, one line per `\n`
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<Line> = text.lines().map(Line::from).collect();
        if lines.is_empty() {
            Self::new()
        } else {
            Self { lines }
        }
    }

    /// Get number of lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&Line> {
        self.lines.get(idx)
    }

    /// Get all lines
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Insert text at a position within a line
    pub fn insert_str(&mut self, line_idx: usize, byte_pos: usize, s: &str) -> Option<TextChange> {
        let line = self.lines.get_mut(line_idx)?;
        line.insert_str(byte_pos, s);
        Some(TextChange::Edited { line: line_idx })
    }

    /// Replace the content of a line
    pub fn set_line(&mut self, line_idx: usize, text: &str) -> Option<TextChange> {
        let line = self.lines.get_mut(line_idx)?;
        line.set_text(text);
        Some(TextChange::Edited { line: line_idx })
    }

    /// Append a line at the end of the document
    pub fn push_line(&mut self, text: &str) -> TextChange {
        let at = self.lines.len();
        self.lines.push(Line::from(text));
        TextChange::Inserted { at, count: 1 }
    }

    /// Insert a newline, splitting the current line
    pub fn insert_newline(&mut self, line_idx: usize, byte_pos: usize) -> Vec<TextChange> {
        let Some(line) = self.lines.get_mut(line_idx) else {
            return Vec::new();
        };
        let new_line = line.split_off(byte_pos);
        self.lines.insert(line_idx + 1, new_line);
        vec![
            TextChange::Edited { line: line_idx },
            TextChange::Inserted {
                at: line_idx + 1,
                count: 1,
            },
        ]
    }

    /// Delete a byte range within a line
    pub fn delete_range(
        &mut self,
        line_idx: usize,
        start: usize,
        end: usize,
    ) -> Option<TextChange> {
        let line = self.lines.get_mut(line_idx)?;
        line.delete_range(start, end);
        Some(TextChange::Edited { line: line_idx })
    }

    /// Join with previous line (when backspacing at start of line)
    pub fn join_with_previous(&mut self, line_idx: usize) -> Vec<TextChange> {
        if line_idx == 0 || line_idx >= self.lines.len() {
            return Vec::new();
        }
        let current = self.lines.remove(line_idx);
        self.lines[line_idx - 1].append(current);
        vec![
            TextChange::Removed {
                at: line_idx,
                count: 1,
            },
            TextChange::Edited { line: line_idx - 1 },
        ]
    }

    /// Delete a line by index, keeping at least one line
    pub fn delete_line(&mut self, line_idx: usize) -> Option<TextChange> {
        if line_idx < self.lines.len() && self.lines.len() > 1 {
            self.lines.remove(line_idx);
            Some(TextChange::Removed {
                at: line_idx,
                count: 1,
            })
        } else {
            None
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSource for Document {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(Line::text)
    }
}
