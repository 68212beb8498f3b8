//! Annotation sinks
//!
//! The highlighter never renders anything itself. It pushes annotations
//! into an [`AnnotationSink`], which applies them in call order: a later
//! annotation overriding an earlier one wherever their ranges overlap.
//!
//! Two sinks ship with the crate: [`Recorder`] keeps the raw call log,
//! [`StyledLines`] keeps the resulting per-byte styling for a renderer.

use std::ops::Range;

use crate::highlighter::TextChange;
use crate::syntax::{Attribute, DisplayAttribute};

/// Independent annotation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Keyword/comment styling from the rule set
    Lexical,
    /// Whole-line marker for the tracked line
    CurrentLine,
}

/// A styling instruction for a byte range of one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Line index in the buffer
    pub line: usize,
    /// Byte offset where the range starts (inclusive)
    pub start: usize,
    /// Byte offset where the range ends (exclusive)
    pub end: usize,
    pub attribute: Attribute,
}

impl Annotation {
    pub fn new(line: usize, range: Range<usize>, attribute: Attribute) -> Self {
        Self {
            line,
            start: range.start,
            end: range.end,
            attribute,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_clear(&self) -> bool {
        self.attribute == Attribute::Clear
    }
}

/// Receiver of computed annotations
pub trait AnnotationSink {
    /// Apply one annotation, overriding earlier ones on overlap
    fn apply(&mut self, channel: Channel, annotation: Annotation);
}

impl<T: AnnotationSink + ?Sized> AnnotationSink for &mut T {
    fn apply(&mut self, channel: Channel, annotation: Annotation) {
        (**self).apply(channel, annotation);
    }
}

/// Sink that records every call, in order
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub calls: Vec<(Channel, Annotation)>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotations of one channel, in call order
    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = &Annotation> + '_ {
        self.calls
            .iter()
            .filter(move |(c, _)| *c == channel)
            .map(|(_, a)| a)
    }

    /// Drain the log
    pub fn take(&mut self) -> Vec<(Channel, Annotation)> {
        std::mem::take(&mut self.calls)
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl AnnotationSink for Recorder {
    fn apply(&mut self, channel: Channel, annotation: Annotation) {
        self.calls.push((channel, annotation));
    }
}

/// Styling state of one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct StyledLine {
    /// Lexical attribute per byte
    lexical: Vec<Option<DisplayAttribute>>,
    /// Line-level marker
    marker: Option<DisplayAttribute>,
}

/// A run of bytes sharing one effective attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub range: Range<usize>,
    pub attribute: Option<DisplayAttribute>,
}

/// Sink that keeps the styling currently applied to each line
///
/// Lexical annotations replace the attribute of every byte in their range.
/// Current-line annotations act on the whole line regardless of range, so
/// an empty line can still carry the marker. Structural edits must be
/// forwarded through [`notify`](Self::notify) to keep rows aligned with
/// the buffer.
#[derive(Debug, Default, Clone)]
pub struct StyledLines {
    lines: Vec<StyledLine>,
}

impl StyledLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shift rows for an inserted or removed range of lines
    pub fn notify(&mut self, change: &TextChange) {
        match *change {
            TextChange::Edited { .. } => {}
            TextChange::Inserted { at, count } => {
                if at <= self.lines.len() {
                    self.lines
                        .splice(at..at, std::iter::repeat_with(StyledLine::default).take(count));
                }
            }
            TextChange::Removed { at, count } => {
                let end = at.saturating_add(count).min(self.lines.len());
                if at < end {
                    self.lines.drain(at..end);
                }
            }
        }
    }

    fn row_mut(&mut self, line: usize) -> &mut StyledLine {
        if self.lines.len() <= line {
            self.lines.resize_with(line + 1, StyledLine::default);
        }
        &mut self.lines[line]
    }

    /// Lexical attribute at a byte position
    pub fn lexical_at(&self, line: usize, pos: usize) -> Option<DisplayAttribute> {
        self.lines.get(line)?.lexical.get(pos).copied().flatten()
    }

    /// Current-line marker of a line
    pub fn marker(&self, line: usize) -> Option<DisplayAttribute> {
        self.lines.get(line)?.marker
    }

    /// Effective attribute at a byte position (lexical over marker)
    pub fn attribute_at(&self, line: usize, pos: usize) -> Option<DisplayAttribute> {
        overlay(self.marker(line), self.lexical_at(line, pos))
    }

    /// Split `text` (the current content of `line`) into styled runs
    pub fn runs(&self, line: usize, text: &str) -> Vec<StyledRun> {
        let mut runs: Vec<StyledRun> = Vec::new();
        for (pos, ch) in text.char_indices() {
            let attribute = self.attribute_at(line, pos);
            let end = pos + ch.len_utf8();
            match runs.last_mut() {
                Some(run) if run.attribute == attribute => run.range.end = end,
                _ => runs.push(StyledRun {
                    range: pos..end,
                    attribute,
                }),
            }
        }
        runs
    }
}

impl AnnotationSink for StyledLines {
    fn apply(&mut self, channel: Channel, annotation: Annotation) {
        let value = annotation.attribute.resolve();
        let row = self.row_mut(annotation.line);
        match channel {
            Channel::CurrentLine => row.marker = value,
            Channel::Lexical => {
                if row.lexical.len() < annotation.end {
                    row.lexical.resize(annotation.end, None);
                }
                for slot in &mut row.lexical[annotation.start.min(annotation.end)..annotation.end] {
                    *slot = value;
                }
            }
        }
    }
}

/// Fields set in `top` win, the rest come from `base`
fn overlay(
    base: Option<DisplayAttribute>,
    top: Option<DisplayAttribute>,
) -> Option<DisplayAttribute> {
    match (base, top) {
        (None, top) => top,
        (base, None) => base,
        (Some(base), Some(top)) => Some(DisplayAttribute {
            fg: top.fg.or(base.fg),
            bg: top.bg.or(base.bg),
            weight: top.weight.or(base.weight),
        }),
    }
}
