//! Incremental highlighter
//!
//! Reacts to edit notifications from the buffer, decides which lines need
//! re-matching, and pushes annotations into a sink. Two channels are kept
//! apart: lexical styling from the rule set, and a whole-line marker on
//! the tracked ("current") line.
//!
//! Every write goes through [`Highlighter::apply_to_line`], which silently
//! drops the write when highlighting is disabled, the line no longer
//! exists, or the attribute is empty. Nothing in here returns an error;
//! highlighting must never interrupt editing.

use std::ops::Range;

use serde::Deserialize;

use crate::config::Config;
use crate::dirty::DirtyLines;
use crate::line::clamp_range;
use crate::sink::{Annotation, AnnotationSink, Channel};
use crate::syntax::{
    match_line, Attribute, DisplayAttribute, Matches, RuleSet, CURRENT_LINE_COLOR,
};

/// Read access to the buffer being highlighted
pub trait TextSource {
    /// Number of lines in the buffer
    fn line_count(&self) -> usize;

    /// Content of a line, or `None` if it does not exist
    fn line(&self, idx: usize) -> Option<&str>;

    /// Index of the last line
    fn last_line(&self) -> Option<usize> {
        self.line_count().checked_sub(1)
    }
}

impl<S: AsRef<str>> TextSource for [S] {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, idx: usize) -> Option<&str> {
        self.get(idx).map(|s| s.as_ref())
    }
}

impl<S: AsRef<str>> TextSource for Vec<S> {
    fn line_count(&self) -> usize {
        self.len()
    }

    fn line(&self, idx: usize) -> Option<&str> {
        self.get(idx).map(|s| s.as_ref())
    }
}

/// A change reported by the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextChange {
    /// Content of one line changed
    Edited { line: usize },
    /// `count` new lines now start at index `at`
    Inserted { at: usize, count: usize },
    /// `count` lines starting at `at` were removed
    Removed { at: usize, count: usize },
}

/// Which lines are recomputed after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingMode {
    /// Only move the marker to the last line once the tracked line is
    /// emptied, and only re-match that line
    Narrow,
    /// Re-match every line reported as changed, and keep the marker on
    /// the last line
    #[default]
    Dirty,
}

/// Per-instance highlighting state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HighlightState {
    enabled: bool,
    /// Line currently carrying the current-line marker
    tracked: Option<usize>,
}

impl Default for HighlightState {
    fn default() -> Self {
        Self {
            enabled: true,
            tracked: None,
        }
    }
}

/// Incremental highlighter for one editor instance
#[derive(Debug)]
pub struct Highlighter {
    rules: RuleSet,
    state: HighlightState,
    mode: TrackingMode,
    /// Attribute of the current-line marker
    marker: DisplayAttribute,
    /// Lines waiting to be re-matched, processed in ascending order
    dirty: DirtyLines,
    max_lines_per_pass: usize,
}

impl Highlighter {
    /// Create a highlighter with the default rule set
    pub fn new() -> Self {
        Self::with_rules(RuleSet::build_default())
    }

    /// Create a highlighter around an existing rule set
    pub fn with_rules(rules: RuleSet) -> Self {
        Self {
            rules,
            state: HighlightState::default(),
            mode: TrackingMode::default(),
            marker: DisplayAttribute::bg(CURRENT_LINE_COLOR),
            dirty: DirtyLines::new(),
            max_lines_per_pass: usize::MAX,
        }
    }

    /// Create a highlighter from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        let mut highlighter = Self::with_rules(RuleSet::with_palette(&config.palette))
            .with_mode(config.mode)
            .with_marker(DisplayAttribute::bg(config.palette.current_line))
            .with_max_lines_per_pass(config.max_lines_per_pass);
        highlighter.set_enabled(config.enabled);
        highlighter
    }

    /// Builder: set the tracking mode
    pub fn with_mode(mut self, mode: TrackingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: set the current-line marker attribute
    pub fn with_marker(mut self, marker: DisplayAttribute) -> Self {
        self.marker = marker;
        self
    }

    /// Builder: bound the dirty lines handled per notification
    pub fn with_max_lines_per_pass(mut self, max: usize) -> Self {
        self.max_lines_per_pass = max.max(1);
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn mode(&self) -> TrackingMode {
        self.mode
    }

    pub fn tracked(&self) -> Option<usize> {
        self.state.tracked
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    /// Enable or disable annotation output
    ///
    /// Re-enabling does not repaint anything by itself; output resumes
    /// with the next edit notification. Lines edited while disabled stay
    /// queued and the marker stays on the line it was last drawn on, so
    /// that pass brings the sink back in line with the buffer.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.state.enabled != enabled {
            tracing::debug!(enabled, "highlighting toggled");
        }
        self.state.enabled = enabled;
    }

    /// Flip the enabled flag
    pub fn toggle(&mut self) {
        self.set_enabled(!self.state.enabled);
    }

    /// Number of lines still queued for re-matching
    pub fn pending(&self) -> usize {
        self.dirty.len()
    }

    /// Match one line of text against the rule set, without emitting
    pub fn match_line<'a>(&'a self, text: &'a str) -> Matches<'a, 'a> {
        match_line(text, &self.rules)
    }

    /// Record a buffer change
    ///
    /// Edited lines are queued (dirty mode). Insertions and removals shift
    /// queued lines and the tracked line, and removing the tracked line
    /// forgets it.
    pub fn notify(&mut self, change: TextChange) {
        match change {
            TextChange::Edited { line } => {
                if self.mode == TrackingMode::Dirty {
                    self.dirty.insert_line(line);
                }
            }
            TextChange::Inserted { at, count } => {
                if count == 0 {
                    return;
                }
                self.dirty.shift_inserted(at, count);
                if self.mode == TrackingMode::Dirty {
                    self.dirty.insert(at..at.saturating_add(count));
                }
                if let Some(tracked) = self.state.tracked.filter(|&t| t >= at) {
                    self.state.tracked = Some(tracked.saturating_add(count));
                }
            }
            TextChange::Removed { at, count } => {
                if count == 0 {
                    return;
                }
                let end = at.saturating_add(count);
                self.dirty.shift_removed(at, count);
                self.state.tracked = match self.state.tracked {
                    Some(t) if (at..end).contains(&t) => {
                        tracing::trace!(line = t, "tracked line removed");
                        None
                    }
                    Some(t) if t >= end => Some(t - count),
                    other => other,
                };
            }
        }
    }

    /// Queue every line of a buffer for re-matching
    pub fn invalidate_all(&mut self, line_count: usize) {
        self.dirty.insert(0..line_count);
    }

    /// Handle a "content changed" notification from the buffer
    ///
    /// Moves the current-line marker if needed (the old line is always
    /// cleared before the new one is marked), then re-matches queued
    /// lines, at most `max_lines_per_pass` of them. While disabled, the
    /// queue and the marker are left as they are.
    pub fn on_content_changed<S, K>(&mut self, source: &S, sink: &mut K)
    where
        S: TextSource + ?Sized,
        K: AnnotationSink + ?Sized,
    {
        let line_count = source.line_count();
        if let Some(tracked) = self.state.tracked.filter(|&t| t >= line_count) {
            tracing::trace!(line = tracked, "tracked line no longer exists");
            self.state.tracked = None;
        }
        self.dirty.truncate(line_count);

        if !self.state.enabled {
            tracing::trace!(pending = self.dirty.len(), "highlighting disabled, pass skipped");
            return;
        }

        if self.should_retarget(source) {
            self.retarget(source, sink);
        }

        let mut processed = 0;
        while processed < self.max_lines_per_pass {
            let Some(line) = self.dirty.pop_first() else {
                break;
            };
            self.recompute_line(source, sink, line);
            processed += 1;
        }
        if !self.dirty.is_empty() {
            tracing::debug!(
                processed,
                remaining = self.dirty.len(),
                "dirty lines deferred to next pass"
            );
        }
    }

    fn should_retarget<S: TextSource + ?Sized>(&self, source: &S) -> bool {
        let tracked_empty = self
            .state
            .tracked
            .and_then(|t| source.line(t))
            .is_some_and(str::is_empty);

        match self.mode {
            TrackingMode::Narrow => {
                tracked_empty || (self.state.tracked.is_none() && source.line_count() > 0)
            }
            TrackingMode::Dirty => tracked_empty || self.state.tracked != source.last_line(),
        }
    }

    /// Move the current-line marker to the last line
    fn retarget<S, K>(&mut self, source: &S, sink: &mut K)
    where
        S: TextSource + ?Sized,
        K: AnnotationSink + ?Sized,
    {
        let previous = self.state.tracked;
        if let Some(prev) = previous {
            let _span = tracing::trace_span!("recompute", line = prev).entered();
            let full = 0..usize::MAX;
            self.apply_to_line(source, sink, Channel::CurrentLine, prev, full, Attribute::Clear);
        }

        let target = source.last_line();
        self.state.tracked = target;
        tracing::debug!(?previous, ?target, "current line moved");

        if let Some(line) = target {
            {
                let _span = tracing::trace_span!("recompute", line).entered();
                let marker = Attribute::Set(self.marker);
                self.apply_to_line(source, sink, Channel::CurrentLine, line, 0..usize::MAX, marker);
            }
            if self.mode == TrackingMode::Narrow {
                self.recompute_line(source, sink, line);
            }
        }
    }

    /// Replace the lexical annotations of one line
    fn recompute_line<S, K>(&self, source: &S, sink: &mut K, line: usize)
    where
        S: TextSource + ?Sized,
        K: AnnotationSink + ?Sized,
    {
        let _span = tracing::trace_span!("recompute", line).entered();
        let Some(text) = source.line(line) else {
            return;
        };

        let whole = 0..text.len();
        self.apply_to_line(source, sink, Channel::Lexical, line, whole, Attribute::Clear);
        let mut count = 0;
        for span in match_line(text, &self.rules) {
            let attribute = Attribute::Set(span.attribute);
            if self.apply_to_line(source, sink, Channel::Lexical, line, span.range(), attribute) {
                count += 1;
            }
        }
        tracing::trace!(spans = count, "line recomputed");
    }

    /// Guarded write of one annotation
    ///
    /// Returns whether anything reached the sink. The write is dropped if
    /// highlighting is disabled, `line` does not exist in `source`, or
    /// `attribute` is the empty sentinel. `range` is clamped to the line.
    pub fn apply_to_line<S, K>(
        &self,
        source: &S,
        sink: &mut K,
        channel: Channel,
        line: usize,
        range: Range<usize>,
        attribute: Attribute,
    ) -> bool
    where
        S: TextSource + ?Sized,
        K: AnnotationSink + ?Sized,
    {
        if !self.state.enabled || !attribute.is_valid() {
            return false;
        }
        let Some(text) = source.line(line) else {
            tracing::trace!(line, "write to missing line dropped");
            return false;
        };

        let range = clamp_range(text, range);
        sink.apply(channel, Annotation::new(line, range, attribute));
        true
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Recorder, StyledLines};
    use crate::syntax::{Color, COMMENT_COLOR, KEYWORD_COLOR};

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| s.to_string()).collect()
    }

    fn lexical(recorder: &Recorder) -> Vec<(usize, Range<usize>)> {
        recorder
            .channel(Channel::Lexical)
            .filter(|a| !a.is_clear())
            .map(|a| (a.line, a.range()))
            .collect()
    }

    #[test]
    fn test_scenario_buffer() {
        let buffer = lines(&["for x in y:", "  return x", "# done"]);
        let mut highlighter = Highlighter::new();
        let mut recorder = Recorder::new();

        highlighter.invalidate_all(buffer.len());
        highlighter.on_content_changed(&buffer, &mut recorder);

        assert_eq!(lexical(&recorder), vec![(0, 0..3), (1, 2..8), (2, 0..6)]);
        let comment = recorder
            .channel(Channel::Lexical)
            .find(|a| a.line == 2 && !a.is_clear())
            .unwrap();
        assert_eq!(comment.attribute, Attribute::Set(DisplayAttribute::fg(COMMENT_COLOR)));
        assert_eq!(highlighter.tracked(), Some(2));
    }

    #[test]
    fn test_clear_precedes_new_spans() {
        let buffer = lines(&["if x"]);
        let mut highlighter = Highlighter::new();
        let mut recorder = Recorder::new();

        highlighter.notify(TextChange::Edited { line: 0 });
        highlighter.on_content_changed(&buffer, &mut recorder);

        let calls: Vec<_> = recorder.channel(Channel::Lexical).collect();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].is_clear());
        assert_eq!(calls[0].range(), 0..4);
        assert_eq!(
            calls[1].attribute,
            Attribute::Set(DisplayAttribute::fg(KEYWORD_COLOR).with_bold())
        );
    }

    #[test]
    fn test_tracked_line_transition() {
        let mut buffer = lines(&["a", "b", "c"]);
        let mut highlighter = Highlighter::new();
        let mut recorder = Recorder::new();

        highlighter.on_content_changed(&buffer, &mut recorder);
        assert_eq!(highlighter.tracked(), Some(2));
        recorder.take();

        // Enter at the end of line 2 creates an empty line 3
        buffer.push(String::new());
        highlighter.notify(TextChange::Inserted { at: 3, count: 1 });
        highlighter.on_content_changed(&buffer, &mut recorder);

        let markers: Vec<_> = recorder.channel(Channel::CurrentLine).cloned().collect();
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].line, 2);
        assert!(markers[0].is_clear());
        assert_eq!(markers[1].line, 3);
        assert_eq!(
            markers[1].attribute,
            Attribute::Set(DisplayAttribute::bg(CURRENT_LINE_COLOR))
        );
        assert_eq!(highlighter.tracked(), Some(3));
    }

    #[test]
    fn test_marker_not_moved_without_change() {
        let buffer = lines(&["a", "b"]);
        let mut highlighter = Highlighter::new();
        let mut recorder = Recorder::new();

        highlighter.on_content_changed(&buffer, &mut recorder);
        recorder.take();
        highlighter.notify(TextChange::Edited { line: 0 });
        highlighter.on_content_changed(&buffer, &mut recorder);

        assert_eq!(recorder.channel(Channel::CurrentLine).count(), 0);
    }

    #[test]
    fn test_narrow_mode_waits_for_empty_tracked_line() {
        let mut buffer = lines(&["x", "y"]);
        let mut highlighter = Highlighter::new().with_mode(TrackingMode::Narrow);
        let mut recorder = Recorder::new();

        highlighter.on_content_changed(&buffer, &mut recorder);
        assert_eq!(highlighter.tracked(), Some(1));

        // A new last line alone does not move the marker
        buffer.push("if z".to_string());
        highlighter.notify(TextChange::Inserted { at: 2, count: 1 });
        recorder.take();
        highlighter.on_content_changed(&buffer, &mut recorder);
        assert!(recorder.is_empty());
        assert_eq!(highlighter.tracked(), Some(1));

        // Emptying the tracked line does, and re-matches the new last line
        buffer[1].clear();
        highlighter.notify(TextChange::Edited { line: 1 });
        highlighter.on_content_changed(&buffer, &mut recorder);

        let markers: Vec<_> = recorder.channel(Channel::CurrentLine).collect();
        assert_eq!(markers.len(), 2);
        assert_eq!((markers[0].line, markers[0].is_clear()), (1, true));
        assert_eq!((markers[1].line, markers[1].is_clear()), (2, false));
        assert_eq!(lexical(&recorder), vec![(2, 0..2)]);
        assert_eq!(highlighter.tracked(), Some(2));
    }

    #[test]
    fn test_disabled_emits_nothing() {
        let buffer = lines(&["if x", "while y"]);
        let mut highlighter = Highlighter::new();
        let mut recorder = Recorder::new();

        highlighter.set_enabled(false);
        highlighter.invalidate_all(buffer.len());
        highlighter.on_content_changed(&buffer, &mut recorder);
        assert!(recorder.is_empty());
        assert_eq!(highlighter.pending(), 2);
        assert_eq!(highlighter.tracked(), None);

        let attr = DisplayAttribute::fg(Color::rgb(1, 2, 3));
        assert!(!highlighter.apply_to_line(
            &buffer,
            &mut recorder,
            Channel::Lexical,
            0,
            0..2,
            attr.into()
        ));
        assert!(recorder.is_empty());

        // Re-enabling takes effect on the next edit, which also picks up
        // the lines queued while disabled
        highlighter.toggle();
        assert!(highlighter.is_enabled());
        assert!(recorder.is_empty());
        highlighter.notify(TextChange::Edited { line: 1 });
        highlighter.on_content_changed(&buffer, &mut recorder);
        assert_eq!(lexical(&recorder), vec![(0, 0..2), (1, 0..5)]);
        assert_eq!(highlighter.pending(), 0);
    }

    #[test]
    fn test_edits_while_disabled_repainted() {
        let mut buffer = lines(&["if x", "y"]);
        let mut highlighter = Highlighter::new();
        let mut styled = StyledLines::new();

        highlighter.invalidate_all(buffer.len());
        highlighter.on_content_changed(&buffer, &mut styled);
        assert_eq!(styled.lexical_at(0, 0).and_then(|a| a.fg), Some(KEYWORD_COLOR));

        highlighter.set_enabled(false);
        buffer[0] = "ab x".to_string();
        highlighter.notify(TextChange::Edited { line: 0 });
        highlighter.on_content_changed(&buffer, &mut styled);

        highlighter.set_enabled(true);
        buffer[1] = "yy".to_string();
        highlighter.notify(TextChange::Edited { line: 1 });
        highlighter.on_content_changed(&buffer, &mut styled);

        assert_eq!(styled.lexical_at(0, 0), None);
        assert_eq!(styled.runs(0, &buffer[0]).len(), 1);
    }

    #[test]
    fn test_marker_single_line_after_reenable() {
        fn push(
            buffer: &mut Vec<String>,
            text: &str,
            highlighter: &mut Highlighter,
            styled: &mut StyledLines,
        ) {
            let change = TextChange::Inserted {
                at: buffer.len(),
                count: 1,
            };
            buffer.push(text.to_string());
            styled.notify(&change);
            highlighter.notify(change);
            highlighter.on_content_changed(&*buffer, styled);
        }

        let mut buffer = lines(&["a", "b"]);
        let mut highlighter = Highlighter::new();
        let mut styled = StyledLines::new();
        highlighter.on_content_changed(&buffer, &mut styled);
        assert_eq!(highlighter.tracked(), Some(1));

        highlighter.set_enabled(false);
        push(&mut buffer, "c", &mut highlighter, &mut styled);
        assert_eq!(highlighter.tracked(), Some(1));

        highlighter.set_enabled(true);
        push(&mut buffer, "d", &mut highlighter, &mut styled);

        let marked: Vec<usize> = (0..buffer.len())
            .filter(|&l| styled.marker(l).is_some())
            .collect();
        assert_eq!(marked, vec![3]);
        assert_eq!(highlighter.tracked(), Some(3));
    }

    #[test]
    fn test_huge_insert_saturates() {
        let mut highlighter = Highlighter::new();
        highlighter.notify(TextChange::Edited { line: 3 });
        highlighter.state.tracked = Some(2);

        highlighter.notify(TextChange::Inserted {
            at: 1,
            count: usize::MAX,
        });
        assert_eq!(highlighter.pending(), usize::MAX - 1);
        assert_eq!(highlighter.tracked(), Some(usize::MAX));

        // Nothing past the end of a real buffer gets written
        let buffer = lines(&["if"]);
        let mut recorder = Recorder::new();
        highlighter.on_content_changed(&buffer, &mut recorder);
        assert_eq!(highlighter.tracked(), Some(0));
        assert_eq!(highlighter.pending(), 0);
    }

    #[test]
    fn test_apply_guard() {
        let buffer = lines(&["hello"]);
        let highlighter = Highlighter::new();
        let mut recorder = Recorder::new();
        let attr = Attribute::Set(DisplayAttribute::fg(Color::rgb(9, 9, 9)));

        let channel = Channel::Lexical;

        // Missing line
        assert!(!highlighter.apply_to_line(&buffer, &mut recorder, channel, 1, 0..1, attr));
        // Empty attribute
        let empty = Attribute::Set(DisplayAttribute::default());
        assert!(!highlighter.apply_to_line(&buffer, &mut recorder, channel, 0, 0..1, empty));
        assert!(recorder.is_empty());

        // Range is clamped to the line
        assert!(highlighter.apply_to_line(&buffer, &mut recorder, channel, 0, 2..99, attr));
        assert_eq!(recorder.calls[0].1.range(), 2..5);
    }

    #[test]
    fn test_removed_tracked_line_forgotten() {
        let mut buffer = lines(&["a", "b", "c"]);
        let mut highlighter = Highlighter::new();
        let mut recorder = Recorder::new();
        highlighter.on_content_changed(&buffer, &mut recorder);
        recorder.take();

        buffer.pop();
        highlighter.notify(TextChange::Removed { at: 2, count: 1 });
        assert_eq!(highlighter.tracked(), None);

        // No clear is sent for the deleted line, line 1 gets marked
        highlighter.on_content_changed(&buffer, &mut recorder);
        let markers: Vec<_> = recorder.channel(Channel::CurrentLine).collect();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].line, 1);
        assert!(!markers[0].is_clear());
    }

    #[test]
    fn test_structural_edits_shift_state() {
        let mut highlighter = Highlighter::new();
        highlighter.notify(TextChange::Edited { line: 1 });
        highlighter.notify(TextChange::Edited { line: 5 });
        highlighter.state.tracked = Some(4);

        highlighter.notify(TextChange::Inserted { at: 2, count: 2 });
        assert_eq!(highlighter.dirty.ranges(), &[1..4, 7..8]);
        assert_eq!(highlighter.tracked(), Some(6));

        highlighter.notify(TextChange::Removed { at: 0, count: 2 });
        assert_eq!(highlighter.dirty.ranges(), &[0..2, 5..6]);
        assert_eq!(highlighter.tracked(), Some(4));
    }

    #[test]
    fn test_stale_tracked_line_dropped() {
        let buffer = lines(&["only"]);
        let mut highlighter = Highlighter::new();
        highlighter.state.tracked = Some(7);
        highlighter.notify(TextChange::Edited { line: 9 });

        let mut recorder = Recorder::new();
        highlighter.on_content_changed(&buffer, &mut recorder);

        // No clear for line 7, marker lands on line 0, line 9 ignored
        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.calls[0].0, Channel::CurrentLine);
        assert_eq!(recorder.calls[0].1.line, 0);
        assert_eq!(highlighter.pending(), 0);
    }

    #[test]
    fn test_pass_is_bounded() {
        let buffer = lines(&["if", "if", "if", "if", "if"]);
        let mut highlighter = Highlighter::new().with_max_lines_per_pass(2);
        let mut recorder = Recorder::new();

        highlighter.invalidate_all(buffer.len());
        highlighter.on_content_changed(&buffer, &mut recorder);
        assert_eq!(lexical(&recorder), vec![(0, 0..2), (1, 0..2)]);
        assert_eq!(highlighter.pending(), 3);

        highlighter.on_content_changed(&buffer, &mut recorder);
        highlighter.on_content_changed(&buffer, &mut recorder);
        assert_eq!(highlighter.pending(), 0);
        assert_eq!(lexical(&recorder).len(), 5);
    }

    #[test]
    fn test_empty_buffer() {
        let buffer: Vec<String> = Vec::new();
        let mut highlighter = Highlighter::new();
        let mut recorder = Recorder::new();
        highlighter.notify(TextChange::Edited { line: 0 });
        highlighter.on_content_changed(&buffer, &mut recorder);
        assert!(recorder.is_empty());
        assert_eq!(highlighter.tracked(), None);
    }

    #[test]
    fn test_match_line_is_pure() {
        let highlighter = Highlighter::new();
        let a: Vec<_> = highlighter.match_line("break # for").collect();
        let b: Vec<_> = highlighter.match_line("break # for").collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert!(highlighter.match_line("").next().is_none());
    }

    #[test]
    fn test_styled_lines_end_to_end() {
        let mut buffer = lines(&["if a:", "  x = 1 # for"]);
        let mut highlighter = Highlighter::new();
        let mut styled = StyledLines::new();

        highlighter.invalidate_all(buffer.len());
        highlighter.on_content_changed(&buffer, &mut styled);
        assert_eq!(styled.lexical_at(0, 0).and_then(|a| a.fg), Some(KEYWORD_COLOR));
        assert_eq!(styled.lexical_at(1, 10).and_then(|a| a.fg), Some(COMMENT_COLOR));
        assert!(styled.marker(1).is_some());

        // Removing the comment clears its old styling
        buffer[1] = "  x = 1".to_string();
        highlighter.notify(TextChange::Edited { line: 1 });
        highlighter.on_content_changed(&buffer, &mut styled);
        let runs = styled.runs(1, &buffer[1]);
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].attribute, styled.marker(1));
    }

    #[test]
    fn test_from_config() {
        let config = Config::parse(
            "enabled = false\nmode = \"narrow\"\n[palette]\ncurrent-line = \"#000000\"",
        )
        .unwrap();
        let highlighter = Highlighter::from_config(&config);
        assert!(!highlighter.is_enabled());
        assert_eq!(highlighter.mode(), TrackingMode::Narrow);
        assert_eq!(highlighter.marker, DisplayAttribute::bg(Color::rgb(0, 0, 0)));
    }
}
