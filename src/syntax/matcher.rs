//! Line matcher
//!
//! Runs every rule of a [`RuleSet`] over one line and yields the styled
//! spans left after overlap resolution. The policy: a match is dropped if
//! any match of a later-registered rule overlaps it. With the default
//! table (keywords, then comments) keywords inside a comment disappear.
//!
//! Matching is lazy. Each rule keeps a cursor holding its next match, and
//! the iterator always pops the match with the smallest start offset, so
//! spans come out ordered and a rule is only scanned as far as needed.

use std::iter::FusedIterator;

use super::rules::RuleSet;
use super::style::Span;

/// Match `text` against `rules`
pub fn match_line<'r, 't>(text: &'t str, rules: &'r RuleSet) -> Matches<'r, 't> {
    Matches {
        text,
        rules,
        cursors: Vec::new(),
        primed: false,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    /// Next unconsumed match of this rule
    next: Option<(usize, usize)>,
    /// End of the last consumed match (0 if none)
    last_end: usize,
}

/// Iterator over the spans of one line, see [`match_line`]
#[derive(Debug, Clone)]
pub struct Matches<'r, 't> {
    text: &'t str,
    rules: &'r RuleSet,
    cursors: Vec<Cursor>,
    primed: bool,
}

impl Matches<'_, '_> {
    fn prime(&mut self) {
        self.cursors = self
            .rules
            .rules()
            .iter()
            .map(|rule| Cursor {
                next: rule.find_at(self.text, 0),
                last_end: 0,
            })
            .collect();
        self.primed = true;
    }

    /// Whether a later rule has a match overlapping `start..end`
    ///
    /// Every match with a smaller start has already been consumed, so a
    /// later rule overlaps either through its last consumed match or
    /// through its pending one.
    fn overridden(&self, idx: usize, start: usize, end: usize) -> bool {
        self.cursors[idx + 1..].iter().any(|cursor| {
            cursor.last_end > start || cursor.next.is_some_and(|(s, _)| s < end)
        })
    }
}

impl Iterator for Matches<'_, '_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        if !self.primed {
            self.prime();
        }

        let rules = self.rules;
        loop {
            let (idx, (start, end)) = self
                .cursors
                .iter()
                .enumerate()
                .filter_map(|(i, cursor)| cursor.next.map(|m| (i, m)))
                .min_by_key(|&(i, (start, _))| (start, i))?;

            let rule = &rules.rules()[idx];
            let cursor = &mut self.cursors[idx];
            cursor.last_end = end;
            cursor.next = rule.find_at(self.text, end);

            if !self.overridden(idx, start, end) {
                return Some(Span::new(start, end, rule.attribute, idx));
            }
        }
    }
}

impl FusedIterator for Matches<'_, '_> {}
