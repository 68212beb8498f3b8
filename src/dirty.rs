//! Queue of lines waiting to be re-matched
//!
//! Stored as sorted, disjoint, non-touching ranges, so a large block of
//! inserted lines costs one entry no matter how many lines it covers.

use std::ops::Range;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct DirtyLines {
    ranges: Vec<Range<usize>>,
}

impl DirtyLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every line in `lines`
    pub fn insert(&mut self, lines: Range<usize>) {
        if lines.is_empty() {
            return;
        }
        let mut merged = lines;
        let mut out = Vec::with_capacity(self.ranges.len() + 1);
        let mut placed = false;
        for r in self.ranges.drain(..) {
            if placed || r.end < merged.start {
                out.push(r);
            } else if merged.end < r.start {
                out.push(merged.clone());
                out.push(r);
                placed = true;
            } else {
                merged = merged.start.min(r.start)..merged.end.max(r.end);
            }
        }
        if !placed {
            out.push(merged);
        }
        self.ranges = out;
    }

    /// Queue a single line
    pub fn insert_line(&mut self, line: usize) {
        self.insert(line..line.saturating_add(1));
    }

    /// `count` lines were inserted at `at`: queued lines from `at` on move down
    pub fn shift_inserted(&mut self, at: usize, count: usize) {
        let shift = |l: usize| l.saturating_add(count);
        let mut out = Vec::with_capacity(self.ranges.len() + 1);
        for r in self.ranges.drain(..) {
            if r.start >= at {
                out.push(shift(r.start)..shift(r.end));
            } else if r.end > at {
                out.push(r.start..at);
                out.push(shift(at)..shift(r.end));
            } else {
                out.push(r);
            }
        }
        self.ranges = out;
        self.normalize();
    }

    /// `count` lines starting at `at` were removed
    pub fn shift_removed(&mut self, at: usize, count: usize) {
        let end = at.saturating_add(count);
        let mut out = Vec::with_capacity(self.ranges.len());
        for r in self.ranges.drain(..) {
            out.push(r.start..r.end.min(at));
            let after = r.start.max(end)..r.end;
            if !after.is_empty() {
                out.push(after.start - count..after.end - count);
            }
        }
        self.ranges = out;
        self.normalize();
    }

    /// Forget lines at or past `line_count`
    pub fn truncate(&mut self, line_count: usize) {
        for r in &mut self.ranges {
            r.end = r.end.min(line_count);
        }
        self.normalize();
    }

    /// Take the lowest queued line
    pub fn pop_first(&mut self) -> Option<usize> {
        let first = self.ranges.first_mut()?;
        let line = first.start;
        first.start += 1;
        if first.is_empty() {
            self.ranges.remove(0);
        }
        Some(line)
    }

    pub fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[cfg(test)]
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Drop empty ranges and merge touching ones; input must be sorted
    fn normalize(&mut self) {
        let mut out: Vec<Range<usize>> = Vec::with_capacity(self.ranges.len());
        for r in self.ranges.drain(..).filter(|r| !r.is_empty()) {
            match out.last_mut() {
                Some(last) if last.end >= r.start => last.end = last.end.max(r.end),
                _ => out.push(r),
            }
        }
        self.ranges = out;
    }
}
