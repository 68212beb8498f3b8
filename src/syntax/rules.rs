//! Pattern rules and the rule set
//!
//! A rule set is an ordered list of regex rules. Order matters: when two
//! matches overlap, the one from the later rule wins (see
//! [`match_line`](super::match_line)).

use regex::Regex;

use super::style::{Color, DisplayAttribute};
use crate::config::Palette;
use crate::error::{Error, Result};

/// Keywords highlighted by the default rule set
pub const KEYWORDS: &[&str] = &["if", "else", "while", "for", "break", "continue", "return"];

/// Default keyword color
pub const KEYWORD_COLOR: Color = Color::rgb(0x56, 0x9c, 0xd6);
/// Default comment color
pub const COMMENT_COLOR: Color = Color::rgb(0x80, 0x80, 0x80);
/// Default current-line background
pub const CURRENT_LINE_COLOR: Color = Color::rgb(0x2b, 0x2b, 0x2b);

/// Whole-word pattern for a literal keyword
fn keyword_pattern(word: &str) -> String {
    format!(r"\b{}\b", regex::escape(word))
}

/// A single-line pattern rule
pub struct Rule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Attribute assigned to matches
    pub attribute: DisplayAttribute,
    /// A match preceded by an odd number of these is escaped and skipped
    pub escape: Option<char>,
}

impl Rule {
    /// Create a new rule, compiling `pattern`
    pub fn new(name: &str, pattern: &str, attribute: DisplayAttribute) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| Error::InvalidPattern {
            name: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern,
            attribute,
            escape: None,
        })
    }

    /// Find the first unescaped, non-empty match at or after `start`
    pub fn find_at(&self, text: &str, start: usize) -> Option<(usize, usize)> {
        let mut pos = start;
        while pos < text.len() {
            let m = self.pattern.find_at(text, pos)?;
            if m.start() < m.end() && !self.is_escaped(text, m.start()) {
                return Some((m.start(), m.end()));
            }
            // Resume one character past the rejected match start
            pos = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
        }
        None
    }

    fn is_escaped(&self, text: &str, pos: usize) -> bool {
        let Some(escape) = self.escape else {
            return false;
        };
        let escape_count = text[..pos]
            .chars()
            .rev()
            .take_while(|&c| c == escape)
            .count();
        escape_count % 2 == 1
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("attribute", &self.attribute)
            .field("escape", &self.escape)
            .finish()
    }
}

/// Ordered, immutable collection of rules
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Start an append-only builder
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Keywords then `#` comments, with the stock colors
    pub fn build_default() -> Self {
        Self::with_palette(&Palette::default())
    }

    /// Keywords then `#` comments, colored from `palette`
    pub fn with_palette(palette: &Palette) -> Self {
        let keyword = DisplayAttribute::fg(palette.keyword).with_bold();
        let comment = DisplayAttribute::fg(palette.comment);

        let mut rules = Vec::with_capacity(KEYWORDS.len() + 1);
        for word in KEYWORDS {
            if let Ok(rule) = Rule::new(word, &keyword_pattern(word), keyword) {
                rules.push(rule);
            }
        }
        if let Ok(mut rule) = Rule::new("comment", r"#.*", comment) {
            rule.escape = Some('\\');
            rules.push(rule);
        }

        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::build_default()
    }
}

/// Builder for [`RuleSet`]
///
/// Rules are appended in call order. The first invalid pattern is kept
/// and reported by [`build`](Self::build).
#[derive(Default)]
pub struct RuleSetBuilder {
    rules: Vec<Rule>,
    error: Option<Error>,
}

impl RuleSetBuilder {
    /// Append a whole-word keyword rule
    pub fn keyword(self, word: &str, attribute: DisplayAttribute) -> Self {
        self.pattern(word, &keyword_pattern(word), attribute)
    }

    /// Append a raw regex rule
    pub fn pattern(mut self, name: &str, pattern: &str, attribute: DisplayAttribute) -> Self {
        if self.error.is_none() {
            match Rule::new(name, pattern, attribute) {
                Ok(rule) => self.rules.push(rule),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Append a regex rule whose matches can be escaped with `escape`
    pub fn escaped_pattern(
        mut self,
        name: &str,
        pattern: &str,
        attribute: DisplayAttribute,
        escape: char,
    ) -> Self {
        self = self.pattern(name, pattern, attribute);
        if self.error.is_none() {
            if let Some(rule) = self.rules.last_mut() {
                rule.escape = Some(escape);
            }
        }
        self
    }

    pub fn build(self) -> Result<RuleSet> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(RuleSet { rules: self.rules }),
        }
    }
}
