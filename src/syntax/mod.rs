//! Lexical rules and line matching
//!
//! This module provides the styling vocabulary, the rule set and the
//! matcher that turns one line of text into styled spans.

mod matcher;
mod rules;
mod style;

pub use matcher::{match_line, Matches};
pub use rules::{
    Rule, RuleSet, RuleSetBuilder, COMMENT_COLOR, CURRENT_LINE_COLOR, KEYWORDS, KEYWORD_COLOR,
};
pub use style::{Attribute, Color, DisplayAttribute, Span, Weight};
