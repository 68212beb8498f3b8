//! Display attributes and styled spans
//!
//! Attributes describe how a span should look, independent of any
//! rendering toolkit. The renderer decides how an RGB color or a bold
//! weight maps to its own primitives.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::Error;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` (or `rrggbb`) hex string
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weight {
    Normal,
    Bold,
}

/// Styling descriptor for a span of text
///
/// Every field is optional. An attribute with nothing set carries no
/// styling at all and is treated as invalid by the highlighter's write
/// guard; use [`Attribute::Clear`] to remove styling instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DisplayAttribute {
    /// Foreground color
    pub fg: Option<Color>,
    /// Background color
    pub bg: Option<Color>,
    /// Font weight
    pub weight: Option<Weight>,
}

impl DisplayAttribute {
    /// Create an attribute with just a foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            ..Default::default()
        }
    }

    /// Create an attribute with just a background color
    pub fn bg(color: Color) -> Self {
        Self {
            bg: Some(color),
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.weight = Some(Weight::Bold);
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight == Some(Weight::Bold)
    }

    /// True for the empty sentinel (nothing set)
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// What a sink is asked to do with a range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// Replace whatever is there with this attribute
    Set(DisplayAttribute),
    /// Reset the range to no attribute
    Clear,
}

impl Attribute {
    /// Whether the write guard lets this through
    pub fn is_valid(&self) -> bool {
        match self {
            Attribute::Set(attr) => !attr.is_empty(),
            Attribute::Clear => true,
        }
    }

    /// Attribute left on a range after applying this
    pub fn resolve(&self) -> Option<DisplayAttribute> {
        match self {
            Attribute::Set(attr) => Some(*attr),
            Attribute::Clear => None,
        }
    }
}

impl From<DisplayAttribute> for Attribute {
    fn from(attr: DisplayAttribute) -> Self {
        Attribute::Set(attr)
    }
}

/// A styled span of text within a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Attribute to apply to this span
    pub attribute: DisplayAttribute,
    /// Index of the rule that produced this span
    pub rule: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize, attribute: DisplayAttribute, rule: usize) -> Self {
        Self {
            start,
            end,
            attribute,
            rule,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Check whether two spans share at least one byte
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Convert the byte range to a character range within `text`
    pub fn char_range(&self, text: &str) -> Range<usize> {
        let start = text.get(..self.start).map_or(0, |s| s.chars().count());
        let len = text
            .get(self.start..self.end)
            .map_or(0, |s| s.chars().count());
        start..start + len
    }
}
