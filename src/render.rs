//! Terminal rendering of highlighted text
//!
//! Turns the styling held by a [`StyledLines`] sink into crossterm style
//! commands, or into a plain-text dump of the raw annotations.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute as TermAttribute, Color as TermColor, Print, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};

use crate::error::Result;
use crate::highlighter::TextSource;
use crate::sink::{Annotation, Channel, StyledLines};
use crate::syntax::{Attribute, Color, DisplayAttribute};

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

fn set_style<W: Write>(out: &mut W, attr: &DisplayAttribute) -> Result<()> {
    if let Some(fg) = attr.fg {
        queue!(out, SetForegroundColor(term_color(fg)))?;
    }
    if let Some(bg) = attr.bg {
        queue!(out, SetBackgroundColor(term_color(bg)))?;
    }
    if attr.is_bold() {
        queue!(out, SetAttribute(TermAttribute::Bold))?;
    }
    Ok(())
}

/// Write every line of `source` with the styling recorded in `styled`
pub fn render<W, S>(out: &mut W, source: &S, styled: &StyledLines) -> Result<()>
where
    W: Write,
    S: TextSource + ?Sized,
{
    for idx in 0..source.line_count() {
        let text = source.line(idx).unwrap_or_default();
        for run in styled.runs(idx, text) {
            let piece = &text[run.range];
            match run.attribute {
                Some(attr) => {
                    set_style(out, &attr)?;
                    queue!(out, Print(piece), SetAttribute(TermAttribute::Reset))?;
                }
                None => queue!(out, Print(piece))?,
            }
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()?;
    Ok(())
}

/// Human-readable form of an attribute
pub fn describe(attribute: &Attribute) -> String {
    let Attribute::Set(attr) = attribute else {
        return "clear".to_string();
    };
    let mut parts = Vec::new();
    if let Some(fg) = attr.fg {
        parts.push(format!("fg={}", fg));
    }
    if let Some(bg) = attr.bg {
        parts.push(format!("bg={}", bg));
    }
    if attr.is_bold() {
        parts.push("bold".to_string());
    }
    parts.join(" ")
}

/// Write one line per annotation: channel, line, byte range, attribute
pub fn dump<'a, W, I>(out: &mut W, calls: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a (Channel, Annotation)>,
{
    for (channel, annotation) in calls {
        let channel = match channel {
            Channel::Lexical => "lexical",
            Channel::CurrentLine => "current-line",
        };
        writeln!(
            out,
            "{} {} {}..{} {}",
            channel,
            annotation.line,
            annotation.start,
            annotation.end,
            describe(&annotation.attribute)
        )?;
    }
    out.flush()?;
    Ok(())
}
