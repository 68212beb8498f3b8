//! lexlight - incremental lexical highlighting
//!
//! Classifies spans of an editable buffer with a small set of regex rules
//! (keywords, `#` comments) and keeps the resulting annotations in sync
//! with the buffer as it changes.
//!
//! ```
//! use lexlight::{Highlighter, Recorder, TextChange};
//!
//! let buffer = vec!["for x in y:", "  return x", "# done"];
//! let mut highlighter = Highlighter::new();
//! let mut sink = Recorder::new();
//!
//! for line in 0..buffer.len() {
//!     highlighter.notify(TextChange::Edited { line });
//! }
//! highlighter.on_content_changed(&buffer, &mut sink);
//! assert!(!sink.is_empty());
//! ```

pub mod config;
mod dirty;
pub mod document;
pub mod error;
pub mod highlighter;
pub mod line;
pub mod render;
pub mod sink;
pub mod syntax;

pub use config::{Config, Palette};
pub use document::Document;
pub use error::{Error, Result};
pub use highlighter::{Highlighter, TextChange, TextSource, TrackingMode};
pub use sink::{Annotation, AnnotationSink, Channel, Recorder, StyledLines, StyledRun};
pub use syntax::{match_line, Attribute, Color, DisplayAttribute, RuleSet, Span, Weight};
