//! Core editor types: positions, cursor context, and hint results.
//!
//! These types are host-agnostic and can be used with any editing surface.

use serde::Serialize;
use smol_str::SmolStr;

/// A position on the editing surface.
#[derive(Clone, Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Character offset within the line (NOT byte offset!)
    pub ch: usize,
}

impl Position {
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// The text around the cursor that hint resolution looks at.
///
/// Built fresh for every hint request and never stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorContext<'a> {
    /// Text of the cursor's line, without the line terminator.
    pub line: &'a str,
    /// Cursor offset within the line, in chars. Clamped to the line length.
    pub offset: usize,
}

impl<'a> CursorContext<'a> {
    pub fn new(line: &'a str, offset: usize) -> Self {
        let offset = offset.min(line.chars().count());
        Self { line, offset }
    }

    /// Cursor at the end of the line.
    pub fn at_end(line: &'a str) -> Self {
        Self {
            line,
            offset: line.chars().count(),
        }
    }
}

/// Half-open char range `[start, end)` within one line.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// What happens when a candidate is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ApplyBehavior {
    /// Replace the span with the candidate text.
    #[default]
    Replace,
    /// Insert `style=""`, park the cursor between the quotes and hint again.
    InsertStyleAttribute,
    /// Write the value into the line's style attribute through the inline
    /// style writer.
    ApplyColor { property: SmolStr },
}

/// One completion option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Text shown in the popup.
    pub label: SmolStr,
    /// Text inserted over the span.
    pub text: SmolStr,
    pub apply: ApplyBehavior,
}

impl Candidate {
    /// A candidate whose insertion text is its label.
    pub fn plain(label: impl Into<SmolStr>) -> Self {
        let label = label.into();
        Self {
            text: label.clone(),
            label,
            apply: ApplyBehavior::Replace,
        }
    }

    pub fn with_apply(mut self, apply: ApplyBehavior) -> Self {
        self.apply = apply;
        self
    }
}

/// Which table the candidates were drawn from.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HintMode {
    Tag,
    Attribute,
    CssProperty,
    CssValue,
    /// Cursor sits in a quoted value that is not a style attribute.
    Suppressed,
}

/// Candidates in priority order plus the span they replace.
///
/// `candidates[0]` is what Tab accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HintResult {
    pub mode: HintMode,
    pub candidates: Vec<Candidate>,
    pub span: Span,
}

impl HintResult {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn first(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|c| c.label.as_str())
    }
}

/// Host classification of the token under a position.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum TokenKind {
    /// Text content between tags.
    #[default]
    Text,
    /// Tag name, including the `<`.
    Tag,
    /// Attribute name or whitespace inside a tag.
    Attribute,
    /// Quoted attribute value.
    String,
}

/// Identifies a rendered element carrying an inline `style` attribute.
#[derive(Clone, Debug, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub usize);

/// Request to paint a range of the editor in a color.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorDecoration {
    /// Char range within the line.
    pub span: Span,
    /// CSS applied to the range, e.g. `color: rgb(255, 0, 0)`.
    pub css: String,
}
