//! Host abstraction traits.
//!
//! These traits define the interface between the editor logic and whatever
//! hosts it: a code-editing widget on one side and a rendering surface for
//! the preview on the other. The session is generic over both, so the same
//! logic runs against a browser, a native UI, or the in-memory hosts in this
//! crate.

use miette::Diagnostic;

use crate::types::{ElementId, HintResult, Position, TokenKind};

/// Error type for host operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SurfaceError {
    /// Element id from an earlier query no longer resolves.
    #[error("no styled element with id {0}")]
    #[diagnostic(code(livehtml::surface::unknown_element))]
    UnknownElement(usize),

    /// Rendered document has no `<body>` to style.
    #[error("rendered document has no <body>")]
    #[diagnostic(code(livehtml::surface::missing_body))]
    MissingBody,

    /// Anything the host reports.
    #[error("host error: {0}")]
    #[diagnostic(code(livehtml::surface::host))]
    Host(String),
}

impl From<&str> for SurfaceError {
    fn from(s: &str) -> Self {
        SurfaceError::Host(s.to_string())
    }
}

impl From<String> for SurfaceError {
    fn from(s: String) -> Self {
        SurfaceError::Host(s)
    }
}

/// Capabilities of the code-editing widget.
///
/// Cursor handling, undo history and highlighting live in the widget; the
/// editor logic only reads lines and asks for replacements.
pub trait EditorSurface {
    /// Current cursor position.
    fn cursor(&self) -> Position;

    /// Move the cursor.
    fn set_cursor(&mut self, pos: Position);

    /// Number of lines in the document.
    fn line_count(&self) -> usize;

    /// Text of a line, without its terminator. None past the last line.
    fn line_text(&self, line: usize) -> Option<String>;

    /// The whole document.
    fn full_text(&self) -> String;

    /// Replace the whole document. The cursor moves to the start.
    fn set_full_text(&mut self, text: &str);

    /// Replace `[from, to)` with `text`.
    fn replace_range(&mut self, text: &str, from: Position, to: Position);

    /// Classify the token at a position.
    ///
    /// Used to keep the hint popup closed inside attribute values.
    fn token_kind_at(&self, pos: Position) -> TokenKind;

    /// Paint `[from, to)` with inline CSS, e.g. a live text color.
    fn mark_text(&mut self, from: Position, to: Position, css: &str);

    /// Show a candidate popup anchored on `line`.
    fn show_hints(&mut self, line: usize, hints: &HintResult);

    /// Dismiss the candidate popup.
    fn close_hints(&mut self);
}

/// Capabilities of the preview rendering surface.
///
/// A write replaces the whole document; the styling calls then operate on
/// what was rendered.
pub trait PreviewSurface {
    /// Replace the rendered document (open/write/close).
    fn write_document(&mut self, html: &str) -> Result<(), SurfaceError>;

    /// Inline style values of rendered elements whose style contains
    /// `needle`, in document order.
    fn inline_styles(&self, needle: &str) -> Vec<(ElementId, String)>;

    /// Overwrite the inline style of an element.
    fn set_inline_style(&mut self, element: ElementId, style: &str) -> Result<(), SurfaceError>;

    /// Set one CSS property on the rendered body.
    fn set_body_style(&mut self, property: &str, value: &str) -> Result<(), SurfaceError>;
}

impl<T: EditorSurface> EditorSurface for &mut T {
    fn cursor(&self) -> Position {
        (**self).cursor()
    }

    fn set_cursor(&mut self, pos: Position) {
        (**self).set_cursor(pos)
    }

    fn line_count(&self) -> usize {
        (**self).line_count()
    }

    fn line_text(&self, line: usize) -> Option<String> {
        (**self).line_text(line)
    }

    fn full_text(&self) -> String {
        (**self).full_text()
    }

    fn set_full_text(&mut self, text: &str) {
        (**self).set_full_text(text)
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        (**self).replace_range(text, from, to)
    }

    fn token_kind_at(&self, pos: Position) -> TokenKind {
        (**self).token_kind_at(pos)
    }

    fn mark_text(&mut self, from: Position, to: Position, css: &str) {
        (**self).mark_text(from, to, css)
    }

    fn show_hints(&mut self, line: usize, hints: &HintResult) {
        (**self).show_hints(line, hints)
    }

    fn close_hints(&mut self) {
        (**self).close_hints()
    }
}

impl<T: PreviewSurface> PreviewSurface for &mut T {
    fn write_document(&mut self, html: &str) -> Result<(), SurfaceError> {
        (**self).write_document(html)
    }

    fn inline_styles(&self, needle: &str) -> Vec<(ElementId, String)> {
        (**self).inline_styles(needle)
    }

    fn set_inline_style(&mut self, element: ElementId, style: &str) -> Result<(), SurfaceError> {
        (**self).set_inline_style(element, style)
    }

    fn set_body_style(&mut self, property: &str, value: &str) -> Result<(), SurfaceError> {
        (**self).set_body_style(property, value)
    }
}
