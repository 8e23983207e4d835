//! In-memory editing surface.
//!
//! `MemoryEditor` keeps the document in an `EditorRope` and records what a
//! real widget would display (marks, the hint popup) so the session can be
//! driven headless: from the CLI, or from tests.

use crate::platform::EditorSurface;
use crate::text::{EditorRope, TextBuffer};
use crate::types::{HintResult, Position, TokenKind};

/// A painted range, as requested through `mark_text`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextMark {
    pub from: Position,
    pub to: Position,
    pub css: String,
}

/// The popup as last shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShownHints {
    pub line: usize,
    pub hints: HintResult,
}

#[derive(Clone, Default)]
pub struct MemoryEditor {
    buffer: EditorRope,
    cursor: Position,
    marks: Vec<TextMark>,
    popup: Option<ShownHints>,
}

impl MemoryEditor {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: EditorRope::from_str(text),
            ..Default::default()
        }
    }

    /// Builder-style cursor placement.
    pub fn with_cursor(mut self, pos: Position) -> Self {
        self.set_cursor(pos);
        self
    }

    pub fn buffer(&self) -> &EditorRope {
        &self.buffer
    }

    pub fn marks(&self) -> &[TextMark] {
        &self.marks
    }

    pub fn popup(&self) -> Option<&ShownHints> {
        self.popup.as_ref()
    }

    fn line_len(&self, line: usize) -> usize {
        self.buffer
            .line(line)
            .map(|text| text.chars().count())
            .unwrap_or(0)
    }

    /// Clamp a position onto the document.
    fn clamp(&self, pos: Position) -> Position {
        let last_line = self.buffer.len_lines().saturating_sub(1);
        let line = pos.line.min(last_line);
        Position::new(line, pos.ch.min(self.line_len(line)))
    }

    fn to_offset(&self, pos: Position) -> usize {
        let pos = self.clamp(pos);
        self.buffer.line_to_char(pos.line) + pos.ch
    }

    fn to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len_chars());
        let line = self.buffer.char_to_line(offset);
        Position::new(line, offset - self.buffer.line_to_char(line))
    }
}

impl EditorSurface for MemoryEditor {
    fn cursor(&self) -> Position {
        self.cursor
    }

    fn set_cursor(&mut self, pos: Position) {
        self.cursor = self.clamp(pos);
    }

    fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.buffer.line(line)
    }

    fn full_text(&self) -> String {
        self.buffer.to_string()
    }

    fn set_full_text(&mut self, text: &str) {
        self.buffer = EditorRope::from_str(text);
        self.cursor = Position::default();
        self.marks.clear();
        self.popup = None;
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        let (from, to) = if to < from { (to, from) } else { (from, to) };
        let start = self.to_offset(from);
        let end = self.to_offset(to);
        let cursor = self.to_offset(self.cursor);
        let inserted = text.chars().count();

        self.buffer.replace(start..end, text);

        // Cursors inside the replaced range land after the new text.
        let cursor = if cursor <= start {
            cursor
        } else if cursor >= end {
            cursor - (end - start) + inserted
        } else {
            start + inserted
        };
        self.cursor = self.to_position(cursor);
    }

    fn token_kind_at(&self, pos: Position) -> TokenKind {
        let pos = self.clamp(pos);
        let line = self.buffer.line(pos.line).unwrap_or_default();
        classify_line_prefix(line.chars().take(pos.ch))
    }

    fn mark_text(&mut self, from: Position, to: Position, css: &str) {
        self.marks.push(TextMark {
            from: self.clamp(from),
            to: self.clamp(to),
            css: css.to_owned(),
        });
    }

    fn show_hints(&mut self, line: usize, hints: &HintResult) {
        self.popup = Some(ShownHints {
            line,
            hints: hints.clone(),
        });
    }

    fn close_hints(&mut self) {
        self.popup = None;
    }
}

/// Token kind after scanning a line prefix. Tags spanning lines are not
/// tracked; every line starts in text.
fn classify_line_prefix(chars: impl Iterator<Item = char>) -> TokenKind {
    let mut kind = TokenKind::Text;
    let mut quote = None;
    for c in chars {
        match kind {
            TokenKind::Text => {
                if c == '<' {
                    kind = TokenKind::Tag;
                }
            }
            TokenKind::Tag => {
                if c == '>' {
                    kind = TokenKind::Text;
                } else if c.is_whitespace() {
                    kind = TokenKind::Attribute;
                }
            }
            TokenKind::Attribute => {
                if c == '>' {
                    kind = TokenKind::Text;
                } else if c == '"' || c == '\'' {
                    kind = TokenKind::String;
                    quote = Some(c);
                }
            }
            TokenKind::String => {
                if Some(c) == quote {
                    kind = TokenKind::Attribute;
                    quote = None;
                }
            }
        }
    }
    kind
}
