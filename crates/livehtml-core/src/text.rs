//! Text storage for the in-memory editing surface.
//!
//! Hinting and the inline style writer both work one line at a time, so the
//! buffer is addressed by line as much as by char offset.

use std::ops::Range;

/// Editable text addressed in chars (Unicode scalar values).
///
/// Out-of-range offsets are clamped rather than rejected.
pub trait TextBuffer {
    fn len_chars(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// Replace `char_range` with `text`. An empty range inserts.
    fn replace(&mut self, char_range: Range<usize>, text: &str);

    fn to_string(&self) -> String;

    /// An empty buffer still has one (empty) line.
    fn len_lines(&self) -> usize;

    /// Line text with its line break stripped.
    fn line(&self, line_idx: usize) -> Option<String>;

    /// Offset of the first char of `line_idx`; the text length past the end.
    fn line_to_char(&self, line_idx: usize) -> usize;

    fn char_to_line(&self, char_offset: usize) -> usize;
}

/// `TextBuffer` over a `ropey::Rope`.
#[derive(Clone, Default)]
pub struct EditorRope {
    rope: ropey::Rope,
}

impl EditorRope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            rope: ropey::Rope::from_str(s),
        }
    }
}

impl TextBuffer for EditorRope {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn replace(&mut self, char_range: Range<usize>, text: &str) {
        let len = self.rope.len_chars();
        let start = char_range.start.min(len);
        let end = char_range.end.clamp(start, len);
        self.rope.remove(start..end);
        self.rope.insert(start, text);
    }

    fn to_string(&self) -> String {
        self.rope.to_string()
    }

    fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    fn line(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let mut line = self.rope.line(line_idx).to_string();
        // Ropey keeps the break on every line but the last, and breaks on
        // CR, VT, FF, NEL, LS and PS as well as LF.
        match line.pop() {
            Some('\n') => {
                if line.ends_with('\r') {
                    line.pop();
                }
            }
            Some(c) if is_line_break(c) => {}
            Some(c) => line.push(c),
            None => {}
        }
        Some(line)
    }

    fn line_to_char(&self, line_idx: usize) -> usize {
        if line_idx >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line_idx)
    }

    fn char_to_line(&self, char_offset: usize) -> usize {
        self.rope.char_to_line(char_offset.min(self.rope.len_chars()))
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
