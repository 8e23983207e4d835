//! Inline style writer.
//!
//! Rewrites a single line so its `style` attribute carries a property value,
//! normalizing legacy color triples on the way in.

use regex::Regex;
use std::sync::LazyLock;

use crate::color;
use crate::types::{ColorDecoration, Span};

/// A style attribute value, quoted either way, closing quote optional.
static STYLE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"style\s*=\s*["']([^"']*)"#).unwrap());

/// Result of writing a property into a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleEdit {
    /// The rewritten line. Equal to the input when nothing was written.
    pub line: String,
    /// Where the written value sits in `line`, in chars.
    pub value_span: Option<Span>,
    /// Live-color preview for the element text, when `color` was written.
    pub decoration: Option<ColorDecoration>,
}

impl StyleEdit {
    fn unchanged(line: &str) -> Self {
        Self {
            line: line.to_owned(),
            value_span: None,
            decoration: None,
        }
    }

    /// Whether the line was rewritten.
    pub fn is_changed(&self) -> bool {
        self.value_span.is_some()
    }
}

/// Write `property: raw_value` into the style attribute of `line`.
///
/// An existing declaration in the first style attribute has its value
/// replaced. A property missing from an existing style attribute is left
/// alone, nothing is appended. A line with no style attribute gets
/// ` style="property: value"` at its end.
pub fn apply_style_property(line: &str, property: &str, raw_value: &str) -> StyleEdit {
    write_style(line, property, raw_value, None)
}

/// Like `apply_style_property`, but only rewrites the `property` declaration
/// whose value contains the char offset `anchor`, in whichever style
/// attribute holds it. Nothing is written or appended when there is none.
pub fn apply_style_property_at(
    line: &str,
    property: &str,
    raw_value: &str,
    anchor: usize,
) -> StyleEdit {
    write_style(line, property, raw_value, Some(anchor))
}

fn write_style(line: &str, property: &str, raw_value: &str, anchor: Option<usize>) -> StyleEdit {
    let value = color::normalize(raw_value);

    let styles: Vec<regex::Match<'_>> = STYLE_ATTR_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .collect();

    if styles.is_empty() && anchor.is_none() {
        let mut out = String::with_capacity(line.len() + property.len() + value.len() + 12);
        out.push_str(line);
        out.push_str(" style=\"");
        out.push_str(property);
        out.push_str(": ");
        let value_start = out.len();
        out.push_str(&value);
        let value_end = out.len();
        out.push('"');
        tracing::debug!(target: "livehtml::style", property, "appended style attribute");
        return StyleEdit {
            value_span: Some(byte_span_to_chars(&out, value_start, value_end)),
            line: out,
            decoration: None,
        };
    }

    let Some(decl_re) = declaration_regex(property) else {
        return StyleEdit::unchanged(line);
    };

    // Byte range of the declaration value to replace.
    let target = match anchor {
        None => styles.first().and_then(|style| {
            decl_re
                .captures(style.as_str())
                .and_then(|caps| caps.get(1))
                .map(|v| (style.start() + v.start(), style.start() + v.end()))
        }),
        Some(anchor) => {
            let at = char_to_byte(line, anchor);
            styles.iter().find_map(|style| {
                decl_re
                    .captures_iter(style.as_str())
                    .filter_map(|caps| caps.get(1))
                    .map(|v| (style.start() + v.start(), style.start() + v.end()))
                    .find(|&(start, end)| start <= at && at <= end)
            })
        }
    };
    let Some((value_start, value_end)) = target else {
        tracing::debug!(
            target: "livehtml::style",
            property,
            ?anchor,
            "no matching declaration, line left unchanged"
        );
        return StyleEdit::unchanged(line);
    };

    let mut out = String::with_capacity(line.len() + value.len());
    out.push_str(&line[..value_start]);
    out.push_str(&value);
    out.push_str(&line[value_end..]);

    let written_end = value_start + value.len();
    let value_span = byte_span_to_chars(&out, value_start, written_end);
    let decoration = if property.eq_ignore_ascii_case("color") {
        text_content_span(&out, written_end).map(|span| ColorDecoration {
            span,
            css: format!("color: {value}"),
        })
    } else {
        None
    };

    StyleEdit {
        line: out,
        value_span: Some(value_span),
        decoration,
    }
}

/// Matches `property : value` where the property starts a declaration, so
/// `color` does not hit the tail of `background-color`.
fn declaration_regex(property: &str) -> Option<Regex> {
    let pattern = format!(r"(?i)(?:^|[;\s]){}\s*:\s*([^;]*)", regex::escape(property));
    match Regex::new(&pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            tracing::warn!(target: "livehtml::style", %err, property, "bad property pattern");
            None
        }
    }
}

/// Text between the first `>` at or after byte `from` and the next `<`.
fn text_content_span(line: &str, from: usize) -> Option<Span> {
    let open_end = from + line[from..].find('>')? + 1;
    let close = open_end + line[open_end..].find('<')?;
    Some(byte_span_to_chars(line, open_end, close))
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

fn byte_span_to_chars(s: &str, start: usize, end: usize) -> Span {
    let start_ch = s[..start].chars().count();
    let len = s[start..end].chars().count();
    Span::new(start_ch, start_ch + len)
}
