//! Hint resolution.
//!
//! Looks at the line around the cursor and decides whether the user is
//! typing a tag name, an attribute name, a CSS property, or a CSS value.
//! Everything here is a pure function of the line text; hosts decide when
//! to ask.

use regex::Regex;
use std::sync::LazyLock;

use crate::color;
use crate::style::apply_style_property_at;
use crate::tables::{self, ATTRIBUTES, CSS_PROPERTIES, TAGS};
use crate::types::{
    ApplyBehavior, Candidate, ColorDecoration, CursorContext, HintMode, HintResult, Span,
};

/// Text before the span ends inside an open style attribute.
static IN_STYLE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"style=["'][^"']*$"#).unwrap());

/// Text before the span ends right after `property:`.
static PROPERTY_COLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\w-]+)\s*:\s*$").unwrap());

/// Text before the span ends inside some other open quoted attribute value.
static IN_QUOTED_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"=\s*["'][^"']*$"#).unwrap());

/// Chars that make up a hintable token.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'
}

/// Whether the cursor sits inside an open `style="..."` value.
pub fn in_style_attribute(line: &str, offset: usize) -> bool {
    let chars: Vec<char> = line.chars().collect();
    let (start, _) = token_bounds(&chars, offset);
    let prefix: String = chars[..start].iter().collect();
    IN_STYLE_ATTR_RE.is_match(&prefix)
}

/// Resolve candidates for the token under the cursor.
pub fn resolve(cursor: &CursorContext<'_>) -> HintResult {
    let chars: Vec<char> = cursor.line.chars().collect();
    let (start, end) = token_bounds(&chars, cursor.offset);
    let span = Span::new(start, end);

    let word: String = chars[start..end]
        .iter()
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let prefix: String = chars[..start].iter().collect();

    let (mode, candidates) = if IN_STYLE_ATTR_RE.is_match(&prefix) {
        css_candidates(&prefix, &word)
    } else if IN_QUOTED_VALUE_RE.is_match(&prefix) {
        (HintMode::Suppressed, Vec::new())
    } else if start > 0 && chars[start - 1] == '<' {
        let list = tables::filter_prefix(TAGS.iter().copied(), &word)
            .map(Candidate::plain)
            .collect();
        (HintMode::Tag, list)
    } else {
        let list = tables::filter_prefix(ATTRIBUTES.iter().copied(), &word)
            .map(attribute_candidate)
            .collect();
        (HintMode::Attribute, list)
    };

    tracing::debug!(
        target: "livehtml::hint",
        ?mode,
        word = %word,
        start,
        end,
        count = candidates.len(),
        "resolved hints"
    );
    if tracing::enabled!(target: "livehtml::hint", tracing::Level::TRACE) {
        let labels: Vec<&str> = candidates.iter().map(|c: &Candidate| c.label.as_str()).collect();
        tracing::trace!(target: "livehtml::hint", ?labels, "candidates");
    }

    HintResult {
        mode,
        candidates,
        span,
    }
}

fn token_bounds(chars: &[char], offset: usize) -> (usize, usize) {
    let pos = offset.min(chars.len());
    let mut start = pos;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = pos;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    (start, end)
}

fn css_candidates(prefix: &str, word: &str) -> (HintMode, Vec<Candidate>) {
    let Some(caps) = PROPERTY_COLON_RE.captures(prefix) else {
        let list = tables::filter_prefix(CSS_PROPERTIES.iter().map(|(name, _)| *name), word)
            .map(Candidate::plain)
            .collect();
        return (HintMode::CssProperty, list);
    };

    let property = caps[1].to_ascii_lowercase();
    let values = tables::css_values(&property).unwrap_or_default();
    let list = tables::filter_prefix(values.iter().copied(), word)
        .map(|value| {
            let candidate = Candidate::plain(value);
            if color::is_color_literal(value) {
                candidate.with_apply(ApplyBehavior::ApplyColor {
                    property: property.as_str().into(),
                })
            } else {
                candidate
            }
        })
        .collect();
    (HintMode::CssValue, list)
}

fn attribute_candidate(name: &str) -> Candidate {
    if name == "style" {
        Candidate {
            label: "style".into(),
            text: "style=\"\"".into(),
            apply: ApplyBehavior::InsertStyleAttribute,
        }
    } else {
        Candidate::plain(name)
    }
}

/// Outcome of accepting a candidate against one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Accepted {
    /// The rewritten line.
    pub line: String,
    /// Where the cursor goes, in chars within `line`.
    pub cursor: usize,
    /// Hinting should run again right away.
    pub rehint: bool,
    /// Color preview to paint on the line.
    pub decoration: Option<ColorDecoration>,
}

/// Apply `candidate` to the line it was resolved against.
///
/// A color candidate whose declaration cannot be found falls back to a
/// plain span replacement.
pub fn accept(line: &str, span: Span, candidate: &Candidate) -> Accepted {
    match &candidate.apply {
        ApplyBehavior::Replace => replace_span(line, span, &candidate.text, false),
        ApplyBehavior::InsertStyleAttribute => {
            let mut accepted = replace_span(line, span, &candidate.text, true);
            // Between the quotes.
            accepted.cursor = accepted.cursor.saturating_sub(1);
            accepted
        }
        ApplyBehavior::ApplyColor { property } => {
            let edit = apply_style_property_at(line, property, &candidate.text, span.start);
            match edit.value_span {
                Some(value_span) => Accepted {
                    line: edit.line,
                    cursor: value_span.end,
                    rehint: false,
                    decoration: edit.decoration,
                },
                None => {
                    tracing::debug!(
                        target: "livehtml::hint",
                        property = %property,
                        "color write found no declaration, replacing span"
                    );
                    replace_span(line, span, &candidate.text, false)
                }
            }
        }
    }
}

fn replace_span(line: &str, span: Span, text: &str, rehint: bool) -> Accepted {
    let start = char_to_byte(line, span.start);
    let end = char_to_byte(line, span.end.max(span.start));
    let mut out = String::with_capacity(line.len() + text.len());
    out.push_str(&line[..start]);
    out.push_str(text);
    out.push_str(&line[end..]);
    Accepted {
        line: out,
        cursor: span.start + text.chars().count(),
        rehint,
        decoration: None,
    }
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(result: &HintResult) -> Vec<&str> {
        result.labels().collect()
    }

    #[test]
    fn test_tag_mode() {
        let result = resolve(&CursorContext::new("<di", 3));
        assert_eq!(result.mode, HintMode::Tag);
        assert_eq!(result.first().map(|c| c.label.as_str()), Some("div"));
        assert_eq!(result.span, Span::new(1, 3));
        assert_eq!(labels(&result), ["div", "dialog"]);
    }

    #[test]
    fn test_tag_mode_lowercases_word() {
        let result = resolve(&CursorContext::at_end("<TAB"));
        assert_eq!(labels(&result), ["table"]);
    }

    #[test]
    fn test_token_extends_right_of_cursor() {
        let result = resolve(&CursorContext::new("<sec>", 2));
        assert_eq!(result.span, Span::new(1, 4));
        assert_eq!(labels(&result), ["section"]);
    }

    #[test]
    fn test_css_property_mode() {
        let result = resolve(&CursorContext::at_end(r#"<p style="colo"#));
        assert_eq!(result.mode, HintMode::CssProperty);
        assert_eq!(labels(&result), ["color"]);
        assert!(result.labels().all(|l| !TAGS.contains(&l) && !ATTRIBUTES.contains(&l)));
    }

    #[test]
    fn test_css_property_after_semicolon() {
        let result = resolve(&CursorContext::at_end(r#"<p style="color: red; backg"#));
        assert_eq!(
            labels(&result),
            ["background", "background-color", "background-image"]
        );
    }

    #[test]
    fn test_css_value_mode() {
        let result = resolve(&CursorContext::at_end(r#"<p style="color: r"#));
        assert_eq!(result.mode, HintMode::CssValue);
        assert_eq!(labels(&result), ["red"]);
        assert_eq!(
            result.candidates[0].apply,
            ApplyBehavior::ApplyColor {
                property: "color".into()
            }
        );
    }

    #[test]
    fn test_css_value_mode_empty_word_lists_all() {
        let result = resolve(&CursorContext::at_end("<div style='display: "));
        assert_eq!(
            labels(&result),
            ["block", "inline", "flex", "grid", "none", "inline-block"]
        );
        assert!(
            result
                .candidates
                .iter()
                .all(|c| c.apply == ApplyBehavior::Replace)
        );
    }

    #[test]
    fn test_unknown_property_has_no_values() {
        let result = resolve(&CursorContext::at_end(r#"<p style="colour: r"#));
        assert_eq!(result.mode, HintMode::CssValue);
        assert!(result.is_empty());
    }

    #[test]
    fn test_attribute_mode_style_candidate() {
        let result = resolve(&CursorContext::at_end("<p sty"));
        assert_eq!(result.mode, HintMode::Attribute);
        assert_eq!(labels(&result), ["style"]);
        let style = &result.candidates[0];
        assert_eq!(style.text, r#"style="""#);
        assert_eq!(style.apply, ApplyBehavior::InsertStyleAttribute);
    }

    #[test]
    fn test_attribute_mode_hyphenated() {
        let result = resolve(&CursorContext::at_end("<div aria-"));
        assert_eq!(
            labels(&result),
            ["aria-label", "aria-describedby", "aria-hidden"]
        );
        assert_eq!(result.span, Span::new(5, 10));
    }

    #[test]
    fn test_string_literal_is_suppressed() {
        let result = resolve(&CursorContext::at_end(r#"<a href="ind"#));
        assert_eq!(result.mode, HintMode::Suppressed);
        assert!(result.is_empty());
    }

    #[test]
    fn test_closed_string_does_not_suppress() {
        let result = resolve(&CursorContext::at_end(r#"<a href="x" cl"#));
        assert_eq!(result.mode, HintMode::Attribute);
        assert_eq!(labels(&result), ["class"]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let ctx = CursorContext::at_end(r#"<p style="font-w"#);
        assert_eq!(resolve(&ctx), resolve(&ctx));
    }

    #[test]
    fn test_in_style_attribute() {
        assert!(in_style_attribute(r#"<p style="col"#, 13));
        assert!(!in_style_attribute(r#"<p style="x">col"#, 16));
    }

    #[test]
    fn test_accept_plain() {
        let result = resolve(&CursorContext::new("<di>", 3));
        let accepted = accept("<di>", result.span, &result.candidates[0]);
        assert_eq!(accepted.line, "<div>");
        assert_eq!(accepted.cursor, 4);
        assert!(!accepted.rehint);
    }

    #[test]
    fn test_accept_style_attribute_chains() {
        let line = "<p sty>";
        let result = resolve(&CursorContext::new(line, 6));
        let accepted = accept(line, result.span, &result.candidates[0]);
        assert_eq!(accepted.line, r#"<p style="">"#);
        assert_eq!(accepted.cursor, 10);
        assert!(accepted.rehint);

        let chained = resolve(&CursorContext::new(&accepted.line, accepted.cursor));
        assert_eq!(chained.mode, HintMode::CssProperty);
        assert_eq!(chained.candidates.len(), CSS_PROPERTIES.len());
    }

    #[test]
    fn test_accept_color_writes_style() {
        let line = r#"<p style="color: r">hi</p>"#;
        let result = resolve(&CursorContext::new(line, 18));
        assert_eq!(labels(&result), ["red"]);
        let accepted = accept(line, result.span, &result.candidates[0]);
        assert_eq!(accepted.line, r#"<p style="color: red">hi</p>"#);
        assert_eq!(accepted.cursor, 20);
        assert_eq!(
            accepted.decoration.map(|d| d.css),
            Some("color: red".to_owned())
        );
    }

    #[test]
    fn test_accept_color_for_background() {
        let line = r#"<p style="background: w">"#;
        let result = resolve(&CursorContext::new(line, 23));
        assert_eq!(labels(&result), ["white"]);
        let accepted = accept(line, result.span, &result.candidates[0]);
        assert_eq!(accepted.line, r#"<p style="background: white">"#);
        assert_eq!(accepted.decoration, None);
    }

    #[test]
    fn test_accept_color_targets_element_under_cursor() {
        let line = r#"<p style="color: blue">a</p><b style="color: r"#;
        let result = resolve(&CursorContext::at_end(line));
        assert_eq!(labels(&result), ["red"]);
        let accepted = accept(line, result.span, &result.candidates[0]);
        assert_eq!(
            accepted.line,
            r#"<p style="color: blue">a</p><b style="color: red"#
        );
        assert_eq!(accepted.cursor, 48);
    }

    #[test]
    fn test_accept_color_falls_back_to_span() {
        // `color` here does not start a declaration, so the writer finds none.
        let line = r#"<p style="x:color: b"#;
        let result = resolve(&CursorContext::at_end(line));
        assert_eq!(labels(&result), ["black", "blue"]);
        let accepted = accept(line, result.span, &result.candidates[0]);
        assert_eq!(accepted.line, r#"<p style="x:color: black"#);
        assert_eq!(accepted.decoration, None);
    }
}
