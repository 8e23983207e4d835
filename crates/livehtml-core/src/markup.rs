//! Markup-backed preview surface.
//!
//! Instead of a live DOM, `MarkupSurface` keeps the rendered document as
//! text and performs style updates as attribute rewrites. The result is a
//! standalone HTML file equivalent to what a browser preview would show.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::platform::{PreviewSurface, SurfaceError};
use crate::types::ElementId;

/// An element start tag carrying a quoted style attribute.
static STYLED_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<[A-Za-z][^<>]*?\sstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static BODY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<body\b[^>]*>").unwrap());

static ATTR_STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\sstyle\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

#[derive(Clone, Debug, Default)]
pub struct MarkupSurface {
    document: String,
}

impl MarkupSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered document as it stands.
    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn into_document(self) -> String {
        self.document
    }
}

/// The quoted value of a style match, and whether it was double-quoted.
fn style_value<'h>(caps: &Captures<'h>) -> Option<(regex::Match<'h>, bool)> {
    caps.get(1)
        .map(|m| (m, true))
        .or_else(|| caps.get(2).map(|m| (m, false)))
}

fn escape_attr(value: &str, double_quoted: bool) -> String {
    if double_quoted {
        value.replace('"', "&quot;")
    } else {
        value.replace('\'', "&#39;")
    }
}

/// Set `property: value` in a declaration list, replacing an existing
/// declaration of the same property.
fn set_declaration(style: &str, property: &str, value: &str) -> String {
    let mut declarations: Vec<String> = style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .map(str::to_owned)
        .collect();
    let new_decl = format!("{property}: {value}");
    let existing = declarations.iter_mut().find(|decl| {
        decl.split(':')
            .next()
            .is_some_and(|name| name.trim().eq_ignore_ascii_case(property))
    });
    match existing {
        Some(decl) => *decl = new_decl,
        None => declarations.push(new_decl),
    }
    declarations.join("; ")
}

impl PreviewSurface for MarkupSurface {
    fn write_document(&mut self, html: &str) -> Result<(), SurfaceError> {
        self.document.clear();
        self.document.push_str(html);
        Ok(())
    }

    fn inline_styles(&self, needle: &str) -> Vec<(ElementId, String)> {
        STYLED_TAG_RE
            .captures_iter(&self.document)
            .enumerate()
            .filter_map(|(idx, caps)| {
                let (value, _) = style_value(&caps)?;
                value
                    .as_str()
                    .contains(needle)
                    .then(|| (ElementId(idx), value.as_str().to_owned()))
            })
            .collect()
    }

    fn set_inline_style(&mut self, element: ElementId, style: &str) -> Result<(), SurfaceError> {
        let (range, double_quoted) = STYLED_TAG_RE
            .captures_iter(&self.document)
            .nth(element.0)
            .and_then(|caps| style_value(&caps).map(|(m, dq)| (m.range(), dq)))
            .ok_or(SurfaceError::UnknownElement(element.0))?;
        self.document
            .replace_range(range, &escape_attr(style, double_quoted));
        Ok(())
    }

    fn set_body_style(&mut self, property: &str, value: &str) -> Result<(), SurfaceError> {
        let (body_start, body_end, tag) = BODY_TAG_RE
            .find(&self.document)
            .map(|m| (m.start(), m.end(), m.as_str().to_owned()))
            .ok_or(SurfaceError::MissingBody)?;

        let existing = ATTR_STYLE_RE.captures(&tag).and_then(|caps| {
            style_value(&caps).map(|(m, dq)| (m.range(), m.as_str().to_owned(), dq))
        });

        match existing {
            Some((range, old_style, double_quoted)) => {
                let new_style = set_declaration(&old_style, property, value);
                let abs = body_start + range.start..body_start + range.end;
                self.document
                    .replace_range(abs, &escape_attr(&new_style, double_quoted));
            }
            None => {
                let insert_at = if tag.ends_with("/>") {
                    body_end - 2
                } else {
                    body_end - 1
                };
                let attr = format!(
                    " style=\"{}\"",
                    escape_attr(&format!("{property}: {value}"), true)
                );
                self.document.insert_str(insert_at, &attr);
            }
        }
        Ok(())
    }
}
