//! Preview reconciliation.
//!
//! Turns whatever the user has typed so far into something a renderer will
//! take. Nothing here rejects input: each step is a best-effort text rewrite
//! and the renderer's own leniency absorbs the rest. The preview is rebuilt
//! from scratch on every pass.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::color;
use crate::config::EditorConfig;
use crate::platform::PreviewSurface;

/// A double-quoted style attribute, closing quote optional.
static STYLE_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"style\s*=\s*"([^"]*)"?"#).unwrap());

static TRAILING_SEMICOLON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";?\s*$").unwrap());

static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<html").unwrap());

static COLOR_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"color\s*:\s*([^;]+)").unwrap());

static BODY_TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<body\b[^>]*>").unwrap());

static BGCOLOR_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)bgcolor=['"]([^'"]*)['"]"#).unwrap());

static BACKGROUND_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)background=['"]([^'"]*)['"]"#).unwrap());

/// Close style attributes that are still being typed.
///
/// `style="color:red` becomes `style="color:red"`; a trailing `;` and
/// whitespace are dropped. Attributes that are already closed keep exactly
/// one closing quote.
pub fn repair_style_attributes(content: &str) -> String {
    STYLE_ATTR_RE
        .replace_all(content, |caps: &Captures<'_>| {
            let value = TRAILING_SEMICOLON_RE.replace(&caps[1], "");
            format!("style=\"{value}\"")
        })
        .into_owned()
}

/// Whether the document already has its own `<html>` shell.
pub fn has_html_tag(content: &str) -> bool {
    HTML_TAG_RE.is_match(content)
}

/// Wrap a fragment in a minimal document. Full documents pass through.
pub fn wrap_skeleton(content: &str, charset: &str) -> String {
    if has_html_tag(content) {
        return content.to_owned();
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n    <meta charset=\"{charset}\">\n</head>\n<body>\n{content}\n</body>\n</html>"
    )
}

/// Steps before rendering: style repair, then skeleton wrapping.
pub fn reconcile(raw: &str, config: &EditorConfig) -> String {
    let repaired = repair_style_attributes(raw);
    wrap_skeleton(&repaired, &config.charset)
}

/// Normalize legacy colors in one inline style value.
///
/// Returns `None` when nothing changed.
pub fn normalize_style_colors(style: &str) -> Option<String> {
    let mut changed = false;
    let rewritten = COLOR_DECL_RE.replace_all(style, |caps: &Captures<'_>| {
        let original = caps[1].trim();
        let parsed = color::normalize(original);
        if parsed == original {
            caps[0].to_owned()
        } else {
            changed = true;
            format!("color: {parsed}")
        }
    });
    changed.then(|| rewritten.into_owned())
}

/// Legacy presentational attributes found on the raw `<body>` tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyBodyAttributes {
    pub bgcolor: Option<String>,
    pub background: Option<String>,
}

impl LegacyBodyAttributes {
    pub fn is_empty(&self) -> bool {
        self.bgcolor.is_none() && self.background.is_none()
    }
}

/// Read `bgcolor` / `background` off the first `<body>` tag.
pub fn legacy_body_attributes(raw: &str) -> LegacyBodyAttributes {
    let Some(body) = BODY_TAG_RE.find(raw) else {
        return LegacyBodyAttributes::default();
    };
    let tag = body.as_str();
    LegacyBodyAttributes {
        bgcolor: BGCOLOR_ATTR_RE
            .captures(tag)
            .map(|caps| caps[1].to_owned()),
        background: BACKGROUND_ATTR_RE
            .captures(tag)
            .map(|caps| caps[1].to_owned()),
    }
}

/// Summary of one preview pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// The fragment was wrapped in a document skeleton.
    pub wrapped: bool,
    /// Inline styles rewritten after rendering.
    pub restyled: usize,
    /// Surface calls that failed and were skipped.
    pub failures: usize,
}

/// Run a full preview pass against a rendering surface.
///
/// Never fails: surface errors are logged and the pass moves on.
pub fn render_preview<P: PreviewSurface>(
    raw: &str,
    surface: &mut P,
    config: &EditorConfig,
) -> RenderReport {
    let mut report = RenderReport {
        wrapped: !has_html_tag(raw),
        ..Default::default()
    };

    let document = reconcile(raw, config);
    if let Err(err) = surface.write_document(&document) {
        tracing::warn!(target: "livehtml::preview", %err, "preview write failed");
        report.failures += 1;
        return report;
    }

    for (element, style) in surface.inline_styles("color") {
        let Some(rewritten) = normalize_style_colors(&style) else {
            continue;
        };
        match surface.set_inline_style(element, &rewritten) {
            Ok(()) => report.restyled += 1,
            Err(err) => {
                tracing::warn!(target: "livehtml::preview", %err, ?element, "restyle failed");
                report.failures += 1;
            }
        }
    }

    let legacy = legacy_body_attributes(raw);
    if let Some(bgcolor) = &legacy.bgcolor {
        let value = color::normalize(bgcolor);
        if let Err(err) = surface.set_body_style("background-color", &value) {
            tracing::warn!(target: "livehtml::preview", %err, "bgcolor not applied");
            report.failures += 1;
        }
    }
    if let Some(background) = &legacy.background {
        let value = format!("url({background})");
        if let Err(err) = surface.set_body_style("background-image", &value) {
            tracing::warn!(target: "livehtml::preview", %err, "background not applied");
            report.failures += 1;
        }
    }

    tracing::debug!(
        target: "livehtml::preview",
        wrapped = report.wrapped,
        restyled = report.restyled,
        failures = report.failures,
        bytes = document.len(),
        "preview rendered"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupSurface;
    use crate::platform::SurfaceError;
    use crate::types::ElementId;

    fn config() -> EditorConfig {
        EditorConfig::default()
    }

    #[test]
    fn test_repair_closes_unterminated_style() {
        assert_eq!(
            repair_style_attributes(r#"<p style="color:red"#),
            r#"<p style="color:red""#
        );
        assert_eq!(
            repair_style_attributes("<p style = \"color: red; \n"),
            r#"<p style="color: red""#
        );
    }

    #[test]
    fn test_repair_keeps_closed_style() {
        let html = r#"<p style="color: red">a</p><b style="margin:0;">b</b>"#;
        assert_eq!(
            repair_style_attributes(html),
            r#"<p style="color: red">a</p><b style="margin:0">b</b>"#
        );
    }

    #[test]
    fn test_repair_without_styles_is_identity() {
        let html = "<div class=\"a\">x</div>";
        assert_eq!(repair_style_attributes(html), html);
    }

    #[test]
    fn test_skeleton_wrapping() {
        let out = reconcile("<p>hi</p>", &config());
        assert_eq!(out.matches("<html").count(), 1);
        assert_eq!(out.matches("<head>").count(), 1);
        assert_eq!(out.matches("<body>").count(), 1);
        insta::assert_snapshot!(out, @r#"
        <!DOCTYPE html>
        <html>
        <head>
            <meta charset="UTF-8">
        </head>
        <body>
        <p>hi</p>
        </body>
        </html>
        "#);
    }

    #[test]
    fn test_full_document_not_wrapped() {
        let doc = "<HTML><body><p>x</p></body></HTML>";
        assert_eq!(reconcile(doc, &config()), doc);
    }

    #[test]
    fn test_charset_from_config() {
        let config = EditorConfig {
            charset: "ISO-8859-1".into(),
            ..Default::default()
        };
        assert!(reconcile("x", &config).contains(r#"<meta charset="ISO-8859-1">"#));
    }

    #[test]
    fn test_normalize_style_colors() {
        assert_eq!(
            normalize_style_colors("color: 255 0 0 ; margin: 0").as_deref(),
            Some("color: rgb(255, 0, 0); margin: 0")
        );
        assert_eq!(
            normalize_style_colors("color: red; background-color: 0 0 0 0.5").as_deref(),
            Some("color: red; background-color: rgba(0, 0, 0, 0.5)")
        );
        assert_eq!(normalize_style_colors("color: red"), None);
        assert_eq!(normalize_style_colors("margin: 0"), None);
    }

    #[test]
    fn test_legacy_body_attributes() {
        let attrs = legacy_body_attributes(r#"<body BGCOLOR='255 0 0' background="bg.png">"#);
        assert_eq!(attrs.bgcolor.as_deref(), Some("255 0 0"));
        assert_eq!(attrs.background.as_deref(), Some("bg.png"));
        assert!(legacy_body_attributes("<p>no body</p>").is_empty());
    }

    #[test]
    fn test_legacy_body_attributes_skip_longer_tag_names() {
        assert!(legacy_body_attributes(r#"<bodyfoo bgcolor="red">"#).is_empty());
        let attrs = legacy_body_attributes(r#"<bodyfoo bgcolor="red"><body bgcolor="0 0 9">"#);
        assert_eq!(attrs.bgcolor.as_deref(), Some("0 0 9"));
    }

    #[test]
    fn test_render_preview_bgcolor() {
        let mut surface = MarkupSurface::new();
        let report = render_preview(r#"<body bgcolor="255 0 0"><p>x</p>"#, &mut surface, &config());
        assert!(report.wrapped);
        assert_eq!(report.failures, 0);
        assert!(
            surface
                .document()
                .contains(r#"style="background-color: rgb(255, 0, 0)""#)
        );
    }

    #[test]
    fn test_render_preview_normalizes_inline_colors() {
        let mut surface = MarkupSurface::new();
        let report = render_preview(
            r#"<p style="color: 0 128 0">green</p><i style="color: blue">b</i>"#,
            &mut surface,
            &config(),
        );
        assert_eq!(report.restyled, 1);
        assert!(surface.document().contains(r#"<p style="color: rgb(0, 128, 0)">"#));
        assert!(surface.document().contains(r#"<i style="color: blue">"#));
    }

    #[test]
    fn test_render_preview_background_image() {
        let mut surface = MarkupSurface::new();
        render_preview(
            "<html><body background=\"tile.gif\"></body></html>",
            &mut surface,
            &config(),
        );
        assert_eq!(
            surface.document(),
            "<html><body background=\"tile.gif\" style=\"background-image: url(tile.gif)\"></body></html>"
        );
    }

    #[test]
    fn test_render_preview_repairs_before_writing() {
        let mut surface = MarkupSurface::new();
        render_preview(r#"<p style="color:1 2 3"#, &mut surface, &config());
        assert!(surface.document().contains(r#"<p style="color: rgb(1, 2, 3)""#));
    }

    /// Accepts writes, refuses every styling call.
    struct RefusingSurface {
        styles: Vec<(ElementId, String)>,
    }

    impl PreviewSurface for RefusingSurface {
        fn write_document(&mut self, _html: &str) -> Result<(), SurfaceError> {
            Ok(())
        }

        fn inline_styles(&self, _needle: &str) -> Vec<(ElementId, String)> {
            self.styles.clone()
        }

        fn set_inline_style(&mut self, element: ElementId, _style: &str) -> Result<(), SurfaceError> {
            Err(SurfaceError::UnknownElement(element.0))
        }

        fn set_body_style(&mut self, _property: &str, _value: &str) -> Result<(), SurfaceError> {
            Err(SurfaceError::MissingBody)
        }
    }

    #[test]
    fn test_surface_errors_are_not_fatal() {
        let mut surface = RefusingSurface {
            styles: vec![(ElementId(0), "color: 1 2 3".to_owned())],
        };
        let report = render_preview(
            r#"<body bgcolor="red" background="x.png">"#,
            &mut surface,
            &config(),
        );
        assert_eq!(report.restyled, 0);
        assert_eq!(report.failures, 3);
    }

    #[test]
    fn test_plain_document_report() {
        let mut surface = MarkupSurface::new();
        let report = render_preview("<html><p>x</p></html>", &mut surface, &config());
        assert_eq!(report, RenderReport::default());
    }
}
