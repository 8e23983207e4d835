//! Reference tables for hinting.
//!
//! Declaration order is priority order: the resolver never sorts, so the
//! first entry matching a prefix is what Tab accepts.

/// Tag names offered after `<`.
pub const TAGS: &[&str] = &[
    // Document structure
    "html", "head", "body", "meta", "title", "link", "script", "style",
    // Text content
    "div", "p", "span", "h1", "h2", "h3", "h4", "h5", "h6", "article", "section", "nav",
    "aside", "header", "footer", "main", "address", "blockquote", "dd", "dl", "dt",
    "figcaption", "figure", "hr", "li", "ol", "ul", "pre", "code",
    // Forms
    "form", "input", "textarea", "button", "select", "option", "optgroup", "label",
    "fieldset", "legend", "datalist", "output", "progress", "meter",
    // Links
    "a",
    // Images and multimedia
    "img", "picture", "source", "video", "audio", "track", "map", "area", "canvas", "svg",
    // Tables
    "table", "caption", "th", "tr", "td", "thead", "tbody", "tfoot", "col", "colgroup",
    // Interactive elements
    "details", "dialog", "menu", "summary",
    // Semantic elements
    "time", "mark", "ruby", "rt", "rp", "bdi", "wbr", "embed", "object", "param",
];

/// Attribute names offered inside a tag.
pub const ATTRIBUTES: &[&str] = &[
    // Global
    "accesskey", "class", "contenteditable", "dir", "hidden", "id", "lang", "spellcheck",
    "style", "tabindex", "title", "translate",
    // Forms
    "action", "method", "name", "type", "value", "placeholder", "required", "readonly",
    "disabled", "checked", "maxlength", "minlength", "max", "min", "pattern", "autocomplete",
    "autofocus", "form", "list", "multiple",
    // Media
    "src", "alt", "href", "target", "rel", "media", "controls", "autoplay", "loop", "muted",
    "preload", "poster", "width", "height",
    // Tables
    "colspan", "rowspan", "headers", "scope",
    // ARIA
    "role", "aria-label", "aria-describedby", "aria-hidden",
    // Event handlers
    "onclick", "onchange", "onsubmit", "onkeyup", "onkeydown", "onmouseover", "onmouseout",
    "onfocus", "onblur",
];

/// CSS properties with the values suggested after `property:`.
pub const CSS_PROPERTIES: &[(&str, &[&str])] = &[
    // Layout
    ("display", &["block", "inline", "flex", "grid", "none", "inline-block"]),
    ("position", &["static", "relative", "absolute", "fixed", "sticky"]),
    ("float", &["left", "right", "none"]),
    ("clear", &["left", "right", "both", "none"]),
    ("visibility", &["visible", "hidden", "collapse"]),
    ("overflow", &["visible", "hidden", "scroll", "auto"]),
    // Box model
    ("margin", &["0", "auto", "10px", "1rem", "2em"]),
    ("padding", &["0", "10px", "1rem", "2em"]),
    ("width", &["auto", "100%", "50%", "200px", "fit-content"]),
    ("height", &["auto", "100%", "50%", "200px", "fit-content"]),
    // Typography
    ("font-family", &["Arial", "Helvetica", "sans-serif", "serif", "monospace"]),
    ("font-size", &["12px", "14px", "16px", "1rem", "1.2em", "larger"]),
    (
        "font-weight",
        &["normal", "bold", "100", "200", "300", "400", "500", "600", "700"],
    ),
    ("text-align", &["left", "center", "right", "justify"]),
    ("line-height", &["1", "1.5", "2", "normal"]),
    // Colors and backgrounds
    (
        "color",
        &["black", "white", "red", "blue", "green", "transparent", "#000", "#fff"],
    ),
    ("background", &["none", "transparent", "white", "black", "#fff", "#000"]),
    ("background-color", &["transparent", "white", "black", "#fff", "#000"]),
    ("background-image", &["none", "url()", "linear-gradient()"]),
    // Border and outline
    ("border", &["none", "1px solid black", "2px dashed red"]),
    ("border-radius", &["0", "5px", "10px", "50%"]),
    (
        "box-shadow",
        &[
            "none",
            "0 0 5px rgba(0,0,0,0.3)",
            "inset 0 0 5px black",
            "3px 3px 5px #888888",
            "0 0 10px red",
            "5px 5px 5px rgba(0,0,0,0.2)",
            "inset 0 0 10px rgba(0,0,0,0.5)",
            "0 0 20px rgba(0,123,255,0.5)",
            "0 4px 8px rgba(0,0,0,0.1)",
            "rgba(0, 0, 0, 0.35) 0px 5px 15px",
            "rgba(50, 50, 93, 0.25) 0px 6px 12px -2px, rgba(0, 0, 0, 0.3) 0px 3px 7px -3px",
        ],
    ),
    // Flexbox
    ("flex-direction", &["row", "column", "row-reverse", "column-reverse"]),
    (
        "justify-content",
        &["flex-start", "flex-end", "center", "space-between", "space-around"],
    ),
    (
        "align-items",
        &["stretch", "flex-start", "flex-end", "center", "baseline"],
    ),
    ("flex-wrap", &["nowrap", "wrap", "wrap-reverse"]),
    ("gap", &["0", "10px", "1rem", "20px"]),
    // Grid
    ("grid-template-columns", &["auto", "1fr", "repeat(3, 1fr)", "100px 1fr"]),
    ("grid-template-rows", &["auto", "1fr", "repeat(3, 1fr)", "100px 1fr"]),
    ("grid-gap", &["0", "10px", "1rem", "20px"]),
    // Transitions and animations
    ("transition", &["none", "all 0.3s ease", "opacity 0.5s linear"]),
    (
        "transform",
        &["none", "scale(1.1)", "rotate(45deg)", "translate(10px, 20px)"],
    ),
    ("animation", &["none", "spin 1s linear infinite"]),
    // Other
    ("opacity", &["0", "0.5", "1"]),
    ("cursor", &["default", "pointer", "text", "not-allowed", "grab"]),
    ("z-index", &["0", "1", "10", "100", "-1"]),
    // Shadows and effects
    (
        "text-shadow",
        &[
            "none",
            "1px 1px 2px black",
            "0 0 3px #FF0000",
            "2px 2px 4px rgba(0,0,0,0.5)",
            "0 0 5px blue, 0 0 10px red",
            "2px 2px #000",
            "1px 1px white",
        ],
    ),
    (
        "filter",
        &[
            "none",
            "blur(5px)",
            "brightness(150%)",
            "contrast(200%)",
            "drop-shadow(2px 2px 2px #000)",
            "grayscale(100%)",
            "sepia(100%)",
            "invert(100%)",
            "hue-rotate(90deg)",
            "opacity(50%)",
        ],
    ),
    (
        "backdrop-filter",
        &[
            "none",
            "blur(10px)",
            "brightness(60%)",
            "contrast(40%)",
            "grayscale(100%)",
            "blur(5px) brightness(75%)",
        ],
    ),
];

/// Suggested values for a CSS property, case-insensitively.
pub fn css_values(property: &str) -> Option<&'static [&'static str]> {
    CSS_PROPERTIES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(property))
        .map(|(_, values)| *values)
}

/// Entries of `table` starting with `prefix`, in table order.
///
/// `prefix` is expected lower-cased; entries are compared lower-cased.
pub fn filter_prefix<'t>(
    table: impl IntoIterator<Item = &'t str>,
    prefix: &str,
) -> impl Iterator<Item = &'t str> {
    let prefix = prefix.to_owned();
    table
        .into_iter()
        .filter(move |entry| starts_with_ignore_ascii_case(entry, &prefix))
}

fn starts_with_ignore_ascii_case(entry: &str, prefix: &str) -> bool {
    entry.len() >= prefix.len()
        && entry.is_char_boundary(prefix.len())
        && entry[..prefix.len()].eq_ignore_ascii_case(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_have_no_duplicates() {
        let tags: HashSet<_> = TAGS.iter().collect();
        assert_eq!(tags.len(), TAGS.len());
        let attrs: HashSet<_> = ATTRIBUTES.iter().collect();
        assert_eq!(attrs.len(), ATTRIBUTES.len());
        let props: HashSet<_> = CSS_PROPERTIES.iter().map(|(p, _)| p).collect();
        assert_eq!(props.len(), CSS_PROPERTIES.len());
    }

    #[test]
    fn test_css_values_lookup() {
        assert_eq!(css_values("float"), Some(&["left", "right", "none"][..]));
        assert_eq!(css_values("FLOAT"), css_values("float"));
        assert_eq!(css_values("colour"), None);
        // The extended shadow list is the one that survives.
        assert_eq!(css_values("box-shadow").map(|v| v.len()), Some(11));
    }

    #[test]
    fn test_filter_prefix_keeps_order() {
        let hits: Vec<_> = filter_prefix(TAGS.iter().copied(), "h").collect();
        assert_eq!(
            hits,
            ["html", "head", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr"]
        );
    }

    #[test]
    fn test_filter_prefix_is_case_insensitive() {
        let values = css_values("font-family").unwrap_or_default();
        let hits: Vec<_> = filter_prefix(values.iter().copied(), "ar").collect();
        assert_eq!(hits, ["Arial"]);
    }
}
