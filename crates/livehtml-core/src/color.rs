//! Legacy color notation.
//!
//! Old markup spells colors as bare `r g b` or `r g b a` triples. Browsers
//! ignore those in CSS, so they are rewritten to `rgb()` / `rgba()` before
//! anything reaches the preview.

use regex::Regex;
use std::sync::LazyLock;

static RGB_TRIPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s+([0-9]+)\s+([0-9]+)$").unwrap());

static RGBA_QUAD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)\s+([0-9]+)\s+([0-9]+)\s+([01](?:\.[0-9]+)?)$").unwrap()
});

static COLOR_LITERAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:red|blue|green|yellow|purple|orange|black|white|#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}))$",
    )
    .unwrap()
});

/// Normalize a legacy color triple or quad, leaving anything else untouched.
///
/// Total and idempotent: named colors, hex, `rgb()` and gradients come back
/// as they went in.
pub fn normalize(value: &str) -> String {
    if let Some(caps) = RGB_TRIPLE_RE.captures(value) {
        return format!("rgb({}, {}, {})", &caps[1], &caps[2], &caps[3]);
    }

    if let Some(caps) = RGBA_QUAD_RE.captures(value) {
        let alpha = &caps[4];
        // `1.5` fits the pattern but is not an alpha.
        if alpha.parse::<f64>().is_ok_and(|a| a <= 1.0) {
            return format!("rgba({}, {}, {}, {})", &caps[1], &caps[2], &caps[3], alpha);
        }
    }

    value.to_owned()
}

/// Whether accepting `value` as a hint should go through the style writer.
pub fn is_color_literal(value: &str) -> bool {
    COLOR_LITERAL_RE.is_match(value)
}
