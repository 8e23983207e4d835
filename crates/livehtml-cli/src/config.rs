//! Editor settings from a KDL file.
//!
//! ```kdl
//! charset "UTF-8"
//! auto-hint true
//! save-file-name "page.html"
//! ```
//!
//! Every node is optional; missing ones keep their defaults.

use std::path::{Path, PathBuf};

use kdl::{KdlDocument, KdlValue};
use livehtml_core::EditorConfig;
use miette::{IntoDiagnostic, Result, WrapErr};

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("livehtml").join("config.kdl"))
}

/// Load settings. An explicit path must exist; the default location is
/// skipped when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<EditorConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                tracing::debug!("no config file, using defaults");
                return Ok(EditorConfig::default());
            }
        },
    };

    let text = std::fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loading config");
    parse_config(&text).wrap_err_with(|| format!("in config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<EditorConfig> {
    let doc: KdlDocument = text.parse().into_diagnostic()?;
    let mut config = EditorConfig::default();

    if let Some(value) = first_value(&doc, "charset") {
        config.charset = expect_string(value, "charset")?.into();
    }
    if let Some(value) = first_value(&doc, "auto-hint") {
        config.auto_hint = value
            .as_bool()
            .ok_or_else(|| miette::miette!("`auto-hint` expects true or false, got {value}"))?;
    }
    if let Some(value) = first_value(&doc, "save-file-name") {
        config.save_file_name = expect_string(value, "save-file-name")?.into();
    }
    Ok(config)
}

fn first_value<'a>(doc: &'a KdlDocument, name: &str) -> Option<&'a KdlValue> {
    doc.get(name)?.entries().first().map(|entry| entry.value())
}

fn expect_string<'a>(value: &'a KdlValue, name: &str) -> Result<&'a str> {
    value
        .as_string()
        .ok_or_else(|| miette::miette!("`{name}` expects a string, got {value}"))
}
