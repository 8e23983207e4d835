//! Save / load of the raw document.
//!
//! Neither direction transforms the text: what was typed is what gets
//! saved, and a loaded file replaces the document verbatim.

use miette::Diagnostic;
use std::path::{Path, PathBuf};

pub const SAVE_FILE_NAME: &str = "page.html";
pub const SAVE_MIME_TYPE: &str = "text/html";

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum FileError {
    #[error("failed to read {}", path.display())]
    #[diagnostic(code(livehtml::file::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    #[diagnostic(code(livehtml::file::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A document ready to hand to a download or a file write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedFile {
    pub name: String,
    pub mime_type: &'static str,
    pub contents: Vec<u8>,
}

impl SavedFile {
    /// Write the contents to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), FileError> {
        std::fs::write(path, &self.contents).map_err(|source| FileError::Write {
            path: path.to_owned(),
            source,
        })?;
        tracing::debug!(target: "livehtml::file", path = %path.display(), bytes = self.contents.len(), "saved");
        Ok(())
    }
}

/// Package the raw document for saving.
pub fn save(text: &str, name: &str) -> SavedFile {
    SavedFile {
        name: name.to_owned(),
        mime_type: SAVE_MIME_TYPE,
        contents: text.as_bytes().to_vec(),
    }
}

/// Decode loaded bytes as text. Invalid UTF-8 is replaced, never rejected.
pub fn load(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read a file from disk as a document.
pub fn load_from(path: &Path) -> Result<String, FileError> {
    let bytes = std::fs::read(path).map_err(|source| FileError::Read {
        path: path.to_owned(),
        source,
    })?;
    tracing::debug!(target: "livehtml::file", path = %path.display(), bytes = bytes.len(), "loaded");
    Ok(load(&bytes))
}
