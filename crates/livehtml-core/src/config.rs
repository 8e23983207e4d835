//! Editor settings.

use smol_str::SmolStr;

use crate::file::SAVE_FILE_NAME;

/// Settings shared by the session and the preview pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorConfig {
    /// Charset declared by the document skeleton.
    pub charset: SmolStr,
    /// Open the hint popup on key-up, not only on Tab / Ctrl-Space.
    pub auto_hint: bool,
    /// Name offered for saved documents.
    pub save_file_name: SmolStr,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            charset: SmolStr::new_static("UTF-8"),
            auto_hint: true,
            save_file_name: SmolStr::new_static(SAVE_FILE_NAME),
        }
    }
}
