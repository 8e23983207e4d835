//! livehtml-core: HTML/CSS hinting and live preview logic, host independent.
//!
//! This crate provides:
//! - `hint` - context-sensitive candidates for tags, attributes, CSS
//!   properties and CSS values, plus candidate acceptance
//! - `style` - in-place rewriting of inline `style` declarations
//! - `reconcile` - repair and wrapping of partial documents, and the
//!   preview render pass with legacy color fixes
//! - `LiveSession<E, P>` - key bindings and preview refresh, generic over
//!   `EditorSurface` and `PreviewSurface`
//! - `MemoryEditor` and `MarkupSurface` - headless hosts

pub mod actions;
pub mod color;
pub mod config;
pub mod events;
pub mod file;
pub mod hint;
pub mod markup;
pub mod memory;
pub mod platform;
pub mod reconcile;
pub mod session;
pub mod style;
pub mod tables;
pub mod text;
pub mod types;

pub use actions::{Key, KeyCombo, KeydownResult, Modifiers};
pub use config::EditorConfig;
pub use events::{Listeners, SessionEvent, Subscription};
pub use file::{FileError, SAVE_FILE_NAME, SAVE_MIME_TYPE, SavedFile};
pub use hint::{Accepted, accept, resolve};
pub use markup::MarkupSurface;
pub use memory::{MemoryEditor, ShownHints, TextMark};
pub use platform::{EditorSurface, PreviewSurface, SurfaceError};
pub use reconcile::{RenderReport, reconcile, render_preview};
pub use session::LiveSession;
pub use smol_str::SmolStr;
pub use style::{StyleEdit, apply_style_property, apply_style_property_at};
pub use text::{EditorRope, TextBuffer};
pub use types::{
    ApplyBehavior, Candidate, ColorDecoration, CursorContext, ElementId, HintMode, HintResult,
    Position, Span, TokenKind,
};
