//! Live editing session.
//!
//! Wires an editing surface to a preview surface: key bindings for the hint
//! popup, candidate acceptance, and a full preview rebuild after every
//! change. Generic over both hosts, so the same wiring drives a browser
//! widget or the in-memory editor.

use crate::actions::{Key, KeyCombo, KeydownResult, Modifiers};
use crate::config::EditorConfig;
use crate::events::{Listeners, SessionEvent, Subscription};
use crate::file::{self, SavedFile};
use crate::hint;
use crate::platform::{EditorSurface, PreviewSurface};
use crate::reconcile::{self, RenderReport};
use crate::types::{ApplyBehavior, CursorContext, HintResult, Position, TokenKind};

/// The popup currently open, and the line it was resolved on.
#[derive(Clone, Debug)]
struct ActiveHints {
    line: usize,
    hints: HintResult,
}

pub struct LiveSession<E, P> {
    editor: E,
    preview: P,
    config: EditorConfig,
    active: Option<ActiveHints>,
    listeners: Listeners<SessionEvent>,
}

impl<E: EditorSurface, P: PreviewSurface> LiveSession<E, P> {
    pub fn new(editor: E, preview: P, config: EditorConfig) -> Self {
        Self {
            editor,
            preview,
            config,
            active: None,
            listeners: Listeners::new(),
        }
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Direct access for host-driven edits. Call `on_content_changed`
    /// afterwards so the preview follows.
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    pub fn preview(&self) -> &P {
        &self.preview
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn into_parts(self) -> (E, P) {
        (self.editor, self.preview)
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&SessionEvent) + 'static) -> Subscription {
        self.listeners.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.unsubscribe(subscription)
    }

    pub fn hints_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_hints(&self) -> Option<&HintResult> {
        self.active.as_ref().map(|active| &active.hints)
    }

    /// Keydown bindings. Anything not bound is left to the host.
    pub fn on_key_down(&mut self, combo: &KeyCombo) -> KeydownResult {
        let is_space = matches!(&combo.key, Key::Space)
            || matches!(&combo.key, Key::Character(c) if c == " ");

        if is_space && combo.modifiers == Modifiers::CTRL {
            self.show_hints();
            return KeydownResult::Handled;
        }

        match (&combo.key, combo.modifiers) {
            (Key::Tab, Modifiers::NONE) => {
                if self.hints_active() {
                    self.accept(0);
                } else {
                    self.show_hints();
                }
                KeydownResult::Handled
            }
            (Key::Enter, Modifiers::ALT) => {
                let cursor = self.editor.cursor();
                self.editor.replace_range("\n", cursor, cursor);
                self.editor.set_cursor(Position::new(cursor.line + 1, 0));
                self.refresh_preview();
                KeydownResult::Handled
            }
            (Key::Enter, Modifiers::NONE) if self.hints_active() => {
                self.close_hints();
                self.refresh_preview();
                KeydownResult::Handled
            }
            (Key::Escape, _) if self.hints_active() => {
                self.close_hints();
                KeydownResult::Handled
            }
            _ => KeydownResult::NotHandled,
        }
    }

    /// Keyup: re-evaluate the popup, then rebuild the preview.
    ///
    /// Arrow and page keys move the selection of an open popup and leave it
    /// alone.
    pub fn on_key_up(&mut self, key: &Key) {
        let navigates_popup = self.hints_active()
            && matches!(
                key,
                Key::ArrowUp | Key::ArrowDown | Key::PageUp | Key::PageDown
            );
        let retriggers = !key.is_modifier()
            && !navigates_popup
            && !matches!(key, Key::Escape | Key::Enter);
        if retriggers && (self.config.auto_hint || self.hints_active()) {
            self.show_hints();
        }
        self.refresh_preview();
    }

    /// The host changed the document.
    pub fn on_content_changed(&mut self) -> RenderReport {
        self.refresh_preview()
    }

    /// Resolve hints at the cursor and show them, or close the popup when
    /// there is nothing to offer.
    pub fn show_hints(&mut self) -> Option<&HintResult> {
        let cursor = self.editor.cursor();
        let Some(line) = self.editor.line_text(cursor.line) else {
            self.close_hints();
            return None;
        };

        if self.editor.token_kind_at(cursor) == TokenKind::String
            && !hint::in_style_attribute(&line, cursor.ch)
        {
            tracing::debug!(target: "livehtml::session", ?cursor, "inside attribute value, no hints");
            self.close_hints();
            return None;
        }

        let hints = hint::resolve(&CursorContext::new(&line, cursor.ch));
        if hints.is_empty() {
            self.close_hints();
            return None;
        }

        self.editor.show_hints(cursor.line, &hints);
        self.listeners.emit(&SessionEvent::HintsShown {
            count: hints.candidates.len(),
        });
        self.active = Some(ActiveHints {
            line: cursor.line,
            hints,
        });
        self.active_hints()
    }

    pub fn close_hints(&mut self) {
        if self.active.take().is_some() {
            self.editor.close_hints();
            self.listeners.emit(&SessionEvent::HintsClosed);
        }
    }

    /// Accept candidate `index` of the open popup.
    ///
    /// Returns false when no popup is open or the index is out of range.
    pub fn accept(&mut self, index: usize) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };
        let Some(candidate) = active.hints.candidates.get(index).cloned() else {
            self.active = Some(active);
            return false;
        };
        self.editor.close_hints();
        self.listeners.emit(&SessionEvent::HintsClosed);

        let Some(line) = self.editor.line_text(active.line) else {
            return false;
        };
        let span = active.hints.span;
        let accepted = hint::accept(&line, span, &candidate);

        match candidate.apply {
            ApplyBehavior::ApplyColor { .. } => {
                let line_len = line.chars().count();
                self.editor.replace_range(
                    &accepted.line,
                    Position::new(active.line, 0),
                    Position::new(active.line, line_len),
                );
            }
            ApplyBehavior::Replace | ApplyBehavior::InsertStyleAttribute => {
                self.editor.replace_range(
                    &candidate.text,
                    Position::new(active.line, span.start),
                    Position::new(active.line, span.end),
                );
            }
        }
        self.editor
            .set_cursor(Position::new(active.line, accepted.cursor));

        if let Some(decoration) = &accepted.decoration {
            self.editor.mark_text(
                Position::new(active.line, decoration.span.start),
                Position::new(active.line, decoration.span.end),
                &decoration.css,
            );
        }

        tracing::debug!(target: "livehtml::session", label = %candidate.label, "accepted");
        self.listeners.emit(&SessionEvent::Accepted {
            label: candidate.label.clone(),
        });

        if accepted.rehint {
            self.show_hints();
        }
        self.refresh_preview();
        true
    }

    /// Rebuild the preview from the current document.
    pub fn refresh_preview(&mut self) -> RenderReport {
        let text = self.editor.full_text();
        let report = reconcile::render_preview(&text, &mut self.preview, &self.config);
        self.listeners.emit(&SessionEvent::PreviewRendered {
            wrapped: report.wrapped,
            failures: report.failures,
        });
        report
    }

    /// The document as a file named per the config.
    pub fn save(&self) -> SavedFile {
        file::save(&self.editor.full_text(), &self.config.save_file_name)
    }

    /// Replace the document with loaded bytes, verbatim.
    pub fn load(&mut self, bytes: &[u8]) {
        let text = file::load(bytes);
        self.close_hints();
        self.editor.set_full_text(&text);
        self.listeners.emit(&SessionEvent::Loaded { bytes: bytes.len() });
        self.refresh_preview();
    }

    pub fn clear(&mut self) {
        self.close_hints();
        self.editor.set_full_text("");
        self.listeners.emit(&SessionEvent::Cleared);
        self.refresh_preview();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupSurface;
    use crate::memory::MemoryEditor;
    use crate::types::HintMode;

    fn session(text: &str, cursor: Position) -> LiveSession<MemoryEditor, MarkupSurface> {
        LiveSession::new(
            MemoryEditor::new(text).with_cursor(cursor),
            MarkupSurface::new(),
            EditorConfig::default(),
        )
    }

    #[test]
    fn test_tab_opens_then_accepts() {
        let mut s = session("<di", Position::new(0, 3));
        assert_eq!(s.on_key_down(&KeyCombo::new(Key::Tab)), KeydownResult::Handled);
        assert_eq!(s.active_hints().map(|h| h.mode), Some(HintMode::Tag));

        assert_eq!(s.on_key_down(&KeyCombo::new(Key::Tab)), KeydownResult::Handled);
        assert!(!s.hints_active());
        assert_eq!(s.editor().full_text(), "<div");
        assert_eq!(s.editor().cursor(), Position::new(0, 4));
        assert!(s.preview().document().contains("<body>\n<div\n</body>"));
    }

    #[test]
    fn test_ctrl_space_shows_hints() {
        let mut s = session("<p cl", Position::new(0, 5));
        let result = s.on_key_down(&KeyCombo::ctrl(Key::Space));
        assert_eq!(result, KeydownResult::Handled);
        let shown = s.editor().popup().expect("popup");
        assert_eq!(shown.hints.labels().collect::<Vec<_>>(), ["class"]);
    }

    #[test]
    fn test_enter_closes_popup_or_passes_through() {
        let mut s = session("<di", Position::new(0, 3));
        assert_eq!(s.on_key_down(&KeyCombo::new(Key::Enter)), KeydownResult::NotHandled);
        s.show_hints();
        assert_eq!(s.on_key_down(&KeyCombo::new(Key::Enter)), KeydownResult::Handled);
        assert!(!s.hints_active());
        assert!(s.editor().popup().is_none());
    }

    #[test]
    fn test_alt_enter_inserts_newline() {
        let mut s = session("<p></p>", Position::new(0, 3));
        assert_eq!(s.on_key_down(&KeyCombo::alt(Key::Enter)), KeydownResult::Handled);
        assert_eq!(s.editor().full_text(), "<p>\n</p>");
        assert_eq!(s.editor().cursor(), Position::new(1, 0));
    }

    #[test]
    fn test_string_token_suppresses_popup() {
        let mut s = session(r#"<a href="ind"#, Position::new(0, 12));
        assert!(s.show_hints().is_none());
        assert!(!s.hints_active());
    }

    #[test]
    fn test_modifier_key_up_does_not_hint() {
        let mut s = session("<di", Position::new(0, 3));
        s.on_key_up(&Key::Shift);
        assert!(!s.hints_active());
        s.on_key_up(&Key::character("i"));
        assert!(s.hints_active());
    }

    #[test]
    fn test_arrow_key_up_keeps_open_popup() {
        let mut s = session("<di", Position::new(0, 3));
        s.show_hints();
        let shown = std::rc::Rc::new(std::cell::Cell::new(0));
        let counter = shown.clone();
        let _sub = s.subscribe(move |event| {
            if matches!(event, SessionEvent::HintsShown { .. }) {
                counter.set(counter.get() + 1);
            }
        });

        for key in [Key::ArrowDown, Key::ArrowUp, Key::PageDown, Key::PageUp] {
            s.on_key_up(&key);
        }
        assert_eq!(shown.get(), 0);
        assert!(s.hints_active());

        s.on_key_up(&Key::character("v"));
        assert_eq!(shown.get(), 1);
    }

    #[test]
    fn test_auto_hint_disabled() {
        let mut s = LiveSession::new(
            MemoryEditor::new("<di").with_cursor(Position::new(0, 3)),
            MarkupSurface::new(),
            EditorConfig {
                auto_hint: false,
                ..Default::default()
            },
        );
        s.on_key_up(&Key::character("i"));
        assert!(!s.hints_active());
    }

    #[test]
    fn test_accept_out_of_range_keeps_popup() {
        let mut s = session("<di", Position::new(0, 3));
        s.show_hints();
        assert!(!s.accept(99));
        assert!(s.hints_active());

        let mut idle = session("", Position::default());
        assert!(!idle.accept(0));
    }

    #[test]
    fn test_save_uses_configured_name() {
        let s = LiveSession::new(
            MemoryEditor::new("<p>x</p>"),
            MarkupSurface::new(),
            EditorConfig {
                save_file_name: "draft.html".into(),
                ..Default::default()
            },
        );
        let saved = s.save();
        assert_eq!(saved.name, "draft.html");
        assert_eq!(saved.contents, b"<p>x</p>");
    }
}
