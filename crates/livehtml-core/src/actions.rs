//! Keyboard input types.
//!
//! Hosts convert their native key events into these before handing them to
//! the session, which owns the hint and preview key bindings.

use smol_str::SmolStr;

/// A key as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, carrying what it types.
    Character(SmolStr),
    Unidentified,
    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Alt,
    AltGraph,
    CapsLock,
    Control,
    Fn,
    Meta,
    NumLock,
    Shift,
    Super,
}

impl Key {
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }

    /// Map a DOM `KeyboardEvent.key` value.
    ///
    /// Single characters become `Character`, a lone space becomes `Space`,
    /// and unknown named keys are `Unidentified`.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            " " | "Spacebar" => Self::Space,
            "Backspace" => Self::Backspace,
            "Delete" | "Del" => Self::Delete,
            "Enter" => Self::Enter,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Alt" => Self::Alt,
            "AltGraph" => Self::AltGraph,
            "CapsLock" => Self::CapsLock,
            "Control" => Self::Control,
            "Fn" => Self::Fn,
            "Meta" | "OS" => Self::Meta,
            "NumLock" => Self::NumLock,
            "Shift" => Self::Shift,
            "Super" => Self::Super,
            other if other.chars().count() == 1 => Self::character(other),
            _ => Self::Unidentified,
        }
    }

    /// Keys that only change modifier state. They never retrigger hinting.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Self::Alt
                | Self::AltGraph
                | Self::CapsLock
                | Self::Control
                | Self::Fn
                | Self::Meta
                | Self::NumLock
                | Self::Shift
                | Self::Super
        )
    }
}

/// Modifier state held during a keydown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self::from_flags(false, false, false, false);
    pub const CTRL: Self = Self::from_flags(true, false, false, false);
    pub const ALT: Self = Self::from_flags(false, true, false, false);
    pub const SHIFT: Self = Self::from_flags(false, false, true, false);

    pub const fn from_flags(ctrl: bool, alt: bool, shift: bool, meta: bool) -> Self {
        Self {
            ctrl,
            alt,
            shift,
            meta,
        }
    }
}

/// A key plus the modifiers held with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::NONE)
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn ctrl(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::CTRL)
    }

    pub fn alt(key: Key) -> Self {
        Self::with_modifiers(key, Modifiers::ALT)
    }
}

/// Whether the session consumed a keydown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeydownResult {
    /// Consumed; the host should prevent its default action.
    Handled,
    /// Not a binding; the host applies its default action.
    NotHandled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_keys() {
        assert!(Key::Shift.is_modifier());
        assert!(Key::Control.is_modifier());
        assert!(!Key::character("a").is_modifier());
        assert!(!Key::Tab.is_modifier());
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name(" "), Key::Space);
        assert_eq!(Key::from_key_name("Tab"), Key::Tab);
        assert_eq!(Key::from_key_name("Esc"), Key::Escape);
        assert_eq!(Key::from_key_name("é"), Key::character("é"));
        assert_eq!(Key::from_key_name("MediaPlayPause"), Key::Unidentified);
    }

    #[test]
    fn test_combo_constructors() {
        assert_eq!(KeyCombo::ctrl(Key::Space).modifiers, Modifiers::CTRL);
        assert_eq!(KeyCombo::alt(Key::Enter).modifiers, Modifiers::ALT);
        assert_eq!(KeyCombo::new(Key::Tab).modifiers, Modifiers::NONE);
        assert_eq!(
            KeyCombo::with_modifiers(Key::Tab, Modifiers::from_flags(false, false, true, false))
                .modifiers,
            Modifiers::SHIFT
        );
    }
}
