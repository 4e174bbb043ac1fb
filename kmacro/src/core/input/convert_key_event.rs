// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Convert terminal key events from [crossterm] into [`KeyPress`]. Only key presses are
//! converted, release and repeat events (from the kitty keyboard protocol) are not
//! something a keyboard macro records.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{FunctionKey, Key, KeyPress, ModifierKeysMask, SpecialKey};
use crate::keypress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum KeyEventConversionError {
    #[error("Only key press events can be recorded, got {0:?}")]
    #[diagnostic(code(r3bl_kmacro::convert_key_event::not_a_press))]
    NotAPress(KeyEventKind),

    #[error("Key code {0:?} has no keyboard macro equivalent")]
    #[diagnostic(code(r3bl_kmacro::convert_key_event::unsupported_key_code))]
    UnsupportedKeyCode(KeyCode),
}

impl TryFrom<KeyEvent> for KeyPress {
    type Error = KeyEventConversionError;

    fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
        if key_event.kind != KeyEventKind::Press {
            return Err(KeyEventConversionError::NotAPress(key_event.kind));
        }

        match key_event {
            // Shift is already folded into the character, eg: `A` not `S-a`.
            KeyEvent {
                code: KeyCode::Char(character),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
                ..
            } => Ok(keypress! { @char character }),
            _ => {
                let key = copy_code_from_key_event(&key_event)
                    .ok_or(KeyEventConversionError::UnsupportedKeyCode(key_event.code))?;
                Ok(match convert_key_modifiers(&key_event.modifiers) {
                    Some(mask) => KeyPress::new(key, mask),
                    None => KeyPress::Plain { key },
                })
            }
        }
    }
}

/// Macro to insulate this library from changes in crossterm
/// [`crossterm::event::KeyEvent`] constructor & fields.
#[macro_export]
macro_rules! crossterm_keyevent {
    (
        code: $arg_key_code: expr,
        modifiers: $arg_key_modifiers: expr
    ) => {
        crossterm::event::KeyEvent::new($arg_key_code, $arg_key_modifiers)
    };
}

#[must_use]
pub fn convert_key_modifiers(modifiers: &KeyModifiers) -> Option<ModifierKeysMask> {
    if modifiers.is_empty() {
        None
    } else {
        Some(ModifierKeysMask::from(*modifiers))
    }
}

impl From<KeyModifiers> for ModifierKeysMask {
    /// Super, hyper and meta (kitty protocol) have no place in a key description, and
    /// are dropped.
    fn from(other: KeyModifiers) -> ModifierKeysMask {
        let mut it = ModifierKeysMask::new();
        if other.intersects(KeyModifiers::SHIFT) {
            it = it.with_shift();
        }
        if other.intersects(KeyModifiers::CONTROL) {
            it = it.with_ctrl();
        }
        if other.intersects(KeyModifiers::ALT) {
            it = it.with_alt();
        }
        it
    }
}

#[must_use]
pub fn copy_code_from_key_event(key_event: &KeyEvent) -> Option<Key> {
    // Make the code easier to read below using this alias.
    type KC = KeyCode;
    let special_key = match key_event.code {
        KC::Char(character) => return Some(Key::Character(character)),
        KC::F(fn_key) => return FunctionKey::from_number(fn_key).map(Key::FunctionKey),
        KC::Backspace => SpecialKey::Backspace,
        KC::Enter => SpecialKey::Enter,
        KC::Left => SpecialKey::Left,
        KC::Right => SpecialKey::Right,
        KC::Up => SpecialKey::Up,
        KC::Down => SpecialKey::Down,
        KC::Home => SpecialKey::Home,
        KC::End => SpecialKey::End,
        KC::PageUp => SpecialKey::PageUp,
        KC::PageDown => SpecialKey::PageDown,
        KC::Tab => SpecialKey::Tab,
        KC::BackTab => SpecialKey::BackTab,
        KC::Delete => SpecialKey::Delete,
        KC::Insert => SpecialKey::Insert,
        KC::Esc => SpecialKey::Esc,
        _ => return None,
    };
    Some(Key::SpecialKey(special_key))
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, MediaKeyCode};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_character_keys_fold_shift() {
        let key_event = crossterm_keyevent! {
            code: KeyCode::Char('A'),
            modifiers: KeyModifiers::SHIFT
        };
        assert_eq!(KeyPress::try_from(key_event), Ok(keypress!(@char 'A')));
    }

    #[test]
    fn test_ctrl_character() {
        let key_event = crossterm_keyevent! {
            code: KeyCode::Char('x'),
            modifiers: KeyModifiers::CONTROL
        };
        assert_eq!(
            KeyPress::try_from(key_event),
            Ok(keypress!(@char ModifierKeysMask::new().with_ctrl(), 'x'))
        );
    }

    #[test]
    fn test_function_and_special_keys() {
        let f3 = crossterm_keyevent! {
            code: KeyCode::F(3),
            modifiers: KeyModifiers::NONE
        };
        assert_eq!(KeyPress::try_from(f3), Ok(keypress!(@fn FunctionKey::F3)));

        let alt_up = crossterm_keyevent! {
            code: KeyCode::Up,
            modifiers: KeyModifiers::ALT
        };
        assert_eq!(
            KeyPress::try_from(alt_up),
            Ok(keypress!(@special ModifierKeysMask::new().with_alt(), SpecialKey::Up))
        );
    }

    #[test]
    fn test_release_is_rejected() {
        let key_event = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(
            KeyPress::try_from(key_event),
            Err(KeyEventConversionError::NotAPress(KeyEventKind::Release))
        );
    }

    #[test]
    fn test_unsupported_key_code() {
        let key_event = crossterm_keyevent! {
            code: KeyCode::Media(MediaKeyCode::Play),
            modifiers: KeyModifiers::NONE
        };
        assert!(matches!(
            KeyPress::try_from(key_event),
            Err(KeyEventConversionError::UnsupportedKeyCode(_))
        ));
    }
}
