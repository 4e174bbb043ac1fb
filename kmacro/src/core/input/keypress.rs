// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ModifierKeysMask;

/// Examples.
///
/// ```rust
/// use r3bl_kmacro::*;
///
/// let a = keypress!(@char 'a');
/// assert_eq!(a, KeyPress::Plain { key: Key::Character('a') });
///
/// let ctrl_x = keypress!(@char ModifierKeysMask::new().with_ctrl(), 'x');
/// assert_eq!(
///     ctrl_x,
///     KeyPress::WithModifiers {
///         key: Key::Character('x'),
///         mask: ModifierKeysMask::new().with_ctrl(),
///     }
/// );
///
/// let enter = keypress!(@special SpecialKey::Enter);
/// let f3 = keypress!(@fn FunctionKey::F3);
/// ```
#[macro_export]
macro_rules! keypress {
    // @char
    (@char $arg_char : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::Character($arg_char),
        }
    };

    (@char $arg_modifiers : expr, $arg_char : expr) => {
        $crate::KeyPress::new($crate::Key::Character($arg_char), $arg_modifiers)
    };

    // @special
    (@special $arg_special : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::SpecialKey($arg_special),
        }
    };

    (@special $arg_modifiers : expr, $arg_special : expr) => {
        $crate::KeyPress::new($crate::Key::SpecialKey($arg_special), $arg_modifiers)
    };

    // @fn
    (@fn $arg_function : expr) => {
        $crate::KeyPress::Plain {
            key: $crate::Key::FunctionKey($arg_function),
        }
    };

    (@fn $arg_modifiers : expr, $arg_function : expr) => {
        $crate::KeyPress::new($crate::Key::FunctionKey($arg_function), $arg_modifiers)
    };
}

/// A single input event, as it is recorded into (and replayed from) a keyboard macro.
///
/// The core never looks at device specific encodings. Terminal hosts convert their
/// events with [`TryFrom<crossterm::event::KeyEvent>`](crate::convert_key_event), and
/// everything else (tests, config files, the `kmc` driver) uses
/// [`crate::parse_key_description`].
///
/// Please use the [`keypress!`] macro or [`KeyPress::new`] instead of directly
/// constructing the [`KeyPress::WithModifiers`] variant, so that an empty mask is
/// normalized into [`KeyPress::Plain`]. Otherwise two equal keys would compare unequal
/// and keymap lookups would miss.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum KeyPress {
    Plain { key: Key },
    WithModifiers { key: Key, mask: ModifierKeysMask },
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum Key {
    /// [char] that can be printed to the console, including space.
    Character(char),
    SpecialKey(SpecialKey),
    FunctionKey(FunctionKey),
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum FunctionKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl FunctionKey {
    pub const ALL: [FunctionKey; 12] = [
        FunctionKey::F1,
        FunctionKey::F2,
        FunctionKey::F3,
        FunctionKey::F4,
        FunctionKey::F5,
        FunctionKey::F6,
        FunctionKey::F7,
        FunctionKey::F8,
        FunctionKey::F9,
        FunctionKey::F10,
        FunctionKey::F11,
        FunctionKey::F12,
    ];

    /// `1` for [`FunctionKey::F1`], and so on.
    #[must_use]
    pub fn number(self) -> u8 {
        let index = FunctionKey::ALL
            .iter()
            .position(|it| *it == self)
            .unwrap_or_default();
        u8::try_from(index + 1).unwrap_or(u8::MAX)
    }

    #[must_use]
    pub fn from_number(number: u8) -> Option<FunctionKey> {
        let index = usize::from(number).checked_sub(1)?;
        FunctionKey::ALL.get(index).copied()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize, Copy)]
pub enum SpecialKey {
    Backspace,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    BackTab, /* Shift + Tab */
    Delete,
    Insert,
    Esc,
}

/// The body of a keyboard macro. Most macros are short, so the first few keys live
/// inline without a heap allocation.
pub type KeySequence = SmallVec<[KeyPress; KEY_SEQUENCE_INLINE_SIZE]>;

pub const KEY_SEQUENCE_INLINE_SIZE: usize = 8;

impl KeyPress {
    /// Normalizes an empty `mask` into [`KeyPress::Plain`].
    #[must_use]
    pub fn new(key: Key, mask: ModifierKeysMask) -> Self {
        if mask.is_empty() {
            KeyPress::Plain { key }
        } else {
            KeyPress::WithModifiers { key, mask }
        }
    }

    #[must_use]
    pub fn key(&self) -> Key {
        match self {
            KeyPress::Plain { key } | KeyPress::WithModifiers { key, .. } => *key,
        }
    }

    #[must_use]
    pub fn mask(&self) -> ModifierKeysMask {
        match self {
            KeyPress::Plain { .. } => ModifierKeysMask::new(),
            KeyPress::WithModifiers { mask, .. } => *mask,
        }
    }

    /// The character this key inserts when bound to a self inserting command. Only
    /// plain characters (shift is folded into the character by the input layer) qualify.
    #[must_use]
    pub fn printable_char(&self) -> Option<char> {
        match self {
            KeyPress::Plain {
                key: Key::Character(ch),
            } if !ch.is_control() => Some(*ch),
            _ => None,
        }
    }

    /// `C-<ch>`, with no other modifiers.
    #[must_use]
    pub fn is_ctrl_char(&self, ch: char) -> bool {
        match self {
            KeyPress::WithModifiers {
                key: Key::Character(it),
                mask,
            } => *it == ch && mask.is_ctrl() && !mask.is_alt() && !mask.is_shift(),
            KeyPress::Plain { .. } => false,
            KeyPress::WithModifiers { .. } => false,
        }
    }

    /// The decimal digit typed, along with the mask it was typed with.
    #[must_use]
    pub fn digit(&self) -> Option<(u8, ModifierKeysMask)> {
        match self.key() {
            Key::Character(ch) => ch
                .to_digit(10)
                .and_then(|it| u8::try_from(it).ok())
                .map(|it| (it, self.mask())),
            Key::SpecialKey(_) | Key::FunctionKey(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_keypress_character_key() {
        // No modifier.
        {
            let macro_syntax = keypress! { @char 'a' };
            let struct_syntax = KeyPress::Plain {
                key: Key::Character('a'),
            };
            assert_eq!(macro_syntax, struct_syntax);
        }

        // With modifier.
        {
            let macro_syntax =
                keypress! { @char ModifierKeysMask::new().with_shift().with_ctrl(), 'a' };
            let struct_syntax = KeyPress::WithModifiers {
                key: Key::Character('a'),
                mask: ModifierKeysMask::new().with_shift().with_ctrl(),
            };
            assert_eq!(macro_syntax, struct_syntax);
        }
    }

    #[test]
    fn test_empty_mask_is_normalized_to_plain() {
        let normalized = keypress! { @special ModifierKeysMask::new(), SpecialKey::Left };
        assert_eq!(
            normalized,
            KeyPress::Plain {
                key: Key::SpecialKey(SpecialKey::Left)
            }
        );
    }

    #[test]
    fn test_function_key_numbers() {
        assert_eq!(FunctionKey::F1.number(), 1);
        assert_eq!(FunctionKey::F12.number(), 12);
        assert_eq!(FunctionKey::from_number(3), Some(FunctionKey::F3));
        assert_eq!(FunctionKey::from_number(0), None);
        assert_eq!(FunctionKey::from_number(13), None);
    }

    #[test]
    fn test_printable_char() {
        assert_eq!(keypress!(@char 'x').printable_char(), Some('x'));
        assert_eq!(keypress!(@char ' ').printable_char(), Some(' '));
        assert_eq!(
            keypress!(@char ModifierKeysMask::new().with_ctrl(), 'x').printable_char(),
            None
        );
        assert_eq!(keypress!(@special SpecialKey::Enter).printable_char(), None);
    }

    #[test]
    fn test_is_ctrl_char_and_digit() {
        let ctrl_u = keypress!(@char ModifierKeysMask::new().with_ctrl(), 'u');
        assert!(ctrl_u.is_ctrl_char('u'));
        assert!(!ctrl_u.is_ctrl_char('g'));
        assert!(!keypress!(@char 'u').is_ctrl_char('u'));

        let meta_5 = keypress!(@char ModifierKeysMask::new().with_alt(), '5');
        assert_eq!(meta_5.digit(), Some((5, ModifierKeysMask::new().with_alt())));
        assert_eq!(keypress!(@char 'x').digit(), None);
    }
}
