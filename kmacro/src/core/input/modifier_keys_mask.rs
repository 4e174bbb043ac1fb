// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

/// The modifier keys held down while a [`crate::KeyPress`] was typed. Alt and Meta are
/// the same thing here (`M-` in a key description).
///
/// ```rust
/// use r3bl_kmacro::*;
///
/// let ctrl_alt = ModifierKeysMask::new().with_ctrl().with_alt();
/// assert!(ctrl_alt.is_ctrl() && ctrl_alt.is_alt());
/// assert!(!ctrl_alt.is_shift());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModifierKeysMask {
    pub shift_key_state: KeyState,
    pub ctrl_key_state: KeyState,
    pub alt_key_state: KeyState,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyState {
    Pressed,
    #[default]
    NotPressed,
}

impl From<bool> for KeyState {
    fn from(pressed: bool) -> Self {
        if pressed {
            KeyState::Pressed
        } else {
            KeyState::NotPressed
        }
    }
}

impl ModifierKeysMask {
    #[must_use]
    pub fn new() -> Self {
        ModifierKeysMask {
            shift_key_state: KeyState::NotPressed,
            ctrl_key_state: KeyState::NotPressed,
            alt_key_state: KeyState::NotPressed,
        }
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key_state = KeyState::Pressed;
        self
    }

    #[must_use]
    pub fn is_shift(&self) -> bool { self.shift_key_state == KeyState::Pressed }

    #[must_use]
    pub fn is_ctrl(&self) -> bool { self.ctrl_key_state == KeyState::Pressed }

    #[must_use]
    pub fn is_alt(&self) -> bool { self.alt_key_state == KeyState::Pressed }

    /// No modifier is held down. A [`crate::KeyPress`] with an empty mask is always
    /// normalized to [`crate::KeyPress::Plain`].
    #[must_use]
    pub fn is_empty(&self) -> bool { !self.is_shift() && !self.is_ctrl() && !self.is_alt() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_builder_sets_each_modifier() {
        let mask = ModifierKeysMask::new().with_shift();
        assert!(mask.is_shift());
        assert!(!mask.is_ctrl());
        assert!(!mask.is_alt());

        let mask = ModifierKeysMask::new().with_ctrl().with_alt();
        assert!(mask.is_ctrl());
        assert!(mask.is_alt());
        assert!(!mask.is_empty());
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(ModifierKeysMask::default(), ModifierKeysMask::new());
        assert!(ModifierKeysMask::default().is_empty());
    }
}
