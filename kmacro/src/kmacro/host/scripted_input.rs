// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use super::InputEventSource;
use crate::{KeyDescriptionError, KeyPress, parse_key_description};

/// Canned input, eg: the step edit responses in a test, or the `--keys` argument of
/// the `kmc` binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedInput {
    pending: VecDeque<KeyPress>,
}

impl ScriptedInput {
    pub fn new(keys: impl IntoIterator<Item = KeyPress>) -> Self {
        Self {
            pending: keys.into_iter().collect(),
        }
    }

    /// # Errors
    ///
    /// Returns an error if `description` isn't a valid key description.
    pub fn from_description(description: &str) -> Result<Self, KeyDescriptionError> {
        Ok(Self::new(parse_key_description(description)?))
    }

    pub fn push(&mut self, key: KeyPress) { self.pending.push_back(key); }

    #[must_use]
    pub fn len(&self) -> usize { self.pending.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.pending.is_empty() }
}

impl InputEventSource for ScriptedInput {
    fn next_event(&mut self) -> Option<KeyPress> { self.pending.pop_front() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypress;

    #[test]
    fn test_events_come_out_in_order() {
        let mut input = ScriptedInput::from_description("a SPC").unwrap();
        assert_eq!(input.len(), 2);
        assert_eq!(input.next_event(), Some(keypress!(@char 'a')));
        assert_eq!(input.next_event(), Some(keypress!(@char ' ')));
        assert_eq!(input.next_event(), None);
        assert!(input.is_empty());
    }
}
