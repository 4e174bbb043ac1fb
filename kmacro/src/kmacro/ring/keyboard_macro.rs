// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CounterFormat, KeyPress, KeySequence, format_key_description};

/// A recorded key sequence, along with the counter value and format that were active
/// when the recording ended. Replays start from these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardMacro {
    keys: KeySequence,
    counter: i64,
    format: CounterFormat,
    name: Option<String>,
}

impl KeyboardMacro {
    pub fn new(keys: impl Into<KeySequence>, counter: i64, format: CounterFormat) -> Self {
        Self {
            keys: keys.into(),
            counter,
            format,
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_keys(mut self, keys: impl Into<KeySequence>) -> Self {
        self.keys = keys.into();
        self
    }

    #[must_use]
    pub fn with_counter(mut self, counter: i64) -> Self {
        self.counter = counter;
        self
    }

    /// The counter value the next replay starts from.
    pub fn set_counter(&mut self, counter: i64) { self.counter = counter; }

    #[must_use]
    pub fn keys(&self) -> &[KeyPress] { &self.keys }

    #[must_use]
    pub fn counter(&self) -> i64 { self.counter }

    #[must_use]
    pub fn format(&self) -> &CounterFormat { &self.format }

    #[must_use]
    pub fn name(&self) -> Option<&str> { self.name.as_deref() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// The body as a key description, eg: `C-a M-f RET`.
    #[must_use]
    pub fn describe(&self) -> String { format_key_description(&self.keys) }
}
