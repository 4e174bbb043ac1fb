// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use super::{CounterError, CounterFormat};
use crate::{DEFAULT_COUNTER_START, EditingSurface};

/// The counter that a macro inserts into the editing surface, eg: to number lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroCounter {
    value: i64,
    last_inserted: i64,
    format: CounterFormat,
}

/// The initial counter value and format for the next macro definition. Setting the
/// counter while no macro is being defined or executed changes these instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterDefaults {
    pub start: i64,
    pub format: CounterFormat,
}

impl Default for CounterDefaults {
    fn default() -> Self {
        Self {
            start: DEFAULT_COUNTER_START,
            format: CounterFormat::default(),
        }
    }
}

impl Default for MacroCounter {
    fn default() -> Self { Self::new(DEFAULT_COUNTER_START, CounterFormat::default()) }
}

impl MacroCounter {
    #[must_use]
    pub fn new(value: i64, format: CounterFormat) -> Self {
        Self {
            value,
            last_inserted: value,
            format,
        }
    }

    #[must_use]
    pub fn value(&self) -> i64 { self.value }

    #[must_use]
    pub fn last_inserted(&self) -> i64 { self.last_inserted }

    #[must_use]
    pub fn format(&self) -> &CounterFormat { &self.format }

    /// Write the formatted value at point, then add `increment` to the value.
    ///
    /// # Errors
    ///
    /// [`CounterError::InvalidCharacter`] if the value can't be formatted. Nothing is
    /// inserted and the counter doesn't change.
    pub fn insert(
        &mut self,
        increment: i64,
        surface: &mut impl EditingSurface,
    ) -> Result<String, CounterError> {
        let text = self.format.format(self.value)?;
        surface.insert_at_point(&text);
        self.last_inserted = self.value;
        self.value = self.value.saturating_add(increment);
        Ok(text)
    }

    /// Write the previously inserted value again, without changing the counter.
    ///
    /// # Errors
    ///
    /// [`CounterError::InvalidCharacter`] if the value can't be formatted.
    pub fn insert_previous(
        &mut self,
        surface: &mut impl EditingSurface,
    ) -> Result<String, CounterError> {
        let text = self.format.format(self.last_inserted)?;
        surface.insert_at_point(&text);
        Ok(text)
    }

    pub fn set(&mut self, value: i64) { self.value = value; }

    pub fn add(&mut self, delta: i64) { self.value = self.value.saturating_add(delta); }

    /// # Errors
    ///
    /// Returns [`CounterError::InvalidFormat`], and keeps the current format, if
    /// `template` isn't valid.
    pub fn set_format(&mut self, template: &str) -> Result<(), CounterError> {
        self.format = CounterFormat::parse(template)?;
        Ok(())
    }

    /// Start over with `value` and `format`, eg: at the start of a definition or of a
    /// replay iteration.
    pub fn reset(&mut self, value: i64, format: CounterFormat) {
        self.value = value;
        self.last_inserted = value;
        self.format = format;
    }
}
