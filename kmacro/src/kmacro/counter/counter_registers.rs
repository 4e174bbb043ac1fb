// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named integer registers the counter can be saved to, loaded from, and added to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRegisters {
    registers: BTreeMap<char, i64>,
}

impl CounterRegisters {
    pub fn save(&mut self, register: char, value: i64) {
        self.registers.insert(register, value);
    }

    #[must_use]
    pub fn load(&self, register: char) -> Option<i64> { self.registers.get(&register).copied() }

    /// Returns the new value, or [None] if the register holds no number.
    pub fn add(&mut self, register: char, delta: i64) -> Option<i64> {
        let value = self.registers.get_mut(&register)?;
        *value = value.saturating_add(delta);
        Some(*value)
    }
}

/// The tests behind `kmacro-quit-counter-equal`, `-less` and `-greater`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterCondition {
    Equal(i64),
    Less(i64),
    Greater(i64),
}

impl CounterCondition {
    #[must_use]
    pub fn holds(self, counter: i64) -> bool {
        match self {
            CounterCondition::Equal(it) => counter == it,
            CounterCondition::Less(it) => counter < it,
            CounterCondition::Greater(it) => counter > it,
        }
    }
}
