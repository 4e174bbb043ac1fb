// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::{KeyPress, PrefixArg};

/// Supplies the next raw input event on demand. Returns [None] when there is no more
/// input, which the step editor treats like a quit.
pub trait InputEventSource {
    fn next_event(&mut self) -> Option<KeyPress>;
}

/// Where counter values are written.
pub trait EditingSurface {
    fn insert_at_point(&mut self, text: &str);

    /// Position of the cursor, in characters from the start.
    fn point(&self) -> usize;
}

/// Runs the host's own commands, the ones a [`crate::Keymap`] binds with
/// [`crate::Binding::Host`].
pub trait CommandDispatcher {
    /// The host's buffer type. Commands get its full API, the macro core only needs
    /// [`EditingSurface`].
    type Surface: EditingSurface;

    /// `keys` are the keys that invoked the command (without the prefix argument
    /// keys), eg: so that `self-insert-command` knows which character to insert.
    fn execute(
        &mut self,
        command: &CommandName,
        keys: &[KeyPress],
        arg: PrefixArg,
        surface: &mut Self::Surface,
    ) -> ExecOutcome;
}

/// A command that can't proceed (eg: `forward-char` at the end of the buffer) rings the
/// bell. This is not an error, but it stops a running keyboard macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecOutcome {
    Success,
    Bell,
}

impl ExecOutcome {
    #[must_use]
    pub fn is_bell(self) -> bool { self == ExecOutcome::Bell }
}

impl From<bool> for ExecOutcome {
    fn from(success: bool) -> Self {
        if success {
            ExecOutcome::Success
        } else {
            ExecOutcome::Bell
        }
    }
}

/// Name of a host command, eg: `forward-char`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommandName(pub String);

impl CommandName {
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }

    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl Display for CommandName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult { write!(f, "{}", self.0) }
}

impl From<&str> for CommandName {
    fn from(name: &str) -> Self { Self(name.to_string()) }
}
