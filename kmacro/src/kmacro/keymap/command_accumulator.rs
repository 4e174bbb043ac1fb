// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{Binding, KeyLookup, Keymap, MacroCommand, PrefixArg, PrefixArgBuilder};
use crate::{Key, KeyPress, KeySequence};

/// One complete command, as read from the keyboard or from a macro body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Every key that was read, including the prefix argument and the register name.
    /// This is what gets recorded.
    pub keys: KeySequence,
    /// Only the keys that the [`Keymap`] resolved, eg: `C-x C-k TAB` in
    /// `C-u 3 C-x C-k TAB`.
    pub command_keys: KeySequence,
    pub arg: PrefixArg,
    pub binding: Binding,
    pub register: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccumulatorStep {
    Pending,
    Ready(Invocation),
    /// The keys read so far don't resolve to anything, and are dropped.
    Undefined(KeySequence),
    /// The quit key was read, and the keys read so far (including it) are dropped.
    Cancelled(KeySequence),
}

/// Turns a stream of keys into [`Invocation`]s. The live key loop, macro playback and
/// the step editor all read commands this way, so a macro body is split into commands
/// exactly the way it was typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandAccumulator {
    keys: KeySequence,
    command_keys: KeySequence,
    prefix_arg: PrefixArgBuilder,
    awaiting_register: Option<MacroCommand>,
}

impl CommandAccumulator {
    pub fn feed(&mut self, key: KeyPress, keymap: &Keymap) -> AccumulatorStep {
        self.keys.push(key);

        if key == keymap.quit_key() {
            return AccumulatorStep::Cancelled(self.take_keys());
        }

        if let Some(command) = self.awaiting_register.take() {
            return match key.printable_char() {
                Some(register) => self.ready(Binding::Macro(command), Some(register)),
                None => AccumulatorStep::Undefined(self.take_keys()),
            };
        }

        if self.command_keys.is_empty() && self.feed_prefix_arg(key) {
            return AccumulatorStep::Pending;
        }

        self.command_keys.push(key);
        match keymap.lookup(&self.command_keys) {
            KeyLookup::Prefix => AccumulatorStep::Pending,
            KeyLookup::Complete(Binding::Macro(command)) if command.reads_register() => {
                self.awaiting_register = Some(command);
                AccumulatorStep::Pending
            }
            KeyLookup::Complete(binding) => self.ready(binding, None),
            KeyLookup::Undefined => AccumulatorStep::Undefined(self.take_keys()),
        }
    }

    /// No partial command has been read.
    #[must_use]
    pub fn is_idle(&self) -> bool { self.keys.is_empty() }

    #[must_use]
    pub fn pending_keys(&self) -> &[KeyPress] { &self.keys }

    /// Drop the partial command, returning its keys.
    pub fn take_keys(&mut self) -> KeySequence {
        let keys = std::mem::take(&mut self.keys);
        *self = Self::default();
        keys
    }

    /// `C-u`, digits and minus signs. Returns `true` if `key` was consumed.
    fn feed_prefix_arg(&mut self, key: KeyPress) -> bool {
        if key.is_ctrl_char('u') {
            self.prefix_arg.universal_argument();
            return true;
        }

        let mask = key.mask();
        let is_modified = (mask.is_ctrl() || mask.is_alt()) && !mask.is_shift();

        if let Some((digit, _)) = key.digit() {
            let accepted =
                is_modified || (mask.is_empty() && self.prefix_arg.accepts_plain_digit());
            if accepted {
                self.prefix_arg.digit(digit);
            }
            return accepted;
        }

        if key.key() == Key::Character('-') {
            let accepted = (is_modified && self.prefix_arg.accepts_modified_minus())
                || (mask.is_empty() && self.prefix_arg.accepts_plain_minus());
            if accepted {
                self.prefix_arg.negative();
            }
            return accepted;
        }

        false
    }

    fn ready(&mut self, binding: Binding, register: Option<char>) -> AccumulatorStep {
        let invocation = Invocation {
            keys: std::mem::take(&mut self.keys),
            command_keys: std::mem::take(&mut self.command_keys),
            arg: self.prefix_arg.build(),
            binding,
            register,
        };
        *self = Self::default();
        AccumulatorStep::Ready(invocation)
    }
}

/// A macro body split into commands. `invocation` is [None] for keys that don't resolve
/// to a command, and for an incomplete command at the end of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandUnit {
    pub keys: KeySequence,
    pub invocation: Option<Invocation>,
}

impl CommandUnit {
    #[must_use]
    pub fn binding(&self) -> Option<&Binding> {
        self.invocation.as_ref().map(|it| &it.binding)
    }
}

#[must_use]
pub fn split_into_commands(keys: &[KeyPress], keymap: &Keymap) -> Vec<CommandUnit> {
    let mut acc = vec![];
    let mut accumulator = CommandAccumulator::default();

    for key in keys {
        match accumulator.feed(*key, keymap) {
            AccumulatorStep::Pending => {}
            AccumulatorStep::Ready(invocation) => acc.push(CommandUnit {
                keys: invocation.keys.clone(),
                invocation: Some(invocation),
            }),
            AccumulatorStep::Undefined(keys) | AccumulatorStep::Cancelled(keys) => {
                acc.push(CommandUnit {
                    keys,
                    invocation: None,
                });
            }
        }
    }

    if !accumulator.is_idle() {
        acc.push(CommandUnit {
            keys: accumulator.take_keys(),
            invocation: None,
        });
    }

    acc
}
