// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::{HashMap, HashSet},
          fmt::{Display, Formatter, Result as FmtResult}};

use super::MacroCommand;
use crate::{CommandName, KeyDescriptionError, KeyPress, KeySequence, ModifierKeysMask,
            SELF_INSERT_COMMAND, format_key_description, keypress,
            parse_key_description};

/// What a complete key sequence runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Binding {
    Macro(MacroCommand),
    Host(CommandName),
}

impl Display for Binding {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Binding::Macro(command) => write!(f, "{command}"),
            Binding::Host(command) => write!(f, "{command}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyLookup {
    /// More keys are needed, eg: after `C-x`.
    Prefix,
    Complete(Binding),
    Undefined,
}

/// Emacs default key bindings for the keyboard macro commands.
pub const DEFAULT_MACRO_BINDINGS: [(&str, MacroCommand); 22] = [
    ("C-x (", MacroCommand::StartMacro),
    ("C-x )", MacroCommand::EndMacro),
    ("<f3>", MacroCommand::StartOrInsertCounter),
    ("<f4>", MacroCommand::EndOrCallMacro),
    ("C-x e", MacroCommand::CallMacro),
    ("C-x C-k C-l", MacroCommand::CallRingSecond),
    ("C-x C-k TAB", MacroCommand::InsertCounter),
    ("C-x C-k C-c", MacroCommand::SetCounter),
    ("C-x C-k C-a", MacroCommand::AddCounter),
    ("C-x C-k C-n", MacroCommand::CycleRingNext),
    ("C-x C-k C-p", MacroCommand::CycleRingPrevious),
    ("C-x C-k C-t", MacroCommand::SwapRing),
    ("C-x C-k C-d", MacroCommand::DeleteRingHead),
    ("C-x C-k SPC", MacroCommand::StepEdit),
    ("C-x C-k C-q =", MacroCommand::QuitCounterEqual),
    ("C-x C-k C-q <", MacroCommand::QuitCounterLess),
    ("C-x C-k C-q >", MacroCommand::QuitCounterGreater),
    ("C-x C-k C-r l", MacroCommand::RegisterLoadCounter),
    ("C-x C-k C-r s", MacroCommand::RegisterSaveCounter),
    ("C-x C-k C-r a", MacroCommand::RegisterAddCounter),
    ("C-x C-k C-k", MacroCommand::EndOrCallMacro),
    ("C-g", MacroCommand::KeyboardQuit),
];

/// The key binding registry. Maps complete key sequences to a [`Binding`], and knows
/// which partial sequences are prefixes of a binding.
///
/// A printable character with no binding of its own runs the self insert command, the
/// way every printable key does in an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: HashMap<KeySequence, Binding>,
    prefixes: HashSet<KeySequence>,
    self_insert_command: Option<CommandName>,
    quit_key: KeyPress,
}

impl Default for Keymap {
    fn default() -> Self { Self::new() }
}

impl Keymap {
    /// No bindings, except for self insertion of printable characters and `C-g` as the
    /// quit key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            prefixes: HashSet::new(),
            self_insert_command: Some(CommandName::new(SELF_INSERT_COMMAND)),
            quit_key: keypress!(@char ModifierKeysMask::new().with_ctrl(), 'g'),
        }
    }

    /// [`Keymap::new`] plus [`DEFAULT_MACRO_BINDINGS`].
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut it = Self::new();
        for (description, command) in DEFAULT_MACRO_BINDINGS {
            if let Ok(keys) = parse_key_description(description) {
                it.bind(&keys, Binding::Macro(command));
            }
        }
        it
    }

    pub fn bind(&mut self, keys: &[KeyPress], binding: Binding) {
        if keys.is_empty() {
            return;
        }
        for end in 1..keys.len() {
            self.prefixes.insert(KeySequence::from_slice(&keys[..end]));
        }
        self.bindings.insert(KeySequence::from_slice(keys), binding);
    }

    /// # Errors
    ///
    /// Returns an error if `description` isn't a valid key description.
    pub fn bind_description(
        &mut self,
        description: &str,
        binding: Binding,
    ) -> Result<(), KeyDescriptionError> {
        let keys = parse_key_description(description)?;
        self.bind(&keys, binding);
        Ok(())
    }

    pub fn unbind(&mut self, keys: &[KeyPress]) -> Option<Binding> {
        let removed = self.bindings.remove(keys);
        self.prefixes = self
            .bindings
            .keys()
            .flat_map(|it| (1..it.len()).map(|end| KeySequence::from_slice(&it[..end])))
            .collect();
        removed
    }

    #[must_use]
    pub fn lookup(&self, keys: &[KeyPress]) -> KeyLookup {
        if keys.is_empty() {
            return KeyLookup::Prefix;
        }
        if let Some(binding) = self.bindings.get(keys) {
            return KeyLookup::Complete(binding.clone());
        }
        if self.prefixes.contains(keys) {
            return KeyLookup::Prefix;
        }
        match (keys, &self.self_insert_command) {
            ([single], Some(command)) if single.printable_char().is_some() => {
                KeyLookup::Complete(Binding::Host(command.clone()))
            }
            _ => KeyLookup::Undefined,
        }
    }

    pub fn set_self_insert_command(&mut self, command: Option<CommandName>) {
        self.self_insert_command = command;
    }

    #[must_use]
    pub fn quit_key(&self) -> KeyPress { self.quit_key }

    pub fn set_quit_key(&mut self, key: KeyPress) { self.quit_key = key; }

    /// Every key sequence bound to `binding`, as key descriptions, sorted.
    #[must_use]
    pub fn where_is(&self, binding: &Binding) -> Vec<String> {
        let mut acc: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, it)| *it == binding)
            .map(|(keys, _)| format_key_description(keys))
            .collect();
        acc.sort();
        acc
    }
}
