// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::CounterCondition;

/// The keyboard macro facility's own commands. The names match the Emacs `kmacro`
/// commands they are modeled on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum MacroCommand {
    #[strum(serialize = "kmacro-start-macro")]
    StartMacro,
    #[strum(serialize = "kmacro-end-macro")]
    EndMacro,
    #[strum(serialize = "kmacro-start-macro-or-insert-counter")]
    StartOrInsertCounter,
    #[strum(serialize = "kmacro-end-or-call-macro")]
    EndOrCallMacro,
    #[strum(serialize = "kmacro-call-macro")]
    CallMacro,
    #[strum(serialize = "kmacro-call-ring-2nd")]
    CallRingSecond,
    #[strum(serialize = "kmacro-insert-counter")]
    InsertCounter,
    #[strum(serialize = "kmacro-set-counter")]
    SetCounter,
    #[strum(serialize = "kmacro-add-counter")]
    AddCounter,
    #[strum(serialize = "kmacro-cycle-ring-next")]
    CycleRingNext,
    #[strum(serialize = "kmacro-cycle-ring-previous")]
    CycleRingPrevious,
    #[strum(serialize = "kmacro-swap-ring")]
    SwapRing,
    #[strum(serialize = "kmacro-delete-ring-head")]
    DeleteRingHead,
    #[strum(serialize = "kmacro-step-edit-macro")]
    StepEdit,
    #[strum(serialize = "kmacro-quit-counter-equal")]
    QuitCounterEqual,
    #[strum(serialize = "kmacro-quit-counter-less")]
    QuitCounterLess,
    #[strum(serialize = "kmacro-quit-counter-greater")]
    QuitCounterGreater,
    #[strum(serialize = "kmacro-reg-load-counter")]
    RegisterLoadCounter,
    #[strum(serialize = "kmacro-reg-save-counter")]
    RegisterSaveCounter,
    #[strum(serialize = "kmacro-reg-add-counter")]
    RegisterAddCounter,
    #[strum(serialize = "keyboard-quit")]
    KeyboardQuit,
}

impl MacroCommand {
    /// Commands that end up in the body of a macro being defined. The commands that
    /// start, end, call or rearrange macros are not, so replaying a macro never
    /// recurses or rotates the ring.
    #[must_use]
    pub fn is_recorded(self) -> bool {
        matches!(
            self,
            MacroCommand::StartOrInsertCounter
                | MacroCommand::InsertCounter
                | MacroCommand::SetCounter
                | MacroCommand::AddCounter
                | MacroCommand::QuitCounterEqual
                | MacroCommand::QuitCounterLess
                | MacroCommand::QuitCounterGreater
                | MacroCommand::RegisterLoadCounter
                | MacroCommand::RegisterSaveCounter
                | MacroCommand::RegisterAddCounter
        )
    }

    /// The register commands read one more key, the register name.
    #[must_use]
    pub fn reads_register(self) -> bool {
        matches!(
            self,
            MacroCommand::RegisterLoadCounter
                | MacroCommand::RegisterSaveCounter
                | MacroCommand::RegisterAddCounter
        )
    }

    /// The condition a `kmacro-quit-counter-*` command tests, compared against `arg`.
    #[must_use]
    pub fn counter_condition(self, arg: i64) -> Option<CounterCondition> {
        match self {
            MacroCommand::QuitCounterEqual => Some(CounterCondition::Equal(arg)),
            MacroCommand::QuitCounterLess => Some(CounterCondition::Less(arg)),
            MacroCommand::QuitCounterGreater => Some(CounterCondition::Greater(arg)),
            _ => None,
        }
    }
}
