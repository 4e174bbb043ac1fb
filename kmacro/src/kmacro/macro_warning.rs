// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Conditions a user of an editor would see in the echo area. None of these are
/// failures: the operation that produced one is a no-op (or stops early), and the
/// session keeps working.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum MacroWarning {
    #[error("No keyboard macro defined")]
    #[diagnostic(code(r3bl_kmacro::ring::no_macro_defined), severity(Warning))]
    NoMacroDefined,

    #[error("Only one keyboard macro defined")]
    #[diagnostic(code(r3bl_kmacro::ring::only_one_macro_defined), severity(Warning))]
    OnlyOneMacroDefined,

    #[error("Already defining a keyboard macro")]
    #[diagnostic(
        code(r3bl_kmacro::recorder::already_defining),
        severity(Warning),
        help("End the definition with `C-x )` or cancel it with `C-g` first")
    )]
    AlreadyDefining,

    #[error("Not defining a keyboard macro")]
    #[diagnostic(code(r3bl_kmacro::recorder::not_defining), severity(Warning))]
    NotDefining,

    #[error("Can't execute a keyboard macro while defining one")]
    #[diagnostic(code(r3bl_kmacro::recorder::call_while_defining), severity(Warning))]
    CallWhileDefining,

    #[error("Ignoring empty keyboard macro")]
    #[diagnostic(code(r3bl_kmacro::recorder::empty_macro), severity(Warning))]
    EmptyMacroDiscarded,

    #[error("Keyboard macro definition cancelled")]
    #[diagnostic(code(r3bl_kmacro::recorder::cancelled), severity(Warning))]
    RecordingCancelled,

    #[error("{keys} is undefined")]
    #[diagnostic(code(r3bl_kmacro::keymap::undefined), severity(Warning))]
    Undefined { keys: String },

    #[error("Register {register} does not contain a number")]
    #[diagnostic(code(r3bl_kmacro::counter::empty_register), severity(Warning))]
    EmptyRegister { register: char },

    #[error("Invalid character: {value}")]
    #[diagnostic(
        code(r3bl_kmacro::counter::invalid_character),
        severity(Warning),
        help("`%c` needs a counter value that is a Unicode scalar value")
    )]
    InvalidCharacter { value: i64 },

    #[error("Keyboard macro stopped after {limit} repetitions")]
    #[diagnostic(
        code(r3bl_kmacro::player::repeat_limit),
        severity(Warning),
        help("Raise `max_unbounded_repeat` in the config file")
    )]
    RepeatLimitReached { limit: usize },

    #[error("No keyboard macro named {name:?}")]
    #[diagnostic(code(r3bl_kmacro::session::no_such_named_macro), severity(Warning))]
    NoSuchNamedMacro { name: String },
}

/// The transient message a host shows after an operation, eg: in a status bar. See
/// [`crate::MacroSession::take_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Warning(MacroWarning),
}

impl Display for StatusMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StatusMessage::Info(text) => write!(f, "{text}"),
            StatusMessage::Warning(warning) => write!(f, "{warning}"),
        }
    }
}

impl From<MacroWarning> for StatusMessage {
    fn from(warning: MacroWarning) -> Self { StatusMessage::Warning(warning) }
}
