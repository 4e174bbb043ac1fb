// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::MAX_COUNTER_FORMAT_WIDTH;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum CounterError {
    #[error("Invalid counter format {format:?}: {reason}")]
    #[diagnostic(
        code(r3bl_kmacro::counter::invalid_format),
        help(
            "Use a template with one integer conversion, eg: `%d`, `%03d`, `%x` or \
             `item-%d. `, and write a literal percent sign as `%%`"
        )
    )]
    InvalidFormat {
        format: String,
        reason: FormatErrorReason,
    },

    #[error("Invalid character {value} for counter format {format:?}")]
    #[diagnostic(
        code(r3bl_kmacro::counter::invalid_character),
        help("`%c` needs a counter value that is a Unicode scalar value")
    )]
    InvalidCharacter { format: String, value: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormatErrorReason {
    #[error("more than one conversion")]
    TooManyConversions,

    #[error("unknown conversion '%{0}'")]
    UnknownConversion(char),

    #[error("'%' at the end of the format")]
    DanglingPercent,

    #[error("width or precision larger than {max}", max = MAX_COUNTER_FORMAT_WIDTH)]
    WidthTooLarge,
}
