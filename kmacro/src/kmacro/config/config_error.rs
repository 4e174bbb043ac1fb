// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CounterError, KeyDescriptionError, StepResponse};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("ring_max must be at least 1")]
    #[diagnostic(code(r3bl_kmacro::config::ring_max))]
    InvalidRingMax,

    #[error("max_unbounded_repeat must be at least 1")]
    #[diagnostic(code(r3bl_kmacro::config::max_unbounded_repeat))]
    InvalidMaxUnboundedRepeat,

    #[error("Invalid default_counter_format")]
    #[diagnostic(code(r3bl_kmacro::config::counter_format))]
    InvalidCounterFormat {
        #[source]
        #[diagnostic_source]
        source: CounterError,
    },

    #[error("Invalid key description in {field}")]
    #[diagnostic(code(r3bl_kmacro::config::key))]
    InvalidKey {
        field: String,
        #[source]
        #[diagnostic_source]
        source: KeyDescriptionError,
    },

    #[error("The insert terminator {key} is also bound to the {response} response")]
    #[diagnostic(
        code(r3bl_kmacro::config::terminator_is_bound),
        help("Pick an insert_terminator that isn't in step_edit_keys")
    )]
    TerminatorIsBound { key: String, response: StepResponse },

    #[error("No key is bound to the {response} response")]
    #[diagnostic(
        code(r3bl_kmacro::config::missing_response),
        help("Bind a key to it in step_edit_keys")
    )]
    MissingResponse { response: StepResponse },
}
