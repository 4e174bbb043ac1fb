// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// What the user can answer when the step editor asks about the next command of the
/// macro. The names are what the config file uses in `step_edit_keys`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum StepResponse {
    /// Run the command and keep it.
    Execute,
    /// Run the command, and keep running (and keeping) commands while they are bound
    /// to the same command.
    ExecuteRepeat,
    /// Drop the command without running it.
    Skip,
    /// Keep the command without running it.
    SkipKeep,
    /// Drop this command and everything after it.
    SkipRest,
    /// Run and keep the rest of the macro without asking.
    Automatic,
    /// Read commands from the user and insert them before this command.
    Insert,
    InsertOne,
    /// Run and keep this command, then read commands from the user.
    Append,
    /// Read commands from the user and add them after the last command.
    AppendEnd,
    /// Drop this command, and read commands from the user in its place.
    Replace,
    ReplaceOne,
    /// Stop, and leave the macro as it was.
    Quit,
    Help,
}

impl StepResponse {
    /// One line description for the help message.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            StepResponse::Execute => "execute this command",
            StepResponse::ExecuteRepeat => "execute while the same command repeats",
            StepResponse::Skip => "skip this command",
            StepResponse::SkipKeep => "keep this command without executing it",
            StepResponse::SkipRest => "skip the rest of the macro",
            StepResponse::Automatic => "execute the rest of the macro",
            StepResponse::Insert => "insert commands before this one",
            StepResponse::InsertOne => "insert one command before this one",
            StepResponse::Append => "execute this command, then insert commands",
            StepResponse::AppendEnd => "insert commands at the end of the macro",
            StepResponse::Replace => "replace this command with new commands",
            StepResponse::ReplaceOne => "replace this command with one new command",
            StepResponse::Quit => "quit, leaving the macro unchanged",
            StepResponse::Help => "show this help",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case(StepResponse::ExecuteRepeat, "execute-repeat")]
    #[test_case(StepResponse::SkipKeep, "skip-keep")]
    #[test_case(StepResponse::AppendEnd, "append-end")]
    #[test_case(StepResponse::Quit, "quit")]
    fn test_names(response: StepResponse, name: &str) {
        assert_eq!(response.to_string(), name);
        assert_eq!(StepResponse::from_str(name).unwrap(), response);
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            format!("\"{name}\"")
        );
    }
}
