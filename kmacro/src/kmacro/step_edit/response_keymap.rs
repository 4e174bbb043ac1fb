// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::{BTreeMap, HashMap};

use strum::IntoEnumIterator;

use super::StepResponse;
use crate::{ConfigError, KeyPress, ModifierKeysMask, format_key_description, keypress,
            parse_single_key};

/// The keys the step editor understands, and what they mean.
pub const DEFAULT_RESPONSE_KEYS: [(&str, StepResponse); 21] = [
    ("SPC", StepResponse::Execute),
    ("y", StepResponse::Execute),
    ("TAB", StepResponse::ExecuteRepeat),
    ("DEL", StepResponse::Skip),
    ("n", StepResponse::Skip),
    ("d", StepResponse::Skip),
    ("C-d", StepResponse::Skip),
    ("f", StepResponse::SkipKeep),
    ("C-k", StepResponse::SkipRest),
    ("c", StepResponse::Automatic),
    ("i", StepResponse::Insert),
    ("I", StepResponse::InsertOne),
    ("a", StepResponse::Append),
    ("A", StepResponse::AppendEnd),
    ("r", StepResponse::Replace),
    ("R", StepResponse::ReplaceOne),
    ("q", StepResponse::Quit),
    ("C-g", StepResponse::Quit),
    ("?", StepResponse::Help),
    ("h", StepResponse::Help),
    ("<f1>", StepResponse::Help),
];

/// A validated map from key to [`StepResponse`], plus the key that ends an insertion.
///
/// The insertion terminator can't also be a response key, and both
/// [`StepResponse::Execute`] and [`StepResponse::Quit`] need at least one key, so that
/// every step edit session can make progress and can be left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseKeymap {
    responses: HashMap<KeyPress, StepResponse>,
    terminator: KeyPress,
}

impl Default for ResponseKeymap {
    fn default() -> Self {
        let responses = DEFAULT_RESPONSE_KEYS
            .iter()
            .filter_map(|(description, response)| {
                parse_single_key(description).ok().map(|key| (key, *response))
            })
            .collect();
        Self {
            responses,
            terminator: keypress!(@char ModifierKeysMask::new().with_ctrl(), 'j'),
        }
    }
}

impl ResponseKeymap {
    /// # Errors
    ///
    /// See [`ResponseKeymap::validate`].
    pub fn try_new(
        responses: impl IntoIterator<Item = (KeyPress, StepResponse)>,
        terminator: KeyPress,
    ) -> Result<Self, ConfigError> {
        let it = Self {
            responses: responses.into_iter().collect(),
            terminator,
        };
        it.validate()?;
        Ok(it)
    }

    /// The defaults, with `overrides` (key description to response) applied on top,
    /// and `terminator` (a key description) ending insertions.
    ///
    /// # Errors
    ///
    /// Returns an error if a key description doesn't parse to a single key, or if the
    /// result doesn't [validate](ResponseKeymap::validate).
    pub fn try_with_overrides(
        overrides: &BTreeMap<String, StepResponse>,
        terminator: &str,
    ) -> Result<Self, ConfigError> {
        let mut it = Self {
            terminator: parse_key_for("insert_terminator", terminator)?,
            ..Self::default()
        };
        for (description, response) in overrides {
            let key = parse_key_for("step_edit_keys", description)?;
            it.responses.insert(key, *response);
        }
        it.validate()?;
        Ok(it)
    }

    /// # Errors
    ///
    /// [`ConfigError::TerminatorIsBound`] or [`ConfigError::MissingResponse`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(response) = self.responses.get(&self.terminator) {
            return Err(ConfigError::TerminatorIsBound {
                key: self.terminator.to_string(),
                response: *response,
            });
        }
        for required in [StepResponse::Execute, StepResponse::Quit] {
            if !self.responses.values().any(|it| *it == required) {
                return Err(ConfigError::MissingResponse { response: required });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn response_for(&self, key: KeyPress) -> Option<StepResponse> {
        self.responses.get(&key).copied()
    }

    #[must_use]
    pub fn terminator(&self) -> KeyPress { self.terminator }

    /// Sorted key descriptions, eg: `["SPC", "y"]`.
    #[must_use]
    pub fn keys_for(&self, response: StepResponse) -> Vec<String> {
        let mut acc: Vec<String> = self
            .responses
            .iter()
            .filter(|(_, it)| **it == response)
            .map(|(key, _)| key.to_string())
            .collect();
        acc.sort();
        acc
    }

    /// One line per bound response.
    #[must_use]
    pub fn help_text(&self) -> String {
        let mut acc = String::new();
        for response in StepResponse::iter() {
            let keys = self.keys_for(response);
            if keys.is_empty() {
                continue;
            }
            acc.push_str(&format!("{:<16} {}\n", keys.join(" "), response.describe()));
        }
        acc.push_str(&format!(
            "{:<16} end an insertion\n",
            format_key_description(&[self.terminator])
        ));
        acc
    }
}

fn parse_key_for(field: &str, description: &str) -> Result<KeyPress, ConfigError> {
    parse_single_key(description).map_err(|source| ConfigError::InvalidKey {
        field: field.to_string(),
        source,
    })
}
