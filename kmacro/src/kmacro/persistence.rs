// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Save the ring (and the rest of a [`MacroSession`] worth keeping) to a JSON file, and
//! load it back. Macro bodies are stored as key descriptions, so the file can be read
//! and edited by hand:
//!
//! ```json
//! {
//!   "macros": [{ "keys": "C-a <f3> . SPC C-n", "counter": 0, "format": "%d" }],
//!   "counter_defaults": { "start": 1, "format": "%d" },
//!   "named": {},
//!   "registers": { "registers": {} }
//! }
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use miette::{IntoDiagnostic, WrapErr};
use serde::{Deserialize, Serialize};

use crate::{CounterDefaults, CounterError, CounterFormat, CounterRegisters,
            DEBUG_KMACRO_MOD, KeyDescriptionError, KeyboardMacro, MacroSession,
            parse_key_description};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum PersistenceError {
    #[error("Invalid key description {keys:?} in saved macro {entry}")]
    #[diagnostic(
        code(r3bl_kmacro::persistence::invalid_keys),
        help("Fix or remove the entry in the ring file")
    )]
    InvalidKeys {
        entry: String,
        keys: String,
        #[source]
        #[diagnostic_source]
        source: KeyDescriptionError,
    },

    #[error("Invalid counter format in saved macro {entry}")]
    #[diagnostic(code(r3bl_kmacro::persistence::invalid_format))]
    InvalidFormat {
        entry: String,
        #[source]
        #[diagnostic_source]
        source: CounterError,
    },
}

/// One saved macro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroEntry {
    pub keys: String,
    pub counter: i64,
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&KeyboardMacro> for MacroEntry {
    fn from(it: &KeyboardMacro) -> Self {
        Self {
            keys: it.describe(),
            counter: it.counter(),
            format: it.format().to_string(),
            name: it.name().map(ToString::to_string),
        }
    }
}

impl MacroEntry {
    /// # Errors
    ///
    /// Returns an error if the keys or the format don't parse. `entry` names this entry
    /// in the error.
    pub fn try_into_macro(&self, entry: &str) -> Result<KeyboardMacro, PersistenceError> {
        let keys =
            parse_key_description(&self.keys).map_err(|source| {
                PersistenceError::InvalidKeys {
                    entry: entry.to_string(),
                    keys: self.keys.clone(),
                    source,
                }
            })?;
        let format = CounterFormat::parse(&self.format).map_err(|source| {
            PersistenceError::InvalidFormat {
                entry: entry.to_string(),
                source,
            }
        })?;
        let it = KeyboardMacro::new(keys, self.counter, format);
        Ok(match &self.name {
            Some(name) => it.with_name(name),
            None => it,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroRingSnapshot {
    /// Head first.
    pub macros: Vec<MacroEntry>,
    pub counter_defaults: CounterDefaults,
    pub named: BTreeMap<String, MacroEntry>,
    pub registers: CounterRegisters,
}

impl MacroRingSnapshot {
    /// # Errors
    ///
    /// Returns an error if the file can't be written.
    pub fn save_to_file(&self, path: &Path) -> miette::Result<()> {
        let text = serde_json::to_string_pretty(self).into_diagnostic()?;
        fs::write(path, text)
            .into_diagnostic()
            .wrap_err(format!("Could not write ring file {}", path.display()))
    }

    /// Read a snapshot, and check that every macro in it is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed, or holds an invalid macro.
    pub fn load_from_file(path: &Path) -> miette::Result<Self> {
        let text = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err(format!("Could not read ring file {}", path.display()))?;
        let it: Self = serde_json::from_str(&text)
            .into_diagnostic()
            .wrap_err(format!("Could not parse ring file {}", path.display()))?;
        it.validate()?;
        Ok(it)
    }

    /// # Errors
    ///
    /// Returns the first entry that doesn't parse.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        self.ring_macros()?;
        self.named_macros()?;
        Ok(())
    }

    /// Head first.
    fn ring_macros(&self) -> Result<Vec<KeyboardMacro>, PersistenceError> {
        self.macros
            .iter()
            .enumerate()
            .map(|(index, entry)| entry.try_into_macro(&format!("#{index}")))
            .collect()
    }

    fn named_macros(&self) -> Result<BTreeMap<String, KeyboardMacro>, PersistenceError> {
        self.named
            .iter()
            .map(|(name, entry)| Ok((name.clone(), entry.try_into_macro(name)?)))
            .collect()
    }
}

impl MacroSession {
    #[must_use]
    pub fn snapshot(&self) -> MacroRingSnapshot {
        MacroRingSnapshot {
            macros: self.ring.iter().map(MacroEntry::from).collect(),
            counter_defaults: self.defaults.clone(),
            named: self
                .named
                .iter()
                .map(|(name, it)| (name.clone(), MacroEntry::from(it)))
                .collect(),
            registers: self.registers.clone(),
        }
    }

    /// Replace the ring, counter defaults, named macros and registers with the ones in
    /// `snapshot`. Nothing changes if the snapshot holds an invalid macro. Macros that
    /// don't fit in the ring are dropped from the tail.
    ///
    /// # Errors
    ///
    /// Returns the first entry that doesn't parse.
    pub fn restore_snapshot(&mut self, snapshot: MacroRingSnapshot) -> Result<(), PersistenceError> {
        let macros = snapshot.ring_macros()?;
        let named = snapshot.named_macros()?;

        self.ring.clear();
        for it in macros.into_iter().take(self.ring.capacity()).rev() {
            self.ring.push(it);
        }
        self.named = named;
        self.defaults = snapshot.counter_defaults;
        self.registers = snapshot.registers;

        DEBUG_KMACRO_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "MacroSession::restore_snapshot",
                ring_len = %self.ring.len(),
                named_len = %self.named.len()
            );
        });

        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the file can't be written.
    pub fn save_to_file(&self, path: &Path) -> miette::Result<()> {
        self.snapshot().save_to_file(path)
    }

    /// # Errors
    ///
    /// Returns an error if the file can't be read, or holds an invalid macro.
    pub fn load_from_file(&mut self, path: &Path) -> miette::Result<()> {
        let snapshot = MacroRingSnapshot::load_from_file(path)?;
        self.restore_snapshot(snapshot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;
    use crate::{KmacroConfig, try_create_temp_dir};

    fn make(description: &str, counter: i64, format: &str) -> KeyboardMacro {
        KeyboardMacro::new(
            parse_key_description(description).unwrap(),
            counter,
            CounterFormat::parse(format).unwrap(),
        )
    }

    fn ring(session: &MacroSession) -> Vec<String> {
        session.ring().iter().map(KeyboardMacro::describe).collect()
    }

    #[test]
    #[serial]
    fn test_save_and_load() {
        let dir = try_create_temp_dir().unwrap();
        let path = dir.join("ring.json");

        let mut session = MacroSession::default();
        session.ring_mut().push(make("a <f3> RET", 2, "%02d"));
        session.name_last_macro("numbered").unwrap();
        session.ring_mut().push(make("C-x C-k C-r s q M-< C-u 2 C-f", 0, "%d"));
        session.set_counter(9);
        session.save_to_register('q');
        session.save_to_file(&path).unwrap();

        let mut restored = MacroSession::default();
        restored.load_from_file(&path).unwrap();
        assert_eq!(ring(&restored), ring(&session));
        assert_eq!(restored.ring().get(1), session.ring().get(1));
        assert_eq!(
            restored.named_macro("numbered").map(KeyboardMacro::describe),
            Some("a <f3> RET".to_string())
        );
        assert_eq!(restored.counter_defaults().start, 9);
        assert_eq!(restored.registers().load('q'), Some(9));
    }

    #[test]
    fn test_snapshot_keeps_non_ascii_whitespace_keys() {
        let mut session = MacroSession::default();
        session
            .ring_mut()
            .push(make("x \u{3000} y \u{a0}", 0, "%d"));
        let snapshot: MacroRingSnapshot =
            serde_json::from_str(&serde_json::to_string(&session.snapshot()).unwrap())
                .unwrap();

        let mut restored = MacroSession::default();
        restored.restore_snapshot(snapshot).unwrap();
        assert_eq!(restored.ring().head().unwrap().keys().len(), 4);
        assert_eq!(restored.ring().head(), session.ring().head());
    }

    #[test]
    fn test_restore_into_smaller_ring_drops_tail() {
        let mut session = MacroSession::default();
        for it in ["c", "b", "a"] {
            session.ring_mut().push(make(it, 0, "%d"));
        }
        let snapshot = session.snapshot();

        let mut small = MacroSession::new(KmacroConfig::default().with_ring_max(2)).unwrap();
        small.restore_snapshot(snapshot).unwrap();
        assert_eq!(ring(&small), vec!["a", "b"]);
    }

    #[test]
    fn test_invalid_entries_are_rejected() {
        let mut snapshot = MacroRingSnapshot::default();
        snapshot.macros.push(MacroEntry {
            keys: "C-".into(),
            counter: 0,
            format: "%d".into(),
            name: None,
        });
        let mut session = MacroSession::default();
        assert!(matches!(
            session.restore_snapshot(snapshot.clone()),
            Err(PersistenceError::InvalidKeys { .. })
        ));

        snapshot.macros[0].keys = "a".into();
        snapshot.macros[0].format = "%d%d".into();
        assert!(matches!(
            snapshot.validate(),
            Err(PersistenceError::InvalidFormat { .. })
        ));
        assert!(session.ring().is_empty());
    }

    #[test]
    #[serial]
    fn test_load_missing_or_bad_file() {
        let dir = try_create_temp_dir().unwrap();
        assert!(MacroRingSnapshot::load_from_file(&dir.join("missing.json")).is_err());

        let path = dir.join("bad.json");
        fs::write(&path, r#"{ "macros": [{ "keys": "<nope>", "counter": 0, "format": "%d" }] }"#)
            .unwrap();
        assert!(MacroRingSnapshot::load_from_file(&path).is_err());
    }
}
