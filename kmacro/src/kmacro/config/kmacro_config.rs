// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::BTreeMap,
          fs,
          path::{Path, PathBuf}};

use dirs::config_dir;
use miette::{IntoDiagnostic, WrapErr};
use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::{CONFIG_FILE_NAME, CONFIG_FOLDER_NAME, CounterDefaults, CounterFormat,
            DEBUG_KMACRO_MOD, DEFAULT_COUNTER_FORMAT, DEFAULT_COUNTER_START,
            DEFAULT_INSERT_TERMINATOR, DEFAULT_MAX_UNBOUNDED_REPEAT, DEFAULT_RING_MAX,
            ResponseKeymap, StepResponse};

/// How the counter behaves across the iterations of one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CounterIterationMode {
    /// Every iteration starts from the counter value and format stored in the macro.
    #[default]
    Restore,
    /// The counter keeps counting across iterations, and the final value is stored
    /// back into the macro at the head of the ring.
    Continue,
}

/// Settings for a [`crate::MacroSession`]. Every field has a default, so a config
/// file only needs the fields it changes.
///
/// ```json
/// {
///   "ring_max": 16,
///   "default_counter_format": "%03d",
///   "step_edit_keys": { "x": "execute" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KmacroConfig {
    pub ring_max: usize,
    pub default_counter_format: String,
    pub default_counter_start: i64,
    /// Iterations a replay with a repeat count of 0 runs before it gives up.
    pub max_unbounded_repeat: usize,
    pub counter_iteration_mode: CounterIterationMode,
    pub insert_terminator: String,
    /// Key description to response. Applied on top of the default response keys.
    pub step_edit_keys: BTreeMap<String, StepResponse>,
}

impl Default for KmacroConfig {
    fn default() -> Self {
        Self {
            ring_max: DEFAULT_RING_MAX,
            default_counter_format: DEFAULT_COUNTER_FORMAT.to_string(),
            default_counter_start: DEFAULT_COUNTER_START,
            max_unbounded_repeat: DEFAULT_MAX_UNBOUNDED_REPEAT,
            counter_iteration_mode: CounterIterationMode::default(),
            insert_terminator: DEFAULT_INSERT_TERMINATOR.to_string(),
            step_edit_keys: BTreeMap::new(),
        }
    }
}

impl KmacroConfig {
    #[must_use]
    pub fn with_ring_max(mut self, ring_max: usize) -> Self {
        self.ring_max = ring_max;
        self
    }

    #[must_use]
    pub fn with_default_counter_format(mut self, format: impl Into<String>) -> Self {
        self.default_counter_format = format.into();
        self
    }

    #[must_use]
    pub fn with_default_counter_start(mut self, start: i64) -> Self {
        self.default_counter_start = start;
        self
    }

    #[must_use]
    pub fn with_max_unbounded_repeat(mut self, limit: usize) -> Self {
        self.max_unbounded_repeat = limit;
        self
    }

    #[must_use]
    pub fn with_counter_iteration_mode(mut self, mode: CounterIterationMode) -> Self {
        self.counter_iteration_mode = mode;
        self
    }

    #[must_use]
    pub fn with_insert_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.insert_terminator = terminator.into();
        self
    }

    #[must_use]
    pub fn with_step_edit_key(
        mut self,
        description: impl Into<String>,
        response: StepResponse,
    ) -> Self {
        self.step_edit_keys.insert(description.into(), response);
        self
    }

    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ring_max == 0 {
            return Err(ConfigError::InvalidRingMax);
        }
        if self.max_unbounded_repeat == 0 {
            return Err(ConfigError::InvalidMaxUnboundedRepeat);
        }
        self.counter_defaults()?;
        self.response_keymap()?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidCounterFormat`] if the default format doesn't parse.
    pub fn counter_defaults(&self) -> Result<CounterDefaults, ConfigError> {
        let format = CounterFormat::parse(&self.default_counter_format)
            .map_err(|source| ConfigError::InvalidCounterFormat { source })?;
        Ok(CounterDefaults {
            start: self.default_counter_start,
            format,
        })
    }

    /// # Errors
    ///
    /// Returns an error if a step edit key or the insert terminator is invalid.
    pub fn response_keymap(&self) -> Result<ResponseKeymap, ConfigError> {
        ResponseKeymap::try_with_overrides(&self.step_edit_keys, &self.insert_terminator)
    }

    /// Read and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read, isn't valid JSON, or doesn't
    /// validate.
    pub fn load_from_file(path: &Path) -> miette::Result<Self> {
        let text = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err(format!("Could not read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .into_diagnostic()
            .wrap_err(format!("Could not parse config file {}", path.display()))?;
        config.validate()?;

        DEBUG_KMACRO_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "KmacroConfig::load_from_file",
                path = %path.display(),
                config = ?config
            );
        });

        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the file can't be written.
    pub fn save_to_file(&self, path: &Path) -> miette::Result<()> {
        let text = serde_json::to_string_pretty(self).into_diagnostic()?;
        fs::write(path, text)
            .into_diagnostic()
            .wrap_err(format!("Could not write config file {}", path.display()))
    }

    /// The config file in the per user config folder, if it exists. Otherwise the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be loaded.
    pub fn load_from_config_folder() -> miette::Result<Self> {
        match try_get_config_file_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// This is where the config folder is, eg: `~/.config/r3bl-kmacro` on Linux.
#[must_use]
pub fn try_get_config_folder_path() -> Option<PathBuf> {
    Some(config_dir()?.join(CONFIG_FOLDER_NAME))
}

/// This is where the config file is stored.
#[must_use]
pub fn try_get_config_file_path() -> Option<PathBuf> {
    Some(try_get_config_folder_path()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::try_create_temp_dir;

    #[test]
    fn test_defaults_validate() {
        let config = KmacroConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ring_max, 8);
        assert_eq!(config.counter_defaults().unwrap(), CounterDefaults::default());
    }

    #[test]
    fn test_validate_rejects() {
        assert_eq!(
            KmacroConfig::default().with_ring_max(0).validate(),
            Err(ConfigError::InvalidRingMax)
        );
        assert!(matches!(
            KmacroConfig::default()
                .with_default_counter_format("%d %d")
                .validate(),
            Err(ConfigError::InvalidCounterFormat { .. })
        ));
        assert!(matches!(
            KmacroConfig::default()
                .with_step_edit_key("C-j", StepResponse::Skip)
                .validate(),
            Err(ConfigError::TerminatorIsBound { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: KmacroConfig = serde_json::from_str(
            r#"{ "ring_max": 2, "counter_iteration_mode": "continue",
                 "step_edit_keys": { "x": "execute" } }"#,
        )
        .unwrap();
        assert_eq!(config.ring_max, 2);
        assert_eq!(config.counter_iteration_mode, CounterIterationMode::Continue);
        assert_eq!(config.default_counter_format, "%d");
        assert_eq!(
            config.step_edit_keys.get("x"),
            Some(&StepResponse::Execute)
        );
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = try_create_temp_dir().unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        let config = KmacroConfig::default()
            .with_default_counter_format("%02d")
            .with_default_counter_start(5);
        config.save_to_file(&path).unwrap();
        assert_eq!(KmacroConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_invalid_file_fails() {
        let dir = try_create_temp_dir().unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "ring_max": 0 }"#).unwrap();
        assert!(KmacroConfig::load_from_file(&path).is_err());
        assert!(KmacroConfig::load_from_file(&dir.join("missing.json")).is_err());
    }
}
