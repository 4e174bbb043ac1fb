// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Add;

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "kmacro_log.txt";

/// Where the logs go, and how verbose they are. Many types convert into this (see the
/// [From] impls below) and two configs can be merged with `+`, so the logging entry
/// points take an `impl Into<TracingConfig>`.
///
/// ```no_run
/// use r3bl_kmacro::{DisplayPreference, TracingConfig, WriterConfig,
///                   try_initialize_logging_global};
///
/// let level: TracingConfig = tracing_core::LevelFilter::DEBUG.into();
/// let display: TracingConfig = DisplayPreference::Stderr.into();
/// try_initialize_logging_global(level + display).ok();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// The [String] is the path of the log file, eg: `/tmp/kmacro_log.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    pub fn new_file(filename: Option<String>, level_filter: LevelFilter) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self {
        Self {
            level_filter: level.into(),
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<DisplayPreference> for TracingConfig {
    fn from(preferred_display: DisplayPreference) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config: WriterConfig::Display(preferred_display),
        }
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

/// The more verbose level filter wins.
impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

/// The `rhs` clobbers `self` where both are set, ie, the `rhs` has higher specificity.
/// - `{a: "foo"} + {a: "bar"} = {a: "bar"}`.
/// - `{a: None } + {a: "bar"} = {a: "bar"}`.
/// - `{a: "foo"} + {a: None } = {a: "foo"}`.
impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{Display, DisplayAndFile, File, None};

        match (self, rhs) {
            // No collision merge.
            (None, wc_rhs) => wc_rhs,
            (wc_lhs, None) => wc_lhs,
            (Display(dp_lhs), File(f_rhs)) => DisplayAndFile(dp_lhs, f_rhs),
            (File(f_lhs), Display(dp_rhs)) => DisplayAndFile(dp_rhs, f_lhs),

            // Collision (rhs has higher specificity).
            (Display(_), Display(dp_rhs)) => Display(dp_rhs),
            (File(_), File(f_rhs)) => File(f_rhs),
            (Display(_) | File(_) | DisplayAndFile(..), DisplayAndFile(dp_rhs, f_rhs)) => {
                DisplayAndFile(dp_rhs, f_rhs)
            }
            (DisplayAndFile(_, f_lhs), Display(dp_rhs)) => DisplayAndFile(dp_rhs, f_lhs),
            (DisplayAndFile(dp_lhs, _), File(f_rhs)) => DisplayAndFile(dp_lhs, f_rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_add_writer_configs() {
        let fname = "log.txt".to_string();
        let none = WriterConfig::None;
        let stdout = WriterConfig::Display(DisplayPreference::Stdout);
        let stderr = WriterConfig::Display(DisplayPreference::Stderr);
        let file = WriterConfig::File(fname.clone());
        let stdout_and_file =
            WriterConfig::DisplayAndFile(DisplayPreference::Stdout, fname.clone());
        let stderr_and_file =
            WriterConfig::DisplayAndFile(DisplayPreference::Stderr, fname.clone());

        // No collision merge.
        assert_eq!(none.clone() + none.clone(), none);
        assert_eq!(stdout.clone() + none.clone(), stdout);
        assert_eq!(none.clone() + file.clone(), file);
        assert_eq!(stdout.clone() + file.clone(), stdout_and_file);
        assert_eq!(file.clone() + stderr.clone(), stderr_and_file);

        // Collision (rhs has higher specificity).
        assert_eq!(stdout.clone() + stderr.clone(), stderr);
        assert_eq!(stdout_and_file.clone() + stderr.clone(), stderr_and_file);
        assert_eq!(file.clone() + stdout_and_file.clone(), stdout_and_file);
        assert_eq!(
            stdout_and_file.clone() + WriterConfig::File("other.txt".into()),
            WriterConfig::DisplayAndFile(DisplayPreference::Stdout, "other.txt".into())
        );
    }

    #[test]
    fn test_add_tracing_configs_keeps_most_verbose_level() {
        let lhs: TracingConfig = LevelFilter::WARN.into();
        let rhs: TracingConfig = DisplayPreference::Stderr.into();
        let it = lhs + rhs;
        assert_eq!(it.level_filter, LevelFilter::DEBUG);
        assert_eq!(
            it.writer_config,
            WriterConfig::DisplayAndFile(
                DisplayPreference::Stderr,
                DEFAULT_LOG_FILE_NAME.to_string()
            )
        );
    }
}
