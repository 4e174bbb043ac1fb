// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing::dispatcher;
use tracing_core::LevelFilter;

use super::TracingConfig;

/// Global default subscriber, which once set, can't be unset or changed. This is what
/// the `kmc` binary uses.
///
/// Logging is **DISABLED** by **default**. If `options` resolves to
/// [`LevelFilter::OFF`] then nothing is installed, and the [tracing::debug!] etc. calls
/// in this crate are no-ops.
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber is
/// already set.
pub fn try_initialize_logging_global(
    options: impl Into<TracingConfig>,
) -> miette::Result<()> {
    let it: TracingConfig = options.into();

    // Early return if the level filter is off.
    if matches!(it.get_level_filter(), LevelFilter::OFF) {
        return Ok(());
    }

    it.install_global()
}

/// Thread local subscriber, which is great for tests, since each test can have its own.
/// Logging stops when the returned guard is dropped.
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_initialize_logging_thread_local(
    options: impl Into<TracingConfig>,
) -> miette::Result<Option<dispatcher::DefaultGuard>> {
    let it: TracingConfig = options.into();

    // Early return if the level filter is off.
    if matches!(it.get_level_filter(), LevelFilter::OFF) {
        return Ok(None);
    }

    it.install_thread_local().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayPreference, WriterConfig};

    #[test]
    fn test_off_installs_nothing() {
        let config = TracingConfig {
            writer_config: WriterConfig::Display(DisplayPreference::Stderr),
            level_filter: LevelFilter::OFF,
        };
        assert!(try_initialize_logging_thread_local(config).unwrap().is_none());
    }
}
