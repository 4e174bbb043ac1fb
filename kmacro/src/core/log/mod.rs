// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Structured logging for the keyboard macro facility, built on [tracing]. Logging is
//! disabled unless one of [`try_initialize_logging_global`] or
//! [`try_initialize_logging_thread_local`] is called.

// Attach sources.
pub mod custom_event_formatter;
pub mod log_public_api;
pub mod rolling_file_appender_impl;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use custom_event_formatter::*;
pub use log_public_api::*;
pub use rolling_file_appender_impl::*;
pub use tracing_config::*;
pub use tracing_init::*;
