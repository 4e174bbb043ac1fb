// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod config_error;
pub mod kmacro_config;

// Re-export.
pub use config_error::*;
pub use kmacro_config::*;
