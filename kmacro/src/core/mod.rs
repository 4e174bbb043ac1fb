// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Building blocks that don't know anything about keyboard macros: key events and
//! their textual descriptions, a bounded ring, logging, and error reporting setup.

// Attach sources.
pub mod common;
pub mod input;
pub mod log;

// Re-export.
pub use common::*;
pub use input::*;
pub use log::*;
