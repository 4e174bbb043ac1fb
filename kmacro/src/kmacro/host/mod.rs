// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The narrow contracts between the macro core and the editor it is embedded in, plus
//! small in-memory implementations used by tests and the `kmc` binary.

// Attach sources.
pub mod host_context;
pub mod host_traits;
pub mod scripted_input;
pub mod text_buffer;
pub mod text_buffer_commands;

// Re-export.
pub use host_context::*;
pub use host_traits::*;
pub use scripted_input::*;
pub use text_buffer::*;
pub use text_buffer_commands::*;
