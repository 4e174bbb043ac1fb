// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod command_accumulator;
pub mod keymap_struct;
pub mod macro_command;
pub mod prefix_arg;

// Re-export.
pub use command_accumulator::*;
pub use keymap_struct::*;
pub use macro_command::*;
pub use prefix_arg::*;
