// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod counter_error;
pub mod counter_format;
pub mod counter_registers;
pub mod macro_counter;

// Re-export.
pub use counter_error::*;
pub use counter_format::*;
pub use counter_registers::*;
pub use macro_counter::*;
