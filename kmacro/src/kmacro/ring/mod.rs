// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod keyboard_macro;
pub mod macro_ring;

// Re-export.
pub use keyboard_macro::*;
pub use macro_ring::*;
