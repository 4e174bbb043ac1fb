// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Key events as recorded in a keyboard macro, and their textual form.

// Attach sources.
pub mod convert_key_event;
pub mod key_description;
pub mod keypress;
pub mod modifier_keys_mask;

// Re-export.
pub use convert_key_event::*;
pub use key_description::*;
pub use keypress::*;
pub use modifier_keys_mask::*;
