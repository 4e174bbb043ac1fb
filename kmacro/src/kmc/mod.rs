// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Support code for the `kmc` binary, which drives a [`crate::MacroSession`] over a
//! [`crate::TextBuffer`] from the command line. Keys are given as Emacs key
//! descriptions, eg: `kmc play --keys "C-x ( a b C-x ) C-u 3 C-x e"`.

// Attach sources.
pub mod clap_config;
pub mod launcher;
pub mod ui_str;

// Re-export.
pub use clap_config::*;
pub use launcher::*;
pub use ui_str::*;
