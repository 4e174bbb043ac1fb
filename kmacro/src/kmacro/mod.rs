// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The keyboard macro facility.
//!
//! ```text
//!                      ┌──────────────┐ keys  ┌─────────────────────┐
//!   InputEventSource ─►│ MacroSession │──────►│ CommandDispatcher   │
//!                      │  handle_key  │       │ (host commands)     │
//!                      └──┬───┬────┬──┘       └─────────┬───────────┘
//!              record ◄───┘   │    └──► step_edit       │ insert_at_point
//!                 │           ▼                         ▼
//!                 ▼      MacroCounter ──────────► EditingSurface
//!             MacroRing ──► play
//! ```
//!
//! The host owns one [`MacroSession`] and hands it each [`crate::KeyPress`] along with
//! a [`HostContext`] that borrows its [`Keymap`], [`CommandDispatcher`] and
//! [`EditingSurface`]. There is no global state, and nothing here spawns threads.

// Attach sources.
pub mod config;
pub mod counter;
pub mod global_constants;
pub mod host;
pub mod keymap;
pub mod macro_warning;
pub mod persistence;
pub mod ring;
pub mod session;
pub mod step_edit;

// Re-export.
pub use config::*;
pub use counter::*;
pub use global_constants::*;
pub use host::*;
pub use keymap::*;
pub use macro_warning::*;
pub use persistence::*;
pub use ring::*;
pub use session::*;
pub use step_edit::*;
