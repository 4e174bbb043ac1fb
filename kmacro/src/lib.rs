// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl_kmacro
//!
//! Keyboard macros for terminal editors, modeled on the Emacs `kmacro` facility.
//!
//! A host editor feeds every [`KeyPress`] it reads into a [`MacroSession`]. The session
//! resolves key sequences against a [`Keymap`], records them while a macro is being
//! defined, and dispatches the resulting commands to the host through the
//! [`CommandDispatcher`] trait. Recorded macros land on a bounded [`MacroRing`] and can
//! be replayed with a repeat count, or stepped through interactively with a
//! [`StepEditor`].
//!
//! ```text
//! ┌─────────────┐  KeyPress   ┌──────────────┐  Invocation  ┌───────────────────┐
//! │ input event ├────────────►│ MacroSession ├─────────────►│ CommandDispatcher │
//! │   source    │             │  (recorder)  │              │      (host)       │
//! └─────────────┘             └──────┬───────┘              └─────────┬─────────┘
//!                                    │ end-recording                  │ insert text
//!                                    ▼                                ▼
//!                             ┌──────────────┐  counter     ┌───────────────────┐
//!                             │  MacroRing   │─────────────►│  EditingSurface   │
//!                             │ (player/step)│              │                   │
//!                             └──────────────┘              └───────────────────┘
//! ```
//!
//! Nothing in this crate returns an error out of a replay. Conditions such as an empty
//! ring, a command that rings the bell, or an attempt to start recording twice are
//! reported as [`MacroWarning`]s via [`MacroSession::take_status`], and logged with
//! [`tracing`].
//!
//! The main modules are:
//! - [`mod@core`]: key events, key descriptions, logging setup, and generic helpers.
//! - [`mod@kmacro`]: the recorder, counter, ring, player and step editor.
//! - [`mod@kmc`]: support code for the `kmc` command line driver.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod kmacro;
pub mod kmc;

// Re-export stable public API using glob imports for ergonomic, flat API surface.
pub use crate::core::*;
pub use crate::kmacro::*;
pub use crate::kmc::*;
