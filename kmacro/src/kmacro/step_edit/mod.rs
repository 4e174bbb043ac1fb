// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Step through a keyboard macro one command at a time, and edit it on the way.
//!
//! [`StepEditor`] is a plain state machine: it is fed [`StepInput`]s and answers with
//! a [`StepOutcome`]. It never runs a command itself. Commands it wants to run come
//! back in [`StepOutcome::emitted`], and the caller feeds the result back in with
//! [`StepInput::Executed`]. [`crate::MacroSession::step_edit`] is the driver that does
//! this against a live host.
//!
//! ```text
//!              response                    Executed
//!   ┌──────────┐ execute  ┌───────────┐  ┌──────────┐
//!   │ Querying ├─────────►│ Executing ├─►│ Querying │ ...
//!   └──┬───┬───┘          └───────────┘  └──────────┘
//!      │   │ insert / replace / append
//!      │   ▼
//!      │ ┌───────────┐ terminator or C-g
//!      │ │ Inserting ├──────────────────► Querying
//!      │ └───────────┘
//!      │ quit / skip rest / end of macro
//!      ▼
//!   ┌──────┐
//!   │ Done │
//!   └──────┘
//! ```

// Attach sources.
pub mod response_keymap;
pub mod step_edit_driver;
pub mod step_editor;
pub mod step_response;

// Re-export.
pub use response_keymap::*;
pub use step_edit_driver::*;
pub use step_editor::*;
pub use step_response::*;
