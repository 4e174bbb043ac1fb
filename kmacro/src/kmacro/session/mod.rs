// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`MacroSession`] is split by concern: the session state and the counter API, the
//! recorder, the player, and the key loop that ties them to the host.

// Attach sources.
pub mod key_loop;
pub mod macro_session;
pub mod player;
pub mod recorder;

// Re-export.
pub use key_loop::*;
pub use macro_session::*;
pub use player::*;
pub use recorder::*;
