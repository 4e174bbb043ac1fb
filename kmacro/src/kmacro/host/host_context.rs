// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::CommandDispatcher;
use crate::Keymap;

/// Borrows the host collaborators for the duration of one session operation.
///
/// ```rust
/// use r3bl_kmacro::*;
///
/// let keymap = TextBufferCommands::default_keymap();
/// let mut dispatcher = TextBufferCommands;
/// let mut buffer = TextBuffer::default();
/// let mut session = MacroSession::default();
///
/// let mut host = HostContext::new(&keymap, &mut dispatcher, &mut buffer);
/// for key in parse_key_description("C-x ( a b C-x ) C-x e").unwrap() {
///     session.handle_key(key, &mut host);
/// }
/// assert_eq!(buffer.content(), "abab");
/// ```
pub struct HostContext<'a, D: CommandDispatcher> {
    pub keymap: &'a Keymap,
    pub dispatcher: &'a mut D,
    pub surface: &'a mut D::Surface,
}

impl<'a, D: CommandDispatcher> HostContext<'a, D> {
    pub fn new(
        keymap: &'a Keymap,
        dispatcher: &'a mut D,
        surface: &'a mut D::Surface,
    ) -> Self {
        Self {
            keymap,
            dispatcher,
            surface,
        }
    }
}
