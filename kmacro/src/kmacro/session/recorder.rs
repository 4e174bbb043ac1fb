// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{MacroSession, Recording};
use crate::{CommandDispatcher, DEBUG_KMACRO_MOD, HostContext, Invocation, KeyboardMacro,
            MacroWarning, format_key_description};

impl MacroSession {
    /// Start defining a keyboard macro. Keys handled by [`MacroSession::handle_key`]
    /// are recorded until [`MacroSession::end_recording`].
    ///
    /// With `append`, the new keys are added to the end of the ring head, and when
    /// `replay_first` is also set the head is played once before recording resumes.
    /// With no macro in the ring, `append` starts a fresh definition.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::AlreadyDefining`] if a macro is already being defined.
    pub fn start_recording<D: CommandDispatcher>(
        &mut self,
        append: bool,
        replay_first: bool,
        host: &mut HostContext<'_, D>,
    ) -> Result<(), MacroWarning> {
        if self.is_recording() {
            return self.reported(Err(MacroWarning::AlreadyDefining));
        }

        let head = if append { self.ring.head().ok().cloned() } else { None };

        let recording = match head {
            Some(head) => {
                self.counter.reset(head.counter(), head.format().clone());
                if replay_first {
                    self.play(&head, 1, host);
                }
                Recording {
                    keys: head.keys().into(),
                    is_append: true,
                }
            }
            None => {
                self.counter
                    .reset(self.defaults.start, self.defaults.format.clone());
                Recording::default()
            }
        };

        DEBUG_KMACRO_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "MacroSession::start_recording",
                append = %recording.is_append,
                keys = %format_key_description(&recording.keys),
                counter = %self.counter.value()
            );
        });

        self.inform(if recording.is_append {
            "Appending to keyboard macro..."
        } else {
            "Defining keyboard macro..."
        });
        self.recording = Some(recording);
        Ok(())
    }

    /// Stop defining, and push the new macro onto the ring (or replace the head, when
    /// appending). The macro remembers the counter value and format as they are now.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::NotDefining`], or [`MacroWarning::EmptyMacroDiscarded`] if no
    /// keys were recorded. In that case the ring doesn't change.
    pub fn end_recording(&mut self) -> Result<(), MacroWarning> {
        let Some(recording) = self.recording.take() else {
            return self.reported(Err(MacroWarning::NotDefining));
        };

        if recording.keys.is_empty() {
            return self.reported(Err(MacroWarning::EmptyMacroDiscarded));
        }

        let it = KeyboardMacro::new(
            recording.keys,
            self.counter.value(),
            self.counter.format().clone(),
        );

        DEBUG_KMACRO_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "MacroSession::end_recording",
                keys = %it.describe(),
                counter = %it.counter(),
                append = %recording.is_append
            );
        });

        if recording.is_append {
            self.ring.pop().ok();
        }
        self.ring.push(it);
        self.inform("Keyboard macro defined");
        Ok(())
    }

    /// Throw away the macro being defined. The ring doesn't change.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::NotDefining`] if no macro is being defined.
    pub fn cancel_recording(&mut self) -> Result<(), MacroWarning> {
        if self.recording.take().is_none() {
            return self.reported(Err(MacroWarning::NotDefining));
        }
        self.report(MacroWarning::RecordingCancelled);
        Ok(())
    }

    /// Add the keys of a command that was just read to the macro being defined.
    pub(crate) fn record(&mut self, invocation: &Invocation) {
        if let Some(recording) = self.recording.as_mut() {
            recording.keys.extend_from_slice(&invocation.keys);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Keymap, StatusMessage, TextBuffer, TextBufferCommands,
                parse_key_description};

    fn feed(
        session: &mut MacroSession,
        description: &str,
        keymap: &Keymap,
        buffer: &mut TextBuffer,
    ) {
        let mut dispatcher = TextBufferCommands;
        let mut host = HostContext::new(keymap, &mut dispatcher, buffer);
        for key in parse_key_description(description).unwrap() {
            session.handle_key(key, &mut host);
        }
    }

    #[test]
    fn test_record_then_push() {
        let keymap = TextBufferCommands::default_keymap();
        let mut buffer = TextBuffer::default();
        let mut session = MacroSession::default();

        feed(&mut session, "C-x ( h i C-f C-x )", &keymap, &mut buffer);
        assert!(!session.is_recording());
        assert_eq!(buffer.content(), "hi");
        assert_eq!(session.ring().len(), 1);
        assert_eq!(session.ring().head().unwrap().describe(), "h i C-f");
        assert_eq!(
            session.take_status(),
            Some(StatusMessage::Info("Keyboard macro defined".into()))
        );
    }

    #[test]
    fn test_empty_recording_is_discarded() {
        let keymap = TextBufferCommands::default_keymap();
        let mut buffer = TextBuffer::default();
        let mut session = MacroSession::default();

        feed(&mut session, "C-x ( C-x )", &keymap, &mut buffer);
        assert!(session.ring().is_empty());
        assert_eq!(
            session.take_status(),
            Some(StatusMessage::Warning(MacroWarning::EmptyMacroDiscarded))
        );
    }

    #[test]
    fn test_state_errors() {
        let keymap = TextBufferCommands::default_keymap();
        let mut buffer = TextBuffer::default();
        let mut session = MacroSession::default();

        assert_eq!(session.end_recording(), Err(MacroWarning::NotDefining));
        assert_eq!(session.cancel_recording(), Err(MacroWarning::NotDefining));

        feed(&mut session, "C-x ( a C-x (", &keymap, &mut buffer);
        assert!(session.is_recording());
        assert_eq!(
            session.take_status(),
            Some(StatusMessage::Warning(MacroWarning::AlreadyDefining))
        );
        assert_eq!(session.recorded_keys().map(format_key_description), Some("a".into()));

        feed(&mut session, "C-x e", &keymap, &mut buffer);
        assert_eq!(
            session.take_status(),
            Some(StatusMessage::Warning(MacroWarning::CallWhileDefining))
        );
        assert!(session.is_recording());
    }

    #[test]
    fn test_keyboard_quit_cancels_recording() {
        let keymap = TextBufferCommands::default_keymap();
        let mut buffer = TextBuffer::default();
        let mut session = MacroSession::default();

        feed(&mut session, "C-x ( a b C-g", &keymap, &mut buffer);
        assert!(!session.is_recording());
        assert!(session.ring().is_empty());
        assert_eq!(buffer.content(), "ab");
        assert_eq!(
            session.take_status(),
            Some(StatusMessage::Warning(MacroWarning::RecordingCancelled))
        );
    }

    #[test]
    fn test_undefined_keys_are_not_recorded() {
        let keymap = TextBufferCommands::default_keymap();
        let mut buffer = TextBuffer::default();
        let mut session = MacroSession::default();

        feed(&mut session, "C-x ( a C-x z b C-x )", &keymap, &mut buffer);
        assert_eq!(session.ring().head().unwrap().describe(), "a b");
    }

    #[test]
    fn test_append_with_and_without_replay() {
        let keymap = TextBufferCommands::default_keymap();
        let mut buffer = TextBuffer::default();
        let mut session = MacroSession::default();

        feed(&mut session, "C-x ( a C-x )", &keymap, &mut buffer);
        feed(&mut session, "C-u C-x ( b C-x )", &keymap, &mut buffer);
        assert_eq!(buffer.content(), "aab");
        assert_eq!(session.ring().len(), 1);
        assert_eq!(session.ring().head().unwrap().describe(), "a b");

        feed(&mut session, "C-u C-u C-x ( c C-x )", &keymap, &mut buffer);
        assert_eq!(buffer.content(), "aabc");
        assert_eq!(session.ring().head().unwrap().describe(), "a b c");
    }

    #[test]
    fn test_macro_stores_counter_at_end() {
        let keymap = TextBufferCommands::default_keymap();
        let mut buffer = TextBuffer::default();
        let mut session = MacroSession::default();

        feed(&mut session, "M-5 C-x ( <f3> <f3> C-x )", &keymap, &mut buffer);
        assert_eq!(buffer.content(), "56");
        let head = session.ring().head().unwrap();
        assert_eq!(head.counter(), 7);
        assert_eq!(head.describe(), "<f3> <f3>");
    }
}
