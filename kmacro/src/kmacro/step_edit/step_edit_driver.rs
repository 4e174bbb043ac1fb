// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ResponseKeymap, StepEditor, StepInput, StepResponse, StepState};
use crate::{CommandDispatcher, DEBUG_KMACRO_STEP_EDIT, DispatchOutcome, ExecOutcome,
            HostContext, InputEventSource, KeyboardMacro, MacroSession, MacroWarning,
            format_key_description};

/// How a step edit session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEditReport {
    /// The edited macro was pushed onto the ring, in front of the original.
    pub replaced: bool,
    /// The edited body, as a key description.
    pub keys: String,
    pub commands_executed: usize,
}

impl MacroSession {
    /// Step through the ring head, reading responses (and inserted commands) from
    /// `input` and running commands against `host`. Running out of input is the same
    /// as quitting.
    ///
    /// Unless the user quit, an edited macro that differs from the original is pushed
    /// onto the ring, so it becomes the head and the original is second.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::CallWhileDefining`] or [`MacroWarning::NoMacroDefined`].
    pub fn step_edit<D: CommandDispatcher>(
        &mut self,
        input: &mut impl InputEventSource,
        responses: &ResponseKeymap,
        host: &mut HostContext<'_, D>,
    ) -> Result<StepEditReport, MacroWarning> {
        self.ensure_not_recording()?;
        let result = self.ring.head().cloned();
        let original = self.reported(result)?;

        let keymap = host.keymap;
        let mut editor = StepEditor::new(original.keys(), keymap, responses);
        let mut commands_executed = 0;

        self.play_depth += 1;
        self.counter
            .reset(original.counter(), original.format().clone());

        let mut outcome = editor.start();
        loop {
            if let Some(message) = outcome.message.take() {
                self.inform(message);
            }

            if let Some(invocation) = outcome.emitted.take() {
                let result = match self.dispatch(&invocation, host) {
                    DispatchOutcome::Success => {
                        commands_executed += 1;
                        ExecOutcome::Success
                    }
                    DispatchOutcome::Bell
                    | DispatchOutcome::CounterConditionMet
                    | DispatchOutcome::StepEditRequested => ExecOutcome::Bell,
                };
                outcome = editor.next(StepInput::Executed(result));
                continue;
            }

            if outcome.state == StepState::Done {
                break;
            }

            DEBUG_KMACRO_STEP_EDIT.then(|| {
                if let Some(prompt) = editor.prompt() {
                    // % is Display, ? is Debug.
                    tracing::debug!(message = "MacroSession::step_edit", prompt = %prompt);
                }
            });

            let next = match input.next_event() {
                Some(key) => StepInput::Key(key),
                None => StepInput::Response(StepResponse::Quit),
            };
            outcome = editor.next(next);
        }
        self.play_depth -= 1;

        let result = editor.into_result();
        let keys = format_key_description(&result.keys);
        let replaced = result.replace && result.changed && !result.keys.is_empty();

        if replaced {
            self.ring.push(KeyboardMacro::new(
                result.keys,
                original.counter(),
                original.format().clone(),
            ));
            self.inform("Keyboard macro edited");
        } else if result.replace && result.changed {
            self.inform("Edited keyboard macro is empty, keeping the original");
        }

        DEBUG_KMACRO_STEP_EDIT.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "MacroSession::step_edit -> done",
                original = %original.describe(),
                edited = %keys,
                replaced = %replaced
            );
        });

        Ok(StepEditReport {
            replaced,
            keys,
            commands_executed,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CounterFormat, ScriptedInput, StatusMessage, TextBuffer, TextBufferCommands,
                parse_key_description};

    fn session_with(body: &str) -> MacroSession {
        let mut session = MacroSession::default();
        session.ring_mut().push(KeyboardMacro::new(
            parse_key_description(body).unwrap(),
            0,
            CounterFormat::default(),
        ));
        session
    }

    fn run(
        session: &mut MacroSession,
        responses: &str,
        buffer: &mut TextBuffer,
    ) -> Result<StepEditReport, MacroWarning> {
        let keymap = TextBufferCommands::default_keymap();
        let mut dispatcher = TextBufferCommands;
        let mut host = HostContext::new(&keymap, &mut dispatcher, buffer);
        let mut input = ScriptedInput::from_description(responses).unwrap();
        session.step_edit(&mut input, &ResponseKeymap::default(), &mut host)
    }

    fn ring(session: &MacroSession) -> Vec<String> {
        session.ring().iter().map(KeyboardMacro::describe).collect()
    }

    #[test]
    fn test_edited_macro_becomes_head() {
        let mut session = session_with("a b c");
        let mut buffer = TextBuffer::default();
        let report = run(&mut session, "n SPC C-k", &mut buffer).unwrap();
        assert_eq!(
            report,
            StepEditReport {
                replaced: true,
                keys: "b".into(),
                commands_executed: 1,
            }
        );
        assert_eq!(buffer.content(), "b");
        assert_eq!(ring(&session), vec!["b", "a b c"]);
    }

    #[test]
    fn test_quit_keeps_ring() {
        let mut session = session_with("a b c");
        let mut buffer = TextBuffer::default();
        let report = run(&mut session, "n n q", &mut buffer).unwrap();
        assert!(!report.replaced);
        assert_eq!(ring(&session), vec!["a b c"]);
    }

    #[test]
    fn test_counter_runs_during_step_edit() {
        let mut session = session_with("<f3> SPC");
        let mut buffer = TextBuffer::default();
        let report = run(&mut session, "SPC i <f3> C-j SPC", &mut buffer).unwrap();
        assert_eq!(buffer.content(), "01 ");
        assert_eq!(report.keys, "<f3> <f3> SPC");
        assert_eq!(ring(&session), vec!["<f3> <f3> SPC", "<f3> SPC"]);
    }

    #[test]
    fn test_bell_and_skip_everything() {
        let mut session = session_with("C-f a");
        let mut buffer = TextBuffer::default();
        let report = run(&mut session, "SPC n", &mut buffer).unwrap();
        // The bell doesn't drop the command.
        assert_eq!(report.keys, "C-f");
        assert_eq!(report.commands_executed, 0);
        assert!(report.replaced);

        let mut session = session_with("a");
        let report = run(&mut session, "n", &mut buffer).unwrap();
        assert!(!report.replaced);
        assert_eq!(
            session.take_status(),
            Some(StatusMessage::Info(
                "Edited keyboard macro is empty, keeping the original".into()
            ))
        );
    }

    #[test]
    fn test_needs_a_macro() {
        let mut session = MacroSession::default();
        let mut buffer = TextBuffer::default();
        assert_eq!(
            run(&mut session, "SPC", &mut buffer),
            Err(MacroWarning::NoMacroDefined)
        );
    }
}
