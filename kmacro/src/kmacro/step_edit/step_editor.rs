// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{ResponseKeymap, StepResponse};
use crate::{AccumulatorStep, Binding, CommandAccumulator, CommandUnit, DEBUG_KMACRO_STEP_EDIT,
            ExecOutcome, Invocation, KeyPress, KeySequence, Keymap, format_key_description,
            split_into_commands};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepState {
    /// Waiting for a response about the command at the cursor.
    Querying,
    /// Reading new commands from the user.
    Inserting,
    /// Waiting for [`StepInput::Executed`].
    Executing,
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepInput {
    /// A key typed by the user. While querying it is looked up in the
    /// [`ResponseKeymap`], while inserting it is part of a new command.
    Key(KeyPress),
    Response(StepResponse),
    /// How the last emitted command went.
    Executed(ExecOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub state: StepState,
    /// A command the caller must run, and then report with [`StepInput::Executed`].
    pub emitted: Option<Invocation>,
    /// Something to show the user, eg: the help text.
    pub message: Option<String>,
}

/// The edited macro, once the editor is [`StepState::Done`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEditResult {
    pub keys: KeySequence,
    /// `false` if the user quit, in which case the original macro stays as it is.
    pub replace: bool,
    pub changed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InsertKind {
    Many,
    One,
}

/// Where to go back to if the user cancels an insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Insertion {
    kind: InsertKind,
    keys_len: usize,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Running {
    /// The command at the cursor. `Append` starts an insertion after it.
    Unit { then_insert: bool },
    /// A command typed during an insertion.
    Inserted(KeySequence),
}

/// Walks the commands of a macro, asking what to do with each one.
///
/// The macro body is split into commands with the same [`Keymap`] the player uses, so
/// `C-u 3 C-f` is one step, not three. The keys of every command that is executed or
/// kept, and of every command the user inserts, make up the edited macro.
#[derive(Debug)]
pub struct StepEditor<'a> {
    keymap: &'a Keymap,
    responses: &'a ResponseKeymap,
    original: KeySequence,
    units: Vec<CommandUnit>,
    cursor: usize,
    new_keys: KeySequence,
    state: StepState,
    replace: bool,
    automatic: bool,
    append_at_end: bool,
    repeat_binding: Option<Binding>,
    insertion: Option<Insertion>,
    accumulator: CommandAccumulator,
    running: Option<Running>,
}

impl<'a> StepEditor<'a> {
    pub fn new(keys: &[KeyPress], keymap: &'a Keymap, responses: &'a ResponseKeymap) -> Self {
        Self {
            keymap,
            responses,
            original: keys.into(),
            units: split_into_commands(keys, keymap),
            cursor: 0,
            new_keys: KeySequence::new(),
            state: StepState::Querying,
            replace: true,
            automatic: false,
            append_at_end: false,
            repeat_binding: None,
            insertion: None,
            accumulator: CommandAccumulator::default(),
            running: None,
        }
    }

    /// The first outcome. [`StepState::Done`] right away for an empty macro.
    pub fn start(&mut self) -> StepOutcome { self.advance(None) }

    #[must_use]
    pub fn state(&self) -> StepState { self.state }

    /// Index of the command the editor asks about next.
    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn units(&self) -> &[CommandUnit] { &self.units }

    #[must_use]
    pub fn current_unit(&self) -> Option<&CommandUnit> { self.units.get(self.cursor) }

    /// The edited macro so far.
    #[must_use]
    pub fn new_keys(&self) -> &[KeyPress] { &self.new_keys }

    /// What to show the user while waiting for input.
    #[must_use]
    pub fn prompt(&self) -> Option<String> {
        match self.state {
            StepState::Querying => self.current_unit().map(|unit| {
                let binding = unit
                    .binding()
                    .map_or_else(|| "undefined".to_string(), ToString::to_string);
                format!("{} ({binding})? ", format_key_description(&unit.keys))
            }),
            StepState::Inserting => Some(format!(
                "Insert command ({} to end): {}",
                self.responses.terminator(),
                format_key_description(self.accumulator.pending_keys())
            )),
            StepState::Executing | StepState::Done => None,
        }
    }

    pub fn next(&mut self, input: StepInput) -> StepOutcome {
        let outcome = match (self.state, input) {
            (StepState::Done, _) => self.outcome(None, None),
            (StepState::Executing, StepInput::Executed(result)) => self.on_executed(result),
            (_, StepInput::Response(StepResponse::Quit)) => self.quit(),
            (StepState::Querying, StepInput::Key(key)) => {
                match self.responses.response_for(key) {
                    Some(response) => self.on_response(response),
                    None => self.invalid_response(key),
                }
            }
            (StepState::Querying, StepInput::Response(response)) => self.on_response(response),
            (StepState::Inserting, StepInput::Key(key)) => self.on_insert_key(key),
            (StepState::Querying | StepState::Inserting, StepInput::Executed(_))
            | (StepState::Inserting | StepState::Executing, StepInput::Response(_))
            | (StepState::Executing, StepInput::Key(_)) => self.outcome(None, None),
        };

        DEBUG_KMACRO_STEP_EDIT.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "StepEditor::next",
                input = ?input,
                state = ?outcome.state,
                cursor = %self.cursor,
                new_keys = %format_key_description(&self.new_keys)
            );
        });

        outcome
    }

    /// Consume the editor.
    #[must_use]
    pub fn into_result(self) -> StepEditResult {
        let changed = self.new_keys != self.original;
        StepEditResult {
            keys: self.new_keys,
            replace: self.replace,
            changed,
        }
    }

    fn on_response(&mut self, response: StepResponse) -> StepOutcome {
        let Some(unit) = self.units.get(self.cursor) else {
            return self.done(None);
        };

        match response {
            StepResponse::Execute => self.execute_current(false),
            StepResponse::ExecuteRepeat => {
                self.repeat_binding = unit.binding().cloned();
                self.execute_current(false)
            }
            StepResponse::Skip => {
                self.cursor += 1;
                self.advance(None)
            }
            StepResponse::SkipKeep => {
                self.new_keys.extend_from_slice(&unit.keys);
                self.cursor += 1;
                self.advance(None)
            }
            StepResponse::SkipRest => {
                self.cursor = self.units.len();
                self.done(None)
            }
            StepResponse::Automatic => {
                self.automatic = true;
                self.execute_current(false)
            }
            StepResponse::Insert => self.begin_insertion(InsertKind::Many),
            StepResponse::InsertOne => self.begin_insertion(InsertKind::One),
            StepResponse::Append => self.execute_current(true),
            StepResponse::AppendEnd => {
                self.automatic = true;
                self.append_at_end = true;
                self.advance(None)
            }
            StepResponse::Replace | StepResponse::ReplaceOne => {
                let kind = if response == StepResponse::Replace {
                    InsertKind::Many
                } else {
                    InsertKind::One
                };
                let insertion = self.snapshot(kind);
                self.cursor += 1;
                self.enter_insertion(insertion, None)
            }
            StepResponse::Quit => self.quit(),
            StepResponse::Help => {
                let help = self.responses.help_text();
                self.outcome(None, Some(help))
            }
        }
    }

    /// Ask the caller to run the command at the cursor. A command that doesn't resolve
    /// can't run, and is kept as it is.
    fn execute_current(&mut self, then_insert: bool) -> StepOutcome {
        let Some(unit) = self.units.get(self.cursor) else {
            return self.done(None);
        };

        match unit.invocation.clone() {
            Some(invocation) => {
                self.running = Some(Running::Unit { then_insert });
                self.state = StepState::Executing;
                self.outcome(Some(invocation), None)
            }
            None => {
                let message = format!("{} is undefined", format_key_description(&unit.keys));
                self.new_keys.extend_from_slice(&unit.keys);
                self.cursor += 1;
                self.stop_repeating();
                self.advance(Some(message))
            }
        }
    }

    fn on_executed(&mut self, result: ExecOutcome) -> StepOutcome {
        let bell = result
            .is_bell()
            .then(|| "Command could not proceed".to_string());

        match self.running.take() {
            Some(Running::Unit { then_insert }) => {
                if let Some(unit) = self.units.get(self.cursor) {
                    let keys = unit.keys.clone();
                    self.new_keys.extend_from_slice(&keys);
                    self.cursor += 1;
                }
                if bell.is_some() {
                    self.stop_repeating();
                    return self.advance(bell);
                }
                if then_insert {
                    return self.begin_insertion(InsertKind::Many);
                }
                self.advance(None)
            }
            Some(Running::Inserted(keys)) => {
                self.new_keys.extend_from_slice(&keys);
                match self.insertion {
                    Some(Insertion {
                        kind: InsertKind::One,
                        ..
                    }) => self.end_insertion(bell),
                    _ => {
                        self.state = StepState::Inserting;
                        self.outcome(None, bell)
                    }
                }
            }
            None => self.advance(bell),
        }
    }

    fn on_insert_key(&mut self, key: KeyPress) -> StepOutcome {
        if key == self.responses.terminator() {
            self.accumulator.take_keys();
            return self.end_insertion(None);
        }

        match self.accumulator.feed(key, self.keymap) {
            AccumulatorStep::Pending => self.outcome(None, None),
            AccumulatorStep::Ready(invocation) => match &invocation.binding {
                Binding::Macro(command) if !command.is_recorded() => self.outcome(
                    None,
                    Some(format!("{command} can't be used while step editing")),
                ),
                Binding::Macro(_) | Binding::Host(_) => {
                    self.running = Some(Running::Inserted(invocation.keys.clone()));
                    self.state = StepState::Executing;
                    self.outcome(Some(invocation), None)
                }
            },
            AccumulatorStep::Undefined(keys) => self.outcome(
                None,
                Some(format!("{} is undefined", format_key_description(&keys))),
            ),
            AccumulatorStep::Cancelled(_) => {
                if let Some(insertion) = self.insertion.take() {
                    self.new_keys.truncate(insertion.keys_len);
                    self.cursor = insertion.cursor;
                }
                self.stop_repeating();
                self.advance(Some("Insertion cancelled".to_string()))
            }
        }
    }

    fn invalid_response(&self, key: KeyPress) -> StepOutcome {
        let help_keys = self.responses.keys_for(StepResponse::Help).join(" or ");
        self.outcome(
            None,
            Some(format!("{key} is not a valid response, {help_keys} for help")),
        )
    }

    fn snapshot(&self, kind: InsertKind) -> Insertion {
        Insertion {
            kind,
            keys_len: self.new_keys.len(),
            cursor: self.cursor,
        }
    }

    fn begin_insertion(&mut self, kind: InsertKind) -> StepOutcome {
        let insertion = self.snapshot(kind);
        self.enter_insertion(insertion, None)
    }

    fn enter_insertion(&mut self, insertion: Insertion, message: Option<String>) -> StepOutcome {
        self.insertion = Some(insertion);
        self.accumulator = CommandAccumulator::default();
        self.state = StepState::Inserting;
        let message = message.or_else(|| {
            Some(format!(
                "Type commands to insert, {} to finish",
                self.responses.terminator()
            ))
        });
        self.outcome(None, message)
    }

    fn end_insertion(&mut self, message: Option<String>) -> StepOutcome {
        self.insertion = None;
        self.accumulator = CommandAccumulator::default();
        self.advance(message)
    }

    /// Move on to the command at the cursor: run it without asking when running
    /// automatically (or repeating the same command), otherwise ask.
    fn advance(&mut self, message: Option<String>) -> StepOutcome {
        let Some(unit) = self.units.get(self.cursor) else {
            if self.append_at_end {
                self.stop_repeating();
                let insertion = self.snapshot(InsertKind::Many);
                return self.enter_insertion(insertion, message);
            }
            return self.done(message);
        };

        if self.automatic {
            return self.execute_current(false);
        }

        if let Some(binding) = self.repeat_binding.clone() {
            if unit.binding() == Some(&binding) {
                return self.execute_current(false);
            }
            self.repeat_binding = None;
        }

        self.state = StepState::Querying;
        self.outcome(None, message)
    }

    fn stop_repeating(&mut self) {
        self.automatic = false;
        self.append_at_end = false;
        self.repeat_binding = None;
    }

    fn quit(&mut self) -> StepOutcome {
        self.replace = false;
        self.done(None)
    }

    fn done(&mut self, message: Option<String>) -> StepOutcome {
        self.state = StepState::Done;
        self.running = None;
        self.insertion = None;
        self.outcome(None, message)
    }

    fn outcome(&self, emitted: Option<Invocation>, message: Option<String>) -> StepOutcome {
        StepOutcome {
            state: self.state,
            emitted,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{TextBufferCommands, parse_key_description, parse_single_key};

    /// Runs the editor the way the driver does, treating every emitted command as
    /// successful unless its keys are in `bells`. Returns the executed commands.
    fn drive(
        editor: &mut StepEditor<'_>,
        inputs: &str,
        bells: &[&str],
    ) -> Vec<String> {
        let mut executed = vec![];
        let mut inputs = parse_key_description(inputs).unwrap().into_iter();
        let mut outcome = editor.start();
        loop {
            if let Some(invocation) = outcome.emitted.take() {
                let keys = format_key_description(&invocation.keys);
                let result = if bells.contains(&keys.as_str()) {
                    ExecOutcome::Bell
                } else {
                    ExecOutcome::Success
                };
                executed.push(keys);
                outcome = editor.next(StepInput::Executed(result));
                continue;
            }
            if outcome.state == StepState::Done {
                return executed;
            }
            outcome = match inputs.next() {
                Some(key) => editor.next(StepInput::Key(key)),
                None => editor.next(StepInput::Response(StepResponse::Quit)),
            };
        }
    }

    fn edit(body: &str, inputs: &str, bells: &[&str]) -> (Vec<String>, StepEditResult) {
        let keymap = TextBufferCommands::default_keymap();
        let responses = ResponseKeymap::default();
        let keys = parse_key_description(body).unwrap();
        let mut editor = StepEditor::new(&keys, &keymap, &responses);
        let executed = drive(&mut editor, inputs, bells);
        (executed, editor.into_result())
    }

    fn describe(result: &StepEditResult) -> String { format_key_description(&result.keys) }

    #[test]
    fn test_skip_execute_skip_rest() {
        let (executed, result) = edit("a b c", "DEL SPC C-k", &[]);
        assert_eq!(executed, vec!["b"]);
        assert_eq!(describe(&result), "b");
        assert!(result.replace);
        assert!(result.changed);
    }

    #[test]
    fn test_execute_everything_is_unchanged() {
        let (executed, result) = edit("C-u 2 C-f a", "y y", &[]);
        assert_eq!(executed, vec!["C-u 2 C-f", "a"]);
        assert!(!result.changed);
    }

    #[test]
    fn test_quit_suppresses_replace() {
        let (_, result) = edit("a b", "n q", &[]);
        assert!(!result.replace);

        // Running out of input is a quit.
        let (_, result) = edit("a b", "n", &[]);
        assert!(!result.replace);
    }

    #[test]
    fn test_skip_keep_and_automatic() {
        let (executed, result) = edit("a b c d", "f c", &[]);
        assert_eq!(executed, vec!["b", "c", "d"]);
        assert_eq!(describe(&result), "a b c d");
        assert!(!result.changed);
    }

    #[test]
    fn test_bell_stops_automatic() {
        let (executed, result) = edit("a C-f b", "c SPC", &["C-f"]);
        assert_eq!(executed, vec!["a", "C-f", "b"]);
        assert_eq!(describe(&result), "a C-f b");
    }

    #[test]
    fn test_execute_repeat() {
        let (executed, result) = edit("a b C-f C-f c", "SPC SPC TAB n", &[]);
        assert_eq!(executed, vec!["a", "b", "C-f", "C-f"]);
        assert_eq!(describe(&result), "a b C-f C-f");
    }

    #[test]
    fn test_insert_and_append() {
        let (executed, result) = edit("a b", "i x y C-j y a z C-j", &[]);
        assert_eq!(executed, vec!["x", "y", "a", "b", "z"]);
        assert_eq!(describe(&result), "x y a b z");

        let (_, result) = edit("a b", "I x SPC A q C-j", &[]);
        assert_eq!(describe(&result), "x a b q");
    }

    #[test]
    fn test_replace() {
        let (executed, result) = edit("a b c", "SPC r x y C-j SPC", &[]);
        assert_eq!(executed, vec!["a", "x", "y", "c"]);
        assert_eq!(describe(&result), "a x y c");

        let (_, result) = edit("a b c", "R C-x C-k TAB y y", &[]);
        assert_eq!(describe(&result), "C-x C-k TAB b c");
    }

    #[test]
    fn test_cancelled_insertion_restores_cursor() {
        // The replaced `a` comes back after C-g.
        let (executed, result) = edit("a b", "r x C-x C-g y y", &[]);
        assert_eq!(executed, vec!["x", "a", "b"]);
        assert_eq!(describe(&result), "a b");
        assert!(!result.changed);
    }

    #[test]
    fn test_insert_rejects_macro_commands_and_undefined_keys() {
        let keymap = TextBufferCommands::default_keymap();
        let responses = ResponseKeymap::default();
        let keys = parse_key_description("a").unwrap();
        let mut editor = StepEditor::new(&keys, &keymap, &responses);
        editor.start();

        let outcome = editor.next(StepInput::Response(StepResponse::Insert));
        assert_eq!(outcome.state, StepState::Inserting);
        editor.next(StepInput::Key(parse_single_key("C-x").unwrap()));
        let outcome = editor.next(StepInput::Key(parse_single_key("e").unwrap()));
        assert_eq!(
            outcome.message.as_deref(),
            Some("kmacro-call-macro can't be used while step editing")
        );
        editor.next(StepInput::Key(parse_single_key("C-x").unwrap()));
        let outcome = editor.next(StepInput::Key(parse_single_key("z").unwrap()));
        assert_eq!(outcome.message.as_deref(), Some("C-x z is undefined"));
        assert_eq!(outcome.state, StepState::Inserting);
        assert!(editor.new_keys().is_empty());
    }

    #[test]
    fn test_help_and_invalid_response() {
        let keymap = TextBufferCommands::default_keymap();
        let responses = ResponseKeymap::default();
        let keys = parse_key_description("a").unwrap();
        let mut editor = StepEditor::new(&keys, &keymap, &responses);
        editor.start();
        assert_eq!(editor.prompt().as_deref(), Some("a (self-insert-command)? "));

        let outcome = editor.next(StepInput::Key(parse_single_key("?").unwrap()));
        assert_eq!(outcome.state, StepState::Querying);
        assert!(outcome.message.unwrap().contains("skip the rest of the macro"));

        let outcome = editor.next(StepInput::Key(parse_single_key("x").unwrap()));
        assert_eq!(
            outcome.message.as_deref(),
            Some("x is not a valid response, <f1> or ? or h for help")
        );
    }

    #[test]
    fn test_empty_macro_is_done_right_away() {
        let keymap = TextBufferCommands::default_keymap();
        let responses = ResponseKeymap::default();
        let mut editor = StepEditor::new(&[], &keymap, &responses);
        assert_eq!(editor.start().state, StepState::Done);
    }
}
