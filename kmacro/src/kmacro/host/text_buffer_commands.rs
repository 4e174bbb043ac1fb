// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::{CommandDispatcher, CommandName, EditingSurface, ExecOutcome, TextBuffer};
use crate::{Binding, KeyPress, Keymap, MAX_INSERT_REPEAT, PrefixArg, parse_key_description};

/// The editing commands of [`TextBuffer`], named like their Emacs counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TextBufferCommand {
    SelfInsertCommand,
    Newline,
    ForwardChar,
    BackwardChar,
    DeleteChar,
    DeleteBackwardChar,
    MoveBeginningOfLine,
    MoveEndOfLine,
    NextLine,
    PreviousLine,
    BeginningOfBuffer,
    EndOfBuffer,
}

const DEFAULT_BINDINGS: [(&str, TextBufferCommand); 18] = [
    ("RET", TextBufferCommand::Newline),
    ("C-f", TextBufferCommand::ForwardChar),
    ("<right>", TextBufferCommand::ForwardChar),
    ("C-b", TextBufferCommand::BackwardChar),
    ("<left>", TextBufferCommand::BackwardChar),
    ("C-d", TextBufferCommand::DeleteChar),
    ("<delete>", TextBufferCommand::DeleteChar),
    ("DEL", TextBufferCommand::DeleteBackwardChar),
    ("C-a", TextBufferCommand::MoveBeginningOfLine),
    ("<home>", TextBufferCommand::MoveBeginningOfLine),
    ("C-e", TextBufferCommand::MoveEndOfLine),
    ("<end>", TextBufferCommand::MoveEndOfLine),
    ("C-n", TextBufferCommand::NextLine),
    ("<down>", TextBufferCommand::NextLine),
    ("C-p", TextBufferCommand::PreviousLine),
    ("<up>", TextBufferCommand::PreviousLine),
    ("M-<", TextBufferCommand::BeginningOfBuffer),
    ("M->", TextBufferCommand::EndOfBuffer),
];

/// Dispatches [`TextBufferCommand`]s by name against a [`TextBuffer`]. The prefix
/// argument is a repeat count, and a negative one reverses the direction of the
/// character motion commands. Inserting more than [`MAX_INSERT_REPEAT`] copies rings
/// the bell.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextBufferCommands;

impl TextBufferCommands {
    /// Bind the Emacs keys for every [`TextBufferCommand`].
    pub fn bind_defaults(keymap: &mut Keymap) {
        for (description, command) in DEFAULT_BINDINGS {
            if let Ok(keys) = parse_key_description(description) {
                keymap.bind(&keys, Binding::Host(CommandName::new(command.as_ref())));
            }
        }
    }

    /// [`Keymap::with_defaults`] plus [`TextBufferCommands::bind_defaults`].
    #[must_use]
    pub fn default_keymap() -> Keymap {
        let mut keymap = Keymap::with_defaults();
        Self::bind_defaults(&mut keymap);
        keymap
    }
}

impl CommandDispatcher for TextBufferCommands {
    type Surface = TextBuffer;

    fn execute(
        &mut self,
        command: &CommandName,
        keys: &[KeyPress],
        arg: PrefixArg,
        surface: &mut TextBuffer,
    ) -> ExecOutcome {
        let Ok(command) = TextBufferCommand::from_str(command.as_str()) else {
            return ExecOutcome::Bell;
        };

        let count = arg.numeric_value();
        let times = usize::try_from(count.unsigned_abs()).unwrap_or(usize::MAX);
        let command = match (command, count < 0) {
            (TextBufferCommand::ForwardChar, true) => TextBufferCommand::BackwardChar,
            (TextBufferCommand::BackwardChar, true) => TextBufferCommand::ForwardChar,
            (it, _) => it,
        };

        match command {
            TextBufferCommand::SelfInsertCommand => {
                let Some(ch) = keys.last().and_then(KeyPress::printable_char) else {
                    return ExecOutcome::Bell;
                };
                insert_repeated(surface, &ch.to_string(), times)
            }
            TextBufferCommand::Newline => insert_repeated(surface, "\n", times),
            TextBufferCommand::ForwardChar => repeat(times, || surface.forward_char()),
            TextBufferCommand::BackwardChar => repeat(times, || surface.backward_char()),
            TextBufferCommand::DeleteChar => repeat(times, || surface.delete_char()),
            TextBufferCommand::DeleteBackwardChar => {
                repeat(times, || surface.delete_backward_char())
            }
            TextBufferCommand::NextLine => repeat(times, || surface.next_line()),
            TextBufferCommand::PreviousLine => repeat(times, || surface.previous_line()),
            TextBufferCommand::MoveBeginningOfLine => {
                surface.beginning_of_line();
                ExecOutcome::Success
            }
            TextBufferCommand::MoveEndOfLine => {
                surface.end_of_line();
                ExecOutcome::Success
            }
            TextBufferCommand::BeginningOfBuffer => {
                surface.beginning_of_buffer();
                ExecOutcome::Success
            }
            TextBufferCommand::EndOfBuffer => {
                surface.end_of_buffer();
                ExecOutcome::Success
            }
        }
    }
}

fn insert_repeated(surface: &mut TextBuffer, text: &str, times: usize) -> ExecOutcome {
    if times > MAX_INSERT_REPEAT {
        return ExecOutcome::Bell;
    }
    surface.insert_at_point(&text.repeat(times));
    ExecOutcome::Success
}

/// Stops at the first bell.
fn repeat(times: usize, mut command: impl FnMut() -> ExecOutcome) -> ExecOutcome {
    for _ in 0..times {
        if command().is_bell() {
            return ExecOutcome::Bell;
        }
    }
    ExecOutcome::Success
}
