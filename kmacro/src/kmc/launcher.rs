// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use miette::IntoDiagnostic;

use super::{CLIArg, CLICommand, describe_session, status_message};
use crate::{DEBUG_KMACRO_MOD, EditingSurface, HostContext, InputEventSource,
            KeyLoopSignal, KmacroConfig, MacroSession, ScriptedInput, StepEditReport,
            TextBuffer, TextBufferCommands};

/// What a `kmc` command produced: the final buffer, and every status message shown
/// along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessReport {
    pub buffer: String,
    pub messages: Vec<String>,
}

/// Run the command, then print the buffer to stdout and the messages to stderr.
///
/// # Errors
///
/// Returns an error if the config, the ring file, or a key description is invalid.
pub fn run_app(cli_arg: &CLIArg) -> miette::Result<()> {
    let config = match &cli_arg.global_options.config {
        Some(path) => KmacroConfig::load_from_file(path)?,
        None => KmacroConfig::load_from_config_folder()?,
    };
    let mut session = MacroSession::new(config)?;

    let report = try_run_command(&mut session, &cli_arg.command)?;
    for message in &report.messages {
        eprintln!("{}", status_message(message));
    }
    if !report.buffer.is_empty() {
        println!("{}", report.buffer);
    }
    Ok(())
}

/// # Errors
///
/// Returns an error if the ring file or a key description is invalid, or the ring file
/// can't be saved.
pub fn try_run_command(
    session: &mut MacroSession,
    command: &CLICommand,
) -> miette::Result<SuccessReport> {
    DEBUG_KMACRO_MOD.then(|| {
        // % is Display, ? is Debug.
        tracing::debug!(message = "kmc::try_run_command", command = ?command);
    });

    match command {
        CLICommand::Play {
            keys,
            text,
            ring_file,
            save,
        } => {
            if let Some(path) = ring_file {
                load_ring_file_if_exists(session, path)?;
            }
            let report = try_play(session, keys, text)?;
            if let (Some(path), true) = (ring_file, *save) {
                session.save_to_file(path)?;
            }
            Ok(report)
        }
        CLICommand::Describe { ring_file } => {
            session.load_from_file(ring_file)?;
            Ok(SuccessReport {
                buffer: describe_session(session).join("\n"),
                messages: vec![],
            })
        }
        CLICommand::StepEdit {
            ring_file,
            responses,
            text,
            save,
        } => {
            session.load_from_file(ring_file)?;
            let (report, step_edit_report) = try_step_edit(session, responses, text)?;
            if let (Some(it), true) = (step_edit_report, *save) {
                if it.replaced {
                    session.save_to_file(ring_file)?;
                }
            }
            Ok(report)
        }
    }
}

/// Feed `keys` to the session one at a time, the way a host's event loop would. When
/// the step editor is invoked, it reads its responses from the remaining keys.
///
/// # Errors
///
/// Returns an error if `keys` isn't a valid key description, or the configured step
/// edit keys are invalid.
pub fn try_play(
    session: &mut MacroSession,
    keys: &str,
    text: &str,
) -> miette::Result<SuccessReport> {
    let mut input = ScriptedInput::from_description(keys)?;
    let responses = session.config().response_keymap()?;
    let keymap = TextBufferCommands::default_keymap();
    let mut dispatcher = TextBufferCommands;
    let mut buffer = new_buffer(text);
    let mut messages = vec![];

    {
        let mut host = HostContext::new(&keymap, &mut dispatcher, &mut buffer);
        while let Some(key) = input.next_event() {
            if session.handle_key(key, &mut host) == KeyLoopSignal::StepEditRequested {
                // A refusal is left in the status message.
                session.step_edit(&mut input, &responses, &mut host).ok();
            }
            if let Some(status) = session.take_status() {
                messages.push(status.to_string());
            }
        }
    }

    Ok(SuccessReport {
        buffer: buffer.content().to_string(),
        messages,
    })
}

/// Step edit the ring head, reading responses from `responses`.
///
/// # Errors
///
/// Returns an error if `responses` isn't a valid key description, or the configured
/// step edit keys are invalid.
pub fn try_step_edit(
    session: &mut MacroSession,
    responses: &str,
    text: &str,
) -> miette::Result<(SuccessReport, Option<StepEditReport>)> {
    let mut input = ScriptedInput::from_description(responses)?;
    let response_keymap = session.config().response_keymap()?;
    let keymap = TextBufferCommands::default_keymap();
    let mut dispatcher = TextBufferCommands;
    let mut buffer = new_buffer(text);

    let step_edit_report = {
        let mut host = HostContext::new(&keymap, &mut dispatcher, &mut buffer);
        session
            .step_edit(&mut input, &response_keymap, &mut host)
            .ok()
    };

    let mut messages: Vec<String> = session
        .take_status()
        .map(|it| it.to_string())
        .into_iter()
        .collect();
    if let Some(it) = &step_edit_report {
        messages.push(format!("Macro: {}", it.keys));
    }

    Ok((
        SuccessReport {
            buffer: buffer.content().to_string(),
            messages,
        },
        step_edit_report,
    ))
}

fn new_buffer(text: &str) -> TextBuffer {
    let mut buffer = TextBuffer::new(text);
    buffer.set_point(buffer.len_chars());
    buffer
}

/// A ring file that doesn't exist yet is created by `--save`.
fn load_ring_file_if_exists(session: &mut MacroSession, path: &Path) -> miette::Result<()> {
    let exists = path.try_exists().into_diagnostic()?;
    if exists {
        session.load_from_file(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::try_create_temp_dir;

    #[test]
    fn test_play_records_and_replays() {
        let mut session = MacroSession::default();
        let report = try_play(&mut session, "C-x ( a b C-x ) C-u 3 C-x e", "").unwrap();
        assert_eq!(report.buffer, "abababab");
        assert!(
            report
                .messages
                .contains(&"Keyboard macro defined".to_string())
        );
    }

    #[test]
    fn test_play_appends_to_initial_text() {
        let mut session = MacroSession::default();
        let report = try_play(&mut session, "x", "abc").unwrap();
        assert_eq!(report.buffer, "abcx");
    }

    #[test]
    fn test_play_huge_repeat_count_leaves_buffer_alone() {
        let mut session = MacroSession::default();
        let report = try_play(&mut session, "C-u 9 9 9 9 9 9 9 9 9 9 9 a b", "").unwrap();
        assert_eq!(report.buffer, "b");
    }

    #[test]
    fn test_play_rejects_bad_keys() {
        let mut session = MacroSession::default();
        assert!(try_play(&mut session, "C-", "").is_err());
    }

    #[test]
    fn test_play_step_edit_reads_remaining_keys() {
        let mut session = MacroSession::default();
        // Record "ab", then step edit it, skipping the `a`.
        let report =
            try_play(&mut session, "C-x ( a b C-x ) C-x C-k SPC n SPC", "").unwrap();
        assert_eq!(report.buffer, "abb");
        assert_eq!(session.ring().len(), 2);
        assert_eq!(session.ring().head().unwrap().describe(), "b");
    }

    #[test]
    fn test_save_then_describe_and_step_edit() {
        let dir = try_create_temp_dir().unwrap();
        let path = dir.join("ring.json");

        let mut session = MacroSession::default();
        try_run_command(&mut session, &CLICommand::Play {
            keys: "C-x ( a b C-x )".to_string(),
            text: String::new(),
            ring_file: Some(path.clone()),
            save: true,
        })
        .unwrap();

        let mut session = MacroSession::default();
        let report = try_run_command(&mut session, &CLICommand::Describe {
            ring_file: path.clone(),
        })
        .unwrap();
        assert_eq!(
            report.buffer,
            "head [0] a b  (counter 0, format \"%d\")".to_string()
        );

        let mut session = MacroSession::default();
        let report = try_run_command(&mut session, &CLICommand::StepEdit {
            ring_file: path.clone(),
            responses: "SPC n".to_string(),
            text: String::new(),
            save: true,
        })
        .unwrap();
        assert_eq!(report.buffer, "a");

        let mut session = MacroSession::default();
        session.load_from_file(&path).unwrap();
        assert_eq!(session.ring().len(), 2);
        assert_eq!(session.ring().head().unwrap().describe(), "a");
    }
}
