// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::MacroSession;
use crate::{AccumulatorStep, Binding, CommandDispatcher, CounterError, DEBUG_KMACRO_MOD,
            ExecOutcome, HostContext, Invocation, KeyPress, MacroCommand, MacroWarning,
            PrefixArg, format_key_description};

/// What [`MacroSession::handle_key`] did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyLoopSignal {
    /// The key is part of a longer sequence (or a prefix argument).
    AwaitingMoreKeys,
    Handled,
    /// The command couldn't proceed, or the keys are undefined. See
    /// [`MacroSession::take_status`] for a message.
    Bell,
    /// `kmacro-step-edit-macro` was invoked. The host should call
    /// [`MacroSession::step_edit`] with its input source.
    StepEditRequested,
}

/// The result of running one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DispatchOutcome {
    Success,
    Bell,
    /// A `kmacro-quit-counter-*` condition held.
    CounterConditionMet,
    StepEditRequested,
}

impl From<ExecOutcome> for DispatchOutcome {
    fn from(outcome: ExecOutcome) -> Self {
        match outcome {
            ExecOutcome::Success => DispatchOutcome::Success,
            ExecOutcome::Bell => DispatchOutcome::Bell,
        }
    }
}

impl MacroSession {
    /// The host's event loop calls this for every key the user types. Keys are
    /// accumulated until the keymap resolves them to a command, which is then recorded
    /// (when a macro is being defined) and run.
    pub fn handle_key<D: CommandDispatcher>(
        &mut self,
        key: KeyPress,
        host: &mut HostContext<'_, D>,
    ) -> KeyLoopSignal {
        match self.accumulator.feed(key, host.keymap) {
            AccumulatorStep::Pending => KeyLoopSignal::AwaitingMoreKeys,
            AccumulatorStep::Undefined(keys) => {
                self.report(MacroWarning::Undefined {
                    keys: format_key_description(&keys),
                });
                KeyLoopSignal::Bell
            }
            AccumulatorStep::Cancelled(_) => {
                self.keyboard_quit();
                KeyLoopSignal::Bell
            }
            AccumulatorStep::Ready(invocation) => {
                DEBUG_KMACRO_MOD.then(|| {
                    // % is Display, ? is Debug.
                    tracing::debug!(
                        message = "MacroSession::handle_key -> command",
                        keys = %format_key_description(&invocation.keys),
                        binding = %invocation.binding,
                        arg = ?invocation.arg
                    );
                });

                if is_recorded(&invocation.binding) {
                    self.record(&invocation);
                }

                match self.dispatch(&invocation, host) {
                    DispatchOutcome::Success | DispatchOutcome::CounterConditionMet => {
                        KeyLoopSignal::Handled
                    }
                    DispatchOutcome::Bell => KeyLoopSignal::Bell,
                    DispatchOutcome::StepEditRequested => KeyLoopSignal::StepEditRequested,
                }
            }
        }
    }

    /// Run one command. The live key loop, the player, and the step editor all come
    /// through here. While a macro is playing, the commands that start, end, call or
    /// rearrange macros ring the bell instead of running.
    pub(crate) fn dispatch<D: CommandDispatcher>(
        &mut self,
        invocation: &Invocation,
        host: &mut HostContext<'_, D>,
    ) -> DispatchOutcome {
        match &invocation.binding {
            Binding::Host(command) => host
                .dispatcher
                .execute(
                    command,
                    &invocation.command_keys,
                    invocation.arg,
                    host.surface,
                )
                .into(),
            Binding::Macro(MacroCommand::StartOrInsertCounter)
                if !self.is_counter_active() =>
            {
                self.run_control_command(MacroCommand::StartMacro, invocation.arg, host)
            }
            Binding::Macro(command) if command.is_recorded() => {
                self.run_counter_command(*command, invocation, host)
            }
            Binding::Macro(_) if self.is_playing() => DispatchOutcome::Bell,
            Binding::Macro(command) => self.run_control_command(*command, invocation.arg, host),
        }
    }

    fn run_counter_command<D: CommandDispatcher>(
        &mut self,
        command: MacroCommand,
        invocation: &Invocation,
        host: &mut HostContext<'_, D>,
    ) -> DispatchOutcome {
        let arg = invocation.arg;
        // Commands that compare or assign take 0 when no argument is given.
        let value_or_zero = if arg.is_none() { 0 } else { arg.numeric_value() };

        match command {
            MacroCommand::InsertCounter | MacroCommand::StartOrInsertCounter => {
                let result = if let PrefixArg::Raw(_) = arg {
                    self.counter.insert_previous(host.surface)
                } else if self.is_counter_active() {
                    self.counter.insert(arg.numeric_value(), host.surface)
                } else {
                    self.defaults_as_counter();
                    let result = self.counter.insert(arg.numeric_value(), host.surface);
                    self.defaults.start = self.counter.value();
                    result
                };
                match result {
                    Ok(_) => DispatchOutcome::Success,
                    Err(CounterError::InvalidCharacter { value, .. }) => {
                        self.report(MacroWarning::InvalidCharacter { value });
                        DispatchOutcome::Bell
                    }
                    Err(CounterError::InvalidFormat { .. }) => DispatchOutcome::Bell,
                }
            }
            MacroCommand::SetCounter => {
                self.set_counter(value_or_zero);
                DispatchOutcome::Success
            }
            MacroCommand::AddCounter => {
                self.add_counter(arg.numeric_value());
                DispatchOutcome::Success
            }
            MacroCommand::QuitCounterEqual
            | MacroCommand::QuitCounterLess
            | MacroCommand::QuitCounterGreater => match command.counter_condition(value_or_zero) {
                Some(condition) if self.is_playing() && self.quit_if(condition) => {
                    DispatchOutcome::CounterConditionMet
                }
                _ => DispatchOutcome::Success,
            },
            MacroCommand::RegisterLoadCounter
            | MacroCommand::RegisterSaveCounter
            | MacroCommand::RegisterAddCounter => {
                let Some(register) = invocation.register else {
                    return DispatchOutcome::Bell;
                };
                let result = match command {
                    MacroCommand::RegisterLoadCounter => self.load_from_register(register),
                    MacroCommand::RegisterSaveCounter => {
                        self.save_to_register(register);
                        Ok(())
                    }
                    _ => self.add_register(register, arg.numeric_value()).map(|_| ()),
                };
                if result.is_ok() {
                    DispatchOutcome::Success
                } else {
                    DispatchOutcome::Bell
                }
            }
            _ => DispatchOutcome::Bell,
        }
    }

    fn run_control_command<D: CommandDispatcher>(
        &mut self,
        command: MacroCommand,
        arg: PrefixArg,
        host: &mut HostContext<'_, D>,
    ) -> DispatchOutcome {
        let result = match command {
            MacroCommand::StartMacro | MacroCommand::StartOrInsertCounter => match arg {
                PrefixArg::Raw(1) => self.start_recording(true, true, host),
                PrefixArg::Raw(_) => self.start_recording(true, false, host),
                PrefixArg::None => self.start_recording(false, false, host),
                PrefixArg::Numeric(_) | PrefixArg::Negative => {
                    self.start_recording(false, false, host).map(|()| {
                        let format = self.counter.format().clone();
                        self.counter.reset(arg.numeric_value(), format);
                    })
                }
            },
            MacroCommand::EndMacro => self.end_then_repeat(arg, host),
            MacroCommand::EndOrCallMacro if self.is_recording() => {
                self.end_then_repeat(arg, host)
            }
            MacroCommand::EndOrCallMacro if matches!(arg, PrefixArg::Raw(_)) => {
                self.call_ring_second(1, host).map(|_| ())
            }
            MacroCommand::EndOrCallMacro | MacroCommand::CallMacro => {
                self.call_macro(arg.repeat_count(), host).map(|_| ())
            }
            MacroCommand::CallRingSecond => {
                self.call_ring_second(arg.repeat_count(), host).map(|_| ())
            }
            MacroCommand::CycleRingNext => {
                let result = self.ring.rotate_next().map(|it| it.describe());
                self.show_head(result)
            }
            MacroCommand::CycleRingPrevious => {
                let result = self.ring.rotate_previous().map(|it| it.describe());
                self.show_head(result)
            }
            MacroCommand::SwapRing => {
                let result = self.ring.swap_head().map(|it| it.describe());
                self.show_head(result)
            }
            MacroCommand::DeleteRingHead => {
                let result = self.ring.delete_head().map(|it| it.describe());
                let result = self.reported(result);
                if let Ok(deleted) = &result {
                    self.inform(format!("Deleted keyboard macro: {deleted}"));
                }
                result.map(|_| ())
            }
            MacroCommand::StepEdit if self.is_recording() => {
                self.reported(Err(MacroWarning::CallWhileDefining))
            }
            MacroCommand::StepEdit => return DispatchOutcome::StepEditRequested,
            MacroCommand::KeyboardQuit => {
                self.keyboard_quit();
                return DispatchOutcome::Bell;
            }
            _ => return DispatchOutcome::Bell,
        };

        match result {
            Ok(()) => DispatchOutcome::Success,
            Err(_) => DispatchOutcome::Bell,
        }
    }

    /// `C-x )` with a numeric argument `n` ends the definition, then plays the new
    /// macro `n - 1` more times (`0` meaning until it stops on its own).
    fn end_then_repeat<D: CommandDispatcher>(
        &mut self,
        arg: PrefixArg,
        host: &mut HostContext<'_, D>,
    ) -> Result<(), MacroWarning> {
        self.end_recording()?;
        if let PrefixArg::Numeric(count) = arg {
            let count = usize::try_from(count).unwrap_or(1);
            if count != 1 {
                self.call_macro(count.saturating_sub(1), host)?;
            }
        }
        Ok(())
    }

    fn show_head(&mut self, result: Result<String, MacroWarning>) -> Result<(), MacroWarning> {
        let head = self.reported(result)?;
        self.inform(format!("Keyboard macro: {head}"));
        Ok(())
    }

    fn keyboard_quit(&mut self) {
        if self.is_recording() {
            self.cancel_recording().ok();
        } else {
            self.inform("Quit");
        }
    }

    /// Outside of a macro, `kmacro-insert-counter` counts from the defaults.
    fn defaults_as_counter(&mut self) {
        self.counter
            .reset(self.defaults.start, self.defaults.format.clone());
    }
}

/// Only host commands and counter commands are part of a macro body.
fn is_recorded(binding: &Binding) -> bool {
    match binding {
        Binding::Host(_) => true,
        Binding::Macro(command) => command.is_recorded(),
    }
}
