// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{DispatchOutcome, MacroSession};
use crate::{AccumulatorStep, CommandAccumulator, CommandDispatcher, CounterIterationMode,
            DEBUG_KMACRO_MOD, HostContext, KeyPress, KeyboardMacro, MacroWarning,
            format_key_description};

/// How a replay went. A replay never fails, it just stops early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Passes through the whole macro that finished.
    pub iterations_completed: usize,
    /// Commands that ran without ringing the bell.
    pub commands_executed: usize,
    pub stop: Option<StopReason>,
}

/// Why a replay stopped before it ran the requested number of times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// A command couldn't proceed, eg: `forward-char` at the end of the buffer.
    Bell,
    /// The macro contains keys that are not bound to anything (anymore).
    Undefined,
    /// A `kmacro-quit-counter-*` condition held.
    CounterCondition,
    /// The macro contains the quit key.
    KeyboardQuit,
    /// A repeat count of 0 ran into `max_unbounded_repeat`.
    RepeatLimit,
}

impl MacroSession {
    /// Play the ring head `count` times, `0` meaning until it stops on its own.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::CallWhileDefining`] or [`MacroWarning::NoMacroDefined`].
    pub fn call_macro<D: CommandDispatcher>(
        &mut self,
        count: usize,
        host: &mut HostContext<'_, D>,
    ) -> Result<PlaybackReport, MacroWarning> {
        self.ensure_not_recording()?;
        let result = self.ring.head().cloned();
        let it = self.reported(result)?;
        let report = self.play(&it, count, host);

        if self.config.counter_iteration_mode == CounterIterationMode::Continue {
            let value = self.counter.value();
            if let Some(head) = self.ring.head_mut() {
                head.set_counter(value);
            }
        }

        Ok(report)
    }

    /// Play the second macro in the ring, without rotating the ring.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::CallWhileDefining`], [`MacroWarning::NoMacroDefined`] or
    /// [`MacroWarning::OnlyOneMacroDefined`].
    pub fn call_ring_second<D: CommandDispatcher>(
        &mut self,
        count: usize,
        host: &mut HostContext<'_, D>,
    ) -> Result<PlaybackReport, MacroWarning> {
        self.ensure_not_recording()?;
        let result = self.ring.second().cloned();
        let it = self.reported(result)?;
        Ok(self.play(&it, count, host))
    }

    /// Play a macro stored with [`MacroSession::name_last_macro`]. The ring doesn't
    /// change.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::CallWhileDefining`] or [`MacroWarning::NoSuchNamedMacro`].
    pub fn call_named<D: CommandDispatcher>(
        &mut self,
        name: &str,
        count: usize,
        host: &mut HostContext<'_, D>,
    ) -> Result<PlaybackReport, MacroWarning> {
        self.ensure_not_recording()?;
        let result = self.named.get(name).cloned().ok_or_else(|| {
            MacroWarning::NoSuchNamedMacro {
                name: name.to_string(),
            }
        });
        let it = self.reported(result)?;
        Ok(self.play(&it, count, host))
    }

    /// Play `it` `count` times, `0` meaning until a command rings the bell (or
    /// `max_unbounded_repeat` passes have run). The ring isn't touched.
    ///
    /// Depending on [`CounterIterationMode`], the counter is reset to the value and
    /// format stored in `it` before every pass, or only before the first one.
    pub fn play<D: CommandDispatcher>(
        &mut self,
        it: &KeyboardMacro,
        count: usize,
        host: &mut HostContext<'_, D>,
    ) -> PlaybackReport {
        let mut report = PlaybackReport::default();
        if it.is_empty() {
            return report;
        }

        let limit = if count == 0 {
            self.config.max_unbounded_repeat
        } else {
            count
        };
        let mode = self.config.counter_iteration_mode;

        self.play_depth += 1;
        if mode == CounterIterationMode::Continue {
            self.counter.reset(it.counter(), it.format().clone());
        }

        while report.iterations_completed < limit {
            if mode == CounterIterationMode::Restore {
                self.counter.reset(it.counter(), it.format().clone());
            }
            let (executed, stop) = self.play_once(it.keys(), host);
            report.commands_executed += executed;
            if stop.is_some() {
                report.stop = stop;
                break;
            }
            report.iterations_completed += 1;
        }
        self.play_depth -= 1;

        if count == 0 && report.stop.is_none() {
            report.stop = Some(StopReason::RepeatLimit);
            self.report(MacroWarning::RepeatLimitReached { limit });
        }

        DEBUG_KMACRO_MOD.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "MacroSession::play",
                keys = %it.describe(),
                count = %count,
                report = ?report
            );
        });

        report
    }

    /// One pass through `keys`. Returns the number of commands that ran, and why the
    /// pass stopped early, if it did. An incomplete command at the end is ignored.
    fn play_once<D: CommandDispatcher>(
        &mut self,
        keys: &[KeyPress],
        host: &mut HostContext<'_, D>,
    ) -> (usize, Option<StopReason>) {
        let mut accumulator = CommandAccumulator::default();
        let mut executed = 0;

        for key in keys {
            match accumulator.feed(*key, host.keymap) {
                AccumulatorStep::Pending => {}
                AccumulatorStep::Ready(invocation) => match self.dispatch(&invocation, host) {
                    DispatchOutcome::Success => executed += 1,
                    DispatchOutcome::CounterConditionMet => {
                        return (executed, Some(StopReason::CounterCondition));
                    }
                    DispatchOutcome::Bell | DispatchOutcome::StepEditRequested => {
                        return (executed, Some(StopReason::Bell));
                    }
                },
                AccumulatorStep::Undefined(keys) => {
                    self.report(MacroWarning::Undefined {
                        keys: format_key_description(&keys),
                    });
                    return (executed, Some(StopReason::Undefined));
                }
                AccumulatorStep::Cancelled(_) => {
                    return (executed, Some(StopReason::KeyboardQuit));
                }
            }
        }

        (executed, None)
    }

    pub(crate) fn ensure_not_recording(&mut self) -> Result<(), MacroWarning> {
        if self.is_recording() {
            return self.reported(Err(MacroWarning::CallWhileDefining));
        }
        Ok(())
    }
}
