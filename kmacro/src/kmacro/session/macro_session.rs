// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::BTreeMap;

use crate::{CommandAccumulator, ConfigError, CounterCondition, CounterDefaults,
            CounterError, CounterFormat, CounterRegisters, KeyPress, KeySequence,
            KeyboardMacro, KmacroConfig, MacroCounter, MacroRing, MacroWarning,
            StatusMessage};

/// Everything the keyboard macro facility remembers between key presses: the ring, the
/// counter and its defaults, counter registers, named macros, and the macro being
/// defined, if any.
///
/// The host owns one of these (there is no global state), and passes a
/// [`crate::HostContext`] into the operations that run commands.
#[derive(Debug)]
pub struct MacroSession {
    pub(crate) config: KmacroConfig,
    pub(crate) ring: MacroRing,
    pub(crate) counter: MacroCounter,
    pub(crate) defaults: CounterDefaults,
    pub(crate) registers: CounterRegisters,
    pub(crate) named: BTreeMap<String, KeyboardMacro>,
    pub(crate) recording: Option<Recording>,
    /// Nesting depth of replays (and step edits) in progress.
    pub(crate) play_depth: usize,
    pub(crate) accumulator: CommandAccumulator,
    pub(crate) status: Option<StatusMessage>,
}

/// The macro being defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recording {
    pub keys: KeySequence,
    /// The result replaces the ring head, instead of being pushed onto the ring.
    pub is_append: bool,
}

impl Default for MacroSession {
    fn default() -> Self {
        let config = KmacroConfig::default();
        Self {
            ring: MacroRing::new(config.ring_max),
            counter: MacroCounter::default(),
            defaults: CounterDefaults::default(),
            registers: CounterRegisters::default(),
            named: BTreeMap::new(),
            recording: None,
            play_depth: 0,
            accumulator: CommandAccumulator::default(),
            status: None,
            config,
        }
    }
}

impl MacroSession {
    /// # Errors
    ///
    /// Returns an error if `config` doesn't [validate](KmacroConfig::validate).
    pub fn new(config: KmacroConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let defaults = config.counter_defaults()?;
        Ok(Self {
            ring: MacroRing::new(config.ring_max),
            counter: MacroCounter::new(defaults.start, defaults.format.clone()),
            defaults,
            config,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn config(&self) -> &KmacroConfig { &self.config }

    #[must_use]
    pub fn ring(&self) -> &MacroRing { &self.ring }

    pub fn ring_mut(&mut self) -> &mut MacroRing { &mut self.ring }

    #[must_use]
    pub fn counter(&self) -> &MacroCounter { &self.counter }

    #[must_use]
    pub fn counter_defaults(&self) -> &CounterDefaults { &self.defaults }

    #[must_use]
    pub fn registers(&self) -> &CounterRegisters { &self.registers }

    #[must_use]
    pub fn is_recording(&self) -> bool { self.recording.is_some() }

    #[must_use]
    pub fn is_playing(&self) -> bool { self.play_depth > 0 }

    /// The keys recorded so far, while a macro is being defined.
    #[must_use]
    pub fn recorded_keys(&self) -> Option<&[KeyPress]> {
        self.recording.as_ref().map(|it| it.keys.as_slice())
    }

    /// The message from the last operation, if it hasn't been taken yet.
    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> { self.status.as_ref() }

    pub fn take_status(&mut self) -> Option<StatusMessage> { self.status.take() }

    pub(crate) fn report(&mut self, warning: MacroWarning) {
        // % is Display, ? is Debug.
        tracing::warn!(message = "MacroSession", warning = %warning);
        self.status = Some(StatusMessage::Warning(warning));
    }

    pub(crate) fn inform(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::Info(text.into()));
    }

    /// Sets the status for a warning, and passes the result through.
    pub(crate) fn reported<T>(
        &mut self,
        result: Result<T, MacroWarning>,
    ) -> Result<T, MacroWarning> {
        if let Err(warning) = &result {
            self.report(warning.clone());
        }
        result
    }

    /// Counter operations address the running counter while a macro is being defined
    /// or replayed, and the [`CounterDefaults`] otherwise.
    #[must_use]
    pub fn is_counter_active(&self) -> bool { self.is_recording() || self.is_playing() }

    /// The value that the next `kmacro-insert-counter` would insert.
    #[must_use]
    pub fn counter_value(&self) -> i64 {
        if self.is_counter_active() {
            self.counter.value()
        } else {
            self.defaults.start
        }
    }

    pub fn set_counter(&mut self, value: i64) {
        if self.is_counter_active() {
            self.counter.set(value);
        } else {
            self.defaults.start = value;
            self.inform(format!("Macro counter initial value set to {value}"));
        }
    }

    pub fn add_counter(&mut self, delta: i64) {
        if self.is_counter_active() {
            self.counter.add(delta);
        } else {
            self.defaults.start = self.defaults.start.saturating_add(delta);
            self.inform(format!(
                "Macro counter initial value set to {}",
                self.defaults.start
            ));
        }
    }

    /// # Errors
    ///
    /// Returns [`CounterError::InvalidFormat`] if `template` isn't valid. The current
    /// format is kept.
    pub fn set_counter_format(&mut self, template: &str) -> Result<(), CounterError> {
        if self.is_counter_active() {
            self.counter.set_format(template)
        } else {
            self.defaults.format = CounterFormat::parse(template)?;
            Ok(())
        }
    }

    pub fn save_to_register(&mut self, register: char) {
        let value = self.counter_value();
        self.registers.save(register, value);
    }

    /// # Errors
    ///
    /// [`MacroWarning::EmptyRegister`] if nothing was saved to `register`.
    pub fn load_from_register(&mut self, register: char) -> Result<(), MacroWarning> {
        let result = self
            .registers
            .load(register)
            .ok_or(MacroWarning::EmptyRegister { register });
        let value = self.reported(result)?;
        self.set_counter(value);
        Ok(())
    }

    /// Add `delta` to the number in `register`, returning the new value.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::EmptyRegister`] if nothing was saved to `register`.
    pub fn add_register(&mut self, register: char, delta: i64) -> Result<i64, MacroWarning> {
        let result = self
            .registers
            .add(register, delta)
            .ok_or(MacroWarning::EmptyRegister { register });
        self.reported(result)
    }

    /// Whether a replay should stop here.
    #[must_use]
    pub fn quit_if(&self, condition: CounterCondition) -> bool {
        condition.holds(self.counter.value())
    }

    /// Store a copy of the ring head under `name`. The head itself is named too.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::NoMacroDefined`] if the ring is empty.
    pub fn name_last_macro(&mut self, name: &str) -> Result<(), MacroWarning> {
        let result = self.ring.head().map(|it| it.clone().with_name(name));
        let named = self.reported(result)?;
        if let Some(head) = self.ring.head_mut() {
            *head = named.clone();
        }
        self.named.insert(name.to_string(), named);
        Ok(())
    }

    #[must_use]
    pub fn named_macro(&self, name: &str) -> Option<&KeyboardMacro> { self.named.get(name) }

    pub fn named_macros(&self) -> impl Iterator<Item = (&str, &KeyboardMacro)> {
        self.named.iter().map(|(name, it)| (name.as_str(), it))
    }

    pub fn remove_named_macro(&mut self, name: &str) -> Option<KeyboardMacro> {
        self.named.remove(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{StepResponse, parse_key_description};

    #[test]
    fn test_new_validates_config() {
        let result = MacroSession::new(KmacroConfig::default().with_ring_max(0));
        assert!(matches!(result, Err(ConfigError::InvalidRingMax)));

        let result = MacroSession::new(
            KmacroConfig::default().with_step_edit_key("C-j", StepResponse::Execute),
        );
        assert!(result.is_err());

        let session = MacroSession::new(
            KmacroConfig::default()
                .with_ring_max(3)
                .with_default_counter_start(10)
                .with_default_counter_format("%03d"),
        )
        .unwrap();
        assert_eq!(session.ring().capacity(), 3);
        assert_eq!(session.counter_value(), 10);
        assert_eq!(session.counter_defaults().format.as_str(), "%03d");
    }

    #[test]
    fn test_counter_outside_macro_sets_defaults() {
        let mut session = MacroSession::default();
        session.set_counter(5);
        session.add_counter(2);
        assert_eq!(session.counter_defaults().start, 7);
        assert_eq!(
            session.take_status().map(|it| it.to_string()),
            Some("Macro counter initial value set to 7".to_string())
        );

        assert!(session.set_counter_format("%x %d").is_err());
        assert_eq!(session.counter_defaults().format.as_str(), "%d");
        session.set_counter_format("<%d>").unwrap();
        assert_eq!(session.counter_defaults().format.as_str(), "<%d>");
    }

    #[test]
    fn test_registers() {
        let mut session = MacroSession::default();
        assert_eq!(
            session.load_from_register('r'),
            Err(MacroWarning::EmptyRegister { register: 'r' })
        );
        assert_eq!(
            session.take_status(),
            Some(StatusMessage::Warning(MacroWarning::EmptyRegister {
                register: 'r'
            }))
        );

        session.set_counter(4);
        session.save_to_register('r');
        assert_eq!(session.add_register('r', 6), Ok(10));
        session.load_from_register('r').unwrap();
        assert_eq!(session.counter_value(), 10);
    }

    #[test]
    fn test_name_last_macro() {
        let mut session = MacroSession::default();
        assert_eq!(
            session.name_last_macro("x"),
            Err(MacroWarning::NoMacroDefined)
        );

        let keys = parse_key_description("a b").unwrap();
        session
            .ring_mut()
            .push(KeyboardMacro::new(keys, 0, CounterFormat::default()));
        session.name_last_macro("ab").unwrap();
        assert_eq!(session.named_macro("ab").unwrap().describe(), "a b");
        assert_eq!(session.ring().head().unwrap().name(), Some("ab"));
        assert_eq!(session.named_macros().count(), 1);
        assert!(session.remove_named_macro("ab").is_some());
    }
}
