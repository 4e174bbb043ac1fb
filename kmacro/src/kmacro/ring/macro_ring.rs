// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

use super::KeyboardMacro;
use crate::{BoundedRing, DEBUG_KMACRO_MOD, MacroWarning};

/// The most recently used keyboard macros, head first. The head is what `C-x e` plays.
///
/// Operations that need a macro report a [`MacroWarning`] on an empty ring (or on a
/// ring with a single macro, for the ones that need two), and leave the ring as it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroRing {
    ring: BoundedRing<KeyboardMacro>,
}

impl MacroRing {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: BoundedRing::new(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.ring.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.ring.is_empty() }

    #[must_use]
    pub fn capacity(&self) -> usize { self.ring.capacity() }

    /// # Errors
    ///
    /// [`MacroWarning::NoMacroDefined`] if the ring is empty.
    pub fn head(&self) -> Result<&KeyboardMacro, MacroWarning> {
        self.ring.head().ok_or(MacroWarning::NoMacroDefined)
    }

    pub fn head_mut(&mut self) -> Option<&mut KeyboardMacro> { self.ring.head_mut() }

    /// # Errors
    ///
    /// [`MacroWarning::NoMacroDefined`] or [`MacroWarning::OnlyOneMacroDefined`].
    pub fn second(&self) -> Result<&KeyboardMacro, MacroWarning> {
        self.require_two()?;
        self.ring.get(1).ok_or(MacroWarning::OnlyOneMacroDefined)
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&KeyboardMacro> { self.ring.get(index) }

    /// Returns the macro that fell off the tail, if the ring was full.
    pub fn push(&mut self, it: KeyboardMacro) -> Option<KeyboardMacro> {
        let evicted = self.ring.push_head(it);

        DEBUG_KMACRO_MOD.then(|| {
            if let Some(evicted) = &evicted {
                // % is Display, ? is Debug.
                tracing::debug!(
                    message = "MacroRing::push -> evicted oldest macro",
                    evicted = %evicted.describe(),
                    capacity = %self.ring.capacity()
                );
            }
        });

        evicted
    }

    /// Remove the head, and promote the next macro.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::NoMacroDefined`] if the ring is empty.
    pub fn pop(&mut self) -> Result<KeyboardMacro, MacroWarning> {
        self.ring.pop_head().ok_or(MacroWarning::NoMacroDefined)
    }

    /// Same as [`MacroRing::pop`]. This is what `C-x C-k C-d` runs.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::NoMacroDefined`] if the ring is empty.
    pub fn delete_head(&mut self) -> Result<KeyboardMacro, MacroWarning> { self.pop() }

    /// `[M1, M2, M3]` becomes `[M2, M3, M1]`. Returns the new head.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::NoMacroDefined`] or [`MacroWarning::OnlyOneMacroDefined`].
    pub fn rotate_next(&mut self) -> Result<&KeyboardMacro, MacroWarning> {
        self.require_two()?;
        self.ring.rotate_next();
        self.head()
    }

    /// `[M2, M3, M1]` becomes `[M1, M2, M3]`. Returns the new head.
    ///
    /// # Errors
    ///
    /// [`MacroWarning::NoMacroDefined`] or [`MacroWarning::OnlyOneMacroDefined`].
    pub fn rotate_previous(&mut self) -> Result<&KeyboardMacro, MacroWarning> {
        self.require_two()?;
        self.ring.rotate_previous();
        self.head()
    }

    /// # Errors
    ///
    /// [`MacroWarning::NoMacroDefined`] or [`MacroWarning::OnlyOneMacroDefined`].
    pub fn swap_head(&mut self) -> Result<&KeyboardMacro, MacroWarning> {
        self.require_two()?;
        self.ring.swap_head();
        self.head()
    }

    /// Shrinking evicts from the tail. Returns the evicted macros.
    pub fn set_capacity(&mut self, capacity: usize) -> Vec<KeyboardMacro> {
        self.ring.set_capacity(capacity)
    }

    pub fn clear(&mut self) { self.ring.clear(); }

    /// Head first.
    pub fn iter(&self) -> impl Iterator<Item = &KeyboardMacro> { self.ring.iter() }

    /// Up to `count` entries from the head, ready to display.
    #[must_use]
    pub fn view(&self, count: usize) -> Vec<MacroView> {
        self.iter()
            .take(count)
            .enumerate()
            .map(|(index, it)| MacroView::new(index, it))
            .collect()
    }

    fn require_two(&self) -> Result<(), MacroWarning> {
        match self.ring.len() {
            0 => Err(MacroWarning::NoMacroDefined),
            1 => Err(MacroWarning::OnlyOneMacroDefined),
            _ => Ok(()),
        }
    }
}

impl Default for MacroRing {
    fn default() -> Self { Self::new(crate::DEFAULT_RING_MAX) }
}

/// One ring entry, as `kmc describe` prints it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroView {
    pub index: usize,
    pub keys: String,
    pub counter: i64,
    pub format: String,
    pub name: Option<String>,
}

impl MacroView {
    #[must_use]
    pub fn new(index: usize, it: &KeyboardMacro) -> Self {
        Self {
            index,
            keys: it.describe(),
            counter: it.counter(),
            format: it.format().to_string(),
            name: it.name().map(ToString::to_string),
        }
    }
}

impl Display for MacroView {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let tag = if self.index == 0 { "head" } else { "    " };
        write!(
            f,
            "{tag} [{index}] {keys}  (counter {counter}, format {format:?})",
            index = self.index,
            keys = self.keys,
            counter = self.counter,
            format = self.format,
        )?;
        if let Some(name) = &self.name {
            write!(f, " as {name}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CounterFormat, parse_key_description};

    fn make(description: &str) -> KeyboardMacro {
        KeyboardMacro::new(
            parse_key_description(description).unwrap(),
            0,
            CounterFormat::default(),
        )
    }

    fn heads(ring: &MacroRing) -> Vec<String> {
        ring.iter().map(KeyboardMacro::describe).collect()
    }

    #[test]
    fn test_empty_ring_warns() {
        let mut ring = MacroRing::new(3);
        assert_eq!(ring.head(), Err(MacroWarning::NoMacroDefined));
        assert_eq!(ring.pop(), Err(MacroWarning::NoMacroDefined));
        assert_eq!(
            ring.rotate_next().map(KeyboardMacro::describe),
            Err(MacroWarning::NoMacroDefined)
        );
        assert_eq!(
            ring.swap_head().map(KeyboardMacro::describe),
            Err(MacroWarning::NoMacroDefined)
        );
        assert!(ring.is_empty());
    }

    #[test]
    fn test_single_macro_ring_warns() {
        let mut ring = MacroRing::new(3);
        ring.push(make("a"));
        assert_eq!(
            ring.second().map(KeyboardMacro::describe),
            Err(MacroWarning::OnlyOneMacroDefined)
        );
        assert_eq!(
            ring.swap_head().map(KeyboardMacro::describe),
            Err(MacroWarning::OnlyOneMacroDefined)
        );
        assert_eq!(heads(&ring), vec!["a"]);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut ring = MacroRing::new(3);
        for it in ["a", "b", "c"] {
            assert_eq!(ring.push(make(it)), None);
        }
        assert_eq!(ring.push(make("d")).map(|it| it.describe()), Some("a".into()));
        assert_eq!(heads(&ring), vec!["d", "c", "b"]);
        assert_eq!(ring.len(), 3);
    }

    #[test]
    fn test_rotate_and_swap() {
        let mut ring = MacroRing::new(8);
        for it in ["c", "b", "a"] {
            ring.push(make(it));
        }
        assert_eq!(heads(&ring), vec!["a", "b", "c"]);

        assert_eq!(ring.rotate_next().unwrap().describe(), "b");
        assert_eq!(heads(&ring), vec!["b", "c", "a"]);

        assert_eq!(ring.rotate_previous().unwrap().describe(), "a");
        assert_eq!(heads(&ring), vec!["a", "b", "c"]);

        assert_eq!(ring.swap_head().unwrap().describe(), "b");
        assert_eq!(heads(&ring), vec!["b", "a", "c"]);

        assert_eq!(ring.delete_head().unwrap().describe(), "b");
        assert_eq!(heads(&ring), vec!["a", "c"]);
    }

    #[test]
    fn test_view() {
        let mut ring = MacroRing::new(8);
        ring.push(make("x"));
        ring.push(make("C-a y").with_name("second"));
        let view = ring.view(5);
        assert_eq!(view.len(), 2);
        assert_eq!(
            view[0].to_string(),
            r#"head [0] C-a y  (counter 0, format "%d") as second"#
        );
        assert_eq!(view[1].to_string(), r#"     [1] x  (counter 0, format "%d")"#);
    }
}
