// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// The prefix argument typed before a command, eg: `C-u`, `C-u C-u`, `M-5`, `C-u 1 2`
/// or `M--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrefixArg {
    #[default]
    None,
    /// The number of `C-u` presses, with no digits after them.
    Raw(u32),
    Numeric(i64),
    /// A lone minus sign, eg: `M--`.
    Negative,
}

impl PrefixArg {
    /// `1` with no argument, `4^n` for `n` presses of `C-u`, `-1` for a lone minus.
    #[must_use]
    pub fn numeric_value(self) -> i64 {
        match self {
            PrefixArg::None => 1,
            PrefixArg::Raw(presses) => 4_i64.saturating_pow(presses),
            PrefixArg::Numeric(value) => value,
            PrefixArg::Negative => -1,
        }
    }

    /// How many times to repeat a keyboard macro, `0` meaning until it stops on its own.
    /// A negative count also repeats until the macro stops.
    #[must_use]
    pub fn repeat_count(self) -> usize {
        usize::try_from(self.numeric_value()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_none(self) -> bool { self == PrefixArg::None }
}

/// Accumulates the keys of a prefix argument. A plain digit is only read as part of the
/// argument once one has been started, a digit typed with a modifier (`M-5`, `C-5`)
/// always is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PrefixArgBuilder {
    universal_presses: u32,
    is_negative: bool,
    digits: Option<i64>,
    /// A `C-u` after digits ends the argument, so that `C-u 5 C-u 1` inserts a `1`.
    is_closed: bool,
}

impl PrefixArgBuilder {
    #[must_use]
    pub fn build(&self) -> PrefixArg {
        match (self.digits, self.is_negative) {
            (Some(digits), true) => PrefixArg::Numeric(-digits),
            (Some(digits), false) => PrefixArg::Numeric(digits),
            (None, true) => PrefixArg::Negative,
            (None, false) if self.universal_presses > 0 => {
                PrefixArg::Raw(self.universal_presses)
            }
            (None, false) => PrefixArg::None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { *self == Self::default() }

    pub fn universal_argument(&mut self) {
        if self.digits.is_some() || self.is_negative {
            self.is_closed = true;
        } else {
            self.universal_presses += 1;
        }
    }

    /// A plain digit (no modifier) only counts once an argument has been started, eg:
    /// after `C-u`, `M--` or `M-5`.
    #[must_use]
    pub fn accepts_plain_digit(&self) -> bool { !self.is_empty() && !self.is_closed }

    /// A plain `-` only counts right after `C-u`.
    #[must_use]
    pub fn accepts_plain_minus(&self) -> bool {
        self.universal_presses > 0
            && self.digits.is_none()
            && !self.is_negative
            && !self.is_closed
    }

    #[must_use]
    pub fn accepts_modified_minus(&self) -> bool {
        self.digits.is_none() && !self.is_negative && !self.is_closed
    }

    pub fn digit(&mut self, digit: u8) {
        let acc = self.digits.unwrap_or(0);
        self.digits = Some(acc.saturating_mul(10).saturating_add(i64::from(digit)));
    }

    pub fn negative(&mut self) { self.is_negative = true; }
}
