// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! A printf style template that formats a single integer, eg: `%d`, `%03d`, `%-4x`,
//! `[%+d] `.
//!
//! The template is parsed once, when it is set, so a bad template is rejected right
//! away and never reaches the editing surface.

use std::fmt::{Display, Formatter, Result as FmtResult};

use nom::{IResult, Parser,
          bytes::complete::take_till1,
          character::complete::{anychar, char, digit0, one_of},
          combinator::opt,
          multi::many0,
          sequence::preceded};
use serde::{Deserialize, Serialize};

use super::{CounterError, FormatErrorReason};
use crate::{DEFAULT_COUNTER_FORMAT, MAX_COUNTER_FORMAT_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CounterFormat {
    template: String,
    pieces: Vec<FormatPiece>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormatPiece {
    Literal(String),
    Conversion(ConversionSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ConversionSpec {
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    space_sign: bool,
    width: usize,
    precision: Option<usize>,
    kind: ConversionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ConversionKind {
    #[default]
    Decimal,
    Octal,
    HexLower,
    HexUpper,
    Char,
    Str,
}

impl Default for CounterFormat {
    fn default() -> Self {
        Self {
            template: DEFAULT_COUNTER_FORMAT.to_string(),
            pieces: vec![FormatPiece::Conversion(ConversionSpec::default())],
        }
    }
}

impl CounterFormat {
    /// # Errors
    ///
    /// Returns [`CounterError::InvalidFormat`] if the template has more than one
    /// conversion, an unknown conversion character, a width or precision larger than
    /// [`MAX_COUNTER_FORMAT_WIDTH`], or ends with a lone `%`.
    pub fn parse(template: &str) -> Result<Self, CounterError> {
        let invalid = |reason| CounterError::InvalidFormat {
            format: template.to_string(),
            reason,
        };

        let mut pieces = vec![];
        let mut literal = String::new();
        let mut has_conversion = false;
        let mut rest = template;

        while !rest.is_empty() {
            if let Ok((remainder, text)) = parse_literal(rest) {
                literal.push_str(text);
                rest = remainder;
                continue;
            }

            // `rest` starts with '%'.
            rest = &rest[1..];
            if let Some(remainder) = rest.strip_prefix('%') {
                literal.push('%');
                rest = remainder;
                continue;
            }

            let (remainder, spec) = parse_conversion_spec(rest)
                .map_err(|_| invalid(FormatErrorReason::DanglingPercent))?;
            let spec = spec.map_err(invalid)?;
            if has_conversion {
                return Err(invalid(FormatErrorReason::TooManyConversions));
            }
            has_conversion = true;

            if !literal.is_empty() {
                pieces.push(FormatPiece::Literal(std::mem::take(&mut literal)));
            }
            pieces.push(FormatPiece::Conversion(spec));
            rest = remainder;
        }

        if !literal.is_empty() {
            pieces.push(FormatPiece::Literal(literal));
        }

        Ok(Self {
            template: template.to_string(),
            pieces,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str { &self.template }

    /// A template without a conversion prints only its literal text.
    #[must_use]
    pub fn has_conversion(&self) -> bool {
        self.pieces
            .iter()
            .any(|it| matches!(it, FormatPiece::Conversion(_)))
    }

    /// # Errors
    ///
    /// Returns [`CounterError::InvalidCharacter`] if the conversion is `%c` and `value`
    /// isn't a Unicode scalar value.
    pub fn format(&self, value: i64) -> Result<String, CounterError> {
        let mut acc = String::new();
        for piece in &self.pieces {
            match piece {
                FormatPiece::Literal(text) => acc.push_str(text),
                FormatPiece::Conversion(spec) => {
                    let text = spec.apply(value).ok_or_else(|| {
                        CounterError::InvalidCharacter {
                            format: self.template.clone(),
                            value,
                        }
                    })?;
                    acc.push_str(&text);
                }
            }
        }
        Ok(acc)
    }
}

impl TryFrom<String> for CounterFormat {
    type Error = CounterError;

    fn try_from(template: String) -> Result<Self, Self::Error> { Self::parse(&template) }
}

impl From<CounterFormat> for String {
    fn from(format: CounterFormat) -> Self { format.template }
}

impl Display for CounterFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult { write!(f, "{}", self.template) }
}

fn parse_literal(input: &str) -> IResult<&str, &str> {
    take_till1(|it: char| it == '%').parse(input)
}

/// Flags, width, precision and the conversion character, after the `%`. Fails only if
/// the input ends before the conversion character. An unknown conversion character, or
/// a width that is too large, is returned as the inner error.
fn parse_conversion_spec(
    input: &str,
) -> IResult<&str, Result<ConversionSpec, FormatErrorReason>> {
    let (rest, (flags, width, precision, conversion)) = (
        many0(one_of("-0+ ")),
        digit0,
        opt(preceded(char('.'), digit0)),
        anychar,
    )
        .parse(input)?;

    let kind = match conversion {
        'd' | 'i' => ConversionKind::Decimal,
        'o' => ConversionKind::Octal,
        'x' => ConversionKind::HexLower,
        'X' => ConversionKind::HexUpper,
        'c' => ConversionKind::Char,
        's' => ConversionKind::Str,
        other => return Ok((rest, Err(FormatErrorReason::UnknownConversion(other)))),
    };

    Ok((rest, conversion_spec(&flags, width, precision, kind)))
}

fn conversion_spec(
    flags: &[char],
    width: &str,
    precision: Option<&str>,
    kind: ConversionKind,
) -> Result<ConversionSpec, FormatErrorReason> {
    Ok(ConversionSpec {
        left_align: flags.contains(&'-'),
        zero_pad: flags.contains(&'0'),
        plus_sign: flags.contains(&'+'),
        space_sign: flags.contains(&' '),
        width: parse_width(width)?,
        precision: precision.map(parse_width).transpose()?,
        kind,
    })
}

/// No digits is 0. Digits that overflow, or exceed [`MAX_COUNTER_FORMAT_WIDTH`], are
/// rejected.
fn parse_width(digits: &str) -> Result<usize, FormatErrorReason> {
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse::<usize>()
        .ok()
        .filter(|it| *it <= MAX_COUNTER_FORMAT_WIDTH)
        .ok_or(FormatErrorReason::WidthTooLarge)
}

impl ConversionSpec {
    /// `None` if the conversion is `%c` and `value` isn't a `char`.
    fn apply(&self, value: i64) -> Option<String> {
        let (sign, body) = match self.kind {
            ConversionKind::Char => (
                String::new(),
                u32::try_from(value)
                    .ok()
                    .and_then(char::from_u32)?
                    .to_string(),
            ),
            ConversionKind::Str => {
                let text = value.to_string();
                let text = match self.precision {
                    Some(precision) => text.chars().take(precision).collect(),
                    None => text,
                };
                (String::new(), text)
            }
            ConversionKind::Decimal
            | ConversionKind::Octal
            | ConversionKind::HexLower
            | ConversionKind::HexUpper => {
                let magnitude = value.unsigned_abs();
                let digits = match self.kind {
                    ConversionKind::Octal => format!("{magnitude:o}"),
                    ConversionKind::HexLower => format!("{magnitude:x}"),
                    ConversionKind::HexUpper => format!("{magnitude:X}"),
                    _ => magnitude.to_string(),
                };
                let digits = match self.precision {
                    Some(precision) if digits.len() < precision => {
                        format!("{}{digits}", "0".repeat(precision - digits.len()))
                    }
                    _ => digits,
                };
                let sign = if value < 0 {
                    "-"
                } else if self.plus_sign {
                    "+"
                } else if self.space_sign {
                    " "
                } else {
                    ""
                };
                (sign.to_string(), digits)
            }
        };

        let len = sign.chars().count() + body.chars().count();
        let padding = self.width.saturating_sub(len);
        let zero_pad_allowed = matches!(
            self.kind,
            ConversionKind::Decimal
                | ConversionKind::Octal
                | ConversionKind::HexLower
                | ConversionKind::HexUpper
        ) && self.precision.is_none();

        Some(if self.left_align {
            format!("{sign}{body}{}", " ".repeat(padding))
        } else if self.zero_pad && zero_pad_allowed {
            format!("{sign}{}{body}", "0".repeat(padding))
        } else {
            format!("{}{sign}{body}", " ".repeat(padding))
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("%d", 42, "42")]
    #[test_case("%i", -7, "-7")]
    #[test_case("%03d", 7, "007")]
    #[test_case("%03d", -7, "-07")]
    #[test_case("%-4d|", 5, "5   |")]
    #[test_case("%4d", 5, "   5")]
    #[test_case("%+d", 5, "+5")]
    #[test_case("% d", 5, " 5")]
    #[test_case("%.3d", 5, "005")]
    #[test_case("%x", 255, "ff")]
    #[test_case("%X", 255, "FF")]
    #[test_case("%o", 8, "10")]
    #[test_case("%c", 65, "A")]
    #[test_case("%s", 12, "12")]
    #[test_case("item-%d. ", 3, "item-3. ")]
    #[test_case("100%% %d", 1, "100% 1")]
    #[test_case("no conversion", 9, "no conversion")]
    fn test_format(template: &str, value: i64, expected: &str) {
        let format = CounterFormat::parse(template).unwrap();
        assert_eq!(format.format(value).unwrap(), expected);
        assert_eq!(format.as_str(), template);
    }

    #[test_case("%d %d", FormatErrorReason::TooManyConversions)]
    #[test_case("%q", FormatErrorReason::UnknownConversion('q'))]
    #[test_case("abc %", FormatErrorReason::DanglingPercent)]
    #[test_case("%05", FormatErrorReason::DanglingPercent ; "flags and width only")]
    #[test_case("%9999999999999d", FormatErrorReason::WidthTooLarge ; "huge width")]
    #[test_case("%99999999999999999999d", FormatErrorReason::WidthTooLarge ; "width overflows")]
    #[test_case("%.2000d", FormatErrorReason::WidthTooLarge ; "huge precision")]
    fn test_invalid_format(template: &str, reason: FormatErrorReason) {
        assert_eq!(
            CounterFormat::parse(template),
            Err(CounterError::InvalidFormat {
                format: template.to_string(),
                reason,
            })
        );
    }

    #[test]
    fn test_widest_format_is_accepted() {
        let format = CounterFormat::parse("%1024d").unwrap();
        assert_eq!(format.format(7).unwrap().len(), 1024);
    }

    #[test_case(-1 ; "negative")]
    #[test_case(0xD800 ; "surrogate")]
    #[test_case(0x11_0000 ; "past the last code point")]
    fn test_char_conversion_rejects_invalid_values(value: i64) {
        let format = CounterFormat::parse("<%c>").unwrap();
        assert_eq!(
            format.format(value),
            Err(CounterError::InvalidCharacter {
                format: "<%c>".to_string(),
                value,
            })
        );
    }

    #[test]
    fn test_default_is_decimal() {
        let format = CounterFormat::default();
        assert_eq!(format.as_str(), "%d");
        assert_eq!(format.format(-12).unwrap(), "-12");
        assert_eq!(format, CounterFormat::parse("%d").unwrap());
    }

    #[test]
    fn test_serde_validates() {
        let format: CounterFormat = serde_json::from_str("\"%02x\"").unwrap();
        assert_eq!(format.format(10).unwrap(), "0a");
        assert!(serde_json::from_str::<CounterFormat>("\"%d%d\"").is_err());
        assert_eq!(serde_json::to_string(&format).unwrap(), "\"%02x\"");
    }
}
