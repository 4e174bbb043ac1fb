// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Emacs style key descriptions, the textual form of a [`KeySequence`].
//!
//! | Description      | Keys                                       |
//! | :--------------- | :----------------------------------------- |
//! | `a b c` or `abc` | three plain characters                     |
//! | `C-x C-k TAB`    | ctrl+x, ctrl+k, tab                        |
//! | `M-5 C-x e`      | alt+5 (numeric prefix argument), ctrl+x, e |
//! | `RET SPC DEL`    | enter, space, backspace                    |
//! | `<f3> C-<up>`    | F3, ctrl+up arrow                          |
//!
//! Modifier prefixes (`C-`, `M-`, `S-`) can be stacked, eg: `C-M-x`. A token without
//! modifiers that isn't a key name is split into one key per character, so `abc` and
//! `a b c` describe the same sequence.
//!
//! [`format_key_description`] produces text that [`parse_key_description`] reads back
//! into the same sequence, which is what the ring persistence relies on.

use std::fmt::{Display, Formatter, Result as FmtResult};

use nom::{IResult, Parser,
          bytes::complete::take_while1,
          character::complete::{char, one_of},
          combinator::all_consuming,
          multi::many0,
          sequence::{delimited, terminated}};

use super::{FunctionKey, Key, KeyPress, KeySequence, ModifierKeysMask, SpecialKey};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum KeyDescriptionError {
    #[error("Modifier prefix without a key in '{token}'")]
    #[diagnostic(
        code(r3bl_kmacro::key_description::dangling_modifier),
        help("Write a key after the modifier, eg: `C-x` or `M-<f3>`")
    )]
    DanglingModifier { token: String },

    #[error("Unknown key name '{name}' in '{token}'")]
    #[diagnostic(
        code(r3bl_kmacro::key_description::unknown_key_name),
        help(
            "Known names are RET TAB SPC DEL ESC, and <up> <down> <left> <right> \
             <home> <end> <prior> <next> <delete> <insert> <backtab> <f1> .. <f12>"
        )
    )]
    UnknownKeyName { token: String, name: String },

    #[error("Expected exactly one key, found {count} in '{description}'")]
    #[diagnostic(code(r3bl_kmacro::key_description::not_a_single_key))]
    NotASingleKey { description: String, count: usize },
}

/// Parse a key description into a [`KeySequence`]. Tokens are separated by ASCII
/// whitespace only, so printable keys like U+00A0 or U+3000 read back as keys. An empty
/// (or blank) description is an empty sequence.
///
/// # Errors
///
/// Returns an error if a token has a dangling modifier (`C-`), or names a key that
/// doesn't exist (`<frob>`, `C-foo`).
pub fn parse_key_description(
    description: &str,
) -> Result<KeySequence, KeyDescriptionError> {
    let mut acc = KeySequence::new();
    for token in description.split_ascii_whitespace() {
        parse_token_into(token, &mut acc)?;
    }
    Ok(acc)
}

/// Parse a description that must contain exactly one key, eg: a step edit response key
/// in a config file.
///
/// # Errors
///
/// Returns an error if the description can't be parsed, or if it doesn't describe
/// exactly one key.
pub fn parse_single_key(description: &str) -> Result<KeyPress, KeyDescriptionError> {
    let keys = parse_key_description(description)?;
    match keys.as_slice() {
        [single] => Ok(*single),
        _ => Err(KeyDescriptionError::NotASingleKey {
            description: description.to_string(),
            count: keys.len(),
        }),
    }
}

#[must_use]
pub fn format_key_description(keys: &[KeyPress]) -> String {
    keys.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl Display for KeyPress {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mask = self.mask();
        if mask.is_ctrl() {
            write!(f, "C-")?;
        }
        if mask.is_alt() {
            write!(f, "M-")?;
        }
        if mask.is_shift() {
            write!(f, "S-")?;
        }
        match self.key() {
            Key::Character(' ') => write!(f, "SPC"),
            Key::Character(ch) => write!(f, "{ch}"),
            Key::SpecialKey(special_key) => write!(f, "{}", special_key_name(special_key)),
            Key::FunctionKey(function_key) => write!(f, "<f{}>", function_key.number()),
        }
    }
}

fn parse_token_into(token: &str, acc: &mut KeySequence) -> Result<(), KeyDescriptionError> {
    // `many0` over a parser that always consumes input can't fail.
    let (rest, mask) = parse_modifiers(token).unwrap_or((token, ModifierKeysMask::new()));

    if rest.is_empty() {
        return Err(KeyDescriptionError::DanglingModifier {
            token: token.to_string(),
        });
    }

    // <name>
    if rest.len() > 2 && rest.starts_with('<') && rest.ends_with('>') {
        let key = all_consuming(parse_angle_bracket_name)
            .parse(rest)
            .ok()
            .and_then(|(_, name)| angle_bracket_name_to_key(name))
            .ok_or_else(|| KeyDescriptionError::UnknownKeyName {
                token: token.to_string(),
                name: rest.to_string(),
            })?;
        acc.push(KeyPress::new(key, mask));
        return Ok(());
    }

    // RET, TAB, SPC, DEL, ESC.
    if let Some(key) = short_name_to_key(rest) {
        acc.push(KeyPress::new(key, mask));
        return Ok(());
    }

    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => {
            acc.push(KeyPress::new(Key::Character(ch), mask));
            Ok(())
        }
        _ if mask.is_empty() => {
            acc.extend(rest.chars().map(|ch| KeyPress::Plain {
                key: Key::Character(ch),
            }));
            Ok(())
        }
        _ => Err(KeyDescriptionError::UnknownKeyName {
            token: token.to_string(),
            name: rest.to_string(),
        }),
    }
}

/// Zero or more of `C-`, `M-`, `S-`.
fn parse_modifiers(input: &str) -> IResult<&str, ModifierKeysMask> {
    let (rest, modifiers) = many0(terminated(one_of("CMS"), char('-'))).parse(input)?;
    let mask = modifiers
        .into_iter()
        .fold(ModifierKeysMask::new(), |mask, it| match it {
            'C' => mask.with_ctrl(),
            'M' => mask.with_alt(),
            _ => mask.with_shift(),
        });
    Ok((rest, mask))
}

fn parse_angle_bracket_name(input: &str) -> IResult<&str, &str> {
    delimited(char('<'), take_while1(|it: char| it != '>'), char('>')).parse(input)
}

fn short_name_to_key(name: &str) -> Option<Key> {
    Some(match name {
        "RET" => Key::SpecialKey(SpecialKey::Enter),
        "TAB" => Key::SpecialKey(SpecialKey::Tab),
        "SPC" => Key::Character(' '),
        "DEL" => Key::SpecialKey(SpecialKey::Backspace),
        "ESC" => Key::SpecialKey(SpecialKey::Esc),
        _ => return None,
    })
}

fn angle_bracket_name_to_key(name: &str) -> Option<Key> {
    if let Some(number) = name.strip_prefix('f') {
        return number
            .parse::<u8>()
            .ok()
            .and_then(FunctionKey::from_number)
            .map(Key::FunctionKey);
    }
    let special_key = match name {
        "up" => SpecialKey::Up,
        "down" => SpecialKey::Down,
        "left" => SpecialKey::Left,
        "right" => SpecialKey::Right,
        "home" => SpecialKey::Home,
        "end" => SpecialKey::End,
        "prior" => SpecialKey::PageUp,
        "next" => SpecialKey::PageDown,
        "delete" | "deletechar" => SpecialKey::Delete,
        "insert" | "insertchar" => SpecialKey::Insert,
        "backtab" => SpecialKey::BackTab,
        "return" => SpecialKey::Enter,
        "tab" => SpecialKey::Tab,
        "backspace" => SpecialKey::Backspace,
        "escape" => SpecialKey::Esc,
        _ => return None,
    };
    Some(Key::SpecialKey(special_key))
}

fn special_key_name(special_key: SpecialKey) -> &'static str {
    match special_key {
        SpecialKey::Backspace => "DEL",
        SpecialKey::Enter => "RET",
        SpecialKey::Tab => "TAB",
        SpecialKey::Esc => "ESC",
        SpecialKey::Left => "<left>",
        SpecialKey::Right => "<right>",
        SpecialKey::Up => "<up>",
        SpecialKey::Down => "<down>",
        SpecialKey::Home => "<home>",
        SpecialKey::End => "<end>",
        SpecialKey::PageUp => "<prior>",
        SpecialKey::PageDown => "<next>",
        SpecialKey::BackTab => "<backtab>",
        SpecialKey::Delete => "<delete>",
        SpecialKey::Insert => "<insert>",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use smallvec::smallvec;
    use test_case::test_case;

    use super::*;
    use crate::keypress;

    fn ctrl() -> ModifierKeysMask { ModifierKeysMask::new().with_ctrl() }

    #[test]
    fn test_parse_emacs_style_sequence() {
        let keys = parse_key_description("C-x C-k TAB").unwrap();
        let expected: KeySequence = smallvec![
            keypress!(@char ctrl(), 'x'),
            keypress!(@char ctrl(), 'k'),
            keypress!(@special SpecialKey::Tab),
        ];
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_plain_word_is_split_into_characters() {
        assert_eq!(
            parse_key_description("abc").unwrap(),
            parse_key_description("a b c").unwrap()
        );
    }

    #[test]
    fn test_stacked_modifiers_and_minus() {
        let keys = parse_key_description("C-M-x M-- -").unwrap();
        let expected: KeySequence = smallvec![
            keypress!(@char ModifierKeysMask::new().with_ctrl().with_alt(), 'x'),
            keypress!(@char ModifierKeysMask::new().with_alt(), '-'),
            keypress!(@char '-'),
        ];
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_angle_bracket_keys() {
        let keys = parse_key_description("<f3> C-<up> <prior> <").unwrap();
        let expected: KeySequence = smallvec![
            keypress!(@fn FunctionKey::F3),
            keypress!(@special ctrl(), SpecialKey::Up),
            keypress!(@special SpecialKey::PageUp),
            keypress!(@char '<'),
        ];
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_non_ascii_whitespace_keys_read_back() {
        let keys: KeySequence = smallvec![
            keypress!(@char 'a'),
            keypress!(@char '\u{a0}'),
            keypress!(@char '\u{3000}'),
            keypress!(@char 'b'),
        ];
        let parsed = parse_key_description(&format_key_description(&keys)).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed, keys);
    }

    #[test]
    fn test_blank_description_is_empty() {
        assert!(parse_key_description("   ").unwrap().is_empty());
    }

    #[test_case("C-" ; "dangling ctrl")]
    #[test_case("C-M-" ; "dangling stack")]
    fn test_dangling_modifier(description: &str) {
        assert!(matches!(
            parse_key_description(description),
            Err(KeyDescriptionError::DanglingModifier { .. })
        ));
    }

    #[test_case("<frob>" ; "unknown angle name")]
    #[test_case("<f13>" ; "function key out of range")]
    #[test_case("C-foo" ; "modifier on a word")]
    fn test_unknown_key_name(description: &str) {
        assert!(matches!(
            parse_key_description(description),
            Err(KeyDescriptionError::UnknownKeyName { .. })
        ));
    }

    #[test_case("C-x C-k TAB")]
    #[test_case("M-5 C-x e")]
    #[test_case("a SPC b RET DEL ESC")]
    #[test_case("<f3> <f4> C-<left> S-<backtab> <delete>")]
    #[test_case("a \u{a0} \u{3000} b" ; "non ascii whitespace keys")]
    #[test_case("C-\u{3000} M-\u{2003}" ; "non ascii whitespace with modifiers")]
    fn test_format_reads_back(description: &str) {
        let keys = parse_key_description(description).unwrap();
        assert_eq!(format_key_description(&keys), description);
        assert_eq!(parse_key_description(&format_key_description(&keys)).unwrap(), keys);
    }

    #[test]
    fn test_parse_single_key() {
        assert_eq!(parse_single_key("C-j").unwrap(), keypress!(@char ctrl(), 'j'));
        assert_eq!(
            parse_single_key("C-x C-j"),
            Err(KeyDescriptionError::NotASingleKey {
                description: "C-x C-j".to_string(),
                count: 2,
            })
        );
    }
}
