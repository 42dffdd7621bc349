// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Masked input. A mask like `(999) 999-9999` is parsed once into a [`MaskSpec`], and
//! then [`apply_mask`] and [`strip_mask`] run on every keystroke.
//!
//! | Mask char | Accepts                                  |
//! | :-------- | :--------------------------------------- |
//! | `9`       | an ASCII digit                           |
//! | `a`       | a letter (first char is alphabetic)      |
//! | `*`       | anything                                 |
//! | other     | itself, inserted into the display string |
//!
//! Both functions work on grapheme clusters, not bytes or chars, so that a single
//! user perceived character always fills a single slot.

use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation as _;

use crate::{FieldValue, RawValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderClass {
    Digit,
    Letter,
    Any,
}

impl PlaceholderClass {
    #[must_use]
    pub fn from_mask_char(ch: char) -> Option<Self> {
        match ch {
            '9' => Some(PlaceholderClass::Digit),
            'a' => Some(PlaceholderClass::Letter),
            '*' => Some(PlaceholderClass::Any),
            _ => None,
        }
    }

    #[must_use]
    pub fn accepts(self, grapheme: &str) -> bool {
        match self {
            PlaceholderClass::Digit => {
                grapheme.len() == 1 && grapheme.as_bytes()[0].is_ascii_digit()
            }
            PlaceholderClass::Letter => grapheme
                .chars()
                .next()
                .is_some_and(char::is_alphabetic),
            PlaceholderClass::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskToken {
    Placeholder(PlaceholderClass),
    Literal(char),
}

/// Most masks (phone numbers, dates, card numbers) fit without spilling to the heap.
pub type MaskTokens = SmallVec<[MaskToken; 20]>;

/// A parsed mask. An empty mask means "no masking".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskSpec {
    tokens: MaskTokens,
}

impl MaskSpec {
    #[must_use]
    pub fn parse(mask: &str) -> Self {
        let tokens = mask
            .chars()
            .map(|ch| {
                PlaceholderClass::from_mask_char(ch)
                    .map_or(MaskToken::Literal(ch), MaskToken::Placeholder)
            })
            .collect();
        Self { tokens }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    #[must_use]
    pub fn tokens(&self) -> &[MaskToken] { &self.tokens }

    /// The number of user supplied characters a fully filled mask holds.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, MaskToken::Placeholder(_)))
            .count()
    }
}

impl From<&str> for MaskSpec {
    fn from(mask: &str) -> Self { Self::parse(mask) }
}

fn is_literal(grapheme: &str, literal: char) -> bool {
    let mut chars = grapheme.chars();
    chars.next() == Some(literal) && chars.next().is_none()
}

/// Walks the mask and the text together and builds the display string.
///
/// - A literal token is always written. If the next text grapheme *is* that literal it
///   is consumed, so re-applying a mask to its own output changes nothing.
/// - A placeholder token skips text graphemes it doesn't accept and writes the first one
///   it does. If none is left, the result ends there.
/// - The walk stops as soon as the text runs out, so a partially typed value never gets
///   trailing literals.
#[must_use]
pub fn apply_mask(text: &str, spec: &MaskSpec) -> String {
    if spec.is_empty() {
        return text.to_string();
    }

    let mut graphemes = text.graphemes(true).peekable();
    let mut acc = String::with_capacity(text.len() + spec.tokens.len());

    for token in spec.tokens() {
        if graphemes.peek().is_none() {
            break;
        }
        match *token {
            MaskToken::Literal(literal) => {
                acc.push(literal);
                if graphemes.peek().is_some_and(|it| is_literal(it, literal)) {
                    graphemes.next();
                }
            }
            MaskToken::Placeholder(class) => {
                match graphemes.by_ref().find(|it| class.accepts(it)) {
                    Some(grapheme) => acc.push_str(grapheme),
                    None => break,
                }
            }
        }
    }

    acc
}

/// Keeps only the graphemes of `masked` that sit at placeholder positions of the mask.
/// `masked` is expected to be the output of [`apply_mask`].
#[must_use]
pub fn strip_mask(masked: &str, spec: &MaskSpec) -> String {
    if spec.is_empty() {
        return masked.to_string();
    }

    spec.tokens()
        .iter()
        .zip(masked.graphemes(true))
        .filter_map(|(token, grapheme)| {
            matches!(token, MaskToken::Placeholder(_)).then_some(grapheme)
        })
        .collect()
}

/// The mask variant. Raw is the stripped text, display is the masked text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskFormatter {
    spec: MaskSpec,
}

impl MaskFormatter {
    #[must_use]
    pub fn new(spec: MaskSpec) -> Self { Self { spec } }

    #[must_use]
    pub fn spec(&self) -> &MaskSpec { &self.spec }

    /// Used for both keystrokes and writes from the host, since a raw value that was
    /// stripped by this mask re-masks to the same display string.
    #[must_use]
    pub fn format(&self, text: &str) -> (RawValue, String) {
        let display = apply_mask(text, &self.spec);
        let raw = strip_mask(&display, &self.spec);
        (RawValue::Text(raw), display)
    }

    #[must_use]
    pub fn is_in_sync(&self, value: &FieldValue) -> bool {
        value.raw().as_text() == Some(strip_mask(value.display(), &self.spec).as_str())
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    const PHONE: &str = "(999) 999-9999";

    #[test_case(PHONE, "5551234567", "(555) 123-4567" ; "full phone number")]
    #[test_case(PHONE, "555", "(555" ; "partial phone number has no trailing literal")]
    #[test_case(PHONE, "5", "(5" ; "leading literal is written")]
    #[test_case(PHONE, "", "" ; "empty text")]
    #[test_case(PHONE, "55x5-12", "(555) 12" ; "rejected graphemes are skipped")]
    #[test_case(PHONE, "555123456789", "(555) 123-4567" ; "overflow is dropped")]
    #[test_case("99/99/9999", "12252024", "12/25/2024" ; "date")]
    #[test_case("aaa-999", "abc123", "abc-123" ; "letters and digits")]
    #[test_case("aaa-999", "ab1", "ab" ; "letter slot runs out of letters")]
    #[test_case("***", "a1!", "a1!" ; "any accepts anything")]
    #[test_case("", "anything goes", "anything goes" ; "empty mask is pass through")]
    #[test_case("aa", "éü", "éü" ; "non ascii letters")]
    fn test_apply_mask(mask: &str, text: &str, expected: &str) {
        assert_eq2!(apply_mask(text, &MaskSpec::parse(mask)), expected);
    }

    #[test_case(PHONE, "(555) 123-4567", "5551234567" ; "full phone number")]
    #[test_case(PHONE, "(555", "555" ; "partial phone number")]
    #[test_case("99/99/9999", "12/25", "1225" ; "partial date")]
    #[test_case("", "(555)", "(555)" ; "empty mask is pass through")]
    fn test_strip_mask(mask: &str, masked: &str, expected: &str) {
        assert_eq2!(strip_mask(masked, &MaskSpec::parse(mask)), expected);
    }

    #[test]
    fn test_apply_mask_is_idempotent() {
        let spec = MaskSpec::parse(PHONE);
        let inputs = [
            "", "5", "55", "555", "5551", "555123", "5551234567", "(555) 1", "a5b5c5",
            "((((", "555-123", "5551234567890",
        ];
        for text in inputs {
            let once = apply_mask(text, &spec);
            assert_eq2!(apply_mask(&once, &spec), once);
        }
    }

    #[test]
    fn test_strip_undoes_apply_for_digit_text() {
        let spec = MaskSpec::parse(PHONE);
        let digits = "0123456789";
        for len in 0..=digits.len() {
            let text = &digits[..len];
            assert_eq2!(strip_mask(&apply_mask(text, &spec), &spec), text);
        }
        // Longer text is truncated to the number of placeholders.
        assert_eq2!(
            strip_mask(&apply_mask("012345678901234", &spec), &spec),
            "0123456789"
        );
    }

    #[test]
    fn test_graphemes_fill_one_slot_each() {
        // Family emoji is a single grapheme cluster made of several chars.
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let text = format!("{family}x");
        let spec = MaskSpec::parse("*-*");
        assert_eq2!(apply_mask(&text, &spec), format!("{family}-x"));
        assert_eq2!(strip_mask(&apply_mask(&text, &spec), &spec), text);
    }

    #[test]
    fn test_parse() {
        let spec = MaskSpec::parse("(9a*)");
        assert_eq2!(
            spec.tokens(),
            &[
                MaskToken::Literal('('),
                MaskToken::Placeholder(PlaceholderClass::Digit),
                MaskToken::Placeholder(PlaceholderClass::Letter),
                MaskToken::Placeholder(PlaceholderClass::Any),
                MaskToken::Literal(')'),
            ]
        );
        assert_eq2!(spec.placeholder_count(), 3);
        assert!(MaskSpec::parse("").is_empty());
    }

    #[test]
    fn test_formatter() {
        let formatter = MaskFormatter::new(PHONE.into());
        let (raw, display) = formatter.format("555123");
        assert_eq2!(raw, RawValue::from("555123"));
        assert_eq2!(display, "(555) 123");
        assert!(formatter.is_in_sync(&FieldValue::new(raw, display)));
        assert!(!formatter.is_in_sync(&FieldValue::new("555".into(), "(555) 123")));
    }
}
