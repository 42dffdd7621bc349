// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tokenized "chip" input. The user types `rust, tokio,` and gets two chips and an empty
//! fragment. The raw value is every chip (plus the fragment, if any) joined with the
//! join literal.

use regex::Regex;

use crate::{FieldValue, RawValue};

pub const DEFAULT_CHIP_JOIN: &str = ",";

/// What splits the text into chips.
#[derive(Debug, Clone)]
pub enum ChipSeparator {
    /// Any occurrence of this string is a separator.
    Literal(String),
    /// Any single character matching this pattern is a separator. The pattern is
    /// anchored at both ends, so `[,;]` and `\s` work, and a pattern that only matches
    /// longer strings never matches.
    Pattern(Regex),
}

impl ChipSeparator {
    /// Returns [None] for an empty literal, which means "no chip splitting".
    #[must_use]
    pub fn literal(separator: impl Into<String>) -> Option<Self> {
        let separator = separator.into();
        (!separator.is_empty()).then_some(ChipSeparator::Literal(separator))
    }

    /// # Errors
    ///
    /// Returns an error if `pattern` isn't a valid regex.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(&format!("^(?:{pattern})$")).map(ChipSeparator::Pattern)
    }

    /// A literal separator joins with itself, a pattern joins with
    /// [`DEFAULT_CHIP_JOIN`].
    #[must_use]
    pub fn default_join(&self) -> &str {
        match self {
            ChipSeparator::Literal(literal) => literal,
            ChipSeparator::Pattern(_) => DEFAULT_CHIP_JOIN,
        }
    }

    /// Splits at every separator occurrence. There is always at least one segment.
    #[must_use]
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            ChipSeparator::Literal(literal) => text.split(literal.as_str()).collect(),
            ChipSeparator::Pattern(regex) => {
                let mut buffer = [0_u8; 4];
                text.split(|ch: char| regex.is_match(ch.encode_utf8(&mut buffer)))
                    .collect()
            }
        }
    }
}

/// The committed chips and the text still being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipSet {
    pub committed: Vec<String>,
    pub fragment: String,
}

impl ChipSet {
    /// Committed chips joined with `join`, followed by `join` and the fragment when the
    /// fragment isn't empty.
    #[must_use]
    pub fn to_raw(&self, join: &str) -> String {
        let mut acc = self.committed.join(join);
        if !self.fragment.is_empty() {
            if !acc.is_empty() {
                acc.push_str(join);
            }
            acc.push_str(&self.fragment);
        }
        acc
    }
}

/// The chip variant.
///
/// When there is no separator this behaves exactly like the plain variant: no chips, and
/// the text is the raw value.
#[derive(Debug, Clone, Default)]
pub struct ChipTokenizer {
    separator: Option<ChipSeparator>,
    join: String,
    chips: ChipSet,
}

impl ChipTokenizer {
    /// `join` falls back to [`ChipSeparator::default_join`] when it is [None].
    #[must_use]
    pub fn new(separator: Option<ChipSeparator>, join: Option<String>) -> Self {
        let join = join.unwrap_or_else(|| {
            separator
                .as_ref()
                .map_or(DEFAULT_CHIP_JOIN, ChipSeparator::default_join)
                .to_string()
        });
        Self {
            separator,
            join,
            chips: ChipSet::default(),
        }
    }

    #[must_use]
    pub fn chips(&self) -> &ChipSet { &self.chips }

    #[must_use]
    pub fn join(&self) -> &str { &self.join }

    #[must_use]
    pub fn is_pass_through(&self) -> bool { self.separator.is_none() }

    fn current(&self) -> (RawValue, String) {
        (
            RawValue::Text(self.chips.to_raw(&self.join)),
            self.chips.fragment.clone(),
        )
    }

    /// Every complete segment (trimmed, non empty) becomes a chip. The last segment is
    /// the new fragment, and it is also what the field displays.
    ///
    /// The join literal splits too, even when it isn't the separator. A chip holding it
    /// would read back as two chips from the raw value.
    pub fn on_keystroke(&mut self, text: &str) -> (RawValue, String) {
        let Some(separator) = &self.separator else {
            return (RawValue::Text(text.to_string()), text.to_string());
        };

        let segments: Vec<&str> = separator
            .split(text)
            .into_iter()
            .flat_map(|segment| split_on_join(segment, &self.join))
            .collect();
        let Some((tail, complete)) = segments.split_last() else {
            return self.current();
        };

        for segment in complete {
            let chip = segment.trim();
            if !chip.is_empty() {
                self.chips.committed.push(chip.to_string());
            }
        }
        if !complete.is_empty() {
            tracing::debug!(chips = ?self.chips.committed, "committed chips");
        }
        self.chips.fragment = tail.trim_start().to_string();

        self.current()
    }

    /// Backspace in an empty fragment removes the newest chip. Returns [None] when the
    /// key should go to the host instead.
    pub fn on_backspace(&mut self) -> Option<(RawValue, String)> {
        if self.separator.is_none() || !self.chips.fragment.is_empty() {
            return None;
        }
        let removed = self.chips.committed.pop()?;
        tracing::debug!(chip = %removed, "removed newest chip");
        Some(self.current())
    }

    /// A non blank fragment becomes a chip.
    pub fn on_blur(&mut self) -> Option<(RawValue, String)> {
        self.separator.as_ref()?;
        let chip = self.chips.fragment.trim();
        if !chip.is_empty() {
            self.chips.committed.push(chip.to_string());
        }
        self.chips.fragment.clear();
        Some(self.current())
    }

    /// Removes the first chip equal to `name`. Returns [None] if there is no such chip.
    pub fn remove_chip(&mut self, name: &str) -> Option<(RawValue, String)> {
        let index = self.chips.committed.iter().position(|it| it == name)?;
        self.chips.committed.remove(index);
        Some(self.current())
    }

    /// A write from the host. The text is split on the join literal and every non blank
    /// piece becomes a chip.
    pub fn on_write(&mut self, text: &str) -> (RawValue, String) {
        if self.separator.is_none() {
            return (RawValue::Text(text.to_string()), text.to_string());
        }

        self.chips = ChipSet::default();
        self.chips.committed = split_on_join(text, &self.join)
            .into_iter()
            .map(str::trim)
            .filter(|it| !it.is_empty())
            .map(str::to_string)
            .collect();

        self.current()
    }

    pub fn clear(&mut self) { self.chips = ChipSet::default(); }

    #[must_use]
    pub fn is_in_sync(&self, value: &FieldValue) -> bool {
        if self.separator.is_none() {
            return value.raw().as_text() == Some(value.display());
        }
        value.display() == self.chips.fragment
            && value.raw().as_text() == Some(self.chips.to_raw(&self.join).as_str())
    }
}

fn split_on_join<'a>(text: &'a str, join: &str) -> Vec<&'a str> {
    if join.is_empty() {
        vec![text]
    } else {
        text.split(join).collect()
    }
}
