// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// The value the field hands to the outside world through
/// [`crate::ValueSink::on_value_change`].
///
/// - Text based variants (plain, mask, chip, autocomplete) use [`RawValue::Text`], and
///   their empty value is `Text("")`.
/// - The numeric variant uses [`RawValue::Number`], and its empty value is
///   [`RawValue::Empty`].
///
/// In JSON this is `null`, a number, or a string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Both [`RawValue::Empty`] and an empty [`RawValue::Text`] count as empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Number(_) => false,
            RawValue::Text(text) => text.is_empty(),
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawValue::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Converts a JSON value picked out of a suggestion item into a raw value. Strings
    /// and numbers keep their type, `null` becomes empty text, and everything else is
    /// stored as its JSON text.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawValue::Text(String::new()),
            serde_json::Value::String(text) => RawValue::Text(text.clone()),
            serde_json::Value::Number(number) => number
                .as_f64()
                .map_or_else(|| RawValue::Text(number.to_string()), RawValue::Number),
            other => RawValue::Text(other.to_string()),
        }
    }
}

impl Display for RawValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RawValue::Empty => Ok(()),
            RawValue::Number(number) => write!(f, "{number}"),
            RawValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self { RawValue::Text(text.to_string()) }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self { RawValue::Text(text) }
}

impl From<f64> for RawValue {
    fn from(number: f64) -> Self { RawValue::Number(number) }
}

/// The canonical `(raw, display)` pair owned by the field.
///
/// There are no public setters for the two halves. The only way to change them is
/// [`FieldValue::set`], which replaces both at once. This is what keeps the display
/// string in step with the raw value: the value controller computes both halves from a
/// single formatting pass and then checks the pair against the active variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldValue {
    raw: RawValue,
    display: String,
}

impl FieldValue {
    #[must_use]
    pub fn new(raw: RawValue, display: impl Into<String>) -> Self {
        Self {
            raw,
            display: display.into(),
        }
    }

    #[must_use]
    pub fn raw(&self) -> &RawValue { &self.raw }

    #[must_use]
    pub fn display(&self) -> &str { &self.display }

    /// Replaces both halves. Returns `true` if either half changed.
    pub fn set(&mut self, raw: RawValue, display: impl Into<String>) -> bool {
        let display = display.into();
        let changed = self.raw != raw || self.display != display;
        self.raw = raw;
        self.display = display;
        changed
    }
}
