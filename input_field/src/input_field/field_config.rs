// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic as _;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::{AutocompleteConfig, NumericMode, RawValue, VariantKind};

/// The HTML style `type` of the field. `number` turns on the numeric variant even
/// without a `numeric` section.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InputType {
    #[default]
    Text,
    Number,
}

/// In JSON: `{"literal": ","}` or `{"pattern": "[,;\\s]"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorConfig {
    Literal(String),
    Pattern(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChipConfig {
    /// No separator means no chips; the field behaves like a plain one.
    pub separator: Option<SeparatorConfig>,
    /// Joins chips in the raw value. Defaults to the literal separator, or `,` for a
    /// pattern.
    pub join: Option<String>,
}

impl ChipConfig {
    #[must_use]
    pub fn literal(separator: impl Into<String>) -> Self {
        Self {
            separator: Some(SeparatorConfig::Literal(separator.into())),
            join: None,
        }
    }

    #[must_use]
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self {
            separator: Some(SeparatorConfig::Pattern(pattern.into())),
            join: None,
        }
    }

    #[must_use]
    pub fn with_join(mut self, join: impl Into<String>) -> Self {
        self.join = Some(join.into());
        self
    }
}

/// Everything a host says about a field. Each optional section asks for one variant;
/// when more than one is present, [`FieldConfig::variant_kind`] picks the winner and the
/// rest are ignored (with a warning when the field is created).
///
/// ```
/// use r3bl_input_field::{FieldConfig, VariantKind};
///
/// let config = FieldConfig::try_from_json(
///     r#"{"numeric": {"kind": "currency", "currency_code": "EUR"}, "mask": "999"}"#,
/// )
/// .unwrap();
/// assert_eq!(config.variant_kind(), VariantKind::Numeric);
/// assert_eq!(config.ignored_sections(), vec!["mask"]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub input_type: InputType,
    pub mask: Option<String>,
    pub chips: Option<ChipConfig>,
    pub numeric: Option<NumericMode>,
    pub autocomplete: Option<AutocompleteConfig>,
    /// Written into the field when it is created, without a change notification.
    pub initial_value: Option<RawValue>,
}

impl FieldConfig {
    #[must_use]
    pub fn mask(mask: impl Into<String>) -> Self {
        Self {
            mask: Some(mask.into()),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn chips(chips: ChipConfig) -> Self {
        Self {
            chips: Some(chips),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn numeric(mode: NumericMode) -> Self {
        Self {
            numeric: Some(mode),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn autocomplete(autocomplete: AutocompleteConfig) -> Self {
        Self {
            autocomplete: Some(autocomplete),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_initial_value(mut self, value: impl Into<RawValue>) -> Self {
        self.initial_value = Some(value.into());
        self
    }

    /// # Errors
    ///
    /// Returns an error if `json` isn't a valid config object.
    pub fn try_from_json(json: &str) -> miette::Result<Self> {
        serde_json::from_str(json).into_diagnostic()
    }

    /// Precedence: autocomplete, then numeric (a `numeric` section or `input_type:
    /// number`), then chips, then mask, then plain.
    #[must_use]
    pub fn variant_kind(&self) -> VariantKind {
        if self.autocomplete.is_some() {
            VariantKind::Autocomplete
        } else if self.numeric.is_some() || self.input_type == InputType::Number {
            VariantKind::Numeric
        } else if self.chips.is_some() {
            VariantKind::Chip
        } else if self.mask.is_some() {
            VariantKind::Mask
        } else {
            VariantKind::Plain
        }
    }

    /// Sections that are present but lost to [`variant_kind`](Self::variant_kind).
    #[must_use]
    pub fn ignored_sections(&self) -> Vec<&'static str> {
        let kind = self.variant_kind();
        let mut acc = vec![];
        if self.input_type == InputType::Number && kind != VariantKind::Numeric {
            acc.push("input_type");
        }
        if self.numeric.is_some() && kind != VariantKind::Numeric {
            acc.push("numeric");
        }
        if self.chips.is_some() && kind != VariantKind::Chip {
            acc.push("chips");
        }
        if self.mask.is_some() && kind != VariantKind::Mask {
            acc.push("mask");
        }
        acc
    }
}
