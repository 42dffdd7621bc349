// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{Display, EnumString};

use crate::{ChipConfig, ChipSeparator, ChipTokenizer, FieldConfig, FieldConfigError,
            FieldValue, MaskFormatter, MaskSpec, NumericFormatter, NumericMode, RawValue,
            SeparatorConfig, SharedLookup, SuggestionEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum VariantKind {
    Plain,
    Mask,
    Chip,
    Numeric,
    Autocomplete,
}

/// The one behavior a field has. Each variant owns the state only it needs, so a mask
/// field has no chips and a chip field has no suggestions.
///
/// Every handler returns the new `(raw, display)` pair and leaves committing it to the
/// value controller.
#[derive(Debug)]
pub enum Variant {
    Plain,
    Mask(MaskFormatter),
    Chip(ChipTokenizer),
    Numeric(NumericFormatter),
    Autocomplete(Box<SuggestionEngine>),
}

impl Variant {
    /// Routes `config` to a variant. Sections that lose the routing, and a lookup given
    /// to a field that isn't autocomplete, are logged and otherwise ignored.
    ///
    /// # Errors
    ///
    /// - [`FieldConfigError::MissingLookup`] for autocomplete without a lookup.
    /// - [`FieldConfigError::MissingCurrencyCode`] and
    ///   [`FieldConfigError::InvalidCurrencyCode`] for a bad currency section.
    pub fn try_new(
        config: &FieldConfig,
        lookup: Option<SharedLookup>,
    ) -> Result<Self, FieldConfigError> {
        let kind = config.variant_kind();

        for section in config.ignored_sections() {
            tracing::warn!(section, variant = %kind, "config section ignored");
        }
        if lookup.is_some() && kind != VariantKind::Autocomplete {
            tracing::warn!(variant = %kind, "lookup ignored, field is not autocomplete");
        }

        Ok(match kind {
            VariantKind::Plain => Variant::Plain,
            VariantKind::Mask => Variant::Mask(MaskFormatter::new(MaskSpec::parse(
                config.mask.as_deref().unwrap_or_default(),
            ))),
            VariantKind::Chip => Variant::Chip(create_chip_tokenizer(
                config.chips.as_ref().cloned().unwrap_or_default(),
            )),
            VariantKind::Numeric => Variant::Numeric(NumericFormatter::try_new(
                config.numeric.as_ref().unwrap_or(&NumericMode::Decimal),
            )?),
            VariantKind::Autocomplete => {
                let lookup = lookup.ok_or(FieldConfigError::MissingLookup)?;
                Variant::Autocomplete(Box::new(SuggestionEngine::new(
                    config.autocomplete.clone().unwrap_or_default(),
                    lookup,
                )))
            }
        })
    }

    #[must_use]
    pub fn kind(&self) -> VariantKind {
        match self {
            Variant::Plain => VariantKind::Plain,
            Variant::Mask(_) => VariantKind::Mask,
            Variant::Chip(_) => VariantKind::Chip,
            Variant::Numeric(_) => VariantKind::Numeric,
            Variant::Autocomplete(_) => VariantKind::Autocomplete,
        }
    }

    /// Numeric fields are empty when there is no number; every other field is empty
    /// text.
    #[must_use]
    pub fn empty_raw(&self) -> RawValue {
        match self {
            Variant::Numeric(_) => RawValue::Empty,
            _ => RawValue::Text(String::new()),
        }
    }

    /// A write from the host. Text variants stringify numbers; the numeric variant
    /// parses text. An autocomplete field drops whatever query was pending.
    pub fn on_write(&mut self, value: Option<&RawValue>) -> (RawValue, String) {
        let text = || value.map(ToString::to_string).unwrap_or_default();
        match self {
            Variant::Plain => {
                let text = text();
                (RawValue::Text(text.clone()), text)
            }
            Variant::Autocomplete(engine) => {
                let text = text();
                engine.on_write(&text);
                (RawValue::Text(text.clone()), text)
            }
            Variant::Mask(formatter) => formatter.format(&text()),
            Variant::Chip(tokenizer) => tokenizer.on_write(&text()),
            Variant::Numeric(formatter) => {
                formatter.on_write(value.unwrap_or(&RawValue::Empty))
            }
        }
    }

    /// `text` is the full current text of the field.
    pub fn on_keystroke(&mut self, text: &str) -> (RawValue, String) {
        match self {
            Variant::Plain => (RawValue::Text(text.to_string()), text.to_string()),
            Variant::Mask(formatter) => formatter.format(text),
            Variant::Chip(tokenizer) => tokenizer.on_keystroke(text),
            Variant::Numeric(formatter) => formatter.on_keystroke(text),
            Variant::Autocomplete(engine) => {
                engine.on_keystroke(text);
                (RawValue::Text(text.to_string()), text.to_string())
            }
        }
    }

    /// Returns [None] when blur leaves the value alone.
    pub fn on_blur(&mut self, current: &FieldValue) -> Option<(RawValue, String)> {
        match self {
            Variant::Plain | Variant::Mask(_) => None,
            Variant::Chip(tokenizer) => tokenizer.on_blur(),
            Variant::Numeric(formatter) => Some(formatter.on_blur(current.display())),
            Variant::Autocomplete(engine) => {
                engine.on_blur();
                None
            }
        }
    }

    pub fn on_focus(&mut self) {
        if let Variant::Autocomplete(engine) = self {
            engine.on_focus();
        }
    }

    /// Drops variant state (chips, suggestions) that isn't part of the value.
    pub fn clear(&mut self) {
        match self {
            Variant::Chip(tokenizer) => tokenizer.clear(),
            Variant::Autocomplete(engine) => engine.clear(),
            Variant::Plain | Variant::Mask(_) | Variant::Numeric(_) => {}
        }
    }

    /// Is `display` what this variant's formatting rule produces for `raw`? Free text in
    /// an autocomplete field and a picked item's label are both valid displays, so that
    /// variant is always in sync.
    #[must_use]
    pub fn is_in_sync(&self, value: &FieldValue) -> bool {
        match self {
            Variant::Plain => value.raw().as_text() == Some(value.display()),
            Variant::Mask(formatter) => formatter.is_in_sync(value),
            Variant::Chip(tokenizer) => tokenizer.is_in_sync(value),
            Variant::Numeric(formatter) => formatter.is_in_sync(value),
            Variant::Autocomplete(_) => true,
        }
    }
}

fn create_chip_tokenizer(config: ChipConfig) -> ChipTokenizer {
    let separator = match config.separator {
        None => None,
        Some(SeparatorConfig::Literal(literal)) => ChipSeparator::literal(literal),
        Some(SeparatorConfig::Pattern(pattern)) => {
            match ChipSeparator::pattern(&pattern) {
                Ok(separator) => Some(separator),
                Err(error) => {
                    tracing::warn!(
                        pattern = %pattern,
                        error = %error,
                        "chip separator pattern is not a valid regex"
                    );
                    None
                }
            }
        }
    };

    if separator.is_none() {
        tracing::warn!("chip field has no separator, chips are disabled");
    }

    ChipTokenizer::new(separator, config.join)
}
