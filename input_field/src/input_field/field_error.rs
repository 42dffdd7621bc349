// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::Diagnostic;

/// Setup errors. These are the only errors a field ever returns; everything that goes
/// wrong after setup (a failed lookup, text that doesn't fit a mask) is handled inside
/// the field and logged.
#[derive(Debug, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum FieldConfigError {
    #[error("Currency mode needs a currency code")]
    #[diagnostic(
        code(r3bl_input_field::numeric::missing_currency_code),
        help("Set `currency_code` to an ISO 4217 code, eg: \"USD\"")
    )]
    MissingCurrencyCode,

    #[error("Currency code {code:?} is not a three letter ISO 4217 code")]
    #[diagnostic(
        code(r3bl_input_field::numeric::invalid_currency_code),
        help("Use three ASCII letters, eg: \"EUR\" or \"jpy\"")
    )]
    InvalidCurrencyCode { code: String },

    #[error("Autocomplete field has no suggestion lookup")]
    #[diagnostic(
        code(r3bl_input_field::autocomplete::missing_lookup),
        help("Create the field with `InputField::try_new_with_lookup()`")
    )]
    MissingLookup,
}
