// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Formatted numeric input. While the field has focus the text is left alone and only
//! parsed; on blur the text is replaced with the formatted number.

use serde::{Deserialize, Serialize};

use crate::{FieldConfigError, FieldValue, RawValue};

/// How the numeric variant formats on blur.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NumericMode {
    /// Two fixed decimals, no grouping. Eg: `1234.50`.
    #[default]
    Decimal,
    /// en-US currency style. Eg: `$1,234.50`, `¥1,235`, `-€3.00`.
    Currency { currency_code: String },
}

/// Symbol and number of fraction digits for an ISO 4217 code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub fraction_digits: usize,
}

/// Symbols as they appear in en-US formatting. Codes not listed here are shown as
/// `"XYZ 1,234.56"`.
const CURRENCY_TABLE: &[(&str, &str, usize)] = &[
    ("USD", "$", 2),
    ("EUR", "€", 2),
    ("GBP", "£", 2),
    ("JPY", "¥", 0),
    ("CNY", "CN¥", 2),
    ("INR", "₹", 2),
    ("KRW", "₩", 0),
    ("CAD", "CA$", 2),
    ("AUD", "A$", 2),
    ("NZD", "NZ$", 2),
    ("MXN", "MX$", 2),
    ("BRL", "R$", 2),
    ("HKD", "HK$", 2),
    ("TWD", "NT$", 2),
    ("ILS", "₪", 2),
    ("VND", "₫", 0),
    ("PHP", "₱", 2),
];

impl CurrencyFormat {
    /// # Errors
    ///
    /// - [`FieldConfigError::MissingCurrencyCode`] if `code` is blank.
    /// - [`FieldConfigError::InvalidCurrencyCode`] if `code` isn't three ASCII letters.
    pub fn try_new(code: &str) -> Result<Self, FieldConfigError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(FieldConfigError::MissingCurrencyCode);
        }
        if code.len() != 3 || !code.bytes().all(|it| it.is_ascii_alphabetic()) {
            return Err(FieldConfigError::InvalidCurrencyCode {
                code: code.to_string(),
            });
        }

        let code = code.to_ascii_uppercase();
        let (symbol, fraction_digits) = CURRENCY_TABLE
            .iter()
            .find(|(it, _, _)| *it == code)
            .map_or_else(
                || (format!("{code} "), 2),
                |(_, symbol, digits)| ((*symbol).to_string(), *digits),
            );

        Ok(Self {
            code,
            symbol,
            fraction_digits,
        })
    }

    #[must_use]
    pub fn format(&self, number: f64) -> String {
        let fixed = round_abs_half_away_from_zero(number, self.fraction_digits);
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (fixed.as_str(), None),
        };

        let mut acc = String::with_capacity(fixed.len() + self.symbol.len() + 8);
        if shows_minus(number, &fixed) {
            acc.push('-');
        }
        acc.push_str(&self.symbol);
        acc.push_str(&group_thousands(int_part));
        if let Some(frac_part) = frac_part {
            acc.push('.');
            acc.push_str(frac_part);
        }
        acc
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut acc = String::with_capacity(len + len / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            acc.push(',');
        }
        acc.push(ch);
    }
    acc
}

/// Lenient parse of whatever the user typed.
///
/// 1. Every character other than ASCII digits, `.` and `-` is dropped, so `$1,234.5`
///    reads as `1234.5`.
/// 2. The longest prefix that looks like `-?digits.digits` is parsed, so `12.3.4` reads
///    as `12.3` and `5-` reads as `5`.
/// 3. Anything that doesn't start with a number (an empty string, a lone `-`) is `0`.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    let filtered: String = text
        .chars()
        .filter(|it| it.is_ascii_digit() || *it == '.' || *it == '-')
        .collect();
    let bytes = filtered.as_bytes();

    let mut end = usize::from(bytes.first() == Some(&b'-'));
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let has_int_digits = end > int_start;

    let mut has_frac_digits = false;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        has_frac_digits = frac_end > end + 1;
        if has_int_digits || has_frac_digits {
            end = frac_end;
        }
    }

    if !has_int_digits && !has_frac_digits {
        return 0.0;
    }

    match filtered[..end].parse::<f64>() {
        Ok(number) if number.is_finite() => number,
        _ => 0.0,
    }
}

/// `1234.5` becomes `"1234.50"`. Ties round away from zero, so `0.125` becomes
/// `"0.13"`.
#[must_use]
pub fn format_decimal(number: f64) -> String {
    let fixed = round_abs_half_away_from_zero(number, 2);
    if shows_minus(number, &fixed) {
        format!("-{fixed}")
    } else {
        fixed
    }
}

/// A negative number that rounds to zero is shown without a sign.
fn shows_minus(number: f64, fixed: &str) -> bool {
    number < 0.0 && fixed.bytes().any(|it| matches!(it, b'1'..=b'9'))
}

/// `|number|` with `fraction_digits` decimals, rounded half away from zero.
///
/// `{:.N}` alone rounds exact ties to even (`0.125` to `"0.12"`). So the exact decimal
/// expansion of the binary value is printed first, and the first dropped digit decides.
/// Values that only look like ties stay put: `2.675` is stored as `2.67499..` and
/// becomes `"2.67"`.
fn round_abs_half_away_from_zero(number: f64, fraction_digits: usize) -> String {
    let abs = number.abs();
    let precision = exact_fraction_digits(abs).max(fraction_digits + 1);
    let exact = format!("{abs:.precision$}");

    // `inf` and `NaN` have no dot.
    let Some(dot) = exact.find('.') else {
        return exact;
    };
    let first_dropped = dot + 1 + fraction_digits;
    let kept_end = if fraction_digits == 0 { dot } else { first_dropped };
    let mut kept = exact.as_bytes()[..kept_end].to_vec();

    if exact.as_bytes()[first_dropped] >= b'5' {
        increment_decimal(&mut kept);
    }

    String::from_utf8(kept).unwrap_or_default()
}

/// How many fraction digits the exact decimal expansion of `number` needs at most. An
/// `f64` is `mantissa * 2^exponent`, and `2^-k` has `k` fraction digits.
fn exact_fraction_digits(number: f64) -> usize {
    let biased_exponent = (number.to_bits() >> 52) & 0x7ff;
    // Subnormals share the exponent of the smallest normal.
    let digits = 1075_u64.saturating_sub(biased_exponent.max(1));
    usize::try_from(digits).unwrap_or(1074)
}

/// Adds one unit in the last place to an ASCII decimal like `"9.99"`, giving `"10.00"`.
fn increment_decimal(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        match *digit {
            b'.' => {}
            b'9' => *digit = b'0',
            _ => {
                *digit += 1;
                return;
            }
        }
    }
    digits.insert(0, b'1');
}

/// Zero (and negative zero) is stored as the empty raw value.
fn number_or_empty(number: f64) -> RawValue {
    if number == 0.0 {
        RawValue::Empty
    } else {
        RawValue::Number(number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NumericStyle {
    Decimal,
    Currency(CurrencyFormat),
}

/// The numeric variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericFormatter {
    style: NumericStyle,
}

impl NumericFormatter {
    /// # Errors
    ///
    /// Returns an error if the mode is currency and the code is missing or malformed.
    pub fn try_new(mode: &NumericMode) -> Result<Self, FieldConfigError> {
        let style = match mode {
            NumericMode::Decimal => NumericStyle::Decimal,
            NumericMode::Currency { currency_code } => {
                NumericStyle::Currency(CurrencyFormat::try_new(currency_code)?)
            }
        };
        Ok(Self { style })
    }

    #[must_use]
    pub fn currency(&self) -> Option<&CurrencyFormat> {
        match &self.style {
            NumericStyle::Decimal => None,
            NumericStyle::Currency(currency) => Some(currency),
        }
    }

    #[must_use]
    pub fn format(&self, number: f64) -> String {
        match &self.style {
            NumericStyle::Decimal => format_decimal(number),
            NumericStyle::Currency(currency) => currency.format(number),
        }
    }

    /// The text stays exactly as typed; only the raw value follows it.
    #[must_use]
    pub fn on_keystroke(&self, text: &str) -> (RawValue, String) {
        (number_or_empty(parse_number(text)), text.to_string())
    }

    /// Zero clears the field, anything else is reformatted.
    #[must_use]
    pub fn on_blur(&self, display: &str) -> (RawValue, String) {
        self.formatted(parse_number(display))
    }

    /// A write from the host is shown formatted right away.
    #[must_use]
    pub fn on_write(&self, raw: &RawValue) -> (RawValue, String) {
        match raw {
            RawValue::Empty => (RawValue::Empty, String::new()),
            RawValue::Number(number) if number.is_finite() => self.formatted(*number),
            RawValue::Number(_) => (RawValue::Empty, String::new()),
            RawValue::Text(text) => self.formatted(parse_number(text)),
        }
    }

    fn formatted(&self, number: f64) -> (RawValue, String) {
        match number_or_empty(number) {
            RawValue::Number(number) => (RawValue::Number(number), self.format(number)),
            _ => (RawValue::Empty, String::new()),
        }
    }

    /// While editing the display is the typed text, after blur it is the formatted
    /// number. Either way the raw value is readable from it.
    #[must_use]
    pub fn is_in_sync(&self, value: &FieldValue) -> bool {
        match value.raw() {
            RawValue::Empty => parse_number(value.display()) == 0.0,
            RawValue::Number(number) => {
                parse_number(value.display()) == *number
                    || self.format(*number) == value.display()
            }
            RawValue::Text(_) => false,
        }
    }
}
