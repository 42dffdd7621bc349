// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde_json::Value;
use strum_macros::{Display, EnumString};

use crate::RawValue;

/// Non printable keys that a host forwards to [`crate::InputField::handle_key`].
/// Printable input never arrives as a key; it arrives as the full field text through
/// [`crate::InputField::handle_keystroke`].
///
/// The names round trip through [`std::str::FromStr`] so that a host can forward key
/// names it got from somewhere else (the `field_demo` binary reads them from stdin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum FieldKey {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Backspace,
}

/// Where an item selection came from. This is passed through to
/// [`ValueSink::on_item_select`] as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    Keyboard(FieldKey),
    Pointer { index: usize },
}

/// The host side of a field. The field calls this, never the other way around.
///
/// - [`on_value_change`](Self::on_value_change) fires exactly once per keystroke, chip
///   removal, item selection and clear, and once per blur that changed the value.
///   Writes coming from the host never echo back here.
/// - [`on_item_select`](Self::on_item_select) fires when a suggestion is picked.
/// - [`request_focus`](Self::request_focus) fires when the field wants the host to put
///   focus back on it (for example after a pointer selection in the suggestion panel).
pub trait ValueSink {
    fn on_value_change(&mut self, raw: &RawValue);

    fn on_item_select(&mut self, _origin: SelectionOrigin, _value: &Value) {}

    fn request_focus(&mut self) {}
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_key_names_round_trip() {
        assert_eq2!(FieldKey::from_str("ArrowDown").unwrap(), FieldKey::ArrowDown);
        assert_eq2!(FieldKey::Escape.to_string(), "Escape");
        assert!(FieldKey::from_str("Tab").is_err());
    }
}
