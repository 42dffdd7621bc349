// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end runs through [`InputField`], one per variant, fed the way a UI feeds it:
//! one keystroke at a time, each carrying the field's full current text.

use std::{sync::{Arc, Mutex},
          time::Duration};

use futures_util::future::{Ready, ready};
use r3bl_input_field::{AutocompleteConfig, ChipConfig, EventPropagation, FieldConfig,
                       FieldKey, InputField, ItemExtractor, NumericMode, RawValue,
                       RecordingSink, SelectionOrigin, SinkEvent, ValueSink,
                       assert_eq2};
use serde_json::{Value, json};
use tokio::time::Instant;

/// Types `text` one char at a time, appending to whatever the field displays.
fn type_text<S: ValueSink>(field: &mut InputField<S>, text: &str) {
    for ch in text.chars() {
        let mut next = field.display().to_string();
        next.push(ch);
        field.handle_keystroke(&next);
    }
}

fn field(config: FieldConfig) -> InputField<RecordingSink> {
    InputField::try_new(config, RecordingSink::default()).unwrap()
}

#[test]
fn test_plain_field_reports_every_keystroke() {
    let mut field = field(FieldConfig::default());
    field.focus();
    type_text(&mut field, "hey");
    field.blur();

    assert_eq2!(field.display(), "hey");
    assert_eq2!(field.raw(), &RawValue::from("hey"));
    assert_eq2!(
        field.sink().value_changes(),
        vec![
            &RawValue::from("h"),
            &RawValue::from("he"),
            &RawValue::from("hey")
        ]
    );
    assert!(field.is_dirty());
    assert!(field.is_touched());
}

#[test]
fn test_mask_phone_number() {
    let mut field = field(FieldConfig::mask("(999) 999-9999"));
    field.focus();
    type_text(&mut field, "1234567890");

    assert_eq2!(field.display(), "(123) 456-7890");
    assert_eq2!(field.raw(), &RawValue::from("1234567890"));
    assert_eq2!(field.sink().change_count(), 10);

    // The mask is full, so more digits change nothing.
    type_text(&mut field, "1");
    assert_eq2!(field.display(), "(123) 456-7890");

    // Blur leaves a masked value alone and says nothing.
    field.blur();
    assert_eq2!(field.sink().change_count(), 11);
}

#[test]
fn test_mask_deleting_back_through_literals() {
    let mut field = field(FieldConfig::mask("(999) 999-9999"));
    type_text(&mut field, "5551");
    assert_eq2!(field.display(), "(555) 1");

    for expected in ["(555) ", "(555)", "(555", "(55"] {
        let mut text = field.display().to_string();
        text.pop();
        field.handle_keystroke(&text);
        assert_eq2!(field.display(), expected);
    }
    assert_eq2!(field.raw(), &RawValue::from("55"));
}

#[test]
fn test_chip_typing_and_blur() {
    let mut field = field(FieldConfig::chips(ChipConfig::literal(",")));
    field.focus();
    type_text(&mut field, "tag1,tag2,tag3");

    let chips = field.chips().unwrap();
    assert_eq2!(chips.committed, vec!["tag1".to_string(), "tag2".to_string()]);
    assert_eq2!(chips.fragment, "tag3");
    assert_eq2!(field.display(), "tag3");
    assert_eq2!(field.raw(), &RawValue::from("tag1,tag2,tag3"));

    field.blur();
    let chips = field.chips().unwrap();
    assert_eq2!(
        chips.committed,
        vec!["tag1".to_string(), "tag2".to_string(), "tag3".to_string()]
    );
    assert_eq2!(chips.fragment, "");
    assert_eq2!(field.display(), "");
    // Same raw as before, so blur was silent.
    assert_eq2!(field.raw(), &RawValue::from("tag1,tag2,tag3"));
    assert_eq2!(field.sink().change_count(), "tag1,tag2,tag3".len());
}

#[test]
fn test_chip_backspace_and_remove() {
    let mut field = field(FieldConfig::chips(ChipConfig::literal(",")));
    type_text(&mut field, "a, b, c,");
    assert_eq2!(field.raw(), &RawValue::from("a,b,c"));

    assert_eq2!(field.handle_key(FieldKey::Backspace), EventPropagation::Consumed);
    assert_eq2!(field.raw(), &RawValue::from("a,b"));

    assert!(field.remove_chip("a"));
    assert_eq2!(field.raw(), &RawValue::from("b"));

    type_text(&mut field, "x");
    assert_eq2!(field.handle_key(FieldKey::Backspace), EventPropagation::Propagate);
    assert_eq2!(field.raw(), &RawValue::from("b,x"));
}

#[test]
fn test_chip_pattern_separator_and_join() {
    let config = FieldConfig::chips(ChipConfig::pattern(r"[;\s]").with_join("|"));
    let mut field = field(config);
    type_text(&mut field, "red;green blue");
    assert_eq2!(field.raw(), &RawValue::from("red|green|blue"));
    assert_eq2!(field.display(), "blue");

    field.write(Some(RawValue::from("x|y")));
    assert_eq2!(
        field.chips().unwrap().committed,
        vec!["x".to_string(), "y".to_string()]
    );
    assert_eq2!(field.display(), "");
}

#[test]
fn test_currency_formats_on_blur() {
    let mut field = field(FieldConfig::numeric(NumericMode::Currency {
        currency_code: "USD".to_string(),
    }));
    field.focus();
    type_text(&mut field, "1234.56");

    // Editing shows exactly what was typed.
    assert_eq2!(field.display(), "1234.56");
    assert_eq2!(field.raw(), &RawValue::Number(1234.56));

    field.blur();
    assert_eq2!(field.display(), "$1,234.56");
    assert_eq2!(field.raw(), &RawValue::Number(1234.56));
    // Seven keystrokes, and the blur changed the display.
    assert_eq2!(field.sink().change_count(), 8);
}

#[test]
fn test_zero_is_empty_after_blur() {
    let mut field = field(FieldConfig::numeric(NumericMode::Decimal));
    field.focus();
    type_text(&mut field, "0");
    assert_eq2!(field.raw(), &RawValue::Empty);
    assert_eq2!(field.display(), "0");

    field.blur();
    assert_eq2!(field.display(), "");
    assert_eq2!(field.raw(), &RawValue::Empty);
}

#[test]
fn test_currency_requires_code() {
    for code in ["", "dollars", "U$D"] {
        let result = InputField::try_new(
            FieldConfig::numeric(NumericMode::Currency {
                currency_code: code.to_string(),
            }),
            RecordingSink::default(),
        );
        assert!(result.is_err(), "{code:?} should be rejected");
    }
}

#[test]
fn test_field_from_json_config() {
    let config = FieldConfig::try_from_json(
        r#"{"input_type": "number", "mask": "999", "initial_value": 42}"#,
    )
    .unwrap();
    let mut field = field(config);
    assert_eq2!(field.display(), "42.00");
    assert_eq2!(field.raw(), &RawValue::Number(42.0));

    // The mask lost to `input_type`, so this is plain numeric editing.
    field.clear();
    type_text(&mut field, "12345");
    assert_eq2!(field.display(), "12345");
}

const STATES: &[(&str, &str)] = &[
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Apple Land", "AP"),
];

/// A lookup over [`STATES`] that remembers when it was called and with what. It
/// resolves right away, so only the debounce delay shows up in timings.
#[derive(Clone, Default)]
struct StatesLookup {
    calls: Arc<Mutex<Vec<(String, Instant)>>>,
}

impl StatesLookup {
    fn lookup(&self) -> impl Fn(String) -> Ready<miette::Result<Value>> + use<> {
        let calls = self.calls.clone();
        move |query: String| {
            calls.lock().unwrap().push((query.clone(), Instant::now()));
            let query = query.to_lowercase();
            let items = STATES
                .iter()
                .filter(|(name, _)| name.to_lowercase().starts_with(&query))
                .map(|(name, code)| json!({"name": name, "code": code}))
                .collect();
            ready(Ok(Value::Array(items)))
        }
    }

    fn field(&self, min_query_length: usize) -> InputField<RecordingSink> {
        let config = FieldConfig::autocomplete(AutocompleteConfig {
            min_query_length,
            delay_ms: 300,
            label: ItemExtractor::key("name"),
            value: ItemExtractor::key("code"),
            ..Default::default()
        });
        let sink = RecordingSink::default();
        let mut field =
            InputField::try_new_with_lookup(config, sink, self.lookup()).unwrap();
        field.focus();
        field
    }

    fn queries(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(query, _)| query.clone())
            .collect()
    }
}

#[tokio::test(start_paused = true)]
async fn test_autocomplete_one_lookup_after_the_last_keystroke() {
    let states = StatesLookup::default();
    let mut field = states.field(2);

    let start = Instant::now();
    field.handle_keystroke("a");
    tokio::time::advance(Duration::from_millis(60)).await;
    field.handle_keystroke("ap");
    while field.process_next_signal().await {}

    let calls = states.calls.lock().unwrap().clone();
    assert_eq2!(calls.len(), 1);
    assert_eq2!(calls[0].0, "ap");
    assert_eq2!(calls[0].1 - start, Duration::from_millis(360));

    let suggestions = field.suggestions().unwrap();
    assert_eq2!(suggestions.items, vec![json!({"name": "Apple Land", "code": "AP"})]);
    assert!(suggestions.is_open);
    assert!(!suggestions.is_loading);
}

#[tokio::test(start_paused = true)]
async fn test_autocomplete_pick_with_keyboard_then_pointer() {
    let states = StatesLookup::default();
    let mut field = states.field(1);
    type_text(&mut field, "al");
    while field.process_next_signal().await {}
    assert_eq2!(states.queries(), vec!["al".to_string()]);
    assert_eq2!(field.suggestions().unwrap().items.len(), 2);

    // Up from nothing lands on the last item.
    assert_eq2!(field.handle_key(FieldKey::ArrowUp), EventPropagation::Consumed);
    assert_eq2!(field.handle_key(FieldKey::Enter), EventPropagation::Consumed);
    assert_eq2!(field.display(), "Alaska");
    assert_eq2!(field.raw(), &RawValue::from("AK"));

    // Enter with the panel closed is the host's.
    assert_eq2!(field.handle_key(FieldKey::Enter), EventPropagation::Propagate);

    // Reopen, then click the first row while a blur is pending.
    field.handle_keystroke("a");
    while field.process_next_signal().await {}
    field.blur();
    assert_eq2!(field.select_with_pointer(0), EventPropagation::Consumed);
    assert_eq2!(field.display(), "Alabama");
    assert!(field.has_focus());
    while field.process_next_signal().await {}

    let events = field.sink_mut().take();
    assert_eq2!(
        events[events.len() - 3..].to_vec(),
        vec![
            SinkEvent::ValueChange(RawValue::from("AL")),
            SinkEvent::ItemSelect {
                origin: SelectionOrigin::Pointer { index: 0 },
                value: json!("AL"),
            },
            SinkEvent::FocusRequest,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_autocomplete_blur_closes_panel_after_grace() {
    let states = StatesLookup::default();
    let mut field = states.field(1);
    type_text(&mut field, "ar");
    while field.process_next_signal().await {}
    assert!(field.suggestions().unwrap().is_open);

    field.blur();
    // Still open during the grace period.
    assert!(field.suggestions().unwrap().is_open);
    while field.process_next_signal().await {}
    assert!(!field.suggestions().unwrap().is_open);

    // Free text is kept as the value.
    assert_eq2!(field.raw(), &RawValue::from("ar"));
}

#[tokio::test(start_paused = true)]
async fn test_autocomplete_escape_and_clear() {
    let states = StatesLookup::default();
    let mut field = states.field(1);
    type_text(&mut field, "a");
    while field.process_next_signal().await {}

    assert_eq2!(field.handle_key(FieldKey::Escape), EventPropagation::Consumed);
    assert!(!field.suggestions().unwrap().is_open);
    assert_eq2!(field.handle_key(FieldKey::Escape), EventPropagation::Propagate);

    field.clear();
    assert_eq2!(field.display(), "");
    assert!(field.suggestions().unwrap().items.is_empty());
    assert_eq2!(field.sink().events.last(), Some(&SinkEvent::FocusRequest));
}
