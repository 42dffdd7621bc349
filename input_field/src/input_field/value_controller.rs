// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use serde_json::Value;

use crate::{ChipSet, EventPropagation, FieldConfig, FieldConfigError, FieldKey,
            FieldValue, RawValue, SelectionOrigin, SuggestionKeyAction, SuggestionLookup,
            SuggestionSignal, SuggestionState, ValueSink, Variant, VariantKind};

/// The value controller. Every keystroke enters here first, goes through the field's one
/// [`Variant`], and the resulting `(raw, display)` pair is committed to the
/// [`FieldValue`] before the [`ValueSink`] hears about it.
///
/// Notifications:
/// - One [`ValueSink::on_value_change`] per keystroke, chip removal, item selection and
///   [`clear`](Self::clear).
/// - One per [`blur`](Self::blur), but only if blur changed the value.
/// - None for [`write`](Self::write), which is the host talking.
///
/// All methods take `&mut self`. The host is the only writer, and the autocomplete
/// variant's async work is applied through [`apply_signal`](Self::apply_signal) on the
/// host's own task.
#[derive(Debug)]
pub struct InputField<S: ValueSink> {
    variant: Variant,
    value: FieldValue,
    sink: S,
    has_focus: bool,
    is_dirty: bool,
    is_touched: bool,
}

impl<S: ValueSink> InputField<S> {
    /// # Errors
    ///
    /// Returns an error for a bad currency section, or an autocomplete section (which
    /// needs [`try_new_with_lookup`](Self::try_new_with_lookup)).
    pub fn try_new(config: FieldConfig, sink: S) -> Result<Self, FieldConfigError> {
        Self::create(&config, sink, None)
    }

    /// # Errors
    ///
    /// Returns an error for a bad currency section.
    pub fn try_new_with_lookup(
        config: FieldConfig,
        sink: S,
        lookup: impl SuggestionLookup,
    ) -> Result<Self, FieldConfigError> {
        Self::create(&config, sink, Some(Arc::new(lookup)))
    }

    fn create(
        config: &FieldConfig,
        sink: S,
        lookup: Option<Arc<dyn SuggestionLookup>>,
    ) -> Result<Self, FieldConfigError> {
        let variant = Variant::try_new(config, lookup)?;
        let mut it = Self {
            value: FieldValue::new(variant.empty_raw(), ""),
            variant,
            sink,
            has_focus: false,
            is_dirty: false,
            is_touched: false,
        };
        if let Some(initial_value) = &config.initial_value {
            it.write(Some(initial_value.clone()));
        }
        tracing::debug!(
            variant = %it.variant.kind(),
            display = %it.value.display(),
            "field created"
        );
        Ok(it)
    }

    // ╭──────────────────────────────────────────────────────────╮
    // │ Commit                                                   │
    // ╰──────────────────────────────────────────────────────────╯

    /// The only place the value changes. Returns `true` if it did.
    fn commit(&mut self, (raw, display): (RawValue, String)) -> bool {
        let changed = self.value.set(raw, display);
        debug_assert!(
            self.variant.is_in_sync(&self.value),
            "{} field out of sync: {:?}",
            self.variant.kind(),
            self.value
        );
        changed
    }

    fn notify_value_change(&mut self) {
        self.is_dirty = true;
        self.sink.on_value_change(self.value.raw());
    }

    fn commit_item(&mut self, item: &Value, origin: SelectionOrigin) {
        let Variant::Autocomplete(engine) = &self.variant else {
            return;
        };
        let label = engine.label_of(item);
        let value = engine.value_of(item);
        tracing::debug!(?origin, label = %label, "suggestion picked");

        self.commit((RawValue::from_json(&value), label));
        self.notify_value_change();
        self.sink.on_item_select(origin, &value);
    }

    // ╭──────────────────────────────────────────────────────────╮
    // │ Host input                                               │
    // ╰──────────────────────────────────────────────────────────╯

    /// Sets the value from the host. [None] empties the field. No change notification.
    pub fn write(&mut self, value: Option<RawValue>) {
        let next = self.variant.on_write(value.as_ref());
        self.commit(next);
    }

    /// `text` is the full current text of the field, not the key that was pressed.
    pub fn handle_keystroke(&mut self, text: &str) {
        let next = self.variant.on_keystroke(text);
        self.commit(next);
        self.notify_value_change();
    }

    /// [`EventPropagation::Consumed`] means the field acted on the key and the host
    /// should skip its default action (moving the caret, submitting a form, deleting a
    /// char).
    pub fn handle_key(&mut self, key: FieldKey) -> EventPropagation {
        match &mut self.variant {
            Variant::Chip(tokenizer) if key == FieldKey::Backspace => {
                match tokenizer.on_backspace() {
                    Some(next) => {
                        self.commit(next);
                        self.notify_value_change();
                        EventPropagation::Consumed
                    }
                    None => EventPropagation::Propagate,
                }
            }
            Variant::Autocomplete(engine) => match engine.handle_key(key) {
                SuggestionKeyAction::Ignored => EventPropagation::Propagate,
                SuggestionKeyAction::CursorMoved | SuggestionKeyAction::Closed => {
                    EventPropagation::Consumed
                }
                SuggestionKeyAction::Commit(item) => {
                    self.commit_item(&item, SelectionOrigin::Keyboard(key));
                    EventPropagation::Consumed
                }
            },
            _ => EventPropagation::Propagate,
        }
    }

    /// A click on the suggestion row at `index`. The click doesn't take focus away
    /// from the field: a pending blur is cancelled and the sink is asked for focus.
    pub fn select_with_pointer(&mut self, index: usize) -> EventPropagation {
        let Variant::Autocomplete(engine) = &mut self.variant else {
            return EventPropagation::Propagate;
        };
        let Some(item) = engine.select_index(index) else {
            return EventPropagation::Propagate;
        };
        self.has_focus = true;
        self.commit_item(&item, SelectionOrigin::Pointer { index });
        self.sink.request_focus();
        EventPropagation::Consumed
    }

    /// Returns `false` if this isn't a chip field or there is no such chip.
    pub fn remove_chip(&mut self, name: &str) -> bool {
        let Variant::Chip(tokenizer) = &mut self.variant else {
            return false;
        };
        let Some(next) = tokenizer.remove_chip(name) else {
            return false;
        };
        self.commit(next);
        self.notify_value_change();
        true
    }

    /// The clear button: empties the field and hands focus back to it.
    pub fn clear(&mut self) {
        self.variant.clear();
        let empty = (self.variant.empty_raw(), String::new());
        self.commit(empty);
        self.notify_value_change();
        self.sink.request_focus();
    }

    pub fn focus(&mut self) {
        self.has_focus = true;
        self.variant.on_focus();
    }

    pub fn blur(&mut self) {
        self.has_focus = false;
        self.is_touched = true;
        let Some(next) = self.variant.on_blur(&self.value) else {
            return;
        };
        if self.commit(next) {
            self.notify_value_change();
        }
    }

    // ╭──────────────────────────────────────────────────────────╮
    // │ Async signals (autocomplete only)                        │
    // ╰──────────────────────────────────────────────────────────╯

    /// See [`crate::SuggestionEngine::next_signal`]. Always [None] for fields that
    /// aren't autocomplete.
    pub async fn next_signal(&mut self) -> Option<SuggestionSignal> {
        match &mut self.variant {
            Variant::Autocomplete(engine) => engine.next_signal().await,
            _ => None,
        }
    }

    pub fn apply_signal(&mut self, signal: SuggestionSignal) {
        if let Variant::Autocomplete(engine) = &mut self.variant {
            engine.apply_signal(signal);
        }
    }

    /// Waits for the next signal and applies it. Returns `false` once there is nothing
    /// left to wait for, so `while field.process_next_signal().await {}` runs every
    /// pending debounce, lookup and blur grace to completion.
    pub async fn process_next_signal(&mut self) -> bool {
        match self.next_signal().await {
            Some(signal) => {
                self.apply_signal(signal);
                true
            }
            None => false,
        }
    }

    // ╭──────────────────────────────────────────────────────────╮
    // │ Accessors                                                │
    // ╰──────────────────────────────────────────────────────────╯

    #[must_use]
    pub fn raw(&self) -> &RawValue { self.value.raw() }

    #[must_use]
    pub fn display(&self) -> &str { self.value.display() }

    #[must_use]
    pub fn value(&self) -> &FieldValue { &self.value }

    /// A user mutation has been reported to the sink.
    #[must_use]
    pub fn is_dirty(&self) -> bool { self.is_dirty }

    /// The field has been blurred at least once.
    #[must_use]
    pub fn is_touched(&self) -> bool { self.is_touched }

    #[must_use]
    pub fn has_focus(&self) -> bool { self.has_focus }

    #[must_use]
    pub fn variant_kind(&self) -> VariantKind { self.variant.kind() }

    #[must_use]
    pub fn variant(&self) -> &Variant { &self.variant }

    #[must_use]
    pub fn chips(&self) -> Option<&ChipSet> {
        match &self.variant {
            Variant::Chip(tokenizer) => Some(tokenizer.chips()),
            _ => None,
        }
    }

    #[must_use]
    pub fn suggestions(&self) -> Option<&SuggestionState> {
        match &self.variant {
            Variant::Autocomplete(engine) => Some(engine.state()),
            _ => None,
        }
    }

    #[must_use]
    pub fn sink(&self) -> &S { &self.sink }

    pub fn sink_mut(&mut self) -> &mut S { &mut self.sink }

    #[must_use]
    pub fn into_sink(self) -> S { self.sink }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{AutocompleteConfig, ChipConfig, ItemExtractor, NumericMode,
                RecordingSink, SinkEvent, assert_eq2};

    fn field(config: FieldConfig) -> InputField<RecordingSink> {
        InputField::try_new(config, RecordingSink::default()).unwrap()
    }

    #[test]
    fn test_plain_keystroke_notifies_once() {
        let mut field = field(FieldConfig::default());
        field.handle_keystroke("hi");
        assert_eq2!(field.raw(), &RawValue::from("hi"));
        assert_eq2!(field.display(), "hi");
        assert_eq2!(
            field.sink().events,
            vec![SinkEvent::ValueChange(RawValue::from("hi"))]
        );
        assert!(field.is_dirty());
    }

    #[test]
    fn test_write_is_silent() {
        let mut field = field(FieldConfig::mask("(999) 999-9999"));
        field.write(Some(RawValue::from("5551234567")));
        assert_eq2!(field.display(), "(555) 123-4567");
        assert_eq2!(field.raw(), &RawValue::from("5551234567"));
        field.write(None);
        assert_eq2!(field.display(), "");
        assert_eq2!(field.raw(), &RawValue::from(""));
        assert!(field.sink().events.is_empty());
        assert!(!field.is_dirty());
    }

    #[test]
    fn test_initial_value() {
        let field = field(
            FieldConfig::numeric(NumericMode::Currency {
                currency_code: "USD".to_string(),
            })
            .with_initial_value(1234.5),
        );
        assert_eq2!(field.display(), "$1,234.50");
        assert_eq2!(field.raw(), &RawValue::Number(1234.5));
        assert!(field.sink().events.is_empty());
    }

    #[test]
    fn test_missing_lookup_is_an_error() {
        let result = InputField::try_new(
            FieldConfig::autocomplete(AutocompleteConfig::default()),
            RecordingSink::default(),
        );
        assert_eq2!(result.unwrap_err(), FieldConfigError::MissingLookup);
    }

    #[test]
    fn test_blur_notifies_only_on_change() {
        let mut field = field(FieldConfig::numeric(NumericMode::Decimal));
        field.handle_keystroke("7");
        field.blur();
        assert_eq2!(field.display(), "7.00");
        assert_eq2!(field.sink().change_count(), 2);

        field.focus();
        field.blur();
        assert_eq2!(field.sink().change_count(), 2);
        assert!(field.is_touched());
        assert!(!field.has_focus());
    }

    #[test]
    fn test_chip_keys_and_removal() {
        let mut field = field(FieldConfig::chips(ChipConfig::literal(",")));
        field.handle_keystroke("a,b,");
        assert_eq2!(field.handle_key(FieldKey::Backspace), EventPropagation::Consumed);
        assert_eq2!(field.raw(), &RawValue::from("a"));

        field.handle_keystroke("c");
        assert_eq2!(field.handle_key(FieldKey::Backspace), EventPropagation::Propagate);
        assert_eq2!(field.handle_key(FieldKey::ArrowDown), EventPropagation::Propagate);

        assert!(field.remove_chip("a"));
        assert!(!field.remove_chip("a"));
        assert_eq2!(field.raw(), &RawValue::from("c"));
        assert_eq2!(field.chips().unwrap().fragment, "c");
    }

    #[test]
    fn test_clear() {
        let mut field = field(FieldConfig::chips(ChipConfig::literal(",")));
        field.handle_keystroke("a,b");
        field.clear();
        assert_eq2!(field.raw(), &RawValue::from(""));
        assert_eq2!(field.chips(), Some(&ChipSet::default()));
        assert_eq2!(
            field.sink().events[1..].to_vec(),
            vec![SinkEvent::ValueChange(RawValue::from("")), SinkEvent::FocusRequest]
        );
    }

    #[test]
    fn test_non_autocomplete_has_no_signals() {
        let mut field = field(FieldConfig::default());
        assert_eq2!(field.select_with_pointer(0), EventPropagation::Propagate);
        assert!(field.suggestions().is_none());
        assert!(field.chips().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyboard_selection_commits_label_and_value() {
        let config = FieldConfig::autocomplete(AutocompleteConfig {
            label: ItemExtractor::key("name"),
            value: ItemExtractor::key("code"),
            ..Default::default()
        });
        let lookup = |_query: String| async move {
            Ok::<_, miette::Report>(json!([
                {"name": "Oregon", "code": "OR"},
                {"name": "Utah", "code": "UT"}
            ]))
        };
        let mut field =
            InputField::try_new_with_lookup(config, RecordingSink::default(), lookup)
                .unwrap();
        field.focus();
        field.handle_keystroke("o");
        while field.process_next_signal().await {}

        assert_eq2!(field.handle_key(FieldKey::ArrowDown), EventPropagation::Consumed);
        assert_eq2!(field.handle_key(FieldKey::ArrowDown), EventPropagation::Consumed);
        // Moving the cursor doesn't touch the value.
        assert_eq2!(field.display(), "o");
        assert_eq2!(field.handle_key(FieldKey::Enter), EventPropagation::Consumed);

        assert_eq2!(field.display(), "Utah");
        assert_eq2!(field.raw(), &RawValue::from("UT"));
        assert!(!field.suggestions().unwrap().is_open);
        assert_eq2!(
            field.sink().events,
            vec![
                SinkEvent::ValueChange(RawValue::from("o")),
                SinkEvent::ValueChange(RawValue::from("UT")),
                SinkEvent::ItemSelect {
                    origin: SelectionOrigin::Keyboard(FieldKey::Enter),
                    value: json!("UT"),
                },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_drops_pending_suggestion_query() {
        let queries = Arc::new(std::sync::Mutex::new(vec![]));
        let queries_clone = queries.clone();
        let lookup = move |query: String| {
            queries_clone.lock().unwrap().push(query.clone());
            async move { Ok::<_, miette::Report>(json!([format!("{query}!")])) }
        };
        let config = FieldConfig::autocomplete(AutocompleteConfig::default());
        let mut field =
            InputField::try_new_with_lookup(config, RecordingSink::default(), lookup)
                .unwrap();
        field.focus();

        field.handle_keystroke("ore");
        field.write(Some(RawValue::from("Utah")));
        while field.process_next_signal().await {}

        assert_eq2!(field.display(), "Utah");
        assert_eq2!(field.raw(), &RawValue::from("Utah"));
        assert!(queries.lock().unwrap().is_empty());
        let suggestions = field.suggestions().unwrap();
        assert!(suggestions.items.is_empty());
        assert!(!suggestions.is_open);
        assert!(!suggestions.is_loading);
    }
}
