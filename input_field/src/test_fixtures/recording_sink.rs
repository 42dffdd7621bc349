// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use serde_json::Value;

use crate::{RawValue, SelectionOrigin, ValueSink};

/// One callback received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    ValueChange(RawValue),
    ItemSelect {
        origin: SelectionOrigin,
        value: Value,
    },
    FocusRequest,
}

/// A [`ValueSink`] that keeps every callback, in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    /// Only the [`SinkEvent::ValueChange`] payloads.
    #[must_use]
    pub fn value_changes(&self) -> Vec<&RawValue> {
        self.events
            .iter()
            .filter_map(|it| match it {
                SinkEvent::ValueChange(raw) => Some(raw),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn change_count(&self) -> usize { self.value_changes().len() }

    #[must_use]
    pub fn last_value(&self) -> Option<&RawValue> { self.value_changes().pop() }

    /// Returns the recorded events and starts over.
    pub fn take(&mut self) -> Vec<SinkEvent> { std::mem::take(&mut self.events) }
}

impl ValueSink for RecordingSink {
    fn on_value_change(&mut self, raw: &RawValue) {
        self.events.push(SinkEvent::ValueChange(raw.clone()));
    }

    fn on_item_select(&mut self, origin: SelectionOrigin, value: &Value) {
        self.events.push(SinkEvent::ItemSelect {
            origin,
            value: value.clone(),
        });
    }

    fn request_focus(&mut self) { self.events.push(SinkEvent::FocusRequest); }
}
