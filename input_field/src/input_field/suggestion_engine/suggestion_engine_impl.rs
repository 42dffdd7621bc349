// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The autocomplete state machine: `idle -> querying -> (suggesting | idle)`, with the
//! panel's open/closed flag layered on top.
//!
//! Nothing in here runs on its own. Keystrokes, keys, focus and blur come in through
//! plain `&mut self` methods. Time based events (the debounce deadline, the blur grace
//! deadline) and lookup results come out of [`SuggestionEngine::next_signal`] and are fed
//! back in through [`SuggestionEngine::apply_signal`]. The only thing that runs on
//! another task is the lookup future itself, and it only ever talks back through a
//! channel, so all the state here has a single writer.
//!
//! "Last query wins" is enforced with a generation counter. Every query bumps it, a
//! lookup is tagged with the generation current when it started, and a result whose tag
//! isn't the current generation is dropped when it is applied. Bumping the generation
//! also aborts every lookup still running, since none of them can be applied anymore.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde_json::Value;
use tokio::{sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
            task::JoinHandle};

use crate::{AsyncDebouncedDeadline, AutocompleteConfig, FieldKey, SharedLookup,
            SuggestionState};

/// Events produced by [`SuggestionEngine::next_signal`].
#[derive(Debug)]
pub enum SuggestionSignal {
    /// The keystrokes stopped for long enough; run the lookup.
    DebounceElapsed,
    /// Focus didn't come back in time; close the panel.
    BlurGraceElapsed,
    /// A lookup finished. `generation` is the one that was current when it started.
    LookupResolved {
        generation: u64,
        result: miette::Result<Value>,
    },
}

/// What a navigation key did. [`SuggestionKeyAction::Ignored`] means the host should get
/// the key.
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionKeyAction {
    Ignored,
    CursorMoved,
    Closed,
    /// The highlighted item was picked.
    Commit(Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelFocus {
    Focused,
    /// Blurred, but the grace deadline hasn't passed, so the panel may stay open.
    BlurPending,
    Blurred,
}

pub struct SuggestionEngine {
    config: AutocompleteConfig,
    lookup: SharedLookup,
    state: SuggestionState,
    generation: u64,
    query: String,
    debounce: AsyncDebouncedDeadline,
    blur_grace: AsyncDebouncedDeadline,
    focus: PanelFocus,
    sender: UnboundedSender<SuggestionSignal>,
    receiver: UnboundedReceiver<SuggestionSignal>,
    in_flight: Vec<JoinHandle<()>>,
}

impl Debug for SuggestionEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SuggestionEngine")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("query", &self.query)
            .field("debounce", &self.debounce)
            .field("blur_grace", &self.blur_grace)
            .field("focus", &self.focus)
            .field("in_flight", &self.in_flight.len())
            .finish_non_exhaustive()
    }
}

impl SuggestionEngine {
    #[must_use]
    pub fn new(config: AutocompleteConfig, lookup: SharedLookup) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            debounce: AsyncDebouncedDeadline::new(config.delay()),
            blur_grace: AsyncDebouncedDeadline::new(config.blur_grace()),
            config,
            lookup,
            state: SuggestionState::default(),
            generation: 0,
            query: String::new(),
            focus: PanelFocus::Blurred,
            sender,
            receiver,
            in_flight: vec![],
        }
    }

    #[must_use]
    pub fn state(&self) -> &SuggestionState { &self.state }

    #[must_use]
    pub fn config(&self) -> &AutocompleteConfig { &self.config }

    #[must_use]
    pub fn generation(&self) -> u64 { self.generation }

    #[must_use]
    pub fn is_debounce_pending(&self) -> bool { self.debounce.is_pending() }

    /// Lookups for the current generation that haven't finished yet.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.iter().filter(|it| !it.is_finished()).count()
    }

    #[must_use]
    pub fn label_of(&self, item: &Value) -> String { self.config.label.extract_label(item) }

    #[must_use]
    pub fn value_of(&self, item: &Value) -> Value { self.config.value.extract(item) }

    /// Every keystroke is a new query, which makes every older lookup stale. Short
    /// queries close the panel right away; longer ones (re)start the debounce deadline.
    pub fn on_keystroke(&mut self, text: &str) {
        self.bump_generation();
        self.query = text.to_string();

        if text.chars().count() < self.config.min_query_length {
            self.debounce.clear();
            self.state.clear_items();
            self.state.close();
            self.state.is_loading = false;
            tracing::debug!(
                generation = self.generation,
                query = %text,
                "query too short, suggestions cleared"
            );
            return;
        }

        self.debounce.reset();
    }

    pub fn on_focus(&mut self) {
        self.focus = PanelFocus::Focused;
        self.blur_grace.clear();
    }

    pub fn on_blur(&mut self) {
        if self.focus == PanelFocus::Focused {
            self.focus = PanelFocus::BlurPending;
            self.blur_grace.reset();
        }
    }

    pub fn handle_key(&mut self, key: FieldKey) -> SuggestionKeyAction {
        match key {
            FieldKey::ArrowDown | FieldKey::ArrowUp => {
                if self.state.items.is_empty() {
                    return SuggestionKeyAction::Ignored;
                }
                if key == FieldKey::ArrowDown {
                    self.state.move_down();
                } else {
                    self.state.move_up();
                }
                self.state.is_open = self.focus != PanelFocus::Blurred;
                SuggestionKeyAction::CursorMoved
            }
            FieldKey::Enter => {
                if !self.state.is_open {
                    return SuggestionKeyAction::Ignored;
                }
                match self.state.highlighted().cloned() {
                    Some(item) => {
                        self.settle();
                        SuggestionKeyAction::Commit(item)
                    }
                    None => SuggestionKeyAction::Ignored,
                }
            }
            FieldKey::Escape => {
                if !self.state.is_open {
                    return SuggestionKeyAction::Ignored;
                }
                self.state.close();
                SuggestionKeyAction::Closed
            }
            FieldKey::Backspace => SuggestionKeyAction::Ignored,
        }
    }

    /// A click on a suggestion row. This keeps focus on the field, since the click is
    /// what caused the blur.
    pub fn select_index(&mut self, index: usize) -> Option<Value> {
        let item = self.state.items.get(index)?.clone();
        self.on_focus();
        self.settle();
        Some(item)
    }

    /// Picking an item ends the current query: the panel closes and any lookup still
    /// running becomes stale.
    fn settle(&mut self) {
        self.bump_generation();
        self.debounce.clear();
        self.state.is_loading = false;
        self.state.close();
    }

    /// Makes every running lookup stale, and aborts it. A result that was already sent
    /// is still dropped by the generation check.
    fn bump_generation(&mut self) {
        self.generation += 1;
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }

    /// Drops the items and closes the panel.
    pub fn clear(&mut self) {
        self.settle();
        self.query.clear();
        self.state.clear_items();
    }

    /// A write from the host replaces the text without querying for it. Any pending
    /// debounce or lookup belongs to text the field no longer shows.
    pub fn on_write(&mut self, text: &str) {
        self.clear();
        self.query = text.to_string();
        tracing::debug!(generation = self.generation, "suggestions reset by write");
    }

    /// Waits for the next thing the engine has to react to. Returns [None] right away
    /// when there is nothing to wait for: no deadline is pending and no lookup is in
    /// flight.
    ///
    /// This is cancel safe, so it can be used as a `tokio::select!` branch.
    pub async fn next_signal(&mut self) -> Option<SuggestionSignal> {
        self.in_flight.retain(|it| !it.is_finished());

        // A finished lookup has already sent its result.
        if let Ok(signal) = self.receiver.try_recv() {
            return Some(signal);
        }

        if !self.debounce.is_pending()
            && !self.blur_grace.is_pending()
            && self.in_flight.is_empty()
        {
            return None;
        }

        let Self {
            debounce,
            blur_grace,
            receiver,
            ..
        } = self;

        tokio::select! {
            Some(signal) = receiver.recv() => Some(signal),
            () = debounce.sleep_until(), if debounce.is_pending() => {
                debounce.clear();
                Some(SuggestionSignal::DebounceElapsed)
            }
            () = blur_grace.sleep_until(), if blur_grace.is_pending() => {
                blur_grace.clear();
                Some(SuggestionSignal::BlurGraceElapsed)
            }
        }
    }

    pub fn apply_signal(&mut self, signal: SuggestionSignal) {
        match signal {
            SuggestionSignal::DebounceElapsed => self.start_lookup(),
            SuggestionSignal::BlurGraceElapsed => {
                if self.focus == PanelFocus::BlurPending {
                    self.focus = PanelFocus::Blurred;
                    self.state.close();
                }
            }
            SuggestionSignal::LookupResolved { generation, result } => {
                self.apply_lookup_result(generation, result);
            }
        }
    }

    fn start_lookup(&mut self) {
        if self.query.chars().count() < self.config.min_query_length {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!(
                generation = self.generation,
                "no tokio runtime, suggestion lookup skipped"
            );
            return;
        };

        let generation = self.generation;
        self.state.is_loading = true;
        self.state.is_open = self.focus != PanelFocus::Blurred;
        tracing::debug!(generation, query = %self.query, "suggestion lookup started");

        let future = self.lookup.lookup(self.query.clone());
        let sender = self.sender.clone();
        self.in_flight.push(runtime.spawn(async move {
            let result = future.await;
            // The receiver is gone if the engine was dropped, and then nobody cares.
            sender
                .send(SuggestionSignal::LookupResolved { generation, result })
                .ok();
        }));
    }

    fn apply_lookup_result(&mut self, generation: u64, result: miette::Result<Value>) {
        if generation != self.generation {
            tracing::debug!(
                generation,
                current_generation = self.generation,
                "stale suggestion result discarded"
            );
            return;
        }

        let items = match result {
            Ok(Value::Array(items)) => items,
            Ok(other) => {
                tracing::warn!(generation, result = %other, "lookup result is not a list");
                vec![]
            }
            Err(report) => {
                tracing::error!(generation, error = ?report, "suggestion lookup failed");
                vec![]
            }
        };

        tracing::debug!(generation, count = items.len(), "suggestions received");
        self.state.set_items(items);
        self.state.is_loading = false;
    }
}

impl Drop for SuggestionEngine {
    fn drop(&mut self) {
        for handle in &self.in_flight {
            handle.abort();
        }
    }
}
