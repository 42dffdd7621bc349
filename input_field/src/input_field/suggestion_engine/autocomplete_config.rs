// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ItemExtractor;

pub const DEFAULT_MIN_QUERY_LENGTH: usize = 1;
pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 300;
pub const DEFAULT_BLUR_GRACE_MS: u64 = 150;

/// Settings for the autocomplete variant. Every field has a default, so `{}` is a valid
/// JSON config.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    /// Queries shorter than this (in chars) never reach the lookup.
    pub min_query_length: usize,
    /// Quiet period after the last keystroke before the lookup runs.
    pub delay_ms: u64,
    /// How long the panel stays open after blur, so that a click on a suggestion (which
    /// causes the blur) still lands.
    pub blur_grace_ms: u64,
    pub label: ItemExtractor,
    pub value: ItemExtractor,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            min_query_length: DEFAULT_MIN_QUERY_LENGTH,
            delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            blur_grace_ms: DEFAULT_BLUR_GRACE_MS,
            label: ItemExtractor::default(),
            value: ItemExtractor::default(),
        }
    }
}

impl AutocompleteConfig {
    #[must_use]
    pub fn delay(&self) -> Duration { Duration::from_millis(self.delay_ms) }

    #[must_use]
    pub fn blur_grace(&self) -> Duration { Duration::from_millis(self.blur_grace_ms) }
}
