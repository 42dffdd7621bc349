// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter, Result as FmtResult},
          sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type ExtractFn = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// Picks the label (what the field displays) or the value (what the field reports) out
/// of a suggestion item.
///
/// In JSON config this is `"identity"` or `{"key": "name"}`. A [`ItemExtractor::Custom`]
/// function can only be set from code.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemExtractor {
    /// The item itself.
    #[default]
    Identity,
    /// `item[key]` for objects (`null` if missing), the item itself for anything else.
    Key(String),
    #[serde(skip)]
    Custom(ExtractFn),
}

impl ItemExtractor {
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self { ItemExtractor::Key(key.into()) }

    #[must_use]
    pub fn custom(it: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        ItemExtractor::Custom(Arc::new(it))
    }

    #[must_use]
    pub fn extract(&self, item: &Value) -> Value {
        match self {
            ItemExtractor::Identity => item.clone(),
            ItemExtractor::Key(key) => match item {
                Value::Object(map) => map.get(key).cloned().unwrap_or(Value::Null),
                other => other.clone(),
            },
            ItemExtractor::Custom(extract_fn) => extract_fn(item),
        }
    }

    /// Like [`extract`](Self::extract) but for display: strings are shown as is, `null`
    /// is empty, and anything else is shown as its JSON text.
    #[must_use]
    pub fn extract_label(&self, item: &Value) -> String {
        match self.extract(item) {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl Debug for ItemExtractor {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ItemExtractor::Identity => write!(f, "Identity"),
            ItemExtractor::Key(key) => f.debug_tuple("Key").field(key).finish(),
            ItemExtractor::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
