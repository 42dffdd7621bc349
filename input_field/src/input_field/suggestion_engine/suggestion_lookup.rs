// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{future::Future, sync::Arc};

use futures_util::{FutureExt as _, future::BoxFuture};
use serde_json::Value;

pub type LookupFuture = BoxFuture<'static, miette::Result<Value>>;

/// The caller supplied source of suggestions, usually a network call.
///
/// The returned future is spawned on the [`tokio`] runtime, so it must be `Send` and
/// own everything it uses. It should resolve to a JSON array of items; anything else is
/// treated as "no suggestions", and an `Err` is logged and treated the same way.
///
/// Any `Fn(String) -> impl Future<Output = miette::Result<Value>>` is a lookup:
///
/// ```no_run
/// use r3bl_input_field::SuggestionLookup;
///
/// let lookup = |query: String| async move {
///     Ok::<_, miette::Report>(serde_json::json!([query]))
/// };
/// let _future = lookup.lookup("ore".to_string());
/// ```
pub trait SuggestionLookup: Send + Sync + 'static {
    fn lookup(&self, query: String) -> LookupFuture;
}

impl<F, Fut> SuggestionLookup for F
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = miette::Result<Value>> + Send + 'static,
{
    fn lookup(&self, query: String) -> LookupFuture { self(query).boxed() }
}

pub type SharedLookup = Arc<dyn SuggestionLookup>;
