// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # Value transformation engine for text fields
//!
//! A single line text field can take on one of five mutually exclusive behaviors
//! ([`VariantKind`]):
//!
//! | Variant        | What happens on keystroke                    | What happens on blur        |
//! | :------------- | :------------------------------------------- | :-------------------------- |
//! | `plain`        | text is committed as is                      | nothing                     |
//! | `mask`         | text is pushed through a [`MaskSpec`]        | nothing                     |
//! | `chip`         | text is split into chips on a separator      | the fragment becomes a chip |
//! | `numeric`      | text is committed unformatted                | text is reformatted         |
//! | `autocomplete` | text is committed, a lookup is debounced     | panel closes after a grace  |
//!
//! The host (any UI toolkit, a TUI, or a test) owns an [`InputField`] and feeds it the
//! full current text on every keystroke ([`InputField::handle_keystroke`]), navigation
//! keys ([`InputField::handle_key`]), and focus changes ([`InputField::focus`],
//! [`InputField::blur`]). The field reports back to a [`ValueSink`]: one value change
//! notification per user mutation, item selections, and focus requests.
//!
//! The field keeps its canonical value in a [`FieldValue`], a `(raw, display)` pair that
//! only changes through one function so that the display string is always derivable
//! from the raw value plus the active variant's formatting rule.
//!
//! # Async suggestions
//!
//! The autocomplete variant is the only part of this crate that does anything async. A
//! [`SuggestionLookup`] is spawned on the [`tokio`] runtime when the debounce deadline
//! expires, and its result is sent back to the field on a channel. The host applies
//! results on its own thread using [`InputField::process_next_signal`], and a monotonic
//! generation counter throws away every result that is not for the newest query.
//!
//! ```no_run
//! # use r3bl_input_field::{FieldConfig, InputField, RecordingSink, AutocompleteConfig};
//! # async fn example() -> miette::Result<()> {
//! let config = FieldConfig {
//!     autocomplete: Some(AutocompleteConfig::default()),
//!     ..Default::default()
//! };
//! let lookup = |query: String| async move {
//!     let items = serde_json::json!([format!("{query}ple"), format!("{query}ricot")]);
//!     Ok::<_, miette::Report>(items)
//! };
//! let mut field =
//!     InputField::try_new_with_lookup(config, RecordingSink::default(), lookup)?;
//! field.focus();
//! field.handle_keystroke("ap");
//! while field.process_next_signal().await {}
//! assert_eq!(field.suggestions().map(|it| it.items.len()), Some(2));
//! # Ok(())
//! # }
//! ```
//!
//! # Logging and errors
//!
//! All logging goes through [`tracing`]. Use [`try_initialize_logging_global`] to see it.
//! Configuration errors are [`FieldConfigError`]s which are [`miette::Diagnostic`]s.

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules (re-exported below to provide clean public API).
pub mod core;
pub mod input_field;
pub mod test_fixtures;

// Re-export.
pub use crate::core::*;
pub use input_field::*;
pub use test_fixtures::*;
