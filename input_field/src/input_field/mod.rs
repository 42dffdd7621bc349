// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The value transformation engine. [`InputField`] is the value controller that every
//! keystroke enters first. It routes to exactly one [`Variant`], commits the resulting
//! [`FieldValue`], and notifies the [`ValueSink`].

// Attach sources.
pub mod chip_tokenizer;
pub mod field_config;
pub mod field_error;
pub mod field_value;
pub mod mask_formatter;
pub mod numeric_formatter;
pub mod suggestion_engine;
pub mod value_controller;
pub mod value_sink;
pub mod variant;

// Re-export.
pub use chip_tokenizer::*;
pub use field_config::*;
pub use field_error::*;
pub use field_value::*;
pub use mask_formatter::*;
pub use numeric_formatter::*;
pub use suggestion_engine::*;
pub use value_controller::*;
pub use value_sink::*;
pub use variant::*;
