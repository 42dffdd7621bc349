// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Fixtures for driving an [`crate::InputField`] without a UI. Public so that
//! integration tests and downstream crates can use them too.

// Attach sources.
pub mod recording_sink;

// Re-export.
pub use recording_sink::*;
