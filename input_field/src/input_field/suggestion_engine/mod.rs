// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod autocomplete_config;
pub mod item_extractor;
pub mod suggestion_engine_impl;
pub mod suggestion_lookup;
pub mod suggestion_state;

// Re-export.
pub use autocomplete_config::*;
pub use item_extractor::*;
pub use suggestion_engine_impl::*;
pub use suggestion_lookup::*;
pub use suggestion_state::*;
