// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// This works w/ the host's key event routing to tell it whether an event has been
/// consumed by the field or not. If it has been consumed, the host must not run its own
/// default action for the key (eg: deleting a character on `Backspace`, or submitting a
/// form on `Enter`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventPropagation {
    Consumed,
    Propagate,
}

impl EventPropagation {
    #[must_use]
    pub fn is_consumed(self) -> bool { matches!(self, EventPropagation::Consumed) }
}
