// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Async debounced deadline for "do X after Y ms of no activity" pattern.

use std::time::Duration;

use tokio::time::Instant;

/// A single pending timer that can be pushed back, cancelled, and awaited.
///
/// The suggestion engine keeps one of these for its debounce timer and one for the blur
/// grace period. There is at most one pending deadline per instance, so "cancel the
/// pending timer and start a new one" is a single call to [`reset()`](Self::reset).
///
/// There is no task behind this type. Nothing happens when the deadline passes unless
/// someone is awaiting [`sleep_until()`](Self::sleep_until), which makes dropping it a
/// complete teardown.
///
/// # Integration with `tokio::select`!
///
/// ```rust,no_run
/// use std::time::Duration;
/// use r3bl_input_field::AsyncDebouncedDeadline;
///
/// # async fn example() {
/// let mut debounce = AsyncDebouncedDeadline::new(Duration::from_millis(300));
/// let mut latest_text: Option<String> = None;
///
/// loop {
///     tokio::select! {
///         text = next_keystroke() => {
///             latest_text = Some(text);
///             debounce.reset();
///         }
///         () = debounce.sleep_until(), if debounce.is_pending() => {
///             debounce.clear();
///             if let Some(text) = latest_text.take() {
///                 println!("query: {text}");
///             }
///         }
///     }
/// }
/// # async fn next_keystroke() -> String { String::new() }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AsyncDebouncedDeadline {
    /// None means no deadline pending.
    deadline: Option<Instant>,
    /// How long to wait after the last call to [`reset()`](Self::reset).
    duration: Duration,
}

impl AsyncDebouncedDeadline {
    /// The deadline starts out not pending.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            deadline: None,
            duration,
        }
    }

    /// Sets the deadline to `now + duration`, replacing any pending one.
    pub fn reset(&mut self) { self.deadline = Some(Instant::now() + self.duration); }

    pub fn clear(&mut self) { self.deadline = None; }

    /// Use this as the condition in `tokio::select!` branches.
    #[must_use]
    pub fn is_pending(&self) -> bool { self.deadline.is_some() }

    #[must_use]
    pub fn get(&self) -> Option<Instant> { self.deadline }

    #[must_use]
    pub fn duration(&self) -> Duration { self.duration }

    /// Sleeps until the deadline expires.
    ///
    /// - If deadline is `Some(instant)`, sleeps until that instant.
    /// - If deadline is `None`, returns a pending future (never completes).
    ///
    /// Guard it with [`is_pending()`](Self::is_pending) in `tokio::select!`.
    pub async fn sleep_until(&self) {
        match self.deadline {
            Some(deadline) => tokio::time::sleep_until(deadline).await,
            None => std::future::pending().await,
        }
    }
}
