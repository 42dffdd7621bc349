// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// `assert_eq!` with a colored diff, so a wrong `(raw, display)` pair or a wrong list of
/// sink events shows exactly which part differs. Takes the same arguments as
/// `pretty_assertions::assert_eq!`, including a trailing format message.
#[macro_export]
macro_rules! assert_eq2 {
    ($($params:tt)*) => {
        pretty_assertions::assert_eq!($($params)*)
    };
}

/// `ok!()` is `Ok(())` and `ok!(value)` is `Ok(value)`.
#[macro_export]
macro_rules! ok {
    () => {
        Ok(())
    };
    ($value:expr) => {
        Ok($value)
    };
}
