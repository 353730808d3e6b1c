/// Asserts the given expression evaluates to an `Err`.
#[macro_export]
macro_rules! assert_errors {
    ($f:expr) => {{
        let result = $f;
        assert!(
            result.is_err(),
            "Expected an error, but the operation succeeded."
        );
    }};
}

/// Constructs a [`crate::Error::InvalidConfiguration`] for the given format string.
#[macro_export]
macro_rules! errconfig {
    ($($args:tt)*) => { $crate::Error::InvalidConfiguration(format!($($args)*)).into() };
}

/// Constructs a [`crate::Error::InvalidState`] for the given format string.
#[macro_export]
macro_rules! errstate {
    ($($args:tt)*) => { $crate::Error::InvalidState(format!($($args)*)).into() };
}
