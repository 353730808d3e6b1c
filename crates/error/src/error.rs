pub type Result<T> = std::result::Result<T, Error>;
impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}

/// Errors raised by the paging engine. Both kinds are deterministic
/// precondition violations in the calling layer; neither is a retryable
/// runtime condition, so callers should propagate them rather than absorb
/// them.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Invalid simulation parameters: a non-positive page size or frame
    /// count, or a malformed reference sequence. Raised when the engine is
    /// constructed, never lazily during a run.
    InvalidConfiguration(String),
    /// An operation was issued in a state that cannot accept it, such as
    /// stepping an engine whose run has already completed.
    InvalidState(String),
}

impl std::error::Error for Error {}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
        }
    }
}

impl From<std::num::TryFromIntError> for Error {
    fn from(e: std::num::TryFromIntError) -> Self {
        Error::InvalidConfiguration(e.to_string())
    }
}
