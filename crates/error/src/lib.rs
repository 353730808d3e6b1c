//! Module for custom error-handling of precondition violations in Pagesim crates.
mod error;
mod macros;

pub use error::{Error, Result};
#[allow(unused_imports)]
pub use macros::*;
