//! Development facade over the Pagesim workspace crates.
//!
//! External drivers (batch runners, animated front ends) should depend on
//! [`pagesim_engine`] directly; this crate simply re-exports the public
//! surface so workspace-level tooling has a single entry point.
pub use pagesim_engine::engine;
pub use pagesim_engine::reference;
pub use pagesim_engine::translation;
pub use pagesim_engine::typedef;
pub use pagesim_error::{Error, Result};
