pub mod engine;
pub mod reference;
pub(crate) mod replacer;
pub mod translation;
pub mod typedef;
pub(crate) type Result<T> = std::result::Result<T, pagesim_error::Error>;
