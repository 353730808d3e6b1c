pub(crate) mod fifo_replacer;
pub(crate) mod opt_replacer;
pub(crate) mod replacer;
