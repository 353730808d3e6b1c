/// Index of a slot in the physical frame table.
pub type FrameId = usize;
/// Logical page number, i.e. a logical address divided by the page size.
pub type PageId = usize;
/// Pre-translation address as referenced by a simulated instruction.
pub type LogicalAddress = usize;
