use crate::typedef::{FrameId, LogicalAddress, PageId};

/// Splits a logical address into its page number and page offset.
///
/// `page_size` must be positive; the engine constructor validates this before
/// any translation happens, so the function itself is total over its domain.
#[inline]
pub fn page_info(logical_address: LogicalAddress, page_size: usize) -> (PageId, usize) {
    (logical_address / page_size, logical_address % page_size)
}

/// Computes the physical address of an access given the page offset and the
/// frame the page resides in.
///
/// No validation happens here: the caller guarantees `frame_id` refers to an
/// occupied frame-table slot.
#[inline]
pub fn physical_address(page_offset: usize, frame_id: FrameId, page_size: usize) -> usize {
    frame_id * page_size + page_offset
}
