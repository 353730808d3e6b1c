use std::fmt::Debug;

use crate::reference::ReferenceSequence;
use crate::typedef::{FrameId, PageId};

/// Read-only view of the remaining reference stream, handed to policies that
/// need future knowledge (OPT). Values of this type never mutate the
/// sequence, so holding one is safe alongside any number of other readers.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Lookahead<'a> {
    sequence: &'a ReferenceSequence,
    cursor: usize,
    page_size: usize,
}

impl<'a> Lookahead<'a> {
    pub(crate) fn new(sequence: &'a ReferenceSequence, cursor: usize, page_size: usize) -> Self {
        Self {
            sequence,
            cursor,
            page_size,
        }
    }

    /// Index of the next reference to `page` strictly after the cursor, or
    /// `None` if the page is never referenced again.
    pub(crate) fn next_use(&self, page: PageId) -> Option<usize> {
        ((self.cursor + 1)..self.sequence.len())
            .find(|&index| self.sequence.page_at(index, self.page_size) == Some(page))
    }
}

/// The replacement-policy seam of the paging engine. A policy is chosen once
/// at construction and dispatched through this trait, never probed per step.
pub(crate) trait Replacer: Send + Sync + Debug {
    /// Records that `page` was loaded into a frame, whether into a free
    /// frame or over a victim.
    fn record_load(&mut self, page: PageId);

    /// Picks the frame to overwrite when every frame is occupied. `frames`
    /// holds the resident page of each slot, indexed by frame id. Returns
    /// `None` only when the policy's bookkeeping is out of step with the
    /// frame table, which the engine reports as an invalid state.
    fn pick_victim(&mut self, frames: &[PageId], lookahead: Lookahead<'_>) -> Option<FrameId>;

    /// Clears all bookkeeping, returning the policy to its initial state.
    fn reset(&mut self);
}
