use std::collections::VecDeque;

use super::replacer::{Lookahead, Replacer};
use crate::typedef::{FrameId, PageId};

/// Implements the FIFO replacement policy: the victim is always the
/// longest-resident page.
///
/// Invariant: the arrival queue holds exactly the set of pages resident in
/// the frame table, in load order, with the next eviction candidate at the
/// front.
#[derive(Debug, Default)]
pub(crate) struct FifoReplacer {
    arrival_order: VecDeque<PageId>,
}

impl FifoReplacer {
    pub(crate) fn new() -> Self {
        FifoReplacer {
            arrival_order: VecDeque::new(),
        }
    }
}

impl Replacer for FifoReplacer {
    /// Enqueues a freshly loaded page at the back of the arrival order.
    fn record_load(&mut self, page: PageId) {
        self.arrival_order.push_back(page);
    }

    /// Dequeues the longest-resident page and locates its frame. The queue
    /// is only popped once the victim's slot is found, so a failed lookup
    /// leaves the bookkeeping untouched.
    fn pick_victim(&mut self, frames: &[PageId], _lookahead: Lookahead<'_>) -> Option<FrameId> {
        let &victim = self.arrival_order.front()?;
        let frame_id = frames.iter().position(|&page| page == victim)?;
        self.arrival_order.pop_front();
        Some(frame_id)
    }

    fn reset(&mut self) {
        self.arrival_order.clear();
    }
}
