use super::replacer::{Lookahead, Replacer};
use crate::typedef::{FrameId, PageId};

/// Implements the Optimal (Belady) replacement policy: evict the resident
/// page whose next reference lies furthest in the future, treating a page
/// that is never referenced again as furthest of all.
///
/// OPT needs full lookahead over the reference sequence, so it is only
/// usable for offline replay, never with a streaming reference source. It
/// keeps no bookkeeping of its own; every decision is recomputed from the
/// lookahead view.
///
/// Ties are broken toward the lowest frame index among the furthest pages.
/// The tie-break is part of the contract: without one, OPT fault counts
/// would be non-deterministic whenever several resident pages share the
/// same next-use distance.
#[derive(Debug, Default)]
pub(crate) struct OptReplacer;

impl OptReplacer {
    pub(crate) fn new() -> Self {
        OptReplacer
    }
}

impl Replacer for OptReplacer {
    fn record_load(&mut self, _page: PageId) {}

    fn pick_victim(&mut self, frames: &[PageId], lookahead: Lookahead<'_>) -> Option<FrameId> {
        let mut victim: Option<(FrameId, usize)> = None;
        for (frame_id, &page) in frames.iter().enumerate() {
            // A page with no future reference can never lose a comparison.
            let next_use = lookahead.next_use(page).unwrap_or(usize::MAX);
            match victim {
                // Strictly-greater keeps the first maximum encountered, i.e.
                // the lowest frame index among ties.
                Some((_, furthest)) if next_use <= furthest => {}
                _ => victim = Some((frame_id, next_use)),
            }
        }
        victim.map(|(frame_id, _)| frame_id)
    }

    fn reset(&mut self) {}
}
