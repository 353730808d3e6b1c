use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pagesim_error::{errconfig, errstate, Error};

use crate::reference::ReferenceSequence;
use crate::replacer::fifo_replacer::FifoReplacer;
use crate::replacer::opt_replacer::OptReplacer;
use crate::replacer::replacer::{Lookahead, Replacer};
use crate::translation::{page_info, physical_address};
use crate::typedef::{FrameId, LogicalAddress, PageId};
use crate::Result;

/// Page size of the classic classroom setup (10 words per page).
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Frame count of the classic classroom setup.
pub const DEFAULT_FRAME_COUNT: usize = 4;

/// Replacement-policy selector, fixed for the duration of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// Evict the longest-resident page.
    Fifo,
    /// Evict the page with the furthest future reference (offline only).
    Opt,
}

impl Policy {
    fn build_replacer(self) -> Box<dyn Replacer> {
        match self {
            Policy::Fifo => Box::new(FifoReplacer::new()),
            Policy::Opt => Box::new(OptReplacer::new()),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "FIFO"),
            Policy::Opt => write!(f, "OPT"),
        }
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "opt" => Ok(Policy::Opt),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown replacement policy: {}",
                other
            ))),
        }
    }
}

/// Simulation parameters supplied by the external driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Words per page; must be positive.
    pub page_size: usize,
    /// Capacity of the frame table; must be positive.
    pub frame_count: usize,
    pub policy: Policy,
}

impl EngineConfig {
    pub fn new(page_size: usize, frame_count: usize, policy: Policy) -> Self {
        Self {
            page_size,
            frame_count,
            policy,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return errconfig!("page size must be positive");
        }
        if self.frame_count == 0 {
            return errconfig!("frame count must be positive");
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_FRAME_COUNT, Policy::Fifo)
    }
}

/// Result of a single page access, reported to the caller after every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The page was already resident in `frame_id`; no state changed.
    Hit { frame_id: FrameId },
    /// The page missed and was loaded into the free frame `frame_id`.
    FaultLoaded { frame_id: FrameId },
    /// The page missed with a full table; `victim_page` was overwritten in
    /// place at `frame_id`.
    FaultReplaced {
        victim_page: PageId,
        frame_id: FrameId,
    },
}

impl Outcome {
    pub fn is_fault(&self) -> bool {
        !matches!(self, Outcome::Hit { .. })
    }

    /// The frame the accessed page occupies after the step.
    pub fn frame_id(&self) -> FrameId {
        match *self {
            Outcome::Hit { frame_id }
            | Outcome::FaultLoaded { frame_id }
            | Outcome::FaultReplaced { frame_id, .. } => frame_id,
        }
    }
}

/// Run-state of the engine, derived from the step cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Constructed or reset; no reference processed yet.
    Idle,
    /// Mid-run.
    Running,
    /// Every reference processed; only `reset` leaves this state.
    Complete,
}

/// Everything a presentation layer needs to render one step of the replay:
/// the translated access, its outcome, and the frame table afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTrace {
    /// Index of this reference in the sequence.
    pub step: usize,
    pub logical_address: LogicalAddress,
    pub page: PageId,
    pub offset: usize,
    pub outcome: Outcome,
    /// Physical address of the access, in the frame the page ended up in.
    pub physical_address: usize,
    /// Frame-table contents after the step, ordered by frame id.
    pub frames: Vec<PageId>,
}

/// Totals of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub policy: Policy,
    pub total_references: usize,
    pub fault_count: usize,
}

impl RunSummary {
    /// Faults per reference. Presentation-layer convenience; the engine
    /// itself only tracks the raw counts.
    pub fn fault_rate(&self) -> f64 {
        if self.total_references == 0 {
            0.0
        } else {
            self.fault_count as f64 / self.total_references as f64
        }
    }
}

/// Replays a reference sequence against a fixed-size frame table, delegating
/// victim selection to the configured replacement policy.
///
/// The engine is a plain synchronous state machine: every call to [`step`]
/// either fully applies its effect or fails without touching any state.
/// Exclusive ownership of the frame table, arrival bookkeeping, and fault
/// counter is expressed through `&mut self`; there is no internal locking
/// and no timer or cancellation concept. An animated driver steps the engine
/// once per tick and reads the returned [`StepTrace`]; a batch driver calls
/// [`run`].
///
/// [`step`]: PagingEngine::step
/// [`run`]: PagingEngine::run
#[derive(Debug)]
pub struct PagingEngine {
    config: EngineConfig,
    sequence: ReferenceSequence,
    /// Resident page per frame, indexed by frame id. A page keeps its frame
    /// until evicted; replacement overwrites the slot in place.
    frames: Vec<PageId>,
    replacer: Box<dyn Replacer>,
    /// Index of the next reference to process.
    cursor: usize,
    fault_count: usize,
}

impl PagingEngine {
    /// Builds an engine over `sequence`. All configuration validation
    /// happens here, never lazily during a run.
    pub fn new(sequence: ReferenceSequence, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            frames: Vec::with_capacity(config.frame_count),
            replacer: config.policy.build_replacer(),
            cursor: 0,
            fault_count: 0,
            sequence,
            config,
        })
    }

    /// Processes the next reference in the sequence and advances the cursor.
    ///
    /// Fails with `InvalidState` once the run is complete; the caller must
    /// `reset` before replaying.
    pub fn step(&mut self) -> Result<StepTrace> {
        let Some(logical_address) = self.sequence.get(self.cursor) else {
            return errstate!(
                "run already complete after {} references",
                self.sequence.len()
            );
        };
        let (page, offset) = page_info(logical_address, self.config.page_size);
        let outcome = self.access(page)?;
        if outcome.is_fault() {
            self.fault_count += 1;
        }
        let trace = StepTrace {
            step: self.cursor,
            logical_address,
            page,
            offset,
            outcome,
            physical_address: physical_address(offset, outcome.frame_id(), self.config.page_size),
            frames: self.frames.clone(),
        };
        self.cursor += 1;
        Ok(trace)
    }

    /// Applies one page access to the frame table. Fault accounting and
    /// cursor movement belong to [`step`](PagingEngine::step).
    fn access(&mut self, page: PageId) -> Result<Outcome> {
        // Hit path: policy-independent, no state change.
        if let Some(frame_id) = self.frames.iter().position(|&resident| resident == page) {
            return Ok(Outcome::Hit { frame_id });
        }

        // Free-frame path: the page takes the next unoccupied slot.
        if self.frames.len() < self.config.frame_count {
            let frame_id = self.frames.len();
            self.frames.push(page);
            self.replacer.record_load(page);
            return Ok(Outcome::FaultLoaded { frame_id });
        }

        // Replacement path: the policy picks the victim, which is
        // overwritten in place so every other page keeps its frame.
        let lookahead = Lookahead::new(&self.sequence, self.cursor, self.config.page_size);
        let frame_id = self
            .replacer
            .pick_victim(&self.frames, lookahead)
            .ok_or_else(|| {
                Error::InvalidState(
                    "replacement policy produced no victim for a full frame table".to_string(),
                )
            })?;
        let victim_page = self.frames[frame_id];
        self.frames[frame_id] = page;
        self.replacer.record_load(page);
        Ok(Outcome::FaultReplaced {
            victim_page,
            frame_id,
        })
    }

    /// Steps the engine from wherever the cursor stands to completion and
    /// returns the run totals. Identical per-step semantics to calling
    /// [`step`](PagingEngine::step) in a loop.
    pub fn run(&mut self) -> Result<RunSummary> {
        while self.cursor < self.sequence.len() {
            self.step()?;
        }
        Ok(RunSummary {
            policy: self.config.policy,
            total_references: self.sequence.len(),
            fault_count: self.fault_count,
        })
    }

    /// Returns the engine to `Idle`: frame table, policy bookkeeping, fault
    /// counter, and cursor are all cleared. The sequence and configuration
    /// are retained, so the same run can be replayed.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.replacer.reset();
        self.cursor = 0;
        self.fault_count = 0;
    }

    pub fn run_state(&self) -> RunState {
        if self.cursor == self.sequence.len() {
            RunState::Complete
        } else if self.cursor == 0 {
            RunState::Idle
        } else {
            RunState::Running
        }
    }

    /// Current frame-table contents, ordered by frame id. Shorter than the
    /// configured frame count until the table fills up.
    pub fn frames(&self) -> &[PageId] {
        &self.frames
    }

    pub fn fault_count(&self) -> usize {
        self.fault_count
    }

    /// Index of the next reference to process; equals the sequence length
    /// once the run is complete.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn policy(&self) -> Policy {
        self.config.policy
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn frame_count(&self) -> usize {
        self.config.frame_count
    }

    pub fn sequence(&self) -> &ReferenceSequence {
        &self.sequence
    }
}

/// Runs the whole sequence under FIFO and returns the total fault count.
pub fn run_fifo(
    sequence: &ReferenceSequence,
    page_size: usize,
    frame_count: usize,
) -> Result<usize> {
    let config = EngineConfig::new(page_size, frame_count, Policy::Fifo);
    let mut engine = PagingEngine::new(sequence.clone(), config)?;
    Ok(engine.run()?.fault_count)
}

/// Runs the whole sequence under OPT and returns the total fault count.
pub fn run_opt(sequence: &ReferenceSequence, page_size: usize, frame_count: usize) -> Result<usize> {
    let config = EngineConfig::new(page_size, frame_count, Policy::Opt);
    let mut engine = PagingEngine::new(sequence.clone(), config)?;
    Ok(engine.run()?.fault_count)
}

/// Replays the same sequence under both policies and returns the two run
/// summaries, FIFO first. The comparison a pedagogical driver reports.
pub fn compare_policies(
    sequence: &ReferenceSequence,
    page_size: usize,
    frame_count: usize,
) -> Result<(RunSummary, RunSummary)> {
    let mut fifo = PagingEngine::new(
        sequence.clone(),
        EngineConfig::new(page_size, frame_count, Policy::Fifo),
    )?;
    let mut opt = PagingEngine::new(
        sequence.clone(),
        EngineConfig::new(page_size, frame_count, Policy::Opt),
    )?;
    Ok((fifo.run()?, opt.run()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{ReferenceSequence, DEFAULT_TOTAL_INSTRUCTIONS};
    use pagesim_error::assert_errors;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    // Builds an engine over a page-number stream by using one-word pages,
    // so logical addresses and page numbers coincide.
    fn page_stream_engine(pages: &[usize], frame_count: usize, policy: Policy) -> PagingEngine {
        let sequence = ReferenceSequence::from_addresses(pages.to_vec());
        let config = EngineConfig::new(1, frame_count, policy);
        PagingEngine::new(sequence, config).unwrap()
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let sequence = ReferenceSequence::from_addresses(vec![1, 2]);
        assert_errors!(PagingEngine::new(
            sequence,
            EngineConfig::new(0, 4, Policy::Fifo)
        ));
    }

    #[test]
    fn test_rejects_zero_frame_count() {
        let sequence = ReferenceSequence::from_addresses(vec![1, 2]);
        assert_errors!(PagingEngine::new(
            sequence,
            EngineConfig::new(10, 0, Policy::Opt)
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("fifo".parse::<Policy>().unwrap(), Policy::Fifo);
        assert_eq!("OPT".parse::<Policy>().unwrap(), Policy::Opt);
        assert_errors!("lru".parse::<Policy>());
    }

    #[test]
    fn test_fifo_textbook_sequence() {
        // Frames fill 0..3, pages 1 and 2 hit, then 5 evicts page 1 (the
        // first arrival) from frame 0.
        let mut engine = page_stream_engine(&[1, 2, 3, 4, 1, 2, 5], 4, Policy::Fifo);

        for (frame_id, page) in [1, 2, 3, 4].into_iter().enumerate() {
            let trace = engine.step().unwrap();
            assert_eq!(trace.page, page);
            assert_eq!(trace.outcome, Outcome::FaultLoaded { frame_id });
        }
        assert_eq!(engine.step().unwrap().outcome, Outcome::Hit { frame_id: 0 });
        assert_eq!(engine.step().unwrap().outcome, Outcome::Hit { frame_id: 1 });

        let trace = engine.step().unwrap();
        assert_eq!(
            trace.outcome,
            Outcome::FaultReplaced {
                victim_page: 1,
                frame_id: 0
            }
        );
        assert_eq!(trace.frames, vec![5, 2, 3, 4]);
        assert_eq!(engine.fault_count(), 5);
        assert_eq!(engine.run_state(), RunState::Complete);
    }

    #[test]
    fn test_opt_textbook_sequence() {
        // No resident page is referenced after the fault point, so the
        // tie-break picks frame 0 and the totals match FIFO exactly.
        let mut engine = page_stream_engine(&[1, 2, 3, 4, 1, 2, 5], 4, Policy::Opt);
        let summary = engine.run().unwrap();
        assert_eq!(summary.fault_count, 5);
        assert_eq!(engine.frames(), &[5, 2, 3, 4]);
    }

    #[test]
    fn test_opt_beats_fifo_on_reuse_rich_sequence() {
        let sequence = ReferenceSequence::from_addresses(vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3]);
        let fifo_faults = run_fifo(&sequence, 1, 3).unwrap();
        let opt_faults = run_opt(&sequence, 1, 3).unwrap();
        assert_eq!(fifo_faults, 8);
        assert_eq!(opt_faults, 6);
    }

    #[test]
    fn test_hit_reports_physical_address() {
        // Address 37 lives on page 3; after pages 0..=3 load, page 3 sits in
        // frame 3, so the access lands at 3 * 10 + 7.
        let sequence = ReferenceSequence::from_addresses(vec![5, 15, 25, 35, 37]);
        let config = EngineConfig::new(10, 4, Policy::Fifo);
        let mut engine = PagingEngine::new(sequence, config).unwrap();
        let mut last = None;
        for _ in 0..5 {
            last = Some(engine.step().unwrap());
        }
        let trace = last.unwrap();
        assert_eq!(trace.page, 3);
        assert_eq!(trace.offset, 7);
        assert_eq!(trace.outcome, Outcome::Hit { frame_id: 3 });
        assert_eq!(trace.physical_address, 37);
    }

    #[test]
    fn test_step_after_completion_is_invalid_state() {
        let mut engine = page_stream_engine(&[1, 2], 4, Policy::Fifo);
        engine.run().unwrap();
        assert_errors!(engine.step());

        // A reset makes the run replayable again.
        engine.reset();
        assert_eq!(engine.step().unwrap().outcome, Outcome::FaultLoaded { frame_id: 0 });
    }

    #[test]
    fn test_run_state_transitions() {
        let mut engine = page_stream_engine(&[1, 2, 3], 2, Policy::Fifo);
        assert_eq!(engine.run_state(), RunState::Idle);
        engine.step().unwrap();
        assert_eq!(engine.run_state(), RunState::Running);
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.run_state(), RunState::Complete);
        engine.reset();
        assert_eq!(engine.run_state(), RunState::Idle);
    }

    #[test]
    fn test_empty_sequence_is_immediately_complete() {
        let mut engine = page_stream_engine(&[], 4, Policy::Fifo);
        assert_eq!(engine.run_state(), RunState::Complete);
        let summary = engine.run().unwrap();
        assert_eq!(summary.fault_count, 0);
        assert_eq!(summary.fault_rate(), 0.0);
        assert_errors!(engine.step());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = page_stream_engine(&[1, 2, 3, 4, 5], 2, Policy::Fifo);
        engine.run().unwrap();
        assert!(engine.fault_count() > 0);

        engine.reset();
        assert_eq!(engine.fault_count(), 0);
        assert_eq!(engine.cursor(), 0);
        assert!(engine.frames().is_empty());

        // Replaying after reset reproduces the exact same totals.
        let summary = engine.run().unwrap();
        assert_eq!(summary.fault_count, 5);
    }

    #[test]
    fn test_stepwise_run_matches_batch_run() {
        let sequence =
            ReferenceSequence::shuffled(DEFAULT_TOTAL_INSTRUCTIONS, &mut StdRng::seed_from_u64(11));
        for policy in [Policy::Fifo, Policy::Opt] {
            let config = EngineConfig::new(DEFAULT_PAGE_SIZE, DEFAULT_FRAME_COUNT, policy);
            let mut stepping = PagingEngine::new(sequence.clone(), config).unwrap();
            let mut batch = PagingEngine::new(sequence.clone(), config).unwrap();

            while stepping.run_state() != RunState::Complete {
                stepping.step().unwrap();
            }
            let summary = batch.run().unwrap();
            assert_eq!(stepping.fault_count(), summary.fault_count);
            assert_eq!(stepping.frames(), batch.frames());
        }
    }

    #[test]
    fn test_frame_table_invariants_hold_at_every_step() {
        let sequence = ReferenceSequence::shuffled(128, &mut StdRng::seed_from_u64(3));
        for policy in [Policy::Fifo, Policy::Opt] {
            let config = EngineConfig::new(4, 3, policy);
            let mut engine = PagingEngine::new(sequence.clone(), config).unwrap();

            while engine.run_state() != RunState::Complete {
                engine.step().unwrap();

                // Capacity and uniqueness.
                assert!(engine.frames().len() <= engine.frame_count());
                let distinct: HashSet<_> = engine.frames().iter().collect();
                assert_eq!(distinct.len(), engine.frames().len());

                // Can't have more faults than accesses.
                assert!(engine.fault_count() <= engine.cursor());
            }
        }
    }

    #[test]
    fn test_resident_pages_keep_their_frames() {
        // Pages 2 and 3 must stay in frames 1 and 2 while page 4 replaces
        // page 1 in frame 0.
        let mut engine = page_stream_engine(&[1, 2, 3, 4, 2, 3], 3, Policy::Fifo);
        engine.run().unwrap();
        assert_eq!(engine.frames(), &[4, 2, 3]);
    }

    #[test]
    fn test_opt_never_loses_to_fifo() {
        // Optimality must hold across randomized trials, not just the
        // textbook instances.
        for seed in 0..25 {
            let sequence = ReferenceSequence::shuffled(
                DEFAULT_TOTAL_INSTRUCTIONS,
                &mut StdRng::seed_from_u64(seed),
            );
            let (fifo, opt) =
                compare_policies(&sequence, DEFAULT_PAGE_SIZE, DEFAULT_FRAME_COUNT).unwrap();
            assert!(
                opt.fault_count <= fifo.fault_count,
                "OPT faulted {} times vs FIFO's {} on seed {}",
                opt.fault_count,
                fifo.fault_count,
                seed
            );
        }
    }

    #[test]
    fn test_fault_rate() {
        let summary = RunSummary {
            policy: Policy::Fifo,
            total_references: 320,
            fault_count: 160,
        };
        assert_eq!(summary.fault_rate(), 0.5);
    }
}
