use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::translation::page_info;
use crate::typedef::{LogicalAddress, PageId};
use crate::Result;
use pagesim_error::errconfig;

/// Instruction count of the classic classroom setup: 320 instructions split
/// into 32 pages of 10 words, replayed against 4 frames.
pub const DEFAULT_TOTAL_INSTRUCTIONS: usize = 320;

/// An ordered sequence of logical addresses, one per simulated instruction.
/// Immutable once constructed; the engine only ever reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSequence {
    addresses: Vec<LogicalAddress>,
}

impl ReferenceSequence {
    /// Wraps an already-validated address sequence. Any sequence of
    /// non-negative addresses is acceptable input to the engine.
    pub fn from_addresses(addresses: Vec<LogicalAddress>) -> Self {
        Self { addresses }
    }

    /// Validated ingestion path for signed external input (file loaders,
    /// parameter forms). A negative address is a malformed sequence and
    /// fails with `InvalidConfiguration`.
    pub fn try_from_signed(raw: &[i64]) -> Result<Self> {
        let mut addresses = Vec::with_capacity(raw.len());
        for &value in raw {
            if value < 0 {
                return errconfig!("reference sequence contains negative address {}", value);
            }
            addresses.push(usize::try_from(value)?);
        }
        Ok(Self { addresses })
    }

    /// The canonical test generator: a uniformly shuffled permutation of
    /// `0..total_instructions`, so every address is referenced exactly once
    /// and every page exactly `page_size` times.
    pub fn shuffled<R: Rng + ?Sized>(total_instructions: usize, rng: &mut R) -> Self {
        let mut addresses: Vec<LogicalAddress> = (0..total_instructions).collect();
        addresses.shuffle(rng);
        Self { addresses }
    }

    /// Total instruction count of the run.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Returns the logical address at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<LogicalAddress> {
        self.addresses.get(index).copied()
    }

    /// Read-only view of the whole sequence.
    pub fn addresses(&self) -> &[LogicalAddress] {
        &self.addresses
    }

    /// Page number referenced at `index`, the lookahead primitive used by
    /// OPT victim selection.
    pub fn page_at(&self, index: usize, page_size: usize) -> Option<PageId> {
        self.get(index).map(|address| page_info(address, page_size).0)
    }
}

impl From<Vec<LogicalAddress>> for ReferenceSequence {
    fn from(addresses: Vec<LogicalAddress>) -> Self {
        Self::from_addresses(addresses)
    }
}
