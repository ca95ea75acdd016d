use crate::{
    ForcedBatch, ForkId, GlobalExitRoot, SequencedBatch, SequencedForceBatch, UpdateEtrogSequence,
    VerifiedBatch,
};

use alloy_primitives::B256;
use std::vec::Vec;

/// The rollup-relevant content of a single L1 block.
///
/// Event arrays are appended in log order while a block range is processed.
/// `sequenced_batches` and `sequenced_force_batches` are sequences of
/// sequences: each outer element is one sequencing transaction, the inner
/// elements are the batches it produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RollupBlock {
    /// The L1 block number.
    pub block_number: u64,
    /// The L1 block hash.
    pub block_hash: B256,
    /// The parent hash of the L1 block.
    pub parent_hash: B256,
    /// The L1 header timestamp, second precision.
    pub received_at: u64,
    /// Batch groups from `sequenceBatches` transactions.
    pub sequenced_batches: Vec<Vec<SequencedBatch>>,
    /// Batch groups from `sequenceForceBatches` transactions.
    pub sequenced_force_batches: Vec<Vec<SequencedForceBatch>>,
    /// Batches verified by the trusted aggregator.
    pub verified_batches: Vec<VerifiedBatch>,
    /// Batches forced on L1.
    pub forced_batches: Vec<ForcedBatch>,
    /// Legacy global exit root updates.
    pub global_exit_roots: Vec<GlobalExitRoot>,
    /// L1 info tree leaf updates.
    pub l1_info_tree: Vec<GlobalExitRoot>,
    /// Fork definitions that became active in this block.
    pub fork_ids: Vec<ForkId>,
    /// The Etrog migration sequence, present in at most one block.
    pub update_etrog_sequence: Option<UpdateEtrogSequence>,
}

impl RollupBlock {
    /// Returns an empty [`RollupBlock`] for the given header fields.
    pub fn new(block_number: u64, block_hash: B256, parent_hash: B256, received_at: u64) -> Self {
        Self { block_number, block_hash, parent_hash, received_at, ..Default::default() }
    }

    /// Whether this block is the one identified by `(block_number, block_hash)`.
    pub fn matches(&self, block_number: u64, block_hash: B256) -> bool {
        self.block_number == block_number && self.block_hash == block_hash
    }

    /// The total number of event records attached to this block. One
    /// sequencing transaction counts as one record regardless of how many
    /// batches it produced, matching the per-block ordering entries.
    pub fn event_count(&self) -> usize {
        self.sequenced_batches.len() +
            self.sequenced_force_batches.len() +
            self.verified_batches.len() +
            self.forced_batches.len() +
            self.global_exit_roots.len() +
            self.l1_info_tree.len() +
            self.fork_ids.len() +
            usize::from(self.update_etrog_sequence.is_some())
    }
}

impl core::fmt::Display for RollupBlock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "RollupBlock {{ number: {}, hash: {}, events: {} }}",
            self.block_number,
            self.block_hash,
            self.event_count()
        )
    }
}
