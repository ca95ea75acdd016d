use alloy_primitives::{Address, Bytes, B256};

/// A single rollup batch decoded from a `sequenceBatches` transaction.
///
/// One sequencing transaction produces a group of these; batch numbers within
/// a group are contiguous and end at the number reported by the event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequencedBatch {
    /// The rollup batch number.
    pub batch_number: u64,
    /// The sender recovered from the sequencing transaction.
    pub sequencer: Address,
    /// The hash of the sequencing transaction.
    pub tx_hash: B256,
    /// The nonce of the sequencing transaction.
    pub nonce: u64,
    /// The fee beneficiary passed in the sequencing calldata.
    pub coinbase: Address,
    /// The L1 info root reported by the sequencing event, where the fork
    /// carries one.
    pub l1_info_root: Option<B256>,
    /// The fork-specific batch payload. `None` for the initial sequence,
    /// which is emitted without decoding calldata.
    pub data: Option<BatchData>,
}

/// Fork-specific payload of a [`SequencedBatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BatchData {
    /// Batch data in the layout used before the Etrog upgrade.
    PreEtrog(PreEtrogBatchData),
    /// Batch data in the Etrog layout.
    Etrog(EtrogBatchData),
    /// Etrog layout plus the Elderberry sequencing scalars.
    Elderberry {
        /// The batch payload.
        batch: EtrogBatchData,
        /// The extra scalars carried by the Elderberry calldata.
        elderberry: ElderberrySequenceData,
    },
    /// Etrog layout plus the Banana sequencing fields.
    Banana {
        /// The batch payload.
        batch: EtrogBatchData,
        /// The extra fields carried by the Banana calldata.
        banana: BananaSequenceData,
    },
}

impl BatchData {
    /// The name of the fork this payload was sequenced under.
    pub const fn fork_name(&self) -> &'static str {
        match self {
            Self::PreEtrog(_) => "pre-etrog",
            Self::Etrog(_) => "etrog",
            Self::Elderberry { .. } => "elderberry",
            Self::Banana { .. } => "banana",
        }
    }

    /// Returns the Etrog-layout payload for every fork that uses it.
    pub const fn as_etrog(&self) -> Option<&EtrogBatchData> {
        match self {
            Self::PreEtrog(_) => None,
            Self::Etrog(batch) |
            Self::Elderberry { batch, .. } |
            Self::Banana { batch, .. } => Some(batch),
        }
    }
}

/// Per-batch payload of a pre-Etrog `sequenceBatches` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreEtrogBatchData {
    /// The raw batch transactions.
    pub transactions: Bytes,
    /// The global exit root the batch was sequenced against.
    pub global_exit_root: B256,
    /// The batch timestamp.
    pub timestamp: u64,
    /// The minimum forced timestamp, non-zero for forced batches.
    pub min_forced_timestamp: u64,
}

/// Per-batch payload of an Etrog-family `sequenceBatches` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EtrogBatchData {
    /// The raw batch transactions. For validium sequences these are resolved
    /// through the data-availability provider, never the on-chain commitment.
    pub transactions: Bytes,
    /// The forced global exit root, zero unless the batch was forced.
    pub forced_global_exit_root: B256,
    /// The forced timestamp, zero unless the batch was forced.
    pub forced_timestamp: u64,
    /// The forced L1 block hash, zero unless the batch was forced.
    pub forced_block_hash_l1: B256,
}

/// The scalars appended to the Etrog layout by the Elderberry upgrade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElderberrySequenceData {
    /// Upper bound on the timestamps of the sequenced batches.
    pub max_sequence_timestamp: u64,
    /// The batch number the sequence starts from.
    pub init_sequenced_batch_number: u64,
}

/// The fields appended to the Etrog layout by the Banana upgrade.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BananaSequenceData {
    /// The L1 info tree leaf count the sequence was built against.
    pub counter_l1_info_root: u32,
    /// Upper bound on the timestamps of the sequenced batches.
    pub max_sequence_timestamp: u64,
    /// The accumulated input hash the sequencer expects after this sequence.
    pub expected_final_acc_input_hash: B256,
    /// The data-availability message, empty for rollup-mode sequences.
    pub data_availability_msg: Bytes,
}

/// A batch decoded from a `sequenceForceBatches` transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequencedForceBatch {
    /// The rollup batch number.
    pub batch_number: u64,
    /// The sender of the force-sequencing transaction.
    pub coinbase: Address,
    /// The hash of the force-sequencing transaction.
    pub tx_hash: B256,
    /// The L1 timestamp of the block containing the transaction.
    pub timestamp: u64,
    /// The nonce of the force-sequencing transaction.
    pub nonce: u64,
    /// The forced batch payload.
    pub batch: EtrogBatchData,
}

/// A batch forced directly on L1, pending sequencing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForcedBatch {
    /// The L1 block number the force event was emitted at.
    pub block_number: u64,
    /// The forced batch number.
    pub forced_batch_number: u64,
    /// The address that forced the batch.
    pub sequencer: Address,
    /// The global exit root at forcing time.
    pub global_exit_root: B256,
    /// The raw batch transactions.
    pub raw_txs_data: Bytes,
    /// The L1 timestamp the batch was forced at, second precision.
    pub forced_at: u64,
}

/// A batch proven and verified on L1 by the trusted aggregator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerifiedBatch {
    /// The L1 block number the verification event was emitted at.
    pub block_number: u64,
    /// The highest batch number covered by the proof.
    pub batch_number: u64,
    /// The aggregator that submitted the proof.
    pub aggregator: Address,
    /// The L2 state root after the verified batch.
    pub state_root: B256,
    /// The hash of the verification transaction.
    pub tx_hash: B256,
}

/// The sequence injected by the rollup manager when migrating a pre-Etrog
/// rollup onto the Etrog layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateEtrogSequence {
    /// The rollup batch number.
    pub batch_number: u64,
    /// The sequencer reported by the event.
    pub sequencer: Address,
    /// The hash of the migration transaction.
    pub tx_hash: B256,
    /// The nonce of the migration transaction.
    pub nonce: u64,
    /// The synthesized batch payload.
    pub batch: EtrogBatchData,
}
