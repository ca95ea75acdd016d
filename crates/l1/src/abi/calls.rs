//! Call declarations for the transactions and view functions the
//! synchronizer decodes or issues. Each protocol fork keeps its own
//! self-contained module since the `sequenceBatches` layout changed with
//! every upgrade; selectors come from [`alloy_sol_types::SolCall::SELECTOR`].

use zkevm_sync_primitives::{EtrogBatchData, PreEtrogBatchData};

/// The `sequenceBatches` layout used before the Etrog upgrade.
pub mod pre_etrog {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug, Default)]
        struct PolygonZkEVMBatchData {
            bytes transactions;
            bytes32 globalExitRoot;
            uint64 timestamp;
            uint64 minForcedTimestamp;
        }

        #[derive(Debug)]
        function sequenceBatches(PolygonZkEVMBatchData[] calldata batches, address l2Coinbase) external;
    }
}

/// The Etrog `sequenceBatches` layout, also used by `sequenceForceBatches`.
pub mod etrog {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug, Default)]
        struct PolygonRollupBaseEtrogBatchData {
            bytes transactions;
            bytes32 forcedGlobalExitRoot;
            uint64 forcedTimestamp;
            bytes32 forcedBlockHashL1;
        }

        #[derive(Debug)]
        function sequenceBatches(PolygonRollupBaseEtrogBatchData[] calldata batches, address l2Coinbase) external;

        #[derive(Debug)]
        function sequenceForceBatches(PolygonRollupBaseEtrogBatchData[] calldata batches) external;

        #[derive(Debug)]
        function forceBatch(bytes calldata transactions, uint256 polAmount) external;
    }
}

/// The Elderberry `sequenceBatches` layout: Etrog batches plus the sequence
/// timestamp bounds.
pub mod elderberry {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug)]
        struct PolygonRollupBaseEtrogBatchData {
            bytes transactions;
            bytes32 forcedGlobalExitRoot;
            uint64 forcedTimestamp;
            bytes32 forcedBlockHashL1;
        }

        #[derive(Debug)]
        function sequenceBatches(
            PolygonRollupBaseEtrogBatchData[] calldata batches,
            uint64 maxSequenceTimestamp,
            uint64 initSequencedBatch,
            address l2Coinbase
        ) external;
    }
}

/// The Banana `sequenceBatches` layout: Etrog batches plus the L1 info tree
/// counter and the expected accumulated input hash.
pub mod banana {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug)]
        struct PolygonRollupBaseEtrogBatchData {
            bytes transactions;
            bytes32 forcedGlobalExitRoot;
            uint64 forcedTimestamp;
            bytes32 forcedBlockHashL1;
        }

        #[derive(Debug)]
        function sequenceBatches(
            PolygonRollupBaseEtrogBatchData[] calldata batches,
            uint32 l1InfoTreeLeafCount,
            uint64 maxSequenceTimestamp,
            bytes32 expectedFinalAccInputHash,
            address l2Coinbase
        ) external;
    }
}

/// The validium sequencing layouts, where each batch carries a commitment to
/// its transactions instead of the transaction bytes.
pub mod validium {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug)]
        struct ValidiumBatchData {
            bytes32 transactionsHash;
            bytes32 forcedGlobalExitRoot;
            uint64 forcedTimestamp;
            bytes32 forcedBlockHashL1;
        }

        #[derive(Debug)]
        function sequenceBatchesValidium(
            ValidiumBatchData[] calldata batches,
            address l2Coinbase,
            bytes calldata dataAvailabilityMessage
        ) external;
    }
}

/// The Elderberry validium sequencing layout.
pub mod elderberry_validium {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug)]
        struct ValidiumBatchData {
            bytes32 transactionsHash;
            bytes32 forcedGlobalExitRoot;
            uint64 forcedTimestamp;
            bytes32 forcedBlockHashL1;
        }

        #[derive(Debug)]
        function sequenceBatchesValidium(
            ValidiumBatchData[] calldata batches,
            uint64 maxSequenceTimestamp,
            uint64 initSequencedBatch,
            address l2Coinbase,
            bytes calldata dataAvailabilityMessage
        ) external;
    }
}

/// View functions of the rollup manager and rollup contracts, issued as raw
/// `eth_call`s and decoded from the returned bytes.
pub mod views {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug)]
        function rollupAddressToID(address rollupAddress) external view returns (uint32 rollupID);

        #[derive(Debug)]
        function rollupIDToRollupData(uint32 rollupID) external view returns (
            address rollupContract,
            uint64 chainID,
            address verifier,
            uint64 forkID,
            bytes32 lastLocalExitRoot,
            uint64 lastBatchSequenced,
            uint64 lastVerifiedBatch,
            uint64 lastPendingState,
            uint64 lastPendingStateConsolidated,
            uint64 lastVerifiedBatchBeforeUpgrade,
            uint64 rollupTypeID,
            uint8 rollupCompatibilityID
        );

        #[derive(Debug)]
        function rollupTypeMap(uint32 rollupTypeID) external view returns (
            address consensusImplementation,
            address verifier,
            uint64 forkID,
            uint8 rollupCompatibilityID,
            bool obsolete,
            bytes32 genesis
        );

        #[derive(Debug)]
        function getBatchFee() external view returns (uint256 batchFee);

        #[derive(Debug)]
        function trustedSequencer() external view returns (address sequencer);

        #[derive(Debug)]
        function trustedSequencerURL() external view returns (string memory url);

        #[derive(Debug)]
        function chainID() external view returns (uint64 l2ChainID);
    }
}

impl From<pre_etrog::PolygonZkEVMBatchData> for PreEtrogBatchData {
    fn from(value: pre_etrog::PolygonZkEVMBatchData) -> Self {
        Self {
            transactions: value.transactions,
            global_exit_root: value.globalExitRoot,
            timestamp: value.timestamp,
            min_forced_timestamp: value.minForcedTimestamp,
        }
    }
}

impl From<etrog::PolygonRollupBaseEtrogBatchData> for EtrogBatchData {
    fn from(value: etrog::PolygonRollupBaseEtrogBatchData) -> Self {
        Self {
            transactions: value.transactions,
            forced_global_exit_root: value.forcedGlobalExitRoot,
            forced_timestamp: value.forcedTimestamp,
            forced_block_hash_l1: value.forcedBlockHashL1,
        }
    }
}

impl From<elderberry::PolygonRollupBaseEtrogBatchData> for EtrogBatchData {
    fn from(value: elderberry::PolygonRollupBaseEtrogBatchData) -> Self {
        Self {
            transactions: value.transactions,
            forced_global_exit_root: value.forcedGlobalExitRoot,
            forced_timestamp: value.forcedTimestamp,
            forced_block_hash_l1: value.forcedBlockHashL1,
        }
    }
}

impl From<banana::PolygonRollupBaseEtrogBatchData> for EtrogBatchData {
    fn from(value: banana::PolygonRollupBaseEtrogBatchData) -> Self {
        Self {
            transactions: value.transactions,
            forced_global_exit_root: value.forcedGlobalExitRoot,
            forced_timestamp: value.forcedTimestamp,
            forced_block_hash_l1: value.forcedBlockHashL1,
        }
    }
}
