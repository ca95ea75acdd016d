//! Event declarations for the L1 rollup contracts, grouped by the contract
//! that emits them. Topic hashes come from [`SolEvent::SIGNATURE_HASH`].

use alloy_primitives::Log;
use alloy_sol_types::SolEvent;

/// Tries to decode the provided log into the type T.
pub fn try_decode_log<T: SolEvent>(log: &Log) -> Option<Log<T>> {
    T::decode_log(log).ok()
}

/// Events of the Etrog-family rollup contract.
pub mod rollup {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug)]
        event SequenceBatches(uint64 indexed numBatch, bytes32 l1InfoRoot);

        #[derive(Debug)]
        event ForceBatch(
            uint64 indexed forceBatchNum,
            bytes32 lastGlobalExitRoot,
            address sequencer,
            bytes transactions
        );

        #[derive(Debug)]
        event SequenceForceBatches(uint64 indexed numBatch);

        #[derive(Debug)]
        event InitialSequenceBatches(bytes transactions, bytes32 lastGlobalExitRoot, address sequencer);

        #[derive(Debug)]
        event UpdateEtrogSequence(
            uint64 numBatch,
            bytes transactions,
            bytes32 lastGlobalExitRoot,
            address sequencer
        );

        event SetTrustedSequencer(address newTrustedSequencer);
        event SetTrustedSequencerURL(string newTrustedSequencerURL);
        event SetForceBatchTimeout(uint64 newforceBatchTimeout);
        event SetForceBatchAddress(address newForceBatchAddress);
        event TransferAdminRole(address newPendingAdmin);
        event AcceptAdminRole(address newAdmin);
    }
}

/// Events of the rollup contract before the Etrog upgrade.
pub mod legacy {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug)]
        event SequenceBatches(uint64 indexed numBatch);

        #[derive(Debug)]
        event VerifyBatches(uint64 indexed numBatch, bytes32 stateRoot, address indexed aggregator);

        #[derive(Debug)]
        event VerifyBatchesTrustedAggregator(
            uint64 indexed numBatch,
            bytes32 stateRoot,
            address indexed aggregator
        );

        #[derive(Debug)]
        event UpdateZkEVMVersion(uint64 numBatch, uint64 forkID, string version);

        event ConsolidatePendingState(uint64 indexed numBatch, bytes32 stateRoot, uint64 indexed pendingStateNum);
        event OverridePendingState(uint64 indexed numBatch, bytes32 stateRoot, address indexed aggregator);
        event ProveNonDeterministicPendingState(bytes32 storedStateRoot, bytes32 provedStateRoot);
        event SetTrustedAggregatorTimeout(uint64 newTrustedAggregatorTimeout);
        event SetTrustedAggregator(address newTrustedAggregator);
        event SetPendingStateTimeout(uint64 newPendingStateTimeout);
        event SetMultiplierBatchFee(uint16 newMultiplierBatchFee);
        event SetVerifyBatchTimeTarget(uint64 newVerifyBatchTimeTarget);
        event EmergencyStateActivated();
        event EmergencyStateDeactivated();
    }
}

/// Events of the rollup manager contract.
pub mod manager {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug)]
        event CreateNewRollup(
            uint32 indexed rollupID,
            uint32 rollupTypeID,
            address rollupAddress,
            uint64 chainID,
            address gasTokenAddress
        );

        #[derive(Debug)]
        event UpdateRollup(uint32 indexed rollupID, uint32 newRollupTypeID, uint64 lastVerifiedBatchBeforeUpgrade);

        #[derive(Debug)]
        event AddExistingRollup(
            uint32 indexed rollupID,
            uint64 forkID,
            address rollupAddress,
            uint64 chainID,
            uint8 rollupCompatibilityID,
            uint64 lastVerifiedBatchBeforeUpgrade
        );

        event AddNewRollupType(
            uint32 indexed rollupTypeID,
            address consensusImplementation,
            address verifier,
            uint64 forkID,
            uint8 rollupCompatibilityID,
            bytes32 genesis,
            string description
        );
        event ObsoleteRollupType(uint32 indexed rollupTypeID);
        event OnSequenceBatches(uint32 indexed rollupID, uint64 lastBatchSequenced);
        event VerifyBatches(
            uint32 indexed rollupID,
            uint64 numBatch,
            bytes32 stateRoot,
            bytes32 exitRoot,
            address indexed aggregator
        );
        event VerifyBatchesTrustedAggregator(
            uint32 indexed rollupID,
            uint64 numBatch,
            bytes32 stateRoot,
            bytes32 exitRoot,
            address indexed aggregator
        );
        event ConsolidatePendingState(
            uint32 indexed rollupID,
            uint64 numBatch,
            bytes32 stateRoot,
            bytes32 exitRoot,
            uint64 pendingStateNum
        );
        event OverridePendingState(
            uint32 indexed rollupID,
            uint64 numBatch,
            bytes32 stateRoot,
            bytes32 exitRoot,
            address aggregator
        );
        event SetBatchFee(uint256 newBatchFee);

        #[derive(Debug)]
        event Initialized(uint64 version);

        event RoleAdminChanged(bytes32 indexed role, bytes32 indexed previousAdminRole, bytes32 indexed newAdminRole);
        event RoleGranted(bytes32 indexed role, address indexed account, address indexed sender);
        event RoleRevoked(bytes32 indexed role, address indexed account, address indexed sender);
    }
}

/// Events of the global exit root manager contract.
pub mod exit_root {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        #[derive(Debug)]
        event UpdateL1InfoTree(bytes32 indexed mainnetExitRoot, bytes32 indexed rollupExitRoot);

        #[derive(Debug)]
        event UpdateGlobalExitRoot(bytes32 indexed mainnetExitRoot, bytes32 indexed rollupExitRoot);
    }
}

/// Events of the transparent proxies fronting the rollup contracts.
pub mod proxy {
    #![allow(missing_docs)]
    alloy_sol_types::sol! {
        event Initialized(uint8 version);
        event AdminChanged(address previousAdmin, address newAdmin);
        event BeaconUpgraded(address indexed beacon);
        event Upgraded(address indexed implementation);
        event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);
    }
}
