use crate::abi::logs::{exit_root, legacy, manager, proxy, rollup};

use alloy_primitives::B256;
use alloy_sol_types::SolEvent;

/// Classification of an L1 log by its first topic.
///
/// The set is closed: every topic the rollup contracts emit maps to exactly
/// one kind, administrative noise included. A topic outside the set is not an
/// error; callers log it and move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum L1EventKind {
    /// `SequenceBatches` from the Etrog-family rollup contract.
    SequenceBatches,
    /// `SequenceBatches` from the rollup contract before Etrog.
    SequenceBatchesPreEtrog,
    /// `SequenceForceBatches` settling previously forced batches.
    SequenceForceBatches,
    /// `ForceBatch` forcing a batch directly on L1.
    ForceBatch,
    /// `InitialSequenceBatches` creating the rollup genesis sequence.
    InitialSequenceBatches,
    /// `UpdateEtrogSequence` migrating a rollup onto the Etrog layout.
    UpdateEtrogSequence,
    /// `UpdateL1InfoTree` from the global exit root manager.
    UpdateL1InfoTree,
    /// Legacy `UpdateGlobalExitRoot` from the global exit root manager.
    UpdateGlobalExitRoot,
    /// Legacy `VerifyBatchesTrustedAggregator` from the pre-Etrog contract.
    VerifyBatchesTrustedAggregatorLegacy,
    /// `UpdateZkEVMVersion` defining a fork on the pre-Etrog contract.
    UpdateZkEvmVersion,
    /// `UpdateRollup` switching a rollup to a new rollup type.
    UpdateRollup,
    /// `AddExistingRollup` attaching a pre-existing rollup to the manager.
    AddExistingRollup,
    /// `CreateNewRollup` creating a rollup on the manager.
    CreateNewRollup,
    /// Recognized but irrelevant to rollup state transitions; carried with
    /// its canonical signature for diagnostics.
    Administrative(&'static str),
}

impl L1EventKind {
    /// Classifies a log topic. `None` for topics outside the closed set.
    pub fn from_topic(topic: B256) -> Option<Self> {
        Some(match topic {
            rollup::SequenceBatches::SIGNATURE_HASH => Self::SequenceBatches,
            legacy::SequenceBatches::SIGNATURE_HASH => Self::SequenceBatchesPreEtrog,
            rollup::SequenceForceBatches::SIGNATURE_HASH => Self::SequenceForceBatches,
            rollup::ForceBatch::SIGNATURE_HASH => Self::ForceBatch,
            rollup::InitialSequenceBatches::SIGNATURE_HASH => Self::InitialSequenceBatches,
            rollup::UpdateEtrogSequence::SIGNATURE_HASH => Self::UpdateEtrogSequence,
            exit_root::UpdateL1InfoTree::SIGNATURE_HASH => Self::UpdateL1InfoTree,
            exit_root::UpdateGlobalExitRoot::SIGNATURE_HASH => Self::UpdateGlobalExitRoot,
            legacy::VerifyBatchesTrustedAggregator::SIGNATURE_HASH => {
                Self::VerifyBatchesTrustedAggregatorLegacy
            }
            legacy::UpdateZkEVMVersion::SIGNATURE_HASH => Self::UpdateZkEvmVersion,
            manager::UpdateRollup::SIGNATURE_HASH => Self::UpdateRollup,
            manager::AddExistingRollup::SIGNATURE_HASH => Self::AddExistingRollup,
            manager::CreateNewRollup::SIGNATURE_HASH => Self::CreateNewRollup,
            topic => return Self::administrative_from_topic(topic),
        })
    }

    /// The canonical signature of the event, usable as a diagnostic label.
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::SequenceBatches => rollup::SequenceBatches::SIGNATURE,
            Self::SequenceBatchesPreEtrog => legacy::SequenceBatches::SIGNATURE,
            Self::SequenceForceBatches => rollup::SequenceForceBatches::SIGNATURE,
            Self::ForceBatch => rollup::ForceBatch::SIGNATURE,
            Self::InitialSequenceBatches => rollup::InitialSequenceBatches::SIGNATURE,
            Self::UpdateEtrogSequence => rollup::UpdateEtrogSequence::SIGNATURE,
            Self::UpdateL1InfoTree => exit_root::UpdateL1InfoTree::SIGNATURE,
            Self::UpdateGlobalExitRoot => exit_root::UpdateGlobalExitRoot::SIGNATURE,
            Self::VerifyBatchesTrustedAggregatorLegacy => {
                legacy::VerifyBatchesTrustedAggregator::SIGNATURE
            }
            Self::UpdateZkEvmVersion => legacy::UpdateZkEVMVersion::SIGNATURE,
            Self::UpdateRollup => manager::UpdateRollup::SIGNATURE,
            Self::AddExistingRollup => manager::AddExistingRollup::SIGNATURE,
            Self::CreateNewRollup => manager::CreateNewRollup::SIGNATURE,
            Self::Administrative(signature) => signature,
        }
    }

    /// Whether the kind carries no rollup state and is dropped after logging.
    pub const fn is_administrative(&self) -> bool {
        matches!(self, Self::Administrative(_))
    }

    fn administrative_from_topic(topic: B256) -> Option<Self> {
        let signature = match topic {
            legacy::VerifyBatches::SIGNATURE_HASH => legacy::VerifyBatches::SIGNATURE,
            legacy::ConsolidatePendingState::SIGNATURE_HASH => {
                legacy::ConsolidatePendingState::SIGNATURE
            }
            legacy::OverridePendingState::SIGNATURE_HASH => legacy::OverridePendingState::SIGNATURE,
            legacy::ProveNonDeterministicPendingState::SIGNATURE_HASH => {
                legacy::ProveNonDeterministicPendingState::SIGNATURE
            }
            legacy::SetTrustedAggregatorTimeout::SIGNATURE_HASH => {
                legacy::SetTrustedAggregatorTimeout::SIGNATURE
            }
            legacy::SetTrustedAggregator::SIGNATURE_HASH => legacy::SetTrustedAggregator::SIGNATURE,
            legacy::SetPendingStateTimeout::SIGNATURE_HASH => {
                legacy::SetPendingStateTimeout::SIGNATURE
            }
            legacy::SetMultiplierBatchFee::SIGNATURE_HASH => {
                legacy::SetMultiplierBatchFee::SIGNATURE
            }
            legacy::SetVerifyBatchTimeTarget::SIGNATURE_HASH => {
                legacy::SetVerifyBatchTimeTarget::SIGNATURE
            }
            legacy::EmergencyStateActivated::SIGNATURE_HASH => {
                legacy::EmergencyStateActivated::SIGNATURE
            }
            legacy::EmergencyStateDeactivated::SIGNATURE_HASH => {
                legacy::EmergencyStateDeactivated::SIGNATURE
            }
            rollup::SetTrustedSequencer::SIGNATURE_HASH => rollup::SetTrustedSequencer::SIGNATURE,
            rollup::SetTrustedSequencerURL::SIGNATURE_HASH => {
                rollup::SetTrustedSequencerURL::SIGNATURE
            }
            rollup::SetForceBatchTimeout::SIGNATURE_HASH => rollup::SetForceBatchTimeout::SIGNATURE,
            rollup::SetForceBatchAddress::SIGNATURE_HASH => rollup::SetForceBatchAddress::SIGNATURE,
            rollup::TransferAdminRole::SIGNATURE_HASH => rollup::TransferAdminRole::SIGNATURE,
            rollup::AcceptAdminRole::SIGNATURE_HASH => rollup::AcceptAdminRole::SIGNATURE,
            manager::AddNewRollupType::SIGNATURE_HASH => manager::AddNewRollupType::SIGNATURE,
            manager::ObsoleteRollupType::SIGNATURE_HASH => manager::ObsoleteRollupType::SIGNATURE,
            manager::OnSequenceBatches::SIGNATURE_HASH => manager::OnSequenceBatches::SIGNATURE,
            manager::VerifyBatches::SIGNATURE_HASH => manager::VerifyBatches::SIGNATURE,
            manager::VerifyBatchesTrustedAggregator::SIGNATURE_HASH => {
                manager::VerifyBatchesTrustedAggregator::SIGNATURE
            }
            manager::ConsolidatePendingState::SIGNATURE_HASH => {
                manager::ConsolidatePendingState::SIGNATURE
            }
            manager::OverridePendingState::SIGNATURE_HASH => {
                manager::OverridePendingState::SIGNATURE
            }
            manager::SetBatchFee::SIGNATURE_HASH => manager::SetBatchFee::SIGNATURE,
            manager::Initialized::SIGNATURE_HASH => manager::Initialized::SIGNATURE,
            manager::RoleAdminChanged::SIGNATURE_HASH => manager::RoleAdminChanged::SIGNATURE,
            manager::RoleGranted::SIGNATURE_HASH => manager::RoleGranted::SIGNATURE,
            manager::RoleRevoked::SIGNATURE_HASH => manager::RoleRevoked::SIGNATURE,
            proxy::Initialized::SIGNATURE_HASH => proxy::Initialized::SIGNATURE,
            proxy::AdminChanged::SIGNATURE_HASH => proxy::AdminChanged::SIGNATURE,
            proxy::BeaconUpgraded::SIGNATURE_HASH => proxy::BeaconUpgraded::SIGNATURE,
            proxy::Upgraded::SIGNATURE_HASH => proxy::Upgraded::SIGNATURE,
            proxy::OwnershipTransferred::SIGNATURE_HASH => proxy::OwnershipTransferred::SIGNATURE,
            _ => return None,
        };
        Some(Self::Administrative(signature))
    }
}
