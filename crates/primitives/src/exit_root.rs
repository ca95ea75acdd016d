use alloy_primitives::{keccak256, B256};

/// A bridge state snapshot emitted by the global exit root manager.
///
/// Produced both by legacy `UpdateGlobalExitRoot` events and by the
/// `UpdateL1InfoTree` events that superseded them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalExitRoot {
    /// The L1 block number the update was emitted at.
    pub block_number: u64,
    /// The mainnet exit root.
    pub mainnet_exit_root: B256,
    /// The rollup exit root.
    pub rollup_exit_root: B256,
    /// `keccak256(mainnet_exit_root || rollup_exit_root)`.
    pub global_exit_root: B256,
    /// The parent hash of the emitting block.
    pub previous_block_hash: B256,
    /// The timestamp of the emitting block, second precision.
    pub timestamp: u64,
}

impl GlobalExitRoot {
    /// Computes the global exit root for the given pair of exit roots.
    pub fn compute(mainnet_exit_root: B256, rollup_exit_root: B256) -> B256 {
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(mainnet_exit_root.as_slice());
        preimage[32..].copy_from_slice(rollup_exit_root.as_slice());
        keccak256(preimage)
    }
}
