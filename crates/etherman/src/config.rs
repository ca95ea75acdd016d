use alloy_primitives::Address;

/// The default block span of a single fork-history log filter.
pub const DEFAULT_FORK_ID_CHUNK_SIZE: u64 = 20_000;

/// Addresses of the L1 contracts the synchronizer tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct L1ContractAddresses {
    /// The rollup contract.
    pub zkevm: Address,
    /// The rollup manager contract.
    pub rollup_manager: Address,
    /// The global exit root manager contract.
    pub global_exit_root_manager: Address,
}

impl L1ContractAddresses {
    /// The full address set, in the order log filters use it.
    pub const fn all(&self) -> [Address; 3] {
        [self.zkevm, self.rollup_manager, self.global_exit_root_manager]
    }
}

/// Configuration of the etherman client.
///
/// The client never dials; `l1_url` is carried for the embedder that
/// constructs the RPC provider handed to [`crate::Etherman::new`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EthermanConfig {
    /// URL of the L1 JSON-RPC endpoint.
    pub l1_url: String,
    /// The expected L1 chain id; zero accepts whatever the endpoint reports.
    pub l1_chain_id: u64,
    /// The tracked contract addresses.
    pub contracts: L1ContractAddresses,
    /// The block span of a single fork-history log filter.
    pub fork_id_chunk_size: u64,
    /// Whether blocks referenced by a log batch are pre-fetched in parallel.
    pub parallel_block_requests: bool,
    /// The first block scanned when locating the Etrog upgrade.
    pub upgrade_scan_start_block: u64,
    /// Whether the rollup runs in validium mode; requires a data-availability
    /// provider at construction.
    pub validium_enabled: bool,
}

impl EthermanConfig {
    /// Returns a configuration for the given endpoint and contract set, with
    /// every other option at its default.
    pub fn new(l1_url: String, contracts: L1ContractAddresses) -> Self {
        Self {
            l1_url,
            l1_chain_id: 0,
            contracts,
            fork_id_chunk_size: DEFAULT_FORK_ID_CHUNK_SIZE,
            parallel_block_requests: false,
            upgrade_scan_start_block: 1,
            validium_enabled: false,
        }
    }
}
