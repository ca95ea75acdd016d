//! The etherman client: reads rollup-relevant events from an Ethereum
//! JSON-RPC endpoint and presents them as a strictly ordered stream grouped
//! by L1 block, along with the rollup's fork history and a set of scalar
//! contract queries.

pub use config::{EthermanConfig, L1ContractAddresses, DEFAULT_FORK_ID_CHUNK_SIZE};
mod config;

pub use error::{EthRequestError, EthermanError, EthermanResult, FilterLogError};
mod error;

mod fetcher;

pub use forks::ETROG_UPGRADE_VERSION;
mod forks;

pub use metrics::EthermanMetrics;
mod metrics;

pub use processor::RollupInfo;
mod processor;

pub use provider::{L1RpcError, L1RpcProvider, RpcBlock, RpcTransaction};
mod provider;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use alloy_eips::BlockNumberOrTag;
use alloy_primitives::{Address, U256};
use alloy_rpc_types_eth::Filter;
use alloy_sol_types::{SolCall, SolEvent};
use std::{collections::HashMap, sync::Arc, time::Instant};
use zkevm_sync_l1::{
    abi::{calls::views, logs::exit_root},
    decoder::{self, SequenceBatchesDecoder},
    DataAvailabilityProvider, L1EventKind,
};
use zkevm_sync_primitives::RollupBlock;

/// The L1 client of the synchronizer.
///
/// Holds no mutable state between calls: configuration, the resolved rollup
/// id, and the decoder set are fixed at construction, so the client is safe
/// to share behind a reference.
#[derive(Debug)]
pub struct Etherman<P> {
    provider: P,
    config: EthermanConfig,
    rollup_id: u32,
    decoders: Vec<Box<dyn SequenceBatchesDecoder>>,
    metrics: EthermanMetrics,
}

impl<P: L1RpcProvider> Etherman<P> {
    /// Builds a client over the given provider.
    ///
    /// Validates the configured chain id against the endpoint (zero adopts
    /// the reported value), resolves the rollup id from the rollup manager,
    /// and assembles the decoder set; validium mode requires `da`.
    pub async fn new(
        provider: P,
        mut config: EthermanConfig,
        da: Option<Arc<dyn DataAvailabilityProvider>>,
    ) -> EthermanResult<Self> {
        let reported = provider.chain_id().await.map_err(EthRequestError::Rpc)?;
        if config.l1_chain_id == 0 {
            tracing::info!(target: "zkevm::etherman", chain_id = reported, "using l1 chain id reported by the endpoint");
            config.l1_chain_id = reported;
        } else if config.l1_chain_id != reported {
            return Err(EthermanError::ChainIdMismatch {
                expected: config.l1_chain_id,
                reported,
            });
        }

        let decoders = if config.validium_enabled {
            tracing::info!(target: "zkevm::etherman", "validium mode enabled");
            let da = da.ok_or(EthermanError::MissingDataAvailability)?;
            decoder::validium_decoders(da)
        } else {
            decoder::rollup_decoders()
        };

        let rollup_id = view_call(
            &provider,
            "rollupAddressToID",
            config.contracts.rollup_manager,
            views::rollupAddressToIDCall { rollupAddress: config.contracts.zkevm },
        )
        .await?;
        tracing::debug!(target: "zkevm::etherman", rollup_id, "resolved rollup id");

        Ok(Self { provider, config, rollup_id, decoders, metrics: EthermanMetrics::default() })
    }

    /// The id of the tracked rollup, as registered on the rollup manager.
    pub const fn rollup_id(&self) -> u32 {
        self.rollup_id
    }

    /// The validated L1 chain id.
    pub const fn l1_chain_id(&self) -> u64 {
        self.config.l1_chain_id
    }

    /// The client configuration.
    pub const fn config(&self) -> &EthermanConfig {
        &self.config
    }

    /// The underlying RPC provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Reads the rollup events emitted in `[from_block, to_block]` (open
    /// ended when `to_block` is `None`) from the tracked contracts.
    ///
    /// Logs are processed strictly in the order the endpoint returns them;
    /// the consumer must replay each block's events in the order given by
    /// [`RollupInfo::order`].
    pub async fn rollup_info_by_block_range(
        &self,
        from_block: u64,
        to_block: Option<u64>,
    ) -> EthermanResult<RollupInfo> {
        let mut filter =
            Filter::new().address(self.config.contracts.all().to_vec()).from_block(from_block);
        if let Some(to_block) = to_block {
            filter = filter.to_block(to_block);
        }
        self.read_events(filter).await
    }

    /// Reads only the L1 info tree updates in the range, for bootstrapping an
    /// info-tree history that predates the rollup's own genesis.
    pub async fn rollup_info_previous_genesis(
        &self,
        from_block: u64,
        to_block: Option<u64>,
    ) -> EthermanResult<RollupInfo> {
        let mut filter = Filter::new()
            .address(vec![self.config.contracts.global_exit_root_manager])
            .event_signature(exit_root::UpdateL1InfoTree::SIGNATURE_HASH)
            .from_block(from_block);
        if let Some(to_block) = to_block {
            filter = filter.to_block(to_block);
        }
        self.read_events(filter).await
    }

    async fn read_events(&self, filter: Filter) -> EthermanResult<RollupInfo> {
        let started = Instant::now();
        let logs = self.provider.logs(&filter).await.map_err(EthRequestError::Rpc)?;

        tracing::debug!(target: "zkevm::etherman", count = logs.len(), "events detected");
        for log in &logs {
            tracing::debug!(
                target: "zkevm::etherman",
                signature = log
                    .topic0()
                    .and_then(|topic| L1EventKind::from_topic(*topic))
                    .map(|kind| kind.signature()),
                block_number = log.block_number,
                block_hash = ?log.block_hash,
                tx_hash = ?log.transaction_hash,
                "event detected"
            );
        }

        let prefetched = if self.config.parallel_block_requests {
            self.blocks_in_parallel(logs.iter().filter_map(|log| log.block_hash)).await?
        } else {
            HashMap::new()
        };

        let mut info = RollupInfo::default();
        for log in &logs {
            if let Err(error) = self.process_event(log, &mut info, &prefetched).await {
                tracing::warn!(target: "zkevm::etherman", %error, ?log, "error processing event");
                return Err(error);
            }
            self.metrics.events_processed.increment(1);
        }

        self.metrics.read_duration.record(started.elapsed().as_secs_f64());
        Ok(info)
    }

    /// The latest batch number sequenced on the rollup manager.
    pub async fn latest_batch_number(&self) -> EthermanResult<u64> {
        Ok(self.rollup_data().await?.lastBatchSequenced)
    }

    /// The latest batch number verified on the rollup manager.
    pub async fn latest_verified_batch_number(&self) -> EthermanResult<u64> {
        Ok(self.rollup_data().await?.lastVerifiedBatch)
    }

    /// The L2 chain id, preferring the legacy rollup contract and falling
    /// back to the rollup manager record. Zero is treated as an error.
    pub async fn l2_chain_id(&self) -> EthermanResult<u64> {
        match view_call(
            &self.provider,
            "chainID",
            self.config.contracts.zkevm,
            views::chainIDCall {},
        )
        .await
        {
            Ok(chain_id) if chain_id != 0 => Ok(chain_id),
            outcome => {
                if let Err(error) = outcome {
                    tracing::debug!(target: "zkevm::etherman", %error, "legacy chain id query failed, asking the rollup manager");
                }
                let chain_id = self.rollup_data().await?.chainID;
                if chain_id == 0 {
                    return Err(EthermanError::ZeroL2ChainId);
                }
                Ok(chain_id)
            }
        }
    }

    /// The fee for sequencing `num_batches` batches.
    pub async fn send_sequence_fee(&self, num_batches: u64) -> EthermanResult<U256> {
        let fee = view_call(
            &self.provider,
            "getBatchFee",
            self.config.contracts.rollup_manager,
            views::getBatchFeeCall {},
        )
        .await?;
        Ok(fee * U256::from(num_batches))
    }

    /// The trusted sequencer address of the rollup contract.
    pub async fn trusted_sequencer(&self) -> EthermanResult<Address> {
        view_call(
            &self.provider,
            "trustedSequencer",
            self.config.contracts.zkevm,
            views::trustedSequencerCall {},
        )
        .await
    }

    /// The trusted sequencer URL of the rollup contract.
    pub async fn trusted_sequencer_url(&self) -> EthermanResult<String> {
        view_call(
            &self.provider,
            "trustedSequencerURL",
            self.config.contracts.zkevm,
            views::trustedSequencerURLCall {},
        )
        .await
    }

    /// The latest L1 block number.
    pub async fn latest_block_number(&self) -> EthermanResult<u64> {
        self.block_number_by_tag(BlockNumberOrTag::Latest).await
    }

    /// The safe L1 block number.
    pub async fn safe_block_number(&self) -> EthermanResult<u64> {
        self.block_number_by_tag(BlockNumberOrTag::Safe).await
    }

    /// The finalized L1 block number.
    pub async fn finalized_block_number(&self) -> EthermanResult<u64> {
        self.block_number_by_tag(BlockNumberOrTag::Finalized).await
    }

    /// The timestamp of the latest L1 block, second precision.
    pub async fn latest_block_timestamp(&self) -> EthermanResult<u64> {
        let block = self
            .provider
            .block_by_number(BlockNumberOrTag::Latest)
            .await
            .map_err(EthRequestError::Rpc)?
            .ok_or(EthermanError::NotFound)?;
        Ok(block.header.timestamp)
    }

    /// The header fields of the L1 block with the given number.
    pub async fn l1_block_by_number(&self, number: u64) -> EthermanResult<RollupBlock> {
        let block = self
            .provider
            .block_by_number(number.into())
            .await
            .map_err(EthRequestError::Rpc)?
            .ok_or(EthermanError::NotFound)?;
        Ok(fetcher::into_rollup_block(&block))
    }

    /// The fork id registered for the given rollup type.
    pub(crate) async fn rollup_type_fork_id(&self, rollup_type_id: u32) -> EthermanResult<u64> {
        let rollup_type = view_call(
            &self.provider,
            "rollupTypeMap",
            self.config.contracts.rollup_manager,
            views::rollupTypeMapCall { rollupTypeID: rollup_type_id },
        )
        .await?;
        Ok(rollup_type.forkID)
    }

    async fn rollup_data(&self) -> EthermanResult<views::rollupIDToRollupDataReturn> {
        view_call(
            &self.provider,
            "rollupIDToRollupData",
            self.config.contracts.rollup_manager,
            views::rollupIDToRollupDataCall { rollupID: self.rollup_id },
        )
        .await
    }

    async fn block_number_by_tag(&self, tag: BlockNumberOrTag) -> EthermanResult<u64> {
        let block = self
            .provider
            .block_by_number(tag)
            .await
            .map_err(EthRequestError::Rpc)?
            .ok_or(EthermanError::NotFound)?;
        Ok(block.header.number)
    }
}

/// Issues a contract view call and decodes its return, surfacing malformed
/// return data as a [`EthermanError::CallDecode`].
async fn view_call<P: L1RpcProvider, C: SolCall>(
    provider: &P,
    method: &'static str,
    to: Address,
    call: C,
) -> EthermanResult<C::Return> {
    let data = provider
        .eth_call(to, call.abi_encode().into())
        .await
        .map_err(EthRequestError::Rpc)?;
    C::abi_decode_returns(&data).map_err(|source| EthermanError::CallDecode { method, source })
}
