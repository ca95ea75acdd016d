//! Fork-ID history reconstruction and genesis verification.

use crate::{
    error::{EthRequestError, EthermanError, EthermanResult, FilterLogError},
    provider::L1RpcProvider,
    Etherman,
};

use alloy_rpc_types_eth::{Filter, Log};
use alloy_sol_types::SolEvent;
use zkevm_sync_l1::abi::logs::{legacy, manager};
use zkevm_sync_primitives::ForkIdInterval;

/// The rollup-manager initializer version introducing the Etrog layout.
pub const ETROG_UPGRADE_VERSION: u64 = 2;

fn fork_event_topics() -> Vec<alloy_primitives::B256> {
    vec![
        legacy::UpdateZkEVMVersion::SIGNATURE_HASH,
        manager::UpdateRollup::SIGNATURE_HASH,
        manager::AddExistingRollup::SIGNATURE_HASH,
        manager::CreateNewRollup::SIGNATURE_HASH,
    ]
}

impl<P: L1RpcProvider> Etherman<P> {
    /// Reconstructs the fork history of the configured rollup over
    /// `[genesis_block, last_synced]`, scanning in chunks of the configured
    /// size. Intervals are contiguous: every event closes the previous
    /// interval at its batch number and opens `[batch + 1, u64::MAX]`.
    pub async fn fork_id_intervals(
        &self,
        genesis_block: u64,
        last_synced: u64,
    ) -> EthermanResult<Vec<ForkIdInterval>> {
        // at minimum the genesis block itself is scanned.
        let last_synced = last_synced.max(genesis_block);
        let chunk_size = self.config.fork_id_chunk_size;
        tracing::debug!(
            target: "zkevm::etherman",
            genesis_block,
            last_synced,
            chunk_size,
            "scanning fork definition events"
        );

        let mut logs = Vec::new();
        let mut start = genesis_block;
        while start <= last_synced {
            let end = start.saturating_add(chunk_size).min(last_synced);
            let filter = Filter::new()
                .address(self.config.contracts.all().to_vec())
                .event_signature(fork_event_topics())
                .from_block(start)
                .to_block(end);
            logs.extend(self.provider.logs(&filter).await.map_err(EthRequestError::Rpc)?);
            start = end.saturating_add(1);
        }

        let mut intervals: Vec<ForkIdInterval> = Vec::new();
        for log in logs {
            let Some((num_batch, fork_id, version)) = self.fork_event_values(&log).await? else {
                continue;
            };
            let block_number = log.block_number.ok_or(FilterLogError::MissingBlockNumber)?;

            if let Some(previous) = intervals.last_mut() {
                previous.to_batch_number = num_batch;
            }
            intervals.push(ForkIdInterval {
                from_batch_number: num_batch + 1,
                to_batch_number: u64::MAX,
                fork_id,
                version,
                block_number,
            });
        }

        tracing::debug!(target: "zkevm::etherman", count = intervals.len(), "fork intervals found");
        Ok(intervals)
    }

    /// Normalizes one fork-defining log to `(num_batch, fork_id, version)`.
    /// Events affecting other rollups yield `None`.
    async fn fork_event_values(
        &self,
        log: &Log,
    ) -> EthermanResult<Option<(u64, u64, String)>> {
        let topic = log.topic0().copied().unwrap_or_default();
        let values = match topic {
            legacy::UpdateZkEVMVersion::SIGNATURE_HASH => {
                let event = legacy::UpdateZkEVMVersion::decode_log(&log.inner)
                    .map_err(|error| FilterLogError::DecodeLogFailed {
                        log_type: "UpdateZkEVMVersion",
                        error,
                    })?
                    .data;
                Some((event.numBatch, event.forkID, event.version))
            }
            manager::UpdateRollup::SIGNATURE_HASH => {
                let event = manager::UpdateRollup::decode_log(&log.inner)
                    .map_err(|error| FilterLogError::DecodeLogFailed {
                        log_type: "UpdateRollup",
                        error,
                    })?
                    .data;
                if event.rollupID != self.rollup_id {
                    return Ok(None);
                }
                let fork_id = self.rollup_type_fork_id(event.newRollupTypeID).await?;
                Some((event.lastVerifiedBatchBeforeUpgrade, fork_id, String::new()))
            }
            manager::AddExistingRollup::SIGNATURE_HASH => {
                let event = manager::AddExistingRollup::decode_log(&log.inner)
                    .map_err(|error| FilterLogError::DecodeLogFailed {
                        log_type: "AddExistingRollup",
                        error,
                    })?
                    .data;
                if event.rollupID != self.rollup_id {
                    return Ok(None);
                }
                Some((event.lastVerifiedBatchBeforeUpgrade, event.forkID, String::new()))
            }
            manager::CreateNewRollup::SIGNATURE_HASH => {
                let event = manager::CreateNewRollup::decode_log(&log.inner)
                    .map_err(|error| FilterLogError::DecodeLogFailed {
                        log_type: "CreateNewRollup",
                        error,
                    })?
                    .data;
                if event.rollupID != self.rollup_id {
                    return Ok(None);
                }
                let fork_id = self.rollup_type_fork_id(event.rollupTypeID).await?;
                Some((0, fork_id, String::new()))
            }
            _ => None,
        };
        Ok(values)
    }

    /// Confirms that `genesis_block` contains the initial fork definition of
    /// the configured rollup: exactly a fork event whose batch number is
    /// zero.
    pub async fn verify_genesis_block_number(&self, genesis_block: u64) -> EthermanResult<()> {
        tracing::info!(target: "zkevm::etherman", genesis_block, "verifying genesis block number");
        let filter = Filter::new()
            .address(self.config.contracts.all().to_vec())
            .event_signature(vec![
                legacy::UpdateZkEVMVersion::SIGNATURE_HASH,
                manager::CreateNewRollup::SIGNATURE_HASH,
            ])
            .from_block(genesis_block)
            .to_block(genesis_block);
        let logs = self.provider.logs(&filter).await.map_err(EthRequestError::Rpc)?;

        let Some(log) = logs.first() else {
            return Err(EthermanError::GenesisNotFound(genesis_block));
        };

        let num_batch = match log.topic0().copied().unwrap_or_default() {
            legacy::UpdateZkEVMVersion::SIGNATURE_HASH => {
                legacy::UpdateZkEVMVersion::decode_log(&log.inner)
                    .map_err(|error| FilterLogError::DecodeLogFailed {
                        log_type: "UpdateZkEVMVersion",
                        error,
                    })?
                    .data
                    .numBatch
            }
            _ => {
                let event = manager::CreateNewRollup::decode_log(&log.inner)
                    .map_err(|error| FilterLogError::DecodeLogFailed {
                        log_type: "CreateNewRollup",
                        error,
                    })?
                    .data;
                // the rollup is created with an empty batch history; the type
                // lookup only serves diagnostics here.
                let fork_id = self.rollup_type_fork_id(event.rollupTypeID).await?;
                tracing::debug!(target: "zkevm::etherman", fork_id, "rollup created at genesis block");
                0
            }
        };

        if num_batch != 0 {
            return Err(EthermanError::GenesisNotInitial {
                block_number: genesis_block,
                num_batch,
            });
        }
        Ok(())
    }

    /// Returns the L1 block at which the rollup manager was initialized onto
    /// the Etrog layout, scanning `Initialized` events from the configured
    /// start block up to `genesis_block`.
    pub async fn l1_block_of_etrog_upgrade(
        &self,
        genesis_block: Option<u64>,
    ) -> EthermanResult<u64> {
        let mut filter = Filter::new()
            .address(vec![self.config.contracts.rollup_manager])
            .event_signature(manager::Initialized::SIGNATURE_HASH)
            .from_block(self.config.upgrade_scan_start_block);
        if let Some(end) = genesis_block {
            filter = filter.to_block(end);
        }

        for log in self.provider.logs(&filter).await.map_err(EthRequestError::Rpc)? {
            let event = manager::Initialized::decode_log(&log.inner)
                .map_err(|error| FilterLogError::DecodeLogFailed {
                    log_type: "Initialized",
                    error,
                })?
                .data;
            tracing::debug!(
                target: "zkevm::etherman",
                block_number = log.block_number,
                version = event.version,
                "initializer event"
            );
            if event.version == ETROG_UPGRADE_VERSION {
                let block_number = log.block_number.ok_or(FilterLogError::MissingBlockNumber)?;
                tracing::info!(target: "zkevm::etherman", block_number, "etrog upgrade found");
                return Ok(block_number);
            }
        }
        Err(EthermanError::NotFound)
    }
}
